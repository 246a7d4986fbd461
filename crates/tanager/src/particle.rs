use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One simulated point-mass record.
///
/// Fixed-layout value data with no identity beyond its buffer slot: 16 `f32`
/// fields, `#[repr(C)]`, so the renderer boundary can view a particle range
/// as plain bytes. Color is HSL (see [`crate::color`]). `age` is normalized
/// to the owning emitter's lifespan; a particle with `age >= 1` is expired
/// and is reclaimed before the behavior pipeline runs.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Simulation-clock time at which the particle was released.
    pub inception: f32,
    /// Lifespan-normalized age in `[0, 1)` while active.
    pub age: f32,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    /// HSL color: hue in degrees, saturation and lightness in `[0, 1]`.
    pub color: [f32; 3],
    pub scale: f32,
    /// Position of the trigger that released this particle; containers that
    /// confine particles relative to their release point read this.
    pub trigger_pos: [f32; 2],
    pub opacity: f32,
    pub rotation: f32,
    pub mass: f32,
    pub layer_depth: f32,
}

impl Particle {
    pub const SIZE_IN_BYTES: usize = std::mem::size_of::<Particle>();

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_array(self.velocity)
    }

    #[inline]
    pub fn color(&self) -> Vec3 {
        Vec3::from_array(self.color)
    }

    #[inline]
    pub fn trigger_pos(&self) -> Vec2 {
        Vec2::from_array(self.trigger_pos)
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position.to_array();
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity.to_array();
    }

    #[inline]
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color.to_array();
    }
}
