use bytemuck::Zeroable;

use crate::particle::Particle;

/// Contiguous, fixed-capacity particle storage for one emitter.
///
/// The active particles always form the prefix `[0, count)` with no holes:
/// releasing appends at the cursor, reclaiming removes from the front and
/// shifts the remainder down. Release order is preserved, so the prefix is
/// monotonic in inception time; the emitter's reclaim scan relies on that.
///
/// The buffer is exclusively owned by one [`ParticleEmitter`](crate::ParticleEmitter);
/// the backing allocation is freed when the buffer is dropped.
#[derive(Debug)]
pub struct ParticleBuffer {
    particles: Box<[Particle]>,
    count: usize,
}

impl ParticleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::zeroed(); capacity].into_boxed_slice(),
            count: 0,
        }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Number of free slots remaining.
    pub fn available(&self) -> usize {
        self.particles.len() - self.count
    }

    /// Number of active particles.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Activates up to `quantity` particles and returns the newly active
    /// slice for the caller to initialize.
    ///
    /// Releasing more than the available headroom is not an error: the
    /// request silently clamps and the returned slice holds exactly the
    /// number actually released.
    pub fn release(&mut self, quantity: usize) -> &mut [Particle] {
        let released = quantity.min(self.available());
        let start = self.count;
        self.count += released;
        &mut self.particles[start..start + released]
    }

    /// Retires the oldest `number` particles from the front of the active
    /// prefix, shifting the remainder down to index 0.
    pub fn reclaim(&mut self, number: usize) {
        let number = number.min(self.count);
        self.particles.copy_within(number..self.count, 0);
        self.count -= number;
    }

    /// The active prefix, oldest first.
    pub fn active(&self) -> &[Particle] {
        &self.particles[..self.count]
    }

    pub fn active_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[..self.count]
    }

    /// Copies the active prefix into `destination` in release order and
    /// returns the number of particles copied. Used for front-to-back draw
    /// ordering.
    pub fn copy_to(&self, destination: &mut [Particle]) -> usize {
        let n = self.count.min(destination.len());
        destination[..n].copy_from_slice(&self.particles[..n]);
        n
    }

    /// Copies the active prefix into `destination` newest first and returns
    /// the number of particles copied. Used for back-to-front draw ordering
    /// without re-sorting.
    pub fn copy_to_reverse(&self, destination: &mut [Particle]) -> usize {
        let n = self.count.min(destination.len());
        for (slot, particle) in destination[..n]
            .iter_mut()
            .zip(self.particles[..self.count].iter().rev())
        {
            *slot = *particle;
        }
        n
    }

    /// Raw byte view of the active prefix, for renderers that upload the
    /// particle data wholesale.
    pub fn active_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.active())
    }
}
