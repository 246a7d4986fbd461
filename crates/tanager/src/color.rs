//! HSL/RGB conversions.
//!
//! Particles store color as HSL so hue can be interpolated cheaply; the
//! renderer converts back to RGB at draw time. Hue is in degrees `[0, 360)`,
//! every other channel is normalized to `[0, 1]`.

use glam::Vec3;

/// Wraps a hue into `[0, 360)` degrees.
///
/// Negative hues wrap by adding the smallest multiple of 360 that makes them
/// non-negative. Idempotent for hues already in range.
pub fn normalize_hue(hue: f32) -> f32 {
    let wrapped = hue % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

/// Converts a normalized RGB color to HSL `(hue, saturation, lightness)`.
///
/// Zero-chroma (achromatic) input yields hue 0 and saturation 0.
pub fn rgb_to_hsl(rgb: Vec3) -> Vec3 {
    let (r, g, b) = (rgb.x, rgb.y, rgb.z);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta) % 6.0
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    h *= 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Vec3::new(h, s, l)
}

/// Converts an HSL color to normalized RGB.
pub fn hsl_to_rgb(hsl: Vec3) -> Vec3 {
    let (h, s, l) = (hsl.x, hsl.y, hsl.z);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Vec3::new(r + m, g + m, b + m)
}
