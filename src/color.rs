//! RGB radiance values and their conversion to displayable pixels.

use std::ops::{Add, AddAssign, Div, Mul};

use glam::Vec3A;

use crate::interval::Interval;

/// Linear RGB color backed by [`glam::Vec3A`] for SIMD arithmetic.
///
/// Components are radiance values and may exceed 1.0 during accumulation;
/// they are only clamped when quantized for 8-bit output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(Vec3A);

impl Color {
    /// No light.
    pub const BLACK: Color = Color(Vec3A::ZERO);

    /// Full white, also the attenuation of clear glass.
    pub const WHITE: Color = Color(Vec3A::ONE);

    /// Create a color from linear RGB components.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self(Vec3A::new(r, g, b))
    }

    /// Red component.
    pub fn r(&self) -> f32 {
        self.0.x
    }

    /// Green component.
    pub fn g(&self) -> f32 {
        self.0.y
    }

    /// Blue component.
    pub fn b(&self) -> f32 {
        self.0.z
    }

    /// Apply gamma 2.0 correction (component-wise square root).
    pub fn gamma_corrected(&self) -> Color {
        Color(Vec3A::new(
            linear_to_gamma(self.0.x),
            linear_to_gamma(self.0.y),
            linear_to_gamma(self.0.z),
        ))
    }

    /// Quantize to 8-bit RGB, clamping components into [0, 1] first.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (255.999 * Interval::UNIT.clamp(self.0.x)) as u8,
            (255.999 * Interval::UNIT.clamp(self.0.y)) as u8,
            (255.999 * Interval::UNIT.clamp(self.0.z)) as u8,
        ]
    }
}

/// Gamma 2.0 transfer function for one component.
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Mul for Color {
    type Output = Color;

    /// Component-wise product, the attenuation of one color by another.
    fn mul(self, rhs: Color) -> Color {
        Color(self.0 * rhs.0)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    fn mul(self, c: Color) -> Color {
        Color(c.0 * self)
    }
}

impl Div<f32> for Color {
    type Output = Color;

    fn div(self, t: f32) -> Color {
        Color(self.0 / t)
    }
}
