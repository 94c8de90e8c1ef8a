//! Vector and point algebra for 3D ray tracing.
//!
//! Directions and displacements ([`Vec3`]) are kept apart from locations
//! ([`Point3`]) at the type level, so only the affine combinations that make
//! geometric sense compile: point minus point gives a vector, point plus
//! vector gives a point. Both wrap [`glam::Vec3A`] for SIMD arithmetic.

use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::Vec3A;

/// Direction or displacement in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3(Vec3A);

impl Vec3 {
    /// Create a vector from its components.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3A::new(x, y, z))
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Z component.
    pub fn z(&self) -> f32 {
        self.0.z
    }

    /// Dot product.
    pub fn dot(&self, other: Vec3) -> f32 {
        self.0.dot(other.0)
    }

    /// Cross product.
    pub fn cross(&self, other: Vec3) -> Vec3 {
        Vec3(self.0.cross(other.0))
    }

    /// Squared Euclidean length.
    pub fn length_squared(&self) -> f32 {
        self.0.length_squared()
    }

    /// Euclidean length.
    pub fn length(&self) -> f32 {
        self.0.length()
    }

    /// Unit vector pointing the same way.
    pub fn normalize(&self) -> Vec3 {
        Vec3(self.0.normalize())
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 + rhs.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 - rhs.0)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3(-self.0)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, t: f32) -> Vec3 {
        Vec3(self.0 * t)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        Vec3(v.0 * self)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, t: f32) -> Vec3 {
        Vec3(self.0 / t)
    }
}

/// Location in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3(Vec3A);

impl Point3 {
    /// Create a point from its coordinates.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3A::new(x, y, z))
    }

    /// X coordinate.
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Z coordinate.
    pub fn z(&self) -> f32 {
        self.0.z
    }
}

impl Sub for Point3 {
    type Output = Vec3;

    fn sub(self, rhs: Point3) -> Vec3 {
        Vec3(self.0 - rhs.0)
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vec3) -> Point3 {
        Point3(self.0 + rhs.0)
    }
}

impl Sub<Vec3> for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Vec3) -> Point3 {
        Point3(self.0 - rhs.0)
    }
}
