//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection using an optimized quadratic formula.

use crate::hittable::{HitRecord, SceneError};
use crate::interval::Interval;
use crate::material::MaterialId;
use crate::ray::Ray;
use crate::vec::Point3;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub(crate) center: Point3,
    pub(crate) radius: f32,
    pub(crate) material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius must be strictly positive.
    pub fn new(center: Point3, radius: f32, material: MaterialId) -> Result<Self, SceneError> {
        if radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }

    /// Test for ray intersection within the given parameter range.
    ///
    /// Returns the nearest hit whose t lies strictly inside `ray_t`.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Vector from ray origin to sphere center
        let oc = self.center - r.origin;

        // Optimized quadratic equation coefficients
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(r, root, p, outward_normal, self.material))
    }
}
