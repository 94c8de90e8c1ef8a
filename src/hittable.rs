//! Ray-object intersection and scene assembly.
//!
//! Defines [`HitRecord`] for intersection data and [`World`], the validated
//! collection of spheres and the material arena they index into.

use thiserror::Error;

use crate::interval::Interval;
use crate::material::{Material, MaterialId};
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::vec::{Point3, Vec3};

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, and the material
/// id needed for shading.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Point3,
    /// Surface normal at the intersection point (unit vector, against the ray)
    pub normal: Vec3,
    /// Ray parameter at the intersection point
    pub t: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: MaterialId,
}

impl HitRecord {
    /// Build a record from the geometric outward normal.
    ///
    /// The stored normal always points against the incident ray; `front_face`
    /// remembers which side was hit.
    pub(crate) fn new(
        r: &Ray,
        t: f32,
        p: Point3,
        outward_normal: Vec3,
        material: MaterialId,
    ) -> Self {
        let front_face = r.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Validation failures raised while assembling a scene.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    /// Sphere radius was zero or negative.
    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f32),

    /// Refraction index was zero or negative.
    #[error("refraction index must be positive, got {0}")]
    InvalidRefractionIndex(f32),

    /// Metal fuzz was outside [0, 1].
    #[error("metal fuzz must lie in [0, 1], got {0}")]
    InvalidFuzz(f32),

    /// A sphere referenced a material id this world never issued.
    #[error("material id {0} is not registered in this world")]
    UnknownMaterial(u32),
}

/// Collection of spheres forming a scene, plus the materials they reference.
///
/// Materials live in an arena owned by the world; spheres store ids into it,
/// so one material can be shared by any number of spheres.
#[derive(Debug, Default)]
pub struct World {
    spheres: Vec<Sphere>,
    materials: Vec<Material>,
}

impl World {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its id.
    ///
    /// Material parameters are validated here, before any rendering starts.
    pub fn add_material(&mut self, material: Material) -> Result<MaterialId, SceneError> {
        match material {
            Material::Metal { fuzz, .. } if !Interval::UNIT.contains(fuzz) => {
                return Err(SceneError::InvalidFuzz(fuzz));
            }
            Material::Dielectric { refraction_index } if refraction_index <= 0.0 => {
                return Err(SceneError::InvalidRefractionIndex(refraction_index));
            }
            _ => {}
        }

        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        Ok(id)
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(
        &mut self,
        center: Point3,
        radius: f32,
        material: MaterialId,
    ) -> Result<(), SceneError> {
        if material.0 as usize >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(material.0));
        }
        self.spheres.push(Sphere::new(center, radius, material)?);
        Ok(())
    }

    /// Look up a material by id.
    ///
    /// Panics if the id was not issued by this world.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0 as usize]
    }

    /// Number of spheres in the scene.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Find the nearest intersection along the ray, if any.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        // Every accepted hit shrinks the search range for the rest
        for sphere in &self.spheres {
            if let Some(rec) = sphere.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
