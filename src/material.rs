//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent). Materials are registered in a world's arena
//! and referenced by spheres through an opaque [`MaterialId`].

use rand::Rng;

use crate::color::Color;
use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use crate::vec::Vec3;

/// Handle to a material registered in a world's arena.
///
/// Issued by `World::add_material`; only valid for the world that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialId(pub(crate) u32);

/// Surface scattering models.
#[derive(Debug, Clone, Copy)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },
}

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// How much each color channel survives the bounce.
    pub attenuation: Color,
    /// The continuation ray, anchored at the hit point.
    pub ray: Ray,
}

impl Material {
    /// Compute ray scattering for this material.
    ///
    /// Returns the attenuation and scattered ray, or `None` if the ray was
    /// absorbed.
    pub fn scatter<R: Rng>(&self, r_in: &Ray, rec: &HitRecord, rng: &mut R) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Some(scatter_dielectric(refraction_index, r_in, rec, rng))
            }
        }
    }
}

/// Lambertian diffuse scattering, biased toward the normal.
fn scatter_lambertian<R: Rng>(albedo: Color, rec: &HitRecord, rng: &mut R) -> Scatter {
    let mut scatter_direction = rec.normal + random::random_in_unit_sphere(rng);

    // Catch degenerate scatter direction (very close to zero)
    if scatter_direction.length_squared() < 1e-8 {
        scatter_direction = rec.normal;
    }

    Scatter {
        attenuation: albedo,
        ray: Ray::new(rec.p, scatter_direction),
    }
}

/// Metallic reflection with optional surface roughness.
///
/// Rays that the fuzz perturbation pushes below the surface are absorbed.
fn scatter_metal<R: Rng>(
    albedo: Color,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut R,
) -> Option<Scatter> {
    let reflected = reflect(r_in.direction.normalize(), rec.normal);
    let direction = reflected + fuzz * random::random_in_unit_sphere(rng);

    if direction.dot(rec.normal) > 0.0 {
        Some(Scatter {
            attenuation: albedo,
            ray: Ray::new(rec.p, direction),
        })
    } else {
        None
    }
}

/// Dielectric scattering, choosing reflection or refraction per sample.
fn scatter_dielectric<R: Rng>(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut R,
) -> Scatter {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // Total internal reflection leaves no refraction branch to sample
    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f32(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Scatter {
        // Glass doesn't attenuate light
        attenuation: Color::WHITE,
        ray: Ray::new(rec.p, direction),
    }
}

/// Reflect a vector off a surface using the law of reflection.
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through an interface using Snell's law.
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
