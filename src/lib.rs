//! Pathlight Monte Carlo path tracer.
//!
//! Renders scenes of spheres with diffuse, metallic and glass materials
//! through a thin-lens camera, with deterministic seeded sampling. Outputs
//! PPM, PNG and EXR formats.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod color;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod random;
pub mod ray;
pub mod renderer;
pub mod sphere;
pub mod vec;
