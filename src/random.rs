//! Random sampling for ray tracing.
//!
//! Every draw takes an explicit generator, so callers own their streams and
//! renders are reproducible. [`pixel_rng`] derives the independent per-pixel
//! streams the parallel driver relies on.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::color::Color;
use crate::vec::Vec3;

/// Stride between derived stream seeds (the SplitMix64 increment, odd so the
/// mapping from index to seed is injective).
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32<R: Rng>(rng: &mut R) -> f32 {
    rng.random()
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Random point strictly inside the unit sphere, by rejection from the
/// enclosing cube.
pub fn random_in_unit_sphere<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random point strictly inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate random RGB color with components in [0.0, 1.0).
pub fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Generate random RGB color with components in [min, max).
pub fn random_color_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> Color {
    Color::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}

/// Independent generator for one pixel of one render.
///
/// Pixels sampled on different threads draw from their own streams, so the
/// rendered image depends only on the seed, never on scheduling. The +1
/// offset keeps every pixel stream distinct from the scene stream, which is
/// seeded with the bare seed.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> ChaCha20Rng {
    let stream = pixel_index.wrapping_add(1).wrapping_mul(SEED_STRIDE);
    ChaCha20Rng::seed_from_u64(seed.wrapping_add(stream))
}
