//! Path-tracing integrator and the parallel per-pixel render driver.

use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::Rng;
use rayon::prelude::*;
use thiserror::Error;

use crate::camera::Camera;
use crate::color::Color;
use crate::hittable::World;
use crate::interval::Interval;
use crate::random;
use crate::ray::Ray;

/// Hits closer than this are ignored, so a bounced ray cannot immediately
/// re-hit the surface it started on (shadow acne).
const T_MIN: f32 = 0.001;

/// Settings for one render pass.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Output image width in pixels (at least 2)
    pub width: u32,
    /// Output image height in pixels (at least 2)
    pub height: u32,
    /// Number of jittered samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces per path
    pub max_depth: u32,
    /// Base seed; every pixel derives its own stream from it
    pub seed: u64,
}

/// Rejected render settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Width or height below the 2-pixel minimum the sampler needs.
    #[error("image dimensions must be at least 2x2, got {0}x{1}")]
    ImageTooSmall(u32, u32),

    /// Zero samples per pixel would leave every pixel undefined.
    #[error("samples per pixel must be at least 1")]
    NoSamples,
}

impl RenderSettings {
    /// Validate the settings before rendering starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Pixel coordinates are normalized by (width - 1) and (height - 1)
        if self.width < 2 || self.height < 2 {
            return Err(ConfigError::ImageTooSmall(self.width, self.height));
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::NoSamples);
        }
        Ok(())
    }
}

/// Trace a ray and compute its color contribution.
///
/// Scattered bounces are followed recursively, multiplying attenuations
/// along the path until the ray is absorbed or escapes to the sky. The
/// depth budget caps the recursion.
pub fn ray_color<R: Rng>(r: &Ray, world: &World, depth: u32, rng: &mut R) -> Color {
    // If we've exceeded the ray bounce limit, no more light is gathered
    if depth == 0 {
        return Color::BLACK;
    }

    if let Some(rec) = world.hit(r, Interval::new(T_MIN, f32::INFINITY)) {
        return match world.material(rec.material).scatter(r, &rec, rng) {
            Some(scatter) => scatter.attenuation * ray_color(&scatter.ray, world, depth - 1, rng),
            None => Color::BLACK,
        };
    }

    background(r)
}

/// Sky gradient for rays that miss everything.
fn background(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    // Blend factor from the ray's vertical angle: 0 at the horizon-down, 1 straight up
    let a = 0.5 * (unit_direction.y() + 1.0);
    (1.0 - a) * Color::WHITE + a * Color::new(0.5, 0.7, 1.0)
}

/// Render the scene into a linear radiance buffer.
///
/// Pixels are distributed across threads; each one draws from its own seeded
/// stream, so two renders with the same settings produce identical buffers
/// regardless of thread count or scheduling. Row 0 of the buffer is the top
/// of the image.
pub fn render(
    world: &World,
    camera: &Camera,
    settings: &RenderSettings,
) -> Result<ImageBuffer<Rgb<f32>, Vec<f32>>, ConfigError> {
    settings.validate()?;

    let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
        ImageBuffer::new(settings.width, settings.height);

    info!(
        "Generating image using {} CPU cores...",
        rayon::current_num_threads()
    );
    let generation_start = std::time::Instant::now();
    let pb = ProgressBar::new(u64::from(settings.width) * u64::from(settings.height));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} ETA: {eta}")
            .unwrap(),
    );

    let width_denom = (settings.width - 1) as f32;
    let height_denom = (settings.height - 1) as f32;

    // Parallel pixel processing using Rayon with anti-aliasing
    image.enumerate_pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
        let pixel_index = u64::from(y) * u64::from(settings.width) + u64::from(x);
        let mut rng = random::pixel_rng(settings.seed, pixel_index);

        // Viewport t grows upward while buffer rows grow downward
        let row_from_bottom = settings.height - 1 - y;

        let mut pixel_color = Color::BLACK;
        for _ in 0..settings.samples_per_pixel {
            let s = (x as f32 + random::random_f32(&mut rng)) / width_denom;
            let t = (row_from_bottom as f32 + random::random_f32(&mut rng)) / height_denom;
            let ray = camera.get_ray(s, t, &mut rng);
            pixel_color += ray_color(&ray, world, settings.max_depth, &mut rng);
        }

        // Average the samples
        pixel_color = pixel_color / settings.samples_per_pixel as f32;
        *pixel = Rgb([pixel_color.r(), pixel_color.g(), pixel_color.b()]);
        pb.inc(1);
    });

    pb.finish();
    info!("Image generated in {:.2?}", generation_start.elapsed());

    Ok(image)
}

/// Gamma-correct and quantize a linear radiance buffer to 8-bit RGB.
pub fn quantize(image: &ImageBuffer<Rgb<f32>, Vec<f32>>) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        let color = Color::new(pixel[0], pixel[1], pixel[2]).gamma_corrected();
        Rgb(color.to_rgb8())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::World;
    use crate::material::Material;
    use crate::vec::{Point3, Vec3};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn single_sphere_world() -> World {
        let mut world = World::new();
        let grey = world
            .add_material(Material::Lambertian {
                albedo: Color::new(0.5, 0.5, 0.5),
            })
            .unwrap();
        world
            .add_sphere(Point3::new(0.0, 0.0, -2.0), 1.0, grey)
            .unwrap();
        world
    }

    fn demo_world() -> World {
        let mut world = single_sphere_world();
        let metal = world
            .add_material(Material::Metal {
                albedo: Color::new(0.8, 0.8, 0.9),
                fuzz: 0.3,
            })
            .unwrap();
        let glass = world
            .add_material(Material::Dielectric {
                refraction_index: 1.5,
            })
            .unwrap();
        world
            .add_sphere(Point3::new(-2.0, 0.0, -2.0), 0.5, metal)
            .unwrap();
        world
            .add_sphere(Point3::new(2.0, 0.0, -2.0), 0.5, glass)
            .unwrap();
        world
    }

    fn demo_camera(aspect: f32) -> Camera {
        Camera::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -2.0),
            Vec3::new(0.0, 1.0, 0.0),
            60.0,
            aspect,
            0.0,
            3.0,
        )
    }

    #[test]
    fn depth_zero_gathers_no_light() {
        let world = single_sphere_world();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let r = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(ray_color(&r, &world, 0, &mut rng), Color::BLACK);
    }

    #[test]
    fn missing_everything_returns_the_sky_gradient() {
        let world = World::new();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let r = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));

        // Straight up blends all the way to the sky color
        for depth in [1, 5, 50] {
            let c = ray_color(&r, &world, depth, &mut rng);
            assert!((c.r() - 0.5).abs() < 1e-6);
            assert!((c.g() - 0.7).abs() < 1e-6);
            assert!((c.b() - 1.0).abs() < 1e-6);
        }

        // Straight down is pure white
        let down = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(ray_color(&down, &world, 50, &mut rng), Color::WHITE);
    }

    #[test]
    fn bounced_radiance_stays_within_unit_range() {
        let world = demo_world();
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        for i in 0..50 {
            let x = (i as f32 / 50.0) * 4.0 - 2.0;
            let r = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(x, -0.2, -1.0));
            let c = ray_color(&r, &world, 50, &mut rng);
            for channel in [c.r(), c.g(), c.b()] {
                assert!(channel.is_finite());
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn more_samples_spread_less() {
        let world = single_sphere_world();
        let r = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));

        let mean_of = |samples: u32, seed: u64| -> f32 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut sum = 0.0;
            for _ in 0..samples {
                sum += ray_color(&r, &world, 8, &mut rng).r();
            }
            sum / samples as f32
        };

        let spread = |samples: u32, base_seed: u64| -> f32 {
            let means: Vec<f32> = (0..16).map(|k| mean_of(samples, base_seed + k)).collect();
            let max = means.iter().cloned().fold(f32::MIN, f32::max);
            let min = means.iter().cloned().fold(f32::MAX, f32::min);
            max - min
        };

        // 64x the samples shrinks the Monte Carlo noise roughly 8x
        assert!(spread(512, 100) < spread(8, 0));
    }

    #[test]
    fn identical_settings_render_identical_images() {
        let world = demo_world();
        let camera = demo_camera(1.0);
        let settings = RenderSettings {
            width: 8,
            height: 8,
            samples_per_pixel: 4,
            max_depth: 10,
            seed: 99,
        };

        let first = render(&world, &camera, &settings).unwrap();
        let second = render(&world, &camera, &settings).unwrap();
        assert_eq!(first.into_raw(), second.into_raw());
    }

    #[test]
    fn different_seeds_render_different_images() {
        let world = demo_world();
        let camera = demo_camera(1.0);
        let mut settings = RenderSettings {
            width: 8,
            height: 8,
            samples_per_pixel: 4,
            max_depth: 10,
            seed: 1,
        };

        let first = render(&world, &camera, &settings).unwrap();
        settings.seed = 2;
        let second = render(&world, &camera, &settings).unwrap();
        assert_ne!(first.into_raw(), second.into_raw());
    }

    #[test]
    fn rendered_pixels_are_finite_unit_range_radiance() {
        let world = demo_world();
        let camera = demo_camera(1.5);
        let settings = RenderSettings {
            width: 12,
            height: 8,
            samples_per_pixel: 4,
            max_depth: 10,
            seed: 5,
        };

        let image = render(&world, &camera, &settings).unwrap();
        assert_eq!(image.dimensions(), (12, 8));
        for pixel in image.pixels() {
            for channel in pixel.0 {
                assert!(channel.is_finite());
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn degenerate_settings_are_rejected() {
        let world = World::new();
        let camera = demo_camera(1.0);

        let too_small = RenderSettings {
            width: 1,
            height: 8,
            samples_per_pixel: 4,
            max_depth: 10,
            seed: 0,
        };
        assert_eq!(
            render(&world, &camera, &too_small).unwrap_err(),
            ConfigError::ImageTooSmall(1, 8)
        );

        let no_samples = RenderSettings {
            width: 8,
            height: 8,
            samples_per_pixel: 0,
            max_depth: 10,
            seed: 0,
        };
        assert_eq!(
            render(&world, &camera, &no_samples).unwrap_err(),
            ConfigError::NoSamples
        );
    }

    #[test]
    fn quantize_applies_gamma_then_scales() {
        let mut linear: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(2, 1);
        linear.put_pixel(0, 0, Rgb([0.25, 1.0, 0.0]));
        linear.put_pixel(1, 0, Rgb([2.0, -1.0, 0.64]));

        let rgb8 = quantize(&linear);
        // sqrt(0.25) = 0.5 lands at 127
        assert_eq!(rgb8.get_pixel(0, 0).0, [127, 255, 0]);
        // Components clamp after gamma: sqrt(2) clamps to 1, negatives to 0
        assert_eq!(rgb8.get_pixel(1, 0).0, [255, 0, 204]);
    }
}
