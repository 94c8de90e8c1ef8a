use clap::Parser;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

use pathlight::camera::Camera;
use pathlight::color::Color;
use pathlight::hittable::{SceneError, World};
use pathlight::material::Material;
use pathlight::output::{save_exr, save_png, save_ppm};
use pathlight::random;
use pathlight::renderer::{quantize, render, RenderSettings};
use pathlight::vec::{Point3, Vec3};

/// Create the book cover scene with random spheres
fn create_scene(rng: &mut ChaCha20Rng) -> Result<World, SceneError> {
    let mut world = World::new();

    // Ground sphere
    let ground_material = world.add_material(Material::Lambertian {
        albedo: Color::new(0.5, 0.5, 0.5),
    })?;
    world.add_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground_material)?;

    // Generate 22x22 grid of small spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * random::random_f32(rng),
                0.2,
                b as f32 + 0.9 * random::random_f32(rng),
            );

            // Don't place spheres too close to the large feature spheres
            if (center - Point3::new(4.0, 0.2, 0.0)).length() > 0.9 {
                let sphere_material = if choose_mat < 0.8 {
                    // Diffuse material
                    let albedo = random::random_color(rng) * random::random_color(rng);
                    world.add_material(Material::Lambertian { albedo })?
                } else if choose_mat < 0.95 {
                    // Metal material
                    let albedo = random::random_color_range(rng, 0.5, 1.0);
                    let fuzz = random::random_f32_range(rng, 0.0, 0.5);
                    world.add_material(Material::Metal { albedo, fuzz })?
                } else {
                    // Glass material
                    world.add_material(Material::Dielectric {
                        refraction_index: 1.5,
                    })?
                };

                world.add_sphere(center, 0.2, sphere_material)?;
            }
        }
    }

    // Three large feature spheres
    let material1 = world.add_material(Material::Dielectric {
        refraction_index: 1.5,
    })?;
    world.add_sphere(Point3::new(0.0, 1.0, 0.0), 1.0, material1)?;

    let material2 = world.add_material(Material::Lambertian {
        albedo: Color::new(0.4, 0.2, 0.1),
    })?;
    world.add_sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, material2)?;

    let material3 = world.add_material(Material::Metal {
        albedo: Color::new(0.7, 0.6, 0.5),
        fuzz: 0.0,
    })?;
    world.add_sphere(Point3::new(4.0, 1.0, 0.0), 1.0, material3)?;

    Ok(world)
}

/// Create the camera for the book cover shot
fn create_camera(width: u32, height: u32) -> Camera {
    Camera::new(
        Point3::new(13.0, 2.0, 3.0),
        Point3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        20.0,
        width as f32 / height as f32,
        0.1,
        10.0,
    )
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!(
        "Pathlight - Git Version {} ({})",
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        "Image resolution: {}x{}, samples per pixel: {}, seed: {}",
        args.width, args.height, args.samples_per_pixel, seed
    );

    // The seed pins the scene layout and every pixel's sample stream
    let mut scene_rng = ChaCha20Rng::seed_from_u64(seed);
    let world = match create_scene(&mut scene_rng) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Scene setup failed: {}", e);
            std::process::exit(1);
        }
    };
    info!("Scene contains {} spheres", world.sphere_count());

    let camera = create_camera(args.width, args.height);
    let settings = RenderSettings {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        seed,
    };

    let image = match render(&world, &camera, &settings) {
        Ok(image) => image,
        Err(e) => {
            log::error!("Invalid render settings: {}", e);
            std::process::exit(1);
        }
    };

    // Save image based on file extension
    if args.output.ends_with(".exr") {
        save_exr(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_png(&quantize(&image), &args.output);
    } else if args.output.ends_with(".ppm") {
        save_ppm(&quantize(&image), &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png, .ppm and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
