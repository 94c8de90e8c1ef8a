//! Thin-lens camera for ray generation.

use rand::Rng;

use crate::random;
use crate::ray::Ray;
use crate::vec::{Point3, Vec3};

/// Positionable camera with depth-of-field support.
///
/// The viewport is placed at the focus distance, so rays converge exactly on
/// the plane of perfect focus; a positive aperture jitters ray origins over
/// the lens disk, blurring everything off that plane.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    origin: Point3,
    /// World position of the viewport's lower-left corner
    lower_left_corner: Point3,
    /// Vector across the full viewport width
    horizontal: Vec3,
    /// Vector up the full viewport height
    vertical: Vec3,
    /// Camera frame basis vector pointing right
    u: Vec3,
    /// Camera frame basis vector pointing up
    v: Vec3,
    /// Radius of the lens disk ray origins are sampled from
    lens_radius: f32,
}

impl Camera {
    /// Create a camera from its viewing parameters.
    ///
    /// `vfov` is the vertical field of view in degrees, `aspect_ratio` is
    /// width over height, `aperture` is the lens diameter and `focus_dist`
    /// the distance to the plane of perfect focus.
    pub fn new(
        lookfrom: Point3,
        lookat: Point3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        // Viewport size from the field of view, measured at the focus plane
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        // Orthonormal camera frame: w opposite the view direction, u right, v up
        let w = (lookfrom - lookat).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = lookfrom;
        let lower_left_corner = origin
            - focus_dist * half_width * u
            - focus_dist * half_height * v
            - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal: 2.0 * focus_dist * half_width * u,
            vertical: 2.0 * focus_dist * half_height * v,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate a ray through viewport coordinates (s, t).
    ///
    /// Both coordinates run over [0, 1], s left to right and t bottom to top.
    /// The origin is jittered over the lens disk for depth-of-field blur.
    pub fn get_ray<R: Rng>(&self, s: f32, t: f32, rng: &mut R) -> Ray {
        let rd = self.lens_radius * random::random_in_unit_disk(rng);
        let offset = self.u * rd.x() + self.v * rd.y();
        let origin = self.origin + offset;

        let direction = self.lower_left_corner + s * self.horizontal + t * self.vertical - origin;
        Ray::new(origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn pinhole(vfov: f32, aspect: f32) -> Camera {
        Camera::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            vfov,
            aspect,
            0.0,
            1.0,
        )
    }

    #[test]
    fn center_ray_points_down_the_view_axis() {
        let camera = pinhole(90.0, 2.0);
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let r = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(r.origin, Point3::new(0.0, 0.0, 0.0));
        let d = r.direction.normalize();
        assert!(d.x().abs() < 1e-6);
        assert!(d.y().abs() < 1e-6);
        assert!((d.z() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn field_of_view_sets_the_viewport_angle() {
        // With a 90 degree fov the top edge sits 45 degrees off axis
        let camera = pinhole(90.0, 1.0);
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let r = camera.get_ray(0.5, 1.0, &mut rng);
        let d = r.direction;
        assert!((d.y() - 1.0).abs() < 1e-5);
        assert!((d.z() + 1.0).abs() < 1e-5);
    }

    #[test]
    fn aspect_ratio_widens_the_horizontal_extent() {
        let camera = pinhole(90.0, 2.0);
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let right = camera.get_ray(1.0, 0.5, &mut rng).direction;
        let top = camera.get_ray(0.5, 1.0, &mut rng).direction;
        assert!((right.x() - 2.0 * top.y()).abs() < 1e-5);
    }

    #[test]
    fn lens_origins_stay_within_the_aperture() {
        let aperture = 0.5;
        let camera = Camera::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            40.0,
            1.0,
            aperture,
            3.0,
        );
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        let mut moved = 0;
        for _ in 0..200 {
            let r = camera.get_ray(0.3, 0.7, &mut rng);
            let offset = r.origin - Point3::new(0.0, 0.0, 0.0);
            assert!(offset.length() < aperture / 2.0);
            // Lens samples live in the camera's u-v plane
            assert!(offset.z().abs() < 1e-6);
            if offset.length() > 1e-6 {
                moved += 1;
            }
        }
        assert!(moved > 0);
    }

    #[test]
    fn defocused_rays_converge_on_the_focus_plane() {
        let focus_dist = 3.0;
        let camera = Camera::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            40.0,
            1.0,
            0.8,
            focus_dist,
        );
        let mut rng = ChaCha20Rng::seed_from_u64(9);

        // Every lens sample aims at the same viewport target, reached at t = 1
        let reference = camera.get_ray(0.25, 0.75, &mut rng).at(1.0);
        for _ in 0..50 {
            let target = camera.get_ray(0.25, 0.75, &mut rng).at(1.0);
            assert!((target - reference).length() < 1e-4);
        }
        // The target really sits on the focus plane
        assert!((reference.z() + focus_dist).abs() < 1e-4);
    }
}
