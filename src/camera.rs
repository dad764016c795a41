use nalgebra::Vector3;
use rand::Rng;

use crate::{
    error::ConfigError,
    sampling::{random_in_unit_disk, sample_square},
    Point3, Ray,
};

/// Caller-facing camera settings. Derived geometry lives in [`Camera`] and is
/// rebuilt from this record on every render.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Image width over height.
    pub aspect_ratio: f64,
    pub image_width: usize,
    pub samples_per_pixel: usize,
    /// Maximum number of ray bounces into the scene.
    pub max_depth: usize,
    /// Vertical field of view in degrees.
    pub vfov: f64,
    pub lookfrom: Point3,
    pub lookat: Point3,
    pub vup: Vector3<f64>,
    /// Cone angle in degrees of rays through each pixel; 0 disables blur.
    pub defocus_angle: f64,
    /// Distance from `lookfrom` to the plane of perfect focus.
    pub focus_dist: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::new(0.0, 0.0, 0.0),
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vector3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    pub fn image_height(&self) -> usize {
        ((self.image_width as f64 / self.aspect_ratio) as usize).max(1)
    }

    /// Size in bytes of the RGB8 buffer a render writes into. Only meaningful
    /// once [`validate`](Self::validate) has passed.
    pub fn buffer_len(&self) -> usize {
        self.image_width * self.image_height() * 3
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::AspectRatio(self.aspect_ratio));
        }
        let height = self.image_height();
        if self
            .image_width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(3))
            .is_none()
        {
            return Err(ConfigError::TooLarge {
                width: self.image_width,
                height,
            });
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(ConfigError::FieldOfView(self.vfov));
        }
        if !(self.focus_dist > 0.0) {
            return Err(ConfigError::FocusDistance(self.focus_dist));
        }
        let view = self.lookfrom - self.lookat;
        if view.norm_squared() == 0.0 {
            return Err(ConfigError::DegenerateView);
        }
        if self.vup.cross(&view).norm_squared() == 0.0 {
            return Err(ConfigError::DegenerateUp);
        }
        Ok(())
    }
}

/// Viewport geometry for one render.
#[derive(Clone, Debug)]
pub struct Camera {
    center: Point3,
    image_width: usize,
    image_height: usize,
    pixel_delta_u: Vector3<f64>,
    pixel_delta_v: Vector3<f64>,
    pixel_0: Point3,
    defocus_angle: f64,
    defocus_disk_u: Vector3<f64>,
    defocus_disk_v: Vector3<f64>,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let image_width = config.image_width;
        let image_height = config.image_height();
        let center = config.lookfrom;

        let h = (config.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * image_width as f64 / image_height as f64;

        let w = (config.lookfrom - config.lookat).normalize();
        let u = config.vup.cross(&w).normalize();
        let v = w.cross(&u);

        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;
        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel_0 = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        Self {
            center,
            image_width,
            image_height,
            pixel_delta_u,
            pixel_delta_v,
            pixel_0,
            defocus_angle: config.defocus_angle,
            defocus_disk_u: defocus_radius * u,
            defocus_disk_v: defocus_radius * v,
        }
    }

    pub fn image_width(&self) -> usize {
        self.image_width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    /// Center of pixel `(x, y)` on the focus plane.
    pub fn pixel_center(&self, x: usize, y: usize) -> Point3 {
        self.pixel_0 + (x as f64 * self.pixel_delta_u) + (y as f64 * self.pixel_delta_v)
    }

    /// Jittered ray through pixel `(x, y)`, starting on the defocus disk when
    /// depth of field is enabled.
    pub fn cast<R: Rng + ?Sized>(&self, x: usize, y: usize, rng: &mut R) -> Ray {
        let (px, py) = sample_square(rng);
        let pixel_sampled = self.pixel_center(x, y)
            + (self.pixel_delta_u * px)
            + (self.pixel_delta_v * py);
        let origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        Ray::new(origin, pixel_sampled - origin)
    }

    fn defocus_disk_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_image_height() {
        let mut config = CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            ..Default::default()
        };
        assert_eq!(config.image_height(), 225);
        assert_eq!(config.buffer_len(), 400 * 225 * 3);

        config.image_width = 1;
        assert_eq!(config.image_height(), 1);
    }

    #[test]
    fn test_validate() {
        assert_eq!(CameraConfig::default().validate(), Ok(()));

        let zero_width = CameraConfig {
            image_width: 0,
            ..Default::default()
        };
        assert_eq!(zero_width.validate(), Err(ConfigError::ZeroWidth));

        let zero_samples = CameraConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };
        assert_eq!(zero_samples.validate(), Err(ConfigError::ZeroSamples));

        let same_point = CameraConfig {
            lookat: Point3::zeros(),
            ..Default::default()
        };
        assert_eq!(same_point.validate(), Err(ConfigError::DegenerateView));

        let straight_down = CameraConfig {
            lookat: Point3::new(0.0, -1.0, 0.0),
            ..Default::default()
        };
        assert_eq!(straight_down.validate(), Err(ConfigError::DegenerateUp));
    }

    #[test]
    fn test_validate_rejects_unaddressable_buffer() {
        let huge = CameraConfig {
            image_width: usize::MAX / 4,
            aspect_ratio: 1e-9,
            ..Default::default()
        };
        assert_eq!(
            huge.validate(),
            Err(ConfigError::TooLarge {
                width: usize::MAX / 4,
                height: huge.image_height(),
            })
        );

        let widest = CameraConfig {
            image_width: usize::MAX / 2,
            aspect_ratio: f64::MAX,
            ..Default::default()
        };
        assert_eq!(widest.image_height(), 1);
        assert!(matches!(widest.validate(), Err(ConfigError::TooLarge { .. })));
    }

    #[test]
    fn test_basis_follows_look_direction() {
        // looking down +x with y up puts the image's right edge toward +z
        let config = CameraConfig {
            image_width: 2,
            lookat: Point3::new(1.0, 0.0, 0.0),
            focus_dist: 1.0,
            ..Default::default()
        };
        let camera = Camera::new(&config);

        assert!((camera.pixel_center(0, 0) - Vector3::new(1.0, 0.5, -0.5)).norm() < 1e-12);
        assert!((camera.pixel_center(1, 1) - Vector3::new(1.0, -0.5, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn test_viewport_corners() {
        let config = CameraConfig {
            image_width: 2,
            focus_dist: 1.0,
            ..Default::default()
        };
        let camera = Camera::new(&config);

        // vfov 90 at focus 1 spans [-1, 1] in both axes, pixels are 1 unit wide
        assert!((camera.pixel_center(0, 0) - Vector3::new(-0.5, 0.5, -1.0)).norm() < 1e-12);
        assert!((camera.pixel_center(1, 1) - Vector3::new(0.5, -0.5, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_cast_stays_within_pixel() {
        let config = CameraConfig {
            image_width: 10,
            focus_dist: 1.0,
            ..Default::default()
        };
        let camera = Camera::new(&config);
        let mut rng = SmallRng::seed_from_u64(11);

        let center = camera.pixel_center(4, 6);
        for _ in 0..200 {
            let ray = camera.cast(4, 6, &mut rng);
            assert_eq!(ray.origin, Point3::zeros());
            let target = ray.origin + ray.direction;
            assert!((target.z + 1.0).abs() < 1e-12);
            assert!((target.x - center.x).abs() <= 0.1 + 1e-12);
            assert!((target.y - center.y).abs() <= 0.1 + 1e-12);
        }
    }

    #[test]
    fn test_defocus_origin_on_disk() {
        let config = CameraConfig {
            defocus_angle: 10.0,
            focus_dist: 2.0,
            ..Default::default()
        };
        let camera = Camera::new(&config);
        let radius = 2.0 * 5f64.to_radians().tan();
        let mut rng = SmallRng::seed_from_u64(12);

        let mut moved = false;
        for _ in 0..200 {
            let ray = camera.cast(50, 50, &mut rng);
            assert!(ray.origin.z.abs() < 1e-12);
            assert!(ray.origin.norm() < radius);
            moved |= ray.origin != Point3::zeros();
        }
        assert!(moved);
    }
}
