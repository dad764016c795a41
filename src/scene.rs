use std::sync::Arc;

use nalgebra::Vector3;
use rand::Rng;

use crate::{
    camera::CameraConfig,
    hit::{Hit, Record},
    material::Material,
    sampling::{random_double, random_range, random_vector, random_vector_range},
    sphere::Sphere,
    Color, Interval, Point3, Ray,
};

/// Unordered collection of objects. Intersection is a linear scan.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Hit + Send + Sync>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Hit + Send + Sync + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hit for Scene {
    fn hit(&self, ray: Ray, interval: Interval) -> Option<Record<'_>> {
        let mut closest = None;
        let mut window = interval;
        for object in &self.objects {
            if let Some(record) = object.hit(ray, window) {
                window = window.with_max(record.t);
                closest = Some(record);
            }
        }
        closest
    }
}

/// Ground, a grid of small random spheres, and three large feature spheres.
pub fn cover_scene<R: Rng + ?Sized>(rng: &mut R) -> Scene {
    let mut scene = Scene::new();

    let ground = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    scene.add(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_double(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_double(rng),
                0.2,
                b as f64 + 0.9 * random_double(rng),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).norm() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_vector(rng).component_mul(&random_vector(rng));
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_vector_range(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };
            scene.add(Sphere::new(center, 0.2, material));
        }
    }

    scene.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass));
    scene.add(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    ));
    scene.add(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    scene
}

pub fn cover_camera() -> CameraConfig {
    CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 1280,
        samples_per_pixel: 500,
        max_depth: 50,
        vfov: 20.0,
        lookfrom: Point3::new(13.0, 2.0, 3.0),
        lookat: Point3::new(0.0, 0.0, 0.0),
        vup: Vector3::new(0.0, 1.0, 0.0),
        defocus_angle: 0.6,
        focus_dist: 10.0,
    }
}

/// Ground plus a diffuse, a glass (with a hollow bubble) and a metal sphere.
pub fn simple_scene() -> Scene {
    let mut scene = Scene::new();

    let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Material::dielectric(1.5));
    let bubble = Arc::new(Material::dielectric(1.0 / 1.5));
    let metal = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 1.0));

    scene.add(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground));
    scene.add(Sphere::new(Point3::new(0.0, 0.0, -1.2), 0.5, center));
    scene.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass));
    scene.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.4, bubble));
    scene.add(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, metal));

    scene
}

pub fn simple_camera() -> CameraConfig {
    CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        lookfrom: Point3::new(-2.0, 2.0, 1.0),
        lookat: Point3::new(0.0, 0.0, -1.0),
        vup: Vector3::new(0.0, 1.0, 0.0),
        defocus_angle: 10.0,
        focus_dist: 3.4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn grey() -> Arc<Material> {
        Arc::new(Material::lambertian(Color::repeat(0.5)))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Point3::zeros(), Vector3::new(0.0, 0.0, -1.0));

        assert!(scene.is_empty());
        assert!(scene.hit(ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_closest_hit_regardless_of_order() {
        let near_material = Arc::new(Material::metal(Color::repeat(0.9), 0.0));
        let mut scene = Scene::new();
        scene.add(Sphere::new(Point3::new(0.0, 0.0, -10.0), 1.0, grey()));
        scene.add(Sphere::new(Point3::new(0.0, 0.0, -3.0), 1.0, Arc::clone(&near_material)));
        scene.add(Sphere::new(Point3::new(0.0, 0.0, -6.0), 1.0, grey()));

        let ray = Ray::new(Point3::zeros(), Vector3::new(0.0, 0.0, -1.0));
        let record = scene.hit(ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert_eq!(scene.len(), 3);
        assert!((record.t - 2.0).abs() < 1e-9);
        assert_eq!(*record.material, *near_material);
    }

    #[test]
    fn test_respects_caller_upper_bound() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Point3::new(0.0, 0.0, -3.0), 1.0, grey()));

        let ray = Ray::new(Point3::zeros(), Vector3::new(0.0, 0.0, -1.0));
        assert!(scene.hit(ray, Interval::new(0.001, 1.5)).is_none());
    }

    #[test]
    fn test_cover_scene_layout() {
        let mut rng = SmallRng::seed_from_u64(42);
        let scene = cover_scene(&mut rng);

        // ground + at most 22 * 22 small spheres + 3 large
        assert!(scene.len() > 4);
        assert!(scene.len() <= 1 + 22 * 22 + 3);
        assert_eq!(cover_camera().validate(), Ok(()));
    }

    #[test]
    fn test_simple_scene() {
        let scene = simple_scene();
        assert_eq!(scene.len(), 5);
        assert_eq!(simple_camera().validate(), Ok(()));
    }
}
