use std::sync::Arc;

use crate::{
    hit::{Hit, Record},
    material::Material,
    Interval, Point3, Ray,
};

#[derive(Clone, Debug)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hit for Sphere {
    fn hit(&self, ray: Ray, interval: Interval) -> Option<Record<'_>> {
        let oc = self.center - ray.origin;
        let a = ray.direction.norm_squared();
        let h = ray.direction.dot(&oc);
        let c = oc.norm_squared() - self.radius * self.radius;
        let d = (h * h) - (a * c);

        if d < 0.0 {
            return None;
        }

        let sqrtd = d.sqrt();
        let mut root = (h - sqrtd) / a;

        if !interval.contains(root) {
            root = (h + sqrtd) / a;
            if !interval.contains(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(Record::new(ray, root, outward_normal, &self.material))
    }
}
