use crate::{material::Material, Interval, Point3, Ray};
use nalgebra::Vector3;

pub trait Hit {
    /// Nearest intersection with a ray parameter inside `interval`, if any.
    fn hit(&self, ray: Ray, interval: Interval) -> Option<Record<'_>>;
}

#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    pub point: Point3,
    /// Unit length, always facing against the incoming ray.
    pub normal: Vector3<f64>,
    pub t: f64,
    pub front: bool,
    pub material: &'a Material,
}

impl<'a> Record<'a> {
    /// `outward_normal` must already be unit length.
    pub fn new(
        ray: Ray,
        t: f64,
        outward_normal: Vector3<f64>,
        material: &'a Material,
    ) -> Self {
        let front = ray.direction.dot(&outward_normal) < 0.0;
        Self {
            point: ray.at(t),
            normal: if front {
                outward_normal
            } else {
                -outward_normal
            },
            t,
            front,
            material,
        }
    }
}
