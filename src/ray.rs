use nalgebra::Vector3;

pub type Point3 = Vector3<f64>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}
