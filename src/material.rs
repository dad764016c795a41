use nalgebra::Vector3;
use rand::Rng;

use crate::{
    hit::Record,
    sampling::{random_double, random_unit_vector},
    Color, Ray,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    Lambertian { albedo: Color },
    /// `fuzz` is kept within `[0, 1]`.
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { refraction_index: f64 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian { albedo }
    }

    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Self::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn dielectric(refraction_index: f64) -> Self {
        Self::Dielectric { refraction_index }
    }

    /// Attenuation and outgoing ray, or `None` when the ray is absorbed.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        ray: Ray,
        record: &Record<'_>,
        rng: &mut R,
    ) -> Option<(Color, Ray)> {
        match *self {
            Self::Lambertian { albedo } => {
                let direction = diffuse_direction(&record.normal, random_unit_vector(rng));
                Some((albedo, Ray::new(record.point, direction)))
            }
            Self::Metal { albedo, fuzz } => {
                let direction = reflect(&ray.direction, &record.normal).normalize()
                    + fuzz * random_unit_vector(rng);
                if direction.dot(&record.normal) > 0.0 {
                    Some((albedo, Ray::new(record.point, direction)))
                } else {
                    None
                }
            }
            Self::Dielectric { refraction_index } => {
                let ri = if record.front {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let unit_direction = ray.direction.normalize();
                let cos_theta = (-unit_direction).dot(&record.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = ri * sin_theta > 1.0;
                let direction =
                    if cannot_refract || reflectance(cos_theta, ri) > random_double(rng) {
                        reflect(&unit_direction, &record.normal)
                    } else {
                        refract(&unit_direction, &record.normal, ri)
                    };

                Some((Color::repeat(1.0), Ray::new(record.point, direction)))
            }
        }
    }
}

/// `normal + offset`, or the normal itself when the sum degenerates to zero.
fn diffuse_direction(normal: &Vector3<f64>, offset: Vector3<f64>) -> Vector3<f64> {
    let direction = normal + offset;
    if near_zero(&direction) {
        *normal
    } else {
        direction
    }
}

/// Schlick's approximation.
fn reflectance(cosine: f64, ri: f64) -> f64 {
    let r0 = ((1.0 - ri) / (1.0 + ri)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

pub fn reflect(v: &Vector3<f64>, n: &Vector3<f64>) -> Vector3<f64> {
    v - 2.0 * v.dot(n) * n
}

/// `uv` must be unit length; `etai_over_etat` is the ratio of indices.
pub fn refract(uv: &Vector3<f64>, n: &Vector3<f64>, etai_over_etat: f64) -> Vector3<f64> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.norm_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

pub fn near_zero(v: &Vector3<f64>) -> bool {
    const S: f64 = 1e-8;
    v.iter().all(|c| c.abs() < S)
}
