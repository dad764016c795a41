//! Random sampling helpers.
//!
//! Every helper takes the generator explicitly. Rendering never touches a
//! shared generator: each sample owns a `SmallRng` built by [`sample_rng`].

use nalgebra::Vector3;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Uniform double in `[0, 1)`.
pub fn random_double<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen()
}

/// Uniform double in `[min, max)`.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * random_double(rng)
}

pub fn random_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    Vector3::new(random_double(rng), random_double(rng), random_double(rng))
}

pub fn random_vector_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Vector3<f64> {
    Vector3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    loop {
        let p = random_vector_range(rng, -1.0, 1.0);
        if p.norm_squared() < 1.0 {
            return p;
        }
    }
}

pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    loop {
        let p = random_in_unit_sphere(rng);
        // normalizing anything this short underflows to inf/nan
        if p.norm_squared() > 1e-160 {
            return p.normalize();
        }
    }
}

/// Point in the unit disk on the z = 0 plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    loop {
        let p = Vector3::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0);
        if p.norm_squared() < 1.0 {
            return p;
        }
    }
}

/// Offset into the `[-0.5, 0.5)²` square around a pixel center.
pub fn sample_square<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (random_double(rng) - 0.5, random_double(rng) - 0.5)
}

/// Generator for one sample of one pixel within a render identified by `seed`.
pub fn sample_rng(seed: u64, pixel_index: usize, sample_index: usize) -> SmallRng {
    let key = mix(mix(seed ^ pixel_index as u64) ^ sample_index as u64);
    SmallRng::seed_from_u64(key)
}

// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
