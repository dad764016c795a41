//! Multi-sample path tracing into an RGB8 buffer.
//!
//! Rows are rendered in parallel and so are the samples of each pixel.
//! Every sample draws from its own generator derived from the render seed,
//! the pixel index and the sample index. Sample colors are collected into a
//! per-row buffer and summed in sample order, so no mutable state is shared
//! between tasks and the image does not depend on the thread count.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Instant,
};

use log::{debug, info};
use rand::{rngs::OsRng, Rng, RngCore};
use rayon::prelude::*;

use crate::{
    camera::{Camera, CameraConfig},
    color::write_color,
    error::RenderError,
    hit::Hit,
    sampling::sample_rng,
    Color, Interval, Ray,
};

/// Lower bound on hit distance, keeps scattered rays off their own surface.
const T_MIN: f64 = 0.001;

/// Renders with a fresh seed from the operating system.
pub fn render<H>(config: &CameraConfig, world: &H, pixels: &mut [u8]) -> Result<(), RenderError>
where
    H: Hit + Sync + ?Sized,
{
    render_seeded(config, world, pixels, OsRng.next_u64())
}

/// Renders `world` into `pixels`, which must hold exactly
/// `config.buffer_len()` bytes. The same seed, configuration and scene give
/// the same image.
pub fn render_seeded<H>(
    config: &CameraConfig,
    world: &H,
    pixels: &mut [u8],
    seed: u64,
) -> Result<(), RenderError>
where
    H: Hit + Sync + ?Sized,
{
    config.validate()?;
    let expected = config.buffer_len();
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    let camera = Camera::new(config);
    let width = camera.image_width();
    let height = camera.image_height();
    info!(
        "rendering {}x{} at {} samples per pixel, max depth {}",
        width, height, config.samples_per_pixel, config.max_depth
    );

    let start = Instant::now();
    let remaining = AtomicUsize::new(height);
    pixels
        .par_chunks_mut(width * 3)
        .enumerate()
        .for_each(|(y, row)| {
            let mut samples = Vec::with_capacity(config.samples_per_pixel);
            for x in 0..width {
                let color = render_pixel(
                    &camera,
                    world,
                    (x, y),
                    config.samples_per_pixel,
                    config.max_depth,
                    seed,
                    &mut samples,
                );
                write_color(row, x * 3, &color);
            }
            let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
            debug!("{} scanlines remaining", left);
        });

    info!("done in {:.2?}", start.elapsed());
    Ok(())
}

/// Mean linear color of `samples` jittered rays through pixel `(x, y)`.
///
/// `scratch` is overwritten with the individual sample colors; pass the same
/// vector for every pixel of a row to avoid reallocating it.
pub fn render_pixel<H>(
    camera: &Camera,
    world: &H,
    (x, y): (usize, usize),
    samples: usize,
    max_depth: usize,
    seed: u64,
    scratch: &mut Vec<Color>,
) -> Color
where
    H: Hit + Sync + ?Sized,
{
    let pixel_index = y * camera.image_width() + x;
    (0..samples)
        .into_par_iter()
        .map(|sample| {
            let mut rng = sample_rng(seed, pixel_index, sample);
            let ray = camera.cast(x, y, &mut rng);
            ray_color(ray, max_depth, world, &mut rng)
        })
        .collect_into_vec(scratch);
    // summed in sample order so the result does not depend on work stealing
    let sum = scratch.iter().fold(Color::zeros(), |acc, e| acc + e);
    sum / samples as f64
}

/// Light arriving along `ray` after at most `depth` bounces.
///
/// Each bounce consumes one unit of depth before scattering, so a path that
/// is still bouncing when the budget runs out contributes black. With
/// `depth == 1` a ray hitting any surface is black.
pub fn ray_color<H, R>(ray: Ray, depth: usize, world: &H, rng: &mut R) -> Color
where
    H: Hit + ?Sized,
    R: Rng + ?Sized,
{
    let mut throughput = Color::repeat(1.0);
    let mut ray = ray;

    for _ in 0..depth {
        let Some(record) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
            return throughput.component_mul(&sky(&ray));
        };
        match record.material.scatter(ray, &record, rng) {
            Some((attenuation, scattered)) => {
                throughput.component_mul_assign(&attenuation);
                ray = scattered;
            }
            None => return Color::zeros(),
        }
    }

    Color::zeros()
}

/// White to sky blue, blended on the ray's vertical direction.
pub fn sky(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}
