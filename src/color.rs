use nalgebra::Vector3;

use crate::Interval;

/// Linear RGB, nominally within `[0, 1]` per channel.
pub type Color = Vector3<f64>;

const INTENSITY: Interval = Interval {
    min: 0.0,
    max: 0.999,
};

/// Gamma 2 transfer curve. Non-positive input maps to 0.
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

pub fn to_rgb8(color: &Color) -> [u8; 3] {
    let quantize = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Writes one gamma corrected pixel at byte offset `index`.
pub fn write_color(pixels: &mut [u8], index: usize, color: &Color) {
    pixels[index..index + 3].copy_from_slice(&to_rgb8(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-4.0), 0.0);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_gamma_monotonic() {
        let mut previous = linear_to_gamma(-1.0);
        for i in 0..=2000 {
            let current = linear_to_gamma(i as f64 / 1000.0 - 0.5);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_to_rgb8_clamps() {
        assert_eq!(to_rgb8(&Color::zeros()), [0, 0, 0]);
        assert_eq!(to_rgb8(&Color::repeat(1.0)), [255, 255, 255]);
        assert_eq!(to_rgb8(&Color::new(-1.0, 7.0, f64::NAN)), [0, 255, 0]);
        assert_eq!(to_rgb8(&Color::new(0.25, 0.25, 0.25)), [128, 128, 128]);
    }

    #[test]
    fn test_write_color_offset() {
        let mut pixels = [0u8; 9];
        write_color(&mut pixels, 3, &Color::new(1.0, 0.0, 0.25));

        assert_eq!(pixels, [0, 0, 0, 255, 0, 128, 0, 0, 0]);
    }
}
