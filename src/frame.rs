use std::path::Path;

use crate::{camera::CameraConfig, error::FrameError};

/// Row-major, top-to-bottom RGB8 pixels, sized once for a fixed resolution.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixel_data: Box<[u8]>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixel_data: vec![0; width * height * 3].into_boxed_slice(),
        }
    }

    pub fn for_camera(config: &CameraConfig) -> Self {
        Self::new(config.image_width, config.image_height())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.width * 3
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn pixel_data_mut(&mut self) -> &mut [u8] {
        &mut self.pixel_data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let start = (x + y * self.width) * 3;
        [
            self.pixel_data[start],
            self.pixel_data[start + 1],
            self.pixel_data[start + 2],
        ]
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), FrameError> {
        image::save_buffer_with_format(
            path,
            &self.pixel_data,
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let mut frame = FrameBuffer::new(3, 2);
        assert_eq!(frame.pixel_data().len(), 18);
        assert_eq!(frame.pitch(), 9);

        // (x = 1, y = 1) is the fifth pixel
        frame.pixel_data_mut()[12..15].copy_from_slice(&[10, 20, 30]);
        assert_eq!(frame.pixel(1, 1), [10, 20, 30]);
        assert_eq!(frame.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_for_camera_matches_render_size() {
        let config = CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 64,
            ..Default::default()
        };
        let frame = FrameBuffer::for_camera(&config);

        assert_eq!(frame.height(), 36);
        assert_eq!(frame.pixel_data().len(), config.buffer_len());
    }

    #[test]
    fn test_save_png() {
        let mut frame = FrameBuffer::new(4, 4);
        frame.pixel_data_mut().fill(200);
        let path = std::env::temp_dir().join(format!("spheretracer-{}.png", std::process::id()));

        frame.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(decoded.dimensions(), (4, 4));
        assert!(decoded.pixels().all(|p| p.0 == [200, 200, 200]));
    }
}
