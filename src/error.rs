use thiserror::Error;

/// Camera settings the renderer cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image width must be at least 1 pixel")]
    ZeroWidth,

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("aspect ratio must be positive and finite, got {0}")]
    AspectRatio(f64),

    #[error("{width}x{height} image does not fit in memory")]
    TooLarge { width: usize, height: usize },

    #[error("vertical field of view must be within (0, 180) degrees, got {0}")]
    FieldOfView(f64),

    #[error("focus distance must be positive, got {0}")]
    FocusDistance(f64),

    #[error("look-from and look-at are the same point")]
    DegenerateView,

    #[error("up vector is parallel to the view direction")]
    DegenerateUp,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("invalid camera: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
