use crate::backend::WindowId;

/// An error type for the display module.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// The window is not open in this context.
    #[error("Window {0} is not open")]
    WindowNotFound(WindowId),

    /// The backend refused an operation.
    #[error("Display backend error: {0}")]
    Backend(String),

    /// Error while encoding a frame.
    #[error(transparent)]
    Io(#[from] lumen_io::IoError),

    /// Error while resampling a frame.
    #[error(transparent)]
    Image(#[from] lumen_image::ImageError),
}
