use thiserror::Error;

/// The main error type for the duotoner crate
#[derive(Debug, Error)]
pub enum DuotoneError {
    /// Zero-area image or a pixel buffer whose length does not match its shape
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Render parameter outside its valid domain, rejected before any pixel is touched
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A config key holds a value of the wrong type or an unknown variant
    #[error("config error: {0}")]
    Config(String),

    /// Config file is not valid JSON
    #[error("config parse error: {0}")]
    ConfigParse(#[from] json::Error),

    /// Error occurred while decoding, encoding or resampling an image
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DuotoneError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        DuotoneError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

// Convenience type alias for Results using DuotoneError
pub type Result<T = ()> = std::result::Result<T, DuotoneError>;
