// One error type for the whole booth.
// Every variant states *where* things went wrong.
use thiserror::Error;

/// Convenience result type used across the engine and host.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Source and target buffers disagree on size (stale buffer after a resolution change).
    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// A buffer's byte length does not match `width * height * 4`.
    #[error("buffer length {len} does not fit {width}x{height} RGBA8")]
    BufferLength { width: u32, height: u32, len: usize },

    #[error("unknown effect: {0:?}")]
    UnknownEffect(String),

    #[error("unknown mood: {0:?}")]
    UnknownMood(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed

    #[error("camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed

    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn dimension_mismatch(expected: (u32, u32), found: (u32, u32)) -> Self {
        Error::DimensionMismatch { expected, found }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_display() {
        let err = Error::dimension_mismatch((640, 480), (1280, 720));
        assert_eq!(
            err.to_string(),
            "dimension mismatch: expected (640, 480), found (1280, 720)"
        );
    }

    #[test]
    fn io_converts_through_question_mark() {
        fn fails() -> Result<()> {
            Err(std::io::Error::other("boom"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}
