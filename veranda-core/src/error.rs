use thiserror::Error;
use veranda_model::AttachmentDecodeError;

/// Crate-wide error taxonomy. The HTTP layer maps these onto statuses:
/// validation failures to 400, missing resources to 404, everything else
/// to 500 with the upstream message passed through verbatim.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    External(String),

    #[error("Unsupported media format")]
    UnsupportedMediaFormat,
}

impl From<AttachmentDecodeError> for CoreError {
    fn from(_: AttachmentDecodeError) -> Self {
        CoreError::UnsupportedMediaFormat
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
