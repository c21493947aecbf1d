use thiserror::Error;

/// Everything that can keep the uploader from attaching or from admitting a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("required element #{id} is missing")]
    MissingElement { id: String },

    #[error("element #{id} is not {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("invalid maximum image count: {0:?}")]
    InvalidMaxCount(String),

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("DOM call failed: {0}")]
    Dom(String),
}
