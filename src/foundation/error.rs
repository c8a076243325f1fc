/// Convenience result type used across the crate.
pub type AudiogramResult<T> = Result<T, AudiogramError>;

/// Top-level error taxonomy for render jobs.
#[derive(thiserror::Error, Debug)]
pub enum AudiogramError {
    /// Malformed or unsupported scene description data.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A caller violated an input contract (e.g. too few curve anchors).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An image, font, video or other resource could not be read or decoded.
    #[error("resource load error: {0}")]
    ResourceLoad(String),

    /// An amplitude series was indexed past its end.
    #[error("index out of range: {what} index {index} (len {len})")]
    IndexOutOfRange {
        /// What was being indexed.
        what: &'static str,
        /// Requested index.
        index: usize,
        /// Available length.
        len: usize,
    },

    /// The encoding sink rejected a frame or failed to finalize.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AudiogramError {
    /// Build an [`AudiogramError::InvalidConfiguration`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build an [`AudiogramError::InvalidInput`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build an [`AudiogramError::ResourceLoad`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceLoad(msg.into())
    }

    /// Build an [`AudiogramError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build an [`AudiogramError::IndexOutOfRange`] value.
    pub fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { what, index, len }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
