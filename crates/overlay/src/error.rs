use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("invalid document base {url:?}: {reason}")]
    DocumentBase { url: String, reason: String },

    #[error("cannot resolve overlay target {url:?}: {reason}")]
    Target { url: String, reason: String },
}
