use thiserror::Error;

/// Failures raised by the stamp transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The input bytes are not a usable PDF.
    #[error("pdf_parse_failed:{0}")]
    Parse(String),
    /// The font could not be fetched, parsed or embedded.
    #[error("font_resource_failed:{0}")]
    Resource(String),
    /// The stamped document could not be serialised.
    #[error("pdf_write_failed:{0}")]
    Write(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("invalid_input:{declared}")]
    InvalidInput { declared: String },
    #[error("precondition_failed:{0}")]
    Precondition(&'static str),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("preview_unavailable:{0}")]
    Preview(String),
    #[error("host_input_failed:{0}")]
    Host(String),
}

impl SignerError {
    /// Stable machine code, also used as the i18n key suffix.
    pub fn code(&self) -> &'static str {
        match self {
            SignerError::InvalidInput { .. } => "invalid_input",
            SignerError::Precondition(_) => "precondition_failed",
            SignerError::Transform(TransformError::Parse(_)) => "pdf_parse_failed",
            SignerError::Transform(TransformError::Resource(_)) => "font_resource_failed",
            SignerError::Transform(TransformError::Write(_)) => "pdf_write_failed",
            SignerError::Preview(_) => "preview_unavailable",
            SignerError::Host(_) => "host_input_failed",
        }
    }
}

pub type Result<T, E = SignerError> = std::result::Result<T, E>;
