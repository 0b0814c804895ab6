use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("unsupported image media type: {0}")]
    UnsupportedImage(String),

    #[error("model configuration error: {0}")]
    Config(String),
}
