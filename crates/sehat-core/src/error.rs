use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid risk category: {0}")]
    InvalidRiskCategory(String),
}
