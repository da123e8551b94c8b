#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One or more business rules rejected the input. The message holds every
    /// violation, one per line.
    #[error("Validation failed: {0}")]
    Validation(String),
}
