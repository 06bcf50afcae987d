use thiserror::Error;

use super::RepositoryError;

/// Failures of the mapping service operations.
///
/// An absent shortcode is not an error: retrieve and update return `Ok(None)`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested shortcode is already taken.
    #[error("Shortcode '{0}' is already in use")]
    DuplicateShortcode(String),

    /// No free shortcode was found within the configured number of attempts.
    #[error("No free shortcode found after {0} attempts")]
    CodeSpaceExhausted(usize),

    /// Storage failure, passed through unchanged.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
