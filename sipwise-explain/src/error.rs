//! Errors raised while assembling an explanation.

use sipwise_core::StoreError;
use thiserror::Error;

/// Failure to gather the signals an explanation is built from.
///
/// Callers of [`crate::ExplanationGenerator::explain`] never see this
/// error; it is logged and replaced by the fallback explanation.
#[derive(Debug, Error)]
pub enum ExplanationError {
    /// A collaborator read failed.
    #[error("explanation signals unavailable: {0}")]
    Store(#[from] StoreError),
}
