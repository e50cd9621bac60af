//! Status-oracle boundary
//!
//! The processing backend (OCR, model invocation, storage) lives outside
//! this core; the tracker only needs an idempotent read of a job's current
//! state.

use async_trait::async_trait;
use shared_types::StatusSnapshot;
use thiserror::Error;

/// Failure reading the status oracle
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("job not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Read access to the processing backend's view of a job.
///
/// `status` must be safe to call repeatedly: it reports the current known
/// state without side effects on the job and without blocking indefinitely.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    async fn status(&self, job_id: &str) -> Result<StatusSnapshot, ProviderError>;
}
