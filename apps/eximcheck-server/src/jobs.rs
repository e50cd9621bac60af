//! In-process job registry
//!
//! The processing backend pushes status snapshots in; the lifecycle
//! tracker reads them out through the [`StatusProvider`] trait. Each job's
//! snapshot is the backend's current known state; terminal states are
//! final.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use doc_lifecycle::{ProviderError, StatusProvider};
use shared_types::{JobStatus, StatusSnapshot};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job not found: {0}")]
    NotFound(String),

    #[error("job already registered: {0}")]
    Duplicate(String),

    #[error("job {id} already reached terminal status {status}")]
    Terminal { id: String, status: JobStatus },
}

/// Registry of externally submitted jobs and their latest snapshot
#[derive(Default)]
pub struct JobStore {
    inner: RwLock<HashMap<String, StatusSnapshot>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly submitted job id; jobs start in `uploading`
    pub async fn register(&self, job_id: &str) -> Result<(), StoreError> {
        let mut jobs = self.inner.write().await;
        if jobs.contains_key(job_id) {
            return Err(StoreError::Duplicate(job_id.to_string()));
        }
        jobs.insert(
            job_id.to_string(),
            StatusSnapshot {
                status: JobStatus::Uploading,
                ..Default::default()
            },
        );
        Ok(())
    }

    /// Store the backend's latest snapshot for a job.
    ///
    /// Once a job is terminal no transition to a different status is
    /// accepted; re-pushing the same terminal status is idempotent.
    pub async fn update(&self, job_id: &str, snapshot: StatusSnapshot) -> Result<(), StoreError> {
        let mut jobs = self.inner.write().await;
        let current = jobs
            .get_mut(job_id)
            .ok_or_else(|| StoreError::NotFound(job_id.to_string()))?;

        if current.status.is_terminal() && snapshot.status != current.status {
            return Err(StoreError::Terminal {
                id: job_id.to_string(),
                status: current.status,
            });
        }

        *current = snapshot;
        Ok(())
    }

    pub async fn get(&self, job_id: &str) -> Option<StatusSnapshot> {
        self.inner.read().await.get(job_id).cloned()
    }
}

#[async_trait]
impl StatusProvider for JobStore {
    async fn status(&self, job_id: &str) -> Result<StatusSnapshot, ProviderError> {
        self.get(job_id)
            .await
            .ok_or_else(|| ProviderError::NotFound(job_id.to_string()))
    }
}
