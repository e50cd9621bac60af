//! Shared application state

use std::sync::Arc;

use compliance_engine::{ComplianceEngine, EngineConfig};
use doc_lifecycle::{Tracker, TrackerConfig};

use crate::jobs::JobStore;

#[derive(Clone)]
pub struct AppState {
    pub engine: ComplianceEngine,
    pub jobs: Arc<JobStore>,
    pub tracker_config: TrackerConfig,
}

impl AppState {
    pub fn new(engine_config: EngineConfig, tracker_config: TrackerConfig) -> Self {
        Self {
            engine: ComplianceEngine::with_config(engine_config),
            jobs: Arc::new(JobStore::new()),
            tracker_config,
        }
    }

    /// A tracker polling this process's own job registry
    pub fn tracker(&self) -> Tracker<JobStore> {
        Tracker::with_config(self.jobs.clone(), self.tracker_config)
    }
}
