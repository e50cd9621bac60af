//! Polling tracker: submitted -> processing -> terminal, bounded and cancellable
//!
//! The tracking future owns no spawned task or timer; dropping it stops
//! polling promptly. Exactly one terminal outcome reaches the caller:
//! completion, backend failure, transport failure, or timeout.

use std::sync::Arc;
use std::time::Duration;

use shared_types::{DocumentJob, ExtractedDocument, JobStatus};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::provider::{ProviderError, StatusProvider};

/// Polling cadence and wall-clock bounds. The reference behavior is 2 s
/// polls, 120 s for a single document and 300 s for a dual-document
/// validation; kept configurable rather than re-derived.
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub pair_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(120),
            pair_timeout: Duration::from_secs(300),
        }
    }
}

/// Terminal failure of a tracking session.
///
/// A timeout is distinguishable from a backend-reported error, but both
/// surface through this one channel as "processing failed".
#[derive(Debug, Error)]
pub enum TrackError {
    /// The wall-clock bound elapsed with the backend still working
    #[error("no terminal status within {0:?}")]
    Timeout(Duration),

    /// The backend reported a terminal `error` status
    #[error("processing failed: {0}")]
    Failed(String),

    /// The status oracle itself failed; fatal for this session
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A job that reached `completed`, with its extraction payload.
///
/// Holding one of these is the precondition for reconciliation: it only
/// exists for terminal-success jobs.
#[derive(Debug, Clone)]
pub struct CompletedDocument {
    pub job: DocumentJob,
    pub document: ExtractedDocument,
}

/// Tracks documents against one status provider
pub struct Tracker<P> {
    provider: Arc<P>,
    config: TrackerConfig,
}

impl<P: StatusProvider> Tracker<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_config(provider, TrackerConfig::default())
    }

    pub fn with_config(provider: Arc<P>, config: TrackerConfig) -> Self {
        Self { provider, config }
    }

    /// Poll until the job reaches a terminal outcome, bounded by the
    /// single-document timeout
    pub async fn track(&self, job_id: &str) -> Result<CompletedDocument, TrackError> {
        self.track_bounded(job_id, self.config.timeout, None).await
    }

    /// Like [`track`](Self::track), additionally emitting each observed
    /// status on `progress` before the terminal result
    pub async fn track_with_progress(
        &self,
        job_id: &str,
        progress: mpsc::Sender<JobStatus>,
    ) -> Result<CompletedDocument, TrackError> {
        self.track_bounded(job_id, self.config.timeout, Some(progress))
            .await
    }

    /// Track two documents concurrently under the wider dual-document
    /// bound. Fail-fast: if either tracker terminates in error or timeout
    /// the joint operation returns immediately and the other tracker is
    /// cancelled.
    pub async fn track_pair(
        &self,
        invoice_id: &str,
        reference_id: &str,
    ) -> Result<(CompletedDocument, CompletedDocument), TrackError> {
        tokio::try_join!(
            self.track_bounded(invoice_id, self.config.pair_timeout, None),
            self.track_bounded(reference_id, self.config.pair_timeout, None),
        )
    }

    async fn track_bounded(
        &self,
        job_id: &str,
        bound: Duration,
        progress: Option<mpsc::Sender<JobStatus>>,
    ) -> Result<CompletedDocument, TrackError> {
        match tokio::time::timeout(bound, self.poll_until_terminal(job_id, progress)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(job_id, ?bound, "tracking timed out");
                Err(TrackError::Timeout(bound))
            }
        }
    }

    async fn poll_until_terminal(
        &self,
        job_id: &str,
        progress: Option<mpsc::Sender<JobStatus>>,
    ) -> Result<CompletedDocument, TrackError> {
        let mut job = DocumentJob::new(job_id);
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let snapshot = self.provider.status(job_id).await?;
            job.record_poll();
            job.observe(snapshot.status);
            debug!(job_id, status = %snapshot.status, attempts = job.attempts, "poll");

            if let Some(tx) = &progress {
                // Progress is best-effort; a full or closed channel never
                // stalls the tracker
                let _ = tx.try_send(snapshot.status);
            }

            match snapshot.status {
                JobStatus::Completed => {
                    return Ok(CompletedDocument {
                        job,
                        document: ExtractedDocument {
                            text: snapshot.extracted_text.unwrap_or_default(),
                            entities: snapshot.entities,
                            fields: snapshot.structured_fields.unwrap_or_default(),
                        },
                    });
                }
                JobStatus::Error => {
                    return Err(TrackError::Failed(snapshot.error.unwrap_or_else(|| {
                        "backend reported a processing error".to_string()
                    })));
                }
                JobStatus::Uploading | JobStatus::Processing => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use shared_types::{StatusSnapshot, StructuredFields};
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn snapshot(status: JobStatus) -> StatusSnapshot {
        StatusSnapshot {
            status,
            ..Default::default()
        }
    }

    fn completed_snapshot(text: &str) -> StatusSnapshot {
        StatusSnapshot {
            status: JobStatus::Completed,
            extracted_text: Some(text.to_string()),
            structured_fields: Some(StructuredFields {
                invoice_number: Some("INV-001".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Replays a fixed script of oracle replies; panics if polled after
    /// the script is exhausted (i.e. after a terminal status)
    struct ScriptedProvider {
        script: Mutex<VecDeque<Result<StatusSnapshot, ProviderError>>>,
        polls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Result<StatusSnapshot, ProviderError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                polls: AtomicUsize::new(0),
            }
        }

        fn poll_count(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusProvider for ScriptedProvider {
        async fn status(&self, _job_id: &str) -> Result<StatusSnapshot, ProviderError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("polled after terminal status")
        }
    }

    /// Never reaches a terminal state
    struct AlwaysProcessing;

    #[async_trait]
    impl StatusProvider for AlwaysProcessing {
        async fn status(&self, _job_id: &str) -> Result<StatusSnapshot, ProviderError> {
            Ok(snapshot(JobStatus::Processing))
        }
    }

    /// Independent scripts per job id, for dual tracking
    struct MapProvider {
        scripts: Mutex<HashMap<String, VecDeque<Result<StatusSnapshot, ProviderError>>>>,
    }

    impl MapProvider {
        fn new(scripts: Vec<(&str, Vec<Result<StatusSnapshot, ProviderError>>)>) -> Self {
            Self {
                scripts: Mutex::new(
                    scripts
                        .into_iter()
                        .map(|(id, s)| (id.to_string(), s.into()))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl StatusProvider for MapProvider {
        async fn status(&self, job_id: &str) -> Result<StatusSnapshot, ProviderError> {
            let mut scripts = self.scripts.lock().unwrap();
            let script = scripts
                .get_mut(job_id)
                .unwrap_or_else(|| panic!("unknown job {}", job_id));
            // Hold the last reply for jobs that stay in-flight
            if script.len() == 1 {
                return script.front().cloned().unwrap();
            }
            script.pop_front().expect("script exhausted")
        }
    }

    fn fast_config() -> TrackerConfig {
        TrackerConfig {
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(20),
            pair_timeout: Duration::from_secs(40),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracks_to_completion() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(snapshot(JobStatus::Uploading)),
            Ok(snapshot(JobStatus::Processing)),
            Ok(snapshot(JobStatus::Processing)),
            Ok(completed_snapshot("invoice text")),
        ]));
        let tracker = Tracker::with_config(provider.clone(), fast_config());

        let completed = tracker.track("job-1").await.expect("should complete");

        assert_eq!(completed.job.status, JobStatus::Completed);
        assert_eq!(completed.job.attempts, 4);
        assert!(completed.job.terminal_at.is_some());
        assert_eq!(completed.document.text, "invoice text");
        assert_eq!(
            completed.document.fields.invoice_number.as_deref(),
            Some("INV-001")
        );
        // No poll happens after the terminal status was observed
        assert_eq!(provider.poll_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_error_terminates_tracking() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(snapshot(JobStatus::Processing)),
            Ok(StatusSnapshot {
                status: JobStatus::Error,
                error: Some("extraction model failed".to_string()),
                ..Default::default()
            }),
        ]));
        let tracker = Tracker::with_config(provider, fast_config());

        let err = tracker.track("job-2").await.unwrap_err();
        match err {
            TrackError::Failed(message) => assert!(message.contains("extraction model failed")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_is_fatal() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(snapshot(JobStatus::Processing)),
            Err(ProviderError::Transport("connection reset".to_string())),
        ]));
        let tracker = Tracker::with_config(provider.clone(), fast_config());

        let err = tracker.track("job-3").await.unwrap_err();
        assert!(matches!(err, TrackError::Provider(_)));
        // Not retried after the transport failure
        assert_eq!(provider.poll_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_without_terminal_status() {
        let tracker = Tracker::with_config(Arc::new(AlwaysProcessing), fast_config());

        let started = tokio::time::Instant::now();
        let err = tracker.track("job-4").await.unwrap_err();

        assert!(matches!(err, TrackError::Timeout(_)));
        assert_eq!(started.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_snapshots_precede_terminal_result() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(snapshot(JobStatus::Uploading)),
            Ok(snapshot(JobStatus::Processing)),
            Ok(completed_snapshot("text")),
        ]));
        let tracker = Tracker::with_config(provider, fast_config());
        let (tx, mut rx) = mpsc::channel(8);

        tracker
            .track_with_progress("job-5", tx)
            .await
            .expect("should complete");

        let mut observed = Vec::new();
        while let Some(status) = rx.recv().await {
            observed.push(status);
        }
        assert_eq!(
            observed,
            vec![
                JobStatus::Uploading,
                JobStatus::Processing,
                JobStatus::Completed
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_track_pair_completes_both() {
        let provider = Arc::new(MapProvider::new(vec![
            (
                "invoice",
                vec![
                    Ok(snapshot(JobStatus::Processing)),
                    Ok(completed_snapshot("invoice")),
                    Ok(completed_snapshot("invoice")),
                ],
            ),
            (
                "reference",
                vec![
                    Ok(snapshot(JobStatus::Processing)),
                    Ok(snapshot(JobStatus::Processing)),
                    Ok(completed_snapshot("reference")),
                    Ok(completed_snapshot("reference")),
                ],
            ),
        ]));
        let tracker = Tracker::with_config(provider, fast_config());

        let (invoice, reference) = tracker
            .track_pair("invoice", "reference")
            .await
            .expect("both should complete");
        assert_eq!(invoice.document.text, "invoice");
        assert_eq!(reference.document.text, "reference");
    }

    #[tokio::test(start_paused = true)]
    async fn test_track_pair_fails_fast_on_first_failure() {
        let provider = Arc::new(MapProvider::new(vec![
            (
                "invoice",
                vec![
                    Ok(snapshot(JobStatus::Processing)),
                    Ok(StatusSnapshot {
                        status: JobStatus::Error,
                        error: Some("bad scan".to_string()),
                        ..Default::default()
                    }),
                    Ok(StatusSnapshot {
                        status: JobStatus::Error,
                        ..Default::default()
                    }),
                ],
            ),
            // The reference document never finishes; the pair must not
            // wait for it
            ("reference", vec![Ok(snapshot(JobStatus::Processing))]),
        ]));
        let tracker = Tracker::with_config(provider, fast_config());

        let started = tokio::time::Instant::now();
        let err = tracker.track_pair("invoice", "reference").await.unwrap_err();

        assert!(matches!(err, TrackError::Failed(_)));
        // Resolved at the invoice's failure, far below the pair bound
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
