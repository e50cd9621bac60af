//! API handlers for the eximcheck server
//!
//! Exposes the compliance pipeline's entry points:
//! - rule evaluation and annotation
//! - job registration, status updates and tracking
//! - invoice vs Bill of Entry reconciliation

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use boe_reconciler::reconcile;
use compliance_engine::{annotate, rules, Annotation};
use shared_types::{
    BoeComparison, ComplianceResult, DocumentJob, DocumentType, Entity, ExtractedDocument,
    StatusSnapshot, StructuredFields,
};

use crate::error::ServerError;
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "eximcheck-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Supported document types response
#[derive(Serialize)]
pub struct DocumentTypesResponse {
    pub success: bool,
    pub types: Vec<DocumentTypeInfo>,
    pub count: usize,
}

/// Document type metadata
#[derive(Serialize)]
pub struct DocumentTypeInfo {
    pub api_value: &'static str,
    pub name: &'static str,
    pub rules: Vec<&'static str>,
}

/// Handler: GET /api/document-types
pub async fn handle_list_document_types() -> Json<DocumentTypesResponse> {
    let types: Vec<DocumentTypeInfo> = [
        ("invoice", DocumentType::Invoice),
        ("bill_of_entry", DocumentType::BillOfEntry),
        ("packing_list", DocumentType::PackingList),
    ]
    .into_iter()
    .map(|(api_value, doc_type)| DocumentTypeInfo {
        api_value,
        name: doc_type.name(),
        rules: rules::base::RULES
            .iter()
            .chain(rules::type_rules(doc_type))
            .map(|r| r.name)
            .collect(),
    })
    .collect();

    let count = types.len();

    Json(DocumentTypesResponse {
        success: true,
        types,
        count,
    })
}

/// Compliance evaluation request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequest {
    /// Document type: "invoice", "bill_of_entry" or "packing_list";
    /// anything else gets the base rules only
    pub document_type: String,

    /// Extracted document text to evaluate
    pub text: String,

    /// Entities from the extraction step (used by annotation)
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// Handler: POST /api/compliance
pub async fn handle_evaluate_compliance(
    State(state): State<AppState>,
    Json(req): Json<ComplianceRequest>,
) -> Json<ComplianceResult> {
    let doc_type = DocumentType::parse_code(&req.document_type);
    info!(
        doc_type = %req.document_type,
        text_len = req.text.len(),
        entities = req.entities.len(),
        "compliance evaluation"
    );

    Json(state.engine.evaluate(doc_type, &req.text))
}

/// Annotation request; the compliance result is evaluated on the fly when
/// the caller does not supply one
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateRequest {
    pub document_type: String,
    pub text: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub result: Option<ComplianceResult>,
}

/// Handler: POST /api/annotate
pub async fn handle_annotate(
    State(state): State<AppState>,
    Json(req): Json<AnnotateRequest>,
) -> Json<Annotation> {
    let doc_type = DocumentType::parse_code(&req.document_type);
    let result = req
        .result
        .unwrap_or_else(|| state.engine.evaluate(doc_type, &req.text));
    debug!(
        failed = result.failed_checks().count(),
        entities = req.entities.len(),
        "annotating compliance result"
    );

    Json(annotate(&req.text, doc_type, &req.entities, &result))
}

/// Reconciliation request: two finalized structured extractions
#[derive(Deserialize)]
pub struct ReconcileRequest {
    pub invoice: StructuredFields,
    pub reference: StructuredFields,
}

/// Handler: POST /api/reconcile
pub async fn handle_reconcile(Json(req): Json<ReconcileRequest>) -> Json<BoeComparison> {
    Json(reconcile(&req.invoice, &req.reference))
}

/// Job registration request; an id is generated when none is supplied
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterJobRequest {
    #[serde(default)]
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterJobResponse {
    pub success: bool,
    pub job_id: String,
}

/// Handler: POST /api/jobs
pub async fn handle_register_job(
    State(state): State<AppState>,
    Json(req): Json<RegisterJobRequest>,
) -> Result<Json<RegisterJobResponse>, ServerError> {
    let job_id = req
        .job_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    state.jobs.register(&job_id).await?;
    info!(%job_id, "job registered for tracking");

    Ok(Json(RegisterJobResponse {
        success: true,
        job_id,
    }))
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub success: bool,
}

/// Handler: PUT /api/jobs/:id/status — the processing backend reports the
/// job's current state
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(snapshot): Json<StatusSnapshot>,
) -> Result<Json<UpdateStatusResponse>, ServerError> {
    debug!(%job_id, status = %snapshot.status, "status update");
    state.jobs.update(&job_id, snapshot).await?;
    Ok(Json(UpdateStatusResponse { success: true }))
}

/// Handler: GET /api/jobs/:id — current snapshot for progress display
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<StatusSnapshot>, ServerError> {
    state
        .jobs
        .get(&job_id)
        .await
        .map(Json)
        .ok_or(ServerError::JobNotFound(job_id))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub success: bool,
    pub job: DocumentJob,
    pub document: ExtractedDocument,
}

/// Handler: POST /api/jobs/:id/track — await the job's terminal outcome
pub async fn handle_track_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<TrackResponse>, ServerError> {
    info!(%job_id, "tracking job to terminal state");
    let completed = state.tracker().track(&job_id).await?;

    Ok(Json(TrackResponse {
        success: true,
        job: completed.job,
        document: completed.document,
    }))
}

/// Dual-document validation request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateBoeRequest {
    pub invoice_job_id: String,
    pub reference_job_id: String,
}

/// Handler: POST /api/validate-boe — track both documents concurrently,
/// then reconcile. A tracking failure surfaces as a failure response,
/// never as a synthesized comparison.
pub async fn handle_validate_boe(
    State(state): State<AppState>,
    Json(req): Json<ValidateBoeRequest>,
) -> Result<Json<BoeComparison>, ServerError> {
    info!(
        invoice = %req.invoice_job_id,
        reference = %req.reference_job_id,
        "dual-document validation"
    );

    let (invoice, reference) = state
        .tracker()
        .track_pair(&req.invoice_job_id, &req.reference_job_id)
        .await?;

    Ok(Json(reconcile(
        &invoice.document.fields,
        &reference.document.fields,
    )))
}
