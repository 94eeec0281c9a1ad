//! Axum route handlers for full resume analysis.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::recommend::RoleRecommender;
use crate::analysis::{full_analysis, ResumeAnalysis};
use crate::classifier::DomainClassifier;
use crate::errors::{require_resume_text, AppError};
use crate::extraction::{parse_resume, ExtractionError};
use crate::state::AppState;

const UNNAMED_UPLOAD: &str = "upload";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub analysis: ResumeAnalysis,
}

#[derive(Debug, Serialize)]
pub struct ParsingInfo {
    pub word_count: usize,
    pub skills_extracted: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub filename: String,
    pub parsing_info: ParsingInfo,
    pub analysis: ResumeAnalysis,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItem {
    Success {
        filename: String,
        analysis: Box<ResumeAnalysis>,
    },
    Error {
        filename: String,
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}

/// One file pulled out of a multipart body.
struct UploadedFile {
    filename: String,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze/resume
///
/// Domain prediction, within-domain role recommendations and skills for raw text.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    require_resume_text("text", &request.text)?;
    let classifier = state.trained_classifier().await?;

    Ok(Json(AnalyzeResponse {
        status: "success",
        analysis: full_analysis(&classifier, &state.recommender, &request.text),
    }))
}

/// POST /api/v1/analyze/upload
///
/// Multipart field `file`: a PDF, DOCX or text resume.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let classifier = state.trained_classifier().await?;
    let file = next_file(&mut multipart, "file")
        .await?
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let recommender = state.recommender.clone();
    let filename = file.filename.clone();
    let (parsed, analysis) = tokio::task::spawn_blocking(move || {
        let parsed = parse_resume(&file.data, &file.filename)?;
        let analysis = full_analysis(&classifier, &recommender, &parsed.text);
        Ok::<_, ExtractionError>((parsed, analysis))
    })
    .await??;

    info!(
        filename = %filename,
        words = parsed.word_count,
        domain = %analysis.domain_prediction.primary_domain,
        "Analyzed uploaded resume"
    );

    Ok(Json(UploadResponse {
        status: "success",
        filename,
        parsing_info: ParsingInfo {
            word_count: parsed.word_count,
            skills_extracted: parsed.skills,
        },
        analysis,
    }))
}

/// POST /api/v1/analyze/batch
///
/// Multipart field `files`, repeated. A file that fails to parse is reported in its own
/// result entry and never fails the batch.
pub async fn handle_analyze_batch(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let classifier = state.trained_classifier().await?;
    let files = read_files(multipart, "files").await?;
    if files.is_empty() {
        return Err(AppError::Validation(
            "multipart field 'files' is required".to_string(),
        ));
    }

    let recommender = state.recommender.clone();
    let results =
        tokio::task::spawn_blocking(move || analyze_batch(&classifier, &recommender, files))
            .await?;

    let successful = results
        .iter()
        .filter(|r| matches!(r, BatchItem::Success { .. }))
        .count();
    let response = BatchResponse {
        total_processed: results.len(),
        successful,
        failed: results.len() - successful,
        results,
    };
    info!(
        total = response.total_processed,
        failed = response.failed,
        "Analyzed resume batch"
    );
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn analyze_batch(
    classifier: &Arc<DomainClassifier>,
    recommender: &RoleRecommender,
    files: Vec<UploadedFile>,
) -> Vec<BatchItem> {
    files
        .into_iter()
        .map(|file| match parse_resume(&file.data, &file.filename) {
            Ok(parsed) => BatchItem::Success {
                analysis: Box::new(full_analysis(classifier, recommender, &parsed.text)),
                filename: file.filename,
            },
            Err(e) => {
                warn!(filename = %file.filename, error = %e, "Skipping unreadable resume");
                BatchItem::Error {
                    filename: file.filename,
                    error: e.to_string(),
                }
            }
        })
        .collect()
}

/// Collects every multipart field called `field_name`; other fields are ignored.
async fn read_files(mut multipart: Multipart, field_name: &str) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();
    while let Some(file) = next_file(&mut multipart, field_name).await? {
        files.push(file);
    }
    Ok(files)
}

/// Reads up to and including the next field called `field_name`. The rest of the
/// stream is left untouched.
async fn next_file(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| UNNAMED_UPLOAD.to_string());
        let data = field.bytes().await?;
        return Ok(Some(UploadedFile { filename, data }));
    }
    Ok(None)
}
