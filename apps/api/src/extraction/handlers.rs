use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, ExtractionError};
use crate::extraction::confidence::ConfidenceReport;
use crate::extraction::pipeline::{process, ProcessingResult};
use crate::extraction::segmenter::SectionMap;
use crate::extraction::validation::ValidationReport;
use crate::models::profile::AppProfile;
use crate::state::AppState;

const PDF_FIELD: &str = "pdf";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub file_name: Option<String>,
    pub text_length: usize,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub profile: AppProfile,
    pub confidence: ConfidenceReport,
    pub validation: ValidationReport,
    pub sections: SectionMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<UploadMetadata>,
}

impl From<ProcessingResult> for ExtractResponse {
    fn from(result: ProcessingResult) -> Self {
        Self {
            profile: result.profile,
            confidence: result.confidence,
            validation: result.validation,
            sections: result.sections,
            metadata: None,
        }
    }
}

/// POST /api/v1/extract
/// A body whose `text` is missing or not a string is invalid input, not a
/// framework rejection.
pub async fn handle_extract(
    State(state): State<AppState>,
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let Json(req) = payload.map_err(|e| ExtractionError::InvalidInput(e.body_text()))?;
    let result = run_pipeline(&state, req.text).await?;
    Ok(Json(result.into()))
}

/// POST /api/v1/extract/pdf
/// Multipart upload with the document in the `pdf` field.
pub async fn handle_extract_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let (file_name, bytes) = read_pdf_field(&mut multipart, state.config.max_upload_bytes()).await?;
    info!(bytes = bytes.len(), "Received PDF upload");

    let text = state
        .text_extractor
        .extract_text(bytes)
        .await
        .map_err(|e| AppError::TextExtraction(format!("{e:#}")))?;
    if text.trim().is_empty() {
        return Err(AppError::TextExtraction(
            "No text could be extracted from the PDF".to_string(),
        ));
    }

    let text_length = text.chars().count();
    let result = run_pipeline(&state, text).await?;

    let mut response = ExtractResponse::from(result);
    response.metadata = Some(UploadMetadata {
        file_name,
        text_length,
    });
    Ok(Json(response))
}

/// POST /api/v1/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(profile): Json<AppProfile>,
) -> Json<ValidationReport> {
    Json(state.validator.validate(&profile))
}

/// Runs the synchronous pipeline on the blocking pool.
async fn run_pipeline(state: &AppState, text: String) -> Result<ProcessingResult, AppError> {
    let validator = state.validator.clone();
    let result = tokio::task::spawn_blocking(move || process(&text, validator.as_ref()))
        .await
        .context("Extraction task did not complete")??;
    Ok(result)
}

async fn read_pdf_field(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<(Option<String>, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_pdf_content_type(&content_type) {
            return Err(AppError::UnsupportedMediaType(format!(
                "Expected {PDF_CONTENT_TYPE}, got '{content_type}'"
            )));
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "PDF exceeds the {max_bytes} byte limit"
            )));
        }
        return Ok((file_name, bytes));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{PDF_FIELD}' is required"
    )))
}

/// Compares the media type only, ignoring parameters such as `name=`.
fn is_pdf_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
