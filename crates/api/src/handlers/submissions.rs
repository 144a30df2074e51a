//! Handlers for the `/submissions` resource.
//!
//! Accepts a CSV upload as multipart form data, runs it through the core
//! validator and returns the report as JSON or as a CSV error listing.

use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::Json;
use rowcheck_core::report::ValidationReport;
use rowcheck_core::rules::ColumnRule;
use rowcheck_core::submission::{validate_submission, SubmittedFile};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field names that carry the file.
pub const FILE_FIELDS: &[&str] = &["file", "archivo"];

/// A file part pulled out of a multipart body.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

// ── Validate ─────────────────────────────────────────────────────────

/// POST /api/v1/submissions/validate
///
/// Validate the uploaded CSV and return the full report. Whole-file
/// problems (missing file, wrong extension) are reported inside the
/// report with HTTP 200, same as row errors.
pub async fn validate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<ValidationReport>>> {
    let report = run_validation(&state, multipart).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/submissions/validate/csv
///
/// Same input as [`validate`]; responds with the error list as CSV and the
/// row counts in `x-rows-*` headers.
pub async fn validate_csv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, HeaderMap, String)> {
    let report = run_validation(&state, multipart).await?;
    let csv = report.errors_to_csv()?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"validation-errors.csv\""),
    );
    if let Some(stats) = report.stats() {
        headers.insert("x-rows-total", HeaderValue::from(stats.total));
        headers.insert("x-rows-ok", HeaderValue::from(stats.ok));
        headers.insert("x-rows-error", HeaderValue::from(stats.with_errors));
    }

    Ok((StatusCode::OK, headers, csv))
}

// ── Schema ───────────────────────────────────────────────────────────

/// One column of the expected layout.
#[derive(Debug, Serialize)]
pub struct ColumnSchema {
    #[serde(flatten)]
    pub rule: ColumnRule,
    pub description: String,
}

/// GET /api/v1/submissions/schema
///
/// Describe the expected columns so clients can show the layout.
pub async fn schema(State(state): State<AppState>) -> Json<DataResponse<Vec<ColumnSchema>>> {
    let columns = state
        .rules
        .columns()
        .iter()
        .map(|rule| ColumnSchema {
            description: rule.check.describe(),
            rule: rule.clone(),
        })
        .collect();
    Json(DataResponse { data: columns })
}

// ── Private helpers ──────────────────────────────────────────────────

async fn run_validation(state: &AppState, multipart: Multipart) -> AppResult<ValidationReport> {
    let upload = read_upload(multipart).await?;

    let file = upload.as_ref().map(|u| SubmittedFile {
        filename: &u.filename,
        bytes: &u.bytes,
    });
    let report = validate_submission(&state.rules, file);

    tracing::info!(
        filename = upload.as_ref().map(|u| u.filename.as_str()),
        size = upload.as_ref().map_or(0, |u| u.bytes.len()),
        success = report.is_success(),
        rows = report.row_count(),
        error_rows = report.error_row_count(),
        "Processed submission"
    );

    Ok(report)
}

/// Pull the file part out of the multipart body.
///
/// Non-file fields are drained and ignored. A file part with an empty name
/// and no content is what browsers send for an untouched file input, so it
/// counts as no file. More than one file part is rejected.
async fn read_upload(mut multipart: Multipart) -> AppResult<Option<UploadedFile>> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await? {
        let is_file_field = field
            .name()
            .is_some_and(|name| FILE_FIELDS.iter().any(|f| *f == name));
        if !is_file_field {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?.to_vec();

        if filename.is_empty() && bytes.is_empty() {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::BadRequest(
                "Only one file may be submitted at a time".to_string(),
            ));
        }
        upload = Some(UploadedFile { filename, bytes });
    }

    Ok(upload)
}
