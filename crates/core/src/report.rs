//! Report types returned to callers.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{ExportError, SubmissionError};

/// Shown in place of a row or column that does not apply to an error.
pub const NOT_APPLICABLE: &str = "N/A";

/// Message attached to a report without errors.
pub const SUCCESS_MESSAGE: &str = "File validated successfully.";

/// One problem found in a submission.
///
/// `row` is absent for whole-file errors; `column` is absent for whole-file
/// and structural (column-count) errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    #[serde(serialize_with = "position_or_na")]
    row: Option<usize>,
    #[serde(serialize_with = "position_or_na")]
    column: Option<usize>,
    message: String,
}

impl ValidationError {
    /// An error about the submission as a whole.
    pub fn file_level(message: impl Into<String>) -> Self {
        Self {
            row: None,
            column: None,
            message: message.into(),
        }
    }

    /// An error about the shape of a row.
    pub fn structural(row: usize, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            column: None,
            message: message.into(),
        }
    }

    /// An error about the value of one field.
    pub fn content(row: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
            message: message.into(),
        }
    }

    pub fn row(&self) -> Option<usize> {
        self.row
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SubmissionError> for ValidationError {
    fn from(err: SubmissionError) -> Self {
        Self::file_level(err.to_string())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column {}: {}",
            Position(self.row),
            Position(self.column),
            self.message
        )
    }
}

/// Displays a 1-based position or `N/A`.
struct Position(Option<usize>);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str(NOT_APPLICABLE),
        }
    }
}

fn position_or_na<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) => serializer.serialize_u64(*n as u64),
        None => serializer.serialize_str(NOT_APPLICABLE),
    }
}

/// Row counts for a submission that was parsed.
///
/// `ok + with_errors == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub ok: usize,
    pub with_errors: usize,
}

impl ReportStats {
    pub fn new(total: usize, with_errors: usize) -> Self {
        debug_assert!(with_errors <= total);
        Self {
            total,
            ok: total - with_errors,
            with_errors,
        }
    }
}

/// Outcome of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    success_message: Option<&'static str>,
    errors: Vec<ValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<ReportStats>,
}

impl ValidationReport {
    /// Report for a submission rejected before any row was read. Has no stats.
    pub fn rejected(err: SubmissionError) -> Self {
        Self {
            success: false,
            success_message: None,
            errors: vec![err.into()],
            stats: None,
        }
    }

    /// Report for a submission whose rows were all validated.
    pub fn completed(errors: Vec<ValidationError>, stats: ReportStats) -> Self {
        let success = errors.is_empty();
        Self {
            success,
            success_message: success.then_some(SUCCESS_MESSAGE),
            errors,
            stats: Some(stats),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message
    }

    /// Errors in discovery order: row by row, then column by column.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn stats(&self) -> Option<ReportStats> {
        self.stats
    }

    pub fn row_count(&self) -> usize {
        self.stats.map_or(0, |s| s.total)
    }

    pub fn ok_row_count(&self) -> usize {
        self.stats.map_or(0, |s| s.ok)
    }

    pub fn error_row_count(&self) -> usize {
        self.stats.map_or(0, |s| s.with_errors)
    }

    /// Render the error list as CSV with a `row,column,message` header.
    pub fn errors_to_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["row", "column", "message"])?;
        for err in &self.errors {
            writer.write_record([
                Position(err.row).to_string(),
                Position(err.column).to_string(),
                err.message.clone(),
            ])?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}
