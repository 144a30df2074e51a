//! Submission-level driver: whole-file checks, decoding, parsing and
//! aggregation of per-row results into a [`ValidationReport`].

use crate::encoding;
use crate::error::SubmissionError;
use crate::parser::{self, Row};
use crate::report::{ReportStats, ValidationReport};
use crate::row::validate_row;
use crate::rules::RuleSet;

/// Required filename suffix, compared case-insensitively.
pub const CSV_EXTENSION: &str = ".csv";

/// An uploaded file as handed over by the transport layer.
#[derive(Debug, Clone, Copy)]
pub struct SubmittedFile<'a> {
    pub filename: &'a str,
    pub bytes: &'a [u8],
}

/// Validate an upload end to end.
///
/// `None` means no file was supplied. Whole-file problems (no file, wrong
/// extension, unreadable content) yield a report with a single entry and no
/// stats; otherwise every row is validated.
pub fn validate_submission(rules: &RuleSet, file: Option<SubmittedFile<'_>>) -> ValidationReport {
    let Some(file) = file else {
        return reject(SubmissionError::MissingFile);
    };

    if !has_csv_extension(file.filename) {
        tracing::warn!(filename = file.filename, "Rejected upload without .csv extension");
        return reject(SubmissionError::NotCsv);
    }

    validate_bytes(rules, file.bytes)
}

/// Decode and validate raw file content.
pub fn validate_bytes(rules: &RuleSet, bytes: &[u8]) -> ValidationReport {
    let decoded = encoding::decode(bytes);
    tracing::debug!(encoding = ?decoded.encoding, len = bytes.len(), "Decoded submission");
    validate_text(rules, &decoded.text)
}

/// Parse and validate already-decoded text.
pub fn validate_text(rules: &RuleSet, text: &str) -> ValidationReport {
    match parser::parse_rows(text) {
        Ok(rows) => aggregate(rules, &rows),
        Err(err) => {
            tracing::warn!(error = %err, "CSV reader failed on decoded input");
            reject(SubmissionError::Unreadable)
        }
    }
}

/// Filename convention check only; the content is not sniffed.
pub fn has_csv_extension(filename: &str) -> bool {
    filename.to_lowercase().ends_with(CSV_EXTENSION)
}

fn reject(err: SubmissionError) -> ValidationReport {
    ValidationReport::rejected(err)
}

fn aggregate(rules: &RuleSet, rows: &[Row]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut rows_with_errors = 0;

    for row in rows {
        let row_errors = validate_row(rules, row.index, &row.fields);
        if !row_errors.is_empty() {
            rows_with_errors += 1;
            errors.extend(row_errors);
        }
    }

    let stats = ReportStats::new(rows.len(), rows_with_errors);
    tracing::info!(
        total = stats.total,
        ok = stats.ok,
        with_errors = stats.with_errors,
        errors = errors.len(),
        "Validated submission rows"
    );
    ValidationReport::completed(errors, stats)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::report::SUCCESS_MESSAGE;

    fn rules() -> RuleSet {
        RuleSet::standard()
    }

    fn file<'a>(filename: &'a str, bytes: &'a [u8]) -> Option<SubmittedFile<'a>> {
        Some(SubmittedFile { filename, bytes })
    }

    fn only_message(report: &ValidationReport) -> &str {
        assert_eq!(report.errors().len(), 1);
        report.errors()[0].message()
    }

    #[test]
    fn missing_file_is_rejected() {
        let report = validate_submission(&rules(), None);
        assert!(!report.is_success());
        assert_eq!(only_message(&report), SubmissionError::MissingFile.to_string());
        assert_matches!(report.stats(), None);
    }

    #[test]
    fn wrong_extension_is_rejected_without_reading() {
        let report = validate_submission(&rules(), file("data.txt", b"123,a@b.com,CC,600000,x\n"));
        assert_eq!(only_message(&report), SubmissionError::NotCsv.to_string());
        assert_matches!(report.stats(), None);
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_csv_extension("DATA.CSV"));
        assert!(has_csv_extension("report.final.Csv"));
        assert!(!has_csv_extension("data.csv.txt"));
        assert!(!has_csv_extension("csv"));
        assert!(!has_csv_extension(""));
    }

    #[test]
    fn mixed_rows_end_to_end() {
        let input = b"123,a@b.com,CC,600000,note\n45,bad,TI,999999999,x\n";
        let report = validate_submission(&rules(), file("upload.csv", input));

        assert!(!report.is_success());
        assert_eq!(report.success_message(), None);
        assert_eq!(report.row_count(), 2);
        assert_eq!(report.ok_row_count(), 1);
        assert_eq!(report.error_row_count(), 1);

        let errors = report.errors();
        assert!(errors.iter().all(|e| e.row() == Some(2)));
        let columns: Vec<Option<usize>> = errors.iter().map(|e| e.column()).collect();
        // "45" is only two digits, so column 1 is flagged as well.
        assert_eq!(columns, vec![Some(1), Some(2), Some(4)]);
        assert_eq!(errors[1].message(), "Column 2 must be a valid email address.");
        assert_eq!(errors[2].message(), "Column 4 must be between 500000 and 1500000.");
    }

    #[test]
    fn empty_file_is_success_with_zero_rows() {
        let report = validate_submission(&rules(), file("empty.csv", b""));
        assert!(report.is_success());
        assert_eq!(report.success_message(), Some(SUCCESS_MESSAGE));
        assert_eq!(report.stats(), Some(ReportStats::new(0, 0)));
    }

    #[test]
    fn all_valid_rows_succeed() {
        let input = "123,a@b.com,cc,500000,\n9876543210,x.y@example.org, ti ,1500000,notes\n";
        let report = validate_text(&rules(), input);
        assert!(report.is_success());
        assert!(report.errors().is_empty());
        assert_eq!(report.stats(), Some(ReportStats::new(2, 0)));
    }

    #[test]
    fn structural_row_counts_once() {
        let input = "1,2\n123,a@b.com,CC,600000,x\nab,bad,XX,abc,y,extra\n";
        let report = validate_text(&rules(), input);
        assert_eq!(report.errors().len(), 2);
        assert_eq!(report.errors()[0].row(), Some(1));
        assert_eq!(report.errors()[0].column(), None);
        assert_eq!(report.errors()[1].row(), Some(3));
        assert_eq!(report.errors()[1].message(), "Row has 6 columns, expected 5.");
        assert_eq!(report.stats(), Some(ReportStats::new(3, 2)));
    }

    #[test]
    fn blank_line_is_structural_error_and_keeps_indices() {
        let input = "123,a@b.com,CC,600000,x\n\n12,a@b.com,CC,600000,x\n";
        let report = validate_text(&rules(), input);

        assert_eq!(report.stats(), Some(ReportStats::new(3, 2)));
        let errors = report.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].row(), Some(2));
        assert_eq!(errors[0].column(), None);
        assert_eq!(errors[0].message(), "Row has 0 columns, expected 5.");
        assert_eq!(errors[1].row(), Some(3));
        assert_eq!(errors[1].column(), Some(1));
    }

    #[test]
    fn trailing_blank_lines_do_not_count() {
        let report = validate_text(&rules(), "123,a@b.com,CC,600000,x\n\n\n");
        assert!(report.is_success());
        assert_eq!(report.row_count(), 1);
    }

    #[test]
    fn errors_continue_past_bad_rows() {
        let input = "x\nab,a@b.com,CC,600000,\n123,a@b.com,CC,1,\n";
        let report = validate_text(&rules(), input);
        let rows: Vec<Option<usize>> = report.errors().iter().map(|e| e.row()).collect();
        assert_eq!(rows, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(report.error_row_count(), 3);
        assert_eq!(report.ok_row_count(), 0);
    }

    #[test]
    fn latin1_content_is_decoded_not_rejected() {
        let input = b"123,a@b.com,CC,600000,Jos\xe9 Mar\xeda\n";
        let report = validate_submission(&rules(), file("legacy.csv", input));
        assert!(report.is_success());
        assert_eq!(report.row_count(), 1);
    }

    #[test]
    fn bom_does_not_break_first_column() {
        let input = b"\xef\xbb\xbf123,a@b.com,CC,600000,x\n";
        let report = validate_bytes(&rules(), input);
        assert!(report.is_success());
    }

    #[test]
    fn validation_is_idempotent() {
        let input = b"123,a@b.com,CC,600000,note\n45,bad,TI,999999999,x\n";
        let first = validate_bytes(&rules(), input);
        let second = validate_bytes(&rules(), input);
        assert_eq!(first, second);
    }

    #[test]
    fn stats_invariant_holds() {
        let input = "1\n123,a@b.com,CC,600000,\n\"q,uoted\",a@b.com,TI,700000,\n";
        let report = validate_text(&rules(), input);
        let stats = report.stats().unwrap();
        assert_eq!(stats.ok + stats.with_errors, stats.total);
        assert_eq!(stats, ReportStats::new(3, 2));
    }
}
