/// Whole-file failures that stop a submission before any row is validated.
///
/// The `Display` text is shown to the user verbatim as the single entry of
/// the rejected report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("You must select a CSV file.")]
    MissingFile,

    #[error("The file must be a CSV.")]
    NotCsv,

    #[error("The file could not be read. Try saving it as a UTF-8 encoded CSV.")]
    Unreadable,
}

/// Failure while rendering a report as CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
