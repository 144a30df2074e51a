//! Validation engine for five-column CSV submissions.
//!
//! Turns the raw bytes of an uploaded file into a [`report::ValidationReport`]:
//! decode (UTF-8 with a Latin-1 fallback), split into rows, gate each row on
//! its column count, then run the per-column rule table. Pure logic with no
//! HTTP or storage dependencies.

pub mod email;
pub mod encoding;
pub mod error;
pub mod parser;
pub mod report;
pub mod row;
pub mod rules;
pub mod submission;
