//! Column rule table for the five-column submission schema.
//!
//! Each column is described by a [`ColumnRule`] (position, name, check).
//! Checks receive the field with surrounding whitespace trimmed and yield at
//! most one message per field. Format checks run before range checks and a
//! failed format check suppresses the range check, so a value is never
//! reported twice.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::email::{EmailValidator, StandardEmailValidator};

pub const DOCUMENT_NUMBER_MIN_DIGITS: usize = 3;
pub const DOCUMENT_NUMBER_MAX_DIGITS: usize = 10;
pub const DOCUMENT_TYPES: &[&str] = &["CC", "TI"];
pub const AMOUNT_MIN: u64 = 500_000;
pub const AMOUNT_MAX: u64 = 1_500_000;

/// The constraint applied to one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnCheck {
    /// ASCII digits only, with a digit count in `min_len..=max_len`.
    DigitString { min_len: usize, max_len: usize },
    /// Syntactically valid email address.
    Email,
    /// One of `values`, compared after uppercasing.
    OneOf { values: &'static [&'static str] },
    /// ASCII digits only, parsed value in `min..=max`.
    IntegerRange { min: u64, max: u64 },
    /// Anything goes.
    Unchecked,
}

impl ColumnCheck {
    /// Short human-readable description of the constraint.
    pub fn describe(&self) -> String {
        match self {
            Self::DigitString { min_len, max_len } => {
                format!("integer digits, {min_len} to {max_len} characters")
            }
            Self::Email => "valid email address".to_string(),
            Self::OneOf { values } => format!("one of {}", quoted_list(values)),
            Self::IntegerRange { min, max } => format!("integer between {min} and {max}"),
            Self::Unchecked => "any value".to_string(),
        }
    }
}

/// A single entry of the schema table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRule {
    /// 1-based column position.
    pub index: usize,
    pub name: &'static str,
    pub check: ColumnCheck,
}

/// The five standard columns, in order.
pub fn standard_columns() -> Vec<ColumnRule> {
    vec![
        ColumnRule {
            index: 1,
            name: "document_number",
            check: ColumnCheck::DigitString {
                min_len: DOCUMENT_NUMBER_MIN_DIGITS,
                max_len: DOCUMENT_NUMBER_MAX_DIGITS,
            },
        },
        ColumnRule {
            index: 2,
            name: "email",
            check: ColumnCheck::Email,
        },
        ColumnRule {
            index: 3,
            name: "document_type",
            check: ColumnCheck::OneOf {
                values: DOCUMENT_TYPES,
            },
        },
        ColumnRule {
            index: 4,
            name: "amount",
            check: ColumnCheck::IntegerRange {
                min: AMOUNT_MIN,
                max: AMOUNT_MAX,
            },
        },
        ColumnRule {
            index: 5,
            name: "notes",
            check: ColumnCheck::Unchecked,
        },
    ]
}

/// Immutable rule table plus the email capability it depends on.
///
/// Built once at startup and shared; cloning only bumps reference counts.
#[derive(Clone)]
pub struct RuleSet {
    columns: Arc<[ColumnRule]>,
    email: Arc<dyn EmailValidator>,
}

impl RuleSet {
    /// Standard columns with the `validator`-crate email check.
    pub fn standard() -> Self {
        Self::with_email_validator(StandardEmailValidator)
    }

    /// Standard columns with a caller-supplied email check.
    pub fn with_email_validator(email: impl EmailValidator + 'static) -> Self {
        Self::new(standard_columns(), email)
    }

    pub fn new(columns: Vec<ColumnRule>, email: impl EmailValidator + 'static) -> Self {
        Self {
            columns: columns.into(),
            email: Arc::new(email),
        }
    }

    pub fn columns(&self) -> &[ColumnRule] {
        &self.columns
    }

    /// Number of fields every row must have.
    pub fn expected_columns(&self) -> usize {
        self.columns.len()
    }

    /// Apply `rule` to a raw field, returning the violation message if any.
    pub fn check(&self, rule: &ColumnRule, raw: &str) -> Option<String> {
        let value = raw.trim();
        let column = rule.index;

        match &rule.check {
            ColumnCheck::DigitString { min_len, max_len } => {
                if !is_digits(value) {
                    Some(format!("Column {column} must contain only integer digits."))
                } else if !(*min_len..=*max_len).contains(&value.len()) {
                    Some(format!(
                        "Column {column} must have between {min_len} and {max_len} digits."
                    ))
                } else {
                    None
                }
            }
            ColumnCheck::Email => (!self.email.is_valid_email(value))
                .then(|| format!("Column {column} must be a valid email address.")),
            ColumnCheck::OneOf { values } => {
                let upper = value.to_uppercase();
                (!values.iter().any(|v| *v == upper)).then(|| {
                    format!(
                        "Column {column} only permits the values {}.",
                        quoted_list(values)
                    )
                })
            }
            ColumnCheck::IntegerRange { min, max } => {
                if !is_digits(value) {
                    return Some(format!("Column {column} must be an integer."));
                }
                // Digit strings too long for u64 are out of range by definition.
                let in_range = value
                    .parse::<u64>()
                    .is_ok_and(|n| (*min..=*max).contains(&n));
                (!in_range).then(|| format!("Column {column} must be between {min} and {max}."))
            }
            ColumnCheck::Unchecked => None,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// Non-empty and ASCII digits only.
fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// `'A'`, `'A' or 'B'`, `'A', 'B' or 'C'`.
fn quoted_list(values: &[&str]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}
