//! Per-row validation: a structural gate followed by the column rules.

use crate::report::ValidationError;
use crate::rules::RuleSet;

/// Check that a row has exactly the expected number of fields.
pub fn check_shape(rules: &RuleSet, row: usize, field_count: usize) -> Option<ValidationError> {
    let expected = rules.expected_columns();
    (field_count != expected).then(|| {
        ValidationError::structural(
            row,
            format!("Row has {field_count} columns, expected {expected}."),
        )
    })
}

/// Validate one row.
///
/// A wrong column count yields exactly one structural error and no rule is
/// run. Otherwise every column rule runs in order and each contributes at
/// most one error.
pub fn validate_row<S: AsRef<str>>(
    rules: &RuleSet,
    row: usize,
    fields: &[S],
) -> Vec<ValidationError> {
    if let Some(err) = check_shape(rules, row, fields.len()) {
        return vec![err];
    }

    rules
        .columns()
        .iter()
        .zip(fields)
        .filter_map(|(rule, raw)| {
            rules
                .check(rule, raw.as_ref())
                .map(|message| ValidationError::content(row, rule.index, message))
        })
        .collect()
}
