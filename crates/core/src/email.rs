//! Email-syntax capability used by the email column.

use validator::ValidateEmail;

/// Decides whether a string is a syntactically valid email address.
///
/// Injected into [`crate::rules::RuleSet`] so callers can substitute their
/// own checker. Closures `Fn(&str) -> bool` implement it directly.
pub trait EmailValidator: Send + Sync {
    fn is_valid_email(&self, candidate: &str) -> bool;
}

/// HTML5 / RFC 5322 style check from the `validator` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEmailValidator;

impl EmailValidator for StandardEmailValidator {
    fn is_valid_email(&self, candidate: &str) -> bool {
        candidate.validate_email()
    }
}

impl<F> EmailValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid_email(&self, candidate: &str) -> bool {
        self(candidate)
    }
}
