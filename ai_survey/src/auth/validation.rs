//! Credential format checks performed before any network call.

use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One '@', a non-empty local part, and a dotted domain ending in 2+ letters.
        let pattern = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `email` has the shape the login screen accepts
///
/// The rule is deliberately permissive; the auth service is the authority
/// on whether the address exists.
pub fn validate_email_format(email: &str) -> bool {
    email_regex().is_match(email)
}
