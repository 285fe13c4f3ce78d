//! Structured logging configuration.
//!
//! The core library logs through the `log` facade; the subscriber installed
//! here also captures those records, so one `RUST_LOG` filter covers both
//! crates.

use ai_survey::security::LoginAttemptState;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var; the default keeps
/// HTTP internals quiet.
///
/// # Example
///
/// ```no_run
/// use survey_client::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Survey client starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    match result {
        Ok(()) => tracing::info!("Structured logging initialized"),
        Err(e) => tracing::debug!("Logging already initialized: {}", e),
    }
}

/// Log a security event with structured data
///
/// # Arguments
///
/// * `event_type` - Type of security event
/// * `email` - Optional address the event concerns; logged redacted
/// * `message` - Event message
///
/// # Example
///
/// ```
/// use survey_client::logging::log_security_event;
///
/// log_security_event("login_blocked", Some("ada@example.com"), "Too many failed logins");
/// ```
pub fn log_security_event(event_type: &str, email: Option<&str>, message: &str) {
    let email = email.map(redact_email);
    tracing::warn!(
        event_type = event_type,
        email = email.as_deref(),
        "SECURITY: {}",
        message
    );
}

/// Keep the first character of the local part and the domain
///
/// `ada@example.com` becomes `a***@example.com`; input without a single
/// `@` is hidden entirely.
pub fn redact_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !domain.contains('@') => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        _ => "***".to_string(),
    }
}

/// Log a throttle transition
///
/// Blocks are security events; other transitions are debug noise.
pub fn log_throttle_state(email: Option<&str>, state: &LoginAttemptState) {
    if state.blocked {
        log_security_event(
            "login_blocked",
            email,
            &format!(
                "Login blocked after {} failed attempts, {}s remaining",
                state.attempt_count, state.remaining_seconds
            ),
        );
    } else {
        tracing::debug!(
            attempt_count = state.attempt_count,
            "Login attempt state updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init();
        init();
    }

    #[test]
    fn test_log_security_event() {
        // Just ensure it doesn't panic
        log_security_event("test_event", Some("a@b.co"), "Test message");
        log_security_event("test_event", None, "Test message");
    }

    #[test]
    fn test_redact_email() {
        assert_eq!(redact_email("ada@example.com"), "a***@example.com");
        assert_eq!(redact_email("@example.com"), "***@example.com");
        assert_eq!(redact_email("not-an-email"), "***");
        assert_eq!(redact_email("a@b@example.com"), "***");
        assert!(!redact_email("grace.hopper@navy.mil").contains("grace"));
    }

    #[test]
    fn test_log_throttle_state() {
        log_throttle_state(None, &LoginAttemptState::INITIAL);
        log_throttle_state(
            Some("a@b.co"),
            &LoginAttemptState {
                attempt_count: 5,
                blocked: true,
                remaining_seconds: 10,
            },
        );
    }
}
