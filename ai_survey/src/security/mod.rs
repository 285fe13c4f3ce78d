//! Brute-force protection for the login screen.
//!
//! [`LoginThrottle`] counts failed logins. The fifth consecutive failure
//! blocks the login action for a ten-second cooldown, counted down once per
//! second; reaching zero, or any successful login, clears the counter.
//!
//! ## Example
//!
//! ```
//! use ai_survey::security::LoginThrottle;
//!
//! #[tokio::main]
//! async fn main() {
//!     let throttle = LoginThrottle::new();
//!
//!     for _ in 0..5 {
//!         throttle.record_attempt(false);
//!     }
//!
//!     let state = throttle.state();
//!     assert!(state.blocked);
//!     println!("Try again in {} seconds", state.remaining_seconds);
//! }
//! ```

pub mod login_throttle;

pub use login_throttle::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_MAX_ATTEMPTS, LoginAttemptState, LoginThrottle, ThrottleConfig,
};
