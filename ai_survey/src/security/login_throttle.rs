//! Failed-login throttle with a one-second cooldown countdown.

use serde::{Deserialize, Serialize};
use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, interval_at},
};

/// Default number of consecutive failures that triggers blocking
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default cooldown length in seconds
pub const DEFAULT_COOLDOWN_SECS: u32 = 10;

/// Throttle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Consecutive failures allowed before the cooldown starts
    pub max_attempts: u32,

    /// Cooldown duration in seconds
    pub cooldown_secs: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
        }
    }
}

/// Snapshot of the throttle, as shown by the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAttemptState {
    pub attempt_count: u32,
    pub blocked: bool,

    /// Seconds left in the cooldown; only meaningful while `blocked`
    pub remaining_seconds: u32,
}

impl LoginAttemptState {
    /// State at session start and after every reset
    pub const INITIAL: Self = Self {
        attempt_count: 0,
        blocked: false,
        remaining_seconds: 0,
    };
}

/// State shared with the countdown task
struct Shared {
    state: watch::Sender<LoginAttemptState>,

    /// Bumped on every block and reset; a countdown only acts on its own epoch
    epoch: AtomicU64,
}

impl Shared {
    /// Advance the countdown by one second. Returns whether to keep ticking.
    fn tick(&self, epoch: u64) -> bool {
        let mut keep_running = false;

        self.state.send_if_modified(|state| {
            if self.epoch.load(Ordering::SeqCst) != epoch || !state.blocked {
                return false;
            }

            state.remaining_seconds = state.remaining_seconds.saturating_sub(1);
            if state.remaining_seconds == 0 {
                self.epoch.fetch_add(1, Ordering::SeqCst);
                *state = LoginAttemptState::INITIAL;
                log::info!("Login cooldown expired, attempts reset");
            } else {
                keep_running = true;
            }
            true
        });

        keep_running
    }
}

/// Tracks failed logins and blocks further attempts for a cooldown
///
/// The countdown is a tokio task owned by the throttle. It is started on the
/// transition into `blocked` and aborted on reset, on success and on drop.
/// Cooldowns require a tokio runtime; without one the throttle stays blocked
/// until [`LoginThrottle::reset`] is called.
pub struct LoginThrottle {
    config: ThrottleConfig,
    shared: Arc<Shared>,
    cooldown: Mutex<Option<JoinHandle<()>>>,
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginThrottle {
    /// Throttle with the default threshold (5) and cooldown (10s)
    pub fn new() -> Self {
        Self::with_config(ThrottleConfig::default())
    }

    /// Throttle with a custom configuration
    pub fn with_config(config: ThrottleConfig) -> Self {
        let (state, _) = watch::channel(LoginAttemptState::INITIAL);

        Self {
            config,
            shared: Arc::new(Shared {
                state,
                epoch: AtomicU64::new(0),
            }),
            cooldown: Mutex::new(None),
        }
    }

    /// Active configuration
    pub fn config(&self) -> ThrottleConfig {
        self.config
    }

    /// Current state snapshot
    pub fn state(&self) -> LoginAttemptState {
        *self.shared.state.borrow()
    }

    /// Whether login is currently disabled
    pub fn is_blocked(&self) -> bool {
        self.state().blocked
    }

    /// Receiver notified on every state change, including countdown ticks
    pub fn subscribe(&self) -> watch::Receiver<LoginAttemptState> {
        self.shared.state.subscribe()
    }

    /// Record the outcome of a login request
    ///
    /// A success clears the counter from any state. A failure increments it;
    /// reaching the threshold blocks and starts the countdown. Failures while
    /// already blocked are ignored.
    pub fn record_attempt(&self, success: bool) -> LoginAttemptState {
        if success {
            return self.reset();
        }

        let max_attempts = self.config.max_attempts.max(1);
        let cooldown_secs = self.config.cooldown_secs;
        let mut started_epoch = None;

        self.shared.state.send_if_modified(|state| {
            if state.blocked {
                return false;
            }

            state.attempt_count += 1;
            if state.attempt_count >= max_attempts {
                state.blocked = true;
                state.remaining_seconds = cooldown_secs;
                started_epoch = Some(self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1);
            }
            true
        });

        if let Some(epoch) = started_epoch {
            log::warn!(
                "Login blocked after {} failed attempts, cooling down for {}s",
                max_attempts,
                cooldown_secs
            );
            self.start_cooldown(epoch);
        }

        self.state()
    }

    /// Return to the initial state and stop any running countdown
    pub fn reset(&self) -> LoginAttemptState {
        self.shared.state.send_modify(|state| {
            self.shared.epoch.fetch_add(1, Ordering::SeqCst);
            *state = LoginAttemptState::INITIAL;
        });
        self.cancel_cooldown();

        LoginAttemptState::INITIAL
    }

    fn start_cooldown(&self, epoch: u64) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Cannot start login cooldown without a runtime: {}", e);
                return;
            }
        };

        let shared = Arc::clone(&self.shared);
        let period = Duration::from_secs(1);
        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if !shared.tick(epoch) {
                    break;
                }
            }
        });

        let previous = self
            .cooldown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_cooldown(&self) {
        let handle = self
            .cooldown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }

    /// Whether a countdown task is alive
    pub fn has_active_cooldown(&self) -> bool {
        self.cooldown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for LoginThrottle {
    fn drop(&mut self) {
        self.cancel_cooldown();
    }
}
