//! Bounded poll-with-timeout for eventually consistent reads.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// When and how often a probe runs.
///
/// The probe runs once after `initial_delay`, then again every `interval`
/// for as long as the next attempt would start within `timeout` of the
/// first one. A zero `timeout` means exactly one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_delay: Duration,
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    /// Wait `delay`, probe once.
    #[must_use]
    pub const fn single_attempt(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            interval: Duration::ZERO,
            timeout: Duration::ZERO,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::single_attempt(Duration::from_secs(2))
    }
}

/// Last probe value and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome<T> {
    pub value: T,
    pub satisfied: bool,
    pub attempts: u32,
}

/// Run `probe` under `policy` until `done` accepts its value.
///
/// `probe` receives the 1-based attempt number.
pub async fn poll_until<T, F, Fut, D>(policy: &PollPolicy, mut probe: F, done: D) -> PollOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = T>,
    D: Fn(&T) -> bool,
{
    if !policy.initial_delay.is_zero() {
        tokio::time::sleep(policy.initial_delay).await;
    }

    let started = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let value = probe(attempts).await;
        if done(&value) {
            return PollOutcome {
                value,
                satisfied: true,
                attempts,
            };
        }

        if started.elapsed() + policy.interval > policy.timeout {
            return PollOutcome {
                value,
                satisfied: false,
                attempts,
            };
        }

        tracing::debug!(attempts, "probe not satisfied yet; polling again");
        tokio::time::sleep(policy.interval).await;
    }
}
