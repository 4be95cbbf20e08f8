//! The fixed retry schedule for delivery attempts.

use std::time::Duration;

/// An ordered, fixed sequence of backoff delays, consumed front-to-back.
///
/// The schedule is pre-declared rather than computed, which bounds the
/// worst-case wall-clock delay deterministically: the default policy sleeps
/// 1s, 3s, 5s for a total of 4 attempts and at most 9s of backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl RetryPolicy {
    /// Build a policy from an explicit delay schedule.
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// The remaining-delay schedule, in consumption order.
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Total attempts permitted: the first try plus one per delay.
    pub fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(vec![
            Duration::from_secs(1),
            Duration::from_secs(3),
            Duration::from_secs(5),
        ])
    }
}
