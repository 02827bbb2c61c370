use crate::config::WIFI_RETRY_MAX_DEFAULT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { attempt: u8 },
    Exhausted,
}

/// Consecutive reconnect attempts since the last successful join.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u8,
    count: u8,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(WIFI_RETRY_MAX_DEFAULT)
    }
}

impl RetryPolicy {
    pub const fn new(max_retries: u8) -> Self {
        Self {
            max_retries,
            count: 0,
        }
    }

    pub const fn max_retries(&self) -> u8 {
        self.max_retries
    }

    pub const fn count(&self) -> u8 {
        self.count
    }

    pub const fn should_retry(&self, count: u8) -> bool {
        count < self.max_retries
    }

    /// Records a disconnect. The disconnect that would bring the streak to
    /// `max_retries` resets the counter and reports exhaustion instead.
    pub fn on_disconnect(&mut self) -> RetryDecision {
        let attempt = self.count.saturating_add(1);
        if self.should_retry(attempt) {
            self.count = attempt;
            RetryDecision::Retry { attempt }
        } else {
            self.count = 0;
            RetryDecision::Exhausted
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub(crate) fn restore(&mut self, count: u8) {
        self.count = count;
    }
}
