use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const DEFAULT_BACKOFF_DELAYS: [Duration; 3] = [
    Duration::from_secs(1),
    Duration::from_secs(2),
    Duration::from_secs(4),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetryPolicyError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    #[error(
        "{max_attempts} attempts need at least {required} backoff delays, got {provided}"
    )]
    InsufficientDelays {
        max_attempts: u32,
        required: usize,
        provided: usize,
    },
}

/// How many times an operation may run and how long to wait between runs.
///
/// The delay before attempt `k` (for `k > 1`) is `backoff_delays[k - 2]`.
/// Construction fails when there are fewer delays than retries, so lookups
/// never fall off the end of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_delays: Vec<Duration>,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        backoff_delays: impl Into<Vec<Duration>>,
    ) -> Result<Self, RetryPolicyError> {
        let backoff_delays = backoff_delays.into();

        if max_attempts == 0 {
            return Err(RetryPolicyError::ZeroAttempts);
        }

        let required = (max_attempts - 1) as usize;
        if backoff_delays.len() < required {
            return Err(RetryPolicyError::InsufficientDelays {
                max_attempts,
                required,
                provided: backoff_delays.len(),
            });
        }

        Ok(Self {
            max_attempts,
            backoff_delays,
        })
    }

    /// Runs the operation once and never waits.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff_delays: Vec::new(),
        }
    }

    /// Doubling delays starting at `initial`, one per retry.
    pub fn exponential(max_attempts: u32, initial: Duration) -> Result<Self, RetryPolicyError> {
        let retries = max_attempts.saturating_sub(1);
        let delays = (0..retries)
            .map(|i| initial.saturating_mul(2u32.saturating_pow(i)))
            .collect::<Vec<_>>();
        Self::new(max_attempts, delays)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_delays(&self) -> &[Duration] {
        &self.backoff_delays
    }

    /// Wait inserted before the 1-based `attempt`. `None` for the first
    /// attempt and for attempts beyond the budget.
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt < 2 || attempt > self.max_attempts {
            return None;
        }
        self.backoff_delays.get((attempt - 2) as usize).copied()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_delays: DEFAULT_BACKOFF_DELAYS.to_vec(),
        }
    }
}
