use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use super::{ClassifyFailure, FailureClass, RetryPolicy, Sleeper, TokioSleeper};

/// Names the wrapped operation in log entries. The subject (usually a file
/// reference) is diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryContext {
    pub operation: String,
    pub subject: Option<String>,
}

impl RetryContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed {
        class: FailureClass,
        kind: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// 1-based.
    pub number: u32,
    pub waited: Duration,
    pub outcome: AttemptOutcome,
}

#[derive(Debug)]
pub struct Retried<T> {
    pub value: T,
    pub history: Vec<Attempt>,
}

impl<T> Retried<T> {
    pub fn attempts_made(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn succeeded_first_try(&self) -> bool {
        self.attempts_made() == 1
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Permanent,
    Exhausted,
}

/// Terminal failure of a retry sequence: the last error plus what led to it.
#[derive(Debug)]
pub struct RetryFailure<E> {
    error: E,
    class: FailureClass,
    reason: StopReason,
    history: Vec<Attempt>,
}

impl<E: ClassifyFailure> RetryFailure<E> {
    pub fn error(&self) -> &E {
        &self.error
    }

    pub fn into_error(self) -> E {
        self.error
    }

    pub fn class(&self) -> FailureClass {
        self.class
    }

    pub fn reason(&self) -> StopReason {
        self.reason
    }

    pub fn kind(&self) -> &'static str {
        self.error.kind()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn attempts_made(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }
}

impl<E: fmt::Display> fmt::Display for RetryFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            StopReason::Permanent => write!(f, "{} (not retried)", self.error),
            StopReason::Exhausted => write!(
                f,
                "{} (gave up after {} attempts)",
                self.error,
                self.history.len()
            ),
        }
    }
}

impl<E> std::error::Error for RetryFailure<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Re-runs a fallible async operation according to a [`RetryPolicy`].
///
/// Transient failures are retried after the policy's backoff delay until the
/// attempt budget runs out. A permanent failure ends the sequence at once.
/// Every failed attempt produces exactly one log entry; a first-try success
/// produces none.
#[derive(Clone)]
pub struct RetryController {
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl RetryController {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(policy: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { policy, sleeper }
    }

    /// Same sleeper, different budget.
    pub fn with_policy(&self, policy: RetryPolicy) -> Self {
        Self {
            policy,
            sleeper: Arc::clone(&self.sleeper),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn execute<T, E, Op, Fut>(
        &self,
        context: &RetryContext,
        mut operation: Op,
    ) -> Result<Retried<T>, RetryFailure<E>>
    where
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: ClassifyFailure,
    {
        let max_attempts = self.policy.max_attempts();
        let subject = context.subject.as_deref().unwrap_or("-");
        let mut history = Vec::with_capacity(max_attempts as usize);
        let mut waited = Duration::ZERO;
        let mut attempt: u32 = 1;

        loop {
            let error = match operation().await {
                Ok(value) => {
                    history.push(Attempt {
                        number: attempt,
                        waited,
                        outcome: AttemptOutcome::Succeeded,
                    });
                    if attempt > 1 {
                        info!(
                            operation = %context.operation,
                            subject,
                            attempt,
                            max_attempts,
                            "Operation succeeded after retrying"
                        );
                    }
                    return Ok(Retried { value, history });
                }
                Err(e) => e,
            };

            let class = error.classify();
            let kind = error.kind();
            let message = error.to_string();

            history.push(Attempt {
                number: attempt,
                waited,
                outcome: AttemptOutcome::Failed {
                    class,
                    kind,
                    message: message.clone(),
                },
            });

            if class == FailureClass::Permanent {
                error!(
                    operation = %context.operation,
                    subject,
                    attempt,
                    error_kind = kind,
                    error = %message,
                    "Permanent failure, not retrying"
                );
                return Err(RetryFailure {
                    error,
                    class,
                    reason: StopReason::Permanent,
                    history,
                });
            }

            let delay = match self.policy.delay_before(attempt + 1) {
                Some(delay) => delay,
                None => {
                    error!(
                        operation = %context.operation,
                        subject,
                        attempts = attempt,
                        max_attempts,
                        error_kind = kind,
                        error = %message,
                        "All attempts exhausted"
                    );
                    return Err(RetryFailure {
                        error,
                        class,
                        reason: StopReason::Exhausted,
                        history,
                    });
                }
            };

            warn!(
                operation = %context.operation,
                subject,
                attempt,
                max_attempts,
                error_kind = kind,
                error = %message,
                wait_ms = delay.as_millis() as u64,
                "Transient failure, retrying"
            );

            drop(error);
            self.sleeper.sleep(delay).await;
            waited = delay;
            attempt += 1;
        }
    }
}

/// One-shot form of [`RetryController::execute`] using a tokio sleeper.
pub async fn retry_with_backoff<T, E, Op, Fut>(
    policy: RetryPolicy,
    context: &RetryContext,
    operation: Op,
) -> Result<T, RetryFailure<E>>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: ClassifyFailure,
{
    RetryController::new(policy)
        .execute(context, operation)
        .await
        .map(Retried::into_value)
}
