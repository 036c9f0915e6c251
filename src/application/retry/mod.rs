mod classification;
mod controller;
mod policy;
mod sleeper;

pub use classification::{ClassifyFailure, FailureClass, classify_message};
pub use controller::{
    Attempt, AttemptOutcome, Retried, RetryContext, RetryController, RetryFailure, StopReason,
    retry_with_backoff,
};
pub use policy::{
    DEFAULT_BACKOFF_DELAYS, DEFAULT_MAX_ATTEMPTS, RetryPolicy, RetryPolicyError,
};
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
