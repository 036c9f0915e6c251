use std::time::Duration;

use medscribe::application::retry::{
    DEFAULT_BACKOFF_DELAYS, DEFAULT_MAX_ATTEMPTS, RetryPolicy, RetryPolicyError,
};

#[test]
fn given_default_policy_when_inspected_then_three_attempts_with_one_two_four_seconds() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    assert_eq!(policy.max_attempts(), 3);
    assert_eq!(policy.backoff_delays(), &DEFAULT_BACKOFF_DELAYS[..]);
    assert_eq!(
        policy.backoff_delays(),
        &[
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4)
        ]
    );
}

#[test]
fn given_zero_attempts_when_building_policy_then_rejected() {
    let result = RetryPolicy::new(0, vec![]);

    assert_eq!(result, Err(RetryPolicyError::ZeroAttempts));
}

#[test]
fn given_fewer_delays_than_retries_when_building_policy_then_rejected() {
    let result = RetryPolicy::new(4, vec![Duration::from_millis(10)]);

    assert_eq!(
        result,
        Err(RetryPolicyError::InsufficientDelays {
            max_attempts: 4,
            required: 3,
            provided: 1,
        })
    );
}

#[test]
fn given_single_attempt_without_delays_when_building_policy_then_accepted() {
    let policy = RetryPolicy::new(1, vec![]).unwrap();

    assert_eq!(policy.max_attempts(), 1);
    assert_eq!(policy.delay_before(2), None);
}

#[test]
fn given_policy_when_asking_delay_per_attempt_then_uses_preceding_slot() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.delay_before(1), None);
    assert_eq!(policy.delay_before(2), Some(Duration::from_secs(1)));
    assert_eq!(policy.delay_before(3), Some(Duration::from_secs(2)));
    assert_eq!(policy.delay_before(4), None);
}

#[test]
fn given_exponential_policy_when_built_then_delays_double() {
    let policy = RetryPolicy::exponential(4, Duration::from_millis(500)).unwrap();

    assert_eq!(
        policy.backoff_delays(),
        &[
            Duration::from_millis(500),
            Duration::from_millis(1000),
            Duration::from_millis(2000)
        ]
    );
}

#[test]
fn given_no_retry_policy_when_inspected_then_single_attempt() {
    let policy = RetryPolicy::no_retry();

    assert_eq!(policy.max_attempts(), 1);
    assert!(policy.backoff_delays().is_empty());
}
