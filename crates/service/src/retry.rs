use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::errors::ClientError;

/// Backoff policy for idempotent reads. Disabled unless configured: by
/// default every failure surfaces on the first attempt.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
    backoff_max: Duration,
    enabled: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self { Self::disabled() }
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        backoff_base: Duration,
        backoff_max: Duration,
        enabled: bool,
    ) -> Self {
        Self { max_attempts, backoff_base, backoff_max, enabled }
    }

    pub fn disabled() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO, false)
    }

    pub fn from_config(cfg: &configs::RetryConfig) -> Self {
        Self::new(cfg.max_attempts, cfg.backoff_base(), cfg.backoff_max(), cfg.enabled)
    }

    pub fn is_enabled(&self) -> bool { self.enabled }

    pub fn max_attempts(&self) -> u32 {
        if self.enabled { self.max_attempts.max(1) } else { 1 }
    }

    /// Delay before retry number `attempt` (1-based): base * 2^(attempt-1), capped.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        if !self.enabled || attempt == 0 {
            return Duration::ZERO;
        }
        let factor = 2_u32.saturating_pow(attempt - 1);
        self.backoff_base.saturating_mul(factor).min(self.backoff_max)
    }

    pub async fn wait_before_retry(&self, attempt: u32) {
        let backoff = self.backoff_for(attempt);
        if backoff.is_zero() {
            return;
        }
        debug!(?backoff, attempt, "retrying");
        sleep(backoff).await;
    }

    /// Whether a failed attempt number `attempt` (1-based) should be followed by another.
    pub fn should_retry(&self, attempt: u32, error: &ClientError) -> bool {
        if !self.enabled {
            return false;
        }
        if attempt >= self.max_attempts() {
            debug!(max_attempts = self.max_attempts, "max retry attempts reached");
            return false;
        }
        if error.is_retryable() {
            true
        } else {
            warn!(error = %error, "error is not retryable");
            false
        }
    }
}

/// Run `operation` until it succeeds, fails permanently, or attempts run out.
///
/// `is_transient` flags successful outputs that still deserve another try
/// (a 503 answer, say); on the last attempt such an output is returned as is.
pub async fn retry_with_policy<F, Fut, T, C>(
    policy: &RetryPolicy,
    mut operation: F,
    is_transient: C,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ClientError>>,
    C: Fn(&T) -> bool,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;
    loop {
        if attempt > 0 {
            policy.wait_before_retry(attempt).await;
            crate::observability::RETRIES_TOTAL.inc();
        }
        attempt += 1;
        match operation().await {
            Ok(result) if attempt < max_attempts && is_transient(&result) => {
                warn!(attempt, "transient answer; retrying");
            }
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(error) => {
                if policy.should_retry(attempt, &error) {
                    warn!(attempt, error = %error, "attempt failed");
                    continue;
                }
                return Err(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn enabled(max: u32) -> RetryPolicy {
        RetryPolicy::new(max, Duration::from_millis(1), Duration::from_millis(5), true)
    }

    #[tokio::test]
    async fn succeeds_first_try() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let result = retry_with_policy(&enabled(3), || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<i32, ClientError>(42)
            }
        }, |_| false)
        .await;
        assert_eq!(result, Ok(42));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let result = retry_with_policy(&enabled(3), || {
            let c = c.clone();
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ClientError::Transport("connection reset".into()))
                } else {
                    Ok(7)
                }
            }
        }, |_| false)
        .await;
        assert_eq!(result, Ok(7));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_at_max_attempts() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let result = retry_with_policy(&enabled(2), || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(ClientError::RequestFailed { status: 503, message: "busy".into() })
            }
        }, |_| false)
        .await;
        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disabled_policy_makes_one_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let result = retry_with_policy(&RetryPolicy::disabled(), || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(ClientError::Transport("down".into()))
            }
        }, |_| false)
        .await;
        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let _ = retry_with_policy(&enabled(5), || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(ClientError::RequestFailed { status: 400, message: "bad".into() })
            }
        }, |_| false)
        .await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_output_retried_then_returned() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let result = retry_with_policy(&enabled(3), || {
            let c = c.clone();
            async move { Ok::<u32, ClientError>(c.fetch_add(1, Ordering::SeqCst)) }
        }, |n| *n < 10)
        .await;
        // every answer looks transient; the third is handed back unchanged
        assert_eq!(result, Ok(2));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let p = RetryPolicy::new(5, Duration::from_millis(100), Duration::from_millis(350), true);
        assert_eq!(p.backoff_for(1), Duration::from_millis(100));
        assert_eq!(p.backoff_for(2), Duration::from_millis(200));
        assert_eq!(p.backoff_for(3), Duration::from_millis(350));
        assert_eq!(RetryPolicy::disabled().backoff_for(3), Duration::ZERO);
    }
}
