//! Bounded retry around a delivery operation.

use std::future::Future;

use runaudit_core::RetryPolicy;

/// Run `op` under the policy's fixed backoff schedule.
///
/// The first attempt runs immediately. After a failure, if delays remain,
/// a retry notice is logged, the next delay is consumed from the front of
/// the schedule, and the operation runs again. When the schedule is
/// exhausted the last attempt's error is returned unchanged — the
/// controller never substitutes an error of its own.
pub async fn with_retry<F, Fut, E>(policy: &RetryPolicy, mut op: F) -> Result<(), E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    let mut last_err = match op().await {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };

    for (i, delay) in policy.delays().iter().enumerate() {
        tracing::info!(
            attempt = i + 2,
            max_attempts = policy.max_attempts(),
            delay_secs = delay.as_secs(),
            error = %last_err,
            "delivery failed, retrying"
        );
        tokio::time::sleep(*delay).await;

        match op().await {
            Ok(()) => return Ok(()),
            Err(err) => last_err = err,
        }
    }

    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn fail_twice_then_succeed_makes_three_attempts() {
        let policy = RetryPolicy::default();
        let attempts = Cell::new(0u32);
        let started = Instant::now();

        with_retry(&policy, || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move {
                if n <= 2 {
                    Err(format!("attempt {n} failed"))
                } else {
                    Ok(())
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(attempts.get(), 3);
        // Two sleeps consumed: 1s + 3s.
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_returns_the_last_error_after_four_attempts() {
        let policy = RetryPolicy::default();
        let attempts = Cell::new(0u32);
        let started = Instant::now();

        let err = with_retry(&policy, || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move { Err::<(), _>(format!("attempt {n} failed")) }
        })
        .await
        .unwrap_err();

        assert_eq!(attempts.get(), 4);
        assert_eq!(err, "attempt 4 failed");
        // Full schedule consumed: 1s + 3s + 5s.
        assert_eq!(started.elapsed(), Duration::from_secs(9));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_success_sleeps_never() {
        let policy = RetryPolicy::default();
        let attempts = Cell::new(0u32);
        let started = Instant::now();

        with_retry(&policy, || {
            attempts.set(attempts.get() + 1);
            async { Ok::<_, String>(()) }
        })
        .await
        .unwrap();

        assert_eq!(attempts.get(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_policy_makes_a_single_attempt() {
        let policy = RetryPolicy::new(Vec::new());
        let attempts = Cell::new(0u32);

        let err = with_retry(&policy, || {
            attempts.set(attempts.get() + 1);
            async { Err::<(), _>("failed".to_string()) }
        })
        .await
        .unwrap_err();

        assert_eq!(attempts.get(), 1);
        assert_eq!(err, "failed");
    }
}
