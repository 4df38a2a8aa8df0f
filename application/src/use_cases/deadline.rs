//! Bounded-time execution of a single async call.

use crate::config::TimeoutPolicy;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why a bounded call did not produce a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeadlineError<E> {
    #[error("Timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("{0}")]
    Inner(E),

    #[error("Task panicked: {0}")]
    Panicked(String),
}

impl<E> DeadlineError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, DeadlineError::Timeout(_))
    }
}

/// Run `fut` on its own task and wait at most `deadline` for it.
///
/// The result is returned only if the task settles before the deadline.
/// On timeout the task is either left running ([`TimeoutPolicy::Detach`])
/// or aborted ([`TimeoutPolicy::Abort`]); either way the caller stops
/// waiting immediately.
pub async fn run_with_deadline<F, T, E>(
    fut: F,
    deadline: Duration,
    policy: TimeoutPolicy,
) -> Result<T, DeadlineError<E>>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let mut handle = tokio::spawn(fut);

    match tokio::time::timeout(deadline, &mut handle).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(e))) => Err(DeadlineError::Inner(e)),
        Ok(Err(join_err)) => Err(DeadlineError::Panicked(join_err.to_string())),
        Err(_) => {
            if policy == TimeoutPolicy::Abort {
                debug!("Aborting call after {:?}", deadline);
                handle.abort();
            }
            Err(DeadlineError::Timeout(deadline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_completes_before_deadline() {
        let result: Result<&str, DeadlineError<String>> = run_with_deadline(
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok("done")
            },
            Duration::from_millis(100),
            TimeoutPolicy::Detach,
        )
        .await;
        assert_eq!(result, Ok("done"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_inner_error_passes_through() {
        let result: Result<(), DeadlineError<String>> = run_with_deadline(
            async { Err("HTTP 500".to_string()) },
            Duration::from_secs(1),
            TimeoutPolicy::Detach,
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err, DeadlineError::Inner("HTTP 500".to_string()));
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_carries_deadline() {
        let result: Result<(), DeadlineError<String>> = run_with_deadline(
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(())
            },
            Duration::from_millis(250),
            TimeoutPolicy::Detach,
        )
        .await;
        let err = result.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err, DeadlineError::Timeout(Duration::from_millis(250)));
        assert_eq!(err.to_string(), "Timeout after 250ms");
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishing_exactly_at_deadline_times_out() {
        let result: Result<&str, DeadlineError<String>> = run_with_deadline(
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok("done")
            },
            Duration::from_millis(100),
            TimeoutPolicy::Detach,
        )
        .await;
        assert_eq!(result, Err(DeadlineError::Timeout(Duration::from_millis(100))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_call_keeps_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let result: Result<(), DeadlineError<String>> = run_with_deadline(
            async move {
                tokio::time::sleep(Duration::from_secs(2)).await;
                flag.store(true, Ordering::SeqCst);
                Ok(())
            },
            Duration::from_secs(1),
            TimeoutPolicy::Detach,
        )
        .await;
        assert!(result.unwrap_err().is_timeout());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_call_never_finishes() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let result: Result<(), DeadlineError<String>> = run_with_deadline(
            async move {
                tokio::time::sleep(Duration::from_secs(2)).await;
                flag.store(true, Ordering::SeqCst);
                Ok(())
            },
            Duration::from_secs(1),
            TimeoutPolicy::Abort,
        )
        .await;
        assert!(result.unwrap_err().is_timeout());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    async fn explode() -> Result<(), String> {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panic_is_reported() {
        let result: Result<(), DeadlineError<String>> = run_with_deadline(
            explode(),
            Duration::from_secs(1),
            TimeoutPolicy::Detach,
        )
        .await;
        assert!(matches!(result, Err(DeadlineError::Panicked(_))));
    }
}
