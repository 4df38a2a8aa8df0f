//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as per-worker deadlines and the progress tick period.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-worker deadline (120 000 ms)
pub const DEFAULT_WORKER_DEADLINE: Duration = Duration::from_secs(120);

/// Default period between progress snapshots
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// What happens to an in-flight call once its deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutPolicy {
    /// Stop waiting but let the request run to completion in the background.
    #[default]
    Detach,
    /// Stop waiting and abort the request.
    Abort,
}

impl std::str::FromStr for TimeoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detach" => Ok(TimeoutPolicy::Detach),
            "abort" => Ok(TimeoutPolicy::Abort),
            other => Err(format!(
                "Unknown timeout policy: {}. Valid: detach, abort",
                other
            )),
        }
    }
}

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// How long each worker may take before it is marked timed out.
    pub worker_deadline: Duration,
    /// Period of the progress snapshot timer.
    pub progress_interval: Duration,
    /// Optional deadline for the judge call (none by default).
    pub judge_timeout: Option<Duration>,
    pub timeout_policy: TimeoutPolicy,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            worker_deadline: DEFAULT_WORKER_DEADLINE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            judge_timeout: None,
            timeout_policy: TimeoutPolicy::Detach,
        }
    }
}

impl BehaviorConfig {
    pub fn with_worker_deadline(mut self, deadline: Duration) -> Self {
        self.worker_deadline = deadline;
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Creates a judge deadline from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, the judge is awaited without a deadline.
    pub fn with_judge_timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.judge_timeout = seconds.map(Duration::from_secs);
        self
    }

    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }
}
