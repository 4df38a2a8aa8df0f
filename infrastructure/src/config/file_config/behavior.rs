//! Timing behavior from TOML (`[behavior]` section)

use godel_application::{BehaviorConfig, TimeoutPolicy};
use godel_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Per-worker deadline in seconds
    pub worker_timeout_secs: u64,
    /// Period of the progress snapshot timer in milliseconds
    pub progress_interval_ms: u64,
    /// Judge deadline in seconds (unbounded when unset)
    pub judge_timeout_secs: Option<u64>,
    /// "detach" or "abort"
    pub timeout_policy: String,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            worker_timeout_secs: 120,
            progress_interval_ms: 1000,
            judge_timeout_secs: None,
            timeout_policy: "detach".to_string(),
        }
    }
}

impl FileBehaviorConfig {
    /// Parse the timeout policy, falling back to `detach` with a warning.
    pub fn parse_timeout_policy(&self) -> (TimeoutPolicy, Vec<ConfigIssue>) {
        match self.timeout_policy.parse() {
            Ok(policy) => (policy, vec![]),
            Err(_) => (
                TimeoutPolicy::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "behavior.timeout_policy".to_string(),
                        value: self.timeout_policy.clone(),
                        valid_values: vec!["detach".to_string(), "abort".to_string()],
                    },
                    format!(
                        "behavior.timeout_policy: unknown value '{}', falling back to 'detach'",
                        self.timeout_policy
                    ),
                )],
            ),
        }
    }

    /// Zero durations that would make every call time out immediately
    pub fn duration_issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let fields = [
            ("behavior.worker_timeout_secs", Some(self.worker_timeout_secs)),
            ("behavior.progress_interval_ms", Some(self.progress_interval_ms)),
            ("behavior.judge_timeout_secs", self.judge_timeout_secs),
        ];
        for (field, value) in fields {
            if value == Some(0) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroDuration {
                        field: field.to_string(),
                    },
                    format!("{field} cannot be 0"),
                ));
            }
        }
        issues
    }

    /// Convert into the application's behavior settings
    pub fn to_behavior_config(&self) -> (BehaviorConfig, Vec<ConfigIssue>) {
        let (policy, issues) = self.parse_timeout_policy();
        let config = BehaviorConfig::default()
            .with_worker_deadline(Duration::from_secs(self.worker_timeout_secs))
            .with_progress_interval(Duration::from_millis(self.progress_interval_ms))
            .with_judge_timeout_seconds(self.judge_timeout_secs)
            .with_timeout_policy(policy);
        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_default_matches_application_default() {
        let (config, issues) = FileBehaviorConfig::default().to_behavior_config();
        let expected = BehaviorConfig::default();
        assert!(issues.is_empty());
        assert_eq!(config.worker_deadline, expected.worker_deadline);
        assert_eq!(config.progress_interval, expected.progress_interval);
        assert_eq!(config.judge_timeout, None);
        assert_eq!(config.timeout_policy, TimeoutPolicy::Detach);
    }

    #[test]
    fn test_behavior_deserialize() {
        let toml_str = r#"
[behavior]
worker_timeout_secs = 30
judge_timeout_secs = 300
timeout_policy = "abort"
"#;
        let file: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let (config, issues) = file.behavior.to_behavior_config();
        assert!(issues.is_empty());
        assert_eq!(config.worker_deadline, Duration::from_secs(30));
        assert_eq!(config.judge_timeout, Some(Duration::from_secs(300)));
        assert_eq!(config.timeout_policy, TimeoutPolicy::Abort);
    }

    #[test]
    fn test_unknown_policy_warns_and_falls_back() {
        let config = FileBehaviorConfig {
            timeout_policy: "cancel".to_string(),
            ..Default::default()
        };
        let (policy, issues) = config.parse_timeout_policy();
        assert_eq!(policy, TimeoutPolicy::Detach);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::InvalidEnumValue { field, .. } if field == "behavior.timeout_policy"
        ));
    }

    #[test]
    fn test_zero_durations_are_errors() {
        let config = FileBehaviorConfig {
            worker_timeout_secs: 0,
            judge_timeout_secs: Some(0),
            ..Default::default()
        };
        let issues = config.duration_issues();
        assert_eq!(issues.len(), 2);
        assert!(ConfigIssue::has_errors(&issues));
    }
}
