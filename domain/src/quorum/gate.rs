//! Quorum gate: have enough workers succeeded for the judge to run?

use serde::{Deserialize, Serialize};

/// Decides the minimum number of successful workers for a worker count.
///
/// | workers | required | majority description |
/// |---------|----------|----------------------|
/// | 3       | 2        | `"2"`                |
/// | 5       | 4        | `"3 or 4"`           |
/// | n       | ceil(n/2)| `ceil(n/2)`          |
///
/// The 5-worker threshold is deliberately 4, not a simple majority.
///
/// # Example
///
/// ```
/// use godel_domain::quorum::QuorumGate;
///
/// let gate = QuorumGate::new(5);
/// assert_eq!(gate.min_required(), 4);
/// assert!(!gate.evaluate(3).is_met());
/// assert!(gate.evaluate(4).is_met());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumGate {
    worker_count: usize,
}

impl QuorumGate {
    pub fn new(worker_count: usize) -> Self {
        Self { worker_count }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Minimum successful workers needed before the judge is invoked
    pub fn min_required(&self) -> usize {
        match self.worker_count {
            3 => 2,
            5 => 4,
            n => n.div_ceil(2),
        }
    }

    /// How the judge prompt phrases "a majority" for this worker count
    pub fn majority_description(&self) -> String {
        match self.worker_count {
            3 => "2".to_string(),
            5 => "3 or 4".to_string(),
            n => n.div_ceil(2).to_string(),
        }
    }

    /// Evaluate the gate for a number of successful workers
    pub fn evaluate(&self, succeeded: usize) -> QuorumVerdict {
        let required = self.min_required();
        if succeeded >= required {
            QuorumVerdict::Met {
                required,
                received: succeeded,
            }
        } else {
            QuorumVerdict::NotMet {
                required,
                received: succeeded,
            }
        }
    }
}

/// Outcome of [`QuorumGate::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuorumVerdict {
    Met { required: usize, received: usize },
    NotMet { required: usize, received: usize },
}

impl QuorumVerdict {
    pub fn is_met(&self) -> bool {
        matches!(self, QuorumVerdict::Met { .. })
    }

    pub fn required(&self) -> usize {
        match self {
            QuorumVerdict::Met { required, .. } | QuorumVerdict::NotMet { required, .. } => {
                *required
            }
        }
    }

    pub fn received(&self) -> usize {
        match self {
            QuorumVerdict::Met { received, .. } | QuorumVerdict::NotMet { received, .. } => {
                *received
            }
        }
    }
}
