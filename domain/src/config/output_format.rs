//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for a judged submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full report: header, optional prelude and the judge's synthesis (default)
    #[default]
    Report,
    /// Only the judge's synthesized text
    Judge,
    /// JSON output
    Json,
}
