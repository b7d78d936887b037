//! Classification of dispatch responses.
//!
//! The dispatch endpoint answers with one `{status, ...}` object per
//! spreadsheet row. A row succeeded when its `status` is the string `"202"`.
//! Any response that is not an array is classified
//! [`SummaryKind::Unrecognized`] and counted as a success, since the request
//! itself went through.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::DispatchOutcome;

/// The status string the service reports for an accepted row.
pub const ACCEPTED_STATUS: &str = "202";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    AllSucceeded,
    PartialFailure,
    Unrecognized,
}

/// Tally of a dispatch response.
///
/// # Example
///
/// ```
/// use disparo::core::dispatch::{SummaryKind, aggregate};
/// use serde_json::json;
///
/// let summary = aggregate(&json!([{"status": "202"}, {"status": "202"}, {"status": "500"}]));
/// assert_eq!(summary.kind, SummaryKind::PartialFailure);
/// assert_eq!((summary.succeeded, summary.total, summary.failed()), (2, 3, 1));
/// assert_eq!(summary.to_string(), "2 messages sent, 1 failed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub kind: SummaryKind,
    pub succeeded: usize,
    pub total: usize,
}

impl Summary {
    fn from_counts(succeeded: usize, total: usize) -> Self {
        let kind = if succeeded == total {
            SummaryKind::AllSucceeded
        } else {
            SummaryKind::PartialFailure
        };
        Self {
            kind,
            succeeded,
            total,
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    /// `true` unless some rows failed. Unrecognized responses count as success.
    pub fn is_success(&self) -> bool {
        self.kind != SummaryKind::PartialFailure
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SummaryKind::AllSucceeded => write!(
                f,
                "All {} messages were dispatched successfully",
                self.succeeded
            ),
            SummaryKind::PartialFailure => write!(
                f,
                "{} messages sent, {} failed",
                self.succeeded,
                self.failed()
            ),
            SummaryKind::Unrecognized => write!(f, "Messages dispatched successfully"),
        }
    }
}

/// Tallies a raw dispatch response.
///
/// Elements without a string `status` count as failures; a numeric `202` is
/// not accepted.
pub fn aggregate(response: &Value) -> Summary {
    let Some(results) = response.as_array() else {
        tracing::warn!("dispatch response is not an array; treating it as success");
        return Summary {
            kind: SummaryKind::Unrecognized,
            succeeded: 0,
            total: 0,
        };
    };

    let succeeded = results
        .iter()
        .filter(|r| r.get("status").and_then(Value::as_str) == Some(ACCEPTED_STATUS))
        .count();

    let summary = Summary::from_counts(succeeded, results.len());
    tracing::debug!(
        succeeded = summary.succeeded,
        total = summary.total,
        "aggregated dispatch response"
    );
    summary
}

/// Tallies already-typed outcomes.
pub fn aggregate_outcomes(outcomes: &[DispatchOutcome]) -> Summary {
    let succeeded = outcomes
        .iter()
        .filter(|o| o.status == ACCEPTED_STATUS)
        .count();
    Summary::from_counts(succeeded, outcomes.len())
}
