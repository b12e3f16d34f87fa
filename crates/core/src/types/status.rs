//! Review status and moderation actions.
//!
//! Orders and pharmacists share one moderation workflow: the backend reports
//! a free-form status string and accepts an `approve` / `reject` action.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Moderation status reported by the backend.
///
/// Only `Pending` and `Approved` carry meaning for the console. Any other
/// value is preserved verbatim so it can be shown as-is. A record without a
/// status defaults to an empty `Other`, which offers no actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Other(String),
}

impl ReviewStatus {
    /// Whether approve/reject actions are offered for this record.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Other(s) => s,
        }
    }
}

impl Default for ReviewStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ReviewStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Pending" => Self::Pending,
            "Approved" => Self::Approved,
            _ => Self::Other(s),
        }
    }
}

impl From<ReviewStatus> for String {
    fn from(status: ReviewStatus) -> Self {
        match status {
            ReviewStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation action sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
