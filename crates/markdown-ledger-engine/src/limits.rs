use serde::{Deserialize, Serialize};

/// How submissions treat positions past the end of the committed content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionPolicy {
    /// Accept any position and clamp it to the snapshot at commit time.
    #[default]
    Clamp,
    /// Reject positions beyond the committed length with `OutOfRange`.
    Reject,
}

/// Per-document validation limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Longest text a single insert may carry, in bytes. `None` is unlimited.
    pub max_text_len: Option<usize>,
    pub positions: PositionPolicy,
}

impl Limits {
    pub fn with_max_text_len(mut self, max: usize) -> Self {
        self.max_text_len = Some(max);
        self
    }

    pub fn with_positions(mut self, policy: PositionPolicy) -> Self {
        self.positions = policy;
        self
    }
}
