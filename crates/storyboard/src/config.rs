//! Session configuration.

use serde::Deserialize;

/// Default loosely-enforced cap on frames returned per session.
pub const DEFAULT_FRAME_BUDGET: usize = 50;

/// Tunables for a sampling session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Approximate upper bound on total extracted frames. Enforced through
    /// fragment sub-sampling, not exact truncation, so the result can
    /// overshoot.
    pub frame_budget: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_budget: DEFAULT_FRAME_BUDGET,
        }
    }
}
