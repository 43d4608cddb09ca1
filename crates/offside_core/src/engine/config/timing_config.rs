use serde::{Deserialize, Serialize};

use super::ensure_positive;
use crate::error::Result;

/// Engine-timed pauses, counted in ticks so a headless run can drive them
/// synchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Ticks the match stays in `GoalScored` before kicking off again
    pub goal_pause_ticks: u32,
    /// When set, an offside call resumes itself after this many ticks
    pub offside_auto_resume_ticks: Option<u32>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { goal_pause_ticks: 60, offside_auto_resume_ticks: None }
    }
}

impl TimingConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(ticks) = self.offside_auto_resume_ticks {
            ensure_positive("timing.offside_auto_resume_ticks", ticks as f32)?;
        }
        Ok(())
    }
}
