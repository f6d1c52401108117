//! One-shot fill acknowledgment for a newly active stage

use chrono::{DateTime, Duration, Utc};

use crate::schemas::Stage;

/// Transient highlight on the stage that just became active.
///
/// Purely presentational: it is derived from observed stage changes and
/// expires on its own. Nothing in the transition path waits for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillFlash {
    pub stage: Stage,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl FillFlash {
    pub fn start(stage: Stage, now: DateTime<Utc>, duration: Duration) -> Self {
        FillFlash {
            stage,
            started_at: now,
            duration,
        }
    }

    /// Whether the highlight is still showing at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now >= self.started_at && now < self.started_at + self.duration
    }

    /// The highlighted stage, if the flash has not expired
    pub fn active_stage(&self, now: DateTime<Utc>) -> Option<Stage> {
        self.is_active(now).then_some(self.stage)
    }
}
