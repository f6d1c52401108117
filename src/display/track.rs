//! Stage track view model
//!
//! Derives everything the progress track shows from the ticket's stage and
//! the viewer's role. The stage is the only input; nothing here is stored.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{is_affordant, STAGES, STAGE_COUNT};
use crate::schemas::{Role, Stage};

use super::flash::FillFlash;

/// How a stage position relates to the active stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    Completed,
    Active,
    Upcoming,
}

/// One stage marker on the track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagePosition {
    #[serde(rename = "index")]
    pub stage: Stage,
    pub label: &'static str,
    pub status: PositionStatus,
    /// Accepts clicks from the current role
    pub affordant: bool,
    /// Showing the one-shot fill highlight
    pub flashing: bool,
}

/// Everything needed to draw the progress track for one viewer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTrackView {
    pub role: Role,
    #[serde(rename = "stage_index")]
    pub current: Stage,
    /// Share of the connector that is filled, from 0.0 to 1.0
    pub fill_ratio: f64,
    pub positions: Vec<StagePosition>,
}

impl StageTrackView {
    pub fn build(
        current: Stage,
        role: Role,
        flash: Option<&FillFlash>,
        now: DateTime<Utc>,
    ) -> Self {
        let flashing_stage = flash.and_then(|f| f.active_stage(now));

        let positions = STAGES
            .iter()
            .map(|&stage| {
                let status = match stage.cmp(&current) {
                    std::cmp::Ordering::Less => PositionStatus::Completed,
                    std::cmp::Ordering::Equal => PositionStatus::Active,
                    std::cmp::Ordering::Greater => PositionStatus::Upcoming,
                };
                StagePosition {
                    stage,
                    label: stage.label(),
                    status,
                    affordant: is_affordant(role, current, stage),
                    flashing: status == PositionStatus::Active && flashing_stage == Some(stage),
                }
            })
            .collect();

        StageTrackView {
            role,
            current,
            fill_ratio: current.index() as f64 / (STAGE_COUNT - 1) as f64,
            positions,
        }
    }

    /// Stages the viewer can click
    pub fn affordant_stages(&self) -> Vec<Stage> {
        self.positions
            .iter()
            .filter(|p| p.affordant)
            .map(|p| p.stage)
            .collect()
    }

    /// Whether the active position is showing its fill highlight
    pub fn is_flashing(&self) -> bool {
        self.positions.iter().any(|p| p.flashing)
    }

    pub fn active_label(&self) -> &'static str {
        self.current.label()
    }
}
