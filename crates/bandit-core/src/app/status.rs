//! Status - 診断用スナップショット
//!
//! engine の統計を serde でそのまま出力できる形にまとめます。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Arm, ArmStats, EngineId, Phase, total_pulls};

/// Serializable diagnostics view of an engine's statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub engine_id: EngineId,
    pub phase: Phase,
    pub total_pulls: u64,
    pub captured_at: DateTime<Utc>,
    pub arms: Vec<ArmStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmStatus {
    pub arm: Arm,
    pub count: u64,
    pub value: f64,
}

impl EngineStatus {
    pub fn capture(engine_id: EngineId, stats: &[ArmStats]) -> Self {
        Self {
            engine_id,
            phase: Phase::of(stats),
            total_pulls: total_pulls(stats),
            captured_at: Utc::now(),
            arms: stats
                .iter()
                .enumerate()
                .map(|(arm, s)| ArmStatus {
                    arm,
                    count: s.count,
                    value: s.value,
                })
                .collect(),
        }
    }

    pub fn counts(&self) -> Vec<u64> {
        self.arms.iter().map(|a| a.count).collect()
    }

    /// Most-pulled arm; the lowest index wins a tie.
    pub fn leader(&self) -> Option<Arm> {
        self.arms
            .iter()
            .max_by(|a, b| a.count.cmp(&b.count).then(b.arm.cmp(&a.arm)))
            .map(|a| a.arm)
    }
}
