//! Phase - エンジンの状態
//!
//! # 状態遷移
//! - cold: まだ一度も pull されていないアームがある
//! - warm: 全アームが 1 回以上 pull 済み
//!
//! cold -> warm の一方向のみ。count は減らないので warm から戻ることはない。

use serde::{Deserialize, Serialize};

use super::stats::ArmStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Cold,
    Warm,
}

impl Phase {
    /// 統計のスナップショットから現在の Phase を判定
    pub fn of(stats: &[ArmStats]) -> Self {
        if stats.iter().any(ArmStats::is_empty) {
            Phase::Cold
        } else {
            Phase::Warm
        }
    }
}
