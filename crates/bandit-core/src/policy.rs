//! Scoring policy for the warm phase.
//!
//! 全アームが 1 回以上 pull された後、engine は各アームを採点して最大値を選びます。
//! 採点関数が満たすべき性質:
//! - 他を固定して平均報酬が上がればスコアも上がる（exploitation）
//! - 平均報酬を固定して、全体に対する pull 回数が少ないほどスコアが上がる（exploration）

use crate::domain::ArmStats;

/// ScoringPolicy は warm phase の採点関数
///
/// `stats.count >= 1` かつ `total_pulls >= stats.count` の状態でのみ呼ばれる。
pub trait ScoringPolicy: Send + Sync {
    fn score(&self, stats: &ArmStats, total_pulls: u64) -> f64;
}

/// UCB1: `value + sqrt(c * ln(total_pulls) / count)`
///
/// c = 2.0 で古典的な UCB1 と同じ。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ucb1 {
    exploration: f64,
}

impl Ucb1 {
    pub fn new(exploration: f64) -> Self {
        Self { exploration }
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }
}

impl Default for Ucb1 {
    fn default() -> Self {
        Self::new(crate::domain::DEFAULT_EXPLORATION)
    }
}

impl ScoringPolicy for Ucb1 {
    fn score(&self, stats: &ArmStats, total_pulls: u64) -> f64 {
        let count = stats.count.max(1) as f64;
        let total = total_pulls.max(1) as f64;
        stats.value + (self.exploration * total.ln() / count).sqrt()
    }
}
