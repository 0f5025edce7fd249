//! ArmStats - アームごとの統計値
//!
//! `count` は pull 回数、`value` は観測した報酬の移動平均（running average）です。
//! 更新は `observe()` だけが行います。

use serde::{Deserialize, Serialize};

/// Index of an arm, always in `[0, arms)`.
pub type Arm = usize;

/// ArmStats は 1 アーム分の統計
///
/// # 不変条件
/// - `count == 0` のとき `value` は初期値（0.0）のまま
/// - `value` はそれまでに観測した全報酬の算術平均
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmStats {
    pub count: u64,
    pub value: f64,
}

impl ArmStats {
    pub fn new(count: u64, value: f64) -> Self {
        Self { count, value }
    }

    /// 一度も pull されていないか
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 報酬を 1 件取り込んだ後の統計を返す（self は変更しない）
    ///
    /// `value * (n - 1) / n + reward / n` の形で計算する。
    /// `reward - value` は符号が逆で絶対値が大きいと無限大になるため使わない。
    /// 有限値の平均は必ず `[-f64::MAX, f64::MAX]` に収まるので、丸めで溢れた分は clamp する。
    pub fn observed(&self, reward: f64) -> Self {
        let count = self.count + 1;
        let n = count as f64;
        let value = (self.value * ((n - 1.0) / n) + reward / n).clamp(-f64::MAX, f64::MAX);
        Self { count, value }
    }

    /// 報酬を 1 件取り込む
    pub fn observe(&mut self, reward: f64) {
        *self = self.observed(reward);
    }
}

/// Sum of pulls across all arms.
pub fn total_pulls(stats: &[ArmStats]) -> u64 {
    stats.iter().map(|s| s.count).sum()
}
