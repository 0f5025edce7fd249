//! BanditEngine - select / reward の本体
//!
//! # 選択アルゴリズム（2 段階）
//! 1. **cold**: count 0 のアームがあればその中から選ぶ（1 本なら確定、複数なら一様ランダム）
//! 2. **warm**: 全アームを ScoringPolicy で採点し、最大スコアのアームを選ぶ（同点は一様ランダム）
//!
//! # 並行性
//! - engine 自体は状態を持たない（統計は StatsStore が正本）
//! - select は読むだけ、reward は store の原子的な record 1 回だけ
//! - store を共有する別 engine との間で select の線形化可能性は保証しない
//!   （cold phase で同じ空きアームを同時に選ぶことはあり得る）

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Arm, ArmStats, BanditConfig, BanditError, EngineId, Phase, total_pulls};
use crate::policy::ScoringPolicy;
use crate::ports::{RandomSource, StatsStore, StoreError};

use super::builder::EngineBuilder;
use super::status::EngineStatus;

/// 同点とみなすスコア差（相対）
const TIE_TOLERANCE: f64 = 1e-9;

pub struct BanditEngine {
    id: EngineId,
    arms: usize,
    store: Arc<dyn StatsStore>,
    random: Arc<dyn RandomSource>,
    policy: Arc<dyn ScoringPolicy>,
}

impl BanditEngine {
    /// メモリ上の store と UCB1 で engine を作成
    pub fn new(config: BanditConfig) -> Result<Self, BanditError> {
        EngineBuilder::new(config).build()
    }

    pub fn builder(config: BanditConfig) -> EngineBuilder {
        EngineBuilder::new(config)
    }

    pub(crate) fn from_parts(
        id: EngineId,
        arms: usize,
        store: Arc<dyn StatsStore>,
        random: Arc<dyn RandomSource>,
        policy: Arc<dyn ScoringPolicy>,
    ) -> Self {
        Self {
            id,
            arms,
            store,
            random,
            policy,
        }
    }

    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn arms(&self) -> usize {
        self.arms
    }

    /// 次に pull するアームを選ぶ
    ///
    /// 戻り値は常に `[0, arms)`。失敗するのは store が読めない場合のみ。
    pub async fn select(&self) -> Result<Arm, BanditError> {
        let stats = self.snapshot().await?;
        let phase = Phase::of(&stats);

        let candidates = match phase {
            Phase::Cold => empty_arms(&stats),
            Phase::Warm => self.best_arms(&stats),
        };
        let arm = self.pick(&candidates).ok_or_else(|| {
            StoreError::Corrupted(format!("no candidate arm among {} arms", stats.len()))
        })?;

        debug!(
            engine_id = %self.id,
            ?phase,
            arm,
            candidates = candidates.len(),
            "selected arm"
        );
        Ok(arm)
    }

    /// pull したアームの報酬を記録する
    ///
    /// # エラー
    /// - `InvalidArm`: arm が範囲外（状態は変わらない）
    /// - `InvalidReward`: NaN / 無限大（状態は変わらない）
    /// - `Storage`: store の失敗（store は何も commit していない）
    pub async fn reward(&self, arm: Arm, value: f64) -> Result<(), BanditError> {
        if arm >= self.arms {
            return Err(BanditError::InvalidArm {
                arm,
                arms: self.arms,
            });
        }
        if !value.is_finite() {
            return Err(BanditError::InvalidReward(value));
        }

        let updated = self.store.record(arm, value).await.inspect_err(|e| {
            warn!(engine_id = %self.id, arm, error = %e, "failed to record reward");
        })?;

        debug!(
            engine_id = %self.id,
            arm,
            reward = value,
            count = updated.count,
            value = updated.value,
            "recorded reward"
        );
        Ok(())
    }

    /// 各アームの pull 回数
    pub async fn counts(&self) -> Result<Vec<u64>, BanditError> {
        Ok(self.snapshot().await?.iter().map(|s| s.count).collect())
    }

    /// 各アームの統計
    pub async fn stats(&self) -> Result<Vec<ArmStats>, BanditError> {
        self.snapshot().await
    }

    pub async fn phase(&self) -> Result<Phase, BanditError> {
        Ok(Phase::of(&self.snapshot().await?))
    }

    pub async fn status(&self) -> Result<EngineStatus, BanditError> {
        let stats = self.snapshot().await?;
        Ok(EngineStatus::capture(self.id, &stats))
    }

    async fn snapshot(&self) -> Result<Vec<ArmStats>, BanditError> {
        let stats = self.store.load().await.inspect_err(|e| {
            warn!(engine_id = %self.id, error = %e, "failed to load arm statistics");
        })?;
        if stats.len() != self.arms {
            return Err(StoreError::Corrupted(format!(
                "expected {} arms, store returned {}",
                self.arms,
                stats.len()
            ))
            .into());
        }
        Ok(stats)
    }

    /// 最大スコアのアーム（同点はすべて）
    ///
    /// NaN は最低スコア扱い。最大値が無限大のときは許容差を使わず完全一致で比べる。
    /// stats が空でなければ結果も空にならない。
    fn best_arms(&self, stats: &[ArmStats]) -> Vec<Arm> {
        let total = total_pulls(stats);
        let scores: Vec<f64> = stats
            .iter()
            .map(|s| self.policy.score(s, total))
            .map(|score| if score.is_nan() { f64::NEG_INFINITY } else { score })
            .collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| is_tied(score, best))
            .map(|(arm, _)| arm)
            .collect()
    }

    /// 候補から 1 つ選ぶ（候補が空なら None）
    fn pick(&self, candidates: &[Arm]) -> Option<Arm> {
        match candidates {
            [] => None,
            [only] => Some(*only),
            _ => Some(candidates[self.random.pick(candidates.len()) % candidates.len()]),
        }
    }
}

fn is_tied(score: f64, best: f64) -> bool {
    if !best.is_finite() {
        return score == best;
    }
    score >= best - TIE_TOLERANCE * best.abs().max(1.0)
}

fn empty_arms(stats: &[ArmStats]) -> Vec<Arm> {
    stats
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_empty())
        .map(|(arm, _)| arm)
        .collect()
}
