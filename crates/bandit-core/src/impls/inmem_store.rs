//! InMemoryStatsStore - プロセス内の統計ストア
//!
//! # 学習ポイント
//! - `Arc<tokio::sync::Mutex<_>>` による共有と排他制御
//! - Clone したハンドル同士が同じ状態を指す（複数 engine で 1 つの bandit を共有）
//! - ロック取得後は await しないので、キャンセルされても中途半端な更新は残らない

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Arm, ArmStats};
use crate::ports::{StatsStore, StoreError};

/// InMemoryStatsStore はメモリ上の StatsStore
///
/// # 使用例
/// ```ignore
/// let store = InMemoryStatsStore::new(3);
/// let a = BanditEngine::builder(config.clone()).store(store.clone()).build()?;
/// let b = BanditEngine::builder(config).store(store).build()?;
/// // a と b は同じ統計を読み書きする
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStatsStore {
    arms: usize,
    stats: Arc<Mutex<Vec<ArmStats>>>,
}

impl InMemoryStatsStore {
    /// 全アーム count 0 で作成
    pub fn new(arms: usize) -> Self {
        Self::from_stats(vec![ArmStats::default(); arms])
    }

    /// 任意の統計から作成（診断・テスト用）
    pub fn from_stats(stats: Vec<ArmStats>) -> Self {
        Self {
            arms: stats.len(),
            stats: Arc::new(Mutex::new(stats)),
        }
    }

    fn check(&self, arm: Arm) -> Result<(), StoreError> {
        if arm >= self.arms {
            return Err(StoreError::ArmOutOfRange {
                arm,
                arms: self.arms,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    fn arms(&self) -> usize {
        self.arms
    }

    async fn load(&self) -> Result<Vec<ArmStats>, StoreError> {
        Ok(self.stats.lock().await.clone())
    }

    async fn get(&self, arm: Arm) -> Result<ArmStats, StoreError> {
        self.check(arm)?;
        Ok(self.stats.lock().await[arm])
    }

    async fn compare_and_set(
        &self,
        arm: Arm,
        expected: ArmStats,
        new: ArmStats,
    ) -> Result<bool, StoreError> {
        self.check(arm)?;
        let mut stats = self.stats.lock().await;
        if stats[arm] != expected {
            return Ok(false);
        }
        stats[arm] = new;
        Ok(true)
    }

    /// ロック 1 回で read-modify-write する（CAS ループは不要）
    async fn record(&self, arm: Arm, reward: f64) -> Result<ArmStats, StoreError> {
        self.check(arm)?;
        let mut stats = self.stats.lock().await;
        stats[arm].observe(reward);
        Ok(stats[arm])
    }
}
