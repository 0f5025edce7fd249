//! StatsStore port - アーム統計の保存先
//!
//! engine は統計を自分で持たず、この trait 越しに読み書きします。
//! 実装はメモリでもネットワーク越しの共有ストアでも構いません。
//!
//! # 実装
//! - **InMemoryStatsStore**: プロセス内（`impls::inmem_store`）
//! - **DelayedStore / TimeoutStore**: 任意の store を包むデコレータ

use async_trait::async_trait;

use crate::domain::{Arm, ArmStats, StoreError};

/// `record()` のデフォルト実装が compare-and-set を試す最大回数
pub const CAS_MAX_ATTEMPTS: u32 = 16;

/// StatsStore はアームごとの `ArmStats` の正本（source of truth）
///
/// # 設計原則
/// - `record()` は 1 回の原子的な read-modify-write（同じアームへの同時 record で更新が消えない）
/// - 失敗した操作は何も書き込まない（write-then-commit）
/// - 複数の engine から共有される前提なので `Send + Sync`
///
/// ネイティブな原子的インクリメントを持たない store は `get` と
/// `compare_and_set` だけ実装すれば、`record` は CAS ループで動きます。
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// 管理しているアーム数
    fn arms(&self) -> usize;

    /// 全アームのスナップショット（長さは `arms()`）
    async fn load(&self) -> Result<Vec<ArmStats>, StoreError>;

    /// 1 アーム分の統計
    async fn get(&self, arm: Arm) -> Result<ArmStats, StoreError>;

    /// 現在値が `expected` と等しい場合に限り `new` を書き込む
    ///
    /// 書き込めたら `Ok(true)`、他の書き込みに負けたら `Ok(false)`。
    async fn compare_and_set(
        &self,
        arm: Arm,
        expected: ArmStats,
        new: ArmStats,
    ) -> Result<bool, StoreError>;

    /// 報酬を 1 件記録し、更新後の統計を返す
    async fn record(&self, arm: Arm, reward: f64) -> Result<ArmStats, StoreError> {
        for _ in 0..CAS_MAX_ATTEMPTS {
            let current = self.get(arm).await?;
            let next = current.observed(reward);
            if self.compare_and_set(arm, current, next).await? {
                return Ok(next);
            }
        }
        Err(StoreError::Contention {
            arm,
            attempts: CAS_MAX_ATTEMPTS,
        })
    }
}
