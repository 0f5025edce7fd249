//! TimeoutStore - 操作ごとに期限を設けるデコレータ
//!
//! 内側の store が詰まった場合、期限切れで `StoreError::Timeout` を返します。
//! 期限切れの future は drop されるので、内側が commit 前ならば何も残りません。

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Arm, ArmStats};
use crate::ports::{StatsStore, StoreError};

#[derive(Debug, Clone)]
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: StatsStore> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl<S: StatsStore> StatsStore for TimeoutStore<S> {
    fn arms(&self) -> usize {
        self.inner.arms()
    }

    async fn load(&self) -> Result<Vec<ArmStats>, StoreError> {
        self.bounded(self.inner.load()).await
    }

    async fn get(&self, arm: Arm) -> Result<ArmStats, StoreError> {
        self.bounded(self.inner.get(arm)).await
    }

    async fn compare_and_set(
        &self,
        arm: Arm,
        expected: ArmStats,
        new: ArmStats,
    ) -> Result<bool, StoreError> {
        self.bounded(self.inner.compare_and_set(arm, expected, new))
            .await
    }

    async fn record(&self, arm: Arm, reward: f64) -> Result<ArmStats, StoreError> {
        self.bounded(self.inner.record(arm, reward)).await
    }
}
