//! DelayedStore - 遅延を注入するデコレータ
//!
//! ネットワーク越しの共有ストアを模擬するため、各操作の前に固定の遅延を入れます。
//! 遅延は内側の store を呼ぶ前なので、途中でキャンセルされても何も書き込まれません。

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Arm, ArmStats};
use crate::ports::{StatsStore, StoreError};

#[derive(Debug, Clone)]
pub struct DelayedStore<S> {
    inner: S,
    delay: Duration,
}

impl<S: StatsStore> DelayedStore<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl<S: StatsStore> StatsStore for DelayedStore<S> {
    fn arms(&self) -> usize {
        self.inner.arms()
    }

    async fn load(&self) -> Result<Vec<ArmStats>, StoreError> {
        self.pause().await;
        self.inner.load().await
    }

    async fn get(&self, arm: Arm) -> Result<ArmStats, StoreError> {
        self.pause().await;
        self.inner.get(arm).await
    }

    async fn compare_and_set(
        &self,
        arm: Arm,
        expected: ArmStats,
        new: ArmStats,
    ) -> Result<bool, StoreError> {
        self.pause().await;
        self.inner.compare_and_set(arm, expected, new).await
    }

    async fn record(&self, arm: Arm, reward: f64) -> Result<ArmStats, StoreError> {
        self.pause().await;
        self.inner.record(arm, reward).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryStatsStore;
    use std::time::Instant;

    #[tokio::test]
    async fn operations_wait_for_the_delay() {
        let store = DelayedStore::new(InMemoryStatsStore::new(2), Duration::from_millis(30));
        let start = Instant::now();
        store.record(0, 1.0).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(store.inner().get(0).await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn zero_delay_passes_through() {
        let store = DelayedStore::new(InMemoryStatsStore::new(1), Duration::ZERO);
        assert_eq!(store.arms(), 1);
        store.record(0, 0.25).await.unwrap();
        assert_eq!(store.load().await.unwrap(), vec![ArmStats::new(1, 0.25)]);
    }
}
