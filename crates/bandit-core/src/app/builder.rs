//! EngineBuilder - BanditEngine の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンで ports の実装を差し替える
//! - 起動時検証（Fail-fast 設計）
//! - 何も指定しなければメモリ上の store と UCB1 で動く

use std::sync::Arc;

use tracing::info;

use crate::domain::{BanditConfig, BanditError, EngineId};
use crate::impls::InMemoryStatsStore;
use crate::policy::{ScoringPolicy, Ucb1};
use crate::ports::{RandomSource, SeededRandom, StatsStore, ThreadRandom};

use super::engine::BanditEngine;

/// EngineBuilder は BanditEngine を構築
///
/// # 使用例
/// ```ignore
/// let engine = BanditEngine::builder(BanditConfig::new(3))
///     .store(shared_store.clone())
///     .random(SeededRandom::new(42))
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - build() 時に config を検証する
/// - store のアーム数が config と一致しなければ Configuration エラー
pub struct EngineBuilder {
    config: BanditConfig,
    store: Option<Arc<dyn StatsStore>>,
    random: Option<Arc<dyn RandomSource>>,
    policy: Option<Arc<dyn ScoringPolicy>>,
}

impl EngineBuilder {
    pub fn new(config: BanditConfig) -> Self {
        Self {
            config,
            store: None,
            random: None,
            policy: None,
        }
    }

    /// 統計の保存先を指定（省略時は新しい InMemoryStatsStore）
    pub fn store<S: StatsStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// 乱数源を指定（省略時は seed があれば SeededRandom、なければ ThreadRandom）
    pub fn random<R: RandomSource + 'static>(mut self, random: R) -> Self {
        self.random = Some(Arc::new(random));
        self
    }

    /// warm phase の採点関数を指定（省略時は config.exploration の UCB1）
    pub fn policy<P: ScoringPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Some(Arc::new(policy));
        self
    }

    pub fn build(self) -> Result<BanditEngine, BanditError> {
        self.config.validate()?;
        let arms = self.config.arms;

        let store: Arc<dyn StatsStore> = match self.store {
            Some(store) => store,
            None => Arc::new(InMemoryStatsStore::new(arms)),
        };
        if store.arms() != arms {
            return Err(BanditError::configuration(format!(
                "store holds {} arms but config expects {arms}",
                store.arms()
            )));
        }

        let random: Arc<dyn RandomSource> = match (self.random, self.config.seed) {
            (Some(random), _) => random,
            (None, Some(seed)) => Arc::new(SeededRandom::new(seed)),
            (None, None) => Arc::new(ThreadRandom),
        };
        let policy: Arc<dyn ScoringPolicy> = match self.policy {
            Some(policy) => policy,
            None => Arc::new(Ucb1::new(self.config.exploration)),
        };

        let id = EngineId::generate();
        info!(
            engine_id = %id,
            arms,
            exploration = self.config.exploration,
            seeded = self.config.seed.is_some(),
            "bandit engine ready"
        );

        Ok(BanditEngine::from_parts(id, arms, store, random, policy))
    }
}
