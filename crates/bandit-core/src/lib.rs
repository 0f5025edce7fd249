//! bandit-core
//!
//! Multi-armed bandit decision engine.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ArmStats, Phase, BanditConfig, errors, EngineId）
//! - **ports**: 抽象化レイヤー（StatsStore, RandomSource）
//! - **impls**: ports の実装（InMemoryStatsStore, DelayedStore, TimeoutStore）
//! - **policy**: warm phase の採点関数（ScoringPolicy, Ucb1）
//! - **app**: engine 本体（BanditEngine, EngineBuilder, EngineStatus）
//!
//! # 使い方
//! ```ignore
//! let engine = BanditEngine::new(BanditConfig::new(3))?;
//! let arm = engine.select().await?;
//! // ... 現実世界で arm を pull ...
//! engine.reward(arm, 1.0).await?;
//! ```

pub mod app;
pub mod domain;
pub mod impls;
pub mod policy;
pub mod ports;

pub use app::{BanditEngine, EngineBuilder, EngineStatus};
pub use domain::{Arm, ArmStats, BanditConfig, BanditError, Phase};
pub use ports::{RandomSource, StatsStore, StoreError};
