//! App - アプリケーション層
//!
//! ports を組み合わせて bandit の select / reward を実装します。
//!
//! # 主要コンポーネント
//! - **EngineBuilder**: engine の構築とワイヤリング
//! - **BanditEngine**: select / reward 本体
//! - **EngineStatus**: 診断用のスナップショット

pub mod builder;
pub mod engine;
pub mod status;

pub use self::builder::EngineBuilder;
pub use self::engine::BanditEngine;
pub use self::status::{ArmStatus, EngineStatus};
