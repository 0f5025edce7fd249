//! Ports - 抽象化レイヤー
//!
//! engine が外部に依存する部分（統計の保存先、乱数）を trait として定義します。
//! 実装の詳細は `impls` か、別クレートに置きます。
//!
//! # 設計原則
//! - 統計の正本は store 側（engine はスナップショットを読むだけ）
//! - 更新は store の原子的な read-modify-write に任せる
//! - 乱数は注入する（テストで決定的にするため）

pub mod random;
pub mod stats_store;

pub use self::random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use self::stats_store::{CAS_MAX_ATTEMPTS, StatsStore};
pub use crate::domain::StoreError;
