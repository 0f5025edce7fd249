//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryStatsStore**: プロセス内の統計ストア（Clone で共有可能）
//! - **DelayedStore**: 遅延注入デコレータ（共有ストアの模擬）
//! - **TimeoutStore**: 期限付きデコレータ（詰まった store を StorageError にする）
//!
//! # 本番用実装
//! Redis などの共有ストアは別クレートで `StatsStore` を実装します。

pub mod delayed;
pub mod inmem_store;
pub mod timeout;

pub use self::delayed::DelayedStore;
pub use self::inmem_store::InMemoryStatsStore;
pub use self::timeout::TimeoutStore;
