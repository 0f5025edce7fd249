//! Errors - エラー型と分類
//!
//! 呼び出し側に返すエラーはすべて `BanditError` です。
//! engine 内でリトライはしません（リトライ方針は store か呼び出し側が持つ）。

use std::time::Duration;

use thiserror::Error;

use super::stats::Arm;

/// ErrorKind はエラーの運用分類
///
/// - Configuration: 構築時の設定エラー（致命的、engine は作れない）
/// - Caller: 呼び出し側の入力ミス（状態は変わっていない、修正して再試行可能）
/// - Infrastructure: store の障害（状態は変わっていない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Caller,
    Infrastructure,
}

/// StoreError は StatsStore 実装が返すエラー（engine では `BanditError::Storage` に包む）
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("compare-and-set on arm {arm} lost {attempts} times in a row")]
    Contention { arm: Arm, attempts: u32 },

    #[error("arm {arm} is out of range for a store with {arms} arms")]
    ArmOutOfRange { arm: Arm, arms: usize },

    #[error("store state is corrupted: {0}")]
    Corrupted(String),
}

#[derive(Debug, Error)]
pub enum BanditError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid arm {arm}: expected an index in [0, {arms})")]
    InvalidArm { arm: Arm, arms: usize },

    #[error("reward must be a finite number, got {0}")]
    InvalidReward(f64),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl BanditError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InvalidArm { .. } | Self::InvalidReward(_) => ErrorKind::Caller,
            Self::Storage(_) => ErrorKind::Infrastructure,
        }
    }
}
