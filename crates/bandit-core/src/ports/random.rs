//! RandomSource port - 乱数の抽象化
//!
//! 空きアームや同点アームからの一様選択に使います。
//! グローバルな乱数生成器を直接使わず注入することで、テストでは決定的にできます。
//!
//! # 実装
//! - **ThreadRandom**: `rand::thread_rng()`（本番用）
//! - **SeededRandom**: シード固定の `StdRng`（再現実験用）
//! - **ScriptedRandom**: 決められた順に index を返す（テスト用）

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RandomSource は `[0, n)` から一様に 1 つ選ぶ
///
/// # 事前条件
/// - `n >= 1`（engine は空の候補集合で呼ばない）
pub trait RandomSource: Send + Sync {
    fn pick(&self, n: usize) -> usize;
}

/// thread local な RNG を使う RandomSource
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, n: usize) -> usize {
        rand::thread_rng().gen_range(0..n)
    }
}

/// シードから決定的な列を生成する RandomSource
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, n: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..n)
    }
}

/// 台本どおりの index を循環して返す RandomSource
///
/// 返す値は `script[i] % n`。台本が空なら常に 0。
#[derive(Debug)]
pub struct ScriptedRandom {
    script: Vec<usize>,
    cursor: Mutex<usize>,
}

impl ScriptedRandom {
    pub fn new(script: Vec<usize>) -> Self {
        Self {
            script,
            cursor: Mutex::new(0),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&self, n: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        let value = self.script[*cursor % self.script.len()];
        *cursor += 1;
        value % n
    }
}
