//! Domain model (arm statistics, phase, config, errors, ids).

pub mod config;
pub mod errors;
pub mod ids;
pub mod state;
pub mod stats;

pub use self::config::{BanditConfig, DEFAULT_EXPLORATION};
pub use self::errors::{BanditError, ErrorKind, StoreError};
pub use self::ids::EngineId;
pub use self::state::Phase;
pub use self::stats::{Arm, ArmStats, total_pulls};
