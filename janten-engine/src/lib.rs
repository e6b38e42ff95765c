//! Janten riichi mahjong hand-analysis and scoring engine.
//!
//! Pure functions over immutable game-state snapshots: hand decomposition
//! (agari / tenpai / noten with full wait enumeration), furiten and tenpai
//! status resolution, the yaku battery, fixed-table scoring, and
//! legal-decision generation. The engine never mutates its inputs and
//! holds no cross-call state; every query may run concurrently with any
//! other.

pub mod agari;
pub mod decision;
pub mod rule;
pub mod score;
pub mod state;
pub mod tenpai;
pub mod tsu;
pub mod wall;
pub mod yaku;

pub use agari::{calculate_agari, calculate_agari_faces, calculate_agari_seeded, AgariResult, AgariStatus};
pub use decision::{calculate_decisions, Decision};
pub use rule::{GameLength, RuleSet};
pub use score::{create_agari_scoreboard, create_ryukyoku_scoreboard};
pub use state::{AgariType, GameState, Hand, Meld, MeldKind, Player, RiverTile, Wind, WinTrigger};
pub use tenpai::{calculate_tenpai, is_wait_safe, TenpaiEntry, TenpaiStatus};
pub use yaku::{calculate_yaku, is_yaku_over_shibari, Yaku};
