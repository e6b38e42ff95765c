//! Rule configuration.

use serde::{Deserialize, Serialize};

/// Hand count of a full game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameLength {
    /// East round only (tonpuu).
    EastOnly,
    /// East and south rounds (hanchan).
    #[default]
    EastSouth,
}

/// House-rule flags consumed by the engine. Orchestration concerns
/// (time limits, scores carried between hands) live outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleSet {
    /// Enables the local yaku battery (renhou, uumensai, sanrenkou,
    /// isshoku sanjun/yonjun, shiiaruraotai, daisharin, daichisei).
    pub local_yaku: bool,
    /// A win needs four visible han instead of one real yaku.
    pub mangan_shibari: bool,
    pub length: GameLength,
    /// Red fives in the wall (one per number suit up to three).
    pub aka_dora: u8,
    /// Three-player variant: manzu 2-8 removed, north tiles extractable.
    pub three_player: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_standard()
    }
}

impl RuleSet {
    pub fn default_standard() -> Self {
        Self {
            local_yaku: false,
            mangan_shibari: false,
            length: GameLength::EastSouth,
            aka_dora: 3,
            three_player: false,
        }
    }

    pub fn default_local() -> Self {
        Self {
            local_yaku: true,
            mangan_shibari: false,
            length: GameLength::EastSouth,
            aka_dora: 3,
            three_player: false,
        }
    }

    pub fn default_competition() -> Self {
        Self {
            local_yaku: false,
            mangan_shibari: true,
            length: GameLength::EastSouth,
            aka_dora: 0,
            three_player: false,
        }
    }

    pub fn default_sanma() -> Self {
        Self {
            local_yaku: false,
            mangan_shibari: false,
            length: GameLength::EastSouth,
            aka_dora: 2,
            three_player: true,
        }
    }

    /// Seats at the table under this rule set.
    #[inline]
    pub fn seat_count(&self) -> usize {
        if self.three_player {
            3
        } else {
            4
        }
    }
}
