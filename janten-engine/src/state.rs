//! Immutable game-state snapshot consumed by the engine.
//!
//! The orchestration layer owns the authoritative state and hands the
//! engine a snapshot per query; every engine function takes `&GameState`
//! and returns fresh values, never mutating its input.

use crate::rule::RuleSet;
use crate::tsu::{Group, Tsu};
use janten_core::tile::{SimpleTile, Suit, Tile, EAST, NORTH, SOUTH, WEST};
use serde::{Deserialize, Serialize};

pub type Seat = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Wind {
    #[default]
    East,
    South,
    West,
    North,
}

impl Wind {
    /// The wind as a tile face.
    #[inline]
    pub fn tile(self) -> SimpleTile {
        let value = match self {
            Wind::East => EAST,
            Wind::South => SOUTH,
            Wind::West => WEST,
            Wind::North => NORTH,
        };
        SimpleTile::new(Suit::Wind, value)
    }

    #[inline]
    pub fn from_index(idx: usize) -> Wind {
        match idx % 4 {
            0 => Wind::East,
            1 => Wind::South,
            2 => Wind::West,
            _ => Wind::North,
        }
    }
}

/// How a winning tile arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgariType {
    Tsumo,
    Ron,
    /// Hypothetical evaluation (tenpai previews): scores the hand as a
    /// quiet ron with no timing yaku.
    Test,
}

/// Special circumstance of the win, set by orchestration. Haitei and
/// houtei could be derived from the wall count; rinshan and chankan
/// cannot, so the snapshot carries all four explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WinTrigger {
    #[default]
    Normal,
    Haitei,
    Houtei,
    Rinshan,
    Chankan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    Chi,
    Pon,
    Ankan,
    Gakan,
    Daiminkan,
}

/// A declared meld with its physical tiles and call bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    /// All tiles of the meld, claimed tile included, sorted.
    pub tiles: Vec<Tile>,
    /// The tile claimed from another player, if any.
    pub called: Option<Tile>,
    pub from: Option<Seat>,
    /// Turn number of the call, for ippatsu and chankan timing.
    pub turn: u32,
}

impl Meld {
    /// The meld as a shape group. The lowest face stands for a run.
    pub fn to_tsu(&self) -> Tsu {
        let mut faces: Vec<SimpleTile> = self.tiles.iter().map(|t| t.face).collect();
        faces.sort();
        let low = faces.first().copied().unwrap_or(SimpleTile::BACK);
        match self.kind {
            MeldKind::Chi => Tsu::Shuntsu(Group {
                tile: low,
                open: true,
                furo: true,
            }),
            MeldKind::Pon => Tsu::Koutsu(Group {
                tile: low,
                open: true,
                furo: true,
            }),
            MeldKind::Ankan => Tsu::Kantsu(Group {
                tile: low,
                open: false,
                furo: true,
            }),
            MeldKind::Gakan | MeldKind::Daiminkan => Tsu::Kantsu(Group {
                tile: low,
                open: true,
                furo: true,
            }),
        }
    }

    pub fn is_kan(&self) -> bool {
        matches!(
            self.kind,
            MeldKind::Ankan | MeldKind::Gakan | MeldKind::Daiminkan
        )
    }
}

/// The tiles a player holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    /// Concealed tiles, excluding the freshly drawn one.
    pub closed: Vec<Tile>,
    pub drawn: Option<Tile>,
    pub melds: Vec<Meld>,
}

impl Hand {
    /// Closed for yaku purposes: ankan keeps the hand concealed.
    pub fn is_menzen(&self) -> bool {
        self.melds.iter().all(|m| m.kind == MeldKind::Ankan)
    }

    /// Concealed tiles including the drawn one.
    pub fn closed_with_drawn(&self) -> Vec<Tile> {
        let mut tiles = self.closed.clone();
        tiles.extend(self.drawn);
        tiles
    }

    pub fn meld_tsu(&self) -> Vec<Tsu> {
        self.melds.iter().map(Meld::to_tsu).collect()
    }

    /// Every physical tile of the hand, melds and drawn tile included.
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut tiles = self.closed_with_drawn();
        for m in &self.melds {
            tiles.extend(m.tiles.iter().copied());
        }
        tiles
    }
}

/// One discarded tile in a river.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiverTile {
    pub tile: Tile,
    pub turn: u32,
    /// Discarded sideways to declare riichi.
    pub riichi_declare: bool,
    /// Claimed by another player (stays in the river for furiten).
    pub called_away: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub hand: Hand,
    pub river: Vec<RiverTile>,
    /// Turn number of the riichi declaration, if declared.
    pub riichi_turn: Option<u32>,
    /// Turn number of this player's most recent call.
    pub last_call_turn: Option<u32>,
    /// Extracted north tiles (three-player).
    pub nuki: Vec<Tile>,
}

impl Player {
    /// Double riichi: declared on the very first discard.
    pub fn is_double_riichi(&self) -> bool {
        self.riichi_turn.is_some()
            && self
                .river
                .first()
                .is_some_and(|r| r.riichi_declare)
    }
}

/// A kan declaration currently being resolved, for chankan queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingKan {
    pub by: Seat,
    pub tile: Tile,
    /// True when the kan upgrades an existing pon (gakan); only then can
    /// an ordinary hand rob it.
    pub upgrade: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub round_wind: Wind,
    /// Seat index of the current dealer.
    pub dealer: Seat,
    /// Monotonic turn counter; river entries and calls reference it.
    pub turn: u32,
    /// Live wall tiles left to draw.
    pub wall_count: usize,
    pub dora_indicators: Vec<Tile>,
    pub ura_indicators: Vec<Tile>,
    /// Most recent discard still claimable: (discarder, tile).
    pub last_discard: Option<(Seat, Tile)>,
    pub pending_kan: Option<PendingKan>,
    pub trigger: WinTrigger,
    pub rule: RuleSet,
}

impl GameState {
    /// A fresh snapshot with empty hands, for fixture building.
    pub fn new(rule: RuleSet) -> Self {
        GameState {
            players: (0..rule.seat_count()).map(|_| Player::default()).collect(),
            round_wind: Wind::East,
            dealer: 0,
            turn: 0,
            wall_count: 0,
            dora_indicators: Vec::new(),
            ura_indicators: Vec::new(),
            last_discard: None,
            pending_kan: None,
            trigger: WinTrigger::Normal,
            rule,
        }
    }

    /// Seat wind of a player relative to the dealer.
    pub fn seat_wind(&self, seat: Seat) -> Wind {
        let n = self.players.len().max(1);
        Wind::from_index((seat + n - self.dealer % n) % n)
    }

    pub fn is_dealer(&self, seat: Seat) -> bool {
        self.seat_wind(seat) == Wind::East
    }

    /// Faces currently scoring as dora.
    pub fn dora_tiles(&self) -> Vec<SimpleTile> {
        self.dora_indicators
            .iter()
            .map(|t| t.face.next_dora())
            .collect()
    }

    /// Faces scoring as ura-dora (meaningful only for riichi winners).
    pub fn ura_tiles(&self) -> Vec<SimpleTile> {
        self.ura_indicators
            .iter()
            .map(|t| t.face.next_dora())
            .collect()
    }

    /// No call has happened yet by anyone.
    pub fn no_calls_made(&self) -> bool {
        self.players
            .iter()
            .all(|p| p.hand.melds.is_empty() && p.nuki.is_empty())
    }

    /// True while the first uninterrupted go-around lasts for `seat`.
    pub fn is_first_go_around(&self, seat: Seat) -> bool {
        self.players[seat].river.is_empty() && self.no_calls_made()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_winds_rotate_with_dealer() {
        let mut state = GameState::new(RuleSet::default_standard());
        state.dealer = 2;
        assert_eq!(state.seat_wind(2), Wind::East);
        assert_eq!(state.seat_wind(3), Wind::South);
        assert_eq!(state.seat_wind(0), Wind::West);
        assert_eq!(state.seat_wind(1), Wind::North);
        assert!(state.is_dealer(2));
        assert!(!state.is_dealer(0));
    }

    #[test]
    fn menzen_survives_ankan() {
        let mut hand = Hand::default();
        assert!(hand.is_menzen());
        hand.melds.push(Meld {
            kind: MeldKind::Ankan,
            tiles: Vec::new(),
            called: None,
            from: None,
            turn: 1,
        });
        assert!(hand.is_menzen());
        hand.melds.push(Meld {
            kind: MeldKind::Pon,
            tiles: Vec::new(),
            called: None,
            from: None,
            turn: 2,
        });
        assert!(!hand.is_menzen());
    }
}
