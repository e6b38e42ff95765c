//! Tile representation: suits, face values, and physical tile identity.
//!
//! Two notions of equality run through the engine. *Loose* equality is
//! structural on (suit, value) and drives all counting and matching.
//! *Strict* equality compares the process-unique `index` a tile receives
//! when the wall is built, and identifies one physical tile among its four
//! loosely-equal copies (needed for red-five choices and kan legality).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of distinct real tile faces (back excluded).
pub const NUM_TILE_KINDS: usize = 34;

/// Physical tiles in a full four-player wall.
pub const NUM_TILES: usize = 136;

// Wind face values (suit `Wind`).
pub const EAST: u8 = 1;
pub const SOUTH: u8 = 2;
pub const WEST: u8 = 3;
pub const NORTH: u8 = 4;

// Dragon face values (suit `Dragon`).
pub const HAKU: u8 = 1;
pub const HATSU: u8 = 2;
pub const CHUN: u8 = 3;

// Kind-index range starts.
pub const MAN_START: usize = 0;
pub const PIN_START: usize = 9;
pub const SOU_START: usize = 18;
pub const WIND_START: usize = 27;
pub const DRAGON_START: usize = 31;

/// Kind indices of the 13 kokushi faces (terminals and honors).
pub const YAOCHUU_KINDS: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

/// Kind indices legal in an all-green hand (2s 3s 4s 6s 8s and hatsu).
pub const GREEN_KINDS: [usize; 6] = [19, 20, 21, 23, 25, 32];

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// Tile categories, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Wind,
    Dragon,
    /// Face-down placeholder; never a real tile in a hand.
    Back,
}

impl Suit {
    /// True for the three number suits.
    #[inline]
    pub const fn is_number(self) -> bool {
        matches!(self, Suit::Man | Suit::Pin | Suit::Sou)
    }

    /// Highest legal face value for this suit.
    #[inline]
    pub const fn max_value(self) -> u8 {
        match self {
            Suit::Man | Suit::Pin | Suit::Sou => 9,
            Suit::Wind => 4,
            Suit::Dragon => 3,
            Suit::Back => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// SimpleTile
// ---------------------------------------------------------------------------

/// A tile face: suit plus value. Equality is loose equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimpleTile {
    pub suit: Suit,
    pub value: u8,
}

impl SimpleTile {
    pub const BACK: SimpleTile = SimpleTile {
        suit: Suit::Back,
        value: 0,
    };

    #[inline]
    pub const fn new(suit: Suit, value: u8) -> Self {
        SimpleTile { suit, value }
    }

    /// True when (suit, value) is in the representable domain.
    #[inline]
    pub const fn is_valid(self) -> bool {
        match self.suit {
            Suit::Back => self.value == 0,
            _ => self.value >= 1 && self.value <= self.suit.max_value(),
        }
    }

    /// Dense 0-33 slot for real tiles; `None` for the back placeholder.
    /// Man 0-8, Pin 9-17, Sou 18-26, Wind 27-30, Dragon 31-33.
    #[inline]
    pub const fn kind_index(self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let v = self.value as usize;
        match self.suit {
            Suit::Man => Some(MAN_START + v - 1),
            Suit::Pin => Some(PIN_START + v - 1),
            Suit::Sou => Some(SOU_START + v - 1),
            Suit::Wind => Some(WIND_START + v - 1),
            Suit::Dragon => Some(DRAGON_START + v - 1),
            Suit::Back => None,
        }
    }

    /// Inverse of [`kind_index`](Self::kind_index).
    #[inline]
    pub const fn from_kind_index(idx: usize) -> SimpleTile {
        let (suit, base) = match idx {
            0..=8 => (Suit::Man, MAN_START),
            9..=17 => (Suit::Pin, PIN_START),
            18..=26 => (Suit::Sou, SOU_START),
            27..=30 => (Suit::Wind, WIND_START),
            _ => (Suit::Dragon, DRAGON_START),
        };
        SimpleTile {
            suit,
            value: (idx - base + 1) as u8,
        }
    }

    /// True for wind or dragon tiles.
    #[inline]
    pub const fn is_honor(self) -> bool {
        matches!(self.suit, Suit::Wind | Suit::Dragon)
    }

    /// True for 1 or 9 of a number suit.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        self.suit.is_number() && (self.value == 1 || self.value == 9)
    }

    /// True for terminals or honors (the kokushi faces).
    #[inline]
    pub const fn is_yaochuu(self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    /// True when the face is legal in an all-green hand.
    #[inline]
    pub fn is_green(self) -> bool {
        match self.kind_index() {
            Some(k) => GREEN_KINDS.contains(&k),
            None => false,
        }
    }

    /// The dora indicated when this face is the indicator: numbers wrap
    /// 9->1 within the suit, winds cycle E->S->W->N->E, dragons cycle
    /// haku->hatsu->chun->haku.
    #[inline]
    pub const fn next_dora(self) -> SimpleTile {
        let max = self.suit.max_value();
        if max == 0 {
            return self;
        }
        SimpleTile {
            suit: self.suit,
            value: self.value % max + 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Physical tiles
// ---------------------------------------------------------------------------

/// Bonus marker carried by a physical tile. Red fives score extra han.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum TileAttribute {
    #[default]
    Normal,
    Red,
}

/// Reveal marker; cosmetic to the engine but part of strict identity
/// bookkeeping at the orchestration boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum TileBackground {
    #[default]
    White,
    Transparent,
}

/// A physical tile. Created once at wall-build time and moved between
/// zones by value; `index` never changes and never repeats in a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub face: SimpleTile,
    pub attribute: TileAttribute,
    pub background: TileBackground,
    pub index: u32,
}

impl Tile {
    pub fn new(face: SimpleTile, attribute: TileAttribute, index: u32) -> Self {
        Tile {
            face,
            attribute,
            background: TileBackground::White,
            index,
        }
    }

    /// Loose equality: same face, any copy.
    #[inline]
    pub fn is_equal(&self, other: &Tile) -> bool {
        self.face == other.face
    }

    /// Strict equality: the same physical tile.
    #[inline]
    pub fn is_strict_equal(&self, other: &Tile) -> bool {
        self.index == other.index
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.attribute == TileAttribute::Red
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    /// Canonical ordering: face (suit then value), then attribute
    /// (normal before red), then index as a deterministic tiebreak.
    fn cmp(&self, other: &Self) -> Ordering {
        self.face
            .cmp(&other.face)
            .then(self.attribute.cmp(&other.attribute))
            .then(self.background.cmp(&other.background))
            .then(self.index.cmp(&other.index))
    }
}

/// Canonical face comparator, exposed for sorting mixed collections.
#[inline]
pub fn compare_simple_tile(a: &SimpleTile, b: &SimpleTile) -> Ordering {
    a.cmp(b)
}

/// Canonical physical-tile comparator.
#[inline]
pub fn compare_tile(a: &Tile, b: &Tile) -> Ordering {
    a.cmp(b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_index_roundtrip() {
        for idx in 0..NUM_TILE_KINDS {
            let t = SimpleTile::from_kind_index(idx);
            assert!(t.is_valid());
            assert_eq!(t.kind_index(), Some(idx));
        }
        assert_eq!(SimpleTile::BACK.kind_index(), None);
    }

    #[test]
    fn classification() {
        assert!(SimpleTile::new(Suit::Man, 1).is_terminal());
        assert!(SimpleTile::new(Suit::Sou, 9).is_terminal());
        assert!(!SimpleTile::new(Suit::Pin, 5).is_terminal());
        assert!(SimpleTile::new(Suit::Wind, EAST).is_honor());
        assert!(SimpleTile::new(Suit::Dragon, CHUN).is_yaochuu());
        assert!(!SimpleTile::new(Suit::Wind, NORTH).is_terminal());
    }

    #[test]
    fn yaochuu_kinds_match_classification() {
        for idx in 0..NUM_TILE_KINDS {
            let t = SimpleTile::from_kind_index(idx);
            assert_eq!(t.is_yaochuu(), YAOCHUU_KINDS.contains(&idx), "kind {idx}");
        }
    }

    #[test]
    fn dora_wrapping() {
        let d = |s, v| SimpleTile::new(s, v).next_dora();
        assert_eq!(d(Suit::Man, 1), SimpleTile::new(Suit::Man, 2));
        assert_eq!(d(Suit::Pin, 9), SimpleTile::new(Suit::Pin, 1));
        assert_eq!(d(Suit::Wind, NORTH), SimpleTile::new(Suit::Wind, EAST));
        assert_eq!(d(Suit::Dragon, CHUN), SimpleTile::new(Suit::Dragon, HAKU));
        assert_eq!(d(Suit::Dragon, HAKU), SimpleTile::new(Suit::Dragon, HATSU));
    }

    #[test]
    fn canonical_order() {
        let m9 = SimpleTile::new(Suit::Man, 9);
        let p1 = SimpleTile::new(Suit::Pin, 1);
        let s1 = SimpleTile::new(Suit::Sou, 1);
        let e = SimpleTile::new(Suit::Wind, EAST);
        let haku = SimpleTile::new(Suit::Dragon, HAKU);
        assert!(m9 < p1);
        assert!(p1 < s1);
        assert!(s1 < e);
        assert!(e < haku);

        let normal = Tile::new(SimpleTile::new(Suit::Pin, 5), TileAttribute::Normal, 7);
        let red = Tile::new(SimpleTile::new(Suit::Pin, 5), TileAttribute::Red, 3);
        assert!(normal < red, "normal sorts before red");
    }

    #[test]
    fn strict_vs_loose_equality() {
        let face = SimpleTile::new(Suit::Sou, 5);
        let a = Tile::new(face, TileAttribute::Normal, 10);
        let b = Tile::new(face, TileAttribute::Red, 11);
        assert!(a.is_equal(&b));
        assert!(!a.is_strict_equal(&b));
        assert!(a.is_strict_equal(&a));
    }
}
