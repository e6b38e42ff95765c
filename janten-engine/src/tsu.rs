//! Meld and wait-shape sum types, and the decomposition value types built
//! from them.
//!
//! A `Tsu` is a completed group; a `Machi` is an incomplete shape that one
//! more tile finishes. Decompositions are deduplicated by a canonical
//! string signature (stable sort + join), so equivalent readings reached
//! through different search orders collapse to one.

use janten_core::code::tile_to_code;
use janten_core::tile::SimpleTile;
use serde::Serialize;

/// Common payload of a completed group. `tile` is the lowest face for a
/// run. `open` means exposed; `furo` means the group came from a call
/// action (an ankan is `furo` but not `open`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Group {
    pub tile: SimpleTile,
    pub open: bool,
    pub furo: bool,
}

impl Group {
    /// A group formed inside the closed hand.
    pub fn concealed(tile: SimpleTile) -> Self {
        Group {
            tile,
            open: false,
            furo: false,
        }
    }
}

/// A completed group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tsu {
    /// Triplet of identical tiles.
    Koutsu(Group),
    /// Declared quad; counts as a triplet for hand shape.
    Kantsu(Group),
    /// Run of three consecutive tiles of one number suit.
    Shuntsu(Group),
    /// Pair.
    Toitsu(Group),
}

impl Tsu {
    #[inline]
    pub fn group(&self) -> &Group {
        match self {
            Tsu::Koutsu(g) | Tsu::Kantsu(g) | Tsu::Shuntsu(g) | Tsu::Toitsu(g) => g,
        }
    }

    #[inline]
    pub fn tile(&self) -> SimpleTile {
        self.group().tile
    }

    /// Koutsu or kantsu.
    #[inline]
    pub fn is_triplet(&self) -> bool {
        matches!(self, Tsu::Koutsu(_) | Tsu::Kantsu(_))
    }

    /// Triplet concealed for sanankou/suuankou purposes: formed in hand,
    /// or an ankan (`furo` but not `open`).
    #[inline]
    pub fn is_concealed_triplet(&self) -> bool {
        self.is_triplet() && !self.group().open
    }

    /// Number of tiles the group consumes.
    #[inline]
    pub fn tile_count(&self) -> u8 {
        match self {
            Tsu::Kantsu(_) => 4,
            Tsu::Koutsu(_) | Tsu::Shuntsu(_) => 3,
            Tsu::Toitsu(_) => 2,
        }
    }

    /// True when the group contains the given face.
    pub fn contains(&self, face: SimpleTile) -> bool {
        match self {
            Tsu::Shuntsu(g) => {
                g.tile.suit == face.suit
                    && face.value >= g.tile.value
                    && face.value <= g.tile.value + 2
            }
            _ => self.tile() == face,
        }
    }

    /// How many copies of `face` the group uses.
    pub fn copies_of(&self, face: SimpleTile) -> u8 {
        match self {
            Tsu::Kantsu(g) => (g.tile == face) as u8 * 4,
            Tsu::Koutsu(g) => (g.tile == face) as u8 * 3,
            Tsu::Toitsu(g) => (g.tile == face) as u8 * 2,
            Tsu::Shuntsu(_) => self.contains(face) as u8,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Tsu::Koutsu(_) => 0,
            Tsu::Kantsu(_) => 1,
            Tsu::Shuntsu(_) => 2,
            Tsu::Toitsu(_) => 3,
        }
    }

    /// Canonical signature fragment, e.g. `K5p`, `R1m`, `T1z`.
    pub fn signature(&self) -> String {
        let tag = match self {
            Tsu::Koutsu(_) => 'K',
            Tsu::Kantsu(_) => 'Q',
            Tsu::Shuntsu(_) => 'R',
            Tsu::Toitsu(_) => 'T',
        };
        let g = self.group();
        let mut s = format!("{}{}", tag, tile_to_code(g.tile));
        if g.open {
            s.push('o');
        }
        if g.furo {
            s.push('f');
        }
        s
    }

    fn sort_key(&self) -> (u8, SimpleTile, bool, bool) {
        let g = self.group();
        (self.kind_rank(), g.tile, g.open, g.furo)
    }
}

/// An incomplete shape: the decomposition is waiting on one more tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Machi {
    /// Single tile waiting to become the pair.
    Tanki(SimpleTile),
    /// One of two pairs waiting to become a triplet. A shabo hand always
    /// carries exactly two of these, one per pair.
    Shabo(SimpleTile),
    /// Two consecutive tiles open on both ends; carries the lower face.
    Ryanmen(SimpleTile),
    /// Gap shape `v`/`v+2` waiting on `v+1`; carries the lower face.
    Kanchan(SimpleTile),
    /// Edge shape 1-2 waiting 3, or 8-9 waiting 7; carries the lower face.
    Penchan(SimpleTile),
    /// The kokushi shape; carries the faces that complete it.
    Kokushi(Vec<SimpleTile>),
}

impl Machi {
    /// The faces that would complete this shape.
    pub fn waits(&self) -> Vec<SimpleTile> {
        match self {
            Machi::Tanki(f) | Machi::Shabo(f) => vec![*f],
            Machi::Ryanmen(f) => vec![
                SimpleTile::new(f.suit, f.value - 1),
                SimpleTile::new(f.suit, f.value + 2),
            ],
            Machi::Kanchan(f) => vec![SimpleTile::new(f.suit, f.value + 1)],
            Machi::Penchan(f) => {
                let v = if f.value == 1 { 3 } else { 7 };
                vec![SimpleTile::new(f.suit, v)]
            }
            Machi::Kokushi(waits) => waits.clone(),
        }
    }

    /// Copies of `face` the shape itself holds.
    pub fn copies_of(&self, face: SimpleTile) -> u8 {
        match self {
            Machi::Tanki(f) => (*f == face) as u8,
            Machi::Shabo(f) => (*f == face) as u8 * 2,
            Machi::Ryanmen(f) | Machi::Penchan(f) => {
                (*f == face) as u8 + (SimpleTile::new(f.suit, f.value + 1) == face) as u8
            }
            Machi::Kanchan(f) => {
                (*f == face) as u8 + (SimpleTile::new(f.suit, f.value + 2) == face) as u8
            }
            Machi::Kokushi(_) => 0,
        }
    }

    pub fn signature(&self) -> String {
        match self {
            Machi::Tanki(f) => format!("mt{}", tile_to_code(*f)),
            Machi::Shabo(f) => format!("ms{}", tile_to_code(*f)),
            Machi::Ryanmen(f) => format!("mr{}", tile_to_code(*f)),
            Machi::Kanchan(f) => format!("mk{}", tile_to_code(*f)),
            Machi::Penchan(f) => format!("mp{}", tile_to_code(*f)),
            Machi::Kokushi(_) => "mx".to_string(),
        }
    }
}

/// One complete reading of a hand: groups plus, for the kokushi shape
/// only, the thirteen-orphan singles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgariState {
    pub groups: Vec<Tsu>,
    pub singles: Vec<SimpleTile>,
}

impl AgariState {
    pub fn new(mut groups: Vec<Tsu>, mut singles: Vec<SimpleTile>) -> Self {
        groups.sort_by_key(|t| t.sort_key());
        singles.sort();
        AgariState { groups, singles }
    }

    /// The pair face of a standard hand, if any.
    pub fn pair(&self) -> Option<SimpleTile> {
        self.groups.iter().find_map(|t| match t {
            Tsu::Toitsu(g) => Some(g.tile),
            _ => None,
        })
    }

    pub fn pair_count(&self) -> usize {
        self.groups
            .iter()
            .filter(|t| matches!(t, Tsu::Toitsu(_)))
            .count()
    }

    pub fn is_chiitoitsu(&self) -> bool {
        self.singles.is_empty()
            && self.groups.len() == 7
            && self.groups.iter().all(|t| matches!(t, Tsu::Toitsu(_)))
    }

    pub fn is_kokushi(&self) -> bool {
        !self.singles.is_empty()
    }

    pub fn signature(&self) -> String {
        let mut parts: Vec<String> = self.groups.iter().map(Tsu::signature).collect();
        parts.extend(self.singles.iter().map(|f| format!("s{}", tile_to_code(*f))));
        parts.join("|")
    }
}

/// One tile away from a complete reading: groups plus one or two
/// incomplete shapes (two only for the dual-pair shabo wait).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenpaiState {
    pub groups: Vec<Tsu>,
    pub singles: Vec<SimpleTile>,
    pub machi: Vec<Machi>,
}

impl TenpaiState {
    pub fn new(mut groups: Vec<Tsu>, mut singles: Vec<SimpleTile>, mut machi: Vec<Machi>) -> Self {
        groups.sort_by_key(|t| t.sort_key());
        singles.sort();
        machi.sort_by_key(Machi::signature);
        TenpaiState {
            groups,
            singles,
            machi,
        }
    }

    /// Union of the faces that complete this decomposition.
    pub fn waits(&self) -> Vec<SimpleTile> {
        let mut waits: Vec<SimpleTile> = self.machi.iter().flat_map(Machi::waits).collect();
        waits.sort();
        waits.dedup();
        waits
    }

    pub fn signature(&self) -> String {
        let mut parts: Vec<String> = self.groups.iter().map(Tsu::signature).collect();
        parts.extend(self.singles.iter().map(|f| format!("s{}", tile_to_code(*f))));
        parts.extend(self.machi.iter().map(|m| m.signature()));
        parts.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janten_core::tile::Suit;

    fn face(suit: Suit, value: u8) -> SimpleTile {
        SimpleTile::new(suit, value)
    }

    #[test]
    fn shuntsu_containment() {
        let run = Tsu::Shuntsu(Group::concealed(face(Suit::Pin, 3)));
        assert!(run.contains(face(Suit::Pin, 3)));
        assert!(run.contains(face(Suit::Pin, 5)));
        assert!(!run.contains(face(Suit::Pin, 6)));
        assert!(!run.contains(face(Suit::Sou, 4)));
    }

    #[test]
    fn machi_waits() {
        assert_eq!(
            Machi::Ryanmen(face(Suit::Pin, 2)).waits(),
            vec![face(Suit::Pin, 1), face(Suit::Pin, 4)]
        );
        assert_eq!(
            Machi::Penchan(face(Suit::Man, 1)).waits(),
            vec![face(Suit::Man, 3)]
        );
        assert_eq!(
            Machi::Penchan(face(Suit::Man, 8)).waits(),
            vec![face(Suit::Man, 7)]
        );
        assert_eq!(
            Machi::Kanchan(face(Suit::Sou, 4)).waits(),
            vec![face(Suit::Sou, 5)]
        );
        assert_eq!(
            Machi::Tanki(face(Suit::Dragon, 1)).waits(),
            vec![face(Suit::Dragon, 1)]
        );
    }

    #[test]
    fn signatures_are_order_independent() {
        let a = AgariState::new(
            vec![
                Tsu::Shuntsu(Group::concealed(face(Suit::Man, 1))),
                Tsu::Toitsu(Group::concealed(face(Suit::Man, 4))),
            ],
            vec![],
        );
        let b = AgariState::new(
            vec![
                Tsu::Toitsu(Group::concealed(face(Suit::Man, 4))),
                Tsu::Shuntsu(Group::concealed(face(Suit::Man, 1))),
            ],
            vec![],
        );
        assert_eq!(a.signature(), b.signature());
    }
}
