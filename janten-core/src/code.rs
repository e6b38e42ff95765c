//! Two-character tile codes: the canonical hashable key for a tile face.
//!
//! A code is `{number}{suffix}`: `"5p"`, `"1z"` (east wind), `"5z"`
//! (haku), `"0z"` (face-down back). Suffix `z` packs winds at 1-4,
//! dragons at 5-7 and the back placeholder at 0. `tile_to_code` and
//! `code_to_tile` are exact inverses over the valid domain.

use crate::errors::{JantenError, JantenResult};
use crate::tile::{SimpleTile, Suit};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Offset of dragon values within the `z` suffix (haku = `"5z"`).
const DRAGON_Z_OFFSET: u8 = 4;

/// A validated two-character tile code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code([u8; 2]);

impl Code {
    pub fn as_str(&self) -> &str {
        // Construction only ever stores ASCII digit + suffix letter.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }

    /// The digit part of the code (0-9).
    #[inline]
    pub fn number(&self) -> u8 {
        self.0[0] - b'0'
    }

    /// The suffix letter (`m`, `p`, `s` or `z`).
    #[inline]
    pub fn suffix(&self) -> char {
        self.0[1] as char
    }
}

/// Encode a tile face as its code. The back tile maps to `"0z"`.
pub fn tile_to_code(tile: SimpleTile) -> Code {
    let (number, suffix) = match tile.suit {
        Suit::Man => (tile.value, b'm'),
        Suit::Pin => (tile.value, b'p'),
        Suit::Sou => (tile.value, b's'),
        Suit::Wind => (tile.value, b'z'),
        Suit::Dragon => (tile.value + DRAGON_Z_OFFSET, b'z'),
        Suit::Back => (0, b'z'),
    };
    Code([b'0' + number, suffix])
}

/// Decode a code back to a tile face. Inverse of [`tile_to_code`].
pub fn code_to_tile(code: Code) -> JantenResult<SimpleTile> {
    let number = code.number();
    let tile = match (code.suffix(), number) {
        ('m', 1..=9) => SimpleTile::new(Suit::Man, number),
        ('p', 1..=9) => SimpleTile::new(Suit::Pin, number),
        ('s', 1..=9) => SimpleTile::new(Suit::Sou, number),
        ('z', 0) => SimpleTile::BACK,
        ('z', 1..=4) => SimpleTile::new(Suit::Wind, number),
        ('z', 5..=7) => SimpleTile::new(Suit::Dragon, number - DRAGON_Z_OFFSET),
        _ => {
            return Err(JantenError::Parse {
                input: code.as_str().to_string(),
                message: "not a valid tile code".to_string(),
            })
        }
    };
    Ok(tile)
}

impl FromStr for Code {
    type Err = JantenError;

    fn from_str(s: &str) -> JantenResult<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !bytes[0].is_ascii_digit() {
            return Err(JantenError::Parse {
                input: s.to_string(),
                message: "expected a digit followed by a suit letter".to_string(),
            });
        }
        let code = Code([bytes[0], bytes[1]]);
        // Reject codes outside the representable domain up front.
        code_to_tile(code)?;
        Ok(code)
    }
}

impl TryFrom<String> for Code {
    type Error = JantenError;

    fn try_from(s: String) -> JantenResult<Self> {
        s.parse()
    }
}

impl From<Code> for String {
    fn from(c: Code) -> String {
        c.as_str().to_string()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self.as_str())
    }
}

/// Canonical code comparator; identical to `Ord` on [`Code`], exposed to
/// mirror the tile comparators.
#[inline]
pub fn compare_code(a: &Code, b: &Code) -> Ordering {
    a.cmp(b)
}

impl PartialOrd for Code {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Code {
    /// Codes order by their decoded face, not lexically: `"9m"` sorts
    /// before `"1p"`, and `"4z"` (north) before `"5z"` (haku).
    fn cmp(&self, other: &Self) -> Ordering {
        let a = code_to_tile(*self).unwrap_or(SimpleTile::BACK);
        let b = code_to_tile(*other).unwrap_or(SimpleTile::BACK);
        a.cmp(&b).then(self.0.cmp(&other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{NUM_TILE_KINDS, EAST, HAKU};

    #[test]
    fn roundtrip_all_kinds() {
        for idx in 0..NUM_TILE_KINDS {
            let t = SimpleTile::from_kind_index(idx);
            let c = tile_to_code(t);
            assert_eq!(code_to_tile(c).unwrap(), t, "kind {idx} via {c}");
        }
        let back = tile_to_code(SimpleTile::BACK);
        assert_eq!(back.as_str(), "0z");
        assert_eq!(code_to_tile(back).unwrap(), SimpleTile::BACK);
    }

    #[test]
    fn z_suffix_layout() {
        assert_eq!(tile_to_code(SimpleTile::new(Suit::Wind, EAST)).as_str(), "1z");
        assert_eq!(tile_to_code(SimpleTile::new(Suit::Dragon, HAKU)).as_str(), "5z");
        assert_eq!(
            code_to_tile("7z".parse().unwrap()).unwrap(),
            SimpleTile::new(Suit::Dragon, 3)
        );
    }

    #[test]
    fn rejects_invalid_codes() {
        assert!("0m".parse::<Code>().is_err());
        assert!("8z".parse::<Code>().is_err());
        assert!("xz".parse::<Code>().is_err());
        assert!("10m".parse::<Code>().is_err());
    }

    #[test]
    fn code_order_follows_faces() {
        let mut codes: Vec<Code> = ["1p", "9m", "5z", "4z", "1m"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        codes.sort();
        let sorted: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
        assert_eq!(sorted, vec!["1m", "9m", "1p", "4z", "5z"]);
    }
}
