//! Hand shorthand parsing.
//!
//! The shorthand is the usual tenhou-style notation: digits followed by a
//! suit letter, where the letter flushes every pending digit
//! (`"123m456p789s01234567z"`). A `0` under `m`/`p`/`s` denotes the red
//! five; under `z` it is the face-down back placeholder. The shorthand is
//! used for test fixtures and debugging and round-trips exactly through
//! [`crate::tile_to_code`].

use crate::errors::{JantenError, JantenResult};
use crate::tile::{SimpleTile, Suit, Tile, TileAttribute};

fn suit_for(letter: char) -> Option<Suit> {
    match letter {
        'm' => Some(Suit::Man),
        'p' => Some(Suit::Pin),
        's' => Some(Suit::Sou),
        'z' => Some(Suit::Wind), // z digits split into winds/dragons below
        _ => None,
    }
}

fn face_for(digit: u8, letter: char) -> JantenResult<SimpleTile> {
    let err = |message: &str| JantenError::Parse {
        input: format!("{digit}{letter}"),
        message: message.to_string(),
    };
    let tile = match letter {
        'm' | 'p' | 's' => {
            let suit = suit_for(letter).expect("number suit");
            match digit {
                0 | 5 => SimpleTile::new(suit, 5),
                1..=9 => SimpleTile::new(suit, digit),
                _ => return Err(err("digit out of range")),
            }
        }
        'z' => match digit {
            0 => SimpleTile::BACK,
            1..=4 => SimpleTile::new(Suit::Wind, digit),
            5..=7 => SimpleTile::new(Suit::Dragon, digit - 4),
            _ => return Err(err("z digit out of range")),
        },
        _ => return Err(err("unknown suit letter")),
    };
    Ok(tile)
}

/// Parse a shorthand string into tile faces. `"0p"` collapses to the 5p
/// face; red-ness is a physical-tile attribute, see
/// [`code_syntax_to_tiles`] when it matters.
pub fn code_syntax_to_hand(text: &str) -> JantenResult<Vec<SimpleTile>> {
    let mut tiles = Vec::new();
    let mut pending: Vec<u8> = Vec::new();

    for c in text.chars() {
        if let Some(d) = c.to_digit(10) {
            pending.push(d as u8);
        } else if suit_for(c).is_some() {
            for &d in &pending {
                tiles.push(face_for(d, c)?);
            }
            pending.clear();
        } else if !c.is_whitespace() {
            return Err(JantenError::Parse {
                input: text.to_string(),
                message: format!("unexpected character '{c}'"),
            });
        }
    }

    if !pending.is_empty() {
        return Err(JantenError::Parse {
            input: text.to_string(),
            message: "pending digits without a suit letter".to_string(),
        });
    }

    Ok(tiles)
}

/// Hands out physical tiles for a shorthand hand, at most four copies per
/// face, marking `0m`/`0p`/`0s` red. Indices are assigned sequentially
/// from `first_index`, so fixtures get stable strict identities.
struct TileAllocator {
    used: [u8; crate::tile::NUM_TILE_KINDS],
    next_index: u32,
}

impl TileAllocator {
    fn new(first_index: u32) -> Self {
        TileAllocator {
            used: [0; crate::tile::NUM_TILE_KINDS],
            next_index: first_index,
        }
    }

    fn take(&mut self, face: SimpleTile, red: bool, input: &str) -> JantenResult<Tile> {
        if let Some(kind) = face.kind_index() {
            if self.used[kind] >= 4 {
                return Err(JantenError::Parse {
                    input: input.to_string(),
                    message: format!("more than four copies of {}", crate::tile_to_code(face)),
                });
            }
            self.used[kind] += 1;
        }
        let attribute = if red {
            TileAttribute::Red
        } else {
            TileAttribute::Normal
        };
        let tile = Tile::new(face, attribute, self.next_index);
        self.next_index += 1;
        Ok(tile)
    }
}

/// Parse a shorthand string into physical tiles with fresh indices.
pub fn code_syntax_to_tiles(text: &str, first_index: u32) -> JantenResult<Vec<Tile>> {
    let mut alloc = TileAllocator::new(first_index);
    let mut tiles = Vec::new();
    let mut pending: Vec<u8> = Vec::new();

    for c in text.chars() {
        if let Some(d) = c.to_digit(10) {
            pending.push(d as u8);
        } else if suit_for(c).is_some() {
            for &d in &pending {
                let face = face_for(d, c)?;
                let red = d == 0 && c != 'z';
                tiles.push(alloc.take(face, red, text)?);
            }
            pending.clear();
        } else if !c.is_whitespace() {
            return Err(JantenError::Parse {
                input: text.to_string(),
                message: format!("unexpected character '{c}'"),
            });
        }
    }

    if !pending.is_empty() {
        return Err(JantenError::Parse {
            input: text.to_string(),
            message: "pending digits without a suit letter".to_string(),
        });
    }

    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_to_code;

    #[test]
    fn digits_flush_on_suit_letter() {
        let hand = code_syntax_to_hand("123m456p789s11z").unwrap();
        assert_eq!(hand.len(), 11);
        assert_eq!(tile_to_code(hand[0]).as_str(), "1m");
        assert_eq!(tile_to_code(hand[3]).as_str(), "4p");
        assert_eq!(tile_to_code(hand[8]).as_str(), "9s");
        assert_eq!(tile_to_code(hand[9]).as_str(), "1z");
    }

    #[test]
    fn full_honor_run_with_back() {
        let hand = code_syntax_to_hand("01234567z").unwrap();
        assert_eq!(hand.len(), 8);
        assert_eq!(hand[0], SimpleTile::BACK);
        assert_eq!(tile_to_code(hand[7]).as_str(), "7z");
    }

    #[test]
    fn roundtrips_through_codes() {
        let text = "19m19p19s1234567z";
        let hand = code_syntax_to_hand(text).unwrap();
        let rebuilt: String = {
            // Group consecutive same-suit codes back into shorthand.
            let mut out = String::new();
            let mut pending_suffix = None;
            for t in &hand {
                let code = tile_to_code(*t);
                let suffix = code.suffix();
                if pending_suffix.is_some_and(|s| s != suffix) {
                    out.push(pending_suffix.unwrap());
                }
                out.push(char::from(b'0' + code.number()));
                pending_suffix = Some(suffix);
            }
            if let Some(s) = pending_suffix {
                out.push(s);
            }
            out
        };
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn red_five_is_physical_attribute() {
        let faces = code_syntax_to_hand("05p").unwrap();
        assert_eq!(faces[0], faces[1], "0p and 5p are the same face");

        let tiles = code_syntax_to_tiles("05p", 0).unwrap();
        assert!(tiles[0].is_red());
        assert!(!tiles[1].is_red());
        assert!(tiles[0].is_equal(&tiles[1]));
        assert!(!tiles[0].is_strict_equal(&tiles[1]));
    }

    #[test]
    fn rejects_fifth_copy_and_garbage() {
        assert!(code_syntax_to_tiles("55555p", 0).is_err());
        assert!(code_syntax_to_hand("12x").is_err());
        assert!(code_syntax_to_hand("123").is_err());
    }
}
