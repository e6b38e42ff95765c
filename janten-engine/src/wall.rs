//! Deterministic wall construction.
//!
//! Physical tiles come into existence here: each `Tile` receives its
//! process-unique `index` at shuffle time and thereafter only moves
//! between zones. Given the same `(seed, kyoku, honba)` tuple the wall is
//! identical on any platform, any Rust version, any thread count — the
//! shuffle is a vendored Fisher-Yates over a ChaCha8 stream keyed by a
//! SHA-256 KDF, so no library distribution change can alter it.

use crate::rule::RuleSet;
use janten_core::tile::{SimpleTile, Tile, TileAttribute, NUM_TILE_KINDS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Tiles set aside as the dead wall.
pub const DEAD_WALL_SIZE: usize = 14;

/// Vendored Fisher-Yates shuffle. `rand::seq::SliceRandom` may change its
/// internal algorithm across versions; this must not.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Derive the per-hand shuffle seed: `SHA-256(seed || kyoku || honba)`.
pub fn derive_wall_seed(session_seed: &[u8; 32], kyoku: u8, honba: u8) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(session_seed);
    hasher.update([kyoku]);
    hasher.update([honba]);
    hasher.finalize().into()
}

/// A shuffled wall: live draw pile plus the dead wall with its revealed
/// indicator tiles.
#[derive(Debug, Clone)]
pub struct Wall {
    /// Draw order: `tiles[0]` is drawn first.
    pub tiles: Vec<Tile>,
    pub dead: Vec<Tile>,
    /// Currently revealed dora indicators (grows on kan).
    pub dora_indicators: Vec<Tile>,
    pub ura_indicators: Vec<Tile>,
}

impl Wall {
    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }
}

/// Build and shuffle a wall for one hand. Four copies of every face; in
/// the three-player variant manzu 2-8 stay in the box. One five per
/// number suit is red, up to `rule.aka_dora` of them.
pub fn build_wall(session_seed: &[u8; 32], kyoku: u8, honba: u8, rule: &RuleSet) -> Wall {
    let mut rng = ChaCha8Rng::from_seed(derive_wall_seed(session_seed, kyoku, honba));

    let mut faces: Vec<(SimpleTile, TileAttribute)> = Vec::new();
    let mut red_budget = rule.aka_dora;
    for kind in 0..NUM_TILE_KINDS {
        let face = SimpleTile::from_kind_index(kind);
        if rule.three_player
            && face.suit == janten_core::tile::Suit::Man
            && (2..=8).contains(&face.value)
        {
            continue;
        }
        for copy in 0..4 {
            let is_five = face.suit.is_number() && face.value == 5;
            let attribute = if is_five && copy == 0 && red_budget > 0 {
                red_budget -= 1;
                TileAttribute::Red
            } else {
                TileAttribute::Normal
            };
            faces.push((face, attribute));
        }
    }

    fisher_yates_shuffle(&mut faces, &mut rng);

    let mut tiles: Vec<Tile> = faces
        .into_iter()
        .enumerate()
        .map(|(index, (face, attribute))| Tile::new(face, attribute, index as u32))
        .collect();

    let dead = tiles.split_off(tiles.len() - DEAD_WALL_SIZE);
    // Indicator layout as on the table: the fifth dead-wall tile is the
    // first dora indicator, the tile under it the first ura indicator.
    let dora_indicators = vec![dead[4]];
    let ura_indicators = vec![dead[5]];

    Wall {
        tiles,
        dead,
        dora_indicators,
        ura_indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn wall_is_deterministic() {
        let rule = RuleSet::default_standard();
        let a = build_wall(&[7u8; 32], 0, 0, &rule);
        let b = build_wall(&[7u8; 32], 0, 0, &rule);
        let a_faces: Vec<_> = a.tiles.iter().map(|t| (t.face, t.attribute)).collect();
        let b_faces: Vec<_> = b.tiles.iter().map(|t| (t.face, t.attribute)).collect();
        assert_eq!(a_faces, b_faces);

        let c = build_wall(&[7u8; 32], 1, 0, &rule);
        let c_faces: Vec<_> = c.tiles.iter().map(|t| (t.face, t.attribute)).collect();
        assert_ne!(a_faces, c_faces, "different kyoku, different wall");
    }

    #[test]
    fn wall_composition() {
        let rule = RuleSet::default_standard();
        let wall = build_wall(&[0u8; 32], 0, 0, &rule);
        assert_eq!(wall.tiles.len() + wall.dead.len(), 136);
        assert_eq!(wall.dead.len(), DEAD_WALL_SIZE);

        let mut counts: BTreeMap<_, u8> = BTreeMap::new();
        let mut reds = 0;
        for t in wall.tiles.iter().chain(wall.dead.iter()) {
            *counts.entry(t.face).or_insert(0) += 1;
            if t.is_red() {
                reds += 1;
            }
        }
        assert!(counts.values().all(|&c| c == 4));
        assert_eq!(reds, 3);
    }

    #[test]
    fn indices_are_unique() {
        let wall = build_wall(&[1u8; 32], 0, 0, &RuleSet::default_standard());
        let mut indices: Vec<u32> = wall
            .tiles
            .iter()
            .chain(wall.dead.iter())
            .map(|t| t.index)
            .collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 136);
    }

    #[test]
    fn sanma_wall_drops_middle_manzu() {
        let wall = build_wall(&[2u8; 32], 0, 0, &RuleSet::default_sanma());
        assert_eq!(wall.tiles.len() + wall.dead.len(), 108);
        assert!(wall
            .tiles
            .iter()
            .chain(wall.dead.iter())
            .all(|t| t.face.suit != janten_core::tile::Suit::Man
                || t.face.value == 1
                || t.face.value == 9));
    }
}
