//! Multiset helpers over hands of physical tiles.

use crate::code::{tile_to_code, Code};
use crate::tile::{SimpleTile, Tile, NUM_TILE_KINDS};
use std::collections::BTreeMap;

/// Frequency table of a hand, keyed by canonical code.
pub fn count_tiles(hand: &[Tile]) -> BTreeMap<Code, u8> {
    let mut counts = BTreeMap::new();
    for t in hand {
        *counts.entry(tile_to_code(t.face)).or_insert(0) += 1;
    }
    counts
}

/// Dense 34-slot histogram of tile faces; back tiles are skipped.
pub fn kind_counts(faces: &[SimpleTile]) -> [u8; NUM_TILE_KINDS] {
    let mut counts = [0u8; NUM_TILE_KINDS];
    for f in faces {
        if let Some(k) = f.kind_index() {
            counts[k] += 1;
        }
    }
    counts
}

/// Remove up to `max_count` tiles loosely equal to `target`, returning
/// `(remaining, removed)`. Order of the remaining tiles is preserved.
/// This is the primitive behind every call-legality check.
pub fn remove_tile_from_hand(
    hand: &[Tile],
    target: SimpleTile,
    max_count: usize,
) -> (Vec<Tile>, Vec<Tile>) {
    let mut remaining = Vec::with_capacity(hand.len());
    let mut removed = Vec::new();
    for t in hand {
        if removed.len() < max_count && t.face == target {
            removed.push(*t);
        } else {
            remaining.push(*t);
        }
    }
    (remaining, removed)
}

/// Sort a hand into canonical display order.
pub fn sort_tiles(hand: &mut [Tile]) {
    hand.sort();
}

/// Insert into a sorted hand, keeping it sorted.
#[inline]
pub fn sorted_insert(hand: &mut Vec<Tile>, tile: Tile) {
    let pos = hand.partition_point(|t| *t < tile);
    hand.insert(pos, tile);
}
