//! Furiten and tenpai status resolution.
//!
//! Furiten polarity is fixed here once: [`is_wait_safe`] returns `true`
//! when the wait is clean, i.e. none of its winning tiles were ever
//! discarded by the player and the previewed discard is not itself one of
//! them. Furiten is global: once any wait of the hand is dirty, every
//! wait reports furiten.

use crate::agari::{calculate_agari_seeded, AgariStatus};
use crate::state::{AgariType, GameState, RiverTile, Seat};
use crate::tsu::TenpaiState;
use crate::yaku::{calculate_yaku, visible_han};
use janten_core::code::{code_to_tile, Code};
use janten_core::tile::{SimpleTile, Tile, TileAttribute};
use rayon::prelude::*;
use serde::Serialize;

/// Index used for the synthetic winning tiles of hypothetical queries;
/// never collides with a wall tile.
const PROBE_INDEX: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TenpaiStatus {
    /// Clean wait; han counts are visible-only (hidden yaku excluded),
    /// for the tsumo and ron cases separately.
    Tenpai { tsumo_han: u32, ron_han: u32 },
    /// Blocked: some winning tile of this hand is in the player's river.
    Furiten,
    /// The wait completes the shape but no real yaku would exist.
    Muyaku,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TenpaiEntry {
    pub wait: Code,
    pub status: TenpaiStatus,
}

/// True when the decomposition's wait is clean: no wait tile in the
/// player's own river, and the previewed discard (if any) is not a wait.
pub fn is_wait_safe(river: &[RiverTile], tenpai: &TenpaiState, giri: Option<&Tile>) -> bool {
    let waits = tenpai.waits();
    let in_river = waits
        .iter()
        .any(|&w| river.iter().any(|r| r.tile.face == w));
    let discards_wait = giri.is_some_and(|g| waits.contains(&g.face));
    !in_river && !discards_wait
}

/// Resolve the tenpai status of a player's hand, optionally previewing a
/// discard (`giri`). Returns `None` when the hand is already complete or
/// is noten. One entry per waiting tile, in canonical order.
pub fn calculate_tenpai(
    state: &GameState,
    seat: Seat,
    giri: Option<Tile>,
) -> Option<Vec<TenpaiEntry>> {
    let player = &state.players[seat];
    let mut tiles = player.hand.closed_with_drawn();
    if let Some(g) = giri {
        let pos = tiles
            .iter()
            .position(|t| t.is_strict_equal(&g))
            .or_else(|| tiles.iter().position(|t| t.face == g.face))?;
        tiles.remove(pos);
    }

    let faces: Vec<SimpleTile> = tiles.iter().map(|t| t.face).collect();
    let melds = player.hand.meld_tsu();
    let result = calculate_agari_seeded(&faces, &melds);
    if result.status != AgariStatus::Tenpai {
        return None;
    }

    let waits: Vec<SimpleTile> = result
        .waits_by_tile
        .keys()
        .filter_map(|&c| code_to_tile(c).ok())
        .collect();

    // A player is furiten globally: one dirty wait taints them all.
    let furiten = waits.iter().any(|&w| {
        player.river.iter().any(|r| r.tile.face == w) || giri.is_some_and(|g| g.face == w)
    });

    // Probe hand: the post-discard closed tiles, no drawn tile.
    let mut probe = state.clone();
    probe.players[seat].hand.closed = tiles;
    probe.players[seat].hand.drawn = None;

    // Independent per-wait evaluations; fan out.
    let entries: Vec<TenpaiEntry> = waits
        .par_iter()
        .map(|&wait| {
            let wt = Tile::new(wait, TileAttribute::Normal, PROBE_INDEX);
            let test = calculate_yaku(&probe, seat, AgariType::Test, wt);
            let status = if !test.iter().any(|y| !y.is_extra) {
                TenpaiStatus::Muyaku
            } else if furiten {
                TenpaiStatus::Furiten
            } else {
                let tsumo = calculate_yaku(&probe, seat, AgariType::Tsumo, wt);
                let ron = calculate_yaku(&probe, seat, AgariType::Ron, wt);
                TenpaiStatus::Tenpai {
                    tsumo_han: visible_han(&tsumo),
                    ron_han: visible_han(&ron),
                }
            };
            TenpaiEntry {
                wait: janten_core::tile_to_code(wait),
                status,
            }
        })
        .collect();

    Some(entries)
}

/// Tenpai preview for every distinct discard candidate of the current
/// hand (drawn tile included). Candidates are deduplicated by face and
/// attribute; the evaluations are independent and run in parallel.
pub fn discard_candidates(state: &GameState, seat: Seat) -> Vec<(Tile, Vec<TenpaiEntry>)> {
    let player = &state.players[seat];
    let mut candidates: Vec<Tile> = Vec::new();
    for &t in player.hand.closed_with_drawn().iter() {
        if !candidates
            .iter()
            .any(|c| c.face == t.face && c.attribute == t.attribute)
        {
            candidates.push(t);
        }
    }

    candidates
        .into_par_iter()
        .filter_map(|t| calculate_tenpai(state, seat, Some(t)).map(|entries| (t, entries)))
        .collect()
}
