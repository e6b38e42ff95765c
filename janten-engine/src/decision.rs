//! Decision generation: the legal actions available to a player.
//!
//! This is the engine's orchestration-facing surface. Consumed-tile
//! combinations are offered once per distinct (face, attribute) multiset:
//! picking between two indistinguishable copies is not a choice, picking
//! between a red and a normal five is.

use crate::agari::{calculate_agari_faces, calculate_agari_seeded, AgariStatus};
use crate::state::{AgariType, GameState, MeldKind, Seat, WinTrigger};
use crate::tenpai::discard_candidates;
use crate::tsu::{Group, Tsu};
use crate::yaku::{calculate_yaku, is_yaku_over_shibari};
use janten_core::code::tile_to_code;
use janten_core::tile::{SimpleTile, Suit, Tile, NORTH};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Decision {
    Tsumo { tile: Tile },
    Ron { tile: Tile },
    Pon { tile: Tile, consumed: Vec<Tile> },
    Chi { tile: Tile, consumed: Vec<Tile> },
    Ankan { consumed: Vec<Tile> },
    Gakan { tile: Tile },
    Daiminkan { tile: Tile, consumed: Vec<Tile> },
    Riichi { discard: Tile },
    Nuki { tile: Tile },
    SkipAndTsumo,
    SkipChankan,
}

/// Signature of a consumed-tile multiset: face code plus red marker,
/// sorted. Two selections with the same signature are interchangeable.
fn selection_signature(tiles: &[Tile]) -> String {
    let mut parts: Vec<String> = tiles
        .iter()
        .map(|t| {
            format!(
                "{}{}",
                tile_to_code(t.face),
                if t.is_red() { "r" } else { "" }
            )
        })
        .collect();
    parts.sort();
    parts.join(",")
}

/// All combinatorially distinct selections of `n` tiles from `pool`,
/// deduplicated by selection signature.
fn distinct_selections(pool: &[Tile], n: usize) -> Vec<Vec<Tile>> {
    let mut out: Vec<Vec<Tile>> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut current: Vec<Tile> = Vec::with_capacity(n);

    fn walk(
        pool: &[Tile],
        start: usize,
        n: usize,
        current: &mut Vec<Tile>,
        seen: &mut BTreeSet<String>,
        out: &mut Vec<Vec<Tile>>,
    ) {
        if current.len() == n {
            if seen.insert(selection_signature(current)) {
                out.push(current.clone());
            }
            return;
        }
        for i in start..pool.len() {
            current.push(pool[i]);
            walk(pool, i + 1, n, current, seen, out);
            current.pop();
        }
    }

    walk(pool, 0, n, &mut current, &mut seen, &mut out);
    out
}

/// One tile per distinct (face, attribute) among `tiles`.
fn distinct_tiles(tiles: &[Tile]) -> Vec<Tile> {
    let mut out: Vec<Tile> = Vec::new();
    for &t in tiles {
        if !out
            .iter()
            .any(|c| c.face == t.face && c.attribute == t.attribute)
        {
            out.push(t);
        }
    }
    out
}

/// The player's current wait faces, or `None` when not tenpai.
fn current_waits(state: &GameState, seat: Seat) -> Option<Vec<SimpleTile>> {
    let player = &state.players[seat];
    let faces: Vec<SimpleTile> = player.hand.closed.iter().map(|t| t.face).collect();
    let result = calculate_agari_seeded(&faces, &player.hand.meld_tsu());
    if result.status != AgariStatus::Tenpai {
        return None;
    }
    Some(
        result
            .waits_by_tile
            .keys()
            .filter_map(|&c| janten_core::code_to_tile(c).ok())
            .collect(),
    )
}

/// Any winning tile in the player's own river makes ron illegal.
fn is_furiten(state: &GameState, seat: Seat) -> bool {
    let Some(waits) = current_waits(state, seat) else {
        return false;
    };
    let river = &state.players[seat].river;
    waits
        .iter()
        .any(|&w| river.iter().any(|r| r.tile.face == w))
}

/// Runs callable from the most recent discard of the player to the left.
pub fn calculate_chi_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let Some((discarder, tile)) = state.last_discard else {
        return Vec::new();
    };
    let player = &state.players[seat];
    if player.riichi_turn.is_some() || state.rule.three_player {
        return Vec::new();
    }
    if (discarder + 1) % state.players.len() != seat {
        return Vec::new();
    }
    let face = tile.face;
    if !face.suit.is_number() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for (lo, hi) in [(-2i16, -1i16), (-1, 1), (1, 2)] {
        let va = face.value as i16 + lo;
        let vb = face.value as i16 + hi;
        if !(1..=9).contains(&va) || !(1..=9).contains(&vb) {
            continue;
        }
        let fa = SimpleTile::new(face.suit, va as u8);
        let fb = SimpleTile::new(face.suit, vb as u8);
        let cands_a: Vec<Tile> = player
            .hand
            .closed
            .iter()
            .copied()
            .filter(|t| t.face == fa)
            .collect();
        let cands_b: Vec<Tile> = player
            .hand
            .closed
            .iter()
            .copied()
            .filter(|t| t.face == fb)
            .collect();
        for a in distinct_tiles(&cands_a) {
            for b in distinct_tiles(&cands_b) {
                out.push(Decision::Chi {
                    tile,
                    consumed: vec![a, b],
                });
            }
        }
    }
    out
}

/// Pon and daiminkan callable from the most recent opponent discard.
pub fn calculate_pon_daiminkan_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let Some((discarder, tile)) = state.last_discard else {
        return Vec::new();
    };
    let player = &state.players[seat];
    if discarder == seat || player.riichi_turn.is_some() {
        return Vec::new();
    }
    let matching: Vec<Tile> = player
        .hand
        .closed
        .iter()
        .copied()
        .filter(|t| t.face == tile.face)
        .collect();

    let mut out = Vec::new();
    for consumed in distinct_selections(&matching, 2) {
        out.push(Decision::Pon { tile, consumed });
    }
    for consumed in distinct_selections(&matching, 3) {
        out.push(Decision::Daiminkan { tile, consumed });
    }
    out
}

/// Closed kans declarable from the current 14-tile hand. During riichi a
/// kan is legal only if it leaves the wait set untouched.
pub fn calculate_ankan_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let player = &state.players[seat];
    if player.hand.drawn.is_none() {
        return Vec::new();
    }
    let tiles = player.hand.closed_with_drawn();

    let mut faces_seen: Vec<SimpleTile> = Vec::new();
    let mut out = Vec::new();
    for &t in &tiles {
        if faces_seen.contains(&t.face) {
            continue;
        }
        faces_seen.push(t.face);
        let quad: Vec<Tile> = tiles.iter().copied().filter(|x| x.face == t.face).collect();
        if quad.len() != 4 {
            continue;
        }
        if player.riichi_turn.is_some() && !ankan_keeps_waits(state, seat, t.face) {
            continue;
        }
        out.push(Decision::Ankan { consumed: quad });
    }
    out
}

/// Compare wait-key sets before and after extracting the candidate quad.
fn ankan_keeps_waits(state: &GameState, seat: Seat, face: SimpleTile) -> bool {
    let player = &state.players[seat];
    let faces: Vec<SimpleTile> = player.hand.closed.iter().map(|t| t.face).collect();
    let melds = player.hand.meld_tsu();
    let before = calculate_agari_seeded(&faces, &melds);

    let remaining: Vec<SimpleTile> = player
        .hand
        .closed_with_drawn()
        .iter()
        .map(|t| t.face)
        .filter(|f| *f != face)
        .collect();
    let mut melds_after = melds;
    melds_after.push(Tsu::Kantsu(Group {
        tile: face,
        open: false,
        furo: true,
    }));
    let after = calculate_agari_seeded(&remaining, &melds_after);

    after.status == AgariStatus::Tenpai && before.wait_codes() == after.wait_codes()
}

/// Kan upgrades of an existing pon (kakan). Forbidden during riichi.
pub fn calculate_gakan_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let player = &state.players[seat];
    if player.hand.drawn.is_none() || player.riichi_turn.is_some() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for meld in &player.hand.melds {
        if meld.kind != MeldKind::Pon {
            continue;
        }
        let face = meld.tiles.first().map(|t| t.face);
        if let Some(face) = face {
            if let Some(&fourth) = player
                .hand
                .closed_with_drawn()
                .iter()
                .find(|t| t.face == face)
            {
                out.push(Decision::Gakan { tile: fourth });
            }
        }
    }
    out
}

/// Riichi declarations: closed hand with a drawn tile, offered once per
/// distinct candidate discard that leaves the hand tenpai. The
/// per-candidate probes are independent and evaluated in parallel.
pub fn calculate_riichi_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let player = &state.players[seat];
    if !player.hand.is_menzen() || player.riichi_turn.is_some() || player.hand.drawn.is_none() {
        return Vec::new();
    }
    discard_candidates(state, seat)
        .into_iter()
        .map(|(tile, _)| Decision::Riichi { discard: tile })
        .collect()
}

pub fn calculate_tsumo_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let player = &state.players[seat];
    let Some(drawn) = player.hand.drawn else {
        return Vec::new();
    };
    let yaku = calculate_yaku(state, seat, AgariType::Tsumo, drawn);
    if is_yaku_over_shibari(&state.rule, &yaku) {
        vec![Decision::Tsumo { tile: drawn }]
    } else {
        Vec::new()
    }
}

pub fn calculate_ron_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let Some((discarder, tile)) = state.last_discard else {
        return Vec::new();
    };
    if discarder == seat || is_furiten(state, seat) {
        return Vec::new();
    }
    let yaku = calculate_yaku(state, seat, AgariType::Ron, tile);
    if is_yaku_over_shibari(&state.rule, &yaku) {
        vec![Decision::Ron { tile }]
    } else {
        Vec::new()
    }
}

/// Robbing a declared kan. An added kan (gakan) can be robbed by any
/// yaku-legal hand; a closed kan only by kokushi.
pub fn calculate_chankan_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let Some(pending) = &state.pending_kan else {
        return Vec::new();
    };
    if pending.by == seat || is_furiten(state, seat) {
        return Vec::new();
    }
    let player = &state.players[seat];

    if !pending.upgrade {
        // Closed kan: only the thirteen orphans can rob it.
        let mut faces: Vec<SimpleTile> = player.hand.closed.iter().map(|t| t.face).collect();
        faces.push(pending.tile.face);
        let robs_with_kokushi = player.hand.melds.is_empty()
            && calculate_agari_faces(&faces)
                .completed
                .iter()
                .any(|d| d.is_kokushi());
        if !robs_with_kokushi {
            return Vec::new();
        }
    }

    let mut probe = state.clone();
    probe.trigger = WinTrigger::Chankan;
    let yaku = calculate_yaku(&probe, seat, AgariType::Ron, pending.tile);
    if is_yaku_over_shibari(&state.rule, &yaku) {
        vec![Decision::Ron { tile: pending.tile }, Decision::SkipChankan]
    } else {
        Vec::new()
    }
}

/// North-tile extraction in the three-player variant.
pub fn calculate_nuki_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    if !state.rule.three_player {
        return Vec::new();
    }
    let player = &state.players[seat];
    if player.hand.drawn.is_none() {
        return Vec::new();
    }
    let north = SimpleTile::new(Suit::Wind, NORTH);
    player
        .hand
        .closed_with_drawn()
        .iter()
        .find(|t| t.face == north)
        .map(|&tile| vec![Decision::Nuki { tile }])
        .unwrap_or_default()
}

/// Everything the player may legally do right now. The primary
/// orchestration-facing entry point.
pub fn calculate_decisions(state: &GameState, seat: Seat) -> Vec<Decision> {
    let mut out = Vec::new();

    if state.pending_kan.is_some() {
        return calculate_chankan_decisions(state, seat);
    }

    if let Some((discarder, _)) = state.last_discard {
        if discarder != seat {
            out.extend(calculate_ron_decisions(state, seat));
            out.extend(calculate_pon_daiminkan_decisions(state, seat));
            out.extend(calculate_chi_decisions(state, seat));
            if !out.is_empty() {
                out.push(Decision::SkipAndTsumo);
            }
        }
        return out;
    }

    out.extend(calculate_tsumo_decisions(state, seat));
    out.extend(calculate_riichi_decisions(state, seat));
    out.extend(calculate_ankan_decisions(state, seat));
    out.extend(calculate_gakan_decisions(state, seat));
    out.extend(calculate_nuki_decisions(state, seat));
    out
}
