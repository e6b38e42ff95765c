//! Hand decomposition: agari / tenpai / noten with full wait enumeration.
//!
//! The search is an explicit recursion over a 34-slot count array. At each
//! step it takes the lowest remaining face and tries every extraction that
//! can contain it: triplet, pair, run, or one of the incomplete wait
//! shapes. All completions from all branches are merged and deduplicated
//! by canonical signature; a validity filter then discards shapes the
//! grammar can reach but mahjong does not allow (two pairs in a standard
//! hand, a wait on a fifth copy, duplicate faces in seven pairs).
//!
//! Exponential in the worst case, but the domain is at most 14 tiles over
//! 34 faces; one evaluation terminates in bounded time and the function is
//! pure, so callers may fan out per-candidate evaluations freely.

use crate::tsu::{AgariState, Group, Machi, TenpaiState, Tsu};
use janten_core::code::{tile_to_code, Code};
use janten_core::hand::kind_counts;
use janten_core::tile::{SimpleTile, Tile, NUM_TILE_KINDS, YAOCHUU_KINDS};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgariStatus {
    Agari,
    Tenpai,
    Noten,
}

/// Result of one decomposition query. `status` is `Agari` iff `completed`
/// is non-empty, `Tenpai` iff it is empty and `waits_by_tile` is not.
#[derive(Debug, Clone, Serialize)]
pub struct AgariResult {
    pub status: AgariStatus,
    pub completed: Vec<AgariState>,
    pub waits_by_tile: BTreeMap<Code, Vec<TenpaiState>>,
}

impl AgariResult {
    /// The waiting tiles, in canonical order.
    pub fn wait_codes(&self) -> Vec<Code> {
        self.waits_by_tile.keys().copied().collect()
    }
}

/// Decompose a hand of physical tiles. Order is irrelevant; only faces
/// matter here.
pub fn calculate_agari(tiles: &[Tile]) -> AgariResult {
    let faces: Vec<SimpleTile> = tiles.iter().map(|t| t.face).collect();
    calculate_agari_faces(&faces)
}

/// Decompose a hand of faces with no called melds.
pub fn calculate_agari_faces(faces: &[SimpleTile]) -> AgariResult {
    calculate_agari_seeded(faces, &[])
}

/// Decompose the closed portion of a hand with the player's called melds
/// fixed as completed groups. The melds appear in every resulting state
/// and constrain the validity filter (a meld already holding three copies
/// of a face blocks a wait on its fourth, and so on).
pub fn calculate_agari_seeded(faces: &[SimpleTile], melds: &[Tsu]) -> AgariResult {
    let mut search = Search {
        counts: kind_counts(faces),
        remaining: faces.len() as u8,
        melds,
        groups: Vec::new(),
        machi: Vec::new(),
        completed: Vec::new(),
        completed_seen: BTreeSet::new(),
        waits: BTreeMap::new(),
        waits_seen: BTreeSet::new(),
    };
    search.step();

    let Search {
        mut completed,
        mut waits,
        ..
    } = search;

    if faces.len() > 3 && melds.is_empty() {
        kokushi_scan(faces, &mut completed, &mut waits);
    }

    let status = if !completed.is_empty() {
        AgariStatus::Agari
    } else if !waits.is_empty() {
        AgariStatus::Tenpai
    } else {
        AgariStatus::Noten
    };

    AgariResult {
        status,
        completed,
        waits_by_tile: waits,
    }
}

struct Search<'a> {
    counts: [u8; NUM_TILE_KINDS],
    remaining: u8,
    melds: &'a [Tsu],
    groups: Vec<Tsu>,
    machi: Vec<Machi>,
    completed: Vec<AgariState>,
    completed_seen: BTreeSet<String>,
    waits: BTreeMap<Code, Vec<TenpaiState>>,
    waits_seen: BTreeSet<String>,
}

impl Search<'_> {
    #[inline]
    fn take(&mut self, kind: usize, n: u8) {
        self.counts[kind] -= n;
        self.remaining -= n;
    }

    #[inline]
    fn give(&mut self, kind: usize, n: u8) {
        self.counts[kind] += n;
        self.remaining += n;
    }

    fn step(&mut self) {
        if self.remaining == 0 {
            self.record();
            return;
        }

        // The search always consumes the lowest remaining face, so a run
        // containing it can only start at it.
        let k = (0..NUM_TILE_KINDS)
            .find(|&i| self.counts[i] > 0)
            .expect("remaining > 0");
        let face = SimpleTile::from_kind_index(k);
        let count = self.counts[k];
        let run_ok = face.suit.is_number() && face.value <= 7;

        if count >= 3 {
            self.take(k, 3);
            self.groups.push(Tsu::Koutsu(Group::concealed(face)));
            self.step();
            self.groups.pop();
            self.give(k, 3);
        }

        if count >= 2 {
            self.take(k, 2);
            self.groups.push(Tsu::Toitsu(Group::concealed(face)));
            self.step();
            self.groups.pop();
            self.give(k, 2);
        }

        if run_ok && self.counts[k + 1] > 0 && self.counts[k + 2] > 0 {
            self.take(k, 1);
            self.take(k + 1, 1);
            self.take(k + 2, 1);
            self.groups.push(Tsu::Shuntsu(Group::concealed(face)));
            self.step();
            self.groups.pop();
            self.give(k + 2, 1);
            self.give(k + 1, 1);
            self.give(k, 1);
        }

        // Incomplete shapes. At most one, except the dual-pair shabo wait
        // which is exactly two pair-shaped shapes.
        let shabo_ok = match self.machi.as_slice() {
            [] => true,
            [Machi::Shabo(f)] => *f != face,
            _ => false,
        };
        if count >= 2 && shabo_ok {
            self.take(k, 2);
            self.machi.push(Machi::Shabo(face));
            self.step();
            self.machi.pop();
            self.give(k, 2);
        }

        if self.machi.is_empty() {
            self.take(k, 1);
            self.machi.push(Machi::Tanki(face));
            self.step();
            self.machi.pop();
            self.give(k, 1);

            if face.suit.is_number() && face.value <= 8 && self.counts[k + 1] > 0 {
                let shape = if face.value == 1 || face.value == 8 {
                    Machi::Penchan(face)
                } else {
                    Machi::Ryanmen(face)
                };
                self.take(k, 1);
                self.take(k + 1, 1);
                self.machi.push(shape);
                self.step();
                self.machi.pop();
                self.give(k + 1, 1);
                self.give(k, 1);
            }

            if run_ok && self.counts[k + 2] > 0 {
                self.take(k, 1);
                self.take(k + 2, 1);
                self.machi.push(Machi::Kanchan(face));
                self.step();
                self.machi.pop();
                self.give(k + 2, 1);
                self.give(k, 1);
            }
        }
    }

    fn record(&mut self) {
        let mut groups: Vec<Tsu> = self.melds.to_vec();
        groups.extend(self.groups.iter().copied());

        if self.machi.is_empty() {
            if !valid_agari_shape(&groups) {
                return;
            }
            let state = AgariState::new(groups, Vec::new());
            if self.completed_seen.insert(state.signature()) {
                self.completed.push(state);
            }
        } else {
            if !valid_tenpai_shape(&groups, &self.machi) {
                return;
            }
            let state = TenpaiState::new(groups, Vec::new(), self.machi.clone());
            if !self.waits_seen.insert(state.signature()) {
                return;
            }
            for wait in state.waits() {
                if wait_is_reachable(&state, wait) {
                    self.waits
                        .entry(tile_to_code(wait))
                        .or_default()
                        .push(state.clone());
                }
            }
        }
    }
}

/// Standard-shape filter: exactly seven distinct pairs with nothing else,
/// or at most one pair with any number of triplets and runs.
fn valid_agari_shape(groups: &[Tsu]) -> bool {
    let pairs = groups
        .iter()
        .filter(|t| matches!(t, Tsu::Toitsu(_)))
        .count();
    let others = groups.len() - pairs;

    if pairs == 7 && others == 0 {
        let mut faces: Vec<SimpleTile> = groups.iter().map(Tsu::tile).collect();
        faces.sort();
        faces.dedup();
        return faces.len() == 7;
    }
    pairs <= 1
}

/// Wait-shape filter: one incomplete shape (or two, both shabo, on
/// different faces) and 0, 1 or 6 pairs. A pair-forming wait (tanki,
/// shabo) tolerates no separate pair, since completing it must not leave
/// two heads; six pairs is the seven-pairs hand one tile away, whose
/// tanki face must be a seventh distinct face.
fn valid_tenpai_shape(groups: &[Tsu], machi: &[Machi]) -> bool {
    let pair_faces: Vec<SimpleTile> = groups
        .iter()
        .filter_map(|t| match t {
            Tsu::Toitsu(g) => Some(g.tile),
            _ => None,
        })
        .collect();
    let pairs = pair_faces.len();

    match machi {
        [Machi::Shabo(_)] => false,
        [Machi::Shabo(a), Machi::Shabo(b)] => a != b && pairs == 0,
        [Machi::Tanki(tanki)] => {
            if pairs == 6 {
                let mut faces = pair_faces;
                faces.sort();
                faces.dedup();
                faces.len() == 6 && !faces.contains(tanki)
            } else {
                pairs == 0
            }
        }
        [Machi::Ryanmen(_)] | [Machi::Kanchan(_)] | [Machi::Penchan(_)] => pairs <= 1,
        [Machi::Kokushi(_)] => true,
        _ => false,
    }
}

/// A wait is only real if a fourth copy of the winning face can still
/// exist: tiles already committed to the decomposition plus the winning
/// tile must not exceed four.
fn wait_is_reachable(state: &TenpaiState, wait: SimpleTile) -> bool {
    let used: u8 = state
        .groups
        .iter()
        .map(|t| t.copies_of(wait))
        .chain(state.machi.iter().map(|m| m.copies_of(wait)))
        .chain(state.singles.iter().map(|&s| (s == wait) as u8))
        .sum();
    used < 4
}

/// The kokushi shapes never fit the group grammar, so they are checked
/// directly on the face counts: thirteen distinct terminal/honor faces
/// with one doubled is complete, one face short of that is tenpai on the
/// missing face, and all thirteen as bare singles is the thirteen-sided
/// wait (every face completes the hand).
fn kokushi_scan(
    faces: &[SimpleTile],
    completed: &mut Vec<AgariState>,
    waits: &mut BTreeMap<Code, Vec<TenpaiState>>,
) {
    let counts = kind_counts(faces);
    if (0..NUM_TILE_KINDS).any(|k| counts[k] > 0 && !YAOCHUU_KINDS.contains(&k)) {
        return;
    }

    let mut missing = Vec::new();
    let mut singles = Vec::new();
    let mut pairs = Vec::new();
    for &k in &YAOCHUU_KINDS {
        match counts[k] {
            0 => missing.push(SimpleTile::from_kind_index(k)),
            1 => singles.push(SimpleTile::from_kind_index(k)),
            2 => pairs.push(SimpleTile::from_kind_index(k)),
            _ => return,
        }
    }
    if pairs.len() > 1 {
        return;
    }

    if missing.is_empty() && pairs.len() == 1 {
        completed.push(AgariState::new(
            vec![Tsu::Toitsu(Group::concealed(pairs[0]))],
            singles,
        ));
    } else if missing.len() == 1 && pairs.len() == 1 {
        let state = TenpaiState::new(
            vec![Tsu::Toitsu(Group::concealed(pairs[0]))],
            singles,
            vec![Machi::Kokushi(missing.clone())],
        );
        waits
            .entry(tile_to_code(missing[0]))
            .or_default()
            .push(state);
    } else if missing.is_empty() && pairs.is_empty() {
        let all: Vec<SimpleTile> = YAOCHUU_KINDS
            .iter()
            .map(|&k| SimpleTile::from_kind_index(k))
            .collect();
        let state = TenpaiState::new(Vec::new(), singles, vec![Machi::Kokushi(all.clone())]);
        for face in all {
            waits
                .entry(tile_to_code(face))
                .or_default()
                .push(state.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janten_core::parse::code_syntax_to_hand;

    fn decompose(text: &str) -> AgariResult {
        calculate_agari_faces(&code_syntax_to_hand(text).unwrap())
    }

    fn wait_strs(result: &AgariResult) -> Vec<String> {
        result.wait_codes().iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn empty_hand_is_one_empty_agari() {
        let result = calculate_agari_faces(&[]);
        assert_eq!(result.status, AgariStatus::Agari);
        assert_eq!(result.completed.len(), 1);
        assert!(result.completed[0].groups.is_empty());
    }

    #[test]
    fn single_tile_is_tanki() {
        let result = decompose("5p");
        assert_eq!(result.status, AgariStatus::Tenpai);
        assert_eq!(wait_strs(&result), vec!["5p"]);
    }

    #[test]
    fn bare_pair_is_agari() {
        let result = decompose("55p");
        assert_eq!(result.status, AgariStatus::Agari);
        assert_eq!(result.completed.len(), 1);
    }

    #[test]
    fn ryanmen_waits_both_sides() {
        let result = decompose("23p");
        assert_eq!(result.status, AgariStatus::Tenpai);
        assert_eq!(wait_strs(&result), vec!["1p", "4p"]);
    }

    #[test]
    fn distant_tiles_are_noten() {
        assert_eq!(decompose("14p").status, AgariStatus::Noten);
    }

    #[test]
    fn tanki_beside_triplet() {
        let result = decompose("1m111s");
        assert_eq!(result.status, AgariStatus::Tenpai);
        assert_eq!(wait_strs(&result), vec!["1m"]);
        let states = &result.waits_by_tile[&"1m".parse().unwrap()];
        assert!(states
            .iter()
            .any(|s| s.machi == vec![Machi::Tanki(code_syntax_to_hand("1m").unwrap()[0])]));
    }

    #[test]
    fn bare_quad_is_noten() {
        // Four identical tiles cannot wait on a fifth copy.
        assert_eq!(decompose("1111s").status, AgariStatus::Noten);
    }

    #[test]
    fn run_plus_pair_is_agari() {
        let result = decompose("12344m");
        assert_eq!(result.status, AgariStatus::Agari);
        assert_eq!(result.completed.len(), 1);
    }

    #[test]
    fn eight_tile_hand_has_two_readings() {
        let result = decompose("11123444m");
        assert_eq!(result.status, AgariStatus::Agari);
        assert_eq!(result.completed.len(), 2);
    }

    #[test]
    fn shabo_wait_on_two_honor_pairs() {
        let result = decompose("123456789s5566z");
        assert_eq!(result.status, AgariStatus::Tenpai);
        assert_eq!(wait_strs(&result), vec!["5z", "6z"]);
        let states = &result.waits_by_tile[&"5z".parse().unwrap()];
        assert!(states.iter().any(|s| s
            .machi
            .iter()
            .all(|m| matches!(m, Machi::Shabo(_)))));
    }

    #[test]
    fn six_pairs_wait_tanki() {
        let result = decompose("1122334455667z");
        assert_eq!(result.status, AgariStatus::Tenpai);
        assert_eq!(wait_strs(&result), vec!["7z"]);
    }

    #[test]
    fn seven_pairs_is_agari() {
        let result = decompose("11223344556677z");
        assert_eq!(result.status, AgariStatus::Agari);
        assert!(result.completed.iter().any(AgariState::is_chiitoitsu));
    }

    #[test]
    fn thirteen_orphans_thirteen_sided() {
        let result = decompose("19m19p19s1234567z");
        assert_eq!(result.status, AgariStatus::Tenpai);
        assert_eq!(result.waits_by_tile.len(), 13);
    }

    #[test]
    fn kokushi_with_pair_waits_missing_face() {
        let result = decompose("19m19p19s123456z1m");
        assert_eq!(result.status, AgariStatus::Tenpai);
        assert_eq!(wait_strs(&result), vec!["7z"]);
    }

    #[test]
    fn kokushi_complete() {
        let result = decompose("19m19p19s1234567z7z");
        assert_eq!(result.status, AgariStatus::Agari);
        assert!(result.completed.iter().any(AgariState::is_kokushi));
    }

    #[test]
    fn full_hand_agari() {
        let result = decompose("123m456m789m123p55s");
        assert_eq!(result.status, AgariStatus::Agari);
    }

    #[test]
    fn seeded_meld_appears_in_every_reading() {
        let kan = Tsu::Kantsu(Group {
            tile: code_syntax_to_hand("9s").unwrap()[0],
            open: false,
            furo: true,
        });
        let faces = code_syntax_to_hand("123m456m789m55p").unwrap();
        let result = calculate_agari_seeded(&faces, &[kan]);
        assert_eq!(result.status, AgariStatus::Agari);
        assert!(result.completed[0]
            .groups
            .iter()
            .any(|t| matches!(t, Tsu::Kantsu(_))));
    }

    #[test]
    fn seeded_meld_blocks_fourth_copy_wait() {
        // With a kantsu of 9s declared, a 9s tanki can never fill.
        let kan = Tsu::Kantsu(Group {
            tile: code_syntax_to_hand("9s").unwrap()[0],
            open: false,
            furo: true,
        });
        let faces = code_syntax_to_hand("123m456m789m9s").unwrap();
        let result = calculate_agari_seeded(&faces, &[kan]);
        assert_eq!(result.status, AgariStatus::Noten);
    }
}
