//! Property-based invariants for the decomposition engine.
//!
//! Random tile multisets go through `calculate_agari_faces`; every result
//! must keep the status/contents contract, every enumerated wait must
//! actually complete the hand, and evaluation must be deterministic.

use janten_core::code::code_to_tile;
use janten_core::tile::{SimpleTile, NUM_TILE_KINDS};
use janten_engine::agari::{calculate_agari_faces, AgariStatus};
use janten_engine::tsu::Tsu;
use proptest::prelude::*;

/// Build a legal multiset (at most four copies per face) from raw kinds.
fn faces_from_kinds(kinds: &[usize]) -> Vec<SimpleTile> {
    let mut counts = [0u8; NUM_TILE_KINDS];
    let mut faces = Vec::new();
    for &k in kinds {
        if counts[k] < 4 {
            counts[k] += 1;
            faces.push(SimpleTile::from_kind_index(k));
        }
    }
    faces
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn status_matches_result_contents(
        kinds in proptest::collection::vec(0..NUM_TILE_KINDS, 0..=14),
    ) {
        let faces = faces_from_kinds(&kinds);
        let result = calculate_agari_faces(&faces);
        match result.status {
            AgariStatus::Agari => prop_assert!(!result.completed.is_empty()),
            AgariStatus::Tenpai => {
                prop_assert!(result.completed.is_empty());
                prop_assert!(!result.waits_by_tile.is_empty());
            }
            AgariStatus::Noten => {
                prop_assert!(result.completed.is_empty());
                prop_assert!(result.waits_by_tile.is_empty());
            }
        }
    }

    #[test]
    fn every_enumerated_wait_completes_the_hand(
        kinds in proptest::collection::vec(0..NUM_TILE_KINDS, 1..=13),
    ) {
        let faces = faces_from_kinds(&kinds);
        let result = calculate_agari_faces(&faces);
        for code in result.wait_codes() {
            let mut extended = faces.clone();
            extended.push(code_to_tile(code).unwrap());
            let completed = calculate_agari_faces(&extended);
            prop_assert_eq!(
                completed.status,
                AgariStatus::Agari,
                "wait {} does not complete {:?}",
                code,
                faces
            );
        }
    }

    #[test]
    fn completed_readings_obey_the_shape_filter(
        kinds in proptest::collection::vec(0..NUM_TILE_KINDS, 0..=14),
    ) {
        let faces = faces_from_kinds(&kinds);
        let result = calculate_agari_faces(&faces);
        for division in &result.completed {
            if division.is_kokushi() {
                continue;
            }
            let pairs = division.pair_count();
            if division.is_chiitoitsu() {
                prop_assert_eq!(pairs, 7);
            } else {
                prop_assert!(pairs <= 1, "reading with {} pairs: {:?}", pairs, division);
            }
            // No group may commit more than four copies of one face.
            for kind in 0..NUM_TILE_KINDS {
                let face = SimpleTile::from_kind_index(kind);
                let used: u8 = division.groups.iter().map(|t| t.copies_of(face)).sum();
                prop_assert!(used <= 4);
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic(
        kinds in proptest::collection::vec(0..NUM_TILE_KINDS, 0..=14),
    ) {
        let faces = faces_from_kinds(&kinds);
        let a = calculate_agari_faces(&faces);
        let b = calculate_agari_faces(&faces);
        prop_assert_eq!(a.status, b.status);
        let sig = |r: &janten_engine::agari::AgariResult| {
            let mut s: Vec<String> = r.completed.iter().map(|d| d.signature()).collect();
            s.sort();
            (s, r.wait_codes())
        };
        prop_assert_eq!(sig(&a), sig(&b));
    }

    #[test]
    fn seeded_melds_never_mutate_inputs(
        kinds in proptest::collection::vec(0..NUM_TILE_KINDS, 0..=10),
    ) {
        let faces = faces_from_kinds(&kinds);
        let before = faces.clone();
        let melds = [Tsu::Koutsu(janten_engine::tsu::Group {
            tile: SimpleTile::from_kind_index(33),
            open: true,
            furo: true,
        })];
        let _ = janten_engine::agari::calculate_agari_seeded(&faces, &melds);
        prop_assert_eq!(before, faces);
    }
}
