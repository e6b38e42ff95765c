//! Yaku evaluation: an ordered battery of predicates over one hand
//! reading plus full game context.
//!
//! The battery is a static table. Yakuman-tier predicates run first; the
//! moment one matches, every remaining normal-tier predicate is skipped
//! (yakuman and ordinary yaku never stack, only yakuman with yakuman).
//! After the battery, `invalidates` edges remove combinations superseded
//! by a stronger reading, and the best-scoring division wins: yakuman han
//! first, then total han.

use crate::agari::{calculate_agari_seeded, AgariStatus};
use crate::rule::RuleSet;
use crate::state::{AgariType, GameState, Seat, Wind, WinTrigger};
use crate::tsu::{AgariState, Tsu};
use janten_core::hand::kind_counts;
use janten_core::tile::{SimpleTile, Suit, Tile, NORTH, NUM_TILE_KINDS, WIND_START};
use serde::Serialize;
use std::collections::BTreeSet;

/// One matched scoring combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Yaku {
    pub name: &'static str,
    pub han: u8,
    /// Dora-like bonus: contributes han but can never legalize a win.
    pub is_extra: bool,
    /// Not revealed until scoring (ippatsu, ura-dora).
    pub is_hidden: bool,
    pub is_yakuman: bool,
    /// Names of combinations this one supersedes.
    pub invalidates: &'static [&'static str],
}

const NO_INVALIDATES: &[&str] = &[];

impl Yaku {
    const fn plain(name: &'static str, han: u8) -> Self {
        Yaku {
            name,
            han,
            is_extra: false,
            is_hidden: false,
            is_yakuman: false,
            invalidates: NO_INVALIDATES,
        }
    }

    const fn hidden(name: &'static str, han: u8) -> Self {
        Yaku {
            name,
            han,
            is_extra: false,
            is_hidden: true,
            is_yakuman: false,
            invalidates: NO_INVALIDATES,
        }
    }

    const fn extra(name: &'static str, han: u8) -> Self {
        Yaku {
            name,
            han,
            is_extra: true,
            is_hidden: false,
            is_yakuman: false,
            invalidates: NO_INVALIDATES,
        }
    }

    const fn yakuman(name: &'static str, han: u8) -> Self {
        Yaku {
            name,
            han,
            is_extra: false,
            is_hidden: false,
            is_yakuman: true,
            invalidates: NO_INVALIDATES,
        }
    }

    const fn yakuman_over(
        name: &'static str,
        han: u8,
        invalidates: &'static [&'static str],
    ) -> Self {
        Yaku {
            name,
            han,
            is_extra: false,
            is_hidden: false,
            is_yakuman: true,
            invalidates,
        }
    }
}

/// Riichi context of the winning player.
#[derive(Debug, Clone, Copy)]
pub struct RiichiContext {
    pub double: bool,
    pub ippatsu: bool,
}

/// Everything one battery pass needs about a single hand reading.
#[derive(Debug)]
pub struct YakuParams<'a> {
    pub division: &'a AgariState,
    /// Index of the group the winning tile completes; `None` for a pair
    /// wait or a special shape.
    pub win_group: Option<usize>,
    pub winning_tile: Tile,
    pub agari_type: AgariType,
    pub menzen: bool,
    pub seat_wind: Wind,
    pub round_wind: Wind,
    pub dealer: bool,
    pub riichi: Option<RiichiContext>,
    pub trigger: WinTrigger,
    pub first_go_around: bool,
    /// Full-hand histogram: closed tiles, melds and the winning tile.
    pub kinds: [u8; NUM_TILE_KINDS],
    pub dora: Vec<SimpleTile>,
    pub ura: Vec<SimpleTile>,
    pub aka_count: u8,
    pub nuki_count: u8,
}

impl YakuParams<'_> {
    #[inline]
    fn is_tsumo(&self) -> bool {
        self.agari_type == AgariType::Tsumo
    }

    #[inline]
    fn groups(&self) -> &[Tsu] {
        &self.division.groups
    }

    fn triplet_faces(&self) -> Vec<SimpleTile> {
        self.groups()
            .iter()
            .filter(|t| t.is_triplet())
            .map(Tsu::tile)
            .collect()
    }

    fn has_triplet_of(&self, face: SimpleTile) -> bool {
        self.groups()
            .iter()
            .any(|t| t.is_triplet() && t.tile() == face)
    }

    fn shuntsu_starts(&self) -> Vec<SimpleTile> {
        self.groups()
            .iter()
            .filter_map(|t| match t {
                Tsu::Shuntsu(g) => Some(g.tile),
                _ => None,
            })
            .collect()
    }

    /// Triplets concealed for sanankou/suuankou: formed in hand or ankan,
    /// and not completed by a ron.
    fn concealed_triplet_count(&self) -> usize {
        self.groups()
            .iter()
            .enumerate()
            .filter(|(i, t)| {
                t.is_concealed_triplet()
                    && !(self.agari_type != AgariType::Tsumo && Some(*i) == self.win_group)
            })
            .count()
    }

    fn kan_count(&self) -> usize {
        self.groups()
            .iter()
            .filter(|t| matches!(t, Tsu::Kantsu(_)))
            .count()
    }

    fn furo_count(&self) -> usize {
        self.groups().iter().filter(|t| t.group().furo).count()
    }

    /// (man, pin, sou, winds, dragons) presence over the full hand.
    fn categories_used(&self) -> (bool, bool, bool, bool, bool) {
        let mut used = (false, false, false, false, false);
        for k in 0..NUM_TILE_KINDS {
            if self.kinds[k] == 0 {
                continue;
            }
            match SimpleTile::from_kind_index(k).suit {
                Suit::Man => used.0 = true,
                Suit::Pin => used.1 = true,
                Suit::Sou => used.2 = true,
                Suit::Wind => used.3 = true,
                Suit::Dragon => used.4 = true,
                Suit::Back => {}
            }
        }
        used
    }

    fn every_face(&self, pred: impl Fn(SimpleTile) -> bool) -> bool {
        (0..NUM_TILE_KINDS)
            .filter(|&k| self.kinds[k] > 0)
            .all(|k| pred(SimpleTile::from_kind_index(k)))
    }

    fn is_yakuhai_face(&self, face: SimpleTile) -> bool {
        face.suit == Suit::Dragon
            || face == self.seat_wind.tile()
            || face == self.round_wind.tile()
    }

    /// Open wait on both sides of a run; the pinfu-qualifying shape.
    fn is_ryanmen_win(&self) -> bool {
        let Some(idx) = self.win_group else {
            return false;
        };
        let Tsu::Shuntsu(g) = &self.groups()[idx] else {
            return false;
        };
        let win = self.winning_tile.face;
        (win == g.tile && g.tile.value != 7)
            || (win.value == g.tile.value + 2 && win.suit == g.tile.suit && g.tile.value != 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YakuLevel {
    Normal,
    Local,
}

struct YakuDef {
    level: YakuLevel,
    /// Whether this predicate can yield a yakuman; such predicates keep
    /// running after a yakuman match while normal-tier ones are skipped.
    yakuman_tier: bool,
    eval: fn(&YakuParams, &mut Vec<Yaku>),
}

macro_rules! def {
    ($level:ident, $tier:expr, $f:ident) => {
        YakuDef {
            level: YakuLevel::$level,
            yakuman_tier: $tier,
            eval: $f,
        }
    };
}

/// The ordered battery. Yakuman-tier entries lead so the short-circuit
/// never evaluates a normal predicate it would discard.
const BATTERY: &[YakuDef] = &[
    def!(Normal, true, eval_tenhou_chiihou),
    def!(Normal, true, eval_kokushi),
    def!(Normal, true, eval_suuankou),
    def!(Normal, true, eval_daisangen),
    def!(Normal, true, eval_suushii),
    def!(Normal, true, eval_tsuuiisou),
    def!(Normal, true, eval_chinroutou),
    def!(Normal, true, eval_ryuuiisou),
    def!(Normal, true, eval_chuuren),
    def!(Normal, true, eval_suukantsu),
    def!(Local, true, eval_isshoku_yonjun),
    def!(Local, true, eval_daisharin),
    def!(Local, true, eval_daichisei),
    def!(Normal, false, eval_riichi),
    def!(Normal, false, eval_ippatsu),
    def!(Normal, false, eval_menzen_tsumo),
    def!(Normal, false, eval_trigger_yaku),
    def!(Normal, false, eval_pinfu),
    def!(Normal, false, eval_tanyao),
    def!(Normal, false, eval_chiitoitsu),
    def!(Normal, false, eval_yakuhai),
    def!(Normal, false, eval_toitoi),
    def!(Normal, false, eval_sanankou),
    def!(Normal, false, eval_sankantsu),
    def!(Normal, false, eval_shousangen),
    def!(Normal, false, eval_honroutou),
    def!(Normal, false, eval_peikou),
    def!(Normal, false, eval_ittsuu),
    def!(Normal, false, eval_sanshoku_doujun),
    def!(Normal, false, eval_sanshoku_doukou),
    def!(Normal, false, eval_chanta_junchan),
    def!(Normal, false, eval_honitsu_chinitsu),
    def!(Local, false, eval_renhou),
    def!(Local, false, eval_uumensai),
    def!(Local, false, eval_sanrenkou),
    def!(Local, false, eval_isshoku_sanjun),
    def!(Local, false, eval_shiiaruraotai),
    def!(Normal, false, eval_dora),
];

/// Evaluate the yaku of a winning hand. Returns an empty list when the
/// closed hand plus `winning_tile`, seeded with the player's melds, is
/// not a complete shape.
pub fn calculate_yaku(
    state: &GameState,
    seat: Seat,
    agari_type: AgariType,
    winning_tile: Tile,
) -> Vec<Yaku> {
    let player = &state.players[seat];
    let mut faces: Vec<SimpleTile> = player.hand.closed.iter().map(|t| t.face).collect();
    faces.push(winning_tile.face);
    let melds = player.hand.meld_tsu();

    let result = calculate_agari_seeded(&faces, &melds);
    if result.status != AgariStatus::Agari {
        return Vec::new();
    }

    let mut kinds = kind_counts(&faces);
    for meld in &player.hand.melds {
        for t in &meld.tiles {
            if let Some(k) = t.face.kind_index() {
                kinds[k] += 1;
            }
        }
    }

    let aka_count = player
        .hand
        .closed
        .iter()
        .chain(player.hand.melds.iter().flat_map(|m| m.tiles.iter()))
        .filter(|t| t.is_red())
        .count() as u8
        + winning_tile.is_red() as u8;

    let riichi = player.riichi_turn.map(|rt| RiichiContext {
        double: player.is_double_riichi(),
        ippatsu: agari_type != AgariType::Test
            && player
                .river
                .last()
                .is_some_and(|r| r.riichi_declare && !r.called_away)
            && state
                .players
                .iter()
                .all(|p| p.last_call_turn.is_none_or(|ct| ct < rt)),
    });

    let trigger = match agari_type {
        AgariType::Test => WinTrigger::Normal,
        _ => state.trigger,
    };

    let win_face = winning_tile.face;
    let mut best: Option<((u32, u32), Vec<Yaku>)> = None;

    for division in &result.completed {
        let mut candidates: Vec<Option<usize>> = Vec::new();
        if division.is_kokushi() || division.is_chiitoitsu() {
            candidates.push(None);
        } else {
            if division.pair() == Some(win_face) {
                candidates.push(None);
            }
            for (i, g) in division.groups.iter().enumerate() {
                if !g.group().furo && !matches!(g, Tsu::Toitsu(_)) && g.contains(win_face) {
                    candidates.push(Some(i));
                }
            }
            if candidates.is_empty() {
                continue;
            }
        }

        for win_group in candidates {
            let params = YakuParams {
                division,
                win_group,
                winning_tile,
                agari_type,
                menzen: player.hand.is_menzen(),
                seat_wind: state.seat_wind(seat),
                round_wind: state.round_wind,
                dealer: state.is_dealer(seat),
                riichi,
                trigger,
                first_go_around: state.is_first_go_around(seat),
                kinds,
                dora: state.dora_tiles(),
                ura: state.ura_tiles(),
                aka_count,
                nuki_count: player.nuki.len() as u8,
            };
            let matched = run_battery(&params, state.rule.local_yaku);
            if matched.is_empty() {
                continue;
            }
            let key = score_key(&matched);
            if best.as_ref().is_none_or(|(k, _)| key > *k) {
                best = Some((key, matched));
            }
        }
    }

    best.map(|(_, yaku)| yaku).unwrap_or_default()
}

fn run_battery(params: &YakuParams, local_enabled: bool) -> Vec<Yaku> {
    let mut matched: Vec<Yaku> = Vec::new();
    let mut has_yakuman = false;

    for def in BATTERY {
        if def.level == YakuLevel::Local && !local_enabled {
            continue;
        }
        if has_yakuman && !def.yakuman_tier {
            continue;
        }
        let before = matched.len();
        (def.eval)(params, &mut matched);
        if matched[before..].iter().any(|y| y.is_yakuman) {
            has_yakuman = true;
        }
    }

    if has_yakuman {
        matched.retain(|y| y.is_yakuman);
    }

    let invalidated: BTreeSet<&str> = matched
        .iter()
        .flat_map(|y| y.invalidates.iter().copied())
        .collect();
    matched.retain(|y| !invalidated.contains(y.name));
    matched
}

/// Comparison key for division selection: yakuman han first, total second.
fn score_key(yaku: &[Yaku]) -> (u32, u32) {
    (yakuman_han(yaku), han_total(yaku))
}

/// Total han over a matched list.
pub fn han_total(yaku: &[Yaku]) -> u32 {
    yaku.iter().map(|y| y.han as u32).sum()
}

/// Han carried by yakuman-flagged entries.
pub fn yakuman_han(yaku: &[Yaku]) -> u32 {
    yaku.iter()
        .filter(|y| y.is_yakuman)
        .map(|y| y.han as u32)
        .sum()
}

/// Yakuman multiples: each yakuman entry contributes `han / 13`, so a
/// double yakuman counts twice and combined yakuman add together.
pub fn yakuman_count(yaku: &[Yaku]) -> u32 {
    yaku.iter()
        .filter(|y| y.is_yakuman)
        .map(|y| y.han as u32 / 13)
        .sum()
}

/// Han visible before scoring (hidden yaku like ippatsu and ura-dora are
/// excluded); the number shown on tenpai previews.
pub fn visible_han(yaku: &[Yaku]) -> u32 {
    yaku.iter()
        .filter(|y| !y.is_hidden)
        .map(|y| y.han as u32)
        .sum()
}

/// Win legality gate. At least one matched yaku must be real (not an
/// extra), and the non-hidden han sum must reach the shibari threshold:
/// four under mangan shibari, otherwise one. Dora alone never legalizes.
pub fn is_yaku_over_shibari(rule: &RuleSet, yaku: &[Yaku]) -> bool {
    let has_real = yaku.iter().any(|y| !y.is_extra);
    let threshold = if rule.mangan_shibari { 4 } else { 1 };
    has_real && visible_han(yaku) >= threshold
}

// ---------------------------------------------------------------------------
// Yakuman tier
// ---------------------------------------------------------------------------

fn eval_tenhou_chiihou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if !(p.first_go_around && p.menzen && p.is_tsumo() && p.trigger == WinTrigger::Normal) {
        return;
    }
    if p.dealer {
        out.push(Yaku::yakuman("tenhou", 13));
    } else {
        out.push(Yaku::yakuman("chiihou", 13));
    }
}

fn eval_kokushi(p: &YakuParams, out: &mut Vec<Yaku>) {
    if !p.division.is_kokushi() {
        return;
    }
    let win_kind = p.winning_tile.face.kind_index().unwrap_or(0);
    if p.kinds[win_kind] == 2 {
        // The winning tile paired a single: the hand was the famous
        // thirteen-sided wait.
        out.push(Yaku::yakuman("kokushi-musou-13", 26));
    } else {
        out.push(Yaku::yakuman("kokushi-musou", 13));
    }
}

fn eval_suuankou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.concealed_triplet_count() != 4 {
        return;
    }
    if p.win_group.is_none() {
        out.push(Yaku::yakuman("suuankou-tanki", 26));
    } else {
        out.push(Yaku::yakuman("suuankou", 13));
    }
}

fn eval_daisangen(p: &YakuParams, out: &mut Vec<Yaku>) {
    let all_dragons = (1..=3).all(|v| p.has_triplet_of(SimpleTile::new(Suit::Dragon, v)));
    if all_dragons {
        out.push(Yaku::yakuman("daisangen", 13));
    }
}

fn eval_suushii(p: &YakuParams, out: &mut Vec<Yaku>) {
    let wind_triplets = (1..=4)
        .filter(|&v| p.has_triplet_of(SimpleTile::new(Suit::Wind, v)))
        .count();
    if wind_triplets == 4 {
        out.push(Yaku::yakuman("daisuushii", 26));
    } else if wind_triplets == 3
        && p.division.pair().is_some_and(|f| f.suit == Suit::Wind)
    {
        out.push(Yaku::yakuman("shousuushii", 13));
    }
}

fn eval_tsuuiisou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.every_face(|f| f.is_honor()) {
        out.push(Yaku::yakuman("tsuuiisou", 13));
    }
}

fn eval_chinroutou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.every_face(|f| f.is_terminal()) {
        out.push(Yaku::yakuman("chinroutou", 13));
    }
}

fn eval_ryuuiisou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.every_face(|f| f.is_green()) {
        out.push(Yaku::yakuman("ryuuiisou", 13));
    }
}

fn eval_chuuren(p: &YakuParams, out: &mut Vec<Yaku>) {
    if !p.menzen || p.kan_count() > 0 || p.division.is_kokushi() || p.division.is_chiitoitsu() {
        return;
    }
    let suit_start = match p.winning_tile.face.suit {
        Suit::Man => 0,
        Suit::Pin => 9,
        Suit::Sou => 18,
        _ => return,
    };
    // Pure one-suit 1112345678999 plus one extra tile.
    let mut in_suit = [0u8; 9];
    for k in 0..NUM_TILE_KINDS {
        if p.kinds[k] == 0 {
            continue;
        }
        if k < suit_start || k >= suit_start + 9 {
            return;
        }
        in_suit[k - suit_start] = p.kinds[k];
    }
    if in_suit[0] < 3 || in_suit[8] < 3 || in_suit[1..8].contains(&0) {
        return;
    }

    let v = p.winning_tile.face.value as usize - 1;
    let junsei = if v == 0 || v == 8 {
        in_suit[v] == 4
    } else {
        in_suit[v] == 2
    };
    if junsei {
        out.push(Yaku::yakuman("junsei-chuuren-poutou", 26));
    } else {
        out.push(Yaku::yakuman("chuuren-poutou", 13));
    }
}

fn eval_suukantsu(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.kan_count() == 4 {
        out.push(Yaku::yakuman("suukantsu", 13));
    }
}

fn eval_isshoku_yonjun(p: &YakuParams, out: &mut Vec<Yaku>) {
    let starts = p.shuntsu_starts();
    let four_identical = starts
        .iter()
        .any(|s| starts.iter().filter(|t| *t == s).count() == 4);
    if four_identical {
        out.push(Yaku::yakuman_over(
            "isshoku-yonjun",
            13,
            &["isshoku-sanjun", "ryanpeikou"],
        ));
    }
}

fn eval_daisharin(p: &YakuParams, out: &mut Vec<Yaku>) {
    if !p.division.is_chiitoitsu() {
        return;
    }
    for (start, name) in [(9usize, "daisharin"), (18, "daichikurin"), (0, "daisuurin")] {
        let wheel = (0..NUM_TILE_KINDS).all(|k| {
            let expect = if k >= start + 1 && k <= start + 7 { 2 } else { 0 };
            p.kinds[k] == expect
        });
        if wheel {
            out.push(Yaku::yakuman(name, 13));
            return;
        }
    }
}

fn eval_daichisei(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.division.is_chiitoitsu() && p.every_face(|f| f.is_honor()) {
        out.push(Yaku::yakuman_over("daichisei", 13, &["tsuuiisou"]));
    }
}

// ---------------------------------------------------------------------------
// Normal tier
// ---------------------------------------------------------------------------

fn eval_riichi(p: &YakuParams, out: &mut Vec<Yaku>) {
    match p.riichi {
        Some(r) if r.double => out.push(Yaku::plain("double-riichi", 2)),
        Some(_) => out.push(Yaku::plain("riichi", 1)),
        None => {}
    }
}

fn eval_ippatsu(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.riichi.is_some_and(|r| r.ippatsu) {
        out.push(Yaku::hidden("ippatsu", 1));
    }
}

fn eval_menzen_tsumo(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.menzen && p.is_tsumo() {
        out.push(Yaku::plain("menzen-tsumo", 1));
    }
}

fn eval_trigger_yaku(p: &YakuParams, out: &mut Vec<Yaku>) {
    match p.trigger {
        WinTrigger::Haitei if p.is_tsumo() => out.push(Yaku::plain("haitei", 1)),
        WinTrigger::Houtei if !p.is_tsumo() => out.push(Yaku::plain("houtei", 1)),
        WinTrigger::Rinshan if p.is_tsumo() => out.push(Yaku::plain("rinshan", 1)),
        WinTrigger::Chankan if !p.is_tsumo() => out.push(Yaku::plain("chankan", 1)),
        _ => {}
    }
}

fn eval_pinfu(p: &YakuParams, out: &mut Vec<Yaku>) {
    if !p.menzen || p.furo_count() > 0 {
        return;
    }
    let runs = p.shuntsu_starts().len();
    if runs != 4 || p.division.pair_count() != 1 {
        return;
    }
    let pair_ok = p.division.pair().is_some_and(|f| !p.is_yakuhai_face(f));
    if pair_ok && p.is_ryanmen_win() {
        out.push(Yaku::plain("pinfu", 1));
    }
}

fn eval_tanyao(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.every_face(|f| !f.is_yaochuu()) {
        out.push(Yaku::plain("tanyao", 1));
    }
}

fn eval_chiitoitsu(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.division.is_chiitoitsu() {
        out.push(Yaku::plain("chiitoitsu", 2));
    }
}

fn eval_yakuhai(p: &YakuParams, out: &mut Vec<Yaku>) {
    const DRAGON_NAMES: [&str; 3] = ["haku", "hatsu", "chun"];
    for v in 1..=3u8 {
        if p.has_triplet_of(SimpleTile::new(Suit::Dragon, v)) {
            out.push(Yaku::plain(DRAGON_NAMES[v as usize - 1], 1));
        }
    }
    // Seat and round wind are separate entries; a double wind yields both.
    if p.has_triplet_of(p.round_wind.tile()) {
        out.push(Yaku::plain("bakaze", 1));
    }
    if p.has_triplet_of(p.seat_wind.tile()) {
        out.push(Yaku::plain("jikaze", 1));
    }
}

fn eval_toitoi(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.triplet_faces().len() == 4 {
        out.push(Yaku::plain("toitoi", 2));
    }
}

fn eval_sanankou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.concealed_triplet_count() == 3 {
        out.push(Yaku::plain("sanankou", 2));
    }
}

fn eval_sankantsu(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.kan_count() == 3 {
        out.push(Yaku::plain("sankantsu", 2));
    }
}

fn eval_shousangen(p: &YakuParams, out: &mut Vec<Yaku>) {
    let dragon_triplets = (1..=3)
        .filter(|&v| p.has_triplet_of(SimpleTile::new(Suit::Dragon, v)))
        .count();
    let dragon_pair = p.division.pair().is_some_and(|f| f.suit == Suit::Dragon);
    if dragon_triplets == 2 && dragon_pair {
        out.push(Yaku::plain("shousangen", 2));
    }
}

fn eval_honroutou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.shuntsu_starts().is_empty() && p.every_face(|f| f.is_yaochuu()) {
        out.push(Yaku::plain("honroutou", 2));
    }
}

fn eval_peikou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if !p.menzen {
        return;
    }
    let mut starts = p.shuntsu_starts();
    starts.sort();
    let mut identical_pairs = 0;
    let mut i = 0;
    while i + 1 < starts.len() {
        if starts[i] == starts[i + 1] {
            identical_pairs += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    if identical_pairs == 2 {
        out.push(Yaku::plain("ryanpeikou", 3));
    } else if identical_pairs == 1 {
        out.push(Yaku::plain("iipeikou", 1));
    }
}

fn eval_ittsuu(p: &YakuParams, out: &mut Vec<Yaku>) {
    let starts = p.shuntsu_starts();
    for suit in [Suit::Man, Suit::Pin, Suit::Sou] {
        let has = |v| starts.contains(&SimpleTile::new(suit, v));
        if has(1) && has(4) && has(7) {
            out.push(Yaku::plain("ittsuu", if p.menzen { 2 } else { 1 }));
            return;
        }
    }
}

fn eval_sanshoku_doujun(p: &YakuParams, out: &mut Vec<Yaku>) {
    let starts = p.shuntsu_starts();
    for v in 1..=7u8 {
        let all = [Suit::Man, Suit::Pin, Suit::Sou]
            .iter()
            .all(|&s| starts.contains(&SimpleTile::new(s, v)));
        if all {
            out.push(Yaku::plain(
                "sanshoku-doujun",
                if p.menzen { 2 } else { 1 },
            ));
            return;
        }
    }
}

fn eval_sanshoku_doukou(p: &YakuParams, out: &mut Vec<Yaku>) {
    for v in 1..=9u8 {
        let all = [Suit::Man, Suit::Pin, Suit::Sou]
            .iter()
            .all(|&s| p.has_triplet_of(SimpleTile::new(s, v)));
        if all {
            out.push(Yaku::plain("sanshoku-doukou", 2));
            return;
        }
    }
}

fn eval_chanta_junchan(p: &YakuParams, out: &mut Vec<Yaku>) {
    // Without a run the shape is honroutou or chinroutou territory.
    if p.shuntsu_starts().is_empty() || p.division.is_chiitoitsu() || p.division.is_kokushi() {
        return;
    }
    let group_touches = |t: &Tsu, pred: &dyn Fn(SimpleTile) -> bool| match t {
        Tsu::Shuntsu(g) => pred(g.tile) || pred(SimpleTile::new(g.tile.suit, g.tile.value + 2)),
        _ => pred(t.tile()),
    };
    let all_terminal = p
        .groups()
        .iter()
        .all(|t| group_touches(t, &|f: SimpleTile| f.is_terminal()));
    if all_terminal {
        out.push(Yaku::plain("junchan", if p.menzen { 3 } else { 2 }));
        return;
    }
    let all_yaochuu = p
        .groups()
        .iter()
        .all(|t| group_touches(t, &|f: SimpleTile| f.is_yaochuu()));
    let has_honor = (WIND_START..NUM_TILE_KINDS).any(|k| p.kinds[k] > 0);
    if all_yaochuu && has_honor {
        out.push(Yaku::plain("chanta", if p.menzen { 2 } else { 1 }));
    }
}

fn eval_honitsu_chinitsu(p: &YakuParams, out: &mut Vec<Yaku>) {
    let (man, pin, sou, winds, dragons) = p.categories_used();
    let number_suits = man as u8 + pin as u8 + sou as u8;
    let honors = winds || dragons;
    if number_suits != 1 {
        return;
    }
    if honors {
        out.push(Yaku::plain("honitsu", if p.menzen { 3 } else { 2 }));
    } else {
        out.push(Yaku::plain("chinitsu", if p.menzen { 6 } else { 5 }));
    }
}

// ---------------------------------------------------------------------------
// Local tier
// ---------------------------------------------------------------------------

fn eval_renhou(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.agari_type == AgariType::Ron && p.first_go_around && !p.dealer {
        out.push(Yaku::plain("renhou", 5));
    }
}

fn eval_uumensai(p: &YakuParams, out: &mut Vec<Yaku>) {
    let (man, pin, sou, winds, dragons) = p.categories_used();
    if man && pin && sou && winds && dragons {
        out.push(Yaku::plain("uumensai", 2));
    }
}

fn eval_sanrenkou(p: &YakuParams, out: &mut Vec<Yaku>) {
    let faces = p.triplet_faces();
    let consecutive = faces.iter().any(|f| {
        f.suit.is_number()
            && f.value <= 7
            && faces.contains(&SimpleTile::new(f.suit, f.value + 1))
            && faces.contains(&SimpleTile::new(f.suit, f.value + 2))
    });
    if consecutive {
        out.push(Yaku::plain("sanrenkou", 2));
    }
}

fn eval_isshoku_sanjun(p: &YakuParams, out: &mut Vec<Yaku>) {
    let starts = p.shuntsu_starts();
    let three_identical = starts
        .iter()
        .any(|s| starts.iter().filter(|t| *t == s).count() == 3);
    if three_identical {
        out.push(Yaku {
            name: "isshoku-sanjun",
            han: 2,
            is_extra: false,
            is_hidden: false,
            is_yakuman: false,
            invalidates: &["iipeikou"],
        });
    }
}

fn eval_shiiaruraotai(p: &YakuParams, out: &mut Vec<Yaku>) {
    if p.furo_count() == 4 && p.win_group.is_none() {
        out.push(Yaku::plain("shiiaruraotai", 1));
    }
}

// ---------------------------------------------------------------------------
// Extras
// ---------------------------------------------------------------------------

fn eval_dora(p: &YakuParams, out: &mut Vec<Yaku>) {
    let count_face = |face: SimpleTile| -> u8 {
        let mut n = face.kind_index().map_or(0, |k| p.kinds[k]);
        // Extracted north tiles still count toward a north dora.
        if face == SimpleTile::new(Suit::Wind, NORTH) {
            n += p.nuki_count;
        }
        n
    };

    let dora: u8 = p.dora.iter().map(|&f| count_face(f)).sum();
    if dora > 0 {
        out.push(Yaku::extra("dora", dora));
    }
    if p.aka_count > 0 {
        out.push(Yaku::extra("aka-dora", p.aka_count));
    }
    if p.riichi.is_some() {
        let ura: u8 = p.ura.iter().map(|&f| count_face(f)).sum();
        if ura > 0 {
            out.push(Yaku {
                name: "ura-dora",
                han: ura,
                is_extra: true,
                is_hidden: true,
                is_yakuman: false,
                invalidates: NO_INVALIDATES,
            });
        }
    }
    if p.nuki_count > 0 {
        out.push(Yaku::extra("nuki-dora", p.nuki_count));
    }
}
