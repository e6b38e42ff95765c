//! Fixed-table scoring and the scoreboards handed to orchestration.
//!
//! Points come from two 14-entry lookup tables indexed by han, one for
//! the dealer and one for everyone else. Yakuman hands ignore han lookup
//! and pay `multiples * table[13]`, so combined and double yakuman stack
//! linearly.

use crate::state::{AgariType, GameState, Seat};
use crate::tenpai::calculate_tenpai;
use crate::yaku::{calculate_yaku, han_total, is_yaku_over_shibari, yakuman_count, Yaku};
use janten_core::errors::{JantenError, JantenResult};
use janten_core::tile::Tile;
use serde::Serialize;
use serde_json::{json, Value};

pub const DEALER_TABLE: [u32; 14] = [
    0, 1500, 2900, 5800, 11600, 12000, 18000, 18000, 24000, 24000, 24000, 36000, 36000, 48000,
];

pub const NON_DEALER_TABLE: [u32; 14] = [
    0, 1000, 2000, 3900, 7700, 8000, 12000, 12000, 16000, 16000, 16000, 24000, 24000, 32000,
];

/// Point value for a win: `multiples * table[13]` for yakuman hands,
/// otherwise `table[min(han, 13)]`.
pub fn score_for(han: u32, yakuman_multiples: u32, is_dealer: bool) -> u32 {
    let table = if is_dealer {
        &DEALER_TABLE
    } else {
        &NON_DEALER_TABLE
    };
    if yakuman_multiples > 0 {
        yakuman_multiples * table[13]
    } else {
        table[han.min(13) as usize]
    }
}

/// Result sheet of a completed win.
#[derive(Debug, Clone, Serialize)]
pub struct AgariScoreboard {
    pub winner: Seat,
    /// The discarder on a ron; `None` on tsumo.
    pub loser: Option<Seat>,
    pub agari_type: AgariType,
    pub winning_tile: Tile,
    pub yaku: Vec<Yaku>,
    pub han: u32,
    pub yakuman: u32,
    pub score: u32,
    pub dora_indicators: Vec<Tile>,
    /// Revealed only when the winner was in riichi; masked otherwise.
    pub ura_indicators: Option<Vec<Tile>>,
}

impl AgariScoreboard {
    /// Broadcast payload for the orchestration layer's event log.
    pub fn event(&self) -> Value {
        json!({
            "type": "agari",
            "winner": self.winner,
            "loser": self.loser,
            "han": self.han,
            "yakuman": self.yakuman,
            "score": self.score,
            "yaku": self.yaku,
            "dora_indicators": self.dora_indicators,
            "ura_indicators": self.ura_indicators,
        })
    }
}

/// Build the scoreboard for a win. Rejects wins the legality generator
/// would not have offered (no real yaku over shibari).
pub fn create_agari_scoreboard(
    state: &GameState,
    winner: Seat,
    agari_type: AgariType,
    winning_tile: Tile,
    loser: Option<Seat>,
) -> JantenResult<AgariScoreboard> {
    let yaku = calculate_yaku(state, winner, agari_type, winning_tile);
    if !is_yaku_over_shibari(&state.rule, &yaku) {
        return Err(JantenError::IllegalAction {
            message: format!("seat {winner} has no legal yaku for this win"),
        });
    }

    let yakuman = yakuman_count(&yaku);
    let han = han_total(&yaku);
    let score = score_for(han, yakuman, state.is_dealer(winner));

    let in_riichi = state.players[winner].riichi_turn.is_some();
    Ok(AgariScoreboard {
        winner,
        loser,
        agari_type,
        winning_tile,
        yaku,
        han,
        yakuman,
        score,
        dora_indicators: state.dora_indicators.clone(),
        ura_indicators: in_riichi.then(|| state.ura_indicators.clone()),
    })
}

/// Result sheet of an exhausted-wall draw: who finished tenpai. The
/// draw-payment arithmetic belongs to orchestration.
#[derive(Debug, Clone, Serialize)]
pub struct RyukyokuScoreboard {
    pub tenpai: Vec<bool>,
}

impl RyukyokuScoreboard {
    pub fn event(&self) -> Value {
        json!({
            "type": "ryukyoku",
            "tenpai": self.tenpai,
        })
    }
}

pub fn create_ryukyoku_scoreboard(state: &GameState) -> RyukyokuScoreboard {
    let tenpai = (0..state.players.len())
        .map(|seat| calculate_tenpai(state, seat, None).is_some())
        .collect();
    RyukyokuScoreboard { tenpai }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_exactness() {
        assert_eq!(score_for(5, 0, true), 12000);
        assert_eq!(score_for(5, 0, false), 8000);
        assert_eq!(score_for(13, 1, false), 32000);
        assert_eq!(score_for(13, 1, true), 48000);
        // Double yakuman: han 26 carries two multiples.
        assert_eq!(score_for(26, 2, true), 96000);
    }

    #[test]
    fn kazoe_clamps_at_thirteen() {
        assert_eq!(score_for(20, 0, false), NON_DEALER_TABLE[13]);
        assert_eq!(score_for(1, 0, false), 1000);
        assert_eq!(score_for(0, 0, true), 0);
    }
}
