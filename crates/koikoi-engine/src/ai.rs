//! Computer opponent
//!
//! Stateless decision functions keyed by a difficulty tier. Every
//! decision is a pure function of the state, the tier, and a PRNG
//! derived from the round seed plus the history length (never from
//! ambient entropy), so the same state always produces the same
//! command and both peers can run the AI locally without diverging.

use serde::{Deserialize, Serialize};

use crate::cards::{category_of, CardId};
use crate::engine::Command;
use crate::random::{stream, SeededRng};
use crate::scoring;
use crate::state::{MatchState, Phase};
use crate::yaku;

/// Difficulty tiers, weakest to strongest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    Intermediate,
    Expert,
}

/// PRNG for one decision point, derived entirely from state
fn decision_rng(state: &MatchState) -> SeededRng {
    SeededRng::new(state.round.seed)
        .for_stream(stream::AI)
        .for_stream(state.round.history.len() as u64)
}

/// The command the AI would issue for the current phase, or `None`
/// when the round/match is waiting on the host (round end, game over).
///
/// System phases return the corresponding system-step command, so a
/// host can drive an entire AI turn by applying whatever this returns.
pub fn choose_command(state: &MatchState, difficulty: Difficulty) -> Option<Command> {
    match state.round.phase {
        Phase::SelectHandCard => Some(Command::PlayHandCard {
            card: choose_hand_card(state, difficulty),
        }),
        Phase::SelectFieldMatch => Some(Command::ChooseFieldMatch {
            field_card: choose_match(state, difficulty),
        }),
        Phase::DrawingDeck => Some(Command::AdvanceDraw),
        Phase::DrawReveal => Some(Command::CommitDrawnCard),
        Phase::SelectDrawMatch => Some(Command::ChooseDrawMatch {
            field_card: choose_match(state, difficulty),
        }),
        Phase::CheckYaku => Some(Command::EvaluateTurn),
        Phase::KoikoiDecision => Some(Command::DeclareKoikoi {
            continue_playing: decide_koikoi(state, difficulty),
        }),
        Phase::RoundEnd | Phase::GameOver => None,
    }
}

/// How much capturing `cards` would advance `captured` toward the
/// enabled patterns, weighted by each pattern's point value.
fn progress_gain(captured: &[CardId], cards: &[CardId], state: &MatchState) -> u32 {
    let before = yaku::progress(captured, &state.config);
    let mut extended = captured.to_vec();
    extended.extend_from_slice(cards);
    let after = yaku::progress(&extended, &state.config);

    let mut gain = 0;
    for (b, a) in before.iter().zip(after.iter()) {
        let points = state.config.yaku.rule(a.yaku).points.max(1);
        if a.have >= a.need && b.have < b.need {
            // Completing a pattern outweighs inching toward one
            gain += 10 * points;
        } else {
            gain += (a.have - b.have) * points;
        }
    }
    gain
}

/// Which hand card the current seat should play
pub fn choose_hand_card(state: &MatchState, difficulty: Difficulty) -> CardId {
    let seat = state.round.turn;
    let hand = &state.round.players[seat.index()].hand;
    debug_assert!(!hand.is_empty());

    match difficulty {
        Difficulty::Novice => {
            let mut rng = decision_rng(state);
            hand[rng.next_range(hand.len() as u32) as usize]
        }
        Difficulty::Intermediate => {
            // Greedy: take the best-category pair available, else
            // dump the lowest-category card.
            let mut best: Option<(u8, CardId)> = None;
            for card in hand {
                for candidate in state.round.field_matches(*card) {
                    let value = category_of(candidate).rank().max(category_of(*card).rank());
                    let better = match best {
                        None => true,
                        Some((v, id)) => value > v || (value == v && card.0 < id.0),
                    };
                    if better {
                        best = Some((value, *card));
                    }
                }
            }
            if let Some((_, card)) = best {
                return card;
            }
            *hand
                .iter()
                .min_by_key(|id| (category_of(**id).rank(), id.0))
                .unwrap_or(&hand[0])
        }
        Difficulty::Expert => {
            let my_captured = &state.round.players[seat.index()].captured;
            let opp_captured = &state.round.players[seat.opponent().index()].captured;

            let mut best = hand[0];
            let mut best_score = i64::MIN;
            for card in hand {
                let matches = state.round.field_matches(*card);
                let score = if matches.is_empty() {
                    // Discard: the opponent may pick this card up
                    let opp_gain = progress_gain(opp_captured, &[*card], state) as i64;
                    -(category_of(*card).rank() as i64) - opp_gain
                } else {
                    // Best capture this play could resolve to
                    matches
                        .iter()
                        .map(|m| {
                            let own = progress_gain(my_captured, &[*card, *m], state) as i64;
                            let denial = progress_gain(opp_captured, &[*m], state) as i64;
                            own + denial / 2
                        })
                        .max()
                        .unwrap_or(0)
                };
                // Deterministic tie-break: lowest id wins
                if score > best_score || (score == best_score && card.0 < best.0) {
                    best_score = score;
                    best = *card;
                }
            }
            best
        }
    }
}

/// Which field candidate to pair with the pending card
pub fn choose_match(state: &MatchState, difficulty: Difficulty) -> CardId {
    let candidates: &[CardId] = state
        .round
        .selection
        .as_ref()
        .map(|sel| sel.candidates.as_slice())
        .unwrap_or(&[]);
    debug_assert!(!candidates.is_empty());
    if candidates.len() == 1 {
        return candidates[0];
    }

    match difficulty {
        Difficulty::Novice => {
            let mut rng = decision_rng(state);
            candidates[rng.next_range(candidates.len() as u32) as usize]
        }
        // bright > seed > ribbon > plain, remaining ties by lowest id
        Difficulty::Intermediate | Difficulty::Expert => candidates
            .iter()
            .copied()
            .min_by_key(|id| (std::cmp::Reverse(category_of(*id).rank()), id.0))
            .unwrap_or(candidates[0]),
    }
}

/// Continue (true) or stop (false) at a koikoi decision
pub fn decide_koikoi(state: &MatchState, difficulty: Difficulty) -> bool {
    let seat = state.round.turn;
    let player = &state.round.players[seat.index()];
    let opponent = &state.round.players[seat.opponent().index()];

    // Continuing is illegal at the cap or with no cards left; the
    // engine would reject it, so never ask for it.
    let cap = state.config.koikoi_cap;
    if cap != 0 && player.koikoi_count >= cap {
        return false;
    }
    if state.round.players.iter().all(|p| p.hand.is_empty()) {
        return false;
    }

    let hits = yaku::evaluate(&player.captured, &state.config);
    let if_stopped = scoring::score_round(
        &hits,
        seat == state.round.dealer,
        player.koikoi_count,
        opponent.koikoi_count,
        &state.config,
    )
    .total;

    let pile_left = state.round.pile.len();
    let lead = state.totals[seat.index()] as i64 - state.totals[seat.opponent().index()] as i64;

    match difficulty {
        Difficulty::Novice => {
            // Reckless: mostly pushes on, whatever the position
            let mut rng = decision_rng(state);
            rng.next_percent() < 70
        }
        Difficulty::Intermediate => {
            if if_stopped >= 4 || pile_left < 8 {
                return false;
            }
            let mut rng = decision_rng(state);
            rng.next_percent() < 40
        }
        Difficulty::Expert => {
            // Bank anything substantial; chase only cheap early yaku
            // from a position that is not already losing
            if_stopped <= 2 && pile_left >= 12 && lead >= 0 && !player.hand.is_empty()
        }
    }
}
