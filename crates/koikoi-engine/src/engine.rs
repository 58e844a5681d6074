//! Command application and match lifecycle
//!
//! The single mutation surface of the engine: `(state, command) ->
//! new state`. An illegal command (wrong phase, or a target id that
//! is not currently valid) returns `None` and the caller keeps its
//! state untouched. That is a contract, not an error: commands arrive
//! out of order over unreliable transports and must be safely
//! ignorable.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::config::{DealerRotation, MatchConfig, NoYakuPolicy};
use crate::scoring;
use crate::state::{
    CaptureSource, HistoryEntry, MatchState, MatchVerdict, PendingSelection, Phase, RoundOutcome,
    RoundState, Seat,
};
use crate::yaku;

/// Everything a caller (human UI, AI driver, or remote peer) can ask
/// the engine to do. Serde-serializable because the transport layer
/// ships these verbatim between peers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Play a card from the current hand
    PlayHandCard { card: CardId },
    /// Pick which matching field card the played card pairs with
    ChooseFieldMatch { field_card: CardId },
    /// Take the played card back into the hand at `index`
    CancelHandSelection { index: usize },
    /// System step: draw the next pile card (or skip if exhausted)
    AdvanceDraw,
    /// System step: resolve where the revealed card goes
    CommitDrawnCard,
    /// Pick which matching field card the drawn card pairs with
    ChooseDrawMatch { field_card: CardId },
    /// System step: look for newly completed patterns
    EvaluateTurn,
    /// Continue (koikoi) or stop and score the round
    DeclareKoikoi { continue_playing: bool },
    /// Deal the next round from the supplied seed
    StartNextRound { seed: u64 },
    /// Rebuild the match from scratch; legal in any phase
    RestartMatch { config: MatchConfig, seed: u64 },
}

impl MatchState {
    /// Apply one command. `None` means the command is illegal in the
    /// current state and nothing changed.
    pub fn apply(&self, command: &Command) -> Option<MatchState> {
        // Restart is the one command legal everywhere, including a
        // finished match.
        if let Command::RestartMatch { config, seed } = command {
            return MatchState::new(config.clone(), *seed).ok();
        }

        match (self.round.phase, command) {
            (Phase::SelectHandCard, Command::PlayHandCard { card }) => self.play_hand_card(*card),
            (Phase::SelectFieldMatch, Command::ChooseFieldMatch { field_card }) => {
                self.choose_match(*field_card)
            }
            (Phase::SelectFieldMatch, Command::CancelHandSelection { index }) => {
                self.cancel_hand_selection(*index)
            }
            (Phase::DrawingDeck, Command::AdvanceDraw) => self.advance_draw(),
            (Phase::DrawReveal, Command::CommitDrawnCard) => self.commit_drawn_card(),
            (Phase::SelectDrawMatch, Command::ChooseDrawMatch { field_card }) => {
                self.choose_match(*field_card)
            }
            (Phase::CheckYaku, Command::EvaluateTurn) => self.evaluate_turn(),
            (Phase::KoikoiDecision, Command::DeclareKoikoi { continue_playing }) => {
                self.declare(*continue_playing)
            }
            (Phase::RoundEnd, Command::StartNextRound { seed }) => self.start_next_round(*seed),
            _ => None,
        }
    }

    fn play_hand_card(&self, card: CardId) -> Option<MatchState> {
        let seat = self.round.turn;
        let pos = self.round.players[seat.index()]
            .hand
            .iter()
            .position(|id| *id == card)?;
        let candidates = self.round.field_matches(card);

        let mut next = self.clone();
        next.round.players[seat.index()].hand.remove(pos);
        if candidates.is_empty() {
            next.round.field.push(card);
            next.round.history.push(HistoryEntry::PlacedOnField {
                seat,
                card,
                source: CaptureSource::Hand,
            });
            next.round.phase = Phase::DrawingDeck;
        } else {
            next.round.selection = Some(PendingSelection {
                card,
                source: CaptureSource::Hand,
                hand_index: pos,
                candidates,
            });
            next.round.phase = Phase::SelectFieldMatch;
        }
        Some(next)
    }

    /// Capture resolution, shared by the hand and draw match phases.
    fn choose_match(&self, field_card: CardId) -> Option<MatchState> {
        let mut next = self.clone();
        let sel = next.round.selection.take()?;
        if !sel.candidates.contains(&field_card) {
            return None;
        }
        let seat = next.round.turn;

        // A month already showing three field cards is swept whole:
        // any choice takes the full group.
        let matched: Vec<CardId> = if sel.candidates.len() == 3 {
            sel.candidates.clone()
        } else {
            vec![field_card]
        };

        next.round.field.retain(|id| !matched.contains(id));
        let player = &mut next.round.players[seat.index()];
        player.captured.push(sel.card);
        player.captured.extend(matched.iter().copied());

        next.round.history.push(HistoryEntry::Captured {
            seat,
            played: sel.card,
            matched,
            source: sel.source,
        });
        next.round.phase = match sel.source {
            CaptureSource::Hand => Phase::DrawingDeck,
            CaptureSource::Draw => Phase::CheckYaku,
        };
        Some(next)
    }

    fn cancel_hand_selection(&self, index: usize) -> Option<MatchState> {
        let mut next = self.clone();
        let sel = next.round.selection.take()?;
        let seat = next.round.turn;
        let hand = &mut next.round.players[seat.index()].hand;
        let at = index.min(hand.len());
        hand.insert(at, sel.card);
        next.round.phase = Phase::SelectHandCard;
        Some(next)
    }

    fn advance_draw(&self) -> Option<MatchState> {
        let mut next = self.clone();
        let seat = next.round.turn;
        match next.round.pile.pop() {
            // Exhausted pile: nothing to reveal, straight to the
            // pattern check.
            None => next.round.phase = Phase::CheckYaku,
            Some(card) => {
                next.round.history.push(HistoryEntry::Drew { seat, card });
                next.round.selection = Some(PendingSelection {
                    card,
                    source: CaptureSource::Draw,
                    hand_index: 0,
                    candidates: Vec::new(),
                });
                next.round.phase = Phase::DrawReveal;
            }
        }
        Some(next)
    }

    fn commit_drawn_card(&self) -> Option<MatchState> {
        let mut next = self.clone();
        let sel = next.round.selection.take()?;
        let seat = next.round.turn;
        let candidates = next.round.field_matches(sel.card);
        if candidates.is_empty() {
            next.round.field.push(sel.card);
            next.round.history.push(HistoryEntry::PlacedOnField {
                seat,
                card: sel.card,
                source: CaptureSource::Draw,
            });
            next.round.phase = Phase::CheckYaku;
        } else {
            next.round.selection = Some(PendingSelection { candidates, ..sel });
            next.round.phase = Phase::SelectDrawMatch;
        }
        Some(next)
    }

    fn evaluate_turn(&self) -> Option<MatchState> {
        let mut next = self.clone();
        let seat = next.round.turn;
        let player = &next.round.players[seat.index()];
        let hits = yaku::evaluate(&player.captured, &next.config);
        let new: Vec<_> = hits
            .iter()
            .map(|h| h.yaku)
            .filter(|y| !player.banked.contains(y))
            .collect();

        if !new.is_empty() {
            next.round.history.push(HistoryEntry::NewYaku { seat, yaku: new });
            next.round.phase = Phase::KoikoiDecision;
            return Some(next);
        }

        if next.round.players.iter().all(|p| p.hand.is_empty()) {
            // Cards ran out with nothing pending on either side
            next.settle_drawn();
            return Some(next);
        }

        next.round.turn = seat.opponent();
        next.round.phase = Phase::SelectHandCard;
        Some(next)
    }

    fn declare(&self, continue_playing: bool) -> Option<MatchState> {
        let seat = self.round.turn;
        let player = &self.round.players[seat.index()];
        let hits = yaku::evaluate(&player.captured, &self.config);

        if continue_playing {
            let cap = self.config.koikoi_cap;
            if cap != 0 && player.koikoi_count >= cap {
                return None;
            }
            // No cards left to play for: continuing is refused and
            // the caller falls back to the stop affordance.
            if self.round.players.iter().all(|p| p.hand.is_empty()) {
                return None;
            }

            let mut next = self.clone();
            let player = &mut next.round.players[seat.index()];
            player.koikoi_count += 1;
            player.banked = hits.iter().map(|h| h.yaku).collect();
            let count = player.koikoi_count;
            next.round.history.push(HistoryEntry::Koikoi { seat, count });
            next.round.turn = seat.opponent();
            next.round.phase = Phase::SelectHandCard;
            Some(next)
        } else {
            let opponent = &self.round.players[seat.opponent().index()];
            let breakdown = scoring::score_round(
                &hits,
                seat == self.round.dealer,
                player.koikoi_count,
                opponent.koikoi_count,
                &self.config,
            );

            let mut next = self.clone();
            next.round.history.push(HistoryEntry::Stopped { seat });
            next.settle(Some(seat), breakdown.total);
            Some(next)
        }
    }

    fn start_next_round(&self, seed: u64) -> Option<MatchState> {
        let last = self.ledger.last()?;
        let dealer = next_dealer(self.config.dealer_rotation, last);

        let mut next = self.clone();
        next.round_number += 1;
        next.round = RoundState::new(seed, dealer);
        Some(next)
    }

    /// Round ran out of cards with no pattern pending.
    fn settle_drawn(&mut self) {
        let (winner, points) = match self.config.no_yaku_policy {
            NoYakuPolicy::BothZero => (None, 0),
            NoYakuPolicy::SeatBased { dealer_points, .. } => {
                if dealer_points > 0 {
                    (Some(self.round.dealer), dealer_points)
                } else {
                    (None, 0)
                }
            }
        };
        self.settle(winner, points);
    }

    /// Book the round outcome and decide whether the match is over.
    fn settle(&mut self, winner: Option<Seat>, points: u32) {
        self.round
            .history
            .push(HistoryEntry::RoundSettled { winner, points });
        if let Some(w) = winner {
            self.totals[w.index()] += points;
        }
        self.ledger.push(RoundOutcome {
            winner,
            points,
            dealer: self.round.dealer,
        });
        self.round.selection = None;

        let played = self.ledger.len() as u32;
        let target = self.config.rounds as u32;
        let decided = self.totals[0] != self.totals[1];
        let over = played >= target
            && match self.config.overtime {
                crate::config::OvertimePolicy::Off => true,
                crate::config::OvertimePolicy::PlayUntilDecisive => decided,
                crate::config::OvertimePolicy::FixedExtraRounds(extra) => {
                    decided || played >= target + extra as u32
                }
            };

        if over {
            self.verdict = Some(if self.totals[0] > self.totals[1] {
                MatchVerdict::Winner(Seat::First)
            } else if self.totals[1] > self.totals[0] {
                MatchVerdict::Winner(Seat::Second)
            } else {
                MatchVerdict::Drawn
            });
            self.round.phase = Phase::GameOver;
        } else {
            self.round.phase = Phase::RoundEnd;
        }
    }
}

/// Who deals the round after `outcome`, under the configured rotation
pub fn next_dealer(rotation: DealerRotation, outcome: &RoundOutcome) -> Seat {
    match rotation {
        DealerRotation::WinnerKeeps => outcome.winner.unwrap_or(outcome.dealer),
        DealerRotation::LoserBecomesDealer => outcome
            .winner
            .map(Seat::opponent)
            .unwrap_or(outcome.dealer),
        DealerRotation::Alternate => outcome.dealer.opponent(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CRANE, CURTAIN, MOON};
    use crate::config::OvertimePolicy;
    use crate::state::PlayerState;

    fn player(hand: Vec<CardId>) -> PlayerState {
        PlayerState {
            hand,
            captured: Vec::new(),
            banked: Vec::new(),
            koikoi_count: 0,
        }
    }

    fn round(
        hands: [Vec<CardId>; 2],
        field: Vec<CardId>,
        pile: Vec<CardId>,
        phase: Phase,
    ) -> RoundState {
        let [a, b] = hands;
        RoundState {
            phase,
            players: [player(a), player(b)],
            field,
            pile,
            turn: Seat::First,
            dealer: Seat::First,
            selection: None,
            seed: 1,
            history: Vec::new(),
        }
    }

    fn match_with(round: RoundState) -> MatchState {
        MatchState {
            config: MatchConfig::default(),
            round_number: 1,
            round,
            ledger: Vec::new(),
            totals: [0, 0],
            verdict: None,
        }
    }

    // CardId(2) is a January plain; CardId(0)/CardId(1) are January.
    // CardId(16) is May, CardId(20) is June.

    #[test]
    fn test_play_with_match_enters_selection() {
        let state = match_with(round(
            [vec![CardId(2)], vec![CardId(20)]],
            vec![CardId(0), CardId(1), CardId(16)],
            vec![CardId(44)],
            Phase::SelectHandCard,
        ));

        let next = state
            .apply(&Command::PlayHandCard { card: CardId(2) })
            .expect("legal play");
        assert_eq!(next.round.phase, Phase::SelectFieldMatch);
        let sel = next.round.selection.as_ref().unwrap();
        assert_eq!(sel.card, CardId(2));
        assert_eq!(sel.candidates, vec![CardId(0), CardId(1)]);
        assert!(next.round.players[0].hand.is_empty());

        // Choosing the crane captures played card + crane only
        let after = next
            .apply(&Command::ChooseFieldMatch {
                field_card: CardId(0),
            })
            .expect("legal choice");
        assert_eq!(after.round.phase, Phase::DrawingDeck);
        assert_eq!(after.round.players[0].captured, vec![CardId(2), CardId(0)]);
        assert_eq!(after.round.field, vec![CardId(1), CardId(16)]);
        assert!(after.round.selection.is_none());
    }

    #[test]
    fn test_play_without_match_goes_to_field() {
        let state = match_with(round(
            [vec![CardId(2)], vec![CardId(20)]],
            vec![CardId(16)],
            vec![],
            Phase::SelectHandCard,
        ));

        let next = state
            .apply(&Command::PlayHandCard { card: CardId(2) })
            .unwrap();
        assert_eq!(next.round.phase, Phase::DrawingDeck);
        assert_eq!(next.round.field, vec![CardId(16), CardId(2)]);
        assert!(matches!(
            next.round.history.last(),
            Some(HistoryEntry::PlacedOnField { .. })
        ));
    }

    #[test]
    fn test_cancel_restores_hand_position() {
        let state = match_with(round(
            [vec![CardId(6), CardId(2), CardId(10)], vec![CardId(20)]],
            vec![CardId(0)],
            vec![],
            Phase::SelectHandCard,
        ));

        let next = state
            .apply(&Command::PlayHandCard { card: CardId(2) })
            .unwrap();
        assert_eq!(next.round.phase, Phase::SelectFieldMatch);

        let back = next
            .apply(&Command::CancelHandSelection { index: 1 })
            .unwrap();
        assert_eq!(back.round.phase, Phase::SelectHandCard);
        assert_eq!(
            back.round.players[0].hand,
            vec![CardId(6), CardId(2), CardId(10)]
        );
        assert!(back.round.selection.is_none());

        // Out-of-range index clamps instead of failing
        let clamped = next
            .apply(&Command::CancelHandSelection { index: 99 })
            .unwrap();
        assert_eq!(
            clamped.round.players[0].hand,
            vec![CardId(6), CardId(10), CardId(2)]
        );
    }

    #[test]
    fn test_three_field_cards_swept_whole() {
        let state = match_with(round(
            [vec![CardId(3)], vec![CardId(20)]],
            vec![CardId(0), CardId(1), CardId(2), CardId(16)],
            vec![],
            Phase::SelectHandCard,
        ));

        let next = state
            .apply(&Command::PlayHandCard { card: CardId(3) })
            .unwrap();
        let sel = next.round.selection.as_ref().unwrap();
        assert_eq!(sel.candidates.len(), 3);

        // Any of the three resolves the whole month
        let after = next
            .apply(&Command::ChooseFieldMatch {
                field_card: CardId(1),
            })
            .unwrap();
        assert_eq!(
            after.round.players[0].captured,
            vec![CardId(3), CardId(0), CardId(1), CardId(2)]
        );
        assert_eq!(after.round.field, vec![CardId(16)]);
    }

    #[test]
    fn test_draw_cycle_without_match() {
        // Pile top (last element) is a June card; field has no June
        let state = match_with(round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![CardId(16)],
            vec![CardId(44), CardId(20)],
            Phase::DrawingDeck,
        ));

        let next = state.apply(&Command::AdvanceDraw).unwrap();
        assert_eq!(next.round.phase, Phase::DrawReveal);
        assert_eq!(next.round.selection.as_ref().unwrap().card, CardId(20));
        assert_eq!(next.round.pile, vec![CardId(44)]);
        // Candidates stay empty until the reveal is committed
        assert!(next.round.selection.as_ref().unwrap().candidates.is_empty());

        let after = next.apply(&Command::CommitDrawnCard).unwrap();
        assert_eq!(after.round.phase, Phase::CheckYaku);
        assert!(after.round.field.contains(&CardId(20)));
    }

    #[test]
    fn test_draw_with_match_requires_choice() {
        // Drawn January card, two January cards on the field
        let state = match_with(round(
            [vec![CardId(16)], vec![CardId(17)]],
            vec![CardId(0), CardId(1)],
            vec![CardId(2)],
            Phase::DrawingDeck,
        ));

        let revealed = state.apply(&Command::AdvanceDraw).unwrap();
        let chosen = revealed.apply(&Command::CommitDrawnCard).unwrap();
        assert_eq!(chosen.round.phase, Phase::SelectDrawMatch);
        assert_eq!(
            chosen.round.selection.as_ref().unwrap().candidates,
            vec![CardId(0), CardId(1)]
        );

        let after = chosen
            .apply(&Command::ChooseDrawMatch {
                field_card: CardId(1),
            })
            .unwrap();
        assert_eq!(after.round.phase, Phase::CheckYaku);
        assert_eq!(after.round.players[0].captured, vec![CardId(2), CardId(1)]);
    }

    #[test]
    fn test_empty_pile_skips_reveal() {
        let state = match_with(round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![],
            vec![],
            Phase::DrawingDeck,
        ));
        let next = state.apply(&Command::AdvanceDraw).unwrap();
        assert_eq!(next.round.phase, Phase::CheckYaku);
    }

    #[test]
    fn test_new_yaku_opens_koikoi_decision() {
        let mut r = round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![],
            vec![],
            Phase::CheckYaku,
        );
        r.players[0].captured = vec![CRANE, CURTAIN, MOON];
        let state = match_with(r);

        let next = state.apply(&Command::EvaluateTurn).unwrap();
        assert_eq!(next.round.phase, Phase::KoikoiDecision);
        assert!(matches!(
            next.round.history.last(),
            Some(HistoryEntry::NewYaku { .. })
        ));
    }

    #[test]
    fn test_banked_yaku_does_not_reopen_decision() {
        let mut r = round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![],
            vec![],
            Phase::CheckYaku,
        );
        r.players[0].captured = vec![CRANE, CURTAIN, MOON];
        r.players[0].banked = vec![crate::yaku::Yaku::ThreeBrights];
        let state = match_with(r);

        let next = state.apply(&Command::EvaluateTurn).unwrap();
        // Same pattern as before the koikoi: just pass the turn
        assert_eq!(next.round.phase, Phase::SelectHandCard);
        assert_eq!(next.round.turn, Seat::Second);
    }

    #[test]
    fn test_koikoi_continue_banks_and_flips_seat() {
        let mut r = round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![],
            vec![],
            Phase::KoikoiDecision,
        );
        r.players[0].captured = vec![CRANE, CURTAIN, MOON];
        let state = match_with(r);

        let next = state
            .apply(&Command::DeclareKoikoi {
                continue_playing: true,
            })
            .unwrap();
        assert_eq!(next.round.phase, Phase::SelectHandCard);
        assert_eq!(next.round.turn, Seat::Second);
        assert_eq!(next.round.players[0].koikoi_count, 1);
        assert_eq!(
            next.round.players[0].banked,
            vec![crate::yaku::Yaku::ThreeBrights]
        );
    }

    #[test]
    fn test_koikoi_cap_rejects_continue_but_allows_stop() {
        let mut r = round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![],
            vec![],
            Phase::KoikoiDecision,
        );
        r.players[0].captured = vec![CRANE, CURTAIN, MOON];
        r.players[0].koikoi_count = 1;
        let mut state = match_with(r);
        state.config.koikoi_cap = 1;

        assert!(state
            .apply(&Command::DeclareKoikoi {
                continue_playing: true
            })
            .is_none());

        let stopped = state
            .apply(&Command::DeclareKoikoi {
                continue_playing: false,
            })
            .expect("stop still legal");
        assert_eq!(stopped.round.phase, Phase::RoundEnd);
    }

    #[test]
    fn test_stop_scores_round_with_koikoi_bonuses() {
        let mut r = round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![],
            vec![],
            Phase::KoikoiDecision,
        );
        // Three brights (5) with one own koikoi, multiplicative x2
        r.players[0].captured = vec![CRANE, CURTAIN, MOON];
        r.players[0].koikoi_count = 1;
        let state = match_with(r);

        let next = state
            .apply(&Command::DeclareKoikoi {
                continue_playing: false,
            })
            .unwrap();
        assert_eq!(next.round.phase, Phase::RoundEnd);
        assert_eq!(next.totals, [10, 0]);
        assert_eq!(next.ledger.len(), 1);
        assert_eq!(next.ledger[0].winner, Some(Seat::First));
        assert_eq!(next.ledger[0].points, 10);
    }

    #[test]
    fn test_continue_with_empty_hands_is_rejected() {
        let mut r = round([vec![], vec![]], vec![], vec![], Phase::KoikoiDecision);
        r.players[0].captured = vec![CRANE, CURTAIN, MOON];
        let state = match_with(r);

        assert!(state
            .apply(&Command::DeclareKoikoi {
                continue_playing: true
            })
            .is_none());
        assert!(state
            .apply(&Command::DeclareKoikoi {
                continue_playing: false
            })
            .is_some());
    }

    #[test]
    fn test_exhausted_round_settles_drawn() {
        let state = match_with(round([vec![], vec![]], vec![], vec![], Phase::CheckYaku));

        let next = state.apply(&Command::EvaluateTurn).unwrap();
        assert_eq!(next.round.phase, Phase::RoundEnd);
        assert_eq!(next.totals, [0, 0]);
        assert_eq!(next.ledger[0].winner, None);
        assert_eq!(next.ledger[0].points, 0);
    }

    #[test]
    fn test_drawn_round_dealer_rotation_modes() {
        let outcome = RoundOutcome {
            winner: None,
            points: 0,
            dealer: Seat::First,
        };
        assert_eq!(
            next_dealer(DealerRotation::WinnerKeeps, &outcome),
            Seat::First
        );
        assert_eq!(
            next_dealer(DealerRotation::LoserBecomesDealer, &outcome),
            Seat::First
        );
        assert_eq!(
            next_dealer(DealerRotation::Alternate, &outcome),
            Seat::Second
        );
    }

    #[test]
    fn test_won_round_dealer_rotation_modes() {
        let outcome = RoundOutcome {
            winner: Some(Seat::Second),
            points: 5,
            dealer: Seat::First,
        };
        assert_eq!(
            next_dealer(DealerRotation::WinnerKeeps, &outcome),
            Seat::Second
        );
        assert_eq!(
            next_dealer(DealerRotation::LoserBecomesDealer, &outcome),
            Seat::First
        );
        assert_eq!(
            next_dealer(DealerRotation::Alternate, &outcome),
            Seat::Second
        );
    }

    #[test]
    fn test_start_next_round_deals_fresh() {
        let mut r = round([vec![], vec![]], vec![], vec![], Phase::CheckYaku);
        r.players[0].captured = vec![CRANE];
        let state = match_with(r);
        let settled = state.apply(&Command::EvaluateTurn).unwrap();

        let next = settled
            .apply(&Command::StartNextRound { seed: 99 })
            .unwrap();
        assert_eq!(next.round_number, 2);
        assert_eq!(next.round.phase, Phase::SelectHandCard);
        assert_eq!(next.round.players[0].hand.len(), 8);
        assert_eq!(next.round.seed, 99);
        // Ledger and totals carry over
        assert_eq!(next.ledger.len(), 1);
    }

    #[test]
    fn test_final_round_reaches_game_over() {
        let mut r = round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![],
            vec![],
            Phase::KoikoiDecision,
        );
        r.players[0].captured = vec![CRANE, CURTAIN, MOON];
        let mut state = match_with(r);
        state.config.rounds = 1;

        let done = state
            .apply(&Command::DeclareKoikoi {
                continue_playing: false,
            })
            .unwrap();
        assert_eq!(done.round.phase, Phase::GameOver);
        assert_eq!(done.verdict, Some(MatchVerdict::Winner(Seat::First)));

        // Nothing but a restart is legal now
        assert!(done.apply(&Command::AdvanceDraw).is_none());
        assert!(done
            .apply(&Command::StartNextRound { seed: 1 })
            .is_none());
        assert!(done
            .apply(&Command::RestartMatch {
                config: MatchConfig::default(),
                seed: 5
            })
            .is_some());
    }

    #[test]
    fn test_tied_match_overtime_policies() {
        let drawn_final = |overtime: OvertimePolicy| {
            let state = match_with(round([vec![], vec![]], vec![], vec![], Phase::CheckYaku));
            let mut state = state;
            state.config.rounds = 1;
            state.config.overtime = overtime;
            // Drawn round, totals stay 0-0
            state.apply(&Command::EvaluateTurn).unwrap()
        };

        let off = drawn_final(OvertimePolicy::Off);
        assert_eq!(off.verdict, Some(MatchVerdict::Drawn));
        assert_eq!(off.round.phase, Phase::GameOver);

        let decisive = drawn_final(OvertimePolicy::PlayUntilDecisive);
        assert_eq!(decisive.verdict, None);
        assert_eq!(decisive.round.phase, Phase::RoundEnd);

        let extra = drawn_final(OvertimePolicy::FixedExtraRounds(1));
        assert_eq!(extra.verdict, None);
        assert_eq!(extra.round.phase, Phase::RoundEnd);

        let no_extra = drawn_final(OvertimePolicy::FixedExtraRounds(0));
        assert_eq!(no_extra.verdict, Some(MatchVerdict::Drawn));
    }

    #[test]
    fn test_illegal_targets_are_rejected() {
        let state = match_with(round(
            [vec![CardId(2)], vec![CardId(20)]],
            vec![CardId(0)],
            vec![],
            Phase::SelectHandCard,
        ));

        // Card not in hand (it is the opponent's)
        assert!(state
            .apply(&Command::PlayHandCard { card: CardId(20) })
            .is_none());
        // Wrong-phase commands
        assert!(state.apply(&Command::AdvanceDraw).is_none());
        assert!(state.apply(&Command::EvaluateTurn).is_none());
        assert!(state
            .apply(&Command::ChooseFieldMatch {
                field_card: CardId(0)
            })
            .is_none());

        // Non-candidate field card during selection
        let next = state
            .apply(&Command::PlayHandCard { card: CardId(2) })
            .unwrap();
        assert!(next
            .apply(&Command::ChooseFieldMatch {
                field_card: CardId(16)
            })
            .is_none());
    }

    #[test]
    fn test_restart_rejects_invalid_config() {
        let state = match_with(round(
            [vec![CardId(2)], vec![CardId(3)]],
            vec![],
            vec![],
            Phase::SelectHandCard,
        ));
        let bad = MatchConfig {
            rounds: 0,
            ..MatchConfig::default()
        };
        assert!(state
            .apply(&Command::RestartMatch {
                config: bad,
                seed: 1
            })
            .is_none());
    }

    #[test]
    fn test_history_is_append_only() {
        let state = match_with(round(
            [vec![CardId(2)], vec![CardId(20)]],
            vec![CardId(16)],
            vec![CardId(44)],
            Phase::SelectHandCard,
        ));

        let a = state
            .apply(&Command::PlayHandCard { card: CardId(2) })
            .unwrap();
        let b = a.apply(&Command::AdvanceDraw).unwrap();
        assert!(b.round.history.len() > a.round.history.len());
        assert_eq!(&b.round.history[..a.round.history.len()], &a.round.history[..]);
    }
}
