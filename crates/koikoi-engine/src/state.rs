//! Round and match state
//!
//! Plain data advanced only by [`crate::engine`] command application.
//! Every accepted command produces a new value; nothing here is
//! mutated in place by callers. The history log is append-only and is
//! the sole signal the presentation layer uses to know what happened.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::config::MatchConfig;
use crate::deck;
use crate::yaku::Yaku;

/// One of the two players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// The nine phases of a round, in the order a turn visits them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Current seat must choose a hand card to play
    SelectHandCard,
    /// Played card matched several field cards; pick one
    SelectFieldMatch,
    /// System step: draw from the pile (or skip if empty)
    DrawingDeck,
    /// System step: the drawn card is face up, commit it
    DrawReveal,
    /// Drawn card matched several field cards; pick one
    SelectDrawMatch,
    /// System step: look for newly completed patterns
    CheckYaku,
    /// Acting player chooses koikoi (continue) or stop
    KoikoiDecision,
    /// Round settled; waiting for the next round's seed
    RoundEnd,
    /// Match verdict reached
    GameOver,
}

/// Where a card being resolved came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureSource {
    Hand,
    Draw,
}

/// Card mid-resolution: the played or drawn card waiting on a match
/// choice. `candidates` is non-empty exactly in the two select-match
/// phases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSelection {
    pub card: CardId,
    pub source: CaptureSource,
    /// Original hand position, so a cancel restores it
    pub hand_index: usize,
    pub candidates: Vec<CardId>,
}

/// One discrete thing that happened, appended once, never rewritten
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEntry {
    Deal {
        dealer: Seat,
        seed: u64,
    },
    PlacedOnField {
        seat: Seat,
        card: CardId,
        source: CaptureSource,
    },
    Captured {
        seat: Seat,
        played: CardId,
        matched: Vec<CardId>,
        source: CaptureSource,
    },
    Drew {
        seat: Seat,
        card: CardId,
    },
    NewYaku {
        seat: Seat,
        yaku: Vec<Yaku>,
    },
    Koikoi {
        seat: Seat,
        count: u8,
    },
    Stopped {
        seat: Seat,
    },
    RoundSettled {
        winner: Option<Seat>,
        points: u32,
    },
}

/// Per-seat round state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Ordered; order matters only for display stability
    pub hand: Vec<CardId>,
    pub captured: Vec<CardId>,
    /// Patterns already counted at an earlier koikoi decision this
    /// round; only patterns outside this set re-open the decision
    pub banked: Vec<Yaku>,
    /// Koikoi declarations this round
    pub koikoi_count: u8,
}

impl PlayerState {
    fn new(hand: Vec<CardId>) -> Self {
        Self {
            hand,
            captured: Vec::new(),
            banked: Vec::new(),
            koikoi_count: 0,
        }
    }
}

/// Everything one round carries between commands
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: Phase,
    pub players: [PlayerState; 2],
    pub field: Vec<CardId>,
    /// Top of the pile is the last element
    pub pile: Vec<CardId>,
    pub turn: Seat,
    pub dealer: Seat,
    pub selection: Option<PendingSelection>,
    /// Seed this round was dealt from; AI decision streams derive
    /// from it too
    pub seed: u64,
    pub history: Vec<HistoryEntry>,
}

impl RoundState {
    /// Deal a fresh round. The dealer acts first.
    pub fn new(seed: u64, dealer: Seat) -> Self {
        let deal = deck::deal(seed);
        let [hand_a, hand_b] = deal.hands;
        Self {
            phase: Phase::SelectHandCard,
            players: [PlayerState::new(hand_a), PlayerState::new(hand_b)],
            field: deal.field,
            pile: deal.pile,
            turn: dealer,
            dealer,
            selection: None,
            seed,
            history: vec![HistoryEntry::Deal { dealer, seed }],
        }
    }

    pub fn current(&self) -> &PlayerState {
        &self.players[self.turn.index()]
    }

    pub fn current_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.turn.index()]
    }

    /// Field cards sharing a month with `card`
    pub fn field_matches(&self, card: CardId) -> Vec<CardId> {
        let month = crate::cards::month_of(card);
        self.field
            .iter()
            .copied()
            .filter(|id| crate::cards::month_of(*id) == month)
            .collect()
    }
}

/// Outcome of one settled round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// None for a drawn round
    pub winner: Option<Seat>,
    pub points: u32,
    /// Dealer of the settled round (rotation input)
    pub dealer: Seat,
}

/// Final match result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    Winner(Seat),
    Drawn,
}

/// The full state a caller holds; advanced via
/// [`MatchState::apply`](crate::engine) only
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    /// 1-based
    pub round_number: u8,
    pub round: RoundState,
    pub ledger: Vec<RoundOutcome>,
    pub totals: [u32; 2],
    pub verdict: Option<MatchVerdict>,
}

impl MatchState {
    /// Build a fresh match. Fails only on an invalid configuration;
    /// callers are expected to have run `config.validate()` as a
    /// pre-flight check already.
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, crate::config::ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            round_number: 1,
            round: RoundState::new(seed, Seat::First),
            ledger: Vec::new(),
            totals: [0, 0],
            verdict: None,
        })
    }

    /// Card-conservation invariant: every catalog card sits in
    /// exactly one of {a hand, the field, the pile, a captured set,
    /// the card mid-resolution}. Checked by the property tests after
    /// every command.
    pub fn cards_accounted(&self) -> bool {
        let mut count = [0u32; crate::cards::CARD_COUNT];
        let mut tally = |id: &CardId| count[id.index()] += 1;

        for player in &self.round.players {
            player.hand.iter().for_each(&mut tally);
            player.captured.iter().for_each(&mut tally);
        }
        self.round.field.iter().for_each(&mut tally);
        self.round.pile.iter().for_each(&mut tally);
        if let Some(sel) = &self.round.selection {
            tally(&sel.card);
        }

        count.iter().all(|n| *n == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CARD_COUNT;
    use std::collections::HashSet;

    #[test]
    fn test_new_round_card_partition() {
        let round = RoundState::new(42, Seat::First);
        let mut seen = HashSet::new();
        for id in round.players[0]
            .hand
            .iter()
            .chain(round.players[1].hand.iter())
            .chain(round.field.iter())
            .chain(round.pile.iter())
        {
            assert!(seen.insert(*id));
        }
        assert_eq!(seen.len(), CARD_COUNT);
        assert_eq!(round.phase, Phase::SelectHandCard);
        assert_eq!(round.turn, round.dealer);
        assert_eq!(round.history.len(), 1);
    }

    #[test]
    fn test_field_matches_by_month() {
        let mut round = RoundState::new(1, Seat::First);
        round.field = vec![CardId(0), CardId(1), CardId(4), CardId(8)];
        // January card matches the two January field cards
        let matches = round.field_matches(CardId(2));
        assert_eq!(matches, vec![CardId(0), CardId(1)]);
        // May card matches nothing
        assert!(round.field_matches(CardId(16)).is_empty());
    }

    #[test]
    fn test_new_match_validates_config() {
        let mut config = MatchConfig::default();
        config.rounds = 0;
        assert!(MatchState::new(config, 1).is_err());
        assert!(MatchState::new(MatchConfig::default(), 1).is_ok());
    }

    #[test]
    fn test_state_json_round_trip() {
        let state = MatchState::new(MatchConfig::default(), 7).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
