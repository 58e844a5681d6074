//! Seeded shuffle and opening deal
//!
//! Every shuffle is a pure function of the caller-supplied seed, so
//! two peers dealing from the same seed hold identical cards.

use crate::cards::{CardId, CARD_COUNT, MONTHS};
use crate::random::{stream, SeededRng};

/// Cards dealt to each hand at round start
pub const HAND_SIZE: usize = 8;

/// Cards dealt face-up to the field at round start
pub const FIELD_SIZE: usize = 8;

/// The opening partition of the 48-card catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<CardId>; 2],
    pub field: Vec<CardId>,
    /// Remaining draw pile; the top of the pile is the *last* element
    pub pile: Vec<CardId>,
}

impl Deal {
    /// True if the opening field contains all four cards of one month.
    ///
    /// Such a deal cannot be played out sensibly (the month can never
    /// be matched from hand). The engine only flags it; the host
    /// decides the replacement seed, because both peers must agree on
    /// the seed actually used.
    pub fn field_has_dead_month(&self) -> bool {
        let mut per_month = [0u8; MONTHS as usize];
        for id in &self.field {
            per_month[(crate::cards::month_of(*id) - 1) as usize] += 1;
        }
        per_month.iter().any(|n| *n == 4)
    }
}

/// Shuffle the catalog from `seed` and deal 8/8/8, leaving 24 in the pile
pub fn deal(seed: u64) -> Deal {
    let mut rng = SeededRng::new(seed).for_stream(stream::SHUFFLE);

    let mut ids: Vec<CardId> = (0..CARD_COUNT as u8).map(CardId).collect();
    // Fisher-Yates
    for i in (1..ids.len()).rev() {
        let j = rng.next_range(i as u32 + 1) as usize;
        ids.swap(i, j);
    }

    let hand_a = ids[0..HAND_SIZE].to_vec();
    let hand_b = ids[HAND_SIZE..2 * HAND_SIZE].to_vec();
    let field = ids[2 * HAND_SIZE..2 * HAND_SIZE + FIELD_SIZE].to_vec();
    let pile = ids[2 * HAND_SIZE + FIELD_SIZE..].to_vec();

    Deal {
        hands: [hand_a, hand_b],
        field,
        pile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_deal_partition_is_exact() {
        for seed in 0..50u64 {
            let d = deal(seed);
            assert_eq!(d.hands[0].len(), HAND_SIZE);
            assert_eq!(d.hands[1].len(), HAND_SIZE);
            assert_eq!(d.field.len(), FIELD_SIZE);
            assert_eq!(d.pile.len(), CARD_COUNT - 3 * HAND_SIZE);

            let mut seen = HashSet::new();
            for id in d.hands[0]
                .iter()
                .chain(d.hands[1].iter())
                .chain(d.field.iter())
                .chain(d.pile.iter())
            {
                assert!(seen.insert(*id), "duplicate card {:?} in seed {}", id, seed);
            }
            assert_eq!(seen.len(), CARD_COUNT);
        }
    }

    #[test]
    fn test_deal_determinism() {
        assert_eq!(deal(42), deal(42));
        assert_ne!(deal(42), deal(43));
    }

    #[test]
    fn test_dead_month_detection() {
        let mut d = deal(1);
        // Force all four December cards onto the field
        d.field = vec![CardId(44), CardId(45), CardId(46), CardId(47), CardId(0)];
        assert!(d.field_has_dead_month());

        d.field = vec![CardId(44), CardId(45), CardId(46), CardId(0)];
        assert!(!d.field_has_dead_month());
    }
}
