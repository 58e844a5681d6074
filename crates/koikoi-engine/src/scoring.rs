//! Round scoring
//!
//! Turns a completed-pattern list plus the round's koikoi history
//! into the final point total under the configured bonus model, with
//! a reproducible breakdown for display.

use serde::{Deserialize, Serialize};

use crate::config::{BonusModel, MatchConfig, NoYakuPolicy};
use crate::yaku::{Yaku, YakuHit};

/// Base points at or above which the high-point bonus applies
pub const HIGH_POINT_THRESHOLD: u32 = 7;

/// One line of the scoring breakdown, in display order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLine {
    Yaku { yaku: Yaku, points: u32 },
    /// Round ended with no completed pattern; value per policy
    NoYaku { points: u32 },
    HighPointBonus,
    SelfKoikoi { count: u8, factor: u32 },
    OpponentKoikoi { count: u8, factor: u32 },
}

/// Final round total plus the ordered lines that produced it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub lines: Vec<ScoreLine>,
    pub total: u32,
}

/// Score a round for the stopping player.
///
/// `hits` is the player's completed-pattern list from
/// [`crate::yaku::evaluate`]. With zero completed patterns the
/// no-yaku policy decides the total and no bonus applies.
pub fn score_round(
    hits: &[YakuHit],
    is_dealer: bool,
    self_koikoi: u8,
    opponent_koikoi: u8,
    config: &MatchConfig,
) -> ScoreBreakdown {
    let mut lines = Vec::new();

    let base: u32 = hits.iter().map(|h| h.points).sum();
    for hit in hits {
        lines.push(ScoreLine::Yaku {
            yaku: hit.yaku,
            points: hit.points,
        });
    }

    if base == 0 {
        let points = match config.no_yaku_policy {
            NoYakuPolicy::BothZero => 0,
            NoYakuPolicy::SeatBased {
                dealer_points,
                non_dealer_points,
            } => {
                if is_dealer {
                    dealer_points
                } else {
                    non_dealer_points
                }
            }
        };
        lines.push(ScoreLine::NoYaku { points });
        return ScoreBreakdown {
            lines,
            total: points,
        };
    }

    let high_point = config.high_point_bonus && base >= HIGH_POINT_THRESHOLD;
    let sf = config.self_koikoi_factor;
    let of = config.opponent_koikoi_factor;
    let sc = self_koikoi as u32;
    let oc = opponent_koikoi as u32;

    let total = match config.bonus_model {
        BonusModel::None => base,
        BonusModel::Additive => {
            // One shared multiplier: 1 + high-point unit + per-koikoi
            // increments, where each increment is (factor - 1)
            let units = 1 + high_point as u32 + (sf - 1) * sc + (of - 1) * oc;
            base * units
        }
        BonusModel::Multiplicative => {
            base * if high_point { 2 } else { 1 } * sf.pow(sc) * of.pow(oc)
        }
    };

    if config.bonus_model != BonusModel::None {
        if high_point {
            lines.push(ScoreLine::HighPointBonus);
        }
        if sc > 0 {
            lines.push(ScoreLine::SelfKoikoi {
                count: self_koikoi,
                factor: sf,
            });
        }
        if oc > 0 {
            lines.push(ScoreLine::OpponentKoikoi {
                count: opponent_koikoi,
                factor: of,
            });
        }
    }

    ScoreBreakdown { lines, total }
}
