//! Match configuration
//!
//! All rule variability lives in one immutable record, passed by
//! value into the pure evaluation and scoring functions. Nothing in
//! the engine reads rule toggles from anywhere else.

use serde::{Deserialize, Serialize};

use crate::yaku::Yaku;

/// How round bonuses (koikoi declarations, high base score) compound
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusModel {
    /// Base points only
    None,
    /// One shared multiplier built from added increments
    Additive,
    /// Independent doublings multiplied together
    Multiplicative,
}

/// What a round is worth when it ends with no completed pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoYakuPolicy {
    /// Nobody scores
    BothZero,
    /// Fixed award depending on whether the scoring seat is dealer
    SeatBased {
        dealer_points: u32,
        non_dealer_points: u32,
    },
}

/// Who deals the next round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealerRotation {
    /// The round winner deals next; a drawn round keeps the dealer
    WinnerKeeps,
    /// The round loser deals next; a drawn round keeps the dealer
    LoserBecomesDealer,
    /// Dealer flips every round regardless of outcome
    Alternate,
}

/// How a tied match is resolved after the scheduled rounds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OvertimePolicy {
    /// Tied match ends drawn
    Off,
    /// Keep playing full rounds until totals differ
    PlayUntilDecisive,
    /// At most N extra rounds, then a drawn verdict stands
    FixedExtraRounds(u8),
}

/// Per-pattern enable flag and point value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuRule {
    pub enabled: bool,
    pub points: u32,
}

impl YakuRule {
    pub const fn on(points: u32) -> Self {
        Self {
            enabled: true,
            points,
        }
    }

    pub const fn off(points: u32) -> Self {
        Self {
            enabled: false,
            points,
        }
    }
}

/// Point table for every scoring pattern, indexed by [`Yaku`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuTable {
    entries: [YakuRule; Yaku::COUNT],
}

impl YakuTable {
    pub fn rule(&self, yaku: Yaku) -> YakuRule {
        self.entries[yaku as usize]
    }

    pub fn set(&mut self, yaku: Yaku, rule: YakuRule) {
        self.entries[yaku as usize] = rule;
    }

    pub fn disable(&mut self, yaku: Yaku) {
        self.entries[yaku as usize].enabled = false;
    }

    /// True if at least one enabled pattern is worth any points
    pub fn any_scoreable(&self) -> bool {
        self.entries.iter().any(|r| r.enabled && r.points > 0)
    }
}

impl Default for YakuTable {
    /// Standard modern point values; the month-cards variant is off
    fn default() -> Self {
        let mut entries = [YakuRule::on(0); Yaku::COUNT];
        entries[Yaku::FiveBrights as usize] = YakuRule::on(10);
        entries[Yaku::FourBrights as usize] = YakuRule::on(8);
        entries[Yaku::RainyFourBrights as usize] = YakuRule::on(7);
        entries[Yaku::ThreeBrights as usize] = YakuRule::on(5);
        entries[Yaku::FlowerViewing as usize] = YakuRule::on(5);
        entries[Yaku::MoonViewing as usize] = YakuRule::on(5);
        entries[Yaku::BoarDeerButterflies as usize] = YakuRule::on(5);
        entries[Yaku::Seeds as usize] = YakuRule::on(1);
        entries[Yaku::Ribbons as usize] = YakuRule::on(1);
        entries[Yaku::Plains as usize] = YakuRule::on(1);
        entries[Yaku::MonthCards as usize] = YakuRule::off(4);
        Self { entries }
    }
}

/// Complete rule configuration for one match
///
/// Chosen before the match starts and never mutated; both peers must
/// hold an identical copy for replays to converge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub yaku: YakuTable,
    pub bonus_model: BonusModel,
    /// Multiplier applied per koikoi declared by the stopping player
    pub self_koikoi_factor: u32,
    /// Multiplier applied per koikoi declared by the opponent
    pub opponent_koikoi_factor: u32,
    /// Double (or +1 unit) when base points reach the fixed threshold
    pub high_point_bonus: bool,
    pub no_yaku_policy: NoYakuPolicy,
    /// Maximum koikoi declarations per seat per round; 0 = unlimited
    pub koikoi_cap: u8,
    pub dealer_rotation: DealerRotation,
    pub overtime: OvertimePolicy,
    /// Scheduled rounds per match
    pub rounds: u8,
    /// Flow rule: capturing the rain bright voids flower viewing
    pub rain_voids_flower_viewing: bool,
    /// Flow rule: capturing any month-12 card voids moon viewing
    pub kiri_voids_moon_viewing: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            yaku: YakuTable::default(),
            bonus_model: BonusModel::Multiplicative,
            self_koikoi_factor: 2,
            opponent_koikoi_factor: 2,
            high_point_bonus: true,
            no_yaku_policy: NoYakuPolicy::BothZero,
            koikoi_cap: 0,
            dealer_rotation: DealerRotation::WinnerKeeps,
            overtime: OvertimePolicy::Off,
            rounds: 12,
            rain_voids_flower_viewing: false,
            kiri_voids_moon_viewing: false,
        }
    }
}

/// Reasons a configuration is rejected before a match starts
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No enabled pattern scores and the no-yaku policy awards zero:
    /// no round could ever produce points
    NoScoringPath,
    /// Zero scheduled rounds
    ZeroRounds,
    /// A bonus factor of zero would erase any score it touches
    ZeroBonusFactor,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NoScoringPath => {
                write!(f, "no enabled pattern or no-yaku policy can ever score")
            }
            ConfigError::ZeroRounds => write!(f, "match must schedule at least one round"),
            ConfigError::ZeroBonusFactor => write!(f, "koikoi bonus factors must be at least 1"),
        }
    }
}

impl MatchConfig {
    /// Pre-flight validation, run by the caller before a match starts.
    /// The engine does not re-validate on every command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.bonus_model != BonusModel::None
            && (self.self_koikoi_factor == 0 || self.opponent_koikoi_factor == 0)
        {
            return Err(ConfigError::ZeroBonusFactor);
        }
        let no_yaku_scores = match self.no_yaku_policy {
            NoYakuPolicy::BothZero => false,
            NoYakuPolicy::SeatBased {
                dealer_points,
                non_dealer_points,
            } => dealer_points > 0 || non_dealer_points > 0,
        };
        if !self.yaku.any_scoreable() && !no_yaku_scores {
            return Err(ConfigError::NoScoringPath);
        }
        Ok(())
    }
}
