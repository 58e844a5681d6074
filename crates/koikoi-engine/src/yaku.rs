//! Yaku evaluation
//!
//! Pure mapping from a player's captured cards plus the rule
//! configuration to the set of completed scoring patterns. Exposed
//! standalone so presentation code can show pattern progress without
//! touching match state.

use serde::{Deserialize, Serialize};

use crate::cards::{
    category_of, month_of, CardId, Category, BOAR, BUTTERFLIES, CURTAIN, DEER, KIRI_MONTH, MONTHS,
    MOON, RAIN_MAN, SAKE_CUP,
};
use crate::config::MatchConfig;

/// Threshold counts for the category patterns
const SEEDS_THRESHOLD: usize = 5;
const RIBBONS_THRESHOLD: usize = 5;
const PLAINS_THRESHOLD: usize = 10;

/// Every scoring pattern the engine knows about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum Yaku {
    /// All five brights
    FiveBrights,
    /// Four brights, rain man not among them
    FourBrights,
    /// Four brights including the rain man
    RainyFourBrights,
    /// Three brights, rain man not among them
    ThreeBrights,
    /// Curtain + sake cup
    FlowerViewing,
    /// Moon + sake cup
    MoonViewing,
    /// Boar + deer + butterflies
    BoarDeerButterflies,
    /// Five or more seeds, +1 per extra
    Seeds,
    /// Five or more ribbons, +1 per extra
    Ribbons,
    /// Ten or more plains, +1 per extra
    Plains,
    /// All four cards of one month (rule variant)
    MonthCards,
}

impl Yaku {
    pub const COUNT: usize = 11;

    pub const ALL: [Yaku; Yaku::COUNT] = [
        Yaku::FiveBrights,
        Yaku::FourBrights,
        Yaku::RainyFourBrights,
        Yaku::ThreeBrights,
        Yaku::FlowerViewing,
        Yaku::MoonViewing,
        Yaku::BoarDeerButterflies,
        Yaku::Seeds,
        Yaku::Ribbons,
        Yaku::Plains,
        Yaku::MonthCards,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Yaku::FiveBrights => "five brights",
            Yaku::FourBrights => "four brights",
            Yaku::RainyFourBrights => "rainy four brights",
            Yaku::ThreeBrights => "three brights",
            Yaku::FlowerViewing => "flower viewing",
            Yaku::MoonViewing => "moon viewing",
            Yaku::BoarDeerButterflies => "boar, deer, butterflies",
            Yaku::Seeds => "seeds",
            Yaku::Ribbons => "ribbons",
            Yaku::Plains => "plains",
            Yaku::MonthCards => "month cards",
        }
    }
}

/// One completed pattern: which, for how much, and the cards that made it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuHit {
    pub yaku: Yaku,
    pub points: u32,
    pub cards: Vec<CardId>,
}

/// Completion progress of one enabled pattern, for display and AI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuProgress {
    pub yaku: Yaku,
    pub have: u32,
    pub need: u32,
}

fn of_category(captured: &[CardId], cat: Category) -> Vec<CardId> {
    captured
        .iter()
        .copied()
        .filter(|id| category_of(*id) == cat)
        .collect()
}

fn contains(captured: &[CardId], id: CardId) -> bool {
    captured.contains(&id)
}

/// Evaluate all completed patterns for a captured set.
///
/// Point values come from the configuration table, never from this
/// module. Disabled patterns are never reported. Exactly one bright
/// tier can appear: the highest one satisfied (a satisfied-but-disabled
/// tier still suppresses the tiers below it).
pub fn evaluate(captured: &[CardId], config: &MatchConfig) -> Vec<YakuHit> {
    let mut hits = Vec::new();

    let brights = of_category(captured, Category::Bright);
    let has_rain = contains(&brights, RAIN_MAN);
    let dry: Vec<CardId> = brights.iter().copied().filter(|id| *id != RAIN_MAN).collect();

    // Bright tiers, highest satisfied wins. The counts make the tiers
    // mutually exclusive: 5, 4 dry, 3 dry + rain, 3 dry.
    let tier = if brights.len() == 5 {
        Some((Yaku::FiveBrights, brights.clone()))
    } else if brights.len() == 4 && !has_rain {
        Some((Yaku::FourBrights, brights.clone()))
    } else if brights.len() == 4 && has_rain {
        Some((Yaku::RainyFourBrights, brights.clone()))
    } else if dry.len() == 3 && !has_rain {
        Some((Yaku::ThreeBrights, dry.clone()))
    } else {
        None
    };
    if let Some((yaku, cards)) = tier {
        let rule = config.yaku.rule(yaku);
        if rule.enabled {
            hits.push(YakuHit {
                yaku,
                points: rule.points,
                cards,
            });
        }
    }

    // Flow suppression is decided before the viewing combos are final.
    let flower_voided = config.rain_voids_flower_viewing && contains(captured, RAIN_MAN);
    let moon_voided = config.kiri_voids_moon_viewing
        && captured.iter().any(|id| month_of(*id) == KIRI_MONTH);

    let flower_rule = config.yaku.rule(Yaku::FlowerViewing);
    if flower_rule.enabled
        && !flower_voided
        && contains(captured, CURTAIN)
        && contains(captured, SAKE_CUP)
    {
        hits.push(YakuHit {
            yaku: Yaku::FlowerViewing,
            points: flower_rule.points,
            cards: vec![CURTAIN, SAKE_CUP],
        });
    }

    let moon_rule = config.yaku.rule(Yaku::MoonViewing);
    if moon_rule.enabled && !moon_voided && contains(captured, MOON) && contains(captured, SAKE_CUP)
    {
        hits.push(YakuHit {
            yaku: Yaku::MoonViewing,
            points: moon_rule.points,
            cards: vec![MOON, SAKE_CUP],
        });
    }

    let trio_rule = config.yaku.rule(Yaku::BoarDeerButterflies);
    if trio_rule.enabled
        && contains(captured, BOAR)
        && contains(captured, DEER)
        && contains(captured, BUTTERFLIES)
    {
        hits.push(YakuHit {
            yaku: Yaku::BoarDeerButterflies,
            points: trio_rule.points,
            cards: vec![BOAR, DEER, BUTTERFLIES],
        });
    }

    for (yaku, cat, threshold) in [
        (Yaku::Seeds, Category::Seed, SEEDS_THRESHOLD),
        (Yaku::Ribbons, Category::Ribbon, RIBBONS_THRESHOLD),
        (Yaku::Plains, Category::Plain, PLAINS_THRESHOLD),
    ] {
        let rule = config.yaku.rule(yaku);
        if !rule.enabled {
            continue;
        }
        let cards = of_category(captured, cat);
        if cards.len() >= threshold {
            // Base value plus one point per card past the threshold
            let points = rule.points + (cards.len() - threshold) as u32;
            hits.push(YakuHit { yaku, points, cards });
        }
    }

    let month_rule = config.yaku.rule(Yaku::MonthCards);
    if month_rule.enabled {
        let mut cards = Vec::new();
        let mut completed = 0u32;
        for month in 1..=MONTHS {
            let of_month: Vec<CardId> = captured
                .iter()
                .copied()
                .filter(|id| month_of(*id) == month)
                .collect();
            if of_month.len() == 4 {
                completed += 1;
                cards.extend(of_month);
            }
        }
        if completed > 0 {
            hits.push(YakuHit {
                yaku: Yaku::MonthCards,
                points: month_rule.points * completed,
                cards,
            });
        }
    }

    hits
}

/// Completion progress for every enabled pattern.
///
/// Unlike [`evaluate`], suppressed bright tiers still report here:
/// the presentation layer and the AI need "how close is this pattern"
/// even when a higher tier currently wins.
pub fn progress(captured: &[CardId], config: &MatchConfig) -> Vec<YakuProgress> {
    let brights = of_category(captured, Category::Bright).len() as u32;
    let dry = of_category(captured, Category::Bright)
        .iter()
        .filter(|id| **id != RAIN_MAN)
        .count() as u32;
    let has_rain = contains(captured, RAIN_MAN) as u32;

    let mut best_month = 0u32;
    for month in 1..=MONTHS {
        let n = captured.iter().filter(|id| month_of(**id) == month).count() as u32;
        best_month = best_month.max(n);
    }

    let pair = |a: CardId, b: CardId| contains(captured, a) as u32 + contains(captured, b) as u32;

    let mut out = Vec::new();
    for yaku in Yaku::ALL {
        if !config.yaku.rule(yaku).enabled {
            continue;
        }
        let (have, need) = match yaku {
            Yaku::FiveBrights => (brights, 5),
            Yaku::FourBrights => (dry.min(4), 4),
            Yaku::RainyFourBrights => (dry.min(3) + has_rain, 4),
            Yaku::ThreeBrights => (dry.min(3), 3),
            Yaku::FlowerViewing => (pair(CURTAIN, SAKE_CUP), 2),
            Yaku::MoonViewing => (pair(MOON, SAKE_CUP), 2),
            Yaku::BoarDeerButterflies => (
                contains(captured, BOAR) as u32
                    + contains(captured, DEER) as u32
                    + contains(captured, BUTTERFLIES) as u32,
                3,
            ),
            Yaku::Seeds => (
                (of_category(captured, Category::Seed).len() as u32).min(SEEDS_THRESHOLD as u32),
                SEEDS_THRESHOLD as u32,
            ),
            Yaku::Ribbons => (
                (of_category(captured, Category::Ribbon).len() as u32)
                    .min(RIBBONS_THRESHOLD as u32),
                RIBBONS_THRESHOLD as u32,
            ),
            Yaku::Plains => (
                (of_category(captured, Category::Plain).len() as u32)
                    .min(PLAINS_THRESHOLD as u32),
                PLAINS_THRESHOLD as u32,
            ),
            Yaku::MonthCards => (best_month, 4),
        };
        out.push(YakuProgress { yaku, have, need });
    }
    out
}
