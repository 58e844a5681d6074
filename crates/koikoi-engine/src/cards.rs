//! Static hanafuda card catalog
//!
//! 48 cards, 12 months of 4, each tagged with the category the
//! scoring patterns care about. Nothing here is ever mutated; all
//! game state refers to cards by [`CardId`].

use serde::{Deserialize, Serialize};

/// Number of cards in the catalog
pub const CARD_COUNT: usize = 48;

/// Number of months (suits)
pub const MONTHS: u8 = 12;

/// Index into the card catalog (0..=47)
///
/// Layout: `id = (month - 1) * 4 + slot`, so a card's month is
/// derivable from its id alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Card category used by the pattern rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bright,
    Seed,
    Ribbon,
    Plain,
}

impl Category {
    /// Capture-value ordering used by the AI tie-break:
    /// bright > seed > ribbon > plain
    pub fn rank(self) -> u8 {
        match self {
            Category::Bright => 3,
            Category::Seed => 2,
            Category::Ribbon => 1,
            Category::Plain => 0,
        }
    }
}

/// One catalog entry: immutable after construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub month: u8,
    pub category: Category,
    pub name: &'static str,
}

// Rule-relevant cards, by catalog position.

/// Crane (month 1 bright)
pub const CRANE: CardId = CardId(0);
/// Curtain (month 3 bright): half of the flower-viewing combo
pub const CURTAIN: CardId = CardId(8);
/// Butterflies (month 6 seed)
pub const BUTTERFLIES: CardId = CardId(20);
/// Boar (month 7 seed)
pub const BOAR: CardId = CardId(24);
/// Moon (month 8 bright): half of the moon-viewing combo
pub const MOON: CardId = CardId(28);
/// Sake cup (month 9 seed): the other half of both viewing combos
pub const SAKE_CUP: CardId = CardId(32);
/// Deer (month 10 seed)
pub const DEER: CardId = CardId(36);
/// Rain man (month 11 bright): the "rain" bright that splits the
/// four-bright tiers and can void flower viewing
pub const RAIN_MAN: CardId = CardId(40);
/// Phoenix (month 12 bright)
pub const PHOENIX: CardId = CardId(44);

/// Month whose capture can void moon viewing (kiri flow rule)
pub const KIRI_MONTH: u8 = 12;

macro_rules! card {
    ($id:expr, $month:expr, $cat:ident, $name:expr) => {
        Card {
            id: CardId($id),
            month: $month,
            category: Category::$cat,
            name: $name,
        }
    };
}

static CATALOG: [Card; CARD_COUNT] = [
    // January (pine)
    card!(0, 1, Bright, "Crane"),
    card!(1, 1, Ribbon, "Pine poetry ribbon"),
    card!(2, 1, Plain, "Pine"),
    card!(3, 1, Plain, "Pine"),
    // February (plum)
    card!(4, 2, Seed, "Bush warbler"),
    card!(5, 2, Ribbon, "Plum poetry ribbon"),
    card!(6, 2, Plain, "Plum"),
    card!(7, 2, Plain, "Plum"),
    // March (cherry)
    card!(8, 3, Bright, "Curtain"),
    card!(9, 3, Ribbon, "Cherry poetry ribbon"),
    card!(10, 3, Plain, "Cherry"),
    card!(11, 3, Plain, "Cherry"),
    // April (wisteria)
    card!(12, 4, Seed, "Cuckoo"),
    card!(13, 4, Ribbon, "Wisteria ribbon"),
    card!(14, 4, Plain, "Wisteria"),
    card!(15, 4, Plain, "Wisteria"),
    // May (iris)
    card!(16, 5, Seed, "Eight-plank bridge"),
    card!(17, 5, Ribbon, "Iris ribbon"),
    card!(18, 5, Plain, "Iris"),
    card!(19, 5, Plain, "Iris"),
    // June (peony)
    card!(20, 6, Seed, "Butterflies"),
    card!(21, 6, Ribbon, "Peony blue ribbon"),
    card!(22, 6, Plain, "Peony"),
    card!(23, 6, Plain, "Peony"),
    // July (bush clover)
    card!(24, 7, Seed, "Boar"),
    card!(25, 7, Ribbon, "Bush clover ribbon"),
    card!(26, 7, Plain, "Bush clover"),
    card!(27, 7, Plain, "Bush clover"),
    // August (pampas grass)
    card!(28, 8, Bright, "Moon"),
    card!(29, 8, Seed, "Geese"),
    card!(30, 8, Plain, "Pampas grass"),
    card!(31, 8, Plain, "Pampas grass"),
    // September (chrysanthemum)
    card!(32, 9, Seed, "Sake cup"),
    card!(33, 9, Ribbon, "Chrysanthemum blue ribbon"),
    card!(34, 9, Plain, "Chrysanthemum"),
    card!(35, 9, Plain, "Chrysanthemum"),
    // October (maple)
    card!(36, 10, Seed, "Deer"),
    card!(37, 10, Ribbon, "Maple blue ribbon"),
    card!(38, 10, Plain, "Maple"),
    card!(39, 10, Plain, "Maple"),
    // November (willow)
    card!(40, 11, Bright, "Rain man"),
    card!(41, 11, Seed, "Swallow"),
    card!(42, 11, Ribbon, "Willow ribbon"),
    card!(43, 11, Plain, "Lightning"),
    // December (paulownia)
    card!(44, 12, Bright, "Phoenix"),
    card!(45, 12, Plain, "Paulownia"),
    card!(46, 12, Plain, "Paulownia"),
    card!(47, 12, Plain, "Paulownia"),
];

/// The full 48-card catalog
pub fn catalog() -> &'static [Card; CARD_COUNT] {
    &CATALOG
}

/// Look up a card by id
pub fn card(id: CardId) -> &'static Card {
    &CATALOG[id.index()]
}

/// Month of a card (1..=12)
pub fn month_of(id: CardId) -> u8 {
    CATALOG[id.index()].month
}

/// Category of a card
pub fn category_of(id: CardId) -> Category {
    CATALOG[id.index()].category
}
