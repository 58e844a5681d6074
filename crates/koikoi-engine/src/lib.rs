//! Koi-koi match engine
//!
//! Deterministic rules core for two-player hanafuda koi-koi: turn
//! progression, capture resolution, yaku evaluation, round and match
//! scoring, and the computer opponent. The engine is a pure function
//! of (state, command) with no I/O, no timers, and no ambient
//! randomness, so the same seed and command stream always reproduce
//! the same match. This crate is compiled to:
//! - Native (for the authoritative peer)
//! - WASM (for frontend replay on the other peer)
//!
//! Turn ownership, transport, and rendering are caller concerns; an
//! illegal or out-of-order command is rejected as a no-op rather than
//! an error, so callers can safely retry.

mod ai;
mod cards;
mod config;
mod deck;
mod engine;
mod random;
mod scoring;
mod state;
mod yaku;

#[cfg(feature = "wasm")]
mod wasm;

pub use ai::{choose_command, choose_hand_card, choose_match, decide_koikoi, Difficulty};
pub use cards::{
    card, catalog, category_of, month_of, Card, CardId, Category, BOAR, BUTTERFLIES, CARD_COUNT,
    CRANE, CURTAIN, DEER, KIRI_MONTH, MONTHS, MOON, PHOENIX, RAIN_MAN, SAKE_CUP,
};
pub use config::{
    BonusModel, ConfigError, DealerRotation, MatchConfig, NoYakuPolicy, OvertimePolicy, YakuRule,
    YakuTable,
};
pub use deck::{deal, Deal, FIELD_SIZE, HAND_SIZE};
pub use engine::{next_dealer, Command};
pub use random::{stream, SeededRng};
pub use scoring::{score_round, ScoreBreakdown, ScoreLine, HIGH_POINT_THRESHOLD};
pub use state::{
    CaptureSource, HistoryEntry, MatchState, MatchVerdict, PendingSelection, Phase, PlayerState,
    RoundOutcome, RoundState, Seat,
};
pub use yaku::{evaluate, progress, Yaku, YakuHit, YakuProgress};
