//! WASM bindings for the frontend peer
//!
//! The browser peer replays the authoritative command stream through
//! these bindings and must converge bit-for-bit with the native peer.

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::ai::{self, Difficulty};
use crate::cards::CardId;
use crate::config::MatchConfig;
use crate::engine::Command;
use crate::scoring;
use crate::state::MatchState;
use crate::yaku;

fn parse_config(json: &str) -> Result<MatchConfig, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("Invalid config: {}", e)))
}

fn parse_state(json: &str) -> Result<MatchState, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("Invalid state: {}", e)))
}

fn parse_captured(json: &str) -> Result<Vec<CardId>, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("Invalid card list: {}", e)))
}

/// The default rule configuration as JSON, for settings UIs to edit
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&MatchConfig::default())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct ValidationResult {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Pre-flight configuration check.
///
/// Returns `{valid: true}` or `{valid: false, error: "..."}`.
/// Never throws; validation errors are returned as structured data.
#[wasm_bindgen]
pub fn validate_config(config_json: &str) -> JsValue {
    let result = match serde_json::from_str::<MatchConfig>(config_json) {
        Ok(config) => match config.validate() {
            Ok(()) => ValidationResult {
                valid: true,
                error: None,
            },
            Err(e) => ValidationResult {
                valid: false,
                error: Some(e.to_string()),
            },
        },
        Err(e) => ValidationResult {
            valid: false,
            error: Some(format!("Invalid config: {}", e)),
        },
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Build a fresh match from a rule configuration and a shared seed
#[wasm_bindgen]
pub fn new_match(config_json: &str, seed: u64) -> Result<JsValue, JsError> {
    let config = parse_config(config_json)?;
    let state = MatchState::new(config, seed)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    serde_wasm_bindgen::to_value(&state)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

#[derive(serde::Serialize)]
struct ApplyResult {
    accepted: bool,
    state: MatchState,
}

/// Apply one command to a state snapshot.
///
/// Returns `{accepted, state}`; a rejected command echoes the input
/// state unchanged, mirroring the native no-op contract.
#[wasm_bindgen]
pub fn apply_command(state_json: &str, command_json: &str) -> Result<JsValue, JsError> {
    let state = parse_state(state_json)?;
    let command: Command = serde_json::from_str(command_json)
        .map_err(|e| JsError::new(&format!("Invalid command: {}", e)))?;

    let result = match state.apply(&command) {
        Some(next) => ApplyResult {
            accepted: true,
            state: next,
        },
        None => ApplyResult {
            accepted: false,
            state,
        },
    };
    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Completed patterns for a captured set (standalone, no match state)
#[wasm_bindgen]
pub fn evaluate_yaku(captured_json: &str, config_json: &str) -> Result<JsValue, JsError> {
    let captured = parse_captured(captured_json)?;
    let config = parse_config(config_json)?;
    serde_wasm_bindgen::to_value(&yaku::evaluate(&captured, &config))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Per-pattern completion progress, for in-progress displays
#[wasm_bindgen]
pub fn yaku_progress(captured_json: &str, config_json: &str) -> Result<JsValue, JsError> {
    let captured = parse_captured(captured_json)?;
    let config = parse_config(config_json)?;
    serde_wasm_bindgen::to_value(&yaku::progress(&captured, &config))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Score a hypothetical stop from a captured set (standalone)
#[wasm_bindgen]
pub fn score_round(
    captured_json: &str,
    config_json: &str,
    is_dealer: bool,
    self_koikoi: u8,
    opponent_koikoi: u8,
) -> Result<JsValue, JsError> {
    let captured = parse_captured(captured_json)?;
    let config = parse_config(config_json)?;
    let hits = yaku::evaluate(&captured, &config);
    let breakdown = scoring::score_round(&hits, is_dealer, self_koikoi, opponent_koikoi, &config);
    serde_wasm_bindgen::to_value(&breakdown)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// The command the AI would issue for the current phase, or null
#[wasm_bindgen]
pub fn ai_command(state_json: &str, difficulty: &str) -> Result<JsValue, JsError> {
    let state = parse_state(state_json)?;
    let difficulty = match difficulty {
        "novice" => Difficulty::Novice,
        "intermediate" => Difficulty::Intermediate,
        "expert" => Difficulty::Expert,
        other => return Err(JsError::new(&format!("Unknown difficulty: {}", other))),
    };
    serde_wasm_bindgen::to_value(&ai::choose_command(&state, difficulty))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
