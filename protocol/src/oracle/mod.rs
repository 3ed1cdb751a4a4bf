//! Damage oracle payloads
//!
//! The oracle prints a JSON array with one object per (attacker set, defender set)
//! combination:
//!
//! ```text
//! [
//!   {
//!     "attacker": { "name": "Great Tusk", "item": "Booster Energy", "ability": "Protosynthesis",
//!                   "stats": { "hp": 374, "atk": 309, "def": 296, "spa": 127, "spd": 143, "spe": 300 } },
//!     "defender": { ... },
//!     "moves": [ { "name": "Headlong Rush", "min": 180, "max": 213 }, { "name": "Rapid Spin", "error": "invalid move" } ],
//!     "setNames": { "a": "strategy: Booster Energy", "b": "strategy: Bulky Setup" }
//!   }
//! ]
//! ```

mod tests;
mod validate;

pub use validate::{RESERVED_SET_PREFIXES, is_valid_record};

use crate::ParseError;
use anyhow::Result;
use serde::Deserialize;

/// Untyped record as printed by the oracle, checked with [`is_valid_record`]
/// before being decoded into a [`WireRecord`].
pub type RawRecord = serde_json::Value;

/// One directional set-pair row
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRecord {
    pub attacker: WireSet,
    pub defender: WireSet,

    /// Damage rows for the attacker's moves against the defender
    #[serde(default)]
    pub moves: Vec<WireMove>,

    pub set_names: SetNames,
}

impl WireRecord {
    /// Decode a raw record that already passed validation
    pub fn from_raw(raw: &RawRecord) -> std::result::Result<Self, ParseError> {
        serde_json::from_value(raw.clone()).map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

/// Stat/item/ability configuration of one side
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireSet {
    pub name: String,

    #[serde(default)]
    pub item: Option<String>,

    #[serde(default)]
    pub ability: Option<String>,

    #[serde(default)]
    pub nature: Option<String>,

    #[serde(default)]
    pub stats: StatLine,
}

/// Final computed stats (not base stats)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatLine {
    #[serde(default)]
    pub hp: f64,
    #[serde(default)]
    pub atk: f64,
    #[serde(default)]
    pub def: f64,
    #[serde(default)]
    pub spa: f64,
    #[serde(default)]
    pub spd: f64,
    #[serde(default)]
    pub spe: f64,
}

/// A damage row. Moves the calculator could not evaluate carry `error` and no range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireMove {
    pub name: String,

    #[serde(default)]
    pub min: Option<f64>,

    #[serde(default)]
    pub max: Option<f64>,

    #[serde(default)]
    pub error: Option<String>,
}

/// Set identifiers: `a` names the attacker's set, `b` the defender's
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct SetNames {
    pub a: String,
    pub b: String,
}

/// Parse the complete stdout of one oracle invocation
pub fn parse_oracle_payload(payload: &str) -> Result<Vec<RawRecord>> {
    let payload = payload.trim();

    if payload.is_empty() {
        return Err(ParseError::EmptyPayload.into());
    }

    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| ParseError::InvalidFormat(format!("payload is not JSON: {}", e)))?;

    match value {
        serde_json::Value::Array(records) => Ok(records),
        other => Err(ParseError::InvalidFormat(format!(
            "expected an array of records, got {}",
            json_kind(&other)
        ))
        .into()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
