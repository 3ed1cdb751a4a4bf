//! Metagame usage statistics document
//!
//! A JSON object keyed by display name, one entry per entity:
//!
//! ```text
//! {
//!   "Great Tusk": {
//!     "raw_count": 412345,
//!     "viability_ceiling": 93,
//!     "moves": { "Headlong Rush": 88.1, "Rapid Spin": 91.0 },
//!     "teammates": { "Kingambit": 24.5 },
//!     "checks_counters": [ { "name": "Dragonite", "detail": "62.1 (4.2)" } ],
//!     "types": ["Ground", "Fighting"],
//!     "base_stats": { "hp": 115, "atk": 131, "def": 131, "spa": 53, "spd": 53, "spe": 87 }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Deserializer};

use crate::ParseError;

/// Usage statistics for one entity
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetagameEntry {
    #[serde(default)]
    pub raw_count: u64,

    #[serde(default, deserialize_with = "viability")]
    pub viability_ceiling: Option<f64>,

    #[serde(default)]
    pub abilities: BTreeMap<String, f64>,

    #[serde(default)]
    pub items: BTreeMap<String, f64>,

    #[serde(default)]
    pub moves: BTreeMap<String, f64>,

    #[serde(default)]
    pub tera_types: BTreeMap<String, f64>,

    /// Co-occurrence percentage per teammate display name
    #[serde(default)]
    pub teammates: BTreeMap<String, f64>,

    #[serde(default)]
    pub spreads: BTreeMap<String, f64>,

    #[serde(default)]
    pub checks_counters: Vec<CounterEntry>,

    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default)]
    pub base_stats: Option<BaseStats>,

    /// Hand-assigned role tags, merged with inferred ones
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CounterEntry {
    pub name: String,

    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

/// Parse a complete metagame document
pub fn parse_metagame(json: &str) -> Result<BTreeMap<String, MetagameEntry>> {
    if json.trim().is_empty() {
        return Err(ParseError::EmptyPayload.into());
    }

    let entries: BTreeMap<String, MetagameEntry> = serde_json::from_str(json)
        .map_err(|e| ParseError::InvalidFormat(format!("metagame document: {}", e)))?;

    Ok(entries)
}

/// Accepts a plain number or the usage-stats array form
/// `[battles, top GXE, 99th percentile, 95th percentile]`, keeping the top GXE.
fn viability<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::Array(items)) => items
            .get(1)
            .or_else(|| items.first())
            .and_then(serde_json::Value::as_f64),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metagame() {
        let json = r#"{
            "Great Tusk": {
                "raw_count": 412345,
                "viability_ceiling": 93,
                "moves": { "Headlong Rush": 88.1, "Rapid Spin": 91.0 },
                "teammates": { "Kingambit": 24.5 },
                "checks_counters": [ { "name": "Dragonite", "detail": "62.1 (4.2)" } ],
                "types": ["Ground", "Fighting"],
                "base_stats": { "hp": 115, "atk": 131, "def": 131, "spa": 53, "spd": 53, "spe": 87 }
            },
            "Kingambit": { "raw_count": 10 }
        }"#;

        let entries = parse_metagame(json).unwrap();
        let tusk = &entries["Great Tusk"];

        assert_eq!(tusk.raw_count, 412345);
        assert_eq!(tusk.viability_ceiling, Some(93.0));
        assert_eq!(tusk.teammates["Kingambit"], 24.5);
        assert_eq!(tusk.checks_counters[0].name, "Dragonite");
        assert_eq!(tusk.base_stats.unwrap().atk, 131);

        let gambit = &entries["Kingambit"];
        assert_eq!(gambit.viability_ceiling, None);
        assert!(gambit.moves.is_empty());
        assert!(gambit.base_stats.is_none());
    }

    #[test]
    fn test_viability_array_form() {
        let json = r#"{ "Dragonite": { "raw_count": 5, "viability_ceiling": [5123, 88, 75, 62] } }"#;
        let entries = parse_metagame(json).unwrap();
        assert_eq!(entries["Dragonite"].viability_ceiling, Some(88.0));
    }

    #[test]
    fn test_parse_metagame_invalid() {
        assert!(parse_metagame("").is_err());
        assert!(parse_metagame("[1, 2]").is_err());
        assert!(parse_metagame(r#"{ "Great Tusk": { "raw_count": "lots" } }"#).is_err());
    }
}
