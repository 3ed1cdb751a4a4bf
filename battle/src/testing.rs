//! Scripted damage oracles for unit tests

use std::cell::RefCell;
use std::collections::HashSet;

use serde_json::{Value, json};
use teamcore_protocol::MetagameEntry;

use crate::matchup::{DamageOracle, OracleError};
use crate::metagame::Metagame;
use crate::types::normalize_name;

/// One raw oracle record with equal 100 hp sets
pub(crate) fn record_json(
    attacker: &str,
    attacker_set: &str,
    defender: &str,
    defender_set: &str,
    speed: f64,
    damage: f64,
) -> Value {
    json!({
        "attacker": {
            "name": attacker,
            "item": "Leftovers",
            "ability": "Pressure",
            "stats": { "hp": 100, "atk": 100, "def": 100, "spa": 100, "spd": 100, "spe": speed }
        },
        "defender": {
            "name": defender,
            "item": "Leftovers",
            "ability": "Pressure",
            "stats": { "hp": 100, "atk": 100, "def": 100, "spa": 100, "spd": 100, "spe": 100 }
        },
        "moves": [
            { "name": "Strike", "min": damage * 0.85, "max": damage },
            { "name": "Protect", "error": "invalid move" }
        ],
        "setNames": { "a": attacker_set, "b": defender_set }
    })
}

/// Oracle driven by a "who beats whom" relation.
///
/// A winner's move deals 200 to a 100 hp target; everything else deals 10,
/// which never finishes within the default round limit. So `beats(a, b)`
/// makes a-vs-b a win, b-vs-a a loss, and unrelated pairs draws.
#[derive(Default)]
pub(crate) struct ScriptedOracle {
    beats: HashSet<(String, String)>,
    failing: HashSet<(String, String)>,
    calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedOracle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn beats(mut self, winner: &str, loser: &str) -> Self {
        self.beats
            .insert((normalize_name(winner), normalize_name(loser)));
        self
    }

    pub(crate) fn failing(mut self, attacker: &str, defender: &str) -> Self {
        self.failing
            .insert((normalize_name(attacker), normalize_name(defender)));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub(crate) fn calls_for(&self, attacker: &str, defender: &str) -> usize {
        let wanted = (normalize_name(attacker), normalize_name(defender));
        self.calls.borrow().iter().filter(|c| **c == wanted).count()
    }
}

impl DamageOracle for ScriptedOracle {
    fn fetch(&self, attacker: &str, defender: &str) -> Result<Vec<Value>, OracleError> {
        let pair = (attacker.to_string(), defender.to_string());
        self.calls.borrow_mut().push(pair.clone());

        if self.failing.contains(&pair) {
            return Err(OracleError::Process {
                status: "exit status: 1".to_string(),
                stderr: format!("Pokemon not found: {}", attacker),
            });
        }

        let damage = if self.beats.contains(&pair) { 200.0 } else { 10.0 };
        Ok(vec![
            record_json(attacker, "strategy: Standard", defender, "strategy: Standard", 100.0, damage),
            // Dex metadata rows the validator must drop
            record_json(attacker, "format", defender, "name", 100.0, 500.0),
        ])
    }
}

/// Oracle backed by a closure, for hand-built payloads
pub(crate) struct FnOracle<F> {
    respond: F,
    calls: RefCell<usize>,
}

impl<F> FnOracle<F>
where
    F: Fn(&str, &str) -> Result<Vec<Value>, OracleError>,
{
    pub(crate) fn new(respond: F) -> Self {
        Self {
            respond,
            calls: RefCell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl<F> DamageOracle for FnOracle<F>
where
    F: Fn(&str, &str) -> Result<Vec<Value>, OracleError>,
{
    fn fetch(&self, attacker: &str, defender: &str) -> Result<Vec<Value>, OracleError> {
        *self.calls.borrow_mut() += 1;
        (self.respond)(attacker, defender)
    }
}

/// Metagame from `(name, raw count, teammates)` rows
pub(crate) fn metagame_of(rows: &[(&str, u64, &[(&str, f64)])]) -> Metagame {
    Metagame::from_entries(rows.iter().map(|(name, raw_count, teammates)| {
        let entry = MetagameEntry {
            raw_count: *raw_count,
            teammates: teammates.iter().map(|(n, p)| (n.to_string(), *p)).collect(),
            ..MetagameEntry::default()
        };
        (name.to_string(), entry)
    }))
}

/// Metagame entry carrying explicit role tags
pub(crate) fn entry_with_roles(raw_count: u64, roles: &[&str]) -> MetagameEntry {
    MetagameEntry {
        raw_count,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        ..MetagameEntry::default()
    }
}
