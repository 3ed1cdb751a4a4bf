//! Matchup oracle adapter
//!
//! Turns an ordered entity pair into a [`MatchupOutcome`]: fetches the raw
//! records for both directions, drops invalid sets, pairs every forward set
//! pair with its mirror and runs one duel per pair.

use std::collections::{BTreeMap, HashMap};

use teamcore_protocol::{WireRecord, is_valid_record};

use super::cache::{MatchupKey, MemoCache};
use super::oracle::{DamageOracle, OracleError};
use crate::duel::{DuelConfig, DuelResolver};
use crate::types::{DuelRecord, Verdict};

/// Aggregate of all resolved duels between two entities
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchupSummary {
    pub attacker: String,
    pub defender: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,

    /// Percentage of resolved duels won, rounded to one decimal for
    /// display. The verdict comes from the exact ratio.
    pub winrate: f64,

    pub verdict: Verdict,
}

impl MatchupSummary {
    pub fn from_counts(key: &MatchupKey, wins: u32, losses: u32, draws: u32) -> Self {
        let total = wins + losses + draws;
        let winrate = if total == 0 {
            0.0
        } else {
            (1000.0 * f64::from(wins) / f64::from(total)).round() / 10.0
        };
        Self {
            attacker: key.attacker.clone(),
            defender: key.defender.clone(),
            wins,
            losses,
            draws,
            winrate,
            verdict: Verdict::from_ratio(wins, total),
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Result for one ordered pair. Oracle faults are kept as values so a
/// single failing pair never aborts a run.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchupOutcome {
    Resolved(MatchupSummary),
    Failed {
        attacker: String,
        defender: String,
        error: OracleError,
    },
}

impl MatchupOutcome {
    pub fn summary(&self) -> Option<&MatchupSummary> {
        match self {
            MatchupOutcome::Resolved(summary) => Some(summary),
            MatchupOutcome::Failed { .. } => None,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.summary().map(|s| s.verdict)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MatchupOutcome::Failed { .. })
    }

    /// `win`, `loss`, `draw` or `error`
    pub fn label(&self) -> &'static str {
        self.verdict().map_or("error", |v| v.as_str())
    }
}

type Fetched = Result<Vec<DuelRecord>, OracleError>;

/// Memoizing front end to a [`DamageOracle`]
pub struct MatchupAdapter<O> {
    oracle: O,
    resolver: DuelResolver,
    /// Validated records per direction; one oracle call per ordered pair
    records: MemoCache<Fetched>,
    outcomes: MemoCache<MatchupOutcome>,
}

impl<O: DamageOracle> MatchupAdapter<O> {
    pub fn new(oracle: O, config: DuelConfig) -> Self {
        Self {
            oracle,
            resolver: DuelResolver::new(config),
            records: MemoCache::new(),
            outcomes: MemoCache::new(),
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Matchup of `attacker` against `defender`, computed at most once per run
    pub fn matchup(&mut self, attacker: &str, defender: &str) -> MatchupOutcome {
        let key = MatchupKey::new(attacker, defender);

        if let Some(cached) = self.outcomes.get(&key) {
            tracing::debug!(pair = %key, "matchup cache hit");
            return cached.clone();
        }

        let outcome = match self.compute(&key) {
            Ok(summary) => {
                tracing::debug!(
                    pair = %key,
                    wins = summary.wins,
                    losses = summary.losses,
                    draws = summary.draws,
                    verdict = %summary.verdict,
                    "matchup resolved"
                );
                MatchupOutcome::Resolved(summary)
            }
            Err(error) => {
                tracing::warn!(pair = %key, error = %error, "matchup failed");
                MatchupOutcome::Failed {
                    attacker: key.attacker.clone(),
                    defender: key.defender.clone(),
                    error,
                }
            }
        };

        self.outcomes.insert(key, outcome).clone()
    }

    /// Verdict of a matchup, `None` when the oracle failed
    pub fn verdict(&mut self, attacker: &str, defender: &str) -> Option<Verdict> {
        self.matchup(attacker, defender).verdict()
    }

    /// Every computed outcome, keyed by normalized attacker then defender
    pub fn verdict_table(&self) -> BTreeMap<String, BTreeMap<String, &'static str>> {
        let mut table: BTreeMap<String, BTreeMap<String, &'static str>> = BTreeMap::new();
        for (key, outcome) in self.outcomes.iter() {
            table
                .entry(key.attacker.clone())
                .or_default()
                .insert(key.defender.clone(), outcome.label());
        }
        table
    }

    /// Number of ordered pairs with a computed outcome
    pub fn resolved_pairs(&self) -> usize {
        self.outcomes.len()
    }

    fn compute(&mut self, key: &MatchupKey) -> Result<MatchupSummary, OracleError> {
        let needs_mirror = {
            let forward = self.fetched(key)?;
            !forward.is_empty() && !key.is_mirror_match()
        };

        // A mirror match is its own reverse direction
        let reverse_key = key.reversed();
        if needs_mirror {
            self.fetched(&reverse_key)?;
        }

        let forward = self.cached_records(key);
        let mirrors: HashMap<(&str, &str), &DuelRecord> = self
            .cached_records(&reverse_key)
            .iter()
            .map(|r| ((r.attacker_set.as_str(), r.defender_set.as_str()), r))
            .collect();

        let (mut wins, mut losses, mut draws) = (0, 0, 0);
        for record in forward {
            let mirror_id = (record.defender_set.as_str(), record.attacker_set.as_str());
            let Some(mirror) = mirrors.get(&mirror_id) else {
                tracing::debug!(
                    pair = %key,
                    attacker_set = %record.attacker_set,
                    defender_set = %record.defender_set,
                    "no mirror record, skipping set pair"
                );
                continue;
            };

            let outcome =
                self.resolver
                    .resolve(&record.attacker, &mirror.attacker, &record.moves, &mirror.moves);
            match outcome.verdict {
                Verdict::Win => wins += 1,
                Verdict::Loss => losses += 1,
                Verdict::Draw => draws += 1,
            }
        }

        Ok(MatchupSummary::from_counts(key, wins, losses, draws))
    }

    /// Records for one direction, calling the oracle on first use
    fn fetched(&mut self, key: &MatchupKey) -> Result<&[DuelRecord], OracleError> {
        let oracle = &self.oracle;
        self.records
            .get_or_insert_with(key.clone(), || fetch_direction(oracle, key))
            .as_deref()
            .map_err(Clone::clone)
    }

    fn cached_records(&self, key: &MatchupKey) -> &[DuelRecord] {
        match self.records.get(key) {
            Some(Ok(records)) => records,
            _ => &[],
        }
    }
}

fn fetch_direction<O: DamageOracle>(oracle: &O, key: &MatchupKey) -> Fetched {
    let raw = oracle.fetch(&key.attacker, &key.defender)?;
    let received = raw.len();

    let records: Vec<DuelRecord> = raw
        .iter()
        .filter(|record| is_valid_record(record))
        .filter_map(|record| {
            let decoded = WireRecord::from_raw(record)
                .map_err(|e| e.to_string())
                .and_then(|wire| DuelRecord::from_wire(&wire).map_err(|e| e.to_string()));
            match decoded {
                Ok(record) => Some(record),
                Err(reason) => {
                    tracing::debug!(direction = %key, %reason, "skipping undecodable record");
                    None
                }
            }
        })
        .collect();

    tracing::debug!(
        direction = %key,
        received,
        valid = records.len(),
        "fetched damage records"
    );
    Ok(records)
}
