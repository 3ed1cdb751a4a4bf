//! Greedy team core construction
//!
//! Starting from the seeds, each open slot is filled with the entity that
//! beats the most current threats while satisfying the slot's role
//! constraint. When no candidate beats anything, the threat horizon widens
//! until the policy's ceiling; past that the build stops with a partial core.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::matchup::{DamageOracle, MatchupAdapter};
use crate::metagame::{Entity, Metagame, MetagameError};
use crate::report::CoreReport;
use crate::threat::{HorizonPolicy, Threat, ThreatScorer};
use crate::types::{RoleConstraint, Verdict, normalize_name, same_entity};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("{seeds} seed(s) and {roles} role constraint(s) do not add up to a core of {target}")]
    CountMismatch {
        seeds: usize,
        roles: usize,
        target: usize,
    },
    #[error("Seed given more than once: {0}")]
    DuplicateSeed(String),
    #[error(transparent)]
    Metagame(#[from] MetagameError),
}

/// A validated build request: seeds plus one constraint per open slot
#[derive(Debug, Clone, PartialEq)]
pub struct CoreRequest {
    target: usize,
    seeds: Vec<String>,
    roles: Vec<RoleConstraint>,
}

impl CoreRequest {
    pub fn new(
        target: usize,
        seeds: Vec<String>,
        roles: Vec<RoleConstraint>,
    ) -> Result<Self, BuildError> {
        if seeds.len() + roles.len() != target {
            return Err(BuildError::CountMismatch {
                seeds: seeds.len(),
                roles: roles.len(),
                target,
            });
        }

        let mut seen = BTreeSet::new();
        for seed in &seeds {
            if !seen.insert(normalize_name(seed)) {
                return Err(BuildError::DuplicateSeed(seed.clone()));
            }
        }

        Ok(Self {
            target,
            seeds,
            roles,
        })
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    pub fn roles(&self) -> &[RoleConstraint] {
        &self.roles
    }
}

/// Why a build stopped short
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PartialReason {
    /// No candidate beat any threat for `slot`, up to the horizon ceiling
    SearchExhausted { slot: usize, ceiling: usize },
}

impl std::fmt::Display for PartialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartialReason::SearchExhausted { slot, ceiling } => {
                write!(f, "no counter found for slot {} up to the top {}", slot, ceiling)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum BuildStatus {
    Completed,
    Partial {
        filled: usize,
        target: usize,
        reason: PartialReason,
    },
}

impl BuildStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, BuildStatus::Completed)
    }
}

/// Result of one build
#[derive(Debug, Clone, PartialEq)]
pub struct CoreBuild {
    /// Display names in construction order
    pub core: Vec<String>,
    pub status: BuildStatus,

    /// Human readable construction log
    pub log: Vec<String>,
}

pub struct CoreBuilder<'m, O> {
    metagame: &'m Metagame,
    scorer: ThreatScorer<'m>,
    adapter: MatchupAdapter<O>,
    horizon: HorizonPolicy,
}

impl<'m, O: DamageOracle> CoreBuilder<'m, O> {
    pub fn new(metagame: &'m Metagame, oracle: O, config: &AnalysisConfig) -> Self {
        Self {
            metagame,
            scorer: ThreatScorer::from_metagame(metagame, config.core_min_pct),
            adapter: MatchupAdapter::new(oracle, config.duel),
            horizon: config.horizon,
        }
    }

    pub fn adapter(&self) -> &MatchupAdapter<O> {
        &self.adapter
    }

    pub fn scorer(&self) -> &ThreatScorer<'m> {
        &self.scorer
    }

    /// Grow the request's seeds into a core.
    ///
    /// Seeds are resolved against the metagame before any matchup is
    /// computed. Running out of candidates is a [`BuildStatus::Partial`],
    /// not an error.
    pub fn build(&mut self, request: &CoreRequest) -> Result<CoreBuild, BuildError> {
        let seeds = request
            .seeds()
            .iter()
            .map(|seed| self.metagame.get(seed).map(|e| e.name.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut log = Vec::new();
        let mut core = Vec::with_capacity(request.target());
        for seed in seeds {
            log.push(format!("Seed: {}", seed));
            core.push(seed);
        }

        let mut status = BuildStatus::Completed;
        for constraint in request.roles() {
            let slot = core.len() + 1;
            match self.fill_slot(&core, constraint, slot, &mut log) {
                Some(name) => core.push(name),
                None => {
                    let reason = PartialReason::SearchExhausted {
                        slot,
                        ceiling: self.horizon.ceiling,
                    };
                    tracing::warn!(slot, filled = core.len(), target = request.target(), %reason, "core left incomplete");
                    log.push(format!(
                        "Stopped with {} of {} members: {}",
                        core.len(),
                        request.target(),
                        reason
                    ));
                    status = BuildStatus::Partial {
                        filled: core.len(),
                        target: request.target(),
                        reason,
                    };
                    break;
                }
            }
        }

        if status.is_complete() {
            log.push(format!("Core complete: {}", core.join(", ")));
        }
        tracing::info!(core = ?core, complete = status.is_complete(), "core build finished");

        Ok(CoreBuild { core, status, log })
    }

    /// Ranked threats against `core` at the first horizon that has any
    pub fn final_threats(&mut self, core: &[String]) -> Vec<Threat> {
        for horizon in self.horizon.horizons() {
            let threats = self.scorer.threats(core, horizon, &mut self.adapter);
            if !threats.is_empty() {
                return threats;
            }
        }
        Vec::new()
    }

    /// Persistable report for a finished build
    pub fn report(&mut self, build: CoreBuild) -> CoreReport {
        let threats = self.final_threats(&build.core);
        CoreReport::new(self.metagame, build, threats, &self.adapter.verdict_table())
    }

    fn fill_slot(
        &mut self,
        core: &[String],
        constraint: &RoleConstraint,
        slot: usize,
        log: &mut Vec<String>,
    ) -> Option<String> {
        for horizon in self.horizon.horizons() {
            let threats = self.scorer.threats(core, horizon, &mut self.adapter);
            if threats.is_empty() {
                log.push(format!("Slot {}: no threats in the top {}", slot, horizon));
                tracing::info!(slot, horizon, "no threats, widening horizon");
                continue;
            }

            let names: Vec<&str> = threats.iter().map(|t| t.name.as_str()).collect();
            log.push(format!(
                "Slot {} ({}): {} threat(s) in the top {}: {}",
                slot,
                constraint,
                threats.len(),
                horizon,
                names.join(", ")
            ));

            if let Some((pick, score)) = self.best_counter(core, &threats, constraint) {
                log.push(format!(
                    "Slot {}: selected {} (score {:.1} against {} threat(s))",
                    slot,
                    pick.name,
                    score,
                    threats.len()
                ));
                tracing::info!(slot, horizon, pick = %pick.name, score, "slot filled");
                return Some(pick.name.clone());
            }

            log.push(format!(
                "Slot {}: no candidate with roles [{}] beats these threats in the top {}",
                slot, constraint, horizon
            ));
            tracing::info!(slot, horizon, "no counter found, widening horizon");
        }

        None
    }

    /// Highest positive scorer among eligible candidates, first in usage
    /// order on ties
    fn best_counter(
        &mut self,
        core: &[String],
        threats: &[Threat],
        constraint: &RoleConstraint,
    ) -> Option<(&'m Entity, f64)> {
        let metagame = self.metagame;
        let members: BTreeSet<String> = core.iter().map(|m| normalize_name(m)).collect();

        let mut best: Option<(&'m Entity, f64)> = None;
        for candidate in metagame.entities() {
            if members.contains(&candidate.key) || !constraint.allows(&candidate.roles) {
                continue;
            }

            let mut score = 0.0;
            for threat in threats {
                if same_entity(&candidate.name, &threat.name) {
                    continue;
                }
                match self.adapter.verdict(&candidate.key, &threat.name) {
                    Some(Verdict::Win) => score += 1.0,
                    Some(Verdict::Draw) => score += 0.5,
                    Some(Verdict::Loss) | None => {}
                }
            }

            if score > 0.0 && best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }

        best
    }
}
