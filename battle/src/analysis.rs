//! Single-entity analysis: profile, threat matchups and core matchups

use std::collections::BTreeMap;

use crate::matchup::{DamageOracle, MatchupAdapter, MatchupSummary};
use crate::metagame::{Entity, Metagame, MetagameError, top_entries};
use crate::types::{Verdict, same_entity};

/// Usage statistics digest of one entity
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityProfile {
    pub name: String,
    pub types: Vec<String>,
    pub roles: Vec<String>,

    /// Raw count in thousands, rounded
    pub usage: u64,

    pub viability_ceiling: Option<f64>,
    pub abilities: Vec<(String, f64)>,
    pub items: Vec<(String, f64)>,
    pub tera_types: Vec<(String, f64)>,
    pub moves: Vec<(String, f64)>,
    pub teammates: Vec<(String, f64)>,
    pub counters: Vec<(String, String)>,
}

impl EntityProfile {
    pub fn of(entity: &Entity) -> Self {
        let top = |map: &BTreeMap<String, f64>, n| {
            top_entries(map.iter().map(|(k, v)| (k.clone(), *v)), n)
        };

        Self {
            name: entity.name.clone(),
            types: entity.types.iter().map(ToString::to_string).collect(),
            roles: entity.roles.iter().map(|r| r.as_str().to_string()).collect(),
            usage: (entity.raw_count() as f64 / 1000.0).round() as u64,
            viability_ceiling: entity.stats.viability_ceiling,
            abilities: top(&entity.stats.abilities, 3),
            items: top(&entity.stats.items, 3),
            tera_types: top(&entity.stats.tera_types, 3),
            moves: top(&entity.stats.moves, 5),
            teammates: top(&entity.stats.teammates, 5),
            counters: entity
                .stats
                .checks_counters
                .iter()
                .map(|c| (c.name.clone(), c.detail.clone()))
                .collect(),
        }
    }
}

/// Matchup against one opponent; `summary` is absent when the oracle failed
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentMatchup {
    pub opponent: String,
    pub verdict: String,
    pub summary: Option<MatchupSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreVerdict {
    Dominates,
    Outmatched,
    Even,
}

impl CoreVerdict {
    pub fn from_counts(wins: usize, losses: usize) -> Self {
        match wins.cmp(&losses) {
            std::cmp::Ordering::Greater => CoreVerdict::Dominates,
            std::cmp::Ordering::Less => CoreVerdict::Outmatched,
            std::cmp::Ordering::Equal => CoreVerdict::Even,
        }
    }
}

/// How an entity fares against every member of a known core
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreMatchup {
    pub core: Vec<String>,
    pub members: Vec<OpponentMatchup>,
    pub wins: usize,
    pub losses: usize,
    pub verdict: CoreVerdict,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityAnalysis {
    pub profile: EntityProfile,

    /// Against the most viable entities
    pub threats: Vec<OpponentMatchup>,

    /// Known cores the entity belongs to
    pub cores: Vec<Vec<String>>,

    /// Known cores it does not belong to
    pub versus_cores: Vec<CoreMatchup>,
}

/// Analyze `name` against the `top_n` most viable entities and against
/// every known core with at least `core_min_pct` reciprocal teammate usage
pub fn analyze_entity<O: DamageOracle>(
    metagame: &Metagame,
    name: &str,
    top_n: usize,
    core_min_pct: f64,
    adapter: &mut MatchupAdapter<O>,
) -> Result<EntityAnalysis, MetagameError> {
    let entity = metagame.get(name)?;
    let profile = EntityProfile::of(entity);

    // One extra so that skipping the entity itself still leaves `top_n`
    let threats: Vec<OpponentMatchup> = metagame
        .top_by_viability(top_n + 1)
        .into_iter()
        .filter(|foe| foe.key != entity.key)
        .take(top_n)
        .map(|foe| opponent_matchup(entity, &foe.name, adapter))
        .collect();

    let (cores, others): (Vec<Vec<String>>, Vec<Vec<String>>) = metagame
        .common_cores(core_min_pct)
        .into_iter()
        .partition(|core| core.iter().any(|m| same_entity(m, &entity.name)));

    let versus_cores = others
        .into_iter()
        .map(|core| {
            let members: Vec<OpponentMatchup> = core
                .iter()
                .map(|member| opponent_matchup(entity, member, adapter))
                .collect();
            let count = |verdict: Verdict| {
                members
                    .iter()
                    .filter(|m| m.summary.as_ref().is_some_and(|s| s.verdict == verdict))
                    .count()
            };
            let (wins, losses) = (count(Verdict::Win), count(Verdict::Loss));

            CoreMatchup {
                core,
                wins,
                losses,
                verdict: CoreVerdict::from_counts(wins, losses),
                members,
            }
        })
        .collect();

    tracing::debug!(entity = %entity.name, top_n, "entity analyzed");

    Ok(EntityAnalysis {
        profile,
        threats,
        cores,
        versus_cores,
    })
}

fn opponent_matchup<O: DamageOracle>(
    entity: &Entity,
    opponent: &str,
    adapter: &mut MatchupAdapter<O>,
) -> OpponentMatchup {
    let outcome = adapter.matchup(&entity.key, opponent);
    OpponentMatchup {
        opponent: opponent.to_string(),
        verdict: outcome.label().to_string(),
        summary: outcome.summary().cloned(),
    }
}
