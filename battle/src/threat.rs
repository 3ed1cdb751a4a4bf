//! Threat detection against a partial core

use std::collections::BTreeSet;

use crate::matchup::{DamageOracle, MatchupAdapter};
use crate::metagame::{Entity, Metagame};
use crate::types::{Verdict, normalize_name};

/// Usage horizons searched for threats: `start`, `start + step`, ... up to
/// and including `ceiling`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizonPolicy {
    pub start: usize,
    pub step: usize,
    pub ceiling: usize,
}

impl Default for HorizonPolicy {
    fn default() -> Self {
        Self {
            start: 20,
            step: 20,
            ceiling: 100,
        }
    }
}

impl HorizonPolicy {
    /// Horizons in search order. A zero step yields `start` only.
    pub fn horizons(self) -> impl Iterator<Item = usize> {
        let HorizonPolicy {
            start,
            step,
            ceiling,
        } = self;
        std::iter::successors(Some(start), move |k| {
            if step == 0 { None } else { k.checked_add(step) }
        })
        .take_while(move |k| *k <= ceiling)
    }
}

/// An entity that beats the current core, with its advisory score
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threat {
    pub name: String,
    pub score: f64,
}

/// Ranks the most used entities by how badly they beat a core
#[derive(Debug, Clone)]
pub struct ThreatScorer<'m> {
    metagame: &'m Metagame,
    /// Known cores as sets of normalized names
    known_cores: Vec<BTreeSet<String>>,
}

impl<'m> ThreatScorer<'m> {
    pub fn new(metagame: &'m Metagame, known_cores: &[Vec<String>]) -> Self {
        let known_cores = known_cores
            .iter()
            .map(|core| core.iter().map(|name| normalize_name(name)).collect())
            .collect();
        Self {
            metagame,
            known_cores,
        }
    }

    /// Scorer using the metagame's own teammate cores
    pub fn from_metagame(metagame: &'m Metagame, core_min_pct: f64) -> Self {
        Self::new(metagame, &metagame.common_cores(core_min_pct))
    }

    pub fn metagame(&self) -> &'m Metagame {
        self.metagame
    }

    /// Number of known cores containing `name`
    pub fn cores_containing(&self, name: &str) -> usize {
        let key = normalize_name(name);
        self.known_cores.iter().filter(|c| c.contains(&key)).count()
    }

    /// 1.0 + raw count / 100000 + 0.5 per known core containing the entity
    pub fn score(&self, entity: &Entity) -> f64 {
        1.0 + entity.raw_count() as f64 / 100_000.0 + 0.5 * self.cores_containing(&entity.key) as f64
    }

    /// Entities among the `horizon` most used that beat `core`, best first.
    ///
    /// With two or more members a threat must beat all of them and with one
    /// it must beat that one. An empty core has nothing to beat, so it has
    /// no threats. Core members themselves are never threats.
    pub fn threats<O: DamageOracle>(
        &self,
        core: &[String],
        horizon: usize,
        adapter: &mut MatchupAdapter<O>,
    ) -> Vec<Threat> {
        if core.is_empty() {
            return Vec::new();
        }
        let members: BTreeSet<String> = core.iter().map(|m| normalize_name(m)).collect();

        let mut threats = Vec::new();
        for entity in self.metagame.top_by_usage(horizon) {
            if members.contains(&entity.key) {
                continue;
            }

            let mut beats = |member: &String| adapter.verdict(&entity.key, member) == Some(Verdict::Win);
            let qualifies = match core.len() {
                1 => core.iter().any(&mut beats),
                _ => core.iter().all(&mut beats),
            };

            if qualifies {
                threats.push(Threat {
                    name: entity.name.clone(),
                    score: self.score(entity),
                });
            }
        }

        // Stable: equal scores stay in usage order
        threats.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            core = ?core,
            horizon,
            threats = threats.len(),
            "scored threats"
        );
        threats
    }
}
