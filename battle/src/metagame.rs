//! Read-only metagame snapshot
//!
//! Built once per analysis run from the store's entries and passed around
//! explicitly. Entities are kept in usage order (raw count descending, then
//! name), which is also the order every search iterates candidates in.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use teamcore_protocol::MetagameEntry;
use thiserror::Error;

use crate::types::{RoleTag, Type, infer_roles, normalize_name};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetagameError {
    #[error("Entity not found: {0}")]
    UnknownEntity(String),
}

/// One metagame entity with its usage statistics
#[derive(Debug, Clone)]
pub struct Entity {
    /// Display name as found in the store
    pub name: String,

    /// Normalized name
    pub key: String,

    pub stats: MetagameEntry,

    /// Explicit tags merged with inferred ones
    pub roles: BTreeSet<RoleTag>,

    pub types: Vec<Type>,
}

impl Entity {
    fn new(name: String, stats: MetagameEntry) -> Self {
        let mut roles = infer_roles(
            stats.base_stats.as_ref(),
            stats.moves.keys().map(String::as_str),
            stats.abilities.keys().map(String::as_str),
        );
        roles.extend(stats.roles.iter().filter_map(|r| RoleTag::parse(r)));

        let types = stats.types.iter().filter_map(|t| Type::from_name(t)).collect();

        Self {
            key: normalize_name(&name),
            name,
            stats,
            roles,
            types,
        }
    }

    pub fn raw_count(&self) -> u64 {
        self.stats.raw_count
    }

    pub fn has_role(&self, role: RoleTag) -> bool {
        self.roles.contains(&role)
    }

    /// Co-occurrence percentage with another entity (any spelling)
    pub fn teammate_pct(&self, other: &str) -> f64 {
        let other = normalize_name(other);
        self.stats
            .teammates
            .iter()
            .find(|(name, _)| normalize_name(name) == other)
            .map_or(0.0, |(_, pct)| *pct)
    }
}

/// Aggregated view of the whole metagame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MetagameSummary {
    pub top_usage: Vec<(String, u64)>,
    pub top_threats: Vec<(String, f64)>,
    pub common_moves: Vec<(String, f64)>,
    pub common_items: Vec<(String, f64)>,
    pub common_tera_types: Vec<(String, f64)>,
    pub common_teammates: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Default)]
pub struct Metagame {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl Metagame {
    /// Build a snapshot from display-name keyed entries.
    ///
    /// Later entries whose names normalize to an existing one are ignored.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, MetagameEntry)>) -> Self {
        let mut entities: Vec<Entity> = Vec::new();
        let mut seen = BTreeSet::new();
        for (name, stats) in entries {
            let entity = Entity::new(name, stats);
            if seen.insert(entity.key.clone()) {
                entities.push(entity);
            }
        }

        entities.sort_by(|a, b| {
            b.raw_count()
                .cmp(&a.raw_count())
                .then_with(|| a.name.cmp(&b.name))
        });

        let index = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();

        Self { entities, index }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in usage order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn find(&self, name: &str) -> Option<&Entity> {
        self.index
            .get(&normalize_name(name))
            .map(|&i| &self.entities[i])
    }

    pub fn get(&self, name: &str) -> Result<&Entity, MetagameError> {
        self.find(name)
            .ok_or_else(|| MetagameError::UnknownEntity(name.to_string()))
    }

    /// Display name for a name in any spelling, falling back to the input
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.find(name).map_or(name, |e| e.name.as_str())
    }

    /// The `k` most used entities
    pub fn top_by_usage(&self, k: usize) -> &[Entity] {
        &self.entities[..k.min(self.entities.len())]
    }

    /// The `k` entities with the highest viability ceiling
    pub fn top_by_viability(&self, k: usize) -> Vec<&Entity> {
        let mut ranked: Vec<&Entity> = self.entities.iter().collect();
        ranked.sort_by(|a, b| {
            let a = a.stats.viability_ceiling.unwrap_or(0.0);
            let b = b.stats.viability_ceiling.unwrap_or(0.0);
            b.total_cmp(&a)
        });
        ranked.truncate(k);
        ranked
    }

    /// Checks and counters listed for an entity
    pub fn checks_and_counters(
        &self,
        name: &str,
        top_n: usize,
    ) -> Result<Vec<(String, String)>, MetagameError> {
        let entity = self.get(name)?;
        Ok(entity
            .stats
            .checks_counters
            .iter()
            .take(top_n)
            .map(|c| (c.name.clone(), c.detail.clone()))
            .collect())
    }

    /// Recurring cores of two or three entities.
    ///
    /// A pair is a core when each lists the other as a teammate at
    /// `min_pct` or more. A pair grows into a triple with a third entity
    /// that is a frequent teammate of the first and lists both members at
    /// `min_pct` or more. Members are sorted by display name.
    pub fn common_cores(&self, min_pct: f64) -> Vec<Vec<String>> {
        let mut cores = Vec::new();
        let mut seen: BTreeSet<Vec<String>> = BTreeSet::new();

        for entity in &self.entities {
            let frequent: Vec<&Entity> = entity
                .stats
                .teammates
                .iter()
                .filter(|(_, pct)| **pct >= min_pct)
                .filter_map(|(mate, _)| self.find(mate))
                .filter(|mate| mate.key != entity.key)
                .collect();

            for mate in &frequent {
                if mate.teammate_pct(&entity.name) < min_pct {
                    continue;
                }
                let pair = sorted_names([entity, *mate]);
                if !seen.insert(keys_of(&pair)) {
                    continue;
                }
                cores.push(pair);

                for third in &frequent {
                    if third.key == mate.key {
                        continue;
                    }
                    if third.teammate_pct(&entity.name) >= min_pct
                        && third.teammate_pct(&mate.name) >= min_pct
                    {
                        let triple = sorted_names([entity, *mate, *third]);
                        if seen.insert(keys_of(&triple)) {
                            cores.push(triple);
                        }
                    }
                }
            }
        }

        cores
    }

    /// Most used entities, top threats and the most common moves, items,
    /// tera types and teammates across all entities
    pub fn summarize(&self, top_n: usize) -> MetagameSummary {
        let aggregate = |select: fn(&MetagameEntry) -> &BTreeMap<String, f64>| {
            let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
            for entity in &self.entities {
                for (name, pct) in select(&entity.stats) {
                    *totals.entry(name.as_str()).or_default() += pct;
                }
            }
            top_entries(totals.into_iter().map(|(k, v)| (k.to_string(), v)), top_n)
        };

        MetagameSummary {
            top_usage: self
                .top_by_usage(top_n)
                .iter()
                .map(|e| (e.name.clone(), e.raw_count()))
                .collect(),
            top_threats: self
                .top_by_viability(top_n)
                .into_iter()
                .map(|e| (e.name.clone(), e.stats.viability_ceiling.unwrap_or(0.0)))
                .collect(),
            common_moves: aggregate(|s| &s.moves),
            common_items: aggregate(|s| &s.items),
            common_tera_types: aggregate(|s| &s.tera_types),
            common_teammates: aggregate(|s| &s.teammates),
        }
    }
}

/// Highest values first; equal values keep their incoming order
pub(crate) fn top_entries(
    entries: impl IntoIterator<Item = (String, f64)>,
    top_n: usize,
) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = entries.into_iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.truncate(top_n);
    entries
}

fn sorted_names<const N: usize>(members: [&Entity; N]) -> Vec<String> {
    let mut names: Vec<String> = members.iter().map(|e| e.name.clone()).collect();
    names.sort();
    names
}

fn keys_of(names: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = names.iter().map(|n| normalize_name(n)).collect();
    keys.sort();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamcore_protocol::CounterEntry;

    fn entry(raw_count: u64, teammates: &[(&str, f64)]) -> MetagameEntry {
        MetagameEntry {
            raw_count,
            teammates: teammates.iter().map(|(n, p)| (n.to_string(), *p)).collect(),
            ..MetagameEntry::default()
        }
    }

    fn sample() -> Metagame {
        let mut tusk = entry(500, &[("Kingambit", 30.0), ("Gholdengo", 25.0), ("Dragonite", 5.0)]);
        tusk.viability_ceiling = Some(90.0);
        tusk.moves = [("Rapid Spin".to_string(), 90.0), ("Headlong Rush".to_string(), 80.0)]
            .into_iter()
            .collect();
        tusk.items = [("Booster Energy".to_string(), 60.0)].into_iter().collect();
        tusk.checks_counters = vec![CounterEntry {
            name: "Dragonite".into(),
            detail: "62.1 (4.2)".into(),
        }];

        let mut gambit = entry(400, &[("Great Tusk", 35.0), ("Gholdengo", 22.0)]);
        gambit.viability_ceiling = Some(95.0);
        gambit.moves = [("Sucker Punch".to_string(), 99.0), ("Swords Dance".to_string(), 70.0)]
            .into_iter()
            .collect();
        gambit.items = [("Leftovers".to_string(), 50.0)].into_iter().collect();

        let gholdengo = entry(300, &[("Great Tusk", 28.0), ("Kingambit", 21.0)]);
        let dragonite = entry(300, &[("Great Tusk", 40.0)]);

        Metagame::from_entries([
            ("Gholdengo".to_string(), gholdengo),
            ("Dragonite".to_string(), dragonite),
            ("Great Tusk".to_string(), tusk),
            ("Kingambit".to_string(), gambit),
        ])
    }

    #[test]
    fn test_usage_order() {
        let meta = sample();
        let names: Vec<&str> = meta.entities().iter().map(|e| e.name.as_str()).collect();
        // Equal counts are ordered by name
        assert_eq!(names, vec!["Great Tusk", "Kingambit", "Dragonite", "Gholdengo"]);

        assert_eq!(meta.top_by_usage(2).len(), 2);
        assert_eq!(meta.top_by_usage(20).len(), 4);
    }

    #[test]
    fn test_lookup_is_normalized() {
        let meta = sample();
        assert_eq!(meta.get("great-tusk").unwrap().name, "Great Tusk");
        assert_eq!(meta.get("GREATTUSK").unwrap().key, "greattusk");
        assert_eq!(
            meta.get("Iron Bundle").unwrap_err(),
            MetagameError::UnknownEntity("Iron Bundle".to_string())
        );
        assert_eq!(meta.display_name("kingambit"), "Kingambit");
        assert_eq!(meta.display_name("Missingno"), "Missingno");
    }

    #[test]
    fn test_duplicate_spellings_keep_first() {
        let meta = Metagame::from_entries([
            ("Iron Valiant".to_string(), entry(10, &[])),
            ("iron-valiant".to_string(), entry(99, &[])),
        ]);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("ironvaliant").unwrap().raw_count(), 10);
    }

    #[test]
    fn test_roles_are_inferred_and_merged() {
        let mut stats = entry(1, &[]);
        stats.moves = [("U-turn".to_string(), 80.0)].into_iter().collect();
        stats.roles = vec!["setup sweeper".to_string(), "not a role".to_string()];
        let meta = Metagame::from_entries([("Iron Moth".to_string(), stats)]);

        let moth = meta.get("Iron Moth").unwrap();
        assert!(moth.has_role(RoleTag::Pivot));
        assert!(moth.has_role(RoleTag::SetupSweeper));
        assert_eq!(moth.roles.len(), 2);
    }

    #[test]
    fn test_top_by_viability() {
        let meta = sample();
        let top: Vec<&str> = meta
            .top_by_viability(2)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(top, vec!["Kingambit", "Great Tusk"]);
    }

    #[test]
    fn test_common_cores() {
        let meta = sample();
        let cores = meta.common_cores(20.0);

        assert!(cores.contains(&vec!["Great Tusk".to_string(), "Kingambit".to_string()]));
        assert!(cores.contains(&vec!["Gholdengo".to_string(), "Great Tusk".to_string()]));
        assert!(cores.contains(&vec![
            "Gholdengo".to_string(),
            "Great Tusk".to_string(),
            "Kingambit".to_string()
        ]));
        // Dragonite lists Tusk but Tusk rarely brings Dragonite
        assert!(!cores.iter().any(|c| c.contains(&"Dragonite".to_string())));

        // No core is reported twice
        let unique: BTreeSet<&Vec<String>> = cores.iter().collect();
        assert_eq!(unique.len(), cores.len());
    }

    #[test]
    fn test_common_cores_threshold() {
        let meta = sample();
        let cores = meta.common_cores(26.0);
        assert_eq!(cores, vec![vec!["Great Tusk".to_string(), "Kingambit".to_string()]]);
    }

    #[test]
    fn test_checks_and_counters() {
        let meta = sample();
        let counters = meta.checks_and_counters("Great Tusk", 5).unwrap();
        assert_eq!(counters, vec![("Dragonite".to_string(), "62.1 (4.2)".to_string())]);
        assert!(meta.checks_and_counters("Missingno", 5).is_err());
    }

    #[test]
    fn test_summarize() {
        let meta = sample();
        let summary = meta.summarize(2);

        assert_eq!(summary.top_usage[0], ("Great Tusk".to_string(), 500));
        assert_eq!(summary.top_threats[0].0, "Kingambit");
        assert_eq!(summary.common_moves[0], ("Sucker Punch".to_string(), 99.0));
        assert_eq!(summary.common_items.len(), 2);
        assert_eq!(summary.common_teammates[0], ("Great Tusk".to_string(), 103.0));
    }
}
