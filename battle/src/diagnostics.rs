//! Type coverage diagnostics for a team core

use std::collections::BTreeMap;

use crate::metagame::Entity;
use crate::types::{RoleTag, weaknesses};

/// Fewer distinct types than this earns a variety tip
const MIN_DISTINCT_TYPES: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamDiagnostics {
    /// Members per type
    pub type_counts: BTreeMap<String, usize>,

    /// Attacking types hitting two or more members super effectively, with
    /// the members they hit
    pub shared_weaknesses: BTreeMap<String, Vec<String>>,

    pub tips: Vec<String>,
}

impl TeamDiagnostics {
    pub fn for_members(members: &[&Entity]) -> Self {
        let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut weak_to: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for member in members {
            for t in &member.types {
                *type_counts.entry(t.to_string()).or_default() += 1;
            }
            for t in weaknesses(&member.types) {
                weak_to.entry(t.to_string()).or_default().push(member.name.clone());
            }
        }

        weak_to.retain(|_, hit| hit.len() >= 2);

        let mut tips = Vec::new();
        if type_counts.len() < MIN_DISTINCT_TYPES {
            tips.push(format!(
                "Only {} distinct types across the core; more type variety would help",
                type_counts.len()
            ));
        }
        if !members.iter().any(|m| m.has_role(RoleTag::HazardControl)) {
            tips.push("No hazard control (Rapid Spin or Defog user) in the core".to_string());
        }

        Self {
            type_counts,
            shared_weaknesses: weak_to,
            tips,
        }
    }
}
