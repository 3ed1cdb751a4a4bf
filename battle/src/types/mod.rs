//! Domain types shared by the duel, matchup and core-building layers

mod combatant;
mod name;
mod pokemon_type;
mod role;
mod verdict;

pub use combatant::{CombatantSet, DuelRecord, MoveDamage, OffensiveStats, SetError};
pub use name::{normalize_name, same_entity};
pub use pokemon_type::{Type, weaknesses};
pub use role::{RoleConstraint, RoleParseError, RoleTag, infer_roles};
pub use verdict::Verdict;
