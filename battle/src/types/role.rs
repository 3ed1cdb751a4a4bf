//! Role tags and per-slot role constraints

use std::collections::BTreeSet;

use teamcore_protocol::BaseStats;
use thiserror::Error;

use super::name::normalize_name;

/// Team role an entity can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoleTag {
    PhysicalAttacker,
    SpecialAttacker,
    Fast,
    Slow,
    Tank,
    HazardSetter,
    HazardControl,
    Pivot,
    SetupSweeper,
    Support,
    Screen,
    Utility,
    Priority,
    WeatherSetter,
}

impl RoleTag {
    pub const ALL: [RoleTag; 14] = [
        RoleTag::PhysicalAttacker,
        RoleTag::SpecialAttacker,
        RoleTag::Fast,
        RoleTag::Slow,
        RoleTag::Tank,
        RoleTag::HazardSetter,
        RoleTag::HazardControl,
        RoleTag::Pivot,
        RoleTag::SetupSweeper,
        RoleTag::Support,
        RoleTag::Screen,
        RoleTag::Utility,
        RoleTag::Priority,
        RoleTag::WeatherSetter,
    ];

    /// Parse a tag, ignoring case, spaces, hyphens and underscores
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = normalize_name(s).chars().filter(|c| *c != '_').collect();
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().replace('_', "") == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleTag::PhysicalAttacker => "physical_attacker",
            RoleTag::SpecialAttacker => "special_attacker",
            RoleTag::Fast => "fast",
            RoleTag::Slow => "slow",
            RoleTag::Tank => "tank",
            RoleTag::HazardSetter => "hazard_setter",
            RoleTag::HazardControl => "hazard_control",
            RoleTag::Pivot => "pivot",
            RoleTag::SetupSweeper => "setup_sweeper",
            RoleTag::Support => "support",
            RoleTag::Screen => "screen",
            RoleTag::Utility => "utility",
            RoleTag::Priority => "priority",
            RoleTag::WeatherSetter => "weather_setter",
        }
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    #[error("Unknown role tag: {0}")]
    UnknownRole(String),

    #[error("Empty role specification")]
    Empty,
}

/// Acceptable roles for one core slot. Empty means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleConstraint {
    pub accepted: BTreeSet<RoleTag>,
}

impl RoleConstraint {
    /// Sentinel accepted on the command line for an unconstrained slot
    pub const NONE: &'static str = "none";

    pub fn any() -> Self {
        Self::default()
    }

    pub fn of(tags: impl IntoIterator<Item = RoleTag>) -> Self {
        Self {
            accepted: tags.into_iter().collect(),
        }
    }

    /// Parse `"none"` or a comma separated tag list such as `"pivot, tank"`
    pub fn parse(spec: &str) -> Result<Self, RoleParseError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(RoleParseError::Empty);
        }
        if spec.eq_ignore_ascii_case(Self::NONE) {
            return Ok(Self::any());
        }

        let mut accepted = BTreeSet::new();
        for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let tag =
                RoleTag::parse(part).ok_or_else(|| RoleParseError::UnknownRole(part.to_string()))?;
            accepted.insert(tag);
        }

        if accepted.is_empty() {
            return Err(RoleParseError::Empty);
        }
        Ok(Self { accepted })
    }

    pub fn is_unconstrained(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Whether an entity holding `roles` can fill this slot
    pub fn allows(&self, roles: &BTreeSet<RoleTag>) -> bool {
        self.is_unconstrained() || self.accepted.iter().any(|tag| roles.contains(tag))
    }
}

impl std::fmt::Display for RoleConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unconstrained() {
            return write!(f, "{}", Self::NONE);
        }
        let tags: Vec<&str> = self.accepted.iter().map(RoleTag::as_str).collect();
        write!(f, "{}", tags.join(","))
    }
}

const HAZARD_MOVES: &[&str] = &["stealthrock", "spikes", "stickyweb", "toxicspikes"];
const HAZARD_REMOVAL: &[&str] = &["defog", "rapidspin", "courtchange", "mortalspin", "tidyup"];
const PIVOT_MOVES: &[&str] = &["uturn", "voltswitch", "flipturn", "partingshot", "chillyreception"];
const SETUP_MOVES: &[&str] = &[
    "swordsdance",
    "nastyplot",
    "calmmind",
    "bulkup",
    "dragondance",
    "bellydrum",
    "irondefense",
    "agility",
    "quiverdance",
    "shellsmash",
    "growth",
    "curse",
    "victorydance",
    "takeheart",
    "clangoroussoul",
    "tailglow",
];
const SUPPORT_MOVES: &[&str] = &["wish", "lunardance", "healingwish"];
const SCREEN_MOVES: &[&str] = &["reflect", "lightscreen", "auroraveil"];
const UTILITY_MOVES: &[&str] = &["taunt", "encore", "trick", "switcheroo"];
const PRIORITY_MOVES: &[&str] = &[
    "shadowsneak",
    "iceshard",
    "bulletpunch",
    "aquajet",
    "extremespeed",
    "suckerpunch",
    "machpunch",
    "vacuumwave",
];
const WEATHER_ABILITIES: &[&str] = &["drought", "drizzle", "snowwarning", "sandstream", "orichalcumpulse"];

/// Derive role tags from base stats, move pool and abilities.
///
/// Move and ability names may use any spelling; they are normalized first.
pub fn infer_roles<'a>(
    stats: Option<&BaseStats>,
    moves: impl IntoIterator<Item = &'a str>,
    abilities: impl IntoIterator<Item = &'a str>,
) -> BTreeSet<RoleTag> {
    let moves: BTreeSet<String> = moves.into_iter().map(normalize_name).collect();
    let abilities: BTreeSet<String> = abilities.into_iter().map(normalize_name).collect();
    let knows_any = |list: &[&str]| list.iter().any(|m| moves.contains(*m));
    let has_ability = |list: &[&str]| list.iter().any(|a| abilities.contains(*a));

    let mut roles = BTreeSet::new();

    if let Some(stats) = stats {
        if stats.atk >= 100 {
            roles.insert(RoleTag::PhysicalAttacker);
        }
        if stats.spa >= 100 {
            roles.insert(RoleTag::SpecialAttacker);
        }
        if stats.spe >= 100 {
            roles.insert(RoleTag::Fast);
        } else if stats.spe <= 60 {
            roles.insert(RoleTag::Slow);
        }
        let bulk = f64::from(stats.hp) * (f64::from(stats.def) + f64::from(stats.spd)) / 2.0;
        if bulk >= 40_000.0 {
            roles.insert(RoleTag::Tank);
        }
    }

    if has_ability(&["hugepower", "purepower"]) {
        roles.insert(RoleTag::PhysicalAttacker);
    }
    if knows_any(HAZARD_MOVES) {
        roles.insert(RoleTag::HazardSetter);
    }
    if knows_any(HAZARD_REMOVAL) {
        roles.insert(RoleTag::HazardControl);
    }
    if knows_any(PIVOT_MOVES) {
        roles.insert(RoleTag::Pivot);
    }
    if knows_any(SETUP_MOVES) || has_ability(&["contrary"]) {
        roles.insert(RoleTag::SetupSweeper);
    }
    if knows_any(SUPPORT_MOVES) {
        roles.insert(RoleTag::Support);
    }
    if knows_any(SCREEN_MOVES) {
        roles.insert(RoleTag::Screen);
    }
    if knows_any(UTILITY_MOVES) {
        roles.insert(RoleTag::Utility);
    }
    if knows_any(PRIORITY_MOVES) {
        roles.insert(RoleTag::Priority);
    }
    if has_ability(WEATHER_ABILITIES) {
        roles.insert(RoleTag::WeatherSetter);
    }

    roles
}
