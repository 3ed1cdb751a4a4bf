//! Combatant sets and directional duel records

use teamcore_protocol::{WireMove, WireRecord, WireSet};
use thiserror::Error;

/// Offensive stat split of a set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffensiveStats {
    pub atk: f64,
    pub spa: f64,
}

/// One concrete configuration of an entity, as computed by the damage oracle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSet {
    pub name: String,

    /// Computed hit points, always > 0
    pub hp: f64,

    /// Computed speed, always >= 0
    pub speed: f64,

    pub offense: OffensiveStats,

    /// Move names, in the order the oracle reported them
    pub moves: Vec<String>,

    pub ability: Option<String>,

    pub item: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetError {
    #[error("set {name} has non-positive hp ({hp})")]
    NonPositiveHp { name: String, hp: f64 },

    #[error("set {name} has negative speed ({speed})")]
    NegativeSpeed { name: String, speed: f64 },
}

impl CombatantSet {
    fn from_wire(set: &WireSet, moves: Vec<String>) -> Result<Self, SetError> {
        let stats = &set.stats;
        if stats.hp <= 0.0 || stats.hp.is_nan() {
            return Err(SetError::NonPositiveHp {
                name: set.name.clone(),
                hp: stats.hp,
            });
        }
        if stats.spe < 0.0 || stats.spe.is_nan() {
            return Err(SetError::NegativeSpeed {
                name: set.name.clone(),
                speed: stats.spe,
            });
        }

        Ok(Self {
            name: set.name.clone(),
            hp: stats.hp,
            speed: stats.spe,
            offense: OffensiveStats {
                atk: stats.atk,
                spa: stats.spa,
            },
            moves,
            ability: set.ability.clone().filter(|a| !a.is_empty()),
            item: set.item.clone().filter(|i| !i.is_empty()),
        })
    }
}

/// Damage range of one usable move against one defender
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveDamage {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl MoveDamage {
    /// Convert an oracle row; rows the calculator rejected yield `None`
    pub fn from_wire(row: &WireMove) -> Option<Self> {
        if row.error.is_some() {
            return None;
        }
        let max = row.max.or(row.min)?;
        let min = row.min.unwrap_or(max);
        Some(Self {
            name: row.name.clone(),
            min,
            max,
        })
    }

    /// The move with the highest maximum damage (first one on ties)
    pub fn best(moves: &[MoveDamage]) -> Option<&MoveDamage> {
        moves.iter().fold(None, |best, m| match best {
            Some(b) if b.max >= m.max => Some(b),
            _ => Some(m),
        })
    }

    /// Maximum damage of the best move, zero when nothing is usable
    pub fn best_max(moves: &[MoveDamage]) -> f64 {
        Self::best(moves).map_or(0.0, |m| m.max)
    }
}

/// One direction of a set pair: the attacker's moves against the defender.
///
/// The reverse direction (defender attacking attacker) is a separate record,
/// the mirror, identified by the swapped set identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct DuelRecord {
    pub attacker_set: String,
    pub defender_set: String,
    pub attacker: CombatantSet,

    /// Defender stats; its move list stays empty until seen from its own side
    pub defender: CombatantSet,

    pub moves: Vec<MoveDamage>,
}

impl DuelRecord {
    pub fn from_wire(record: &WireRecord) -> Result<Self, SetError> {
        let move_names = record.moves.iter().map(|m| m.name.clone()).collect();
        let attacker = CombatantSet::from_wire(&record.attacker, move_names)?;
        let defender = CombatantSet::from_wire(&record.defender, Vec::new())?;

        Ok(Self {
            attacker_set: record.set_names.a.clone(),
            defender_set: record.set_names.b.clone(),
            attacker,
            defender,
            moves: record.moves.iter().filter_map(MoveDamage::from_wire).collect(),
        })
    }

    /// Identifier pair of this record
    pub fn key(&self) -> (String, String) {
        (self.attacker_set.clone(), self.defender_set.clone())
    }

    /// Identifier pair the mirror record carries
    pub fn mirror_key(&self) -> (String, String) {
        (self.defender_set.clone(), self.attacker_set.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamcore_protocol::{SetNames, StatLine};

    fn wire_set(name: &str, hp: f64, spe: f64) -> WireSet {
        WireSet {
            name: name.to_string(),
            item: Some("Leftovers".to_string()),
            ability: Some(String::new()),
            nature: None,
            stats: StatLine {
                hp,
                atk: 200.0,
                spa: 100.0,
                spe,
                ..StatLine::default()
            },
        }
    }

    fn row(name: &str, min: Option<f64>, max: Option<f64>) -> WireMove {
        WireMove {
            name: name.to_string(),
            min,
            max,
            error: None,
        }
    }

    #[test]
    fn test_move_damage_from_wire() {
        let ok = MoveDamage::from_wire(&row("Earthquake", Some(80.0), Some(95.0))).unwrap();
        assert_eq!(ok.min, 80.0);
        assert_eq!(ok.max, 95.0);

        let single = MoveDamage::from_wire(&row("Seismic Toss", Some(100.0), None)).unwrap();
        assert_eq!(single.max, 100.0);

        assert!(MoveDamage::from_wire(&row("Protect", None, None)).is_none());

        let mut failed = row("Rapid Spin", Some(10.0), Some(12.0));
        failed.error = Some("invalid move".to_string());
        assert!(MoveDamage::from_wire(&failed).is_none());
    }

    #[test]
    fn test_best_move() {
        let moves = vec![
            MoveDamage { name: "Ice Spinner".into(), min: 40.0, max: 48.0 },
            MoveDamage { name: "Headlong Rush".into(), min: 90.0, max: 106.0 },
            MoveDamage { name: "Close Combat".into(), min: 88.0, max: 106.0 },
        ];

        assert_eq!(MoveDamage::best(&moves).unwrap().name, "Headlong Rush");
        assert_eq!(MoveDamage::best_max(&moves), 106.0);
        assert_eq!(MoveDamage::best_max(&[]), 0.0);
    }

    #[test]
    fn test_duel_record_from_wire() {
        let wire = WireRecord {
            attacker: wire_set("Great Tusk", 374.0, 300.0),
            defender: wire_set("Kingambit", 404.0, 136.0),
            moves: vec![row("Headlong Rush", Some(180.0), Some(213.0)), row("Bulk Up", None, None)],
            set_names: SetNames {
                a: "strategy: Offense".into(),
                b: "strategy: Swords Dance".into(),
            },
        };

        let record = DuelRecord::from_wire(&wire).unwrap();
        assert_eq!(record.attacker.hp, 374.0);
        assert_eq!(record.attacker.speed, 300.0);
        assert_eq!(record.attacker.moves, vec!["Headlong Rush", "Bulk Up"]);
        assert_eq!(record.attacker.ability, None);
        assert_eq!(record.attacker.item.as_deref(), Some("Leftovers"));
        assert!(record.defender.moves.is_empty());
        assert_eq!(record.moves.len(), 1);
        assert_eq!(
            record.mirror_key(),
            ("strategy: Swords Dance".to_string(), "strategy: Offense".to_string())
        );
    }

    #[test]
    fn test_duel_record_rejects_bad_stats() {
        let wire = WireRecord {
            attacker: wire_set("Great Tusk", 0.0, 300.0),
            defender: wire_set("Kingambit", 404.0, 136.0),
            moves: Vec::new(),
            set_names: SetNames { a: "x".into(), b: "y".into() },
        };
        assert!(matches!(
            DuelRecord::from_wire(&wire),
            Err(SetError::NonPositiveHp { .. })
        ));

        let wire = WireRecord {
            attacker: wire_set("Great Tusk", 374.0, 300.0),
            defender: wire_set("Kingambit", 404.0, -1.0),
            moves: Vec::new(),
            set_names: SetNames { a: "x".into(), b: "y".into() },
        };
        assert!(matches!(
            DuelRecord::from_wire(&wire),
            Err(SetError::NegativeSpeed { .. })
        ));
    }
}
