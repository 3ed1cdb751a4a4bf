//! Deterministic multi-round duel resolution
//!
//! Each round both sides use their best move (highest maximum damage) and
//! deal its maximum as a flat hit. The faster side hits first and wins
//! immediately on a knockout; equal speeds trade hits simultaneously. A duel
//! nobody wins within the round limit is a draw, regardless of remaining hp.

use crate::types::{CombatantSet, MoveDamage, Verdict};

/// Duel resolver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelConfig {
    pub max_rounds: u32,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self { max_rounds: 8 }
    }
}

/// Terminal state of one duel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuelOutcome {
    /// Result for the attacking side
    pub verdict: Verdict,

    /// Round in which the duel ended (the round limit on a stalemate)
    pub rounds: u32,
}

/// Resolves single set-vs-set duels
#[derive(Debug, Clone, Copy, Default)]
pub struct DuelResolver {
    config: DuelConfig,
}

impl DuelResolver {
    pub fn new(config: DuelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> DuelConfig {
        self.config
    }

    /// Resolve `attacker` vs `defender`, each using its own damage rows
    /// against the other. Missing rows count as zero damage.
    pub fn resolve(
        &self,
        attacker: &CombatantSet,
        defender: &CombatantSet,
        attacker_moves: &[MoveDamage],
        defender_moves: &[MoveDamage],
    ) -> DuelOutcome {
        let mut attacker_hp = attacker.hp;
        let mut defender_hp = defender.hp;

        // Move choice never changes between rounds
        let attacker_hit = MoveDamage::best_max(attacker_moves);
        let defender_hit = MoveDamage::best_max(defender_moves);

        for round in 1..=self.config.max_rounds {
            let ended = |verdict| DuelOutcome { verdict, rounds: round };

            if attacker.speed > defender.speed {
                defender_hp -= attacker_hit;
                if defender_hp <= 0.0 {
                    return ended(Verdict::Win);
                }
                attacker_hp -= defender_hit;
                if attacker_hp <= 0.0 {
                    return ended(Verdict::Loss);
                }
            } else if defender.speed > attacker.speed {
                attacker_hp -= defender_hit;
                if attacker_hp <= 0.0 {
                    return ended(Verdict::Loss);
                }
                defender_hp -= attacker_hit;
                if defender_hp <= 0.0 {
                    return ended(Verdict::Win);
                }
            } else {
                defender_hp -= attacker_hit;
                attacker_hp -= defender_hit;
                match (attacker_hp <= 0.0, defender_hp <= 0.0) {
                    (true, true) => return ended(Verdict::Draw),
                    (false, true) => return ended(Verdict::Win),
                    (true, false) => return ended(Verdict::Loss),
                    (false, false) => {}
                }
            }
        }

        DuelOutcome {
            verdict: Verdict::Draw,
            rounds: self.config.max_rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OffensiveStats;

    fn set(name: &str, hp: f64, speed: f64) -> CombatantSet {
        CombatantSet {
            name: name.to_string(),
            hp,
            speed,
            offense: OffensiveStats::default(),
            moves: Vec::new(),
            ability: None,
            item: None,
        }
    }

    fn hits(values: &[f64]) -> Vec<MoveDamage> {
        values
            .iter()
            .enumerate()
            .map(|(i, max)| MoveDamage {
                name: format!("move{}", i),
                min: max * 0.85,
                max: *max,
            })
            .collect()
    }

    #[test]
    fn test_faster_ohko_wins_round_one() {
        let resolver = DuelResolver::default();
        let outcome = resolver.resolve(
            &set("Iron Valiant", 100.0, 350.0),
            &set("Kingambit", 100.0, 136.0),
            &hits(&[40.0, 100.0]),
            &hits(&[300.0]),
        );

        assert_eq!(outcome.verdict, Verdict::Win);
        assert_eq!(outcome.rounds, 1);
    }

    #[test]
    fn test_slower_side_loses_race() {
        let resolver = DuelResolver::default();
        // Defender is faster and needs two hits; attacker needs three
        let outcome = resolver.resolve(
            &set("Ting-Lu", 100.0, 50.0),
            &set("Dragonite", 100.0, 200.0),
            &hits(&[34.0]),
            &hits(&[50.0]),
        );

        assert_eq!(outcome.verdict, Verdict::Loss);
        assert_eq!(outcome.rounds, 2);
    }

    #[test]
    fn test_faster_side_survives_then_wins() {
        let resolver = DuelResolver::default();
        let outcome = resolver.resolve(
            &set("Great Tusk", 100.0, 90.0),
            &set("Gholdengo", 100.0, 120.0),
            &hits(&[60.0]),
            &hits(&[40.0]),
        );

        // Round 1: Gholdengo hits (60 left), Tusk hits (40 left)
        // Round 2: Gholdengo hits (20 left), Tusk knocks out
        assert_eq!(outcome.verdict, Verdict::Win);
        assert_eq!(outcome.rounds, 2);
    }

    #[test]
    fn test_speed_tie_double_knockout_is_draw() {
        let resolver = DuelResolver::default();
        let outcome = resolver.resolve(
            &set("Garchomp", 100.0, 102.0),
            &set("Garchomp", 100.0, 102.0),
            &hits(&[120.0]),
            &hits(&[101.0]),
        );

        assert_eq!(outcome.verdict, Verdict::Draw);
        assert_eq!(outcome.rounds, 1);
    }

    #[test]
    fn test_speed_tie_single_knockout() {
        let resolver = DuelResolver::default();
        let win = resolver.resolve(
            &set("A", 100.0, 100.0),
            &set("B", 100.0, 100.0),
            &hits(&[100.0]),
            &hits(&[99.0]),
        );
        assert_eq!(win.verdict, Verdict::Win);

        let loss = resolver.resolve(
            &set("A", 100.0, 100.0),
            &set("B", 100.0, 100.0),
            &hits(&[10.0]),
            &hits(&[100.0]),
        );
        assert_eq!(loss.verdict, Verdict::Loss);
    }

    #[test]
    fn test_no_moves_is_stalemate() {
        let resolver = DuelResolver::default();
        let outcome = resolver.resolve(&set("A", 100.0, 80.0), &set("B", 100.0, 90.0), &[], &[]);

        assert_eq!(outcome.verdict, Verdict::Draw);
        assert_eq!(outcome.rounds, 8);
    }

    #[test]
    fn test_round_limit_ignores_remaining_hp() {
        let resolver = DuelResolver::new(DuelConfig { max_rounds: 3 });
        // Attacker would win on round 5, so the limit turns it into a draw
        let outcome = resolver.resolve(
            &set("A", 100.0, 120.0),
            &set("B", 100.0, 90.0),
            &hits(&[21.0]),
            &hits(&[1.0]),
        );

        assert_eq!(outcome.verdict, Verdict::Draw);
        assert_eq!(outcome.rounds, 3);
    }

    #[test]
    fn test_one_sided_moves() {
        let resolver = DuelResolver::default();
        let outcome = resolver.resolve(
            &set("A", 100.0, 50.0),
            &set("B", 100.0, 90.0),
            &hits(&[30.0]),
            &[],
        );

        assert_eq!(outcome.verdict, Verdict::Win);
        assert_eq!(outcome.rounds, 4);
    }
}
