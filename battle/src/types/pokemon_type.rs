//! Elemental types and defensive effectiveness

/// The 18 elemental types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Type {
    pub const ALL: [Type; 18] = [
        Type::Normal,
        Type::Fire,
        Type::Water,
        Type::Electric,
        Type::Grass,
        Type::Ice,
        Type::Fighting,
        Type::Poison,
        Type::Ground,
        Type::Flying,
        Type::Psychic,
        Type::Bug,
        Type::Rock,
        Type::Ghost,
        Type::Dragon,
        Type::Dark,
        Type::Steel,
        Type::Fairy,
    ];

    /// Multiplier of an attack of this type against one defending type
    pub fn effectiveness(self, defender: Type) -> f32 {
        use Type::*;

        match (self, defender) {
            (Normal | Fighting, Ghost)
            | (Ghost, Normal)
            | (Electric, Ground)
            | (Ground, Flying)
            | (Psychic, Dark)
            | (Dragon, Fairy)
            | (Poison, Steel) => 0.0,

            (Fire, Grass | Ice | Bug | Steel)
            | (Water, Fire | Ground | Rock)
            | (Electric, Water | Flying)
            | (Grass, Water | Ground | Rock)
            | (Ice, Grass | Ground | Flying | Dragon)
            | (Fighting, Normal | Ice | Rock | Dark | Steel)
            | (Poison, Grass | Fairy)
            | (Ground, Fire | Electric | Poison | Rock | Steel)
            | (Flying, Grass | Fighting | Bug)
            | (Psychic, Fighting | Poison)
            | (Bug, Grass | Psychic | Dark)
            | (Rock, Fire | Ice | Flying | Bug)
            | (Ghost, Psychic | Ghost)
            | (Dragon, Dragon)
            | (Dark, Psychic | Ghost)
            | (Steel, Ice | Rock | Fairy)
            | (Fairy, Fighting | Dragon | Dark) => 2.0,

            (Normal, Rock | Steel)
            | (Fire, Fire | Water | Rock | Dragon)
            | (Water, Water | Grass | Dragon)
            | (Electric, Electric | Grass | Dragon)
            | (Grass, Fire | Grass | Poison | Flying | Bug | Dragon | Steel)
            | (Ice, Fire | Water | Ice | Steel)
            | (Fighting, Poison | Flying | Psychic | Bug | Fairy)
            | (Poison, Poison | Ground | Rock | Ghost)
            | (Ground, Grass | Bug)
            | (Flying, Electric | Rock | Steel)
            | (Psychic, Psychic | Steel)
            | (Bug, Fire | Fighting | Poison | Flying | Ghost | Steel | Fairy)
            | (Rock, Fighting | Ground | Steel)
            | (Ghost, Dark)
            | (Dragon, Steel)
            | (Dark, Fighting | Dark | Fairy)
            | (Steel, Fire | Water | Electric | Steel)
            | (Fairy, Fire | Poison | Steel) => 0.5,

            _ => 1.0,
        }
    }

    /// Multiplier against a (possibly dual) typing
    pub fn effectiveness_multi(self, defenders: &[Type]) -> f32 {
        defenders.iter().map(|t| self.effectiveness(*t)).product()
    }

    /// Parse a type name, case-insensitive
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Electric => "Electric",
            Type::Grass => "Grass",
            Type::Ice => "Ice",
            Type::Fighting => "Fighting",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Flying => "Flying",
            Type::Psychic => "Psychic",
            Type::Bug => "Bug",
            Type::Rock => "Rock",
            Type::Ghost => "Ghost",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Steel => "Steel",
            Type::Fairy => "Fairy",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attacking types that hit the typing super effectively
pub fn weaknesses(defender_types: &[Type]) -> Vec<Type> {
    if defender_types.is_empty() {
        return Vec::new();
    }
    Type::ALL
        .iter()
        .copied()
        .filter(|t| t.effectiveness_multi(defender_types) > 1.0)
        .collect()
}
