//! Duel and matchup verdicts

/// Outcome of a duel, relative to the attacking side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verdict {
    Win,
    Loss,
    Draw,
}

impl Verdict {
    /// Overall verdict for `wins` out of `total` resolved duels. An exact
    /// half is a draw; no duels at all count as a loss.
    pub fn from_ratio(wins: u32, total: u32) -> Self {
        if total == 0 {
            return Verdict::Loss;
        }
        match (2 * u64::from(wins)).cmp(&u64::from(total)) {
            std::cmp::Ordering::Greater => Verdict::Win,
            std::cmp::Ordering::Less => Verdict::Loss,
            std::cmp::Ordering::Equal => Verdict::Draw,
        }
    }

    /// The same outcome seen from the other side
    pub fn flipped(self) -> Self {
        match self {
            Verdict::Win => Verdict::Loss,
            Verdict::Loss => Verdict::Win,
            Verdict::Draw => Verdict::Draw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Win => "win",
            Verdict::Loss => "loss",
            Verdict::Draw => "draw",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
