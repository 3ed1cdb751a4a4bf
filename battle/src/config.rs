//! Run configuration

use crate::duel::DuelConfig;
use crate::threat::HorizonPolicy;

/// Everything one analysis run can be tuned with
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    pub duel: DuelConfig,
    pub horizon: HorizonPolicy,

    /// Minimum reciprocal teammate percentage for a known core
    pub core_min_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            duel: DuelConfig::default(),
            horizon: HorizonPolicy::default(),
            core_min_pct: 15.0,
        }
    }
}
