//! Persisted build result

use std::collections::BTreeMap;

use crate::builder::{BuildStatus, CoreBuild};
use crate::diagnostics::TeamDiagnostics;
use crate::metagame::{Entity, Metagame};
use crate::threat::Threat;

/// Everything needed to reconstruct why each member was chosen
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreReport {
    pub core: Vec<String>,
    pub status: BuildStatus,
    pub log: Vec<String>,

    /// Threats still beating the final core, best first
    pub threats: Vec<Threat>,

    /// Attacker display name -> opponent display name -> verdict label
    pub verdicts: BTreeMap<String, BTreeMap<String, String>>,

    pub diagnostics: TeamDiagnostics,
}

impl CoreReport {
    pub fn new(
        metagame: &Metagame,
        build: CoreBuild,
        threats: Vec<Threat>,
        verdict_table: &BTreeMap<String, BTreeMap<String, &'static str>>,
    ) -> Self {
        let verdicts: BTreeMap<String, BTreeMap<String, String>> = verdict_table
            .iter()
            .map(|(attacker, row)| {
                let row: BTreeMap<String, String> = row
                    .iter()
                    .map(|(defender, label)| (metagame.display_name(defender).to_string(), label.to_string()))
                    .collect();
                (metagame.display_name(attacker).to_string(), row)
            })
            .collect();

        let members: Vec<&Entity> = build.core.iter().filter_map(|name| metagame.find(name)).collect();
        let diagnostics = TeamDiagnostics::for_members(&members);

        Self {
            core: build.core,
            status: build.status,
            log: build.log,
            threats,
            verdicts,
            diagnostics,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}
