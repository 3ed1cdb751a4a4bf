//! Damage oracle backed by an external script run once per ordered pair

use std::path::{Path, PathBuf};
use std::process::Command;

use teamcore_battle::{DamageOracle, OracleError, RawRecord};
use teamcore_protocol::parse_oracle_payload;

/// Runs `<program> <script> <attacker> <defender>` and reads a JSON array
/// of records from stdout
#[derive(Debug, Clone)]
pub struct ProcessOracle {
    program: PathBuf,
    script: PathBuf,
}

impl ProcessOracle {
    pub fn new(program: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
        }
    }

    /// `node <script>`
    pub fn node(script: impl Into<PathBuf>) -> Self {
        Self::new("node", script)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn script(&self) -> &Path {
        &self.script
    }
}

impl DamageOracle for ProcessOracle {
    fn fetch(&self, attacker: &str, defender: &str) -> Result<Vec<RawRecord>, OracleError> {
        tracing::debug!(
            program = %self.program.display(),
            script = %self.script.display(),
            attacker,
            defender,
            "running damage oracle"
        );

        let output = Command::new(&self.program)
            .arg(&self.script)
            .arg(attacker)
            .arg(defender)
            .output()
            .map_err(|e| OracleError::Spawn(format!("{}: {}", self.program.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(attacker, defender, status = %output.status, %stderr, "damage oracle failed");
            return Err(OracleError::Process {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_oracle_payload(&stdout).map_err(|e| OracleError::Payload(format!("{:#}", e)))
    }
}
