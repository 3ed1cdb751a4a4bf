//! Damage oracle replaying payloads recorded on disk

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use teamcore_battle::{DamageOracle, OracleError, RawRecord};
use teamcore_protocol::parse_oracle_payload;

/// Reads `<dir>/<attacker>__<defender>.json` for each pair.
///
/// A missing file means the pair has no usable sets.
#[derive(Debug, Clone)]
pub struct DirectoryOracle {
    dir: PathBuf,
}

impl DirectoryOracle {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the recording for one ordered pair of normalized names
    pub fn payload_path(&self, attacker: &str, defender: &str) -> PathBuf {
        self.dir.join(format!("{}__{}.json", attacker, defender))
    }
}

impl DamageOracle for DirectoryOracle {
    fn fetch(&self, attacker: &str, defender: &str) -> Result<Vec<RawRecord>, OracleError> {
        let path = self.payload_path(attacker, defender);

        let payload = match fs::read_to_string(&path) {
            Ok(payload) => payload,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no recorded payload");
                return Ok(Vec::new());
            }
            Err(e) => return Err(OracleError::Io(format!("{}: {}", path.display(), e))),
        };

        parse_oracle_payload(&payload)
            .map_err(|e| OracleError::Payload(format!("{}: {:#}", path.display(), e)))
    }
}
