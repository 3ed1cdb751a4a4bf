//! Damage oracle interface

use teamcore_protocol::RawRecord;
use thiserror::Error;

/// Why a damage computation produced no usable payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Failed to start damage oracle: {0}")]
    Spawn(String),

    #[error("Damage oracle exited with {status}: {stderr}")]
    Process { status: String, stderr: String },

    #[error("Unparsable damage oracle payload: {0}")]
    Payload(String),

    #[error("Damage oracle I/O error: {0}")]
    Io(String),
}

/// External computation of per-move damage ranges between two entities.
///
/// Called with normalized names, in either direction. Zero records is a
/// valid answer meaning no usable sets.
pub trait DamageOracle {
    fn fetch(&self, attacker: &str, defender: &str) -> Result<Vec<RawRecord>, OracleError>;
}

impl<T: DamageOracle + ?Sized> DamageOracle for &T {
    fn fetch(&self, attacker: &str, defender: &str) -> Result<Vec<RawRecord>, OracleError> {
        (**self).fetch(attacker, defender)
    }
}

impl<T: DamageOracle + ?Sized> DamageOracle for Box<T> {
    fn fetch(&self, attacker: &str, defender: &str) -> Result<Vec<RawRecord>, OracleError> {
        (**self).fetch(attacker, defender)
    }
}
