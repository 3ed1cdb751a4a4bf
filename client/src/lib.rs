//! Concrete collaborators for the core builder: damage oracles that run an
//! external script or replay recorded payloads, metagame loading and report
//! output.

mod directory;
mod output;
mod process;
mod store;

pub use directory::DirectoryOracle;
pub use output::{read_report, write_report};
pub use process::ProcessOracle;
pub use store::load_metagame;
