//! Matchup summaries between entities, backed by a memoized damage oracle

mod adapter;
mod cache;
mod oracle;

pub use adapter::{MatchupAdapter, MatchupOutcome, MatchupSummary};
pub use cache::{MatchupKey, MemoCache};
pub use oracle::{DamageOracle, OracleError};
