//! Matchup simulation and team core construction for competitive metagames.
//!
//! This crate holds the domain types and the engine; it performs no I/O of
//! its own. Damage numbers come from a [`DamageOracle`] supplied by the
//! caller and usage statistics from a [`Metagame`] snapshot.
//!
//! # Overview
//!
//! ```text
//! teamcore-protocol (wire formats)
//!        │
//!        ▼
//! teamcore-battle (duels, matchups, threats, cores) ← THIS CRATE
//!        │
//!        ├─> teamcore-client (oracle processes, file loading)
//!        └─> teamcore-cli (command surface)
//! ```
//!
//! # Main Types
//!
//! - [`DuelResolver`] - Resolves one set-vs-set duel into a [`Verdict`]
//! - [`MatchupAdapter`] - Memoized per-pair [`MatchupSummary`] on top of a [`DamageOracle`]
//! - [`ThreatScorer`] - Entities beating a partial core, ranked
//! - [`CoreBuilder`] - Greedy, horizon-widening core construction
//! - [`CoreReport`] - Persistable build result with the verdict table
//!
//! # Example Usage
//!
//! ```ignore
//! use teamcore_battle::{AnalysisConfig, CoreBuilder, CoreRequest, RoleConstraint};
//!
//! let request = CoreRequest::new(
//!     3,
//!     vec!["Great Tusk".to_string()],
//!     vec![RoleConstraint::any(), RoleConstraint::parse("setup_sweeper")?],
//! )?;
//!
//! let mut builder = CoreBuilder::new(&metagame, oracle, &AnalysisConfig::default());
//! let build = builder.build(&request)?;
//! println!("{}", build.core.join(", "));
//! ```

pub mod analysis;
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod duel;
pub mod matchup;
pub mod metagame;
pub mod report;
pub mod threat;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types at crate root for convenience
pub use analysis::{CoreMatchup, CoreVerdict, EntityAnalysis, EntityProfile, OpponentMatchup, analyze_entity};
pub use builder::{BuildError, BuildStatus, CoreBuild, CoreBuilder, CoreRequest, PartialReason};
pub use config::AnalysisConfig;
pub use diagnostics::TeamDiagnostics;
pub use duel::{DuelConfig, DuelOutcome, DuelResolver};
pub use matchup::{
    DamageOracle, MatchupAdapter, MatchupKey, MatchupOutcome, MatchupSummary, MemoCache, OracleError,
};
pub use metagame::{Entity, Metagame, MetagameError, MetagameSummary};
pub use report::CoreReport;
pub use threat::{HorizonPolicy, Threat, ThreatScorer};
pub use types::{RoleConstraint, RoleParseError, RoleTag, Type, Verdict, normalize_name, same_entity};

// Re-export commonly used protocol types
pub use teamcore_protocol::{MetagameEntry, RawRecord};
