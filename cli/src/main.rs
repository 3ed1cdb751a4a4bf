//! teamcore command line
//!
//! Builds team cores, resolves single matchups and analyzes entities against
//! a metagame snapshot. Results go to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use teamcore_battle::{
    AnalysisConfig, CoreBuilder, CoreRequest, DamageOracle, DuelConfig, HorizonPolicy,
    MatchupAdapter, MatchupOutcome, RoleConstraint, analyze_entity,
};
use teamcore_client::{DirectoryOracle, ProcessOracle, load_metagame, write_report};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "teamcore")]
#[command(about = "Build metagame team cores from simulated matchups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grow seed entities into a core of the requested size
    Build {
        #[command(flatten)]
        oracle: OracleArgs,

        /// Metagame statistics JSON file
        #[arg(long)]
        metagame: PathBuf,

        /// Target core size
        #[arg(long)]
        size: usize,

        /// Fixed member, repeatable
        #[arg(long = "seed")]
        seeds: Vec<String>,

        /// Role constraint per open slot ("none" or e.g. "pivot,tank"), repeatable
        #[arg(long = "role")]
        roles: Vec<String>,

        #[command(flatten)]
        horizon: HorizonArgs,

        /// Minimum reciprocal teammate percentage for known cores
        #[arg(long, default_value_t = 15.0)]
        core_min_pct: f64,

        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Resolve one matchup
    Duel {
        #[command(flatten)]
        oracle: OracleArgs,

        /// Metagame statistics JSON file, used to check both names
        #[arg(long)]
        metagame: Option<PathBuf>,

        attacker: String,
        defender: String,
    },

    /// Profile one entity and its matchups against threats and known cores
    Analyze {
        #[command(flatten)]
        oracle: OracleArgs,

        /// Metagame statistics JSON file
        #[arg(long)]
        metagame: PathBuf,

        name: String,

        /// Number of most viable opponents to simulate
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Minimum reciprocal teammate percentage for known cores
        #[arg(long, default_value_t = 15.0)]
        core_min_pct: f64,
    },

    /// Summarize the metagame and list its common cores
    Meta {
        /// Metagame statistics JSON file
        #[arg(long)]
        metagame: PathBuf,

        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Minimum reciprocal teammate percentage for known cores
        #[arg(long, default_value_t = 15.0)]
        core_min_pct: f64,
    },
}

#[derive(Args)]
struct OracleArgs {
    /// Damage script run as `<node> <script> <attacker> <defender>`
    #[arg(long, required_unless_present = "oracle_dir", conflicts_with = "oracle_dir")]
    oracle_script: Option<PathBuf>,

    /// Interpreter for the damage script
    #[arg(long, default_value = "node")]
    node: PathBuf,

    /// Directory of recorded `<attacker>__<defender>.json` payloads
    #[arg(long)]
    oracle_dir: Option<PathBuf>,

    /// Round limit for a single duel
    #[arg(long, default_value_t = 8)]
    max_rounds: u32,
}

impl OracleArgs {
    fn oracle(&self) -> Result<Box<dyn DamageOracle>> {
        match (&self.oracle_script, &self.oracle_dir) {
            (Some(script), _) => Ok(Box::new(ProcessOracle::new(&self.node, script))),
            (None, Some(dir)) => {
                anyhow::ensure!(dir.is_dir(), "Oracle directory {} does not exist", dir.display());
                Ok(Box::new(DirectoryOracle::new(dir)))
            }
            (None, None) => anyhow::bail!("Either --oracle-script or --oracle-dir is required"),
        }
    }

    fn duel(&self) -> DuelConfig {
        DuelConfig {
            max_rounds: self.max_rounds,
        }
    }
}

#[derive(Args)]
struct HorizonArgs {
    /// Usage horizon of the first threat search
    #[arg(long, default_value_t = 20)]
    horizon_start: usize,

    /// Horizon growth when no counter is found
    #[arg(long, default_value_t = 20)]
    horizon_step: usize,

    /// Largest horizon searched before giving up on a slot
    #[arg(long, default_value_t = 100)]
    horizon_ceiling: usize,
}

impl HorizonArgs {
    fn policy(&self) -> HorizonPolicy {
        HorizonPolicy {
            start: self.horizon_start,
            step: self.horizon_step,
            ceiling: self.horizon_ceiling,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            oracle,
            metagame,
            size,
            seeds,
            roles,
            horizon,
            core_min_pct,
            out,
        } => {
            // Reject inconsistent input before touching any file or process
            let request = core_request(size, seeds, &roles)?;
            let config = AnalysisConfig {
                duel: oracle.duel(),
                horizon: horizon.policy(),
                core_min_pct,
            };

            let metagame = load_metagame(&metagame)?;
            let mut builder = CoreBuilder::new(&metagame, oracle.oracle()?, &config);
            let build = builder.build(&request)?;
            let report = builder.report(build);

            if !report.is_complete() {
                tracing::warn!(members = report.core.len(), target = size, "core is incomplete");
            }

            match out {
                Some(path) => {
                    write_report(&path, &report)?;
                    println!("{}", report.core.join(", "));
                }
                None => print_json(&report)?,
            }
        }

        Commands::Duel {
            oracle,
            metagame,
            attacker,
            defender,
        } => {
            if let Some(path) = metagame {
                let metagame = load_metagame(&path)?;
                metagame.get(&attacker)?;
                metagame.get(&defender)?;
            }

            let mut adapter = MatchupAdapter::new(oracle.oracle()?, oracle.duel());
            match adapter.matchup(&attacker, &defender) {
                MatchupOutcome::Resolved(summary) => print_json(&summary)?,
                MatchupOutcome::Failed { error, .. } => {
                    anyhow::bail!("Matchup {} vs {} failed: {}", attacker, defender, error)
                }
            }
        }

        Commands::Analyze {
            oracle,
            metagame,
            name,
            top,
            core_min_pct,
        } => {
            let metagame = load_metagame(&metagame)?;
            let mut adapter = MatchupAdapter::new(oracle.oracle()?, oracle.duel());
            let analysis = analyze_entity(&metagame, &name, top, core_min_pct, &mut adapter)?;
            print_json(&analysis)?;
        }

        Commands::Meta {
            metagame,
            top,
            core_min_pct,
        } => {
            let metagame = load_metagame(&metagame)?;
            let summary = metagame.summarize(top);
            let cores = metagame.common_cores(core_min_pct);
            print_json(&serde_json::json!({
                "summary": summary,
                "common_cores": cores,
            }))?;
        }
    }

    Ok(())
}

/// Validate the build arguments into a request
fn core_request(size: usize, seeds: Vec<String>, roles: &[String]) -> Result<CoreRequest> {
    let roles = roles
        .iter()
        .map(|spec| {
            RoleConstraint::parse(spec).with_context(|| format!("Invalid role constraint {:?}", spec))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CoreRequest::new(size, seeds, roles)?)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
