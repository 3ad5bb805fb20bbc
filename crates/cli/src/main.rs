#![deny(unsafe_code)]
//! CLI binary for the max-hits simulation.
//!
//! Subcommands:
//! - `run` (default): simulate and report the maximum hits over all batches
//! - `list`: print available policies and the default configuration

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use max_hits_core::{Policy, SimulationConfig};
use max_hits_driver::Simulation;
use serde_json::{Map, Value};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "max-hits",
    version,
    about = "Maximum 1/4-chance hits across many Monte Carlo batches"
)]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation (the default when no subcommand is given).
    Run(RunArgs),
    /// List available policies and the default configuration.
    List,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Seed for the `u` lane (decimal or 0x hex). `v` defaults to its complement.
    #[arg(long, value_parser = parse_u32)]
    seed: Option<u32>,

    /// Explicit seed for the `v` lane (decimal or 0x hex).
    #[arg(long, value_parser = parse_u32)]
    seed_v: Option<u32>,

    /// Trials per batch.
    #[arg(short, long)]
    attempts: Option<u32>,

    /// Number of batches.
    #[arg(short, long)]
    rounds: Option<u64>,

    /// Execution policy (sequential, parallel).
    #[arg(short, long)]
    policy: Option<String>,

    /// Worker threads for the parallel policy (clamped to the hardware).
    #[arg(short, long)]
    workers: Option<usize>,

    /// Configuration as a JSON object; the flags above take precedence.
    #[arg(long)]
    params: Option<String>,
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid 32-bit value '{s}': {e}"))
}

/// Merges `--params` with the explicit flags into one JSON object.
fn build_params(args: &RunArgs) -> Result<Value, CliError> {
    let mut params = match &args.params {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?,
        None => Value::Object(Map::new()),
    };

    // A non-object is passed through so the core reports the type mismatch.
    if let Value::Object(map) = &mut params {
        if let Some(u) = args.seed {
            map.insert("seed_u".into(), u.into());
            map.insert("seed_v".into(), args.seed_v.unwrap_or(!u).into());
        } else if let Some(v) = args.seed_v {
            map.insert("seed_v".into(), v.into());
        }
        if let Some(attempts) = args.attempts {
            map.insert("attempts".into(), attempts.into());
        }
        if let Some(rounds) = args.rounds {
            map.insert("rounds".into(), rounds.into());
        }
        if let Some(policy) = &args.policy {
            map.insert("policy".into(), policy.as_str().into());
        }
        if let Some(workers) = args.workers {
            map.insert("workers".into(), workers.into());
        }
    }
    Ok(params)
}

fn run_simulation(args: &RunArgs, json: bool) -> Result<(), CliError> {
    let config = SimulationConfig::from_json(&build_params(args)?)?;
    let simulation = Simulation::new(config)?;

    if !json {
        eprintln!("Starting calculation with {} rounds", config.rounds);
    }
    let report = simulation.run();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!("Found at max {} hits", report.max_hits);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Command::List) => {
            let policies = Policy::list_names();
            let defaults = SimulationConfig::default();
            if cli.json {
                let info = serde_json::json!({
                    "policies": policies,
                    "defaults": defaults,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let (u, v) = defaults.seed.state();
                println!("Policies:");
                println!("  {}", policies.join(", "));
                println!("Defaults:");
                println!("  seed      u={u:#010x} v={v:#010x}");
                println!("  attempts  {}", defaults.trials.attempts());
                println!("  rounds    {}", defaults.rounds);
                println!(
                    "  policy    {} (up to {} workers)",
                    defaults.policy.name(),
                    defaults.policy.requested_workers()
                );
            }
        }
        Some(Command::Run(args)) => run_simulation(&args, cli.json)?,
        None => run_simulation(&RunArgs::default(), cli.json)?,
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use max_hits_core::Mwc32;

    fn parse(args: &[&str]) -> RunArgs {
        let mut argv = vec!["max-hits", "run"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Command::Run(args)) => args,
            _ => panic!("expected the run subcommand"),
        }
    }

    fn config_for(args: &[&str]) -> Result<SimulationConfig, CliError> {
        Ok(SimulationConfig::from_json(&build_params(&parse(args))?)?)
    }

    #[test]
    fn parse_u32_accepts_hex_and_decimal() {
        assert_eq!(parse_u32("0xC0DE_15AF"), Ok(0xC0DE_15AF));
        assert_eq!(parse_u32("1_000"), Ok(1000));
        assert!(parse_u32("0x1_0000_0000").is_err());
        assert!(parse_u32("seed").is_err());
    }

    #[test]
    fn no_flags_give_the_default_config() {
        let config = config_for(&[]).map_err(|e| e.to_string()).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn seed_flag_complements_v() {
        let config = config_for(&["--seed", "0x12345678"]).map_err(|e| e.to_string()).unwrap();
        assert_eq!(config.seed, Mwc32::from_seed_word(0x1234_5678));
    }

    #[test]
    fn flags_override_params() {
        let config = config_for(&[
            "--params",
            r#"{"attempts": 10, "rounds": 5, "policy": "parallel"}"#,
            "--rounds",
            "7",
            "--policy",
            "sequential",
        ])
        .map_err(|e| e.to_string())
        .unwrap();
        assert_eq!(config.trials.attempts(), 10);
        assert_eq!(config.rounds, 7);
        assert_eq!(config.policy, Policy::Sequential);
    }

    #[test]
    fn bad_params_json_is_an_input_error() {
        let err = config_for(&["--params", "{nope"]).err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn non_object_params_is_an_input_error() {
        let err = config_for(&["--params", "[1]"]).err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let err = config_for(&["--policy", "gpu"]).err().unwrap();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn zero_seed_is_a_config_error() {
        let err = config_for(&["--seed", "0", "--seed-v", "0"]).err().unwrap();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn missing_subcommand_parses() {
        let cli = Cli::try_parse_from(["max-hits", "--json"]).unwrap();
        assert!(cli.json);
        assert!(cli.command.is_none());
    }
}
