use std::path::{Path, PathBuf};

use aigkit::Aig;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

#[derive(Debug, Parser)]
#[command(name = "aigkit")]
#[command(about = "Inspect, simulate and sweep And-Inverter Graphs (.aag or .blif)")]
struct Cli {
    /// Refuse to build truth tables for circuits with more inputs than this.
    #[arg(long, default_value_t = 16)]
    max_inputs: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the circuit sizes, its depth and its largest fan-out.
    Stats { input: PathBuf },
    /// Print the output values for every input assignment.
    TruthTable { input: PathBuf },
    /// Write the circuit again, the format is chosen from the output extension.
    Write { input: PathBuf, output: PathBuf },
    /// Remove dead and duplicated and gates, then write the result.
    Sweep { input: PathBuf, output: PathBuf },
}

/// Reads a circuit and validates it right away.
fn load(path: &Path) -> anyhow::Result<Aig> {
    let aig = Aig::from_file(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    aig.check_integrity()
        .with_context(|| format!("{} is not a valid AIG", path.display()))?;
    info!(
        "loaded {}: {} inputs, {} outputs, {} and gates",
        path.display(),
        aig.num_inputs(),
        aig.num_outputs(),
        aig.num_ands()
    );
    Ok(aig)
}

fn save(aig: &Aig, path: &Path) -> anyhow::Result<()> {
    aig.to_file(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Stats { input } => {
            let aig = load(&input)?;
            println!("{}", aig.stats()?);
        }
        Command::TruthTable { input } => {
            let aig = load(&input)?;
            if aig.num_inputs() > cli.max_inputs {
                bail!(
                    "{} has {} inputs, truth tables are limited to {} (see --max-inputs)",
                    input.display(),
                    aig.num_inputs(),
                    cli.max_inputs
                );
            }
            print!("{}", aig.truth_table()?);
        }
        Command::Write { input, output } => {
            let aig = load(&input)?;
            save(&aig, &output)?;
        }
        Command::Sweep { input, output } => {
            let aig = load(&input)?;
            let swept = aig.sweep()?;
            println!("Before sweep:\n{}\n", aig.stats()?);
            println!("After sweep:\n{}", swept.stats()?);
            save(&swept, &output)?;
        }
    }

    Ok(())
}
