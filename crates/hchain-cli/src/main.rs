use anyhow::Result;
use clap::{Parser, Subcommand};
use hchain_cli::algorithm::HashAlgorithm;
use hchain_cli::commands::chain::{cmd_add, cmd_log, cmd_sum};
use hchain_cli::commands::compare::{cmd_compare, MatchMode};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Record and compare the digest history of a file.
#[derive(Parser, Debug)]
#[command(name = "hchain", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append the digest of a file to a chain, creating the chain if needed.
    Add {
        /// Path to the chain file.
        chain: PathBuf,
        /// File whose current contents form the new generation.
        input: PathBuf,
        /// Digest algorithm (defaults to the chain's own, or sha3-256 for a new chain).
        #[arg(long, value_enum)]
        algorithm: Option<HashAlgorithm>,
        /// Also copy the input here while hashing it.
        #[arg(long)]
        copy_to: Option<PathBuf>,
    },
    /// Display a chain in human-readable format.
    Log {
        /// Path to the chain file.
        chain: PathBuf,
    },
    /// Print the digest of the whole chain.
    Sum {
        /// Path to the chain file.
        chain: PathBuf,
    },
    /// Show where a remote chain diverges from a local one.
    Compare {
        /// Path to the local chain file.
        local: PathBuf,
        /// Path to the remote chain file.
        remote: PathBuf,
        /// Which comparison to run.
        #[arg(long, value_enum, default_value_t = MatchMode::Last)]
        mode: MatchMode,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Add {
            chain,
            input,
            algorithm,
            copy_to,
        } => cmd_add(chain, input, algorithm, copy_to),
        Commands::Log { chain } => cmd_log(chain),
        Commands::Sum { chain } => cmd_sum(chain),
        Commands::Compare {
            local,
            remote,
            mode,
        } => cmd_compare(local, remote, mode),
    }
}
