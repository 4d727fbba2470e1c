//! Comparing two chain files.

use crate::store::ChainFile;
use anyhow::{bail, Result};
use clap::ValueEnum;
use colored::Colorize;
use hchain::{Chain, ChainError};
use std::path::PathBuf;
use tracing::{debug, info};

/// Which comparison to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// Remote history from the first generation the local chain also recorded.
    First,
    /// Remote history after the last generation both chains share.
    #[default]
    Last,
}

/// Handle the hchain compare command.
///
/// Prints the selected part of the remote chain, one sum per line.
pub fn cmd_compare(local_path: PathBuf, remote_path: PathBuf, mode: MatchMode) -> Result<()> {
    let local_file = ChainFile::load(&local_path)?;
    let remote_file = ChainFile::load(&remote_path)?;

    if local_file.algorithm != remote_file.algorithm {
        bail!(
            "algorithm mismatch: {} uses {}, {} uses {}",
            local_path.display(),
            local_file.algorithm,
            remote_path.display(),
            remote_file.algorithm
        );
    }

    let local = local_file.chain()?;
    let remote = remote_file.chain()?;

    // Equal chain sums imply equal histories. Empty chains never match.
    let identical =
        !local.is_empty() && local_file.algorithm.sum(&local) == remote_file.algorithm.sum(&remote);
    debug!(
        local = local.len(),
        remote = remote.len(),
        identical,
        "comparing chains"
    );

    let result = match (mode, identical) {
        (MatchMode::First, true) => Ok(remote.clone()),
        (MatchMode::Last, true) => Ok(Chain::new()),
        (MatchMode::First, false) => local.first_match(&remote),
        (MatchMode::Last, false) => local.last_match(&remote),
    };

    let tail = match result {
        Ok(tail) => tail,
        Err(ChainError::NoMatch) => bail!("chains do not match"),
        Err(err) => return Err(err.into()),
    };

    info!(?mode, generations = tail.len(), "comparison finished");

    if tail.is_empty() {
        eprintln!("{}", "chains fully overlap".green());
        return Ok(());
    }

    for sum in tail.all_sums() {
        println!("{sum}");
    }

    Ok(())
}
