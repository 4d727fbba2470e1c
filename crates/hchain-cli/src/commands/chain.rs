//! Chain recording and inspection commands.

use crate::algorithm::HashAlgorithm;
use crate::store::{parent_dir, ChainFile};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Handle the hchain add command.
pub fn cmd_add(
    chain_path: PathBuf,
    input: PathBuf,
    algorithm: Option<HashAlgorithm>,
    copy_to: Option<PathBuf>,
) -> Result<()> {
    let mut record = ChainFile::load_or_new(&chain_path, algorithm)?;
    let mut chain = record.chain()?;
    debug!(
        chain = %chain_path.display(),
        algorithm = %record.algorithm,
        generations = chain.len(),
        "loaded chain"
    );

    let reader = File::open(&input)
        .with_context(|| format!("failed to open {}", input.display()))?;

    let sum = match &copy_to {
        Some(dest) => {
            // Copy into a sibling file and rename it over `dest` once the
            // input is fully read; `dest` may be the input itself.
            let mut staged = NamedTempFile::new_in(parent_dir(dest))
                .with_context(|| format!("failed to create copy next to {}", dest.display()))?;
            let sum = record
                .algorithm
                .add_inline(&mut chain, BufWriter::new(&mut staged), reader)
                .with_context(|| {
                    format!("failed to copy {} to {}", input.display(), dest.display())
                })?;
            staged
                .persist(dest)
                .map_err(|err| err.error)
                .with_context(|| format!("failed to move copy into {}", dest.display()))?;
            sum
        }
        None => record
            .algorithm
            .add(&mut chain, reader)
            .with_context(|| format!("failed to digest {}", input.display()))?,
    };

    record.record(&chain);
    record.save(&chain_path)?;

    info!(
        chain = %chain_path.display(),
        input = %input.display(),
        generation = chain.len(),
        %sum,
        "recorded generation"
    );
    println!("{sum}");

    Ok(())
}

/// Handle the hchain log command.
pub fn cmd_log(chain_path: PathBuf) -> Result<()> {
    let record = ChainFile::load(&chain_path)?;
    let chain = record.chain()?;

    if chain.is_empty() {
        println!("{}", "Chain is empty".yellow());
        return Ok(());
    }

    println!("{}", "Hash Chain".bold().underline());
    println!("{}: {}", "File".bold(), chain_path.display());
    println!("{}: {}", "Algorithm".bold(), record.algorithm);
    println!("{}: {}", "Generations".bold(), chain.len());
    println!("{}: {}", "Updated".bold(), record.updated);
    println!("{}: {}", "Chain Sum".bold(), record.algorithm.sum(&chain));
    println!();

    for (idx, sum) in record.sums.iter().enumerate() {
        println!(
            "{} {}",
            "Generation".bold().cyan(),
            (idx + 1).to_string().cyan()
        );
        println!("  {}", sum);
    }

    Ok(())
}

/// Handle the hchain sum command.
pub fn cmd_sum(chain_path: PathBuf) -> Result<()> {
    let record = ChainFile::load(&chain_path)?;
    let chain = record.chain()?;

    println!("{}", record.algorithm.sum(&chain));

    Ok(())
}
