//! iwi2dds CLI - Command-line tool for converting IWI textures to DDS.
//!
//! This is the main entry point for the iwi2dds command-line application.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use iwi2dds::prelude::*;

/// iwi2dds - IWI to DDS texture converter
#[derive(Parser)]
#[command(name = "iwi2dds")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single IWI file to DDS
    Convert {
        /// Input IWI file
        #[arg(short, long)]
        input: PathBuf,

        /// Output DDS file (defaults to the input path with a .dds extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },

    /// Convert every matching IWI file below a directory
    Batch {
        /// Input directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// File name pattern (glob-style, case-insensitive)
        #[arg(long, default_value = "*.iwi")]
        filter: String,

        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },

    /// Show the header of an IWI file
    Info {
        /// Input IWI file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert { input, output, force } => {
            let output = output.unwrap_or_else(|| input.with_extension("dds"));
            cmd_convert(&input, &output, force)?;
        }
        Commands::Batch {
            input,
            output,
            filter,
            force,
        } => {
            cmd_batch(&input, &output, &filter, force)?;
        }
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

/// Install the log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,iwi2dds={level},iwi2dds_iwi={level},iwi2dds_dds={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_convert(input: &Path, output: &Path, force: bool) -> Result<()> {
    println!("Converting: {} -> {}", input.display(), output.display());

    let conversion = match convert_file(input, output, force) {
        Ok(conversion) => conversion,
        Err(err) if err.kind() == ErrorKind::OutputExists => {
            bail!("{} already exists (use --force to overwrite)", output.display());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to convert {}", input.display()));
        }
    };

    println!(
        "Wrote {} {}x{} ({}, {} bytes)",
        conversion.info.format,
        conversion.info.width,
        conversion.info.height,
        conversion.layout,
        conversion.output_len()
    );

    Ok(())
}

/// Outcome of one file in a batch run.
enum BatchOutcome {
    Converted,
    Skipped,
}

fn cmd_batch(input: &Path, output: &Path, filter: &str, force: bool) -> Result<()> {
    let pattern = glob::Pattern::new(filter)
        .with_context(|| format!("Invalid filter pattern: {filter}"))?;
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };

    println!("Scanning: {}", input.display());

    let jobs: Vec<(PathBuf, PathBuf)> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| pattern.matches_with(&entry.file_name().to_string_lossy(), options))
        .map(|entry| {
            let relative = entry.path().strip_prefix(input).unwrap_or(entry.path());
            let target = output.join(relative).with_extension("dds");
            (entry.into_path(), target)
        })
        .collect();

    if jobs.is_empty() {
        println!("No files matching '{filter}'");
        return Ok(());
    }

    let total = jobs.len();
    let (jobs, collisions) = split_collisions(jobs);

    println!("Converting {} files...", jobs.len());

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut results: Vec<(PathBuf, Result<BatchOutcome>)> = jobs
        .into_par_iter()
        .map(|(source, target)| {
            let result = convert_one(&source, &target, force);
            pb.inc(1);
            (source, result)
        })
        .collect();
    pb.finish_with_message("Done");

    results.extend(collisions.into_iter().map(|(source, target)| {
        let err = anyhow::anyhow!(
            "{} would also be written from another input",
            target.display()
        );
        (source, Err(err))
    }));

    let mut converted = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for (source, result) in &results {
        match result {
            Ok(BatchOutcome::Converted) => converted += 1,
            Ok(BatchOutcome::Skipped) => skipped += 1,
            Err(err) => {
                eprintln!("Error converting {}: {err:#}", source.display());
                failed += 1;
            }
        }
    }

    println!(
        "Converted {} files in {:?} ({} skipped, {} errors)",
        converted,
        start.elapsed(),
        skipped,
        failed
    );

    if failed > 0 {
        bail!("{failed} of {total} files failed to convert");
    }

    Ok(())
}

/// Separate jobs whose output path is shared with another job.
///
/// Case-insensitive matching lets `a.iwi` and `a.IWI` both map to `a.dds`;
/// neither of them is converted.
fn split_collisions(jobs: Vec<(PathBuf, PathBuf)>) -> (Vec<(PathBuf, PathBuf)>, Vec<(PathBuf, PathBuf)>) {
    let mut counts: HashMap<PathBuf, usize> = HashMap::new();
    for (_, target) in &jobs {
        *counts.entry(target.clone()).or_default() += 1;
    }

    jobs.into_iter()
        .partition(|(_, target)| counts.get(target).copied() == Some(1))
}

fn convert_one(source: &Path, target: &Path, force: bool) -> Result<BatchOutcome> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    match convert_file(source, target, force) {
        Ok(_) => Ok(BatchOutcome::Converted),
        Err(err) if err.kind() == ErrorKind::OutputExists => {
            debug!(output = %target.display(), "output exists, skipping");
            Ok(BatchOutcome::Skipped)
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_info(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let iwi = IwiFile::parse(&data).context("Failed to parse IWI header")?;
    let info = iwi.info();

    println!("File:      {} ({} bytes)", input.display(), iwi.len());
    println!("Magic:     {}", String::from_utf8_lossy(&iwi.magic()));
    println!("Version:   {}", iwi.version());
    println!("Format:    {} ({:#04x})", info.format, info.format.code());
    println!("Flags:     {}", info.flags);
    println!("Size:      {}x{}", info.width, info.height);
    println!("Mips:      {:?}", iwi.mips().offsets);
    println!("Layout:    {}", iwi.layout());

    match iwi.payload() {
        Ok(payload) => println!("Payload:   {} bytes", payload.len()),
        Err(err) => println!("Payload:   unreadable ({err})"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(source: &str, target: &str) -> (PathBuf, PathBuf) {
        (PathBuf::from(source), PathBuf::from(target))
    }

    #[test]
    fn test_split_collisions() {
        let jobs = vec![
            job("in/a.iwi", "out/a.dds"),
            job("in/b.iwi", "out/b.dds"),
            job("in/a.IWI", "out/a.dds"),
            job("in/sub/a.iwi", "out/sub/a.dds"),
        ];

        let (unique, collisions) = split_collisions(jobs);

        assert_eq!(
            unique,
            vec![job("in/b.iwi", "out/b.dds"), job("in/sub/a.iwi", "out/sub/a.dds")]
        );
        assert_eq!(
            collisions,
            vec![job("in/a.iwi", "out/a.dds"), job("in/a.IWI", "out/a.dds")]
        );
    }

    #[test]
    fn test_split_collisions_without_duplicates() {
        let jobs = vec![job("x.iwi", "x.dds"), job("y.iwi", "y.dds")];

        let (unique, collisions) = split_collisions(jobs.clone());

        assert_eq!(unique, jobs);
        assert!(collisions.is_empty());
    }
}
