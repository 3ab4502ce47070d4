//! huffpack command line: compress or decompress one file per invocation.
//!
//! Exit codes: 0 on success, 2 on usage errors, 1 on operation failures.
//! Diagnostics go to stderr; statistics go to stdout.

mod config;
mod input_gen;

use std::fs;
use std::path::{Path, PathBuf};

use huffpack_core::stats::RunStats;
use huffpack_core::{compress, decompress, Result};

use config::{Config, Mode};
use input_gen::generate_sample_data;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run 'huffpack --help' for usage");
            std::process::exit(2);
        }
    };

    if let Err(error) = run(&config) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let input = match (&config.input_file, config.mode) {
        (Some(path), _) => fs::read(path)?,
        (None, Mode::Compress) => {
            // No input file: compress a generated sample, persisted next to
            // the output so the round trip stays verifiable.
            println!(
                "no input file; generating {} sample bytes (seed {})",
                config.sample_bytes, config.seed
            );
            let sample = generate_sample_data(config.seed, config.sample_bytes);
            let sample_path = config.output_file.with_extension("sample");
            write_atomic(&sample_path, &sample)?;
            println!("sample written to {}", sample_path.display());
            sample
        }
        (None, Mode::Decompress) => unreachable!("rejected during argument parsing"),
    };

    let output = match config.mode {
        Mode::Compress => compress(&input)?,
        Mode::Decompress => decompress(&input)?,
    };

    write_atomic(&config.output_file, &output)?;

    if config.print_stats {
        println!("{}", RunStats::new(input.len() as u64, output.len() as u64));
    }

    Ok(())
}

/// Write via a temporary sibling path and rename, so a failure never leaves
/// a half-written file at the destination.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp: PathBuf = path.to_path_buf();
    let mut name = tmp
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    tmp.set_file_name(name);

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}
