//! Configuration for the huffpack command line.
//!
//! Handles parsing command-line arguments into a resolved configuration.
//! Compression can run with no input file at all: a deterministic sample
//! is generated from a seed, so every invocation is reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Which operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// compress or decompress
    pub mode: Mode,

    /// Input file path (None = generate sample; compress only)
    pub input_file: Option<PathBuf>,

    /// Output file path
    pub output_file: PathBuf,

    /// Seed for sample generation
    pub seed: u64,

    /// Size of a generated sample in bytes
    pub sample_bytes: usize,

    /// Whether to print byte-count statistics
    pub print_stats: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// The first argument must be the subcommand. If no `--seed` is given,
    /// sample generation uses a time-based seed, which is printed so the
    /// run can be reproduced.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mode = match args.first().map(String::as_str) {
            Some("compress") => Mode::Compress,
            Some("decompress") => Mode::Decompress,
            Some("--help") | Some("-h") => {
                print_help();
                std::process::exit(0);
            }
            Some(other) => return Err(format!("unknown subcommand: {other}")),
            None => return Err("missing subcommand (compress or decompress)".to_string()),
        };

        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut print_stats = true;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-bytes requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--no-stats" => {
                    print_stats = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        if mode == Mode::Decompress && input_file.is_none() {
            return Err("decompress requires --in".to_string());
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        // Sample size defaults to a seeded random value in a range that
        // exercises multi-byte payloads without being slow.
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sample_bytes = sample_bytes.unwrap_or_else(|| rng.gen_range(16 * 1024..=256 * 1024));

        let output_file = output_file.unwrap_or_else(|| match mode {
            Mode::Compress => PathBuf::from("./out.huf"),
            Mode::Decompress => PathBuf::from("./out.bin"),
        });

        Ok(Config {
            mode,
            input_file,
            output_file,
            seed,
            sample_bytes,
            print_stats,
        })
    }
}

pub fn print_help() {
    println!("huffpack: Huffman file compressor/decompressor");
    println!();
    println!("USAGE:");
    println!("    huffpack compress [OPTIONS]");
    println!("    huffpack decompress --in <PATH> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>            Input file (compress default: generate sample)");
    println!("    --out <PATH>           Output file (default: ./out.huf / ./out.bin)");
    println!("    --seed <N>             Seed for sample generation");
    println!("    --sample-bytes <N>     Generated sample size (default: seeded 16K-256K)");
    println!("    --no-stats             Don't print byte-count statistics");
    println!("    --help, -h             Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpack compress --in file.txt --out file.huf");
    println!("    huffpack decompress --in file.huf --out file.txt");
    println!("    huffpack compress --seed 42        # compress a generated sample");
    println!();
}
