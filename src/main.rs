//! jsdseg CLI - Jensen-Shannon Sequence Segmentation
//!
//! Command-line interface for entropy, divergence and recursive segmentation
//! of symbolic sequences.

use clap::{Args, Parser, Subcommand};
use jsdseg::{
    divergence_at, entropy_of, Alphabet, CalibrationParameters, Config, JsdSegError,
    RecursiveSplitter, Result, SplitResult,
};
use log::{error, info};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "jsdseg")]
#[command(author = "jsdseg Contributors")]
#[command(version)]
#[command(about = "Recursive Jensen-Shannon segmentation of symbolic sequences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file (alphabet, calibration, max_depth)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Where the sequence comes from.
#[derive(Args)]
struct InputArgs {
    /// Alphabet symbols in order, e.g. "ACGT" (overrides the config file)
    #[arg(short, long)]
    alphabet: Option<String>,

    /// Sequence given directly on the command line
    #[arg(short, long, conflicts_with = "input")]
    sequence: Option<String>,

    /// Input file; lines are joined into one sequence (use "-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Shannon entropy (bits) of the sequence's symbol distribution
    Entropy {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Jensen-Shannon divergence of the cut at a position
    Divergence {
        #[command(flatten)]
        input: InputArgs,

        /// Cut position (number of symbols in the prefix)
        #[arg(short, long)]
        position: usize,
    },

    /// Split the sequence into homogeneous segments
    Split {
        #[command(flatten)]
        input: InputArgs,

        /// Write segments to this file, one per line
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Calibration: scale factor beta
        #[arg(long)]
        beta: Option<f64>,

        /// Calibration: slope a of the effective sample size
        #[arg(long)]
        neff_slope: Option<f64>,

        /// Calibration: intercept b of the effective sample size
        #[arg(long)]
        neff_intercept: Option<f64>,

        /// Significance threshold a cut must exceed (default: 0.95)
        #[arg(short = 't', long)]
        threshold: Option<f64>,

        /// Segments shorter than this are never split (default: 2)
        #[arg(short, long)]
        min_length: Option<usize>,

        /// Maximum depth of the segmentation tree
        #[arg(long)]
        max_depth: Option<usize>,

        /// Treat every non-empty input line as an independent sequence
        #[arg(short, long)]
        batch: bool,

        /// Print the full segmentation result as JSON
        #[arg(short, long)]
        details: bool,
    },
}

/// Calibration overrides from the command line.
struct CalibrationOverrides {
    beta: Option<f64>,
    neff_slope: Option<f64>,
    neff_intercept: Option<f64>,
    threshold: Option<f64>,
    min_length: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = load_config(cli.config).and_then(|config| match cli.command {
        Commands::Entropy { input } => compute_entropy(&config, input),

        Commands::Divergence { input, position } => compute_divergence(&config, input, position),

        Commands::Split {
            input,
            output,
            beta,
            neff_slope,
            neff_intercept,
            threshold,
            min_length,
            max_depth,
            batch,
            details,
        } => split_sequence(
            &config,
            input,
            output,
            CalibrationOverrides {
                beta,
                neff_slope,
                neff_intercept,
                threshold,
                min_length,
            },
            max_depth,
            batch,
            details,
        ),
    });

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::from_file(path)
        }
        None => Ok(Config::default()),
    }
}

fn resolve_alphabet(config: &Config, input: &InputArgs) -> Result<Alphabet> {
    match &input.alphabet {
        Some(symbols) => symbols.parse(),
        None => config.alphabet(),
    }
}

fn read_raw_input(input: &InputArgs) -> Result<String> {
    if let Some(sequence) = &input.sequence {
        return Ok(sequence.clone());
    }

    match &input.input {
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Err(JsdSegError::Config(
            "no sequence given (use --sequence or --input)".to_string(),
        )),
    }
}

/// Reads one sequence; file lines are concatenated.
fn read_sequence(input: &InputArgs) -> Result<String> {
    let raw = read_raw_input(input)?;
    if input.sequence.is_some() {
        return Ok(raw);
    }
    Ok(raw.lines().map(str::trim_end).collect())
}

/// Reads one sequence per non-empty line.
fn read_batch(input: &InputArgs) -> Result<Vec<String>> {
    let raw = read_raw_input(input)?;
    Ok(raw
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn compute_entropy(config: &Config, input: InputArgs) -> Result<()> {
    let alphabet = resolve_alphabet(config, &input)?;
    let sequence = read_sequence(&input)?;
    let entropy = entropy_of(&alphabet, &sequence)?;
    println!("The entropy of the sequence: {}", entropy);
    Ok(())
}

fn compute_divergence(config: &Config, input: InputArgs, position: usize) -> Result<()> {
    let alphabet = resolve_alphabet(config, &input)?;
    let sequence = read_sequence(&input)?;
    let divergence = divergence_at(&alphabet, &sequence, position)?;
    println!("The Jensen-Shannon divergence of the subsequences: {}", divergence);
    Ok(())
}

fn resolve_calibration(
    config: &Config,
    alphabet_size: usize,
    overrides: &CalibrationOverrides,
) -> Result<CalibrationParameters> {
    let mut params = match (overrides.beta, overrides.neff_slope, overrides.neff_intercept) {
        (Some(beta), Some(a), Some(b)) => CalibrationParameters::new(beta, a, b),
        (beta, a, b) => {
            let mut base = config.calibration_for(alphabet_size)?;
            if let Some(beta) = beta {
                base.beta = beta;
            }
            if let Some(a) = a {
                base.a = a;
            }
            if let Some(b) = b {
                base.b = b;
            }
            base
        }
    };

    if let Some(threshold) = overrides.threshold {
        params.significance_threshold = threshold;
    }
    if let Some(min_length) = overrides.min_length {
        params.min_segment_length = min_length;
    }

    params.validate()?;
    Ok(params)
}

#[allow(clippy::too_many_arguments)]
fn split_sequence(
    config: &Config,
    input: InputArgs,
    output: Option<PathBuf>,
    overrides: CalibrationOverrides,
    max_depth: Option<usize>,
    batch: bool,
    details: bool,
) -> Result<()> {
    let start_time = Instant::now();
    let alphabet = resolve_alphabet(config, &input)?;
    let params = resolve_calibration(config, alphabet.len(), &overrides)?;
    let splitter = RecursiveSplitter::new(alphabet, params)?
        .with_max_depth(max_depth.or(config.max_depth));

    info!(
        "Calibration: beta={} a={} b={} threshold={} min_length={}",
        params.beta, params.a, params.b, params.significance_threshold, params.min_segment_length
    );

    let results: Vec<SplitResult> = if batch {
        let sequences = read_batch(&input)?;
        let outcomes = splitter.split_batch(&sequences);

        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = 0;
        for (line, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("Sequence {}: {}", line + 1, e);
                    failures += 1;
                }
            }
        }
        if failures > 0 {
            return Err(JsdSegError::Config(format!(
                "{} of {} sequences failed",
                failures,
                sequences.len()
            )));
        }
        results
    } else {
        vec![splitter.segment(&read_sequence(&input)?)?]
    };

    if details {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_segments(&results);
    }

    if let Some(path) = output {
        save_segments(&path, &results)?;
        info!("Saved segments to {}", path.display());
    }

    info!("Done in {:?}", start_time.elapsed());
    Ok(())
}

fn print_segments(results: &[SplitResult]) {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!(); // Blank line between sequences
        }
        if result.is_split() {
            println!("The split subsequences:");
            for text in result.texts() {
                println!("{}", text);
            }
        } else {
            println!("The sequence cannot be split because of the significance threshold.");
        }
    }
}

/// Writes one segment per line, with a blank line between sequences.
fn save_segments(path: &Path, results: &[SplitResult]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        for text in result.texts() {
            writeln!(writer, "{}", text)?;
        }
    }
    writer.flush()?;
    Ok(())
}
