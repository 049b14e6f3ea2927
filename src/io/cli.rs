//! Command-line interface for generating stimulus sequences from config files

use crate::io::config::load_config;
use crate::io::error::{Result, StreamError};
use crate::io::export::{OutputFormat, write_sequence};
use crate::io::progress::ShuffleProgress;
use crate::stream::generator::{GenerationPhase, StreamGenerator};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "streamgen")]
#[command(
    author,
    version,
    about = "Generate constraint-satisfying stimulus sequences"
)]
/// Command-line arguments for the sequence generation tool
pub struct Cli {
    /// JSON configuration file describing patterns and sizing
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Random seed overriding the configuration file
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for the generated sequence
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Permutation attempts per chunk overriding the configuration file
    #[arg(long)]
    pub attempts: Option<usize>,

    /// Suppress progress output and seed echo
    #[arg(short, long)]
    pub quiet: bool,
}

/// Orchestrates one generation run with progress tracking
pub struct GenerationRunner {
    cli: Cli,
}

impl GenerationRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the configuration, generate the sequence, and write it out
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or validation fails, a
    /// chunk exhausts its retry budget, or the output cannot be written.
    // Seed echo goes to stderr so piped stdout stays clean
    #[allow(clippy::print_stderr)]
    pub fn run(&self) -> Result<()> {
        let mut config = load_config(&self.cli.config)?;
        if let Some(seed) = self.cli.seed {
            config.seed = Some(seed);
        }
        if let Some(attempts) = self.cli.attempts {
            config.max_shuffle_attempts = attempts;
        }
        let unseeded = config.seed.is_none();

        let mut generator = StreamGenerator::new(config)?;

        if unseeded && !self.cli.quiet {
            eprintln!("seed: {}", generator.effective_seed());
        }

        let progress = (!self.cli.quiet).then(|| ShuffleProgress::new(generator.chunk_count()));

        let outcome = Self::drive(&mut generator, progress.as_ref());
        if let Some(ref bar) = progress {
            if outcome.is_ok() {
                bar.finish();
            } else {
                bar.abandon();
            }
        }
        outcome?;

        let sequence = generator.into_sequence()?;
        self.write_output(&sequence)
    }

    fn drive(
        generator: &mut StreamGenerator,
        progress: Option<&ShuffleProgress>,
    ) -> Result<()> {
        let mut previous = generator.phase();
        loop {
            let phase = generator.step()?;
            if matches!(previous, GenerationPhase::ShufflingChunk(_)) {
                if let Some(bar) = progress {
                    bar.chunk_accepted();
                }
            }
            if phase == GenerationPhase::Done {
                return Ok(());
            }
            previous = phase;
        }
    }

    fn write_output(&self, sequence: &crate::stream::assembly::Sequence) -> Result<()> {
        match &self.cli.output {
            Some(path) => {
                let file = File::create(path).map_err(|source| StreamError::FileSystem {
                    path: path.clone(),
                    operation: "create",
                    source,
                })?;
                let mut writer = BufWriter::new(file);
                write_sequence(sequence, self.cli.format, &mut writer)?;
                writer.flush().map_err(|source| StreamError::FileSystem {
                    path: path.clone(),
                    operation: "flush",
                    source,
                })
            }
            None => {
                let stdout = std::io::stdout();
                let mut writer = stdout.lock();
                write_sequence(sequence, self.cli.format, &mut writer)
            }
        }
    }
}
