//! CLI entry point for constrained stimulus-sequence generation

use clap::Parser;
use streamgen::io::cli::{Cli, GenerationRunner};

fn main() -> streamgen::Result<()> {
    let cli = Cli::parse();
    GenerationRunner::new(cli).run()
}
