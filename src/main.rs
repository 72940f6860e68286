//! CLI entry point for rewrite-rule grid synthesis

use clap::Parser;
use gridsynth::io::cli::{Cli, FileProcessor, init_tracing};

fn main() -> gridsynth::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.default_log_level());
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
