//! Command-line interface for batch synthesis of JSON configurations

use crate::algorithm::{Synthesizer, Transformation};
use crate::io::configuration::{DEFAULT_CELL_SIZE, DOCUMENT_EXTENSION, OUTPUT_SUFFIX};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::preset::demo_synthesizer;
use crate::io::progress::ProgressManager;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridsynth")]
#[command(
    author,
    version,
    about = "Synthesize symbol grids from rewrite-rule pipelines"
)]
/// Command-line arguments for the synthesis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input JSON configuration or directory of configurations
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible synthesis (fresh entropy when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Also export each result as a PNG image
    #[arg(short, long)]
    pub png: bool,

    /// Pixel size of one cell in exported images
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the demo configuration to TARGET instead of synthesizing
    #[arg(long)]
    pub init: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log filter used when `RUST_LOG` is not set
    pub const fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Read and parse a synthesizer document from disk
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, or a format error if its
/// contents are not a valid document
pub fn load_document(path: &Path) -> Result<Synthesizer> {
    let text =
        std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read", e))?;
    Synthesizer::from_json(&text)
}

/// Serialize a synthesizer and write it to disk
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn save_document(synthesizer: &Synthesizer, path: &Path) -> Result<()> {
    let text = synthesizer.to_json()?;
    std::fs::write(path, text).map_err(|e| file_system_error(path, "write", e))
}

/// Orchestrates batch synthesis of JSON files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, loading, synthesis or export fails
    pub fn process(&mut self) -> Result<()> {
        if self.cli.init {
            return self.write_preset();
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn write_preset(&self) -> Result<()> {
        if self.cli.target.exists() && self.cli.skip_existing() {
            return Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"already exists (pass --no-skip to overwrite)",
            ));
        }
        save_document(&demo_synthesizer()?, &self.cli.target)?;
        info!(path = %self.cli.target.display(), "wrote demo configuration");
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_document(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file must be a JSON configuration",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries =
                std::fs::read_dir(target).map_err(|e| file_system_error(target, "list", e))?;
            for entry in entries {
                let path = entry
                    .map_err(|e| file_system_error(target, "list", e))?
                    .path();
                if is_document(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a JSON file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, DOCUMENT_EXTENSION);
        if output_path.exists() {
            info!(path = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let mut synthesizer = load_document(input_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, synthesizer.enabled_count());
        }

        let progress = &mut self.progress_manager;
        let on_stage = |stage: usize, _: &Transformation| {
            debug!(file = index, stage, "stage complete");
            if let Some(pm) = progress.as_mut() {
                pm.advance_stage(index);
            }
        };

        match self.cli.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                synthesizer.synthesize_with(&mut rng, on_stage)?;
            }
            None => {
                let mut rng = rand::rng();
                synthesizer.synthesize_with(&mut rng, on_stage)?;
            }
        }

        let output_path = Self::get_output_path(input_path, DOCUMENT_EXTENSION);
        save_document(&synthesizer, &output_path)?;

        if self.cli.png {
            let image_path = Self::get_output_path(input_path, "png");
            export_grid_as_png(synthesizer.grid(), self.cli.cell_size, &image_path)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "synthesized"
        );
        Ok(())
    }

    /// Output path for `input_path` with the result suffix and `extension`
    pub fn get_output_path(input_path: &Path, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_document(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(DOCUMENT_EXTENSION)
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
