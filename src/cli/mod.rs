//! # CLI Module
//!
//! Command-line interface for the photo statistics collector.
//!
//! ## Usage
//! ```bash
//! # Scan the photo directory from the settings file
//! photostat scan
//!
//! # Scan a directory, RAW and JPEG/TIFF/PNG files
//! photostat scan ~/Photos --raw --images
//!
//! # Only some extensions, and save the tables
//! photostat scan ~/Photos --ext nef --ext dng --save --output stats.txt
//!
//! # Settings
//! photostat config show
//! photostat config init
//! ```

use clap::{Parser, Subcommand};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_stat::config::{default_settings_path, Settings};
use photo_stat::core::pipeline::{CancellationToken, Pipeline, PipelineResult};
use photo_stat::core::scanner::{Progress, ScanStage, ScanStatus};
use photo_stat::core::table::save_to_file;
use photo_stat::error::{ConfigError, Result};
use photo_stat::events::{Event, EventChannel, PipelineEvent, ScanEvent};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Positions of the processing bar, fractions are scaled to this
const BAR_LENGTH: u64 = 1000;

/// PhotoStat - What focal lengths, apertures and ISO speeds do you shoot?
#[derive(Parser, Debug)]
#[command(name = "photostat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory and print photo statistics
    Scan {
        /// Directory to scan (default: photo_root_dir from the settings)
        path: Option<PathBuf>,

        /// Scan RAW files
        #[arg(long)]
        raw: bool,

        /// Scan JPEG, TIFF and PNG files
        #[arg(long)]
        images: bool,

        /// Scan only these extensions (repeatable)
        #[arg(long = "ext", value_name = "EXT")]
        extensions: Vec<String>,

        /// Save the tables to a text file
        #[arg(short, long)]
        save: bool,

        /// Where to save (implies --save; default: stat_save_file from the settings)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// No progress or summary, tables only
        #[arg(short, long)]
        quiet: bool,
    },
    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ConfigAction {
    /// Print the effective settings as JSON
    Show,
    /// Print where the settings file lives
    Path,
    /// Write a settings file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options of the scan command
#[derive(Debug)]
struct ScanOptions {
    path: Option<PathBuf>,
    raw: bool,
    images: bool,
    extensions: Vec<String>,
    save: bool,
    output: Option<PathBuf>,
    quiet: bool,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    photo_stat::init_tracing(cli.verbose);

    let settings_path = match cli.config {
        Some(path) => path,
        None => default_settings_path()?,
    };

    match cli.command {
        Commands::Scan {
            path,
            raw,
            images,
            extensions,
            save,
            output,
            quiet,
        } => run_scan(
            &settings_path,
            ScanOptions {
                path,
                raw,
                images,
                extensions,
                save,
                output,
                quiet,
            },
        ),
        Commands::Config { action } => run_config(&settings_path, action),
    }
}

fn run_scan(settings_path: &Path, options: ScanOptions) -> Result<()> {
    let term = Term::stderr();
    let mut settings = Settings::load(settings_path)?;

    if let Some(path) = options.path {
        settings.photo_root_dir = path;
    }
    if options.raw || options.images {
        settings.scan_raw_files = options.raw;
        settings.scan_image_files = options.images;
    }

    let file_types: Vec<String> = if options.extensions.is_empty() {
        settings.validate()?;
        settings.file_types().into_iter().collect()
    } else {
        settings.validate_root()?;
        options.extensions
    };

    // Print header
    if !options.quiet {
        term.write_line(&format!(
            "{} {}",
            style("PhotoStat").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line(&format!(
            "  {} {}",
            style("Scanning").dim(),
            settings.photo_root_dir.display()
        ))
        .ok();
        term.write_line("").ok();
    }

    let pipeline = Pipeline::builder()
        .root(&settings.photo_root_dir)
        .extensions(&file_types)
        .build();

    // Progress is drawn from events on a listener thread
    let result = if options.quiet {
        pipeline.run()
    } else {
        let (sender, receiver) = EventChannel::new();
        let pb = ProgressBar::new_spinner();
        let pb_clone = pb.clone();

        let event_thread = thread::spawn(move || {
            for event in receiver.iter() {
                show_event(&pb_clone, event);
            }
        });

        let result = pipeline.run_with_events(&sender, &CancellationToken::new());

        // Drop sender to signal event thread to finish
        drop(sender);
        event_thread.join().ok();
        pb.finish_and_clear();
        result
    };

    let PipelineResult {
        stats,
        status,
        duration_ms,
    } = result;

    match status {
        ScanStatus::Failed(e) => return Err(e.into()),
        ScanStatus::Cancelled => {
            term.write_line(&format!("{} Scan cancelled", style("✗").yellow().bold()))
                .ok();
            return Ok(());
        }
        ScanStatus::Finished => {}
    }

    println!("{}", stats.format_all_tables());

    if !options.quiet {
        term.write_line("").ok();
        term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
            .ok();
        term.write_line(&format!(
            "  {} photos with metadata out of {} files in {:.1}s",
            style(stats.total_photos()).cyan(),
            style(stats.total_files()).cyan(),
            duration_ms as f64 / 1000.0
        ))
        .ok();
    }

    if options.save || options.output.is_some() {
        let target = options.output.unwrap_or(settings.stat_save_file);
        save_to_file(&stats, &target)?;
        if !options.quiet {
            term.write_line(&format!(
                "  {} {}",
                style("Saved to").dim(),
                target.display()
            ))
            .ok();
        }
    }

    Ok(())
}

fn show_event(pb: &ProgressBar, event: Event) {
    match event {
        Event::Scan(ScanEvent::StageChanged { stage }) => match stage {
            ScanStage::SearchingFiles => {
                pb.set_style(spinner_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_prefix(stage.to_string());
            }
            ScanStage::ProcessingMetadata => {
                pb.disable_steady_tick();
                pb.set_style(bar_style());
                pb.set_length(BAR_LENGTH);
                pb.set_position(0);
                pb.set_prefix(stage.to_string());
            }
        },
        Event::Scan(ScanEvent::Progress(p)) => {
            if let Progress::Fraction(fraction) = p.progress {
                pb.set_position((fraction * BAR_LENGTH as f64).round() as u64);
            }
            pb.set_message(p.message);
        }
        Event::Pipeline(
            PipelineEvent::Completed { .. } | PipelineEvent::Cancelled | PipelineEvent::Error { .. },
        ) => pb.finish_and_clear(),
        Event::Pipeline(PipelineEvent::Started { .. }) => {}
    }
}

fn run_config(settings_path: &Path, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", settings_path.display());
        }
        ConfigAction::Show => {
            let settings = Settings::load(settings_path)?;
            let json = serde_json::to_string_pretty(&settings).map_err(ConfigError::Serialize)?;
            println!("{}", json);
        }
        ConfigAction::Init { force } => {
            let term = Term::stderr();
            if settings_path.exists() && !force {
                term.write_line(&format!(
                    "{} {} already exists (use --force to overwrite)",
                    style("!").yellow().bold(),
                    settings_path.display()
                ))
                .ok();
                return Ok(());
            }
            Settings::default().save(settings_path)?;
            term.write_line(&format!(
                "{} Wrote {}",
                style("✓").green().bold(),
                settings_path.display()
            ))
            .ok();
        }
    }
    Ok(())
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix:.bold} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold} [{bar:40.cyan/blue}] {percent:>3}% {msg}")
        .map(|style| style.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
