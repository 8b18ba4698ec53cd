//! Convert PICSAR .pxr field dumps to VTK image data
//!
//! Thin command line wrapper around [pxtools::batch::BatchConverter].

// standard library
use std::path::PathBuf;
use std::process::ExitCode;

// pxtools modules
use pxtools::batch::{BatchConverter, ConversionSummary, Error, LabelMode};
use pxtools::format::error_chain;
use pxtools::vti::{ExtentMode, VolumeToVti};

// external crates
use clap::{ArgAction, Parser};
use log::{error, info};

/// Convert .pxr field dumps into .vti files for ParaView
///
/// Every dump in the source directory whose name contains FIELD is written to
/// the output directory as <name>.vti, which is created if needed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Field to convert, 'all' for every field, 'show' to list them
    #[arg(short, long, value_name = "FIELD")]
    field: String,

    /// Directory containing the .pxr dumps
    #[arg(short, long, value_name = "DIR", default_value = "../../fortran_bin/RESULTS")]
    source: PathBuf,

    /// Directory for the .vti outputs
    #[arg(short, long, value_name = "DIR", default_value = "vti_data")]
    output: PathBuf,

    /// Name each data array after its own file instead of FIELD
    #[arg(long)]
    per_file_labels: bool,

    /// Write extents as n-1 point indices (not legacy compatible)
    #[arg(long)]
    corrected_extents: bool,

    /// Escape XML reserved characters in data array names
    #[arg(long)]
    escape_labels: bool,

    /// Write through temporary files so failures leave nothing behind
    #[arg(long)]
    atomic: bool,

    /// Stop at the first field that fails to convert
    #[arg(long)]
    fail_fast: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Unable to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ConversionSummary, Error> {
    let mut converter = BatchConverter::new();
    converter.set_encoder(encoder(cli));
    converter.set_fail_fast(cli.fail_fast);

    if cli.per_file_labels {
        converter.set_label_mode(LabelMode::PerFile);
    }

    if cli.no_progress || cli.quiet {
        converter.disable_progress();
    }

    let summary = converter.run(&cli.field, &cli.source, &cli.output)?;

    if summary.is_dry_run() {
        println!("Possible fields to be converted:");
        for path in &summary.candidates {
            println!("  {}", path.display());
        }
    } else {
        info!("{summary}");
    }

    Ok(summary)
}

/// Image data settings from the command line flags
fn encoder(cli: &Cli) -> VolumeToVti {
    let extent_mode = match cli.corrected_extents {
        true => ExtentMode::Corrected,
        false => ExtentMode::Legacy,
    };

    VolumeToVti::builder()
        .extent_mode(extent_mode)
        .escape_labels(cli.escape_labels)
        .atomic(cli.atomic)
        .build()
}

/// Info level by default so the field list is always shown
fn init_logging(cli: &Cli) -> Result<(), log::SetLoggerError> {
    stderrlog::new()
        .quiet(cli.quiet)
        .verbosity(2 + cli.verbose as usize)
        .show_module_names(false)
        .init()
}
