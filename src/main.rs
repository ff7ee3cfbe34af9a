use anyhow::Context;
use blobscan_core::{BatchConfig, BatchRunner, BlobTable};
use blobscan_cv::CircularBlobDetector;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{debug, info, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "blobscan",
    version,
    about = "Detect circular blobs in images and tabulate them"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process every matching image in a directory into one CSV table.
    Batch(BatchArgs),
    /// Detect blobs in one image and show the annotated result.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON batch config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    dir: Option<PathBuf>,
    #[arg(long)]
    mask: Option<String>,
    #[arg(long)]
    ext: Option<String>,
    /// Keep filesystem listing order instead of sorting by name.
    #[arg(long)]
    unsorted: bool,
    /// Omit the leading row index column.
    #[arg(long)]
    no_index: bool,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[arg(default_value = "./Blob/blob_test_image.png")]
    image: PathBuf,
    /// Print the table without opening a window.
    #[arg(long)]
    no_window: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Command::Batch(args) => run_batch(args),
        Command::Show(args) => run_show(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn resolve_config(args: BatchArgs) -> anyhow::Result<BatchConfig> {
    let mut config = match &args.config {
        Some(path) => BatchConfig::load_json(path)?,
        None => BatchConfig::default(),
    };

    if let Some(dir) = args.dir {
        config.directory = dir;
    }
    if let Some(mask) = args.mask {
        config.filename_mask = mask;
    }
    if let Some(ext) = args.ext {
        config.extension = ext;
    }
    if args.unsorted {
        config.sort_entries = false;
    }
    if args.no_index {
        config.include_index = false;
    }

    Ok(config)
}

fn run_batch(args: BatchArgs) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    debug!("Batch config: {:?}", config);

    let detector = CircularBlobDetector::new()?;
    let report = BatchRunner::new(config, detector).run()?;

    println!(
        "{} blobs from {} files written to {}",
        report.rows,
        report.processed,
        report.output_path.display()
    );
    Ok(())
}

fn run_show(args: ShowArgs) -> anyhow::Result<()> {
    let mut detector = CircularBlobDetector::new()?;
    debug!(
        "Detector params: {}",
        serde_json::to_string(detector.params())?
    );

    let candidates = detector
        .detect_from_file(&args.image, !args.no_window)
        .with_context(|| format!("Failed to process {:?}", args.image))?;

    let filename = args
        .image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut table = BlobTable::new();
    table.push_image(&filename, &candidates);
    info!("Detected {} blobs in {}", table.len(), args.image.display());

    let stdout = std::io::stdout();
    table
        .write_csv(&mut stdout.lock(), true)
        .context("Failed to print blob table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_args(argv: &[&str]) -> BatchArgs {
        let cli = Cli::parse_from(argv);
        match cli.command {
            Command::Batch(args) => args,
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn test_batch_defaults() -> anyhow::Result<()> {
        let config = resolve_config(batch_args(&["blobscan", "batch"]))?;
        assert_eq!(config, BatchConfig::default());
        Ok(())
    }

    #[test]
    fn test_flags_override_config_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("batch.json");
        std::fs::write(&path, r#"{ "directory": "from_file", "filename_mask": "scan" }"#)?;

        let config = resolve_config(batch_args(&[
            "blobscan",
            "batch",
            "--config",
            path.to_str().unwrap(),
            "--ext",
            ".tif",
            "--no-index",
        ]))?;

        assert_eq!(config.directory, PathBuf::from("from_file"));
        assert_eq!(config.filename_mask, "scan");
        assert_eq!(config.extension, ".tif");
        assert!(!config.include_index);
        assert!(config.sort_entries);
        Ok(())
    }

    #[test]
    fn test_show_default_path() {
        let cli = Cli::parse_from(["blobscan", "-v", "show", "--no-window"]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.image, PathBuf::from("./Blob/blob_test_image.png"));
                assert!(args.no_window);
            }
            other => panic!("expected show, got {other:?}"),
        }
    }
}
