//! tilestitch CLI - stitch map tiles for a bounding box into one image
//!
//! ```text
//! tilestitch -o manhattan.png 40.70 -74.02 40.72 -74.00 15 \
//!     'https://tile.openstreetmap.org/{z}/{x}/{y}.png'
//! ```

mod error;
mod progress;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use tilestitch::config::{ConfigFile, StitchConfig};
use tilestitch::logging::{init_logging, LoggingOptions};
use tilestitch::pipeline::{FetchObserver, TracingObserver};
use tilestitch::plan::{BoundingBox, TilePlan};
use tilestitch::provider::UrlTemplate;
use tilestitch::stitch::{StitchReport, StitchRequest, Stitcher};

use error::CliError;
use progress::ProgressBarObserver;

#[derive(Debug, Parser)]
#[command(name = "tilestitch", version)]
#[command(about = "Download slippy-map tiles for a bounding box and stitch them into one image", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Southern edge latitude in decimal degrees
    #[arg(value_name = "MINLAT")]
    min_lat: f64,

    /// Western edge longitude in decimal degrees
    #[arg(value_name = "MINLON")]
    min_lon: f64,

    /// Northern edge latitude in decimal degrees
    #[arg(value_name = "MAXLAT")]
    max_lat: f64,

    /// Eastern edge longitude in decimal degrees
    #[arg(value_name = "MAXLON")]
    max_lon: f64,

    /// Zoom level (0-24)
    #[arg(value_name = "ZOOM")]
    zoom: u8,

    /// Tile URL template containing {z}, {x} and {y}
    #[arg(value_name = "URL")]
    url: String,

    /// Output image path; the extension selects the format (.png, .jpg, ...)
    #[arg(short, long)]
    output: PathBuf,

    /// Tile edge length in pixels [default: 256]
    #[arg(long)]
    tilesize: Option<u32>,

    /// Maximum concurrent tile requests [default: 25]
    #[arg(long)]
    parallel: Option<usize>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long)]
    timeout: Option<u64>,

    /// User-Agent header sent to the tile server
    #[arg(long)]
    user_agent: Option<String>,

    /// Config file [default: <config dir>/tilestitch/config.ini]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config_file = load_config_file(args.config.as_deref())?;

    let _logging_guard = init_logging(&LoggingOptions {
        verbosity: args.verbose,
        file: args
            .log_file
            .clone()
            .or_else(|| config_file.logging.file.clone()),
    })
    .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let config = resolve_config(&args, &config_file);
    debug!(?config, "Resolved configuration");
    let template = UrlTemplate::new(args.url.as_str())?;
    let request = StitchRequest::new(
        BoundingBox::new(args.min_lat, args.min_lon, args.max_lat, args.max_lon),
        args.zoom,
        template,
        args.output.clone(),
    );

    let stitcher = Stitcher::from_config(config)?;
    let plan = stitcher.plan(&request)?;
    print_summary(&plan);

    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("Received interrupt, cancelling...");
        handler_token.cancel();
    })
    .map_err(|e| CliError::Signal(e.to_string()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let observer: Box<dyn FetchObserver> = if atty::is(atty::Stream::Stdout) {
        Box::new(ProgressBarObserver::new(plan.tile_count()))
    } else {
        Box::new(TracingObserver)
    };

    let result = runtime.block_on(stitcher.run(&request, observer.as_ref(), &token));
    drop(observer);

    let report = result?;
    print_result(&report);
    Ok(())
}

fn load_config_file(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Applies command-line overrides on top of the config file.
fn resolve_config(args: &Args, file: &ConfigFile) -> StitchConfig {
    let mut config = file.to_stitch_config();

    if let Some(tile_size) = args.tilesize {
        config = config.with_tile_size(tile_size);
    }
    if let Some(parallel) = args.parallel {
        config = config.with_parallel_downloads(parallel);
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout_secs(timeout);
    }
    if let Some(user_agent) = &args.user_agent {
        config = config.with_user_agent(user_agent.clone());
    }

    config
}

fn print_summary(plan: &TilePlan) {
    let (projected_min, projected_max) = plan.bbox.projected();

    println!("Geodetic bounds:  {}", plan.bbox);
    println!("Projected bounds: {} .. {}", projected_min, projected_max);
    println!("Zoom:             {}", plan.zoom);
    println!(
        "Tile bounds:      {},{} .. {},{} ({}×{}, {} tiles)",
        plan.tx1,
        plan.ty1,
        plan.tx2,
        plan.ty2,
        plan.tiles_width(),
        plan.tiles_height(),
        plan.tile_count()
    );
    println!(
        "Raster size:      {}×{} px",
        plan.output_width, plan.output_height
    );
    if let Some((px, py)) = plan.pixel_size_meters() {
        println!("Pixel size:       {:.4} × {:.4} m", px, py);
    }
    println!();
}

fn print_result(report: &StitchReport) {
    println!();
    if report.is_complete() {
        println!(
            "Wrote {} ({} tiles)",
            report.output().display(),
            report.fetched_count()
        );
    } else {
        println!(
            "Wrote {} ({} tiles, {} missing and left transparent)",
            report.output().display(),
            report.fetched_count(),
            report.failed_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const URL: &str = "http://x/{z}/{x}/{y}.png";

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["tilestitch"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parses_negative_positionals() {
        let args = parse(&["-o", "out.png", "40.70", "-74.02", "40.72", "-74.00", "15", URL]);

        assert_eq!(args.min_lat, 40.70);
        assert_eq!(args.min_lon, -74.02);
        assert_eq!(args.max_lon, -74.00);
        assert_eq!(args.zoom, 15);
        assert_eq!(args.url, URL);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert!(args.tilesize.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_output_is_required() {
        let result = Args::try_parse_from(["tilestitch", "1", "2", "3", "4", "5", URL]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[download]\nparallel = 4\ntimeout = 9\n[output]\ntile_size = 512\n")
            .unwrap();
        let file = load_config_file(Some(&path)).unwrap();

        let args = parse(&[
            "--parallel", "8", "-vv", "-o", "out.png", "1", "2", "3", "4", "5", URL,
        ]);
        let config = resolve_config(&args, &file);

        assert_eq!(config.parallel_downloads(), 8);
        assert_eq!(config.timeout_secs(), 9);
        assert_eq!(config.tile_size(), 512);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_defaults_without_config_or_flags() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_config_file(Some(&dir.path().join("missing.ini"))).unwrap();
        let args = parse(&["-o", "out.png", "1", "2", "3", "4", "5", URL]);

        assert_eq!(resolve_config(&args, &file), StitchConfig::default());
    }

    #[test]
    fn test_invalid_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[output]\ntile_size = big\n").unwrap();

        assert!(matches!(
            load_config_file(Some(&path)),
            Err(CliError::Config(_))
        ));
    }
}
