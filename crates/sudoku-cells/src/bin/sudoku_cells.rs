//! `sudoku-cells` command line tool.
//!
//! ```bash
//! sudoku-cells extract --image puzzle.jpg --out-dir cells --report cells/report.json
//! sudoku-cells corners --image puzzle.jpg
//! sudoku-cells init-config --out config.json
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
#[cfg(not(feature = "tracing"))]
use log::LevelFilter;
use sudoku_cells::io::{save_cells, save_gray};
use sudoku_cells::overlay::{draw_corners, DEFAULT_COLOR, DEFAULT_RADIUS};
use sudoku_cells::{CellExtractConfig, CellExtractReport, CellExtractor, DigitCenterParams};

#[derive(Parser)]
#[command(name = "sudoku-cells")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract the 81 cell images of a Sudoku puzzle photo", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect, de-skew and slice a puzzle into cell PNGs
    Extract {
        /// Input photo (any format `image` can decode)
        #[arg(long)]
        image: Option<PathBuf>,

        /// Directory receiving `cell_r{row}_c{col}.png`
        #[arg(long = "out-dir")]
        out_dir: Option<PathBuf>,

        /// JSON run configuration; flags override its paths
        #[arg(long)]
        config: Option<PathBuf>,

        /// Where to write the JSON report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Save the de-skewed square as an image
        #[arg(long)]
        square: Option<PathBuf>,

        /// Save the input with the detected corners drawn on it
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Re-center digits inside each cell
        #[arg(long = "center-digits")]
        center_digits: bool,
    },
    /// Print the detected puzzle corners as JSON
    Corners {
        #[arg(long)]
        image: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration to a file
    InitConfig {
        #[arg(long)]
        out: PathBuf,
    },
}

fn init_logging(verbose: u8) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "tracing")]
    {
        let _ = verbose;
        sudoku_cells::core::init_tracing(false);
        // The subscriber may already have bridged `log` records.
        let _ = tracing_log::LogTracer::init();
    }
    #[cfg(not(feature = "tracing"))]
    {
        let level = match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        sudoku_cells::core::init_with_level(level)?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<CellExtractConfig, Box<dyn Error>> {
    Ok(match path {
        Some(p) => CellExtractConfig::load_json(p)?,
        None => CellExtractConfig::default(),
    })
}

fn path_string(p: PathBuf) -> String {
    p.to_string_lossy().into_owned()
}

#[allow(clippy::too_many_arguments)]
fn run_extract(
    image: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    report: Option<PathBuf>,
    square: Option<PathBuf>,
    overlay: Option<PathBuf>,
    center_digits: bool,
) -> Result<(), Box<dyn Error>> {
    let mut cfg = load_config(config.as_deref())?;
    match image {
        Some(p) => cfg.image_path = path_string(p),
        None if config.is_none() => return Err("either --image or --config is required".into()),
        None => {}
    }
    if let Some(p) = out_dir {
        cfg.output_dir = path_string(p);
    }
    if let Some(p) = report {
        cfg.report_path = Some(path_string(p));
    }
    if let Some(p) = square {
        cfg.square_path = Some(path_string(p));
    }
    if let Some(p) = overlay {
        cfg.overlay_path = Some(path_string(p));
    }
    if center_digits && cfg.params.center_digits.is_none() {
        cfg.params.center_digits = Some(DigitCenterParams::default());
    }

    let img = image::open(&cfg.image_path)?.to_luma8();
    log::info!("loaded {} ({}x{})", cfg.image_path, img.width(), img.height());

    let extractor = cfg.build_extractor()?;
    let mut report = CellExtractReport::new(&cfg, config.as_deref(), img.width(), img.height());
    let report_path = cfg.report_path();

    match extractor.extract(&img) {
        Ok(res) => {
            let paths = save_cells(&cfg.output_dir, &res.cells)?;
            if let Some(p) = &cfg.square_path {
                save_gray(p, &res.square)?;
                report.square_path = Some(p.clone());
            }
            if let Some(p) = &cfg.overlay_path {
                draw_corners(&img, &res.corners_in_input(), DEFAULT_RADIUS, DEFAULT_COLOR).save(p)?;
            }
            report.set_result(&res, &paths);
            report.write_json(&report_path)?;
            println!(
                "wrote {} cells to {} (report: {})",
                paths.len(),
                cfg.output_dir,
                report_path.display()
            );
            Ok(())
        }
        Err(err) => {
            report.set_error(&err);
            report.write_json(&report_path)?;
            Err(err.into())
        }
    }
}

fn run_corners(image: PathBuf, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let cfg = load_config(config.as_deref())?;
    let img = image::open(&image)?.to_luma8();
    let corners = CellExtractor::new(cfg.params)?.find_corners(&img)?;
    println!("{}", serde_json::to_string_pretty(&corners)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Extract {
            image,
            out_dir,
            config,
            report,
            square,
            overlay,
            center_digits,
        } => run_extract(image, out_dir, config, report, square, overlay, center_digits),
        Commands::Corners { image, config } => run_corners(image, config),
        Commands::InitConfig { out } => {
            CellExtractConfig::default().write_json(&out)?;
            println!("wrote default config to {}", out.display());
            Ok(())
        }
    }
}
