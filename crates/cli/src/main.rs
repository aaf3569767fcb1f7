//! Haralick CLI - GLCM texture analysis of grayscale images

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use haralick_algorithms::texture::{
    co_occurrence, co_occurrence_counts, extract_feature, global_descriptors, mean_co_occurrence,
    ExtractParams, GlcmFeature, Offset, Region,
};
use haralick_core::{QuantizeParams, QuantizedImage};
use haralick_parallel::{num_cpus, ProcessingMode};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "haralick")]
#[command(author, version, about = "GLCM texture features of grayscale images", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct QuantizeArgs {
    /// Amount of gray levels the image is reduced to (1..=255)
    #[arg(short, long, default_value = "8")]
    levels: usize,
}

#[derive(Args)]
struct OffsetArgs {
    /// Offset as dx,dy: 1,0 | 0,1 | 1,1 | -1,1. Repeat for a mean GLCM (default: all four)
    #[arg(long = "offset", allow_hyphen_values = true)]
    offsets: Vec<Offset>,
}

impl OffsetArgs {
    fn resolve(&self) -> Vec<Offset> {
        if self.offsets.is_empty() {
            Offset::ALL.to_vec()
        } else {
            self.offsets.clone()
        }
    }
}

#[derive(Args)]
struct ModeArgs {
    /// Worker threads for the window scan (default: all cores)
    #[arg(short, long, conflicts_with = "sequential")]
    threads: Option<usize>,
    /// Scan windows on the current thread only
    #[arg(long)]
    sequential: bool,
}

impl ModeArgs {
    fn mode(&self) -> ProcessingMode {
        match (self.sequential, self.threads) {
            (true, _) => ProcessingMode::Sequential,
            (false, Some(n)) => ProcessingMode::ParallelWith(n),
            (false, None) => ProcessingMode::Parallel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show dimensions and gray levels of an image
    Info {
        /// Input image
        input: PathBuf,
        #[command(flatten)]
        quantize: QuantizeArgs,
    },
    /// Print the GLCM of an image or of a window
    Matrix {
        /// Input image
        input: PathBuf,
        #[command(flatten)]
        quantize: QuantizeArgs,
        #[command(flatten)]
        offsets: OffsetArgs,
        /// Restrict to a square window given as top,left,size
        #[arg(short, long, value_parser = parse_window)]
        window: Option<Region>,
        /// Do not add the transposed matrix before normalizing
        #[arg(long)]
        one_sided: bool,
        /// Print raw pair counts (single offset only)
        #[arg(long, conflicts_with = "one_sided")]
        raw: bool,
        /// Decimals to print (at most 5)
        #[arg(short, long, default_value = "4")]
        precision: usize,
    },
    /// Texture descriptors of the whole image
    Describe {
        /// Input image
        input: PathBuf,
        #[command(flatten)]
        quantize: QuantizeArgs,
        #[command(flatten)]
        offsets: OffsetArgs,
        /// Do not add the transposed matrix before normalizing
        #[arg(long)]
        one_sided: bool,
    },
    /// Sliding-window feature map of one texture measure
    Extract {
        /// Input image
        input: PathBuf,
        #[command(flatten)]
        quantize: QuantizeArgs,
        #[command(flatten)]
        offsets: OffsetArgs,
        /// Feature: energy, entropy, contrast, homogeneity
        #[arg(short, long, default_value = "contrast")]
        feature: GlcmFeature,
        /// Window size (odd, fitting the image)
        #[arg(short, long, default_value = "7")]
        window: usize,
        /// Window size used when --window is not acceptable
        #[arg(long, default_value = "7")]
        default_window: usize,
        /// Output directory (default: <input dir>/../output)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Every feature map for every level amount and window size, over the mean of all offsets
    Batch {
        /// Input images
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Gray level amounts
        #[arg(short, long, value_delimiter = ',', default_value = "8,16,24,32")]
        levels: Vec<usize>,
        /// Window sizes
        #[arg(short, long, value_delimiter = ',', default_value = "5,7,9")]
        windows: Vec<usize>,
        /// Output directory (default: <input dir>/../output)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        mode: ModeArgs,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the log subscriber")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn progress(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

fn read_image(path: &Path, levels: usize) -> Result<QuantizedImage> {
    let pb = spinner("Reading image...");
    let image = QuantizedImage::open(path, &QuantizeParams {
        levels,
        ..Default::default()
    })
    .with_context(|| format!("Failed to load {}", path.display()))?;
    pb.finish_and_clear();
    info!(
        "Input: {} x {}, {} gray levels",
        image.cols(),
        image.rows(),
        image.levels_amount()
    );
    Ok(image)
}

/// Sibling `output` directory of the directory holding `input`
fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .and_then(Path::parent)
        .map(|p| p.join("output"))
        .unwrap_or_else(|| PathBuf::from("output"))
}

fn parse_window(s: &str) -> std::result::Result<Region, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("window must be 'top,left,size', got: {}", s));
    }
    let mut nums = [0usize; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("invalid number '{}' in window", part))?;
    }
    Ok(Region::window(nums[0], nums[1], nums[2]))
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Info { input, quantize } => {
            let image = read_image(&input, quantize.levels)?;
            println!("File: {}", input.display());
            println!(
                "Dimensions: {} x {} ({} pixels)",
                image.cols(),
                image.rows(),
                image.raster().len()
            );
            println!("Original gray levels: {}", image.original_levels());
            println!("Quantized gray levels: {}", image.levels_amount());
            println!("Level table: {:?}", image.levels().as_slice());
            let stats = image.raster().statistics();
            if let Some(mean) = stats.mean {
                println!("Mean quantized value: {:.4}", mean);
            }
        }

        Commands::Matrix {
            input,
            quantize,
            offsets,
            window,
            one_sided,
            raw,
            precision,
        } => {
            let image = read_image(&input, quantize.levels)?;
            let offsets = offsets.resolve();
            let region = window.unwrap_or_else(|| Region::full(&image));
            let glcm = if raw {
                let [offset] = offsets.as_slice() else {
                    anyhow::bail!("--raw needs exactly one --offset");
                };
                co_occurrence_counts(&image, *offset, region)?
            } else {
                match offsets.as_slice() {
                    [offset] => co_occurrence(&image, *offset, region, !one_sided)?,
                    _ => mean_co_occurrence(&image, &offsets, region, !one_sided)?,
                }
            };
            let labels: Vec<String> = offsets.iter().map(Offset::to_string).collect();
            println!("GLCM {} over {:?}", labels.join(" "), region);
            print!("{}", glcm.format(precision));
        }

        Commands::Describe {
            input,
            quantize,
            offsets,
            one_sided,
        } => {
            let image = read_image(&input, quantize.levels)?;
            let d = global_descriptors(&image, &offsets.resolve(), !one_sided)
                .context("Failed to compute texture descriptors")?;
            for feature in GlcmFeature::ALL {
                println!("{:<12} {:.6}", feature, d.get(feature));
            }
        }

        Commands::Extract {
            input,
            quantize,
            offsets,
            feature,
            window,
            default_window,
            output_dir,
            mode,
        } => {
            let image = read_image(&input, quantize.levels)?;
            let params = ExtractParams {
                window_size: window,
                default_window_size: default_window,
                offsets: offsets.resolve(),
                feature,
                mode: mode.mode(),
            };
            let start = Instant::now();
            let map = extract_feature(&image, &params)
                .with_context(|| format!("Failed to compute {}", feature))?;
            let elapsed = start.elapsed();

            let dir = output_dir.unwrap_or_else(|| default_output_dir(&input));
            let pb = spinner("Writing output...");
            let path = map.save(&dir).context("Failed to write output")?;
            pb.finish_and_clear();
            done(map.name(), &path, elapsed);
        }

        Commands::Batch {
            inputs,
            levels,
            windows,
            output_dir,
            mode,
        } => {
            let mode = mode.mode();
            info!("Scanning windows with {:?} ({} cores)", mode, num_cpus());
            let total = inputs.len() * levels.len() * windows.len() * GlcmFeature::ALL.len();
            let pb = progress(total as u64);
            let start = Instant::now();

            for input in &inputs {
                let dir = output_dir.clone().unwrap_or_else(|| default_output_dir(input));
                for &amount in &levels {
                    let image = read_image(input, amount)?;
                    for &window in &windows {
                        for feature in GlcmFeature::ALL {
                            let params = ExtractParams {
                                window_size: window,
                                offsets: Offset::ALL.to_vec(),
                                feature,
                                mode,
                                ..Default::default()
                            };
                            let map = extract_feature(&image, &params)
                                .with_context(|| format!("Failed to compute {}", feature))?;
                            let path = map.save(&dir).context("Failed to write output")?;
                            pb.set_message(map.name().to_string());
                            pb.inc(1);
                            info!("Saved {}", path.display());
                        }
                    }
                }
            }

            pb.finish_and_clear();
            println!("{} feature maps written in {:.2?}", total, start.elapsed());
        }
    }

    Ok(())
}
