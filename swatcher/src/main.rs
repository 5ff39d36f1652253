use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swatcher::{Accuracy, CompositeOptions, Region, Rgb, Swatch, Swatcher, Tile};

#[derive(Parser)]
#[command(name = "swatcher")]
#[command(about = "Find the dominant colors of a PNG or JPEG image")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log analysis passes to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the most frequent colors
    Top {
        /// Image file
        path: PathBuf,

        /// Number of colors
        #[arg(short, default_value_t = 5)]
        n: usize,

        /// Sampling accuracy: High, Medium or Low
        #[arg(short, long, default_value = "Low")]
        accuracy: String,
    },
    /// Print the full color frequency table
    Analyze {
        /// Image file
        path: PathBuf,

        /// Sampling accuracy: High, Medium or Low
        #[arg(short, long, default_value = "Low")]
        accuracy: String,

        /// Region as x,y,w,h (defaults to the whole image)
        #[arg(long, value_parser = parse_region)]
        region: Option<Region>,
    },
    /// Reduce the image to one color per square tile
    Composite {
        /// Image file
        path: PathBuf,

        /// Tile edge length in pixels
        #[arg(short, long)]
        tile: u32,

        /// Sampling step inside each tile
        #[arg(long, default_value_t = 1)]
        tile_stride: u32,

        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Write the rendered composite (PNG or JPEG by extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print image dimensions and format
    Info {
        /// Image file
        path: PathBuf,
    },
}

fn parse_region(s: &str) -> Result<Region, String> {
    let parts: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid region {s:?}: {e}"))?;
    match parts.as_slice() {
        &[x, y, w, h] => Ok(Region::new(x, y, w, h)),
        _ => Err(format!("region must be x,y,w,h, got {s:?}")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "swatcher=debug"
    } else {
        "swatcher=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Top { path, n, accuracy } => run_top(&path, n, &accuracy, cli.json),
        Commands::Analyze {
            path,
            accuracy,
            region,
        } => run_analyze(&path, &accuracy, region, cli.json),
        Commands::Composite {
            path,
            tile,
            tile_stride,
            timeout_ms,
            output,
        } => run_composite(
            &path,
            tile,
            tile_stride,
            timeout_ms,
            output.as_deref(),
            cli.json,
        ),
        Commands::Info { path } => run_info(&path, cli.json),
    }
}

fn open(path: &Path, accuracy: &str) -> anyhow::Result<Swatcher> {
    Swatcher::open_with_label(path, accuracy)
        .with_context(|| format!("failed to load {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_top(path: &Path, n: usize, accuracy: &str, json: bool) -> anyhow::Result<()> {
    let session = open(path, accuracy)?;
    let colors = session
        .top_swatches(n)
        .with_context(|| format!("failed to select {n} swatches"))?;

    if json {
        #[derive(Serialize)]
        struct Entry {
            color: Rgb,
            css: String,
            hex: String,
        }
        let entries: Vec<Entry> = colors
            .iter()
            .map(|c| Entry {
                color: *c,
                css: c.to_string(),
                hex: c.to_hex(),
            })
            .collect();
        return print_json(&entries);
    }

    for color in colors {
        println!("{color}");
    }
    Ok(())
}

fn run_analyze(
    path: &Path,
    accuracy: &str,
    region: Option<Region>,
    json: bool,
) -> anyhow::Result<()> {
    let session = open(path, accuracy)?;
    let tally = session
        .analyze_pixels(region)
        .context("failed to analyze image")?;

    if json {
        return print_json(&tally);
    }

    println!(
        "{} samples, {} colors, region {}, stride {}",
        tally.total(),
        tally.len(),
        tally.region(),
        tally.stride()
    );
    for Swatch { color, count } in tally.iter() {
        println!("{count:>8}  {color}");
    }
    Ok(())
}

fn run_composite(
    path: &Path,
    tile: u32,
    tile_stride: u32,
    timeout_ms: Option<u64>,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    // Tiles use their own stride; the session accuracy is not consulted
    let session = Swatcher::open(path, Accuracy::default())
        .with_context(|| format!("failed to load {}", path.display()))?;

    let mut options = CompositeOptions::new(tile).with_tile_stride(tile_stride);
    if let Some(ms) = timeout_ms {
        options = options.with_deadline(Instant::now() + Duration::from_millis(ms));
    }
    let composite = session
        .generate_composite_with(&options)
        .context("failed to build composite")?;

    if let Some(output) = output {
        let rendered = composite.render().context("failed to render composite")?;
        swatcher::io::write_image_auto(&rendered, output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        tracing::info!(path = %output.display(), "wrote composite");
    }

    if json {
        return print_json(&composite);
    }

    println!(
        "{} x {} tiles of {}px",
        composite.columns(),
        composite.rows(),
        composite.tile_size()
    );
    for Tile { nw, se, color } in composite.tiles() {
        println!("{nw}-{se}  {color}");
    }
    Ok(())
}

fn run_info(path: &Path, json: bool) -> anyhow::Result<()> {
    let header = swatcher::io::read_image_header(path)
        .with_context(|| format!("failed to read header of {}", path.display()))?;

    if json {
        #[derive(Serialize)]
        struct Info {
            width: u32,
            height: u32,
            bits_per_sample: u32,
            samples_per_pixel: u32,
            palette: bool,
            format: swatcher::ImageFormat,
            mime_type: &'static str,
        }
        return print_json(&Info {
            width: header.width,
            height: header.height,
            bits_per_sample: header.bps,
            samples_per_pixel: header.spp,
            palette: header.has_palette,
            format: header.format,
            mime_type: header.format.mime_type(),
        });
    }

    println!(
        "{}: {:?} {}x{}, {} samples x {} bits{}",
        path.display(),
        header.format,
        header.width,
        header.height,
        header.spp,
        header.bps,
        if header.has_palette { ", palette" } else { "" }
    );
    Ok(())
}
