// depthmap - Preview the depth heatmap offline
//
// Pipeline:
//   1. Load a depth capture (16-bit PNG, millimeters) or estimate depth
//      from a photo with MiDaS
//   2. Run the heatmap over it
//   3. Write the vertex colors as an RGB image
//
// Usage: cargo run --bin depthmap -- <image> [--estimate] [--cols N] [--rows N]

mod ai;
mod capture;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use image::{Rgb, RgbImage};

use ar_depth_engine::config::EngineConfig;
use ar_depth_engine::depth::DepthSource;
use ar_depth_engine::heatmap::DepthHeatmap;

#[derive(Parser, Debug)]
#[command(name = "depthmap", about = "Render a depth capture as a heatmap image")]
struct Args {
    /// Depth capture, or a photo when --estimate is set
    input: PathBuf,

    /// Output PNG
    #[arg(short, long, default_value = "heatmap.png")]
    output: PathBuf,

    /// Treat the input as a photo and estimate depth with MiDaS
    #[arg(long)]
    estimate: bool,

    /// Grid columns (defaults to the capture's width)
    #[arg(long)]
    cols: Option<u32>,

    /// Grid rows (defaults to the capture's height)
    #[arg(long)]
    rows: Option<u32>,

    /// Nearest distance for estimated depth, meters
    #[arg(long, default_value_t = 0.5)]
    near: f32,

    /// Farthest distance for estimated depth, meters
    #[arg(long, default_value_t = 5.0)]
    far: f32,

    /// Engine config JSON file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json(&json)?
        }
        None => EngineConfig::default(),
    };

    let img = image::open(&args.input).with_context(|| format!("opening {}", args.input.display()))?;
    let cols = args.cols.unwrap_or(img.width());
    let rows = args.rows.unwrap_or(img.height());

    let depth = if args.estimate {
        log::info!("estimating depth for {} ({cols}x{rows})", args.input.display());
        let relative = ai::estimate_depth(&img, cols, rows);
        capture::from_relative(&relative, cols, rows, args.near, args.far)?
    } else {
        capture::from_millimeters(&img, cols, rows)?
    };

    let mut heatmap = DepthHeatmap::new(cfg.heatmap);
    heatmap.rebuild(&depth);
    let (min, max) = heatmap.depth_range();
    log::info!("{} vertices, depth {min:.2}..{max:.2} m", heatmap.vertex_count());

    write_colors(&heatmap, &args.output)?;
    log::info!("wrote {} ({}x{})", args.output.display(), depth.width(), depth.height());
    Ok(())
}

fn write_colors(heatmap: &DepthHeatmap, path: &Path) -> Result<()> {
    let (w, h) = (heatmap.width(), heatmap.height());
    anyhow::ensure!(w > 0 && h > 0, "depth frame too small for a heatmap");

    let colors = heatmap.colors();
    let out = RgbImage::from_fn(w, h, |x, y| {
        let i = ((y * w + x) * 3) as usize;
        let px = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Rgb([px(colors[i]), px(colors[i + 1]), px(colors[i + 2])])
    });
    out.save(path).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
