// capture.rs - Depth captures to metric depth buffers

use anyhow::Result;
use image::{DynamicImage, imageops::FilterType};

use ar_depth_engine::depth::DepthBuffer;

/// 16-bit grayscale capture, one millimeter per unit. 0 stays 0 (unknown).
/// Resized with nearest so unknown pixels don't bleed into neighbors.
pub fn from_millimeters(img: &DynamicImage, cols: u32, rows: u32) -> Result<DepthBuffer> {
    let luma = img.to_luma16();
    let luma = if luma.dimensions() == (cols, rows) {
        luma
    } else {
        image::imageops::resize(&luma, cols, rows, FilterType::Nearest)
    };
    let meters = luma.pixels().map(|p| p.0[0] as f32 / 1000.0).collect();
    Ok(DepthBuffer::new(cols, rows, meters)?)
}

/// MiDaS output (0 = far, 1 = near) spread linearly over [near, far] meters.
pub fn from_relative(relative: &[Vec<f32>], cols: u32, rows: u32, near: f32, far: f32) -> Result<DepthBuffer> {
    anyhow::ensure!(far > near, "far ({far}) must exceed near ({near})");
    let meters = relative
        .iter()
        .flatten()
        .map(|&d| near + (1.0 - d.clamp(0.0, 1.0)) * (far - near))
        .collect();
    Ok(DepthBuffer::new(cols, rows, meters)?)
}
