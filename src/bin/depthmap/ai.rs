// ai.rs - Monocular depth estimation (MiDaS)
//
// Runs the ONNX model when it is present under models/. Without it the
// result is a vertical gradient, near at the bottom of the frame.

use std::path::Path;

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use ndarray::Array4;
use ort::session::Session;
use ort::value::Value;

const MIDAS_SIZE: u32 = 256;

// ImageNet normalization
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Relative depth in [0, 1], 0 = far, 1 = near, as `th` rows of `tw`.
pub fn estimate_depth(img: &DynamicImage, tw: u32, th: u32) -> Vec<Vec<f32>> {
    let model_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/midas_small.onnx");
    if !model_path.exists() {
        log::warn!("MiDaS model not found at {}, using gradient", model_path.display());
        return fallback_depth(tw, th);
    }

    match run_midas(&model_path, img, tw, th) {
        Ok(depth) => depth,
        Err(err) => {
            log::warn!("MiDaS failed ({err}), using gradient");
            fallback_depth(tw, th)
        }
    }
}

fn run_midas(model_path: &Path, img: &DynamicImage, tw: u32, th: u32) -> anyhow::Result<Vec<Vec<f32>>> {
    let mut session = Session::builder()?.commit_from_file(model_path)?;

    let resized = img.resize_exact(MIDAS_SIZE, MIDAS_SIZE, FilterType::Lanczos3);
    let mut input = Array4::<f32>::zeros((1, 3, MIDAS_SIZE as usize, MIDAS_SIZE as usize));
    for (x, y, p) in resized.pixels() {
        for c in 0..3 {
            input[[0, c, y as usize, x as usize]] = (p[c] as f32 / 255.0 - MEAN[c]) / STD[c];
        }
    }

    let input_val = Value::from_array(input)?;
    let input_name = session.inputs.first().map(|i| i.name.clone()).unwrap_or_else(|| "image".into());
    let outputs = session.run(ort::inputs![input_name => input_val])?;
    let arr = outputs[0].try_extract_array::<f32>()?;

    let shape = arr.shape();
    let (oh, ow) = match shape.len() {
        4 => (shape[2], shape[3]),
        3 => (shape[1], shape[2]),
        2 => (shape[0], shape[1]),
        n => anyhow::bail!("unexpected MiDaS output rank {n}"),
    };

    let flat: Vec<f32> = arr.iter().copied().collect();
    let (min_d, max_d) = flat.iter().fold((f32::MAX, f32::MIN), |(mn, mx), &v| (mn.min(v), mx.max(v)));
    let range = (max_d - min_d).max(1e-6);

    Ok(bilinear_resize(&flat, ow, oh, tw as usize, th as usize, min_d, range))
}

fn fallback_depth(w: u32, h: u32) -> Vec<Vec<f32>> {
    (0..h as usize)
        .map(|y| vec![y as f32 / h as f32; w as usize])
        .collect()
}

/// Resample `src` (sw x sh) to tw x th, normalizing into [0, 1].
fn bilinear_resize(src: &[f32], sw: usize, sh: usize, tw: usize, th: usize, min_d: f32, range: f32) -> Vec<Vec<f32>> {
    let (sx, sy) = (sw as f32 / tw as f32, sh as f32 / th as f32);
    let sample = |x: usize, y: usize| (src.get(y * sw + x).copied().unwrap_or(min_d) - min_d) / range;

    (0..th)
        .map(|y| {
            (0..tw)
                .map(|x| {
                    let (fx, fy) = (x as f32 * sx, y as f32 * sy);
                    let (x0, y0) = (fx as usize, fy as usize);
                    let (x1, y1) = ((x0 + 1).min(sw - 1), (y0 + 1).min(sh - 1));
                    let (tx, ty) = (fx.fract(), fy.fract());

                    sample(x0, y0) * (1.0 - tx) * (1.0 - ty)
                        + sample(x1, y0) * tx * (1.0 - ty)
                        + sample(x0, y1) * (1.0 - tx) * ty
                        + sample(x1, y1) * tx * ty
                })
                .collect()
        })
        .collect()
}
