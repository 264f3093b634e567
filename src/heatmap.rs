// heatmap.rs - Depth frame to colored, displaced plane mesh
//
// Output buffers (for the host renderer, xyz / rgb per vertex):
//   positions  - 2x2 plane, x -1..1 left to right, y 1..-1 top to bottom,
//                z = -depth * scale
//   colors     - depth_color(normalized depth)
//   normals    - central differences over the displaced grid
//
// Buffers are reused across frames and only reallocated when the depth
// frame changes size.

use crate::config::HeatmapConfig;
use crate::depth::{DepthSource, is_valid_depth, resolve};

// Platform depth frames are a few hundred pixels across
const MAX_VERTICES: u32 = 1 << 22;

/// Normalized depth to RGB: red grows with depth, green falls, blue falls at
/// half rate.
#[inline]
pub fn depth_color(n: f32) -> [f32; 3] {
    [n, 1.0 - n, 1.0 - n * 0.5]
}

/// Position of `d` within [min, max].
#[inline]
pub fn normalize_depth(d: f32, min: f32, max: f32) -> f32 {
    (d - min) / (max - min)
}

pub struct DepthHeatmap {
    w: u32,
    h: u32,
    positions: Vec<f32>,
    colors: Vec<f32>,
    normals: Vec<f32>,
    // Raw samples of the current frame; None where the query failed
    samples: Vec<Option<f32>>,
    min: f32,
    max: f32,
    generation: u32,
    cfg: HeatmapConfig,
}

impl DepthHeatmap {
    pub fn new(cfg: HeatmapConfig) -> Self {
        Self {
            w: 0,
            h: 0,
            positions: Vec::new(),
            colors: Vec::new(),
            normals: Vec::new(),
            samples: Vec::new(),
            min: cfg.min_seed,
            max: cfg.max_seed,
            generation: 0,
            cfg,
        }
    }

    fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        let n = (w * h) as usize;
        self.positions.resize(n * 3, 0.0);
        self.colors.resize(n * 3, 0.0);
        self.normals.resize(n * 3, 0.0);
        self.samples.resize(n, None);
        self.lay_out_grid();
    }

    fn lay_out_grid(&mut self) {
        if self.w < 2 || self.h < 2 {
            return;
        }
        let (sx, sy) = (2.0 / (self.w - 1) as f32, 2.0 / (self.h - 1) as f32);
        for y in 0..self.h {
            for x in 0..self.w {
                let i = (y * self.w + x) as usize * 3;
                self.positions[i] = x as f32 * sx - 1.0;
                self.positions[i + 1] = 1.0 - y as f32 * sy;
            }
        }
    }

    /// Rebuild the mesh from this frame's depth.
    pub fn rebuild(&mut self, depth: &dyn DepthSource) {
        let (w, h) = (depth.width(), depth.height());
        let too_large = w.checked_mul(h).is_none_or(|n| n > MAX_VERTICES);
        if w < 2 || h < 2 || too_large {
            log::debug!("depth frame {w}x{h} has no usable mesh size");
            self.resize(0, 0);
            self.generation = self.generation.wrapping_add(1);
            return;
        }
        if w != self.w || h != self.h {
            self.resize(w, h);
        }

        self.scan_range(depth);
        self.write_vertices();
        self.compute_normals();
        self.generation = self.generation.wrapping_add(1);
    }

    // First pass: sample every grid point once and find the depth range.
    fn scan_range(&mut self, depth: &dyn DepthSource) {
        let (mut min, mut max) = (self.cfg.min_seed, self.cfg.max_seed);
        let (wf, hf) = (self.w as f32, self.h as f32);

        for y in 0..self.h {
            for x in 0..self.w {
                let i = (y * self.w + x) as usize;
                match depth.depth_at(x as f32 / wf, y as f32 / hf) {
                    Ok(raw) => {
                        self.samples[i] = Some(raw);
                        let d = resolve(raw, self.cfg.range_fallback, max);
                        if is_valid_depth(d) {
                            min = min.min(d);
                            max = max.max(d);
                        }
                    }
                    Err(err) => {
                        log::error!("depth query at ({x}, {y}) failed: {err}");
                        self.samples[i] = None;
                    }
                }
            }
        }

        self.min = min;
        self.max = max;
    }

    // Second pass: displacement and color against the observed range.
    fn write_vertices(&mut self) {
        let (min, max, scale) = (self.min, self.max, self.cfg.scale);

        for (i, sample) in self.samples.iter().enumerate() {
            let p = i * 3;
            let Some(raw) = *sample else {
                self.positions[p + 2] = 0.0;
                self.colors[p..p + 3].fill(0.0);
                continue;
            };

            let d = resolve(raw, self.cfg.color_fallback, max);
            let n = normalize_depth(d, min, max);
            self.positions[p + 2] = -d * scale;
            self.colors[p..p + 3].copy_from_slice(&depth_color(n));
        }
    }

    fn compute_normals(&mut self) {
        let (w, h) = (self.w as usize, self.h as usize);
        let dx = 2.0 / (w - 1) as f32;
        let dy = 2.0 / (h - 1) as f32;
        let positions = &self.positions;
        let normals = &mut self.normals;
        let z = |x: usize, y: usize| positions[(y * w + x) * 3 + 2];

        for y in 0..h {
            for x in 0..w {
                let (x0, x1) = (x.saturating_sub(1), (x + 1).min(w - 1));
                let (y0, y1) = (y.saturating_sub(1), (y + 1).min(h - 1));

                let dzdx = (z(x1, y) - z(x0, y)) / ((x1 - x0) as f32 * dx);
                // Rows run top to bottom while plane y runs 1..-1
                let dzdy = (z(x, y0) - z(x, y1)) / ((y1 - y0) as f32 * dy);

                let len = (dzdx * dzdx + dzdy * dzdy + 1.0).sqrt();
                let i = (y * w + x) * 3;
                normals[i] = -dzdx / len;
                normals[i + 1] = -dzdy / len;
                normals[i + 2] = 1.0 / len;
            }
        }
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }
    pub fn depth_range(&self) -> (f32, f32) {
        (self.min, self.max)
    }
    pub fn width(&self) -> u32 {
        self.w
    }
    pub fn height(&self) -> u32 {
        self.h
    }
    /// Bumped on every rebuild so the host knows to re-upload.
    pub fn generation(&self) -> u32 {
        self.generation
    }
    pub fn vertex_count(&self) -> usize {
        (self.w * self.h) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::DepthBuffer;
    use crate::error::DepthError;

    fn color_at(hm: &DepthHeatmap, x: u32, y: u32) -> [f32; 3] {
        let i = ((y * hm.width() + x) * 3) as usize;
        [hm.colors()[i], hm.colors()[i + 1], hm.colors()[i + 2]]
    }

    fn z_at(hm: &DepthHeatmap, x: u32, y: u32) -> f32 {
        hm.positions()[((y * hm.width() + x) * 3 + 2) as usize]
    }

    #[test]
    fn color_endpoints() {
        assert_eq!(depth_color(0.0), [0.0, 1.0, 1.0]);
        assert_eq!(depth_color(1.0), [1.0, 0.0, 0.5]);
    }

    #[test]
    fn color_is_monotonic() {
        let mut prev = depth_color(0.0);
        for i in 1..=100 {
            let c = depth_color(i as f32 / 100.0);
            assert!(c[0] > prev[0]);
            assert!(c[1] < prev[1]);
            assert!(c[2] < prev[2]);
            prev = c;
        }
    }

    #[test]
    fn normalization_bounds() {
        assert_eq!(normalize_depth(0.01, 0.01, 5.0), 0.0);
        assert_eq!(normalize_depth(5.0, 0.01, 5.0), 1.0);
        for i in 0..=50 {
            let d = 0.01 + (5.0 - 0.01) * i as f32 / 50.0;
            let n = normalize_depth(d, 0.01, 5.0);
            assert!((0.0..=1.0).contains(&n), "{d} -> {n}");
        }
    }

    #[test]
    fn grid_layout_and_displacement() {
        let buf = DepthBuffer::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 2.5]).unwrap();
        let mut hm = DepthHeatmap::new(HeatmapConfig { scale: 0.5, ..Default::default() });
        hm.rebuild(&buf);

        assert_eq!(hm.vertex_count(), 6);
        let p = hm.positions();
        assert_eq!(&p[0..2], &[-1.0, 1.0]);
        assert_eq!(&p[3..5], &[0.0, 1.0]);
        assert_eq!(&p[15..17], &[1.0, -1.0]);
        assert!((z_at(&hm, 1, 0) - -1.0).abs() < 1e-6);
        assert!((z_at(&hm, 1, 1) - -2.5).abs() < 1e-6);
        assert_eq!(hm.depth_range(), (0.01, 5.0));
    }

    #[test]
    fn range_grows_past_seeds() {
        let mut buf = DepthBuffer::filled(4, 4, 1.0).unwrap();
        buf.set(2, 2, 8.0);
        let mut hm = DepthHeatmap::new(HeatmapConfig::default());
        hm.rebuild(&buf);

        assert_eq!(hm.depth_range(), (0.01, 8.0));
        assert_eq!(color_at(&hm, 2, 2)[0], 1.0);
    }

    #[test]
    fn invalid_samples_use_running_max_for_color() {
        let mut buf = DepthBuffer::filled(2, 2, 1.0).unwrap();
        buf.set(0, 0, 0.0);
        buf.set(1, 1, f32::NAN);
        let mut hm = DepthHeatmap::new(HeatmapConfig::default());
        hm.rebuild(&buf);

        // Invalid pixels count as 2.0 m for the range, then draw at the max
        assert_eq!(hm.depth_range(), (0.01, 5.0));
        assert_eq!(color_at(&hm, 0, 0), depth_color(1.0));
        assert!((z_at(&hm, 1, 1) - -5.0).abs() < 1e-6);
    }

    struct Flaky(DepthBuffer);

    impl DepthSource for Flaky {
        fn width(&self) -> u32 {
            self.0.width()
        }
        fn height(&self) -> u32 {
            self.0.height()
        }
        fn depth_at(&self, u: f32, v: f32) -> Result<f32, DepthError> {
            if u == 0.0 && v == 0.0 {
                return Err(DepthError::Query("sensor busy".into()));
            }
            self.0.depth_at(u, v)
        }
    }

    #[test]
    fn failed_queries_leave_flat_black_vertex() {
        let mut hm = DepthHeatmap::new(HeatmapConfig::default());
        hm.rebuild(&DepthBuffer::filled(2, 2, 3.0).unwrap());
        assert!(z_at(&hm, 0, 0) < 0.0);

        hm.rebuild(&Flaky(DepthBuffer::filled(2, 2, 3.0).unwrap()));
        assert_eq!(z_at(&hm, 0, 0), 0.0);
        assert_eq!(color_at(&hm, 0, 0), [0.0, 0.0, 0.0]);
        assert!((z_at(&hm, 1, 1) - -3.0).abs() < 1e-6);
    }

    #[test]
    fn flat_frame_has_upward_normals() {
        let mut hm = DepthHeatmap::new(HeatmapConfig::default());
        hm.rebuild(&DepthBuffer::filled(4, 3, 2.0).unwrap());
        for n in hm.normals().chunks_exact(3) {
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn buffers_reused_until_resize() {
        let mut hm = DepthHeatmap::new(HeatmapConfig::default());
        hm.rebuild(&DepthBuffer::filled(8, 8, 1.0).unwrap());
        let ptr = hm.positions().as_ptr();
        hm.rebuild(&DepthBuffer::filled(8, 8, 2.0).unwrap());
        assert_eq!(ptr, hm.positions().as_ptr());
        assert_eq!(hm.generation(), 2);

        hm.rebuild(&DepthBuffer::filled(4, 2, 2.0).unwrap());
        assert_eq!(hm.vertex_count(), 8);
        assert_eq!(hm.positions().len(), 24);
    }

    #[test]
    fn degenerate_frame_is_empty() {
        let mut hm = DepthHeatmap::new(HeatmapConfig::default());
        hm.rebuild(&DepthBuffer::filled(1, 5, 1.0).unwrap());
        assert_eq!(hm.vertex_count(), 0);
        assert!(hm.positions().is_empty());
    }

    // Host-reported size with nothing behind it
    struct Claimed(u32, u32);

    impl DepthSource for Claimed {
        fn width(&self) -> u32 {
            self.0
        }
        fn height(&self) -> u32 {
            self.1
        }
        fn depth_at(&self, _u: f32, _v: f32) -> Result<f32, DepthError> {
            Ok(1.0)
        }
    }

    #[test]
    fn oversized_frame_is_empty() {
        let mut hm = DepthHeatmap::new(HeatmapConfig::default());
        hm.rebuild(&Claimed(65536, 65536));
        assert_eq!(hm.vertex_count(), 0);
        hm.rebuild(&Claimed(4096, 4096));
        assert_eq!(hm.vertex_count(), 0);
        assert_eq!(hm.generation(), 2);
    }
}
