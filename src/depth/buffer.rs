// buffer.rs - Depth sources
//
// Coordinates are normalized view coordinates: (0, 0) top-left, (1, 1)
// bottom-right. Values are meters.

use crate::error::DepthError;

/// Anything that answers metric depth queries for the current frame.
pub trait DepthSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Depth in meters at normalized coordinates. Errors for coordinates
    /// outside [0, 1] or when the platform query throws.
    fn depth_at(&self, u: f32, v: f32) -> Result<f32, DepthError>;
}

/// Depth frame held in memory, row-major.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    w: u32,
    h: u32,
    meters: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(w: u32, h: u32, meters: Vec<f32>) -> Result<Self, DepthError> {
        let expected = sample_count(w, h)?;
        if meters.len() != expected {
            return Err(DepthError::SizeMismatch { expected, got: meters.len() });
        }
        Ok(Self { w, h, meters })
    }

    /// Decode a luminance-alpha buffer: one little-endian u16 per pixel,
    /// scaled by the platform's `rawValueToMeters`.
    pub fn from_luminance_alpha(
        w: u32,
        h: u32,
        raw: &[u8],
        raw_value_to_meters: f32,
    ) -> Result<Self, DepthError> {
        let expected = sample_count(w, h)?;
        if raw.len() / 2 != expected || raw.len() % 2 != 0 {
            return Err(DepthError::SizeMismatch { expected, got: raw.len() / 2 });
        }
        let meters = raw
            .chunks_exact(2)
            .map(|px| u16::from_le_bytes([px[0], px[1]]) as f32 * raw_value_to_meters)
            .collect();
        Ok(Self { w, h, meters })
    }

    /// Constant depth everywhere.
    pub fn filled(w: u32, h: u32, meters: f32) -> Result<Self, DepthError> {
        Ok(Self { w, h, meters: vec![meters; sample_count(w, h)?] })
    }

    pub fn meters(&self) -> &[f32] {
        &self.meters
    }

    pub fn set(&mut self, x: u32, y: u32, meters: f32) {
        if x < self.w && y < self.h {
            self.meters[(y * self.w + x) as usize] = meters;
        }
    }
}

/// `w * h`, as long as every row-major index fits in a u32.
fn sample_count(w: u32, h: u32) -> Result<usize, DepthError> {
    w.checked_mul(h)
        .map(|n| n as usize)
        .ok_or(DepthError::TooLarge { w, h })
}

impl DepthSource for DepthBuffer {
    fn width(&self) -> u32 {
        self.w
    }

    fn height(&self) -> u32 {
        self.h
    }

    fn depth_at(&self, u: f32, v: f32) -> Result<f32, DepthError> {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return Err(DepthError::OutOfRange { u, v });
        }
        if self.w == 0 || self.h == 0 {
            return Err(DepthError::Query("empty depth buffer".into()));
        }

        let x = ((u * self.w as f32) as u32).min(self.w - 1);
        let y = ((v * self.h as f32) as u32).min(self.h - 1);
        Ok(self.meters[(y * self.w + x) as usize])
    }
}
