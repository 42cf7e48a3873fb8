//! Scanline extraction and multi-line averaging

use super::raster::Raster;
use crate::models::Point;

/// Sample `raster` along the segment `start -> end`
///
/// Samples are taken every `step` pixels from `start`, excluding `end`, with a
/// single sample for a degenerate segment.
pub fn scan_line<R: Raster + ?Sized>(raster: &R, start: Point, end: Point, step: f32, out: &mut Vec<u8>) {
    debug_assert!(raster.is_inside(start.x, start.y) && raster.is_inside(end.x, end.y));
    debug_assert!(step > 0.0);

    out.clear();
    let length = start.distance(&end);
    let mut t = 0.0f32;
    loop {
        let p = start.towards(&end, t);
        out.push(raster.sample(p.x, p.y));
        t += step;
        if t >= length {
            break;
        }
    }
}

/// Elementwise average of scanlines of possibly different lengths
///
/// Lines are aligned at index 0. Each index is divided by the number of
/// lines that reached it.
#[derive(Debug, Default, Clone)]
pub struct LineAccumulator {
    sums: Vec<u32>,
    counts: Vec<u32>,
}

impl LineAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all accumulated lines, keeping capacity
    pub fn clear(&mut self) {
        self.sums.clear();
        self.counts.clear();
    }

    /// Add one scanline
    pub fn add(&mut self, line: &[u8]) {
        if self.sums.len() < line.len() {
            self.sums.resize(line.len(), 0);
            self.counts.resize(line.len(), 0);
        }
        for (k, &value) in line.iter().enumerate() {
            self.sums[k] += value as u32;
            self.counts[k] += 1;
        }
    }

    /// Averaged line; each index is divided by its own contribution count
    pub fn average_into(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.sums
                .iter()
                .zip(&self.counts)
                .map(|(&sum, &count)| (sum / count.max(1)) as u8),
        );
    }
}
