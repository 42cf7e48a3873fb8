//! Statistical ITF recognizer
//!
//! Every iteration averages a random bundle of left-to-right scanlines, crops
//! the quiet zones, and tries two binarizations of the result: k-means first,
//! then a randomized quantile threshold followed by a median filter. Each
//! successful decode casts one vote; the code with most votes wins.

use super::segments::decode_line;
use crate::debug::{TraceImage, debug_trace_path};
use crate::error::{ItfError, Result};
use crate::models::{Code, Point};
use crate::utils::binarization::{
    intensity_binarize, median_filter, quantile_threshold, threshold_binarize,
};
use crate::utils::raster::Raster;
use crate::utils::sampling::{LineAccumulator, scan_line};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Smallest raster side the recognizer accepts
pub const MIN_RASTER_SIDE: usize = 5;

/// Scanline bundle size bound at iteration 0, widened by one every 4 iterations
const BASE_LINE_COUNT: u32 = 16;

/// Reusable per-call buffers
#[derive(Default)]
struct ScanBuffers {
    scan: Vec<u8>,
    line: Vec<u8>,
    accumulator: LineAccumulator,
}

/// Interleaved 2 of 5 recognizer over a rectified barcode raster
///
/// The raster must contain one symbol running left to right across most of
/// its width.
///
/// Scanlines of one bundle can differ in length by a sample; each position
/// of the averaged line is divided by the number of lines that reached it,
/// not by the bundle size.
///
/// Rasters only a few rows tall (under about 12) give averaging little to
/// work with. On pure noise they yield a spurious code in a few percent of
/// calls; taller rasters do not.
pub struct Recognizer<'a, R: Raster + ?Sized> {
    raster: &'a R,
}

impl<'a, R: Raster + ?Sized> Recognizer<'a, R> {
    /// Create a recognizer; fails for rasters smaller than 5x5
    pub fn new(raster: &'a R) -> Result<Self> {
        let (width, height) = (raster.width(), raster.height());
        if width < MIN_RASTER_SIDE || height < MIN_RASTER_SIDE {
            return Err(ItfError::RasterTooSmall { width, height });
        }
        Ok(Self { raster })
    }

    /// Recognize using the thread-local random generator
    ///
    /// See [`Recognizer::recognize_with_rng`].
    pub fn recognize(&self, min_iterations: u32, max_iterations: u32) -> Code {
        self.recognize_with_rng(min_iterations, max_iterations, &mut rand::rng())
    }

    /// Recognize with an explicit random source
    ///
    /// Runs at least `min_iterations` iterations, and keeps going up to
    /// `max_iterations` while no iteration has decoded anything. Returns the
    /// most voted code, or an empty code if nothing decoded. Among codes with
    /// equal votes the lexicographically smallest wins.
    ///
    /// # Panics
    /// Panics unless `0 < min_iterations <= max_iterations`.
    pub fn recognize_with_rng<G: Rng + ?Sized>(
        &self,
        min_iterations: u32,
        max_iterations: u32,
        rng: &mut G,
    ) -> Code {
        assert!(
            min_iterations > 0 && min_iterations <= max_iterations,
            "iteration bounds must satisfy 0 < min <= max, got {min_iterations}..{max_iterations}"
        );

        let mut votes: BTreeMap<Code, u32> = BTreeMap::new();
        let mut buffers = ScanBuffers::default();
        let mut trace_image = debug_trace_path().map(|_| TraceImage::new(max_iterations));

        let mut i = 0u32;
        while i < min_iterations || (i < max_iterations && votes.is_empty()) {
            if let Some(code) = self.iterate(i, rng, &mut buffers, trace_image.as_mut()) {
                *votes.entry(code).or_insert(0) += 1;
            }
            i += 1;
        }

        if let (Some(image), Some(path)) = (&trace_image, debug_trace_path()) {
            if let Err(err) = image.save(path) {
                warn!(path = %path.display(), %err, "failed to write recognition trace");
            }
        }

        let result = elect(&votes);
        debug!(
            iterations = i,
            candidates = votes.len(),
            code = %result,
            "recognition finished"
        );
        result
    }

    /// One sampling/decoding round; `Some` casts a vote
    fn iterate<G: Rng + ?Sized>(
        &self,
        iteration: u32,
        rng: &mut G,
        buffers: &mut ScanBuffers,
        mut trace_image: Option<&mut TraceImage>,
    ) -> Option<Code> {
        let line_count = rng.random_range(1..BASE_LINE_COUNT + iteration / 4);
        self.average_scanlines(line_count, rng, buffers);
        if let Some(image) = trace_image.as_deref_mut() {
            image.gray_row(iteration as usize, &buffers.line);
        }

        let line = &mut buffers.line;
        crop_line(line);
        if line.is_empty() {
            trace!(iteration, "crop consumed the whole scanline");
            return None;
        }

        let code = decode_line(&intensity_binarize(line));
        if !code.is_empty() {
            debug!(iteration, line_count, code = %code, "decoded with k-means binarization");
            return Some(code);
        }

        // Print defects erode black more often than white, so the dark share
        // is drawn from [50%, 70%).
        let percent = rng.random_range(50..70);
        let threshold = quantile_threshold(line, percent);
        let mut binary = threshold_binarize(line, threshold);
        let window = 3 + 2 * rng.random_range(0..3usize);
        median_filter(&mut binary, window);
        if let Some(image) = trace_image {
            image.binary_row(iteration as usize, &binary);
        }

        let code = decode_line(&binary);
        if code.is_empty() {
            trace!(iteration, percent, window, "threshold binarization failed");
            None
        } else {
            debug!(iteration, percent, window, code = %code, "decoded with threshold binarization");
            Some(code)
        }
    }

    /// Average `line_count` random left-edge to right-edge scanlines
    fn average_scanlines<G: Rng + ?Sized>(&self, line_count: u32, rng: &mut G, buffers: &mut ScanBuffers) {
        let width = self.raster.width();
        let height = self.raster.height();

        buffers.accumulator.clear();
        for _ in 0..line_count {
            let start = Point::new(0.0, rng.random_range(0..height) as f32);
            let end = Point::new((width - 1) as f32, rng.random_range(0..height) as f32);
            let step = 0.5 * start.distance(&end) / width as f32;
            scan_line(self.raster, start, end, step, &mut buffers.scan);
            buffers.accumulator.add(&buffers.scan);
        }
        buffers.accumulator.average_into(&mut buffers.line);
    }
}

/// Strip the light runs at both ends of a scanline
///
/// Empties the line if nothing dark remains.
pub fn crop_line(line: &mut Vec<u8>) {
    let binary = intensity_binarize(line);
    let left = binary.iter().take_while(|&&v| v == 1).count();
    let right = binary.iter().rev().take_while(|&&v| v == 1).count();

    if left + right >= line.len() {
        line.clear();
    } else {
        line.truncate(line.len() - right);
        line.drain(..left);
    }
}

/// Most voted code; ties go to the smallest code
fn elect(votes: &BTreeMap<Code, u32>) -> Code {
    let mut best: Option<(&Code, u32)> = None;
    for (code, &count) in votes {
        if best.is_none_or(|(_, max)| count > max) {
            best = Some((code, count));
        }
    }
    best.map(|(code, _)| code.clone()).unwrap_or_default()
}
