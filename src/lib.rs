//! ITF barcode - Interleaved 2 of 5 encoding and recognition
//!
//! Encodes digit sequences into ITF bar patterns and recognizes them back from
//! noisy, slightly skewed scans. Recognition relies on repeated random
//! scanline sampling, two independent binarizations and majority voting, and
//! reads both the standard symbols and the legacy ones printed with thin and
//! thick bars swapped.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// ITF decoding (encoding tables, scanline decoding, statistical recognizer)
pub mod decoder;
/// Error type shared by the crate
pub mod error;
/// Core data structures (Bar, BarSequence, Code, Point)
pub mod models;
/// Image IO and bar rendering helpers
pub mod tools;
/// Utility functions (binarization, rasters, scanline sampling)
pub mod utils;

mod debug;

pub use decoder::config::RecognizerConfig;
pub use decoder::recognizer::Recognizer;
pub use decoder::tables::Polarity;
pub use error::{ItfError, Result};
pub use models::{Bar, BarSequence, Code, Color, Thickness};
pub use utils::raster::{GrayView, Raster};

use image::GrayImage;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Recognize the barcode filling `raster`
///
/// Returns an empty [`Code`] when nothing could be decoded within the
/// configured iteration budget.
pub fn recognize<R: Raster + ?Sized>(raster: &R, config: &RecognizerConfig) -> Result<Code> {
    let recognizer = Recognizer::new(raster)?;
    Ok(recognizer.recognize(config.min_iterations, config.max_iterations))
}

/// Recognize and reject failures
///
/// An empty result becomes [`ItfError::NotFound`]. With `verify_checksum`,
/// a code whose mod-10 residue is not zero becomes
/// [`ItfError::ChecksumMismatch`].
pub fn recognize_checked<R: Raster + ?Sized>(
    raster: &R,
    config: &RecognizerConfig,
    verify_checksum: bool,
) -> Result<Code> {
    let code = recognize(raster, config)?;
    verify_code(code, verify_checksum)
}

/// Turn an empty code into [`ItfError::NotFound`] and, with
/// `verify_checksum`, a non-zero mod-10 residue into
/// [`ItfError::ChecksumMismatch`]
pub fn verify_code(code: Code, verify_checksum: bool) -> Result<Code> {
    if code.is_empty() {
        return Err(ItfError::NotFound);
    }
    if verify_checksum {
        let checksum = code.mod10_check_sum();
        if checksum != 0 {
            return Err(ItfError::ChecksumMismatch {
                code: code.string(),
                checksum,
            });
        }
    }
    Ok(code)
}

/// Recognize many barcode images in parallel
///
/// Image `i` is processed with its own `ChaCha8Rng` seeded with `seed + i`,
/// so results do not depend on thread scheduling.
pub fn recognize_batch(images: &[GrayImage], config: &RecognizerConfig, seed: u64) -> Vec<Result<Code>> {
    images
        .par_iter()
        .enumerate()
        .map(|(i, image)| {
            let recognizer = Recognizer::new(image)?;
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
            Ok(recognizer.recognize_with_rng(config.min_iterations, config.max_iterations, &mut rng))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::render_code;

    #[test]
    fn test_recognize_rendered_code() {
        let code: Code = "31415926".parse().unwrap();
        let image = render_code(&code, 2, 30);
        let config = RecognizerConfig::new(1, 32);
        assert_eq!(recognize(&image, &config).unwrap(), code);
    }

    #[test]
    fn test_recognize_from_gray_view() {
        let code: Code = "2718".parse().unwrap();
        let image = render_code(&code, 2, 20);
        let (width, height) = image.dimensions();
        let raw = image.into_raw();
        let view = GrayView::new(&raw, width as usize, height as usize).unwrap();
        assert_eq!(recognize(&view, &RecognizerConfig::new(1, 32)).unwrap(), code);
    }

    #[test]
    fn test_recognize_too_small() {
        let image = GrayImage::new(3, 3);
        assert!(matches!(
            recognize(&image, &RecognizerConfig::new(1, 1)),
            Err(ItfError::RasterTooSmall { .. })
        ));
    }

    #[test]
    fn test_verify_code() {
        assert!(matches!(verify_code(Code::new(), false), Err(ItfError::NotFound)));

        let good: Code = "1236".parse().unwrap();
        assert_eq!(verify_code(good.clone(), true).unwrap(), good);

        let bad: Code = "1234".parse().unwrap();
        assert!(matches!(
            verify_code(bad.clone(), true),
            Err(ItfError::ChecksumMismatch { checksum: 2, .. })
        ));
        assert_eq!(verify_code(bad.clone(), false).unwrap(), bad);
    }

    #[test]
    fn test_recognize_checked() {
        let mut code: Code = "4711".parse().unwrap();
        code.add_mod10_check_sum();
        let image = render_code(&code, 2, 24);
        let config = RecognizerConfig::new(2, 32);
        assert_eq!(recognize_checked(&image, &config, true).unwrap(), code);
    }

    #[test]
    fn test_recognize_batch_is_ordered() {
        let codes: Vec<Code> = ["10", "2345", "678901"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let mut images: Vec<GrayImage> = codes.iter().map(|c| render_code(c, 2, 20)).collect();
        images.push(GrayImage::new(2, 2));

        let results = recognize_batch(&images, &RecognizerConfig::new(1, 32), 99);
        assert_eq!(results.len(), 4);
        for (result, code) in results.iter().zip(&codes) {
            assert_eq!(result.as_ref().unwrap(), code);
        }
        assert!(matches!(results[3], Err(ItfError::RasterTooSmall { .. })));
    }
}
