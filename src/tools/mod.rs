use crate::error::Result;
use crate::models::{BarSequence, Code};
use image::{GrayImage, Luma};
use std::path::Path;

/// Quiet zone on each side of a rendered symbol, in thin-bar widths
pub const QUIET_ZONE_MODULES: u32 = 10;

/// Load an image as 8-bit grayscale.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    Ok(image::open(path)?.to_luma8())
}

/// Draw black bars on white, `bar_width` pixels per thin bar.
///
/// Thick bars are three thin widths; a quiet zone of
/// [`QUIET_ZONE_MODULES`] thin widths is left on both sides.
pub fn render_bars(bars: &BarSequence, bar_width: u32, bar_height: u32) -> GrayImage {
    let bar_width = bar_width.max(1);
    let modules = bars.modules() as u32 + 2 * QUIET_ZONE_MODULES;
    let mut image = GrayImage::from_pixel(modules * bar_width, bar_height.max(1), Luma([255]));

    let mut x = QUIET_ZONE_MODULES * bar_width;
    for bar in bars {
        let w = bar.modules() as u32 * bar_width;
        if bar.is_black() {
            for px in x..x + w {
                for y in 0..image.height() {
                    image.put_pixel(px, y, Luma([0]));
                }
            }
        }
        x += w;
    }
    image
}

/// Build an encodable code from user digits.
///
/// With `checksum` the mod-10 check digit is appended (padding first so the
/// total length is even); otherwise an odd-length code gets a trailing `0`.
pub fn complete_code(digits: &str, checksum: bool) -> Result<Code> {
    let mut code: Code = digits.parse()?;
    if checksum {
        code.add_mod10_check_sum();
    } else if code.size() % 2 == 1 {
        code.add_digit(0)?;
    }
    Ok(code)
}

/// Render a code with the default geometry of the encode command.
pub fn render_code(code: &Code, bar_width: u32, bar_height: u32) -> GrayImage {
    render_bars(&code.bars(), bar_width, bar_height)
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Compute min/max/avg for grayscale values.
pub fn grayscale_stats(gray: &[u8]) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if gray.is_empty() {
        0
    } else {
        (sum / gray.len() as u64) as u8
    };
    GrayStats { min, max, avg }
}
