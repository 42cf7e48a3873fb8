//! Grayscale rasters the recognizer can sample
//!
//! The recognizer only needs dimensions, an inside test and interpolated
//! point sampling, so any rectified barcode image can be plugged in.

use crate::error::{ItfError, Result};
use image::GrayImage;

/// Sampleable grayscale raster
pub trait Raster {
    /// Width in pixels
    fn width(&self) -> usize;

    /// Height in pixels
    fn height(&self) -> usize;

    /// Intensity at integer pixel coordinates
    fn pixel(&self, x: usize, y: usize) -> u8;

    /// True if `(x, y)` lies within the pixel grid
    fn is_inside(&self, x: f32, y: f32) -> bool {
        if self.width() == 0 || self.height() == 0 {
            return false;
        }
        let max_x = self.width().saturating_sub(1) as f32;
        let max_y = self.height().saturating_sub(1) as f32;
        x >= 0.0 && y >= 0.0 && x <= max_x && y <= max_y
    }

    /// Bilinear-interpolated intensity, clamped to the border
    fn sample(&self, x: f32, y: f32) -> u8 {
        let max_x = self.width().saturating_sub(1);
        let max_y = self.height().saturating_sub(1);
        let x = x.clamp(0.0, max_x as f32);
        let y = y.clamp(0.0, max_y as f32);

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(max_x);
        let y1 = (y0 + 1).min(max_y);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let top = self.pixel(x0, y0) as f32 * (1.0 - fx) + self.pixel(x1, y0) as f32 * fx;
        let bottom = self.pixel(x0, y1) as f32 * (1.0 - fx) + self.pixel(x1, y1) as f32 * fx;
        (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8
    }
}

impl Raster for GrayImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn pixel(&self, x: usize, y: usize) -> u8 {
        self.get_pixel(x as u32, y as u32)[0]
    }
}

/// Borrowed row-major grayscale buffer
#[derive(Debug, Clone, Copy)]
pub struct GrayView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> GrayView<'a> {
    /// Wrap `data`, which must hold at least `width * height` bytes
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Option<Self> {
        if data.len() < width * height {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }
}

impl Raster for GrayView<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Copy a barcode region out of a larger image
///
/// A zero `width` or `height` extends the region to the image edge.
pub fn crop_region(image: &GrayImage, x: u32, y: u32, width: u32, height: u32) -> Result<GrayImage> {
    let (image_width, image_height) = image.dimensions();
    if x >= image_width || y >= image_height {
        return Err(ItfError::RegionOutOfBounds);
    }
    let width = if width == 0 { image_width - x } else { width };
    let height = if height == 0 { image_height - y } else { height };
    if x.checked_add(width).is_none_or(|right| right > image_width)
        || y.checked_add(height).is_none_or(|bottom| bottom > image_height)
    {
        return Err(ItfError::RegionOutOfBounds);
    }
    Ok(image::imageops::crop_imm(image, x, y, width, height).to_image())
}
