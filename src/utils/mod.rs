//! Utility functions for scanline processing
//!
//! This module provides the signal-level building blocks of recognition:
//! - Binarization (k-means, quantile threshold, binary median filter)
//! - Rasters (sampleable grayscale images, region cropping)
//! - Sampling (scanline extraction, multi-line averaging)

pub mod binarization;
pub mod raster;
pub mod sampling;
