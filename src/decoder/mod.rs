//! ITF decoding modules
//!
//! This module contains the decode-side logic:
//! - Encoding tables for both bar-width polarities
//! - Decoding of a single binarized scanline
//! - The statistical recognizer that samples, binarizes and votes
//! - Iteration budget configuration

/// Iteration budget defaults and environment overrides
pub mod config;
/// Statistical recognizer over a barcode raster
pub mod recognizer;
/// Scanline run-length decoding
pub mod segments;
/// ITF symbol tables (digit patterns, head, tail, reverse lookup)
pub mod tables;
