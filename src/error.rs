//! Error types shared by the encoder, the recognizer front ends and the tools

use thiserror::Error;

/// Errors produced by this crate
///
/// Decode failures inside the recognizer are not errors: they surface as an
/// empty [`Code`](crate::Code). Only the checked front ends turn an empty
/// result into [`ItfError::NotFound`].
#[derive(Debug, Error)]
pub enum ItfError {
    /// A digit value outside `0..=9`
    #[error("invalid digit {0}, expected a value in 0..=9")]
    InvalidDigit(u32),
    /// A non-digit character in a digit string
    #[error("non-digit character {0:?} in code")]
    InvalidCharacter(char),
    /// The raster handed to the recognizer is smaller than 5x5
    #[error("raster is {width}x{height}, recognition needs at least 5x5")]
    RasterTooSmall {
        /// Raster width in pixels
        width: usize,
        /// Raster height in pixels
        height: usize,
    },
    /// A barcode region that does not fit inside the image
    #[error("barcode region lies outside the image boundaries")]
    RegionOutOfBounds,
    /// Recognition exhausted its iteration budget without a single decode
    #[error("could not recognize barcode")]
    NotFound,
    /// A recognized code whose mod-10 residue is not zero
    #[error("wrong checksum: {checksum} instead of 0 for barcode {code}")]
    ChecksumMismatch {
        /// Recognized digits
        code: String,
        /// Residue reported by `mod10_check_sum`
        checksum: u8,
    },
    /// Image loading or saving failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Crate-wide result alias
pub type Result<T, E = ItfError> = std::result::Result<T, E>;
