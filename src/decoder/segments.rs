//! Decoding of a single binarized scanline
//!
//! A line is turned into run lengths, the run lengths into thin/thick bits,
//! and the bits into digit pairs. Any structural mismatch yields an empty
//! [`Code`].

use super::tables::{self, Polarity, head_pattern, pattern_index, tail_pattern};
use crate::models::Code;
use crate::utils::binarization::kth_binarize;
use tracing::trace;

/// Share of thin bars in every ITF symbol, used to seed width clustering
const THIN_FRACTION: f32 = 3.0 / 5.0;

/// Bars before the first digit pair
const HEAD_LEN: usize = 4;
/// Bars after the last digit pair, excluding the final space
const TAIL_LEN: usize = 3;
/// Bars per interleaved digit pair
const PAIR_LEN: usize = 10;

/// Widest thin bar accepted, in estimated modules
const THIN_MAX_MODULES: f32 = 1.8;
/// Narrowest thick bar accepted, in estimated modules
const THICK_MIN_MODULES: f32 = 2.2;

/// Run lengths of a 0/1 line, starting at the first dark (0) run
///
/// The line is closed with one synthetic sample opposite to its last value so
/// the final run terminates. A trailing light run is dropped, so a non-empty
/// result always starts and ends on a dark run.
pub fn segment_widths(binary: &[u8]) -> Vec<usize> {
    let Some(&last) = binary.last() else {
        return Vec::new();
    };

    let mut line = Vec::with_capacity(binary.len() + 1);
    line.extend_from_slice(binary);
    line.push(last ^ 1);

    let mut pos = line.iter().take_while(|&&v| v != 0).count();
    let mut segments = Vec::new();
    while pos + 1 < line.len() {
        let run = line[pos..].iter().take_while(|&&v| v == line[pos]).count();
        segments.push(run);
        pos += run;
    }

    if segments.len() % 2 == 0 {
        segments.pop();
    }
    segments
}

/// Polarity whose head and tail patterns frame `bits`
pub fn match_polarity(bits: &[u8]) -> Option<Polarity> {
    Polarity::ALL
        .into_iter()
        .find(|&p| bits.starts_with(&head_pattern(p)) && bits.ends_with(&tail_pattern(p)))
}

/// True if every run is consistent with a 1:3 module grid
///
/// The module width is estimated from the total run length and the modules
/// the bits imply (1 per thin, 3 per thick bar). Thin runs wider than
/// [`THIN_MAX_MODULES`] or thick runs narrower than [`THICK_MIN_MODULES`]
/// reject the line.
pub fn widths_fit_modules(segments: &[usize], bits: &[u8]) -> bool {
    let total: usize = segments.iter().sum();
    let modules: usize = bits.iter().map(|&b| if b == 1 { 3 } else { 1 }).sum();
    if total == 0 || modules == 0 {
        return false;
    }
    let module = total as f32 / modules as f32;
    segments.iter().zip(bits).all(|(&width, &bit)| {
        let width = width as f32 / module;
        if bit == 1 {
            width >= THICK_MIN_MODULES
        } else {
            width <= THIN_MAX_MODULES
        }
    })
}

/// Decode thin/thick bits of a whole symbol into digits
///
/// Returns an empty code if any 5-bit group encodes no digit.
pub fn decode_bits(bits: &[u8], polarity: Polarity) -> Code {
    let mut code = Code::new();
    let mut i = HEAD_LEN;
    while i + PAIR_LEN - 1 < bits.len() {
        let group = &bits[i..i + PAIR_LEN];
        let black = pattern_index([group[0], group[2], group[4], group[6], group[8]]);
        let white = pattern_index([group[1], group[3], group[5], group[7], group[9]]);
        match (tables::decode(black, polarity), tables::decode(white, polarity)) {
            (Some(a), Some(b)) => {
                code.push_digit(a);
                code.push_digit(b);
            }
            _ => {
                trace!(offset = i, "undecodable digit pattern");
                return Code::new();
            }
        }
        i += PAIR_LEN;
    }
    code
}

/// Decode one binarized scanline (0 = dark, 1 = light)
pub fn decode_line(binary: &[u8]) -> Code {
    let segments = segment_widths(binary);
    if segments.len() % PAIR_LEN != HEAD_LEN + TAIL_LEN {
        trace!(segments = segments.len(), "segment count does not fit head + pairs + tail");
        return Code::new();
    }

    let bits = kth_binarize(&segments, THIN_FRACTION, binary.len() + 1);
    let Some(polarity) = match_polarity(&bits) else {
        trace!("head/tail match neither polarity");
        return Code::new();
    };
    if !widths_fit_modules(&segments, &bits) {
        trace!("bar widths off the module grid");
        return Code::new();
    }

    decode_bits(&bits, polarity)
}
