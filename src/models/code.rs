use super::bar::{Bar, BarSequence, Color};
use crate::decoder::tables::{
    HEAD_BLACK, HEAD_WHITE, Polarity, TAIL_BLACK, TAIL_WHITE, forward_pattern,
};
use crate::error::{ItfError, Result};
use std::fmt;
use std::str::FromStr;

/// Interleaved 2 of 5 code: digits in left-to-right order
///
/// Codes compare lexicographically by their digit sequence, which gives the
/// recognizer's vote tally a deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    digits: Vec<u8>,
}

impl Code {
    /// Create an empty code
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit
    pub fn add_digit(&mut self, digit: u32) -> Result<()> {
        if digit > 9 {
            return Err(ItfError::InvalidDigit(digit));
        }
        self.digits.push(digit as u8);
        Ok(())
    }

    /// Append one digit per character of `s`
    ///
    /// Digits before the first offending character stay appended.
    pub fn add_digits(&mut self, s: &str) -> Result<()> {
        self.digits.reserve(s.len());
        for c in s.chars() {
            let digit = c.to_digit(10).ok_or(ItfError::InvalidCharacter(c))?;
            self.add_digit(digit)?;
        }
        Ok(())
    }

    /// Number of digits
    pub fn size(&self) -> usize {
        self.digits.len()
    }

    /// True if the code holds no digits
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digits as a slice
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Remove all digits
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Standard mod-10 check digit
    ///
    /// Digits at odd 1-based positions weigh 3, the rest weigh 1. A complete
    /// code that ends in its check digit yields 0.
    pub fn mod10_check_sum(&self) -> u8 {
        let (mut odds, mut evens) = (0u32, 0u32);
        for (i, &digit) in self.digits.iter().enumerate() {
            if (i + 1) % 2 == 0 {
                evens += digit as u32;
            } else {
                odds += digit as u32;
            }
        }
        ((10 - (odds * 3 + evens) % 10) % 10) as u8
    }

    /// Append the check digit, padding first so the result has even length
    pub fn add_mod10_check_sum(&mut self) {
        if self.size() % 2 == 0 {
            self.digits.push(0);
        }
        let checksum = self.mod10_check_sum();
        self.digits.push(checksum);
    }

    /// Bars of the printed symbol: head, interleaved digit pairs, tail
    ///
    /// # Panics
    /// Panics if the code has an odd number of digits.
    pub fn bars(&self) -> BarSequence {
        assert!(
            self.digits.len() % 2 == 0,
            "ITF code must have an even number of digits, got {}",
            self.digits.len()
        );

        let mut bars = Vec::with_capacity(8 + self.digits.len() * 5);
        push_interleaved(&mut bars, &HEAD_BLACK, &HEAD_WHITE);
        for pair in self.digits.chunks_exact(2) {
            push_interleaved(
                &mut bars,
                &forward_pattern(pair[0], Polarity::Normal),
                &forward_pattern(pair[1], Polarity::Normal),
            );
        }
        push_interleaved(&mut bars, &TAIL_BLACK, &TAIL_WHITE);

        BarSequence::from_vec(bars)
    }

    /// Digits as ASCII characters without separators
    pub fn string(&self) -> String {
        self.digits.iter().map(|&d| char::from(b'0' + d)).collect()
    }

    /// Append a digit already known to be in range
    pub(crate) fn push_digit(&mut self, digit: u8) {
        debug_assert!(digit < 10);
        self.digits.push(digit);
    }
}

fn push_interleaved(bars: &mut Vec<Bar>, black: &[u8], white: &[u8]) {
    for (&b, &w) in black.iter().zip(white) {
        bars.push(Bar::from_bit(b != 0, Color::Black));
        bars.push(Bar::from_bit(w != 0, Color::White));
    }
}

impl FromStr for Code {
    type Err = ItfError;

    fn from_str(s: &str) -> Result<Self> {
        let mut code = Code::new();
        code.add_digits(s)?;
        Ok(code)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string())
    }
}
