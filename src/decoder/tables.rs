/// Bar-width convention of a printed symbol
///
/// Some printed sheets still in circulation were produced by a generator that
/// swapped thin and thick bars. Such symbols follow the `Inverted` tables.
/// The polarity is recovered per decode from the head and tail bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Standard ITF widths
    Normal,
    /// Thin and thick swapped
    Inverted,
}

impl Polarity {
    /// Both polarities in the order they are tried when decoding
    pub const ALL: [Polarity; 2] = [Polarity::Normal, Polarity::Inverted];
}

// Index: [digit][bar], 0 = thin, 1 = thick
const NORMAL_ENCODING: [[u8; 5]; 10] = [
    [0, 0, 1, 1, 0], // 0
    [1, 0, 0, 0, 1], // 1
    [0, 1, 0, 0, 1], // 2
    [1, 1, 0, 0, 0], // 3
    [0, 0, 1, 0, 1], // 4
    [1, 0, 1, 0, 0], // 5
    [0, 1, 1, 0, 0], // 6
    [0, 0, 0, 1, 1], // 7
    [1, 0, 0, 1, 0], // 8
    [0, 1, 0, 1, 0], // 9
];

const INVERTED_ENCODING: [[u8; 5]; 10] = [
    [1, 1, 0, 0, 1], // 0
    [0, 1, 1, 1, 0], // 1
    [1, 0, 1, 1, 0], // 2
    [0, 0, 1, 1, 1], // 3
    [1, 1, 0, 1, 0], // 4
    [0, 1, 0, 1, 1], // 5
    [1, 0, 0, 1, 1], // 6
    [1, 1, 1, 0, 0], // 7
    [0, 1, 1, 0, 1], // 8
    [1, 0, 1, 0, 1], // 9
];

// Index: 5-bit pattern, first bar in the most significant bit. -1 = unused.
const NORMAL_DECODING: [i8; 32] = [
    -1, -1, -1, 7, -1, 4, 0, -1, // 00000..00111
    -1, 2, 9, -1, 6, -1, -1, -1, // 01000..01111
    -1, 1, 8, -1, 5, -1, -1, -1, // 10000..10111
    3, -1, -1, -1, -1, -1, -1, -1, // 11000..11111
];

const INVERTED_DECODING: [i8; 32] = [
    -1, -1, -1, -1, -1, -1, -1, 3, // 00000..00111
    -1, -1, -1, 5, -1, 8, 1, -1, // 01000..01111
    -1, -1, -1, 6, -1, 9, 2, -1, // 10000..10111
    -1, 0, 4, -1, 7, -1, -1, -1, // 11000..11111
];

/// Head bars split by color, used when generating bars
pub(crate) const HEAD_BLACK: [u8; 2] = [0, 0];
pub(crate) const HEAD_WHITE: [u8; 2] = [0, 0];

/// Tail bars split by color, used when generating bars
pub(crate) const TAIL_BLACK: [u8; 2] = [1, 0];
pub(crate) const TAIL_WHITE: [u8; 2] = [0, 0];

// Interleaved head/tail as seen by the scanner. The trailing white bar of the
// tail is indistinguishable from the quiet zone, so only three tail bars count.
const NORMAL_FLAT_HEAD: [u8; 4] = [0, 0, 0, 0];
const INVERTED_FLAT_HEAD: [u8; 4] = [1, 1, 1, 1];
const NORMAL_FLAT_TAIL: [u8; 3] = [1, 0, 0];
const INVERTED_FLAT_TAIL: [u8; 3] = [0, 1, 1];

/// Thin/thick pattern of a digit
///
/// # Panics
/// Panics if `digit > 9`.
pub fn forward_pattern(digit: u8, polarity: Polarity) -> [u8; 5] {
    match polarity {
        Polarity::Normal => NORMAL_ENCODING[digit as usize],
        Polarity::Inverted => INVERTED_ENCODING[digit as usize],
    }
}

/// Interleaved head pattern (bar, space, bar, space)
pub fn head_pattern(polarity: Polarity) -> [u8; 4] {
    match polarity {
        Polarity::Normal => NORMAL_FLAT_HEAD,
        Polarity::Inverted => INVERTED_FLAT_HEAD,
    }
}

/// Interleaved tail pattern (bar, space, bar)
pub fn tail_pattern(polarity: Polarity) -> [u8; 3] {
    match polarity {
        Polarity::Normal => NORMAL_FLAT_TAIL,
        Polarity::Inverted => INVERTED_FLAT_TAIL,
    }
}

/// Pack five thin/thick bits into a table index, first bar most significant
pub fn pattern_index(bits: [u8; 5]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}

/// Look up the digit for a 5-bit pattern index
///
/// Returns `None` for the 22 combinations that encode no digit.
pub fn decode(index: u8, polarity: Polarity) -> Option<u8> {
    let table = match polarity {
        Polarity::Normal => &NORMAL_DECODING,
        Polarity::Inverted => &INVERTED_DECODING,
    };
    let digit = *table.get(index as usize)?;
    if digit < 0 { None } else { Some(digit as u8) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_round_trip() {
        for polarity in Polarity::ALL {
            for digit in 0..10u8 {
                let index = pattern_index(forward_pattern(digit, polarity));
                assert_eq!(decode(index, polarity), Some(digit), "{polarity:?} {digit}");
            }
        }
    }

    #[test]
    fn test_every_digit_has_two_thick_bars() {
        for digit in 0..10u8 {
            let thick: u8 = forward_pattern(digit, Polarity::Normal).iter().sum();
            assert_eq!(thick, 2);
        }
    }

    #[test]
    fn test_inverted_is_complement() {
        for digit in 0..10u8 {
            let normal = forward_pattern(digit, Polarity::Normal);
            let inverted = forward_pattern(digit, Polarity::Inverted);
            for i in 0..5 {
                assert_eq!(normal[i] ^ 1, inverted[i]);
            }
        }
        for i in 0..4 {
            assert_eq!(head_pattern(Polarity::Normal)[i] ^ 1, head_pattern(Polarity::Inverted)[i]);
        }
        for i in 0..3 {
            assert_eq!(tail_pattern(Polarity::Normal)[i] ^ 1, tail_pattern(Polarity::Inverted)[i]);
        }
    }

    #[test]
    fn test_unused_patterns() {
        for polarity in Polarity::ALL {
            let valid = (0..32u8).filter(|&i| decode(i, polarity).is_some()).count();
            assert_eq!(valid, 10);
        }
        assert_eq!(decode(0b00000, Polarity::Normal), None);
        assert_eq!(decode(0b11111, Polarity::Inverted), None);
        assert_eq!(decode(32, Polarity::Normal), None);
    }

    #[test]
    fn test_pattern_index_order() {
        assert_eq!(pattern_index([1, 0, 0, 0, 0]), 16);
        assert_eq!(pattern_index([0, 0, 0, 0, 1]), 1);
        assert_eq!(pattern_index([0, 0, 1, 1, 0]), 6);
    }
}
