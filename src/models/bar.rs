/// Width class of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thickness {
    /// Narrow bar, one module wide
    Thin,
    /// Wide bar, three modules wide
    Thick,
}

/// Ink color of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Printed bar
    Black,
    /// Space between printed bars
    White,
}

/// Single bar of an Interleaved 2 of 5 symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bar {
    thickness: Thickness,
    color: Color,
}

impl Bar {
    /// Create a bar
    pub fn new(thickness: Thickness, color: Color) -> Self {
        Self { thickness, color }
    }

    /// Create a bar from a pattern bit (`true` = thick)
    pub(crate) fn from_bit(thick: bool, color: Color) -> Self {
        let thickness = if thick {
            Thickness::Thick
        } else {
            Thickness::Thin
        };
        Self { thickness, color }
    }

    /// Width class
    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    /// Ink color
    pub fn color(&self) -> Color {
        self.color
    }

    /// True for wide bars
    pub fn is_thick(&self) -> bool {
        self.thickness == Thickness::Thick
    }

    /// True for narrow bars
    pub fn is_thin(&self) -> bool {
        self.thickness == Thickness::Thin
    }

    /// True for printed bars
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    /// True for spaces
    pub fn is_white(&self) -> bool {
        self.color == Color::White
    }

    /// Width in modules (1 for thin, 3 for thick)
    pub fn modules(&self) -> usize {
        match self.thickness {
            Thickness::Thin => 1,
            Thickness::Thick => 3,
        }
    }
}

/// Bars of a symbol in left-to-right order
///
/// Built once by [`Code::bars`](crate::Code::bars) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BarSequence {
    bars: Vec<Bar>,
}

impl BarSequence {
    pub(crate) fn from_vec(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// True if there are no bars
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Iterate the bars left to right
    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// Bars as a slice
    pub fn as_slice(&self) -> &[Bar] {
        &self.bars
    }

    /// Total width in modules
    pub fn modules(&self) -> usize {
        self.bars.iter().map(Bar::modules).sum()
    }
}

impl FromIterator<Bar> for BarSequence {
    fn from_iter<I: IntoIterator<Item = Bar>>(iter: I) -> Self {
        Self {
            bars: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BarSequence {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
