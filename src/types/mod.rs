//! Core type definitions shared by the parser, the math-list model and the
//! typesetter.

use core::fmt;
use core::ops::Add;

use strum::{AsRefStr, Display, EnumCount, EnumIter};

mod parse_error;
pub use parse_error::{ParseError, ParseErrorKind};

mod settings;
pub use settings::{DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE, Settings};

/// A half-open range of positions in the source math list.
///
/// Every atom of a finalized list carries one. For fused atoms the range
/// spans all of the fused constituents, so that a display built from the
/// atom can be traced back to the characters that produced it.
///
/// # Cross-references
/// - Assigned by [`crate::math_list::MathList::finalized`].
/// - Carried by [`crate::display::Display::range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexRange {
    /// First index covered by the range.
    pub location: usize,
    /// Number of indices covered.
    pub length: usize,
}

impl IndexRange {
    /// The empty range at the origin, used to mark "not yet assigned".
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new range.
    #[must_use]
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// One past the last covered index.
    #[must_use]
    pub const fn max_range(&self) -> usize {
        self.location + self.length
    }

    /// Returns `true` for the unassigned origin range.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.location == 0 && self.length == 0
    }

    /// The smallest range covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let location = self.location.min(other.location);
        let end = self.max_range().max(other.max_range());
        Self::new(location, end - location)
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.location, self.length)
    }
}

/// Font style applied to the characters of an atom.
///
/// Styles are set with commands such as `\mathbf` or `\mathcal` and are
/// resolved into Unicode Mathematical Alphanumeric Symbols by
/// [`crate::wide_character::change_font`] when the list is typeset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumCount, AsRefStr, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum FontStyle {
    /// Math italic for letters, upright for digits and capital Greek.
    #[default]
    Default,
    /// Upright roman.
    Roman,
    /// Bold upright.
    Bold,
    /// Calligraphic (script) capitals.
    Caligraphic,
    /// Monospace.
    Typewriter,
    /// Italic, including digits and capital Greek.
    Italic,
    /// Sans-serif upright.
    SansSerif,
    /// Fraktur (blackletter).
    Fraktur,
    /// Double-struck (blackboard bold).
    Blackboard,
    /// Bold italic.
    BoldItalic,
}

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ColumnAlignment {
    /// Flush left.
    Left,
    /// Centered in the column.
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// A point in typesetting space, in points. `y` grows upward from the
/// baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point moved by `dx` and `dy`.
    #[must_use]
    pub const fn translated(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.translated(other.x, other.y)
    }
}
