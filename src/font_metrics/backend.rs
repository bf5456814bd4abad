//! The glyph source a [`super::MathFont`] reads glyph metrics from.
//!
//! Loading font files, rasterizing and caching bitmaps belong to the host
//! application. The layout engine only needs the handful of per-glyph
//! queries below, all answered in font design units.

use core::fmt;

/// Glyph index within a font. 0 is the missing glyph (`.notdef`).
pub type GlyphId = u16;

/// Axis-aligned glyph bounds. `y` grows upward from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Left edge.
    pub lower_left_x: f32,
    /// Bottom edge.
    pub lower_left_y: f32,
    /// Right edge.
    pub upper_right_x: f32,
    /// Top edge.
    pub upper_right_y: f32,
}

impl BoundingBox {
    /// Create a box from its corners.
    #[must_use]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            lower_left_x: min_x,
            lower_left_y: min_y,
            upper_right_x: max_x,
            upper_right_y: max_y,
        }
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.upper_right_x - self.lower_left_x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.upper_right_y - self.lower_left_y
    }

    /// Height above the baseline; never negative.
    #[must_use]
    pub fn ascent(&self) -> f32 {
        self.upper_right_y.max(self.lower_left_y).max(0.0)
    }

    /// Depth below the baseline; never negative.
    #[must_use]
    pub fn descent(&self) -> f32 {
        (-self.upper_right_y.min(self.lower_left_y)).max(0.0)
    }

    /// Scale every coordinate by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.lower_left_x * factor,
            self.lower_left_y * factor,
            self.upper_right_x * factor,
            self.upper_right_y * factor,
        )
    }

    /// Returns `true` if the point lies inside or on the box.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.lower_left_x
            && x <= self.upper_right_x
            && y >= self.lower_left_y
            && y <= self.upper_right_y
    }
}

/// Per-glyph queries against a loaded font face.
///
/// Every length is in font design units; [`super::MathFont`] converts to
/// points. Implementations must be deterministic: the same glyph always
/// reports the same metrics.
pub trait GlyphBackend: fmt::Debug + Send + Sync {
    /// Design units per em of the face.
    fn units_per_em(&self) -> u16;

    /// Glyph for a Unicode scalar value, 0 when the face has none.
    fn glyph_for_char(&self, ch: char) -> GlyphId;

    /// PostScript name of `glyph`, if the face records one.
    fn glyph_name(&self, glyph: GlyphId) -> Option<String>;

    /// Glyph with the given PostScript name, 0 when unknown.
    fn glyph_for_name(&self, name: &str) -> GlyphId;

    /// Horizontal advance of `glyph`.
    fn advance(&self, glyph: GlyphId) -> i32;

    /// Ink bounds of `glyph`; `None` for glyphs without outline.
    fn bounding_box(&self, glyph: GlyphId) -> Option<BoundingBox>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascent_and_descent_are_clamped() {
        let above = BoundingBox::new(0.0, 2.0, 5.0, 8.0);
        assert_eq!(above.ascent(), 8.0);
        assert_eq!(above.descent(), 0.0);

        let straddling = BoundingBox::new(0.0, -3.0, 5.0, 4.0);
        assert_eq!(straddling.ascent(), 4.0);
        assert_eq!(straddling.descent(), 3.0);
        assert_eq!(straddling.height(), 7.0);
    }

    #[test]
    fn test_scaled() {
        let bbox = BoundingBox::new(-1.0, -2.0, 3.0, 4.0).scaled(0.5);
        assert_eq!(bbox, BoundingBox::new(-0.5, -1.0, 1.5, 2.0));
        assert_eq!(bbox.width(), 2.0);
        assert!(bbox.contains(0.0, 0.0));
        assert!(!bbox.contains(2.0, 0.0));
    }
}
