//! A math font at a given point size.

use alloc::sync::Arc;

use log::debug;

use super::backend::{BoundingBox, GlyphBackend, GlyphId};
use super::constants::MathConstant;
use super::math_table::{MathTable, MathTableError};
use crate::style::LineStyle;

/// One part of a vertical glyph assembly, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPart {
    /// Glyph drawn for the part.
    pub glyph: GlyphId,
    /// Advance of the part along the growth direction.
    pub full_advance: f32,
    /// Connector length at the bottom of the part.
    pub start_connector_length: f32,
    /// Connector length at the top of the part.
    pub end_connector_length: f32,
    /// Whether the part may be repeated.
    pub is_extender: bool,
}

/// A glyph backend and its decoded `MATH` table, sized in points.
///
/// Cloning is cheap: the backend and the table are shared, and
/// [`MathFont::with_size`] only changes the scale applied on read.
///
/// # Cross-references
/// - Handed out per size by [`super::FontCache`].
/// - Consumed by [`crate::typesetter::layout`].
#[derive(Debug, Clone)]
pub struct MathFont {
    name: Arc<str>,
    size: f32,
    backend: Arc<dyn GlyphBackend>,
    table: Arc<MathTable>,
}

impl MathFont {
    /// Decode `math_table` and pair it with `backend`.
    ///
    /// # Errors
    /// Any [`MathTableError`] raised while decoding the table.
    pub fn new<B>(name: &str, backend: B, math_table: &[u8], size: f32) -> Result<Self, MathTableError>
    where
        B: GlyphBackend + 'static,
    {
        let table = MathTable::parse(math_table)?;
        Ok(Self::from_parts(name, Arc::new(backend), Arc::new(table), size))
    }

    /// Build a font from an already decoded table.
    #[must_use]
    pub fn from_parts(
        name: &str,
        backend: Arc<dyn GlyphBackend>,
        table: Arc<MathTable>,
        size: f32,
    ) -> Self {
        Self {
            name: Arc::from(name),
            size,
            backend,
            table,
        }
    }

    /// A copy at `size` points sharing this font's backend and table.
    #[must_use]
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            name: Arc::clone(&self.name),
            size,
            backend: Arc::clone(&self.backend),
            table: Arc::clone(&self.table),
        }
    }

    /// Cache key of the font.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Point size.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Returns `true` if both fonts read the same decoded table.
    #[must_use]
    pub fn shares_table_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    fn to_points(&self, units: f32) -> f32 {
        units * self.size / f32::from(self.backend.units_per_em().max(1))
    }

    /// `constant` in points, or as a fraction for percent constants.
    #[must_use]
    pub fn constant(&self, constant: MathConstant) -> f32 {
        let raw = self.table.constant(constant) as f32;
        if constant.is_percent() {
            raw / 100.0
        } else {
            self.to_points(raw)
        }
    }

    /// Size of this font's text in `style`: script styles scale down by
    /// the font's script percentages.
    #[must_use]
    pub fn style_size(&self, style: LineStyle) -> f32 {
        match style {
            LineStyle::Display | LineStyle::Text => self.size,
            LineStyle::Script => self.size * self.constant(MathConstant::ScriptPercentScaleDown),
            LineStyle::ScriptScript => {
                self.size * self.constant(MathConstant::ScriptScriptPercentScaleDown)
            }
        }
    }

    /// One math unit (1/18 em) in points.
    #[must_use]
    pub fn mu(&self) -> f32 {
        self.size / 18.0
    }

    /// Minimum delimiter size around a `\atop`-style fraction in text
    /// style. Not part of the `MATH` table; matches TeX's `delim2`.
    #[must_use]
    pub fn fraction_delimiter_size(&self) -> f32 {
        1.01 * self.size
    }

    /// Display-style counterpart of [`Self::fraction_delimiter_size`],
    /// TeX's `delim1`.
    #[must_use]
    pub fn fraction_delimiter_display_style_size(&self) -> f32 {
        2.39 * self.size
    }

    /// Glyph for `ch`, 0 when the font has none.
    #[must_use]
    pub fn glyph_for_char(&self, ch: char) -> GlyphId {
        self.backend.glyph_for_char(ch)
    }

    /// Glyph of the first character of `text`, 0 for empty text.
    #[must_use]
    pub fn glyph_for_first_char(&self, text: &str) -> GlyphId {
        text.chars().next().map_or(0, |ch| self.glyph_for_char(ch))
    }

    /// One glyph per character of `text`.
    #[must_use]
    pub fn glyphs_for_str(&self, text: &str) -> Vec<GlyphId> {
        text.chars()
            .map(|ch| {
                let glyph = self.glyph_for_char(ch);
                if glyph == 0 {
                    debug!("{ch:?} (U+{:04X}) has no glyph in {}", ch as u32, self.name);
                }
                glyph
            })
            .collect()
    }

    /// PostScript name of `glyph`.
    #[must_use]
    pub fn glyph_name(&self, glyph: GlyphId) -> Option<String> {
        self.backend.glyph_name(glyph)
    }

    /// Glyph named `name`, 0 when unknown.
    #[must_use]
    pub fn glyph_for_name(&self, name: &str) -> GlyphId {
        self.backend.glyph_for_name(name)
    }

    /// Advance of `glyph` in points.
    #[must_use]
    pub fn advance(&self, glyph: GlyphId) -> f32 {
        self.to_points(self.backend.advance(glyph) as f32)
    }

    /// Advances of `glyphs` in points.
    #[must_use]
    pub fn advances(&self, glyphs: &[GlyphId]) -> Vec<f32> {
        glyphs.iter().map(|&glyph| self.advance(glyph)).collect()
    }

    /// Ink bounds of `glyph` in points.
    #[must_use]
    pub fn bounding_box(&self, glyph: GlyphId) -> Option<BoundingBox> {
        let scale = self.to_points(1.0);
        self.backend
            .bounding_box(glyph)
            .map(|bbox| bbox.scaled(scale))
    }

    /// Ink bounds of `glyphs` in points.
    #[must_use]
    pub fn bounding_boxes(&self, glyphs: &[GlyphId]) -> Vec<Option<BoundingBox>> {
        glyphs.iter().map(|&glyph| self.bounding_box(glyph)).collect()
    }

    /// Italic correction of `glyph` in points.
    #[must_use]
    pub fn italic_correction(&self, glyph: GlyphId) -> f32 {
        self.to_points(f32::from(self.table.italic_correction(glyph)))
    }

    /// Horizontal point of `glyph` accents are centered on. Glyphs without
    /// a recorded attachment use half their advance.
    #[must_use]
    pub fn top_accent_adjustment(&self, glyph: GlyphId) -> f32 {
        self.table.top_accent_attachment(glyph).map_or_else(
            || self.advance(glyph) / 2.0,
            |value| self.to_points(f32::from(value)),
        )
    }

    /// Vertical variants of `glyph`, smallest first, starting with the
    /// glyph itself when the font lists it.
    #[must_use]
    pub fn vertical_variants(&self, glyph: GlyphId) -> Vec<GlyphId> {
        self.table.vertical_variants(glyph)
    }

    /// Horizontal variants of `glyph`, smallest first.
    #[must_use]
    pub fn horizontal_variants(&self, glyph: GlyphId) -> Vec<GlyphId> {
        self.table.horizontal_variants(glyph)
    }

    /// The first vertical variant of `glyph` with a different name, used
    /// to enlarge operators in display style. `glyph` itself when it has
    /// no such variant.
    #[must_use]
    pub fn larger_glyph(&self, glyph: GlyphId) -> GlyphId {
        let name = self.glyph_name(glyph);
        self.vertical_variants(glyph)
            .into_iter()
            .find(|&variant| self.glyph_name(variant) != name)
            .unwrap_or(glyph)
    }

    /// Vertical assembly of `glyph` in points, if the font defines one.
    #[must_use]
    pub fn vertical_glyph_assembly(&self, glyph: GlyphId) -> Option<Vec<GlyphPart>> {
        let parts = self.table.vertical_assembly(glyph)?;
        Some(
            parts
                .iter()
                .map(|part| GlyphPart {
                    glyph: part.glyph,
                    full_advance: self.to_points(f32::from(part.full_advance)),
                    start_connector_length: self.to_points(f32::from(part.start_connector_length)),
                    end_connector_length: self.to_points(f32::from(part.end_connector_length)),
                    is_extender: part.is_extender(),
                })
                .collect(),
        )
    }

    /// Minimum connector overlap of assembly parts, in points.
    #[must_use]
    pub fn min_connector_overlap(&self) -> f32 {
        self.to_points(f32::from(self.table.min_connector_overlap()))
    }
}
