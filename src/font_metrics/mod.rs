//! Font metrics: the OpenType `MATH` table and sized math fonts
//!
//! A [`GlyphBackend`] supplies per-glyph metrics, [`MathTable`]
//! decodes the layout constants and glyph constructions of the font, and
//! [`MathFont`] combines the two at a point size.

mod backend;
mod cache;
mod constants;
mod font;
mod math_table;
#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BoundingBox, GlyphBackend, GlyphId};
pub use cache::FontCache;
pub use constants::{MathConstant, RecordFormat};
pub use font::{GlyphPart, MathFont};
pub use math_table::{GlyphConstruction, GlyphPartRecord, MathTable, MathTableError};
