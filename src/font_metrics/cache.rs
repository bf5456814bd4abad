//! Named fonts shared across renders.

use std::collections::HashMap;

use log::debug;

use super::backend::GlyphBackend;
use super::font::MathFont;
use super::math_table::MathTableError;

/// Decoded fonts by name.
///
/// A font's `MATH` table is decoded once, on registration. Lookups hand
/// out [`MathFont`]s at the requested size that share the decoded data.
#[derive(Debug, Default, Clone)]
pub struct FontCache {
    fonts: HashMap<String, MathFont>,
}

impl FontCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `math_table` and register it with `backend` under `name`,
    /// replacing any font already registered under that name.
    ///
    /// # Errors
    /// The [`MathTableError`] raised while decoding the table.
    pub fn register<B>(&mut self, name: &str, backend: B, math_table: &[u8]) -> Result<(), MathTableError>
    where
        B: GlyphBackend + 'static,
    {
        let font = MathFont::new(name, backend, math_table, 1.0)?;
        self.insert(font);
        Ok(())
    }

    /// Register an already built font under its own name.
    pub fn insert(&mut self, font: MathFont) {
        debug!("registered math font {}", font.name());
        self.fonts.insert(font.name().to_owned(), font);
    }

    /// The font registered under `name`, at `size` points.
    #[must_use]
    pub fn font(&self, name: &str, size: f32) -> Option<MathFont> {
        self.fonts.get(name).map(|font| font.with_size(size))
    }

    /// Returns `true` if a font is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }
}
