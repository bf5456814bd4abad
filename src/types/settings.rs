use bon::bon;

use crate::color::Color;
use crate::style::LineStyle;

/// Default point size used when no size is configured.
pub const DEFAULT_FONT_SIZE: f32 = 20.0;

/// Default font name used as the [`crate::font_metrics::FontCache`] key.
pub const DEFAULT_FONT_NAME: &str = "latinmodern-math";

/// Layout configuration for [`crate::render`].
///
/// All fields have concrete values; use [`Settings::builder`] to construct
/// one with defaults for whatever is not specified.
///
/// # Cross-references
/// - See [`Settings::line_style`] for how `display_mode` selects the
///   starting style.
/// - [`crate::font_metrics::FontCache::font`] resolves `font_name` and
///   `font_size` into a sized font.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Whether the formula is laid out in display style (on its own line)
    /// rather than text style.
    pub display_mode: bool,
    /// Font size in points.
    pub font_size: f32,
    /// Name of the math font to look up in the font cache.
    pub font_name: String,
    /// Color applied to the root display. `None` leaves the choice to the
    /// renderer.
    pub text_color: Option<Color>,
}

#[bon]
impl Settings {
    /// Creates a new [`Settings`] instance from optional configuration values.
    ///
    /// # Default Values
    /// - `display_mode`: `false` (text style)
    /// - `font_size`: `20.0`
    /// - `font_name`: `"latinmodern-math"`
    /// - `text_color`: `None`
    #[must_use]
    #[builder]
    pub fn new(
        /// Display mode (true for display style, false for text style).
        display_mode: Option<bool>,
        /// Font size in points; non-positive values fall back to the
        /// default.
        font_size: Option<f32>,
        /// Font cache key.
        font_name: Option<String>,
        /// Root text color.
        text_color: Option<Color>,
    ) -> Self {
        Self {
            display_mode: display_mode.unwrap_or(false),
            font_size: font_size
                .filter(|size| *size > 0.0)
                .unwrap_or(DEFAULT_FONT_SIZE),
            font_name: font_name.unwrap_or_else(|| DEFAULT_FONT_NAME.to_owned()),
            text_color,
        }
    }

    /// The line style the top-level list is laid out in.
    #[must_use]
    pub const fn line_style(&self) -> LineStyle {
        if self.display_mode {
            LineStyle::Display
        } else {
            LineStyle::Text
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}
