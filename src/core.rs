//! Main entry point: LaTeX in, positioned display tree out

use log::debug;
use thiserror::Error;

use crate::display::Display;
use crate::font_metrics::FontCache;
use crate::parser::build;
use crate::symbols::SymbolTable;
use crate::typesetter::{LayoutError, layout};
use crate::types::{ParseError, Settings};

/// Errors of the [`render`] pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The input is not valid LaTeX math.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed list could not be laid out.
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
    /// No font is registered under the configured name.
    #[error("no math font named {name:?} is registered")]
    UnknownFont {
        /// The requested font name.
        name: String,
    },
}

/// Parse, finalize and lay out `latex`.
///
/// The font is looked up in `fonts` by `settings.font_name` at
/// `settings.font_size`. The root display starts at the origin and carries
/// `settings.text_color`.
pub fn render(
    symbols: &SymbolTable,
    fonts: &FontCache,
    latex: &str,
    settings: &Settings,
) -> Result<Display, RenderError> {
    let font = fonts
        .font(&settings.font_name, settings.font_size)
        .ok_or_else(|| RenderError::UnknownFont {
            name: settings.font_name.clone(),
        })?;
    let list = build(symbols, latex)?;
    debug!("laying out {} atoms of {latex:?}", list.len());
    let mut display = layout(&list, &font, settings.line_style())?;
    display.set_text_color(settings.text_color);
    Ok(display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::display::DisplayKind;
    use crate::font_metrics::testing::test_font;
    use crate::types::ParseErrorKind;

    fn fonts() -> FontCache {
        let mut fonts = FontCache::new();
        fonts.insert(test_font(1.0));
        fonts
    }

    fn settings() -> Settings {
        Settings::builder().font_name("test-math".to_owned()).font_size(10.0).build()
    }

    #[test]
    fn test_render_lays_out_formula() {
        let symbols = SymbolTable::new();
        let display = render(&symbols, &fonts(), r"\frac{a}{b}", &settings()).unwrap();
        assert_eq!(display.children().len(), 1);
        assert!(matches!(display.children()[0].kind, DisplayKind::Fraction(_)));
    }

    #[test]
    fn test_render_applies_root_color() {
        let symbols = SymbolTable::new();
        let settings = Settings::builder()
            .font_name("test-math".to_owned())
            .text_color(Color::BLACK)
            .build();
        let display = render(&symbols, &fonts(), "x+1", &settings).unwrap();
        assert_eq!(display.text_color(), Some(Color::BLACK));
        assert_eq!(display.children()[0].text_color(), Some(Color::BLACK));
    }

    #[test]
    fn test_display_mode_enlarges_operators() {
        let symbols = SymbolTable::new();
        let text = render(&symbols, &fonts(), r"\sum", &settings()).unwrap();
        let display_settings = Settings {
            display_mode: true,
            ..settings()
        };
        let display = render(&symbols, &fonts(), r"\sum", &display_settings).unwrap();
        assert!(display.ascent + display.descent > text.ascent + text.descent);
    }

    #[test]
    fn test_render_reports_parse_errors() {
        let symbols = SymbolTable::new();
        let err = render(&symbols, &fonts(), r"\frac{a}{", &settings()).unwrap_err();
        let RenderError::Parse(err) = err else {
            panic!("expected a parse error, got {err}");
        };
        assert!(matches!(*err.kind, ParseErrorKind::MismatchedBraces));
    }

    #[test]
    fn test_render_needs_registered_font() {
        let symbols = SymbolTable::new();
        let err = render(&symbols, &FontCache::new(), "x", &Settings::default()).unwrap_err();
        assert!(matches!(&err, RenderError::UnknownFont { name } if name == "latinmodern-math"));
    }
}
