//! Glyph variants and vertical glyph assemblies.

use super::{LayoutError, Typesetter};
use crate::display::Display;
use crate::font_metrics::{GlyphId, GlyphPart};
use crate::types::IndexRange;

/// A glyph with its measured box, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SizedGlyph {
    pub glyph: GlyphId,
    pub ascent: f32,
    pub descent: f32,
    pub width: f32,
}

/// Glyphs and vertical offsets of an assembly, with its total height.
#[derive(Debug, PartialEq)]
struct Assembly {
    glyphs: Vec<GlyphId>,
    offsets: Vec<f32>,
    height: f32,
}

impl Typesetter {
    fn sized_glyph(&self, glyph: GlyphId) -> SizedGlyph {
        let (ascent, descent) = self
            .style_font
            .bounding_box(glyph)
            .map_or((0.0, 0.0), |bbox| (bbox.ascent(), bbox.descent()));
        SizedGlyph {
            glyph,
            ascent,
            descent,
            width: self.style_font.advance(glyph),
        }
    }

    /// The first vertical variant of `glyph` at least `height` tall, or
    /// the largest one.
    pub(super) fn find_glyph(&self, glyph: GlyphId, height: f32) -> SizedGlyph {
        let mut found = self.sized_glyph(glyph);
        for variant in self.style_font.vertical_variants(glyph) {
            found = self.sized_glyph(variant);
            if found.ascent + found.descent >= height {
                break;
            }
        }
        found
    }

    /// The widest horizontal variant of `glyph` not wider than
    /// `max_width`, or the narrowest one when all are wider.
    pub(super) fn find_variant_glyph(&self, glyph: GlyphId, max_width: f32) -> SizedGlyph {
        let mut found: Option<SizedGlyph> = None;
        for variant in self.style_font.horizontal_variants(glyph) {
            let ink_width = self
                .style_font
                .bounding_box(variant)
                .map_or(0.0, |bbox| bbox.width());
            if ink_width > max_width {
                break;
            }
            found = Some(self.sized_glyph(variant));
        }
        found.unwrap_or_else(|| self.sized_glyph(glyph))
    }

    /// Build `glyph` from its vertical assembly at least `height` tall.
    ///
    /// `Ok(None)` when the font has no assembly for the glyph.
    pub(super) fn construct_glyph(&self, glyph: GlyphId, height: f32) -> Result<Option<Display>, LayoutError> {
        let Some(parts) = self.style_font.vertical_glyph_assembly(glyph) else {
            return Ok(None);
        };
        let Some(first) = parts.first() else {
            return Err(LayoutError::EmptyGlyphAssembly { glyph });
        };
        let width = self.style_font.advance(first.glyph);
        let assembly = self.assemble(glyph, &parts, height)?;
        Ok(Some(Display::glyph_construction(
            assembly.glyphs,
            assembly.offsets,
            self.style_font.clone(),
            assembly.height,
            width,
        )))
    }

    /// Repeat the extenders of `parts` until the assembly can span
    /// `height`, then spread the slack evenly over the joints.
    fn assemble(&self, glyph: GlyphId, parts: &[GlyphPart], height: f32) -> Result<Assembly, LayoutError> {
        let min_distance = self.style_font.min_connector_overlap();
        let has_extender = parts.iter().any(|part| part.is_extender);
        let mut previous_min_height = f32::NEG_INFINITY;

        for extenders in 0_usize.. {
            let mut glyphs = Vec::new();
            let mut offsets = Vec::new();
            let mut previous: Option<&GlyphPart> = None;
            let mut min_offset = 0.0;
            let mut max_delta = f32::MAX;

            for part in parts {
                let repeats = if part.is_extender { extenders } else { 1 };
                for _ in 0..repeats {
                    glyphs.push(part.glyph);
                    if let Some(previous) = previous {
                        let max_overlap = previous.end_connector_length.min(part.start_connector_length);
                        let min_offset_delta = previous.full_advance - max_overlap;
                        let max_offset_delta = previous.full_advance - min_distance;
                        max_delta = max_delta.min(max_offset_delta - min_offset_delta);
                        min_offset += min_offset_delta;
                    }
                    offsets.push(min_offset);
                    previous = Some(part);
                }
            }

            let Some(last) = previous else {
                // Only extenders and none repeated yet.
                continue;
            };
            let min_height = min_offset + last.full_advance;
            let max_height = min_height + max_delta * (glyphs.len() - 1) as f32;

            if min_height >= height {
                return Ok(Assembly {
                    glyphs,
                    offsets,
                    height: min_height,
                });
            }
            if height <= max_height {
                let increase = (height - min_height) / (glyphs.len() - 1) as f32;
                for (i, offset) in offsets.iter_mut().enumerate() {
                    *offset += i as f32 * increase;
                }
                let top = offsets.last().copied().unwrap_or_default();
                return Ok(Assembly {
                    glyphs,
                    offsets,
                    height: top + last.full_advance,
                });
            }
            if !has_extender {
                // The fixed parts pulled apart as far as they go.
                let increase = if glyphs.len() > 1 { max_delta } else { 0.0 };
                for (i, offset) in offsets.iter_mut().enumerate() {
                    *offset += i as f32 * increase;
                }
                return Ok(Assembly {
                    glyphs,
                    offsets,
                    height: max_height,
                });
            }
            if min_height <= previous_min_height {
                return Err(LayoutError::DegenerateGlyphAssembly { glyph });
            }
            previous_min_height = min_height;
        }
        Err(LayoutError::DegenerateGlyphAssembly { glyph })
    }

    /// A delimiter glyph at least `height` tall, centered on the math axis.
    ///
    /// Uses the first large enough variant, then the assembly, and falls
    /// back to the largest variant.
    pub(super) fn find_glyph_for_boundary(&self, delimiter: &str, height: f32) -> Result<Display, LayoutError> {
        let Some(ch) = delimiter.chars().next() else {
            return Ok(Display::list(Vec::new(), IndexRange::ZERO));
        };
        let glyph = self.style_font.glyph_for_char(ch);
        if glyph == 0 {
            return Err(LayoutError::MissingGlyph { character: ch });
        }
        let found = self.find_glyph(glyph, height);
        let constructed = if found.ascent + found.descent < height {
            self.construct_glyph(glyph, height)?
        } else {
            None
        };
        let mut display = constructed.unwrap_or_else(|| {
            Display::glyph(
                found.glyph,
                self.style_font.clone(),
                found.ascent,
                found.descent,
                found.width,
                IndexRange::ZERO,
            )
        });
        let shift_down = 0.5 * (display.ascent - display.descent) - self.axis_height();
        display.shift_down(shift_down);
        Ok(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_metrics::testing::test_font;
    use crate::style::LineStyle;

    fn typesetter() -> Typesetter {
        Typesetter::new(&test_font(10.0), LineStyle::Text, false, false)
    }

    #[test]
    fn test_find_glyph_picks_first_tall_enough_variant() {
        let setter = typesetter();
        let paren = setter.style_font.glyph_for_char('(');
        let base = setter.find_glyph(paren, 5.0);
        assert_eq!(base.glyph, paren);
        let taller = setter.find_glyph(paren, 12.0);
        assert_eq!(setter.style_font.glyph_name(taller.glyph).as_deref(), Some("uni0028.v1"));
        let largest = setter.find_glyph(paren, 100.0);
        assert_eq!(setter.style_font.glyph_name(largest.glyph).as_deref(), Some("uni0028.v3"));
    }

    #[test]
    fn test_construct_glyph_reaches_height() {
        let setter = typesetter();
        let paren = setter.style_font.glyph_for_char('(');
        let display = setter.construct_glyph(paren, 40.0).unwrap().unwrap();
        assert!(display.ascent >= 40.0 - 1e-4);
        assert_eq!(display.descent, 0.0);
        let x = setter.style_font.glyph_for_char('x');
        assert!(setter.construct_glyph(x, 40.0).unwrap().is_none());
    }

    #[test]
    fn test_assembly_spreads_slack_over_joints() {
        let setter = typesetter();
        let part = |glyph, is_extender| GlyphPart {
            glyph,
            full_advance: 6.0,
            start_connector_length: 2.0,
            end_connector_length: 2.0,
            is_extender,
        };
        let parts = [part(1, false), part(2, true), part(3, false)];
        // Bottom and top alone span 10pt and stretch to 11.8pt.
        let assembly = setter.assemble(7, &parts, 11.0).unwrap();
        assert_eq!(assembly.glyphs, vec![1, 3]);
        assert!((assembly.height - 11.0).abs() < 1e-4);
        let assembly = setter.assemble(7, &parts, 14.0).unwrap();
        assert_eq!(assembly.glyphs, vec![1, 2, 3]);
        assert!((assembly.height - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_assembly_that_can_not_grow_is_an_error() {
        let setter = typesetter();
        let part = GlyphPart {
            glyph: 2,
            full_advance: 1.0,
            start_connector_length: 1.0,
            end_connector_length: 1.0,
            is_extender: true,
        };
        let parts = [
            GlyphPart {
                is_extender: false,
                ..part
            },
            part,
        ];
        assert_eq!(
            setter.assemble(9, &parts, 50.0),
            Err(LayoutError::DegenerateGlyphAssembly { glyph: 9 })
        );
    }

    #[test]
    fn test_boundary_is_centered_on_axis() {
        let setter = typesetter();
        let display = setter.find_glyph_for_boundary("(", 20.0).unwrap();
        let axis = setter.axis_height();
        assert!(((display.ascent - display.descent) / 2.0 - axis).abs() < 1e-4);
        assert!(display.ascent + display.descent >= 20.0 - 1e-4);
    }

    #[test]
    fn test_variant_glyph_fits_width() {
        let setter = typesetter();
        let hat = setter.style_font.glyph_for_char('\u{0302}');
        assert_eq!(setter.find_variant_glyph(hat, 5.0).glyph, hat);
        let wide = setter.find_variant_glyph(hat, 6.0);
        assert_eq!(setter.style_font.glyph_name(wide.glyph).as_deref(), Some("uni0302.h1"));
        assert_eq!(setter.find_variant_glyph(hat, 1.0).glyph, hat);
    }
}
