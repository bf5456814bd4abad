//! Large operators and their limits (TeXbook rules 13 and 13a).

use super::{LayoutError, Typesetter};
use crate::display::{Display, LargeOpLimitsDisplay, LinePosition, TextRun};
use crate::font_metrics::MathConstant;
use crate::math_list::Atom;
use crate::style::LineStyle;

impl Typesetter {
    /// Lay out a large operator at the cursor, with its limits or scripts.
    pub(super) fn make_large_op(&mut self, atom: &Atom, has_limits: bool) -> Result<(), LayoutError> {
        let limits = has_limits && self.style == LineStyle::Display;
        let mut chars = atom.nucleus.chars();
        let (mut display, delta) = match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                let mut glyph = self.style_font.glyph_for_char(ch);
                if self.style == LineStyle::Display && glyph != 0 {
                    glyph = self.style_font.larger_glyph(glyph);
                }
                let delta = self.style_font.italic_correction(glyph);
                let (ascent, descent) = self
                    .style_font
                    .bounding_box(glyph)
                    .map_or((0.0, 0.0), |bbox| (bbox.ascent(), bbox.descent()));
                let mut width = self.style_font.advance(glyph);
                if atom.subscript().is_some() && !limits {
                    // The subscript tucks under the italic overhang.
                    width -= delta;
                }
                let mut display = Display::glyph(
                    glyph,
                    self.style_font.clone(),
                    ascent,
                    descent,
                    width,
                    atom.index_range,
                );
                // Center on the math axis.
                display.shift_down(0.5 * (ascent - descent) - self.axis_height());
                (display, delta)
            }
            // Named operators such as `\sin` are set as text.
            _ => {
                let glyphs = self.style_font.glyphs_for_str(&atom.nucleus);
                let advances = self.style_font.advances(&glyphs);
                let run = TextRun {
                    text: atom.nucleus.clone(),
                    glyphs,
                    advances,
                    font: self.style_font.clone(),
                };
                (Display::text_run(run, atom.index_range), 0.0)
            }
        };

        if !atom.has_scripts() {
            self.push_at_cursor(display);
            return Ok(());
        }
        if limits {
            let limits_display = self.add_limits(atom, display, delta)?;
            self.push_at_cursor(limits_display);
            return Ok(());
        }
        display.has_script = true;
        let index = self.push_at_cursor(display);
        self.make_scripts(atom, Some(index), delta)
    }

    /// Stack the scripts of `atom` above and below `nucleus`.
    fn add_limits(&self, atom: &Atom, nucleus: Display, delta: f32) -> Result<Display, LayoutError> {
        let script_style = self.style.script();
        let index = Some(atom.index_range.location);
        let mut upper_limit_gap = 0.0;
        let mut lower_limit_gap = 0.0;

        let upper_limit = match atom.superscript() {
            Some(list) => {
                let mut upper = self.sub_line(list, script_style, self.cramped, false)?;
                upper.set_line_position(LinePosition::Superscript, index);
                upper_limit_gap = f32::max(
                    self.constant(MathConstant::UpperLimitGapMin),
                    self.constant(MathConstant::UpperLimitBaselineRiseMin) - upper.descent,
                );
                Some(upper)
            }
            None => None,
        };
        let lower_limit = match atom.subscript() {
            Some(list) => {
                let mut lower = self.sub_line(list, script_style, true, false)?;
                lower.set_line_position(LinePosition::Subscript, index);
                lower_limit_gap = f32::max(
                    self.constant(MathConstant::LowerLimitGapMin),
                    self.constant(MathConstant::LowerLimitBaselineDropMin) - lower.ascent,
                );
                Some(lower)
            }
            None => None,
        };

        Ok(Display::large_op_limits(
            LargeOpLimitsDisplay {
                nucleus,
                upper_limit,
                lower_limit,
                // Limits follow the slant of the operator.
                limit_shift: delta / 2.0,
                upper_limit_gap,
                lower_limit_gap,
                extra_padding: 0.0,
            },
            atom.index_range,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::display::{DisplayKind, LinePosition};
    use crate::font_metrics::MathConstant;
    use crate::font_metrics::testing::test_font;
    use crate::math_list::{Atom, AtomType, MathList};
    use crate::style::LineStyle;
    use crate::typesetter::layout;

    fn sum_with_limits() -> MathList {
        let mut sum = Atom::large_operator("\u{2211}", true);
        sum.set_subscript(Some(MathList::from_atoms(vec![Atom::new(AtomType::Variable, "i")])));
        sum.set_superscript(Some(MathList::from_atoms(vec![Atom::new(AtomType::Variable, "n")])));
        MathList::from_atoms(vec![sum])
    }

    #[test]
    fn test_display_style_sets_limits_above_and_below() {
        let font = test_font(10.0);
        let display = layout(&sum_with_limits(), &font, LineStyle::Display).unwrap();
        assert_eq!(display.children().len(), 1);
        let DisplayKind::LargeOpLimits(limits) = &display.children()[0].kind else {
            panic!("expected limits");
        };
        let DisplayKind::Glyph(glyph) = &limits.nucleus.kind else {
            panic!("expected a glyph nucleus");
        };
        // Display style swaps in the larger variant.
        assert_eq!(font.glyph_name(glyph.glyph).as_deref(), Some("uni2211.v1"));
        let upper = limits.upper_limit.as_ref().unwrap();
        let lower = limits.lower_limit.as_ref().unwrap();
        assert!(upper.position().y > limits.nucleus.ascent);
        assert!(lower.position().y < -limits.nucleus.descent);
        assert!(limits.upper_limit_gap >= font.constant(MathConstant::UpperLimitGapMin));
        assert!(limits.lower_limit_gap >= font.constant(MathConstant::LowerLimitGapMin));
    }

    #[test]
    fn test_operator_is_centered_on_axis() {
        let font = test_font(10.0);
        let list = MathList::from_atoms(vec![Atom::large_operator("\u{2211}", true)]);
        let display = layout(&list, &font, LineStyle::Text).unwrap();
        let op = &display.children()[0];
        let axis = font.constant(MathConstant::AxisHeight);
        assert!(((op.ascent - op.descent) / 2.0 - axis).abs() < 1e-4);
        assert!((op.width - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_text_style_uses_scripts_instead_of_limits() {
        let font = test_font(10.0);
        let display = layout(&sum_with_limits(), &font, LineStyle::Text).unwrap();
        let children = display.children();
        assert_eq!(children.len(), 3);
        assert!(matches!(children[0].kind, DisplayKind::Glyph(_)));
        assert_eq!(children[1].line_position(), LinePosition::Superscript);
        assert_eq!(children[2].line_position(), LinePosition::Subscript);
    }

    #[test]
    fn test_integral_subscript_tucks_under_italic_correction() {
        let font = test_font(10.0);
        let mut integral = Atom::large_operator("\u{222B}", false);
        integral.set_subscript(Some(MathList::from_atoms(vec![Atom::new(AtomType::Number, "0")])));
        let display = layout(&MathList::from_atoms(vec![integral]), &font, LineStyle::Text).unwrap();
        let op = &display.children()[0];
        let advance = font.advance(font.glyph_for_char('\u{222B}'));
        assert!((op.width - (advance - 1.5)).abs() < 1e-4);
    }

    #[test]
    fn test_named_operator_is_set_as_text() {
        let font = test_font(10.0);
        let list = MathList::from_atoms(vec![Atom::large_operator("sin", false)]);
        let display = layout(&list, &font, LineStyle::Text).unwrap();
        assert!(matches!(display.children()[0].kind, DisplayKind::TextRun(_)));
        assert!((display.width - 15.0).abs() < 1e-4);
    }
}
