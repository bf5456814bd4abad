//! Radicals (TeXbook rule 11), with an optional degree.

use super::{LayoutError, Typesetter};
use crate::display::{Display, RadicalDisplay};
use crate::font_metrics::MathConstant;
use crate::math_list::Radical;
use crate::style::LineStyle;
use crate::types::{IndexRange, Point};

const RADICAL_SIGN: char = '\u{221A}';

impl Typesetter {
    /// A radical sign at least `height` tall, sitting on the baseline.
    fn radical_glyph(&self, height: f32) -> Result<Display, LayoutError> {
        let glyph = self.style_font.glyph_for_char(RADICAL_SIGN);
        if glyph == 0 {
            return Err(LayoutError::MissingGlyph {
                character: RADICAL_SIGN,
            });
        }
        let found = self.find_glyph(glyph, height);
        if found.ascent + found.descent < height
            && let Some(constructed) = self.construct_glyph(glyph, height)?
        {
            return Ok(constructed);
        }
        Ok(Display::glyph(
            found.glyph,
            self.style_font.clone(),
            found.ascent,
            found.descent,
            found.width,
            IndexRange::ZERO,
        ))
    }

    pub(super) fn make_radical(&self, radical: &Radical, range: IndexRange) -> Result<Display, LayoutError> {
        let radicand = self.sub_line(&radical.radicand, self.style, true, false)?;
        let mut clearance = self.by_style(
            MathConstant::RadicalDisplayStyleVerticalGap,
            MathConstant::RadicalVerticalGap,
        );
        let thickness = self.constant(MathConstant::RadicalRuleThickness);
        let extra_ascender = self.constant(MathConstant::RadicalExtraAscender);
        let radical_height = radicand.ascent + radicand.descent + clearance + thickness;

        let mut glyph = self.radical_glyph(radical_height)?;
        let glyph_height = glyph.ascent + glyph.descent;
        // A taller sign than needed centers the radicand inside it. The
        // sign's ascent is not assumed to equal the rule thickness.
        let delta = glyph_height - radical_height;
        if delta > 0.0 {
            clearance += delta / 2.0;
        }
        let radical_ascent = thickness + clearance + radicand.ascent;
        glyph.shift_down(glyph.ascent - radical_ascent);

        let ascent = radical_ascent + extra_ascender;
        // A sign built short of the requested height may not reach below
        // the radicand.
        let descent = f32::max(glyph_height - radical_ascent, radicand.descent);
        let mut width = glyph.width + radicand.width;

        let mut radical_shift = 0.0;
        let mut degree_offset = Point::ZERO;
        let degree = match &radical.degree {
            Some(degree) => {
                let degree = self.sub_line(degree, LineStyle::ScriptScript, false, false)?;
                // Layout: kern before, degree, kern after, then the sign.
                let mut kern_before = self.constant(MathConstant::RadicalKernBeforeDegree);
                let kern_after = self.constant(MathConstant::RadicalKernAfterDegree);
                let raise = self.constant(MathConstant::RadicalDegreeBottomRaisePercent) * (ascent - descent);
                radical_shift = kern_before + degree.width + kern_after;
                if radical_shift < 0.0 {
                    // The sign never moves left of the origin.
                    kern_before -= radical_shift;
                    radical_shift = 0.0;
                }
                degree_offset = Point::new(kern_before, raise);
                width = radical_shift + glyph.width + radicand.width;
                Some(degree)
            }
            None => None,
        };

        Ok(Display::radical(
            RadicalDisplay {
                radicand,
                radical_glyph: glyph,
                degree,
                degree_offset,
                top_kern: extra_ascender,
                line_thickness: thickness,
                radical_shift,
            },
            ascent,
            descent,
            width,
            range,
        ))
    }
}
