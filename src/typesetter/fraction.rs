//! Fractions and stacks (TeXbook rule 15).

use super::{LayoutError, Typesetter};
use crate::display::{Display, FractionDisplay};
use crate::font_metrics::MathConstant;
use crate::math_list::Fraction;
use crate::style::LineStyle;
use crate::symbols::DELIMITERS;
use crate::types::{IndexRange, Point};

impl Typesetter {
    pub(super) fn is_display(&self) -> bool {
        self.style == LineStyle::Display
    }

    /// Picks the display-style or text-style variant of a constant.
    pub(super) fn by_style(&self, display: MathConstant, text: MathConstant) -> f32 {
        self.constant(if self.is_display() { display } else { text })
    }

    fn numerator_shift_up(&self, has_rule: bool) -> f32 {
        if has_rule {
            self.by_style(
                MathConstant::FractionNumeratorDisplayStyleShiftUp,
                MathConstant::FractionNumeratorShiftUp,
            )
        } else {
            self.by_style(MathConstant::StackTopDisplayStyleShiftUp, MathConstant::StackTopShiftUp)
        }
    }

    fn denominator_shift_down(&self, has_rule: bool) -> f32 {
        if has_rule {
            self.by_style(
                MathConstant::FractionDenominatorDisplayStyleShiftDown,
                MathConstant::FractionDenominatorShiftDown,
            )
        } else {
            self.by_style(
                MathConstant::StackBottomDisplayStyleShiftDown,
                MathConstant::StackBottomShiftDown,
            )
        }
    }

    fn fraction_delimiter_height(&self) -> f32 {
        if self.is_display() {
            self.style_font.fraction_delimiter_display_style_size()
        } else {
            self.style_font.fraction_delimiter_size()
        }
    }

    pub(super) fn make_fraction(&self, fraction: &Fraction, range: IndexRange) -> Result<Display, LayoutError> {
        let style = self.style.fraction();
        let numerator = self.sub_line(&fraction.numerator, style, false, false)?;
        let denominator = self.sub_line(&fraction.denominator, style, true, false)?;

        let mut numerator_up = self.numerator_shift_up(fraction.has_rule);
        let mut denominator_down = self.denominator_shift_down(fraction.has_rule);
        let bar_position = self.axis_height();
        let bar_thickness = if fraction.has_rule {
            self.constant(MathConstant::FractionRuleThickness)
        } else {
            0.0
        };

        if fraction.has_rule {
            let numerator_gap = (numerator_up - numerator.descent) - (bar_position + bar_thickness / 2.0);
            let numerator_gap_min = self.by_style(
                MathConstant::FractionNumDisplayStyleGapMin,
                MathConstant::FractionNumeratorGapMin,
            );
            if numerator_gap < numerator_gap_min {
                numerator_up += numerator_gap_min - numerator_gap;
            }
            let denominator_gap = (bar_position - bar_thickness / 2.0) - (denominator.ascent - denominator_down);
            let denominator_gap_min = self.by_style(
                MathConstant::FractionDenomDisplayStyleGapMin,
                MathConstant::FractionDenominatorGapMin,
            );
            if denominator_gap < denominator_gap_min {
                denominator_down += denominator_gap_min - denominator_gap;
            }
        } else {
            let clearance = (numerator_up - numerator.descent) - (denominator.ascent - denominator_down);
            let gap_min = self.by_style(MathConstant::StackDisplayStyleGapMin, MathConstant::StackGapMin);
            if clearance < gap_min {
                numerator_up += (gap_min - clearance) / 2.0;
                denominator_down += (gap_min - clearance) / 2.0;
            }
        }

        let display = Display::fraction(
            FractionDisplay {
                numerator,
                denominator,
                numerator_up,
                denominator_down,
                line_position: bar_position,
                line_thickness: bar_thickness,
            },
            range,
        );
        if fraction.left_delimiter.is_none() && fraction.right_delimiter.is_none() {
            return Ok(display);
        }
        self.add_delimiters_to_fraction(display, fraction, range)
    }

    /// Wrap a `\binom`-style fraction in its delimiters.
    fn add_delimiters_to_fraction(
        &self,
        mut display: Display,
        fraction: &Fraction,
        range: IndexRange,
    ) -> Result<Display, LayoutError> {
        let height = self.fraction_delimiter_height();
        let mut children = Vec::with_capacity(3);
        let mut x = 0.0;
        if let Some(delimiter) = fraction.left_delimiter.as_deref().and_then(|name| DELIMITERS.get(name))
            && !delimiter.is_empty()
        {
            let mut left = self.find_glyph_for_boundary(delimiter, height)?;
            left.set_position(Point::new(x, 0.0));
            x += left.width;
            children.push(left);
        }
        display.set_position(Point::new(x, 0.0));
        x += display.width;
        children.push(display);
        if let Some(delimiter) = fraction.right_delimiter.as_deref().and_then(|name| DELIMITERS.get(name))
            && !delimiter.is_empty()
        {
            let mut right = self.find_glyph_for_boundary(delimiter, height)?;
            right.set_position(Point::new(x, 0.0));
            children.push(right);
        }
        Ok(Display::list(children, range))
    }
}
