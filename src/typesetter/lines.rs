//! Overlines and underlines (TeXbook rules 9 and 10).

use super::{LayoutError, Typesetter};
use crate::display::{Display, LineDisplay};
use crate::font_metrics::MathConstant;
use crate::math_list::MathList;
use crate::types::IndexRange;

impl Typesetter {
    pub(super) fn make_overline(&self, list: &MathList, range: IndexRange) -> Result<Display, LayoutError> {
        let inner = self.sub_line(list, self.style, true, false)?;
        let gap = self.constant(MathConstant::OverbarVerticalGap);
        let thickness = self.constant(MathConstant::OverbarRuleThickness);
        let ascent = inner.ascent + gap + thickness + self.constant(MathConstant::OverbarExtraAscender);
        let descent = inner.descent;
        let line_shift_up = inner.ascent + gap;
        Ok(Display::line(
            LineDisplay {
                inner,
                line_shift_up,
                line_thickness: thickness,
            },
            ascent,
            descent,
            range,
        ))
    }

    pub(super) fn make_underline(&self, list: &MathList, range: IndexRange) -> Result<Display, LayoutError> {
        let inner = self.sub_line(list, self.style, self.cramped, false)?;
        let gap = self.constant(MathConstant::UnderbarVerticalGap);
        let thickness = self.constant(MathConstant::UnderbarRuleThickness);
        let ascent = inner.ascent;
        let descent = inner.descent + gap + thickness + self.constant(MathConstant::UnderbarExtraDescender);
        let line_shift_up = -(inner.descent + gap);
        Ok(Display::line(
            LineDisplay {
                inner,
                line_shift_up,
                line_thickness: thickness,
            },
            ascent,
            descent,
            range,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::display::DisplayKind;
    use crate::font_metrics::MathConstant;
    use crate::font_metrics::testing::test_font;
    use crate::math_list::{Atom, AtomType, MathList};
    use crate::style::LineStyle;
    use crate::typesetter::layout;

    fn content() -> MathList {
        MathList::from_atoms(vec![Atom::new(AtomType::Variable, "x")])
    }

    #[test]
    fn test_overline_sits_above_content() {
        let font = test_font(10.0);
        let list = MathList::from_atoms(vec![Atom::overline(content())]);
        let display = layout(&list, &font, LineStyle::Text).unwrap();
        let over = &display.children()[0];
        let DisplayKind::Line(line) = &over.kind else {
            panic!("expected a line");
        };
        let gap = font.constant(MathConstant::OverbarVerticalGap);
        assert!((line.line_shift_up - (line.inner.ascent + gap)).abs() < 1e-4);
        assert!((line.line_thickness - font.constant(MathConstant::OverbarRuleThickness)).abs() < 1e-4);
        assert!(over.ascent > line.inner.ascent + gap);
        assert_eq!(over.descent, line.inner.descent);
    }

    #[test]
    fn test_underline_sits_below_content() {
        let font = test_font(10.0);
        let list = MathList::from_atoms(vec![Atom::underline(content())]);
        let display = layout(&list, &font, LineStyle::Text).unwrap();
        let under = &display.children()[0];
        let DisplayKind::Line(line) = &under.kind else {
            panic!("expected a line");
        };
        assert!(line.line_shift_up < 0.0);
        assert!(under.descent > line.inner.descent);
        assert_eq!(under.width, line.inner.width);
    }
}
