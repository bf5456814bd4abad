//! `\left ... \right` groups (TeXbook rule 19).

use super::{DELIMITER_FACTOR, DELIMITER_SHORTFALL_POINTS, LayoutError, Typesetter};
use crate::display::Display;
use crate::math_list::Inner;
use crate::types::{IndexRange, Point};

impl Typesetter {
    pub(super) fn make_left_right(&self, inner: &Inner, range: IndexRange) -> Result<Display, LayoutError> {
        let mut inner_display = self.sub_line(&inner.inner_list, self.style, self.cramped, true)?;
        let axis_height = self.axis_height();
        // Largest distance of the content from the axis.
        let delta = f32::max(
            inner_display.ascent - axis_height,
            inner_display.descent + axis_height,
        );
        // Cover at least 90.1% of the content, or fall at most 5pt short.
        let covering = delta / 500.0 * DELIMITER_FACTOR;
        let shortfall = 2.0 * delta - DELIMITER_SHORTFALL_POINTS;
        let height = f32::max(covering, shortfall);

        let mut children = Vec::with_capacity(3);
        let mut x = 0.0;
        if let Some(left) = inner.left_boundary()
            && !left.nucleus.is_empty()
        {
            let mut glyph = self.find_glyph_for_boundary(&left.nucleus, height)?;
            glyph.set_position(Point::new(x, 0.0));
            x += glyph.width;
            children.push(glyph);
        }
        inner_display.set_position(Point::new(x, 0.0));
        x += inner_display.width;
        children.push(inner_display);
        if let Some(right) = inner.right_boundary()
            && !right.nucleus.is_empty()
        {
            let mut glyph = self.find_glyph_for_boundary(&right.nucleus, height)?;
            glyph.set_position(Point::new(x, 0.0));
            children.push(glyph);
        }
        Ok(Display::list(children, range))
    }
}

#[cfg(test)]
mod tests {
    use crate::display::DisplayKind;
    use crate::font_metrics::testing::test_font;
    use crate::math_list::{Atom, AtomType, Fraction, Inner, MathList};
    use crate::style::LineStyle;
    use crate::typesetter::layout;

    fn delimited(content: MathList, left: &str, right: &str) -> MathList {
        let mut inner = Inner {
            inner_list: content,
            ..Inner::default()
        };
        inner.set_left_boundary(Some(Atom::new(AtomType::Boundary, left)));
        inner.set_right_boundary(Some(Atom::new(AtomType::Boundary, right)));
        MathList::from_atoms(vec![Atom::inner(inner)])
    }

    fn variable(name: &str) -> MathList {
        MathList::from_atoms(vec![Atom::new(AtomType::Variable, name)])
    }

    #[test]
    fn test_delimiters_grow_with_content() {
        let font = test_font(10.0);
        let short = layout(&delimited(variable("x"), "(", ")"), &font, LineStyle::Text).unwrap();
        let tall_content = MathList::from_atoms(vec![Atom::fraction(Fraction {
            numerator: variable("x"),
            denominator: variable("y"),
            ..Fraction::default()
        })]);
        let tall = layout(&delimited(tall_content, "(", ")"), &font, LineStyle::Display).unwrap();

        let height = |display: &crate::display::Display| {
            let left = &display.children()[0].children()[0];
            left.ascent + left.descent
        };
        assert!(height(&tall) > height(&short));
        assert_eq!(short.children()[0].children().len(), 3);
    }

    #[test]
    fn test_empty_boundary_is_skipped() {
        let font = test_font(10.0);
        let display = layout(&delimited(variable("x"), "", "|"), &font, LineStyle::Text).unwrap();
        let group = &display.children()[0];
        assert_eq!(group.children().len(), 2);
        assert!(matches!(group.children()[0].kind, DisplayKind::List(_)));
        assert_eq!(group.children()[0].position().x, 0.0);
    }
}
