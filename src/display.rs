//! The display tree produced by the typesetter
//!
//! A [`Display`] is a box with an ascent, a descent and a width, placed at
//! a position. Coordinates are in points with `y` growing upward from the
//! baseline.
//!
//! Children of a [`DisplayKind::List`] are positioned relative to the list.
//! Every other composite places its children in its own parent's frame and
//! repositions them whenever its own position changes, see
//! [`Display::set_position`].

use crate::color::Color;
use crate::font_metrics::{GlyphId, MathFont};
use crate::types::{IndexRange, Point};

/// Vertical role of a list display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePosition {
    /// An ordinary line.
    #[default]
    Regular,
    /// A subscript of the atom at the list's index.
    Subscript,
    /// A superscript of the atom at the list's index.
    Superscript,
}

/// Glyphs of one font set on a shared baseline.
#[derive(Debug, Clone)]
pub struct TextRun {
    /// The text the glyphs were shaped from.
    pub text: String,
    /// One glyph per character.
    pub glyphs: Vec<GlyphId>,
    /// Advance after each glyph, kerns included.
    pub advances: Vec<f32>,
    /// Font of the glyphs.
    pub font: MathFont,
}

/// A single glyph, possibly moved off the baseline.
#[derive(Debug, Clone)]
pub struct GlyphDisplay {
    /// The glyph.
    pub glyph: GlyphId,
    /// Font of the glyph.
    pub font: MathFont,
    /// Distance the glyph is drawn below the baseline.
    pub shift_down: f32,
}

/// A tall glyph built from stacked assembly parts.
#[derive(Debug, Clone)]
pub struct GlyphConstruction {
    /// Parts from bottom to top.
    pub glyphs: Vec<GlyphId>,
    /// Vertical offset of each part from the construction's baseline.
    pub offsets: Vec<f32>,
    /// Font of the parts.
    pub font: MathFont,
    /// Distance the construction is drawn below the baseline.
    pub shift_down: f32,
}

/// A laid out math list.
#[derive(Debug, Clone, Default)]
pub struct ListDisplay {
    /// Children, positioned relative to the list.
    pub children: Vec<Display>,
    /// Whether this list is a script.
    pub line_position: LinePosition,
    /// Index of the atom a script belongs to.
    pub index: Option<usize>,
}

/// A fraction with its numerator, denominator and optional rule.
#[derive(Debug, Clone)]
pub struct FractionDisplay {
    /// List above the rule.
    pub numerator: Display,
    /// List below the rule.
    pub denominator: Display,
    /// Baseline shift of the numerator.
    pub numerator_up: f32,
    /// Baseline drop of the denominator.
    pub denominator_down: f32,
    /// Height of the rule's center above the baseline.
    pub line_position: f32,
    /// Rule thickness; 0 for ruleless fractions.
    pub line_thickness: f32,
}

/// A radical sign over a radicand, with an optional degree.
#[derive(Debug, Clone)]
pub struct RadicalDisplay {
    /// The list under the sign.
    pub radicand: Display,
    /// The sign itself, a glyph or a glyph construction.
    pub radical_glyph: Display,
    /// The root index.
    pub degree: Option<Display>,
    /// Horizontal position of the degree relative to the radical.
    pub degree_offset: Point,
    /// Space between the rule and the top of the display.
    pub top_kern: f32,
    /// Thickness of the rule over the radicand.
    pub line_thickness: f32,
    /// Distance the sign is moved right to make room for the degree.
    pub radical_shift: f32,
}

/// A large operator with limits stacked above and below.
#[derive(Debug, Clone)]
pub struct LargeOpLimitsDisplay {
    /// The operator.
    pub nucleus: Display,
    /// Limit above the operator.
    pub upper_limit: Option<Display>,
    /// Limit below the operator.
    pub lower_limit: Option<Display>,
    /// Horizontal offset of the limits, half the operator's italic correction.
    pub limit_shift: f32,
    /// Gap between the operator and the upper limit.
    pub upper_limit_gap: f32,
    /// Gap between the operator and the lower limit.
    pub lower_limit_gap: f32,
    /// Extra space above the upper and below the lower limit.
    pub extra_padding: f32,
}

/// An overline or underline.
#[derive(Debug, Clone)]
pub struct LineDisplay {
    /// The list being ruled.
    pub inner: Display,
    /// Height of the rule's center above the baseline; negative below.
    pub line_shift_up: f32,
    /// Rule thickness.
    pub line_thickness: f32,
}

/// An accent glyph over its accentee.
#[derive(Debug, Clone)]
pub struct AccentDisplay {
    /// The accented list.
    pub accentee: Display,
    /// The accent glyph.
    pub accent: Display,
    /// Position of the accent relative to the accentee.
    pub accent_offset: Point,
}

/// What a [`Display`] draws.
#[derive(Debug, Clone)]
pub enum DisplayKind {
    /// A run of glyphs.
    TextRun(TextRun),
    /// A single glyph.
    Glyph(GlyphDisplay),
    /// An assembled glyph.
    GlyphConstruction(GlyphConstruction),
    /// A laid out sub-list.
    List(ListDisplay),
    /// A fraction.
    Fraction(Box<FractionDisplay>),
    /// A radical.
    Radical(Box<RadicalDisplay>),
    /// A large operator with stacked limits.
    LargeOpLimits(Box<LargeOpLimitsDisplay>),
    /// An overline or underline.
    Line(Box<LineDisplay>),
    /// An accented list.
    Accent(Box<AccentDisplay>),
}

/// A positioned box of the layout tree.
///
/// # Cross-references
/// - Built by [`crate::typesetter::layout`].
/// - Painted through [`Display::draw`].
#[derive(Debug, Clone)]
pub struct Display {
    /// Height above the baseline.
    pub ascent: f32,
    /// Depth below the baseline.
    pub descent: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Source atoms covered by this display.
    pub range: IndexRange,
    /// Whether the display carries scripts.
    pub has_script: bool,
    position: Point,
    text_color: Option<Color>,
    local_text_color: Option<Color>,
    /// Contents.
    pub kind: DisplayKind,
}

/// Receiver of the drawing instructions of a display tree.
///
/// Positions are absolute, `y` grows upward. A `None` color means the
/// renderer's default text color.
pub trait DisplayRenderer {
    /// Draw `glyph` with its origin at `position`.
    fn draw_glyph(&mut self, font: &MathFont, glyph: GlyphId, position: Point, color: Option<Color>);

    /// Draw `glyphs` starting at `origin`, moving right by `advances`.
    fn draw_glyph_run(
        &mut self,
        font: &MathFont,
        glyphs: &[GlyphId],
        advances: &[f32],
        origin: Point,
        color: Option<Color>,
    );

    /// Draw a horizontal rule.
    fn draw_line(&mut self, from: Point, to: Point, thickness: f32, color: Option<Color>);
}

impl Display {
    fn with_kind(kind: DisplayKind, range: IndexRange) -> Self {
        Self {
            ascent: 0.0,
            descent: 0.0,
            width: 0.0,
            range,
            has_script: false,
            position: Point::ZERO,
            text_color: None,
            local_text_color: None,
            kind,
        }
    }

    /// A run of `glyphs`, measured with `font`.
    #[must_use]
    pub fn text_run(run: TextRun, range: IndexRange) -> Self {
        let mut ascent: f32 = 0.0;
        let mut descent: f32 = 0.0;
        for bbox in run.font.bounding_boxes(&run.glyphs).into_iter().flatten() {
            ascent = ascent.max(bbox.ascent());
            descent = descent.max(bbox.descent());
        }
        let width = run.advances.iter().sum();
        Self {
            ascent,
            descent,
            width,
            ..Self::with_kind(DisplayKind::TextRun(run), range)
        }
    }

    /// A single glyph with the given metrics.
    #[must_use]
    pub fn glyph(glyph: GlyphId, font: MathFont, ascent: f32, descent: f32, width: f32, range: IndexRange) -> Self {
        let kind = DisplayKind::Glyph(GlyphDisplay {
            glyph,
            font,
            shift_down: 0.0,
        });
        Self {
            ascent,
            descent,
            width,
            ..Self::with_kind(kind, range)
        }
    }

    /// An assembled glyph of the given height, sitting on the baseline.
    #[must_use]
    pub fn glyph_construction(
        glyphs: Vec<GlyphId>,
        offsets: Vec<f32>,
        font: MathFont,
        height: f32,
        width: f32,
    ) -> Self {
        let kind = DisplayKind::GlyphConstruction(GlyphConstruction {
            glyphs,
            offsets,
            font,
            shift_down: 0.0,
        });
        Self {
            ascent: height,
            descent: 0.0,
            width,
            ..Self::with_kind(kind, IndexRange::ZERO)
        }
    }

    /// A list of displays placed relative to the list's origin. The list
    /// measures the union of its children.
    #[must_use]
    pub fn list(children: Vec<Self>, range: IndexRange) -> Self {
        let kind = DisplayKind::List(ListDisplay {
            children,
            ..ListDisplay::default()
        });
        let mut display = Self::with_kind(kind, range);
        display.recompute_dimensions();
        display
    }

    /// A fraction centered on the wider of its parts.
    #[must_use]
    pub fn fraction(fraction: FractionDisplay, range: IndexRange) -> Self {
        let ascent = fraction.numerator_up + fraction.numerator.ascent;
        let descent = fraction.denominator_down + fraction.denominator.descent;
        let width = fraction.numerator.width.max(fraction.denominator.width);
        let mut display = Self {
            ascent,
            descent,
            width,
            ..Self::with_kind(DisplayKind::Fraction(Box::new(fraction)), range)
        };
        display.reposition_children();
        display
    }

    /// A radical; the caller supplies the measured box.
    #[must_use]
    pub fn radical(radical: RadicalDisplay, ascent: f32, descent: f32, width: f32, range: IndexRange) -> Self {
        let mut display = Self {
            ascent,
            descent,
            width,
            ..Self::with_kind(DisplayKind::Radical(Box::new(radical)), range)
        };
        display.reposition_children();
        display
    }

    /// A large operator with limits, as wide as its widest part.
    #[must_use]
    pub fn large_op_limits(limits: LargeOpLimitsDisplay, range: IndexRange) -> Self {
        let nucleus = &limits.nucleus;
        let mut ascent = nucleus.ascent;
        let mut descent = nucleus.descent;
        let mut width = nucleus.width;
        if let Some(upper) = &limits.upper_limit {
            ascent += limits.extra_padding + upper.ascent + limits.upper_limit_gap + upper.descent;
            width = width.max(upper.width);
        }
        if let Some(lower) = &limits.lower_limit {
            descent += limits.extra_padding + lower.ascent + limits.lower_limit_gap + lower.descent;
            width = width.max(lower.width);
        }
        let mut display = Self {
            ascent,
            descent,
            width,
            ..Self::with_kind(DisplayKind::LargeOpLimits(Box::new(limits)), range)
        };
        display.reposition_children();
        display
    }

    /// An overline or underline; the caller supplies the measured box.
    #[must_use]
    pub fn line(line: LineDisplay, ascent: f32, descent: f32, range: IndexRange) -> Self {
        let width = line.inner.width;
        let mut display = Self {
            ascent,
            descent,
            width,
            ..Self::with_kind(DisplayKind::Line(Box::new(line)), range)
        };
        display.reposition_children();
        display
    }

    /// An accent over its accentee; the caller supplies the ascent.
    #[must_use]
    pub fn accent(accent: AccentDisplay, ascent: f32, range: IndexRange) -> Self {
        let descent = accent.accentee.descent;
        let width = accent.accentee.width;
        let mut display = Self {
            ascent,
            descent,
            width,
            ..Self::with_kind(DisplayKind::Accent(Box::new(accent)), range)
        };
        display.reposition_children();
        display
    }

    /// Position of the display's origin.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Move the display, and with it every child laid out in its frame.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.reposition_children();
    }

    /// Color the display is drawn with, after propagation.
    #[must_use]
    pub const fn text_color(&self) -> Option<Color> {
        self.text_color
    }

    /// Color set on this display by a color group.
    #[must_use]
    pub const fn local_text_color(&self) -> Option<Color> {
        self.local_text_color
    }

    /// Pin the display to `color` regardless of the color of its parents.
    pub fn set_local_text_color(&mut self, color: Option<Color>) {
        self.local_text_color = color;
        self.set_text_color(color);
    }

    /// Color the display and pass the color down. Children with a local
    /// color keep it.
    pub fn set_text_color(&mut self, color: Option<Color>) {
        let color = self.local_text_color.or(color);
        self.text_color = color;
        self.for_each_child_mut(|child| child.set_text_color(color));
    }

    /// Move a glyph display down by `amount`, adjusting its box.
    ///
    /// Other kinds are left untouched.
    pub fn shift_down(&mut self, amount: f32) {
        let shift = match &mut self.kind {
            DisplayKind::Glyph(glyph) => &mut glyph.shift_down,
            DisplayKind::GlyphConstruction(construction) => &mut construction.shift_down,
            _ => return,
        };
        *shift += amount;
        self.ascent -= amount;
        self.descent += amount;
    }

    /// Distance a glyph display is drawn below the baseline.
    #[must_use]
    pub const fn shift(&self) -> f32 {
        match &self.kind {
            DisplayKind::Glyph(glyph) => glyph.shift_down,
            DisplayKind::GlyphConstruction(construction) => construction.shift_down,
            _ => 0.0,
        }
    }

    /// Children of a list display.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            DisplayKind::List(list) => &list.children,
            _ => &[],
        }
    }

    /// Make this list a script of the atom at `index`.
    pub fn set_line_position(&mut self, line_position: LinePosition, index: Option<usize>) {
        if let DisplayKind::List(list) = &mut self.kind {
            list.line_position = line_position;
            list.index = index;
        }
    }

    /// Vertical role of a list display; regular for other kinds.
    #[must_use]
    pub const fn line_position(&self) -> LinePosition {
        match &self.kind {
            DisplayKind::List(list) => list.line_position,
            _ => LinePosition::Regular,
        }
    }

    /// Recompute a list display's box from its children.
    pub fn recompute_dimensions(&mut self) {
        let DisplayKind::List(list) = &self.kind else {
            return;
        };
        let mut ascent: f32 = 0.0;
        let mut descent: f32 = 0.0;
        let mut width: f32 = 0.0;
        for child in &list.children {
            let position = child.position;
            ascent = ascent.max(position.y + child.ascent);
            descent = descent.max(child.descent - position.y);
            width = width.max(position.x + child.width);
        }
        self.ascent = ascent;
        self.descent = descent;
        self.width = width;
    }

    fn for_each_child_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self),
    {
        match &mut self.kind {
            DisplayKind::TextRun(_) | DisplayKind::Glyph(_) | DisplayKind::GlyphConstruction(_) => {}
            DisplayKind::List(list) => list.children.iter_mut().for_each(f),
            DisplayKind::Fraction(fraction) => {
                f(&mut fraction.numerator);
                f(&mut fraction.denominator);
            }
            DisplayKind::Radical(radical) => {
                f(&mut radical.radicand);
                f(&mut radical.radical_glyph);
                if let Some(degree) = &mut radical.degree {
                    f(degree);
                }
            }
            DisplayKind::LargeOpLimits(limits) => {
                f(&mut limits.nucleus);
                if let Some(upper) = &mut limits.upper_limit {
                    f(upper);
                }
                if let Some(lower) = &mut limits.lower_limit {
                    f(lower);
                }
            }
            DisplayKind::Line(line) => f(&mut line.inner),
            DisplayKind::Accent(accent) => {
                f(&mut accent.accentee);
                f(&mut accent.accent);
            }
        }
    }

    fn reposition_children(&mut self) {
        let Point { x, y } = self.position;
        let width = self.width;
        match &mut self.kind {
            DisplayKind::TextRun(_)
            | DisplayKind::Glyph(_)
            | DisplayKind::GlyphConstruction(_)
            | DisplayKind::List(_) => {}
            DisplayKind::Fraction(fraction) => {
                let numerator = &mut fraction.numerator;
                let dx = (width - numerator.width) / 2.0;
                numerator.set_position(Point::new(x + dx, y + fraction.numerator_up));
                let denominator = &mut fraction.denominator;
                let dx = (width - denominator.width) / 2.0;
                denominator.set_position(Point::new(x + dx, y - fraction.denominator_down));
            }
            DisplayKind::Radical(radical) => {
                let glyph_x = x + radical.radical_shift;
                radical.radical_glyph.set_position(Point::new(glyph_x, y));
                let radicand_x = glyph_x + radical.radical_glyph.width;
                radical.radicand.set_position(Point::new(radicand_x, y));
                let offset = radical.degree_offset;
                if let Some(degree) = &mut radical.degree {
                    degree.set_position(Point::new(x, y) + offset);
                }
            }
            DisplayKind::LargeOpLimits(limits) => {
                let nucleus_ascent = limits.nucleus.ascent;
                let nucleus_descent = limits.nucleus.descent;
                if let Some(upper) = &mut limits.upper_limit {
                    let upper_x = x + limits.limit_shift + (width - upper.width) / 2.0;
                    let upper_y = y + nucleus_ascent + limits.upper_limit_gap + upper.descent;
                    upper.set_position(Point::new(upper_x, upper_y));
                }
                if let Some(lower) = &mut limits.lower_limit {
                    let lower_x = x - limits.limit_shift + (width - lower.width) / 2.0;
                    let lower_y = y - nucleus_descent - limits.lower_limit_gap - lower.ascent;
                    lower.set_position(Point::new(lower_x, lower_y));
                }
                let nucleus_x = x + (width - limits.nucleus.width) / 2.0;
                limits.nucleus.set_position(Point::new(nucleus_x, y));
            }
            DisplayKind::Line(line) => line.inner.set_position(Point::new(x, y)),
            DisplayKind::Accent(accent) => {
                accent.accentee.set_position(Point::new(x, y));
                let offset = accent.accent_offset;
                accent.accent.set_position(Point::new(x, y) + offset);
            }
        }
    }

    /// Emit the drawing instructions of the tree, with the display's own
    /// position taken as absolute.
    pub fn draw<R>(&self, renderer: &mut R)
    where
        R: DisplayRenderer + ?Sized,
    {
        self.draw_in(Point::ZERO, renderer);
    }

    /// Draw with `origin` as the origin of the display's frame.
    fn draw_in<R>(&self, origin: Point, renderer: &mut R)
    where
        R: DisplayRenderer + ?Sized,
    {
        let at = origin + self.position;
        let color = self.text_color;
        match &self.kind {
            DisplayKind::TextRun(run) => {
                renderer.draw_glyph_run(&run.font, &run.glyphs, &run.advances, at, color);
            }
            DisplayKind::Glyph(glyph) => {
                renderer.draw_glyph(&glyph.font, glyph.glyph, at.translated(0.0, -glyph.shift_down), color);
            }
            DisplayKind::GlyphConstruction(construction) => {
                for (&glyph, &offset) in construction.glyphs.iter().zip(&construction.offsets) {
                    let position = at.translated(0.0, offset - construction.shift_down);
                    renderer.draw_glyph(&construction.font, glyph, position, color);
                }
            }
            DisplayKind::List(list) => {
                for child in &list.children {
                    child.draw_in(at, renderer);
                }
            }
            DisplayKind::Fraction(fraction) => {
                fraction.numerator.draw_in(origin, renderer);
                fraction.denominator.draw_in(origin, renderer);
                if fraction.line_thickness > 0.0 {
                    let from = at.translated(0.0, fraction.line_position);
                    let to = from.translated(self.width, 0.0);
                    renderer.draw_line(from, to, fraction.line_thickness, color);
                }
            }
            DisplayKind::Radical(radical) => {
                radical.radical_glyph.draw_in(origin, renderer);
                radical.radicand.draw_in(origin, renderer);
                if let Some(degree) = &radical.degree {
                    degree.draw_in(origin, renderer);
                }
                let line_y = self.ascent - radical.top_kern - radical.line_thickness / 2.0;
                let from = at.translated(
                    radical.radical_shift + radical.radical_glyph.width,
                    line_y,
                );
                let to = from.translated(radical.radicand.width, 0.0);
                renderer.draw_line(from, to, radical.line_thickness, color);
            }
            DisplayKind::LargeOpLimits(limits) => {
                if let Some(upper) = &limits.upper_limit {
                    upper.draw_in(origin, renderer);
                }
                if let Some(lower) = &limits.lower_limit {
                    lower.draw_in(origin, renderer);
                }
                limits.nucleus.draw_in(origin, renderer);
            }
            DisplayKind::Line(line) => {
                line.inner.draw_in(origin, renderer);
                let from = at.translated(0.0, line.line_shift_up);
                let to = from.translated(line.inner.width, 0.0);
                renderer.draw_line(from, to, line.line_thickness, color);
            }
            DisplayKind::Accent(accent) => {
                accent.accentee.draw_in(origin, renderer);
                accent.accent.draw_in(origin, renderer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_metrics::testing::test_font;

    #[derive(Default)]
    struct Recorder {
        glyphs: Vec<(GlyphId, Point, Option<Color>)>,
        lines: Vec<(Point, Point)>,
    }

    impl DisplayRenderer for Recorder {
        fn draw_glyph(&mut self, _: &MathFont, glyph: GlyphId, position: Point, color: Option<Color>) {
            self.glyphs.push((glyph, position, color));
        }

        fn draw_glyph_run(
            &mut self,
            _: &MathFont,
            glyphs: &[GlyphId],
            advances: &[f32],
            origin: Point,
            color: Option<Color>,
        ) {
            let mut x = origin.x;
            for (&glyph, &advance) in glyphs.iter().zip(advances) {
                self.glyphs.push((glyph, Point::new(x, origin.y), color));
                x += advance;
            }
        }

        fn draw_line(&mut self, from: Point, to: Point, _: f32, _: Option<Color>) {
            self.lines.push((from, to));
        }
    }

    fn run(text: &str) -> Display {
        let font = test_font(10.0);
        let glyphs = font.glyphs_for_str(text);
        let advances = font.advances(&glyphs);
        Display::text_run(
            TextRun {
                text: text.to_owned(),
                glyphs,
                advances,
                font,
            },
            IndexRange::new(0, 1),
        )
    }

    #[test]
    fn test_text_run_metrics() {
        let display = run("xy");
        assert!((display.width - 10.0).abs() < 1e-5);
        assert!((display.ascent - 7.0).abs() < 1e-5);
        assert!((display.descent - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_list_dimensions_follow_children() {
        let mut raised = run("x");
        raised.set_position(Point::new(5.0, 3.0));
        let display = Display::list(vec![run("x"), raised], IndexRange::new(0, 2));
        assert!((display.width - 10.0).abs() < 1e-5);
        assert!((display.ascent - 10.0).abs() < 1e-5);
        assert_eq!(display.descent, 0.0);
    }

    #[test]
    fn test_fraction_repositions_parts() {
        let numerator = Display::list(vec![run("xx")], IndexRange::ZERO);
        let denominator = Display::list(vec![run("x")], IndexRange::ZERO);
        let mut fraction = Display::fraction(
            FractionDisplay {
                numerator,
                denominator,
                numerator_up: 6.0,
                denominator_down: 4.0,
                line_position: 2.5,
                line_thickness: 0.4,
            },
            IndexRange::new(0, 1),
        );
        fraction.set_position(Point::new(1.0, 0.0));
        let DisplayKind::Fraction(parts) = &fraction.kind else {
            panic!("not a fraction");
        };
        assert_eq!(parts.numerator.position(), Point::new(1.0, 6.0));
        assert_eq!(parts.denominator.position(), Point::new(3.5, -4.0));

        let mut recorder = Recorder::default();
        fraction.draw(&mut recorder);
        assert_eq!(recorder.glyphs.len(), 3);
        assert_eq!(recorder.lines, vec![(Point::new(1.0, 2.5), Point::new(11.0, 2.5))]);
    }

    #[test]
    fn test_local_color_survives_propagation() {
        let red = Color(0xFFFF_0000);
        let blue = Color(0xFF00_00FF);
        let mut colored = Display::list(vec![run("x")], IndexRange::ZERO);
        colored.set_local_text_color(Some(red));
        let mut root = Display::list(vec![run("y"), colored], IndexRange::ZERO);
        root.set_text_color(Some(blue));

        let mut recorder = Recorder::default();
        root.draw(&mut recorder);
        let colors: Vec<_> = recorder.glyphs.iter().map(|g| g.2).collect();
        assert_eq!(colors, vec![Some(blue), Some(red)]);
    }

    #[test]
    fn test_shift_down_moves_glyph() {
        let font = test_font(10.0);
        let glyph = font.glyph_for_char('(');
        let mut display = Display::glyph(glyph, font, 7.5, 2.5, 3.5, IndexRange::ZERO);
        display.shift_down(1.0);
        assert_eq!(display.ascent, 6.5);
        assert_eq!(display.descent, 3.5);
        assert_eq!(display.shift(), 1.0);

        let mut recorder = Recorder::default();
        display.draw(&mut recorder);
        assert_eq!(recorder.glyphs[0].1, Point::new(0.0, -1.0));
    }
}
