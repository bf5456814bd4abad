//! Box layout of finalized math lists
//!
//! [`layout`] walks a finalized list once, left to right. Consecutive
//! ordinary symbols, operators, relations and punctuation accumulate into
//! one text run, with inter-element space applied as a kern on the
//! preceding glyph. Every structural atom (fraction, radical, large
//! operator, table, ...) ends the current run and is laid out by the
//! helper in the matching submodule.
//!
//! Layout follows the TeXbook's Appendix G, with the parameters read from
//! the OpenType `MATH` table of the font.

use core::mem;

use log::warn;
use thiserror::Error;

use crate::color::Color;
use crate::display::{Display, TextRun};
use crate::font_metrics::{GlyphId, MathConstant, MathFont};
use crate::math_list::{Atom, AtomKind, AtomType, MathList};
use crate::spacing_data::{SpacingClass, space_between};
use crate::style::LineStyle;
use crate::types::{IndexRange, Point};
use crate::wide_character::change_font;

mod accent;
mod fraction;
mod glyphs;
mod inner;
mod large_op;
mod lines;
mod radical;
mod scripts;
mod table;

/// Fraction of a delimited formula a delimiter must cover, in
/// thousandths (TeX's `\delimiterfactor`).
const DELIMITER_FACTOR: f32 = 901.0;
/// Amount a delimiter may fall short of the formula, in points (TeX's
/// `\delimitershortfall`).
const DELIMITER_SHORTFALL_POINTS: f32 = 5.0;
/// Table row distance, in multiples of the font size.
const BASELINE_SKIP_MULTIPLIER: f32 = 1.2;
/// Minimum gap between table rows that would otherwise touch.
const LINE_SKIP_MULTIPLIER: f32 = 0.1;
/// Gap below which rows count as touching.
const LINE_SKIP_LIMIT_MULTIPLIER: f32 = 0.0;
/// Extra row spacing unit of aligned environments (TeX's `\jot`).
const JOT_MULTIPLIER: f32 = 0.3;

/// Errors raised while laying out a list.
///
/// These indicate a list that breaks the finalizer's invariants or a
/// corrupt font; layout stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Two atoms that can not be adjacent in a finalized list.
    #[error("invalid inter-element spacing between {left} and {right}")]
    InvalidSpacing {
        /// Type of the left atom.
        left: AtomType,
        /// Type of the right atom.
        right: AtomType,
    },
    /// The font declares a glyph assembly without parts.
    #[error("glyph {glyph} has an empty glyph assembly")]
    EmptyGlyphAssembly {
        /// The glyph being stretched.
        glyph: GlyphId,
    },
    /// Repeating the extenders of an assembly never makes it taller.
    #[error("glyph assembly of glyph {glyph} can not reach the requested height")]
    DegenerateGlyphAssembly {
        /// The glyph being stretched.
        glyph: GlyphId,
    },
    /// A glyph the layout can not do without is missing from the font.
    #[error("the font has no glyph for {character:?}")]
    MissingGlyph {
        /// The character looked up.
        character: char,
    },
}

/// Lay out `list` with `font` in `style`.
///
/// The list is finalized first, so raw parser output can be passed in
/// directly. The result is a list display whose origin is the baseline
/// start of the formula.
///
/// # Errors
/// A [`LayoutError`] for lists violating the finalizer's invariants or
/// fonts with broken glyph assemblies.
///
/// # Examples
/// ```no_run
/// use mathlayout::font_metrics::MathFont;
/// use mathlayout::parser::build;
/// use mathlayout::style::LineStyle;
/// use mathlayout::symbols::SymbolTable;
/// use mathlayout::typesetter::layout;
///
/// # fn run(font: &MathFont) -> Result<(), Box<dyn std::error::Error>> {
/// let symbols = SymbolTable::new();
/// let list = build(&symbols, r"\frac{1}{2}")?;
/// let display = layout(&list, font, LineStyle::Display)?;
/// assert!(display.width > 0.0);
/// # Ok(())
/// # }
/// ```
pub fn layout(list: &MathList, font: &MathFont, style: LineStyle) -> Result<Display, LayoutError> {
    let finalized = list.finalized();
    Typesetter::new(font, style, false, false).typeset(&finalized)
}

/// Glyphs being collected into one text run.
#[derive(Debug, Default)]
struct RunBuilder {
    text: String,
    glyphs: Vec<GlyphId>,
    advances: Vec<f32>,
    range: Option<IndexRange>,
}

/// Layout state of one math list.
///
/// Sub-lists (scripts, fraction parts, cells, ...) get a typesetter of
/// their own, sharing the base font.
///
/// # Cross-references
/// - Entry point: [`layout`].
/// - Spacing rules: [`crate::spacing_data`].
#[derive(Debug)]
pub struct Typesetter {
    /// Base font; style sizes are derived from it.
    font: MathFont,
    /// `font` at the size of `style`.
    style_font: MathFont,
    style: LineStyle,
    cramped: bool,
    /// Add the spaces an `\left..\right` group takes at its ends.
    spaced: bool,
    displays: Vec<Display>,
    cursor: f32,
    run: RunBuilder,
}

impl Typesetter {
    /// A typesetter for one list.
    #[must_use]
    pub fn new(font: &MathFont, style: LineStyle, cramped: bool, spaced: bool) -> Self {
        Self {
            font: font.clone(),
            style_font: font.with_size(font.style_size(style)),
            style,
            cramped,
            spaced,
            displays: Vec::new(),
            cursor: 0.0,
            run: RunBuilder::default(),
        }
    }

    /// Lay out an already finalized list.
    ///
    /// # Errors
    /// See [`layout`].
    pub fn typeset(mut self, list: &MathList) -> Result<Display, LayoutError> {
        let atoms = preprocess(list.atoms());
        self.create_displays(&atoms)?;
        let range = list
            .last()
            .map_or(IndexRange::ZERO, |last| IndexRange::new(0, last.index_range.max_range()));
        Ok(Display::list(mem::take(&mut self.displays), range))
    }

    /// Lay out a nested list with this typesetter's base font.
    fn sub_line(
        &self,
        list: &MathList,
        style: LineStyle,
        cramped: bool,
        spaced: bool,
    ) -> Result<Display, LayoutError> {
        Self::new(&self.font, style, cramped, spaced).typeset(list)
    }

    fn set_style(&mut self, style: LineStyle) {
        self.style = style;
        self.style_font = self.font.with_size(self.font.style_size(style));
    }

    fn constant(&self, constant: MathConstant) -> f32 {
        self.style_font.constant(constant)
    }

    fn axis_height(&self) -> f32 {
        self.constant(MathConstant::AxisHeight)
    }

    fn current_position(&self) -> Point {
        Point::new(self.cursor, 0.0)
    }

    /// Space between a `left` and a `right` atom in the current style, in
    /// points.
    fn inter_element_space(&self, left: AtomType, right: AtomType) -> Result<f32, LayoutError> {
        let invalid = LayoutError::InvalidSpacing { left, right };
        let (Some(left_class), Some(right_class)) = (SpacingClass::of(left), SpacingClass::of(right))
        else {
            return Err(invalid);
        };
        let mu = space_between(left_class, right_class)
            .mu(self.style)
            .ok_or(invalid)?;
        Ok(mu * self.style_font.mu())
    }

    /// Advance the cursor by the space before an atom of type `current`.
    fn add_inter_element_space(
        &mut self,
        previous: Option<AtomType>,
        current: AtomType,
    ) -> Result<(), LayoutError> {
        let space = match previous {
            Some(previous) => self.inter_element_space(previous, current)?,
            None if self.spaced => self.inter_element_space(AtomType::Open, current)?,
            None => 0.0,
        };
        self.cursor += space;
        Ok(())
    }

    /// Advance the cursor by the space before `atom`, spaced as its
    /// [`spacing_type`].
    fn add_space_before(&mut self, previous: Option<AtomType>, atom: &Atom) -> Result<(), LayoutError> {
        match spacing_type(atom) {
            Some(spaced_as) => self.add_inter_element_space(previous, spaced_as),
            None => Ok(()),
        }
    }

    /// Place `display` at the cursor and advance past it.
    fn push_at_cursor(&mut self, mut display: Display) -> usize {
        display.set_position(self.current_position());
        self.cursor += display.width;
        self.displays.push(display);
        self.displays.len() - 1
    }

    /// Turn the pending text run into a display. Returns its index.
    fn flush_run(&mut self) -> Option<usize> {
        if self.run.text.is_empty() {
            self.run = RunBuilder::default();
            return None;
        }
        let run = mem::take(&mut self.run);
        let display = Display::text_run(
            TextRun {
                text: run.text,
                glyphs: run.glyphs,
                advances: run.advances,
                font: self.style_font.clone(),
            },
            run.range.unwrap_or_default(),
        );
        Some(self.push_at_cursor(display))
    }

    fn append_to_run(&mut self, atom: &Atom) {
        let glyphs = self.style_font.glyphs_for_str(&atom.nucleus);
        let advances = self.style_font.advances(&glyphs);
        self.run.text.push_str(&atom.nucleus);
        self.run.glyphs.extend(glyphs);
        self.run.advances.extend(advances);
        self.run.range = Some(
            self.run
                .range
                .map_or(atom.index_range, |range| range.union(&atom.index_range)),
        );
    }

    fn create_displays(&mut self, atoms: &[Atom]) -> Result<(), LayoutError> {
        let mut previous: Option<AtomType> = None;
        for atom in atoms {
            let atom_type = atom.atom_type();
            match atom.kind() {
                AtomKind::Space { width } => {
                    self.flush_run();
                    self.cursor += width * self.style_font.mu();
                    continue;
                }
                AtomKind::Style { style } => {
                    self.flush_run();
                    self.set_style(*style);
                    continue;
                }
                AtomKind::Color { color, inner_list } => {
                    self.flush_run();
                    // A text color group is spaced like its first spaced atom.
                    if atom_type == AtomType::TextColor
                        && let Some(first) = first_spacing_type(inner_list)
                        && previous.is_some()
                    {
                        self.add_inter_element_space(previous, first)?;
                    }
                    let mut display = self.sub_line(inner_list, self.style, false, false)?;
                    display.set_local_text_color(parse_color(color));
                    self.push_at_cursor(display);
                }
                AtomKind::Radical(radical) => {
                    self.flush_run();
                    self.add_space_before(previous, atom)?;
                    let display = self.make_radical(radical, atom.index_range)?;
                    let index = self.push_at_cursor(display);
                    self.make_scripts_if_any(atom, index, 0.0)?;
                }
                AtomKind::Fraction(fraction) => {
                    self.flush_run();
                    self.add_inter_element_space(previous, atom_type)?;
                    let display = self.make_fraction(fraction, atom.index_range)?;
                    let index = self.push_at_cursor(display);
                    self.make_scripts_if_any(atom, index, 0.0)?;
                }
                AtomKind::LargeOperator { has_limits } => {
                    self.flush_run();
                    self.add_inter_element_space(previous, atom_type)?;
                    self.make_large_op(atom, *has_limits)?;
                }
                AtomKind::Inner(inner) => {
                    self.flush_run();
                    self.add_inter_element_space(previous, atom_type)?;
                    let display = if inner.left_boundary().is_some() || inner.right_boundary().is_some() {
                        self.make_left_right(inner, atom.index_range)?
                    } else {
                        self.sub_line(&inner.inner_list, self.style, self.cramped, false)?
                    };
                    let index = self.push_at_cursor(display);
                    self.make_scripts_if_any(atom, index, 0.0)?;
                }
                AtomKind::Underline { inner_list } => {
                    self.flush_run();
                    self.add_space_before(previous, atom)?;
                    let display = self.make_underline(inner_list, atom.index_range)?;
                    let index = self.push_at_cursor(display);
                    self.make_scripts_if_any(atom, index, 0.0)?;
                    previous = spacing_type(atom);
                    continue;
                }
                AtomKind::Overline { inner_list } => {
                    self.flush_run();
                    self.add_space_before(previous, atom)?;
                    let display = self.make_overline(inner_list, atom.index_range)?;
                    let index = self.push_at_cursor(display);
                    self.make_scripts_if_any(atom, index, 0.0)?;
                    previous = spacing_type(atom);
                    continue;
                }
                AtomKind::Accent { inner_list } => {
                    self.flush_run();
                    self.add_space_before(previous, atom)?;
                    let (display, scripts_moved) = self.make_accent(atom, inner_list)?;
                    let index = self.push_at_cursor(display);
                    if !scripts_moved {
                        self.make_scripts_if_any(atom, index, 0.0)?;
                    }
                    previous = spacing_type(atom);
                    continue;
                }
                AtomKind::Table(table) => {
                    self.flush_run();
                    self.add_space_before(previous, atom)?;
                    let display = self.make_table(table, atom.index_range)?;
                    self.push_at_cursor(display);
                    previous = spacing_type(atom);
                    continue;
                }
                AtomKind::Plain => {
                    if atom_type == AtomType::Boundary {
                        continue;
                    }
                    self.add_text_atom(atom, previous)?;
                }
            }
            previous = Some(atom_type);
        }
        self.flush_run();

        if self.spaced
            && let Some(last_type) = previous
            && let Some(space) = self.inter_element_space(last_type, AtomType::Close).ok()
            && let Some(last) = self.displays.last_mut()
        {
            last.width += space;
        }
        Ok(())
    }

    /// Add an ordinary symbol, operator, relation, bracket or punctuation
    /// to the current text run.
    fn add_text_atom(&mut self, atom: &Atom, previous: Option<AtomType>) -> Result<(), LayoutError> {
        let atom_type = atom.atom_type();
        let space = match previous {
            Some(previous) => self.inter_element_space(previous, atom_type)?,
            None if self.spaced => self.inter_element_space(AtomType::Open, atom_type)?,
            None => 0.0,
        };
        match self.run.advances.last_mut() {
            Some(last) => *last += space,
            None => self.cursor += space,
        }
        self.append_to_run(atom);

        if atom.has_scripts() {
            let index = self.flush_run();
            let delta = atom
                .nucleus
                .chars()
                .last()
                .map_or(0.0, |ch| {
                    let glyph = self.style_font.glyph_for_char(ch);
                    self.style_font.italic_correction(glyph)
                });
            if delta > 0.0 && atom.subscript().is_none() {
                // Superscripts clear the italic overhang of the nucleus.
                self.cursor += delta;
            }
            self.make_scripts(atom, index, delta)?;
        }
        Ok(())
    }

    fn make_scripts_if_any(&mut self, atom: &Atom, index: usize, delta: f32) -> Result<(), LayoutError> {
        if atom.has_scripts() {
            self.make_scripts(atom, Some(index), delta)?;
        }
        Ok(())
    }
}

/// Type an atom is spaced as once preprocessed, or `None` for atoms that
/// take no inter-element space.
///
/// Radicals and the decorated sub-lists are spaced as ordinary atoms
/// (TeXbook rules 16 and 9), tables as inner atoms.
fn spacing_type(atom: &Atom) -> Option<AtomType> {
    match (atom.atom_type(), atom.kind()) {
        (AtomType::Space | AtomType::Style | AtomType::Boundary, _) => None,
        (AtomType::TextColor, AtomKind::Color { inner_list, .. }) => first_spacing_type(inner_list),
        (
            AtomType::Variable
            | AtomType::Number
            | AtomType::UnaryOperator
            | AtomType::Radical
            | AtomType::Accent
            | AtomType::Overline
            | AtomType::Underline,
            _,
        ) => Some(AtomType::Ordinary),
        (AtomType::Table, _) => Some(AtomType::Inner),
        (other, _) => Some(other),
    }
}

/// Spacing type of the first atom of `list` that takes inter-element space.
fn first_spacing_type(list: &MathList) -> Option<AtomType> {
    list.iter().find_map(spacing_type)
}

fn parse_color(color: &str) -> Option<Color> {
    match color.parse::<Color>() {
        Ok(color) => Some(color),
        Err(err) => {
            warn!("ignoring color {color:?}: {err}");
            None
        }
    }
}

/// Restyle variables and numbers into ordinary text and fuse runs of
/// ordinary atoms, the way TeX's input stage delivers them.
fn preprocess(atoms: &[Atom]) -> Vec<Atom> {
    let mut preprocessed: Vec<Atom> = Vec::with_capacity(atoms.len());
    for atom in atoms {
        let mut atom = atom.clone();
        match atom.atom_type() {
            AtomType::Variable | AtomType::Number => {
                atom.nucleus = change_font(&atom.nucleus, atom.font_style);
                atom.set_atom_type(AtomType::Ordinary);
            }
            AtomType::UnaryOperator => atom.set_atom_type(AtomType::Ordinary),
            _ => {}
        }
        if atom.atom_type() == AtomType::Ordinary
            && let Some(previous) = preprocessed.last_mut()
            && previous.atom_type() == AtomType::Ordinary
            && !previous.has_scripts()
        {
            previous.fuse(&atom);
            continue;
        }
        preprocessed.push(atom);
    }
    preprocessed
}
