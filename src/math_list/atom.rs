//! Atoms, the units of a math list.

use strum::{AsRefStr, Display, EnumCount, EnumIter};

use super::{MathList, Table};
use crate::style::LineStyle;
use crate::types::{FontStyle, IndexRange};

/// The TeX class of an atom.
///
/// The declaration order is significant: atom types are totally ordered and
/// only types ranking below [`AtomType::Boundary`] may carry scripts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumCount,
    AsRefStr,
    Display,
)]
pub enum AtomType {
    /// An ordinary symbol, e.g. `/`.
    Ordinary,
    /// A number, e.g. `12`. Fused with adjacent numbers on finalization.
    Number,
    /// A variable, e.g. `x`. Rendered in italics by default.
    Variable,
    /// A binary operator, e.g. `+`.
    BinaryOperator,
    /// A unary operator. Only created by reclassifying binary operators.
    UnaryOperator,
    /// A relation, e.g. `=`.
    Relation,
    /// An opening bracket.
    Open,
    /// A closing bracket.
    Close,
    /// A fraction.
    Fraction,
    /// A radical.
    Radical,
    /// Punctuation, e.g. `,`.
    Punctuation,
    /// A placeholder square for missing content.
    Placeholder,
    /// A large operator such as `\sum` or a named function like `\sin`.
    LargeOperator,
    /// An inner atom, i.e. a `\left ... \right` group.
    Inner,
    /// An underlined sub-list.
    Underline,
    /// An overlined sub-list.
    Overline,
    /// An accented sub-list.
    Accent,
    /// A delimiter of an inner atom. Never placed in a list directly.
    Boundary,
    /// Fixed horizontal space.
    Space,
    /// A line-style change such as `\displaystyle`.
    Style,
    /// A `\color` group.
    Color,
    /// A `\textcolor` group.
    TextColor,
    /// A table (matrix or aligned environment).
    Table,
}

impl AtomType {
    /// Whether atoms of this type may carry a superscript or subscript.
    #[must_use]
    pub fn scripts_allowed(self) -> bool {
        self < Self::Boundary
    }
}

/// Payload of a fraction atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Fraction {
    /// List above the rule.
    pub numerator: MathList,
    /// List below the rule.
    pub denominator: MathList,
    /// `false` for the ruleless `\atop` family.
    pub has_rule: bool,
    /// Delimiter name drawn on the left, e.g. `(` for `\choose`.
    pub left_delimiter: Option<String>,
    /// Delimiter name drawn on the right.
    pub right_delimiter: Option<String>,
}

impl Default for Fraction {
    fn default() -> Self {
        Self {
            numerator: MathList::new(),
            denominator: MathList::new(),
            has_rule: true,
            left_delimiter: None,
            right_delimiter: None,
        }
    }
}

/// Payload of a radical atom.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Radical {
    /// Optional root index, e.g. `3` in `\sqrt[3]{x}`.
    pub degree: Option<MathList>,
    /// The list under the radical sign.
    pub radicand: MathList,
}

/// Payload of an inner atom.
///
/// The boundaries, when present, are atoms of type
/// [`AtomType::Boundary`]; the setters enforce this.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Inner {
    /// The enclosed list.
    pub inner_list: MathList,
    pub(crate) left_boundary: Option<Box<Atom>>,
    pub(crate) right_boundary: Option<Box<Atom>>,
}

impl Inner {
    /// The left delimiter.
    #[must_use]
    pub fn left_boundary(&self) -> Option<&Atom> {
        self.left_boundary.as_deref()
    }

    /// The right delimiter.
    #[must_use]
    pub fn right_boundary(&self) -> Option<&Atom> {
        self.right_boundary.as_deref()
    }

    /// Set the left delimiter.
    ///
    /// # Panics
    /// If the atom is not of type [`AtomType::Boundary`].
    pub fn set_left_boundary(&mut self, boundary: Option<Atom>) {
        self.left_boundary = boundary.map(Self::checked_boundary);
    }

    /// Set the right delimiter.
    ///
    /// # Panics
    /// If the atom is not of type [`AtomType::Boundary`].
    pub fn set_right_boundary(&mut self, boundary: Option<Atom>) {
        self.right_boundary = boundary.map(Self::checked_boundary);
    }

    fn checked_boundary(atom: Atom) -> Box<Atom> {
        assert!(
            atom.atom_type() == AtomType::Boundary,
            "inner boundaries must be Boundary atoms, got {}",
            atom.atom_type()
        );
        Box::new(atom)
    }
}

/// Variant-specific payload of an [`Atom`].
#[derive(Debug, Clone, PartialEq)]
pub enum AtomKind {
    /// No payload beyond the nucleus: ordinary symbols, operators,
    /// relations, brackets, punctuation, placeholders and boundaries.
    Plain,
    /// See [`Fraction`].
    Fraction(Fraction),
    /// See [`Radical`].
    Radical(Radical),
    /// A large operator; `has_limits` stacks scripts above and below in
    /// display style.
    LargeOperator {
        /// Whether limits are placed above and below.
        has_limits: bool,
    },
    /// See [`Inner`].
    Inner(Inner),
    /// Line drawn above `inner_list`.
    Overline {
        /// The overlined list.
        inner_list: MathList,
    },
    /// Line drawn below `inner_list`.
    Underline {
        /// The underlined list.
        inner_list: MathList,
    },
    /// Accent placed over `inner_list`; the accent character is the
    /// atom's nucleus.
    Accent {
        /// The accented list.
        inner_list: MathList,
    },
    /// Horizontal space in math units (1/18 em).
    Space {
        /// Width in mu; negative for `\!`.
        width: f32,
    },
    /// Switch the line style for the rest of the list.
    Style {
        /// The style selected.
        style: LineStyle,
    },
    /// `\color{..}{..}` or `\textcolor{..}{..}`, distinguished by the atom
    /// type.
    Color {
        /// The color as written.
        color: String,
        /// The colored list.
        inner_list: MathList,
    },
    /// See [`Table`].
    Table(Table),
}

impl AtomKind {
    /// The default payload for an atom of the given type.
    fn for_type(atom_type: AtomType) -> Self {
        match atom_type {
            AtomType::Fraction => Self::Fraction(Fraction::default()),
            AtomType::Radical => Self::Radical(Radical::default()),
            AtomType::LargeOperator => Self::LargeOperator { has_limits: false },
            AtomType::Inner => Self::Inner(Inner::default()),
            AtomType::Overline => Self::Overline {
                inner_list: MathList::new(),
            },
            AtomType::Underline => Self::Underline {
                inner_list: MathList::new(),
            },
            AtomType::Accent => Self::Accent {
                inner_list: MathList::new(),
            },
            AtomType::Space => Self::Space { width: 0.0 },
            AtomType::Style => Self::Style {
                style: LineStyle::Display,
            },
            AtomType::Color | AtomType::TextColor => Self::Color {
                color: String::new(),
                inner_list: MathList::new(),
            },
            AtomType::Table => Self::Table(Table::default()),
            _ => Self::Plain,
        }
    }

    /// Rebuild the payload, transforming every nested list with `f`.
    ///
    /// This is the single recursion point used by the finalizer and any
    /// other whole-tree transform: adding a variant only requires extending
    /// this match.
    #[must_use]
    pub fn map_lists<F>(&self, f: &mut F) -> Self
    where
        F: FnMut(&MathList) -> MathList,
    {
        match self {
            Self::Plain => Self::Plain,
            Self::Fraction(frac) => Self::Fraction(Fraction {
                numerator: f(&frac.numerator),
                denominator: f(&frac.denominator),
                has_rule: frac.has_rule,
                left_delimiter: frac.left_delimiter.clone(),
                right_delimiter: frac.right_delimiter.clone(),
            }),
            Self::Radical(rad) => Self::Radical(Radical {
                degree: rad.degree.as_ref().map(&mut *f),
                radicand: f(&rad.radicand),
            }),
            Self::LargeOperator { has_limits } => Self::LargeOperator {
                has_limits: *has_limits,
            },
            Self::Inner(inner) => Self::Inner(Inner {
                inner_list: f(&inner.inner_list),
                left_boundary: inner.left_boundary.clone(),
                right_boundary: inner.right_boundary.clone(),
            }),
            Self::Overline { inner_list } => Self::Overline {
                inner_list: f(inner_list),
            },
            Self::Underline { inner_list } => Self::Underline {
                inner_list: f(inner_list),
            },
            Self::Accent { inner_list } => Self::Accent {
                inner_list: f(inner_list),
            },
            Self::Space { width } => Self::Space { width: *width },
            Self::Style { style } => Self::Style { style: *style },
            Self::Color { color, inner_list } => Self::Color {
                color: color.clone(),
                inner_list: f(inner_list),
            },
            Self::Table(table) => Self::Table(table.map_cells(f)),
        }
    }
}

/// The unit of a math list: a symbol, operator, or structural construct.
///
/// # Cross-references
/// - Created by [`crate::symbols::SymbolTable`] and the parser.
/// - Normalized by [`MathList::finalized`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    atom_type: AtomType,
    /// Primary text of the atom; may be empty.
    pub nucleus: String,
    superscript: Option<MathList>,
    subscript: Option<MathList>,
    /// Font style applied to the nucleus when typesetting.
    pub font_style: FontStyle,
    /// Atoms merged into this one, in order. Empty unless fused.
    pub fused_atoms: Vec<Atom>,
    /// Position of the atom in the source list.
    pub index_range: IndexRange,
    kind: AtomKind,
}

impl Atom {
    /// Create an atom of the given type with the default payload for that
    /// type.
    pub fn new<S: Into<String>>(atom_type: AtomType, nucleus: S) -> Self {
        Self::with_kind(atom_type, nucleus, AtomKind::for_type(atom_type))
    }

    fn with_kind<S: Into<String>>(atom_type: AtomType, nucleus: S, kind: AtomKind) -> Self {
        Self {
            atom_type,
            nucleus: nucleus.into(),
            superscript: None,
            subscript: None,
            font_style: FontStyle::Default,
            fused_atoms: Vec::new(),
            index_range: IndexRange::ZERO,
            kind,
        }
    }

    /// A fraction, with or without the dividing rule.
    #[must_use]
    pub fn fraction(fraction: Fraction) -> Self {
        Self::with_kind(AtomType::Fraction, "", AtomKind::Fraction(fraction))
    }

    /// A radical with the given radicand and optional degree.
    #[must_use]
    pub fn radical(radicand: MathList, degree: Option<MathList>) -> Self {
        Self::with_kind(
            AtomType::Radical,
            "",
            AtomKind::Radical(Radical { degree, radicand }),
        )
    }

    /// A large operator such as `\sum` or `\sin`.
    pub fn large_operator<S: Into<String>>(nucleus: S, has_limits: bool) -> Self {
        Self::with_kind(
            AtomType::LargeOperator,
            nucleus,
            AtomKind::LargeOperator { has_limits },
        )
    }

    /// An inner atom with the given payload.
    #[must_use]
    pub fn inner(inner: Inner) -> Self {
        Self::with_kind(AtomType::Inner, "", AtomKind::Inner(inner))
    }

    /// An overline over `inner_list`.
    #[must_use]
    pub fn overline(inner_list: MathList) -> Self {
        Self::with_kind(AtomType::Overline, "", AtomKind::Overline { inner_list })
    }

    /// An underline under `inner_list`.
    #[must_use]
    pub fn underline(inner_list: MathList) -> Self {
        Self::with_kind(AtomType::Underline, "", AtomKind::Underline { inner_list })
    }

    /// An accent character over `inner_list`.
    pub fn accent<S: Into<String>>(accent: S, inner_list: MathList) -> Self {
        Self::with_kind(AtomType::Accent, accent, AtomKind::Accent { inner_list })
    }

    /// Horizontal space of `width` math units.
    #[must_use]
    pub fn space(width: f32) -> Self {
        Self::with_kind(AtomType::Space, "", AtomKind::Space { width })
    }

    /// A line-style change.
    #[must_use]
    pub fn style(style: LineStyle) -> Self {
        Self::with_kind(AtomType::Style, "", AtomKind::Style { style })
    }

    /// A `\color` group; `text_color` selects `\textcolor`.
    pub fn color<S: Into<String>>(color: S, inner_list: MathList, text_color: bool) -> Self {
        let atom_type = if text_color {
            AtomType::TextColor
        } else {
            AtomType::Color
        };
        Self::with_kind(
            atom_type,
            "",
            AtomKind::Color {
                color: color.into(),
                inner_list,
            },
        )
    }

    /// A table atom.
    #[must_use]
    pub fn table(table: Table) -> Self {
        Self::with_kind(AtomType::Table, "", AtomKind::Table(table))
    }

    /// The TeX class of this atom.
    #[must_use]
    pub const fn atom_type(&self) -> AtomType {
        self.atom_type
    }

    /// Reclassify a plain atom, e.g. binary to unary.
    ///
    /// # Panics
    /// If the atom carries a structural payload that does not match the new
    /// type.
    pub fn set_atom_type(&mut self, atom_type: AtomType) {
        assert!(
            matches!(self.kind, AtomKind::Plain)
                && matches!(AtomKind::for_type(atom_type), AtomKind::Plain),
            "cannot reclassify {} as {}",
            self.atom_type,
            atom_type
        );
        self.atom_type = atom_type;
    }

    /// Variant-specific payload.
    #[must_use]
    pub const fn kind(&self) -> &AtomKind {
        &self.kind
    }

    /// Mutable access to the payload. The variant must stay consistent
    /// with [`Atom::atom_type`].
    pub fn kind_mut(&mut self) -> &mut AtomKind {
        &mut self.kind
    }

    /// Whether this atom may carry scripts.
    #[must_use]
    pub fn scripts_allowed(&self) -> bool {
        self.atom_type.scripts_allowed()
    }

    /// Returns `true` if a superscript or subscript is attached.
    #[must_use]
    pub const fn has_scripts(&self) -> bool {
        self.superscript.is_some() || self.subscript.is_some()
    }

    /// The superscript, if any.
    #[must_use]
    pub const fn superscript(&self) -> Option<&MathList> {
        self.superscript.as_ref()
    }

    /// The subscript, if any.
    #[must_use]
    pub const fn subscript(&self) -> Option<&MathList> {
        self.subscript.as_ref()
    }

    /// Attach or clear the superscript.
    ///
    /// # Panics
    /// When attaching to an atom whose type does not allow scripts.
    pub fn set_superscript(&mut self, script: Option<MathList>) {
        self.check_script(script.as_ref());
        self.superscript = script;
    }

    /// Attach or clear the subscript.
    ///
    /// # Panics
    /// When attaching to an atom whose type does not allow scripts.
    pub fn set_subscript(&mut self, script: Option<MathList>) {
        self.check_script(script.as_ref());
        self.subscript = script;
    }

    /// Detach and return the superscript.
    pub fn take_superscript(&mut self) -> Option<MathList> {
        self.superscript.take()
    }

    /// Detach and return the subscript.
    pub fn take_subscript(&mut self) -> Option<MathList> {
        self.subscript.take()
    }

    fn check_script(&self, script: Option<&MathList>) {
        assert!(
            script.is_none() || self.scripts_allowed(),
            "scripts are not allowed on atoms of type {}",
            self.atom_type
        );
    }

    /// Merge `other` into this atom: the nuclei are concatenated, the range
    /// is extended, and `other`'s scripts become this atom's scripts.
    ///
    /// # Panics
    /// If this atom already has scripts, or if the types differ.
    pub fn fuse(&mut self, other: &Self) {
        assert!(
            !self.has_scripts(),
            "cannot fuse into an atom that has scripts"
        );
        assert!(
            self.atom_type == other.atom_type,
            "only atoms of the same type can be fused, got {} and {}",
            self.atom_type,
            other.atom_type
        );

        if self.fused_atoms.is_empty() {
            let copy = self.clone();
            self.fused_atoms.push(copy);
        }
        if other.fused_atoms.is_empty() {
            self.fused_atoms.push(other.clone());
        } else {
            self.fused_atoms.extend(other.fused_atoms.iter().cloned());
        }

        self.nucleus.push_str(&other.nucleus);
        self.index_range.length += other.index_range.length;
        self.superscript.clone_from(&other.superscript);
        self.subscript.clone_from(&other.subscript);
    }

    /// Apply `f` to every list nested in this atom, scripts included, and
    /// return the rebuilt atom.
    #[must_use]
    pub fn map_lists<F>(&self, f: &mut F) -> Self
    where
        F: FnMut(&MathList) -> MathList,
    {
        Self {
            atom_type: self.atom_type,
            nucleus: self.nucleus.clone(),
            superscript: self.superscript.as_ref().map(&mut *f),
            subscript: self.subscript.as_ref().map(&mut *f),
            font_style: self.font_style,
            fused_atoms: self.fused_atoms.clone(),
            index_range: self.index_range,
            kind: self.kind.map_lists(f),
        }
    }

    /// The atom with every nested list finalized.
    #[must_use]
    pub fn finalized(&self) -> Self {
        self.map_lists(&mut MathList::finalized)
    }
}
