//! Inter-atom spacing
//!
//! TeX inserts space between adjacent atoms according to their classes
//! (TeXbook, chapter 18). This module holds that table. The typesetter
//! multiplies the amounts, given in math units, by the `mu` of the current
//! style's font.

use phf::{Map, phf_map};
use strum::AsRefStr;

use crate::math_list::AtomType;
use crate::style::LineStyle;

/// Thin space (3 mu), `\,` in LaTeX.
pub const THINSPACE: f32 = 3.0;

/// Medium space (4 mu), `\:` in LaTeX.
pub const MEDIUMSPACE: f32 = 4.0;

/// Thick space (5 mu), `\;` in LaTeX.
pub const THICKSPACE: f32 = 5.0;

/// Space inserted between two atom classes.
///
/// The `Ns` variants are "non-script" spaces: they vanish in script and
/// scriptscript style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterElementSpace {
    /// No space.
    None,
    /// A thin space in every style.
    Thin,
    /// A thin space outside script styles.
    NsThin,
    /// A medium space outside script styles.
    NsMedium,
    /// A thick space outside script styles.
    NsThick,
    /// The pair can not occur in a finalized list, e.g. a binary operator
    /// directly after a relation.
    Invalid,
}

impl InterElementSpace {
    /// The space in math units in `style`, or `None` for an invalid pair.
    ///
    /// # Examples
    /// ```
    /// use mathlayout::spacing_data::{InterElementSpace, MEDIUMSPACE};
    /// use mathlayout::style::LineStyle;
    ///
    /// assert_eq!(InterElementSpace::NsMedium.mu(LineStyle::Text), Some(MEDIUMSPACE));
    /// assert_eq!(InterElementSpace::NsMedium.mu(LineStyle::Script), Some(0.0));
    /// assert_eq!(InterElementSpace::Invalid.mu(LineStyle::Text), None);
    /// ```
    #[must_use]
    pub const fn mu(self, style: LineStyle) -> Option<f32> {
        let amount = match self {
            Self::Invalid => return None,
            Self::None => 0.0,
            Self::Thin => THINSPACE,
            _ if style.is_tight() => 0.0,
            Self::NsThin => THINSPACE,
            Self::NsMedium => MEDIUMSPACE,
            Self::NsThick => THICKSPACE,
        };
        Some(amount)
    }
}

/// Atom classes that take part in spacing.
///
/// # Cross-references
/// - [`SPACINGS`] is keyed by the string form of these classes.
/// - [`crate::typesetter`] maps every atom it emits to a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SpacingClass {
    /// Ordinary atoms, placeholders and color groups.
    Ord,
    /// Large operators.
    Op,
    /// Binary operators.
    Bin,
    /// Relations.
    Rel,
    /// Opening delimiters.
    Open,
    /// Closing delimiters.
    Close,
    /// Punctuation.
    Punct,
    /// Fractions and inner atoms.
    Inner,
    /// Radicals. Only ever the left-hand side of a pair.
    Radical,
}

impl SpacingClass {
    /// The class of an atom of type `atom_type`, or `None` for atoms that
    /// never take part in spacing (spaces, style changes and boundaries).
    #[must_use]
    pub const fn of(atom_type: AtomType) -> Option<Self> {
        let class = match atom_type {
            AtomType::Ordinary
            | AtomType::Number
            | AtomType::Variable
            | AtomType::UnaryOperator
            | AtomType::Placeholder
            | AtomType::Color
            | AtomType::TextColor => Self::Ord,
            AtomType::LargeOperator => Self::Op,
            AtomType::BinaryOperator => Self::Bin,
            AtomType::Relation => Self::Rel,
            AtomType::Open => Self::Open,
            AtomType::Close => Self::Close,
            AtomType::Punctuation => Self::Punct,
            AtomType::Fraction | AtomType::Inner => Self::Inner,
            AtomType::Radical => Self::Radical,
            _ => return None,
        };
        Some(class)
    }
}

/// Spacing rules, indexed by left class then right class.
///
/// # Spacing Rules Summary
/// | Left \ Right | ord  | op   | bin  | rel   | open | close | punct | inner |
/// |--------------|------|------|------|-------|------|-------|-------|-------|
/// | ord          | -    | thin | med* | thick*| -    | -     | -     | thin* |
/// | op           | thin | thin | ×    | thick*| -    | -     | -     | thin* |
/// | bin          | med* | med* | ×    | ×     | med* | ×     | ×     | med*  |
/// | rel          |thick*|thick*| ×    | -     |thick*| -     | -     | thick*|
/// | open         | -    | -    | ×    | -     | -    | -     | -     | -     |
/// | close        | -    | thin | med* | thick*| -    | -     | -     | thin* |
/// | punct        | thin*| thin*| ×    | thin* | thin*| thin* | thin* | thin* |
/// | inner        | thin*| thin | med* | thick*| thin*| -     | thin* | thin* |
/// | radical      | med* | thin*| med* | thick*| -    | -     | -     | thin* |
///
/// `*` marks spaces dropped in script styles and `×` invalid pairs.
pub const SPACINGS: Map<&'static str, Map<&'static str, InterElementSpace>> = phf_map! {
    "ord" => phf_map! {
        "ord" => InterElementSpace::None,
        "op" => InterElementSpace::Thin,
        "bin" => InterElementSpace::NsMedium,
        "rel" => InterElementSpace::NsThick,
        "open" => InterElementSpace::None,
        "close" => InterElementSpace::None,
        "punct" => InterElementSpace::None,
        "inner" => InterElementSpace::NsThin,
    },
    "op" => phf_map! {
        "ord" => InterElementSpace::Thin,
        "op" => InterElementSpace::Thin,
        "bin" => InterElementSpace::Invalid,
        "rel" => InterElementSpace::NsThick,
        "open" => InterElementSpace::None,
        "close" => InterElementSpace::None,
        "punct" => InterElementSpace::None,
        "inner" => InterElementSpace::NsThin,
    },
    "bin" => phf_map! {
        "ord" => InterElementSpace::NsMedium,
        "op" => InterElementSpace::NsMedium,
        "bin" => InterElementSpace::Invalid,
        "rel" => InterElementSpace::Invalid,
        "open" => InterElementSpace::NsMedium,
        "close" => InterElementSpace::Invalid,
        "punct" => InterElementSpace::Invalid,
        "inner" => InterElementSpace::NsMedium,
    },
    "rel" => phf_map! {
        "ord" => InterElementSpace::NsThick,
        "op" => InterElementSpace::NsThick,
        "bin" => InterElementSpace::Invalid,
        "rel" => InterElementSpace::None,
        "open" => InterElementSpace::NsThick,
        "close" => InterElementSpace::None,
        "punct" => InterElementSpace::None,
        "inner" => InterElementSpace::NsThick,
    },
    "open" => phf_map! {
        "ord" => InterElementSpace::None,
        "op" => InterElementSpace::None,
        "bin" => InterElementSpace::Invalid,
        "rel" => InterElementSpace::None,
        "open" => InterElementSpace::None,
        "close" => InterElementSpace::None,
        "punct" => InterElementSpace::None,
        "inner" => InterElementSpace::None,
    },
    "close" => phf_map! {
        "ord" => InterElementSpace::None,
        "op" => InterElementSpace::Thin,
        "bin" => InterElementSpace::NsMedium,
        "rel" => InterElementSpace::NsThick,
        "open" => InterElementSpace::None,
        "close" => InterElementSpace::None,
        "punct" => InterElementSpace::None,
        "inner" => InterElementSpace::NsThin,
    },
    "punct" => phf_map! {
        "ord" => InterElementSpace::NsThin,
        "op" => InterElementSpace::NsThin,
        "bin" => InterElementSpace::Invalid,
        "rel" => InterElementSpace::NsThin,
        "open" => InterElementSpace::NsThin,
        "close" => InterElementSpace::NsThin,
        "punct" => InterElementSpace::NsThin,
        "inner" => InterElementSpace::NsThin,
    },
    "inner" => phf_map! {
        "ord" => InterElementSpace::NsThin,
        "op" => InterElementSpace::Thin,
        "bin" => InterElementSpace::NsMedium,
        "rel" => InterElementSpace::NsThick,
        "open" => InterElementSpace::NsThin,
        "close" => InterElementSpace::None,
        "punct" => InterElementSpace::NsThin,
        "inner" => InterElementSpace::NsThin,
    },
    "radical" => phf_map! {
        "ord" => InterElementSpace::NsMedium,
        "op" => InterElementSpace::NsThin,
        "bin" => InterElementSpace::NsMedium,
        "rel" => InterElementSpace::NsThick,
        "open" => InterElementSpace::None,
        "close" => InterElementSpace::None,
        "punct" => InterElementSpace::None,
        "inner" => InterElementSpace::NsThin,
    },
};

/// The space between a `left` atom and a `right` atom.
///
/// Pairs the table does not list, such as a radical on the right, are
/// [`InterElementSpace::Invalid`].
#[must_use]
pub fn space_between(left: SpacingClass, right: SpacingClass) -> InterElementSpace {
    SPACINGS
        .get(left.as_ref())
        .and_then(|row| row.get(right.as_ref()))
        .copied()
        .unwrap_or(InterElementSpace::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacings_structure() {
        assert_eq!(SPACINGS.len(), 9);
        for (class, row) in SPACINGS.entries() {
            assert_eq!(row.len(), 8, "incomplete row: {class}");
            assert!(!row.contains_key("radical"));
        }
    }

    #[test]
    fn test_space_between() {
        let space = |left, right| space_between(left, right);
        assert_eq!(space(SpacingClass::Ord, SpacingClass::Rel), InterElementSpace::NsThick);
        assert_eq!(space(SpacingClass::Op, SpacingClass::Ord), InterElementSpace::Thin);
        assert_eq!(space(SpacingClass::Bin, SpacingClass::Bin), InterElementSpace::Invalid);
        assert_eq!(space(SpacingClass::Radical, SpacingClass::Ord), InterElementSpace::NsMedium);
        assert_eq!(space(SpacingClass::Ord, SpacingClass::Radical), InterElementSpace::Invalid);
    }

    #[test]
    fn test_script_styles_drop_non_script_spaces() {
        assert_eq!(InterElementSpace::Thin.mu(LineStyle::ScriptScript), Some(THINSPACE));
        assert_eq!(InterElementSpace::NsThin.mu(LineStyle::Display), Some(THINSPACE));
        assert_eq!(InterElementSpace::NsThick.mu(LineStyle::Script), Some(0.0));
        assert_eq!(InterElementSpace::None.mu(LineStyle::Text), Some(0.0));
    }

    #[test]
    fn test_class_of_atom_types() {
        assert_eq!(SpacingClass::of(AtomType::Variable), Some(SpacingClass::Ord));
        assert_eq!(SpacingClass::of(AtomType::Fraction), Some(SpacingClass::Inner));
        assert_eq!(SpacingClass::of(AtomType::Space), None);
        assert_eq!(SpacingClass::of(AtomType::Boundary), None);
    }
}
