//! List finalization: the normalization pass between parsing and layout.

use super::{AtomType, MathList};
use crate::types::IndexRange;

/// Types after which a binary operator has no left operand and becomes
/// unary.
const fn is_binary_canceller(atom_type: AtomType) -> bool {
    matches!(
        atom_type,
        AtomType::BinaryOperator
            | AtomType::Relation
            | AtomType::Open
            | AtomType::Punctuation
            | AtomType::LargeOperator
    )
}

impl MathList {
    /// A normalized copy of this list, ready to be typeset.
    ///
    /// In one forward pass:
    /// - atoms without a range get a length-1 range right after the
    ///   previous atom;
    /// - a binary operator with no left operand becomes unary;
    /// - a relation, punctuation or closing bracket turns a preceding
    ///   binary operator into a unary one;
    /// - consecutive numbers are fused when the earlier one has no
    ///   scripts;
    /// - a trailing binary operator becomes unary.
    ///
    /// Every nested list is finalized independently. Finalizing a
    /// finalized list returns an equal list.
    #[must_use]
    pub fn finalized(&self) -> Self {
        let mut out = Self::new();
        for atom in &self.atoms {
            let mut current = atom.finalized();
            let prev = out.atoms.last_mut();

            if current.index_range.is_zero() {
                let location = prev.as_ref().map_or(0, |p| p.index_range.max_range());
                current.index_range = IndexRange::new(location, 1);
            }

            match current.atom_type() {
                AtomType::BinaryOperator => {
                    if prev
                        .as_ref()
                        .is_none_or(|p| is_binary_canceller(p.atom_type()))
                    {
                        current.set_atom_type(AtomType::UnaryOperator);
                    }
                }
                AtomType::Relation | AtomType::Punctuation | AtomType::Close => {
                    if let Some(p) = prev
                        && p.atom_type() == AtomType::BinaryOperator
                    {
                        p.set_atom_type(AtomType::UnaryOperator);
                    }
                }
                AtomType::Number => {
                    if let Some(p) = prev
                        && p.atom_type() == AtomType::Number
                        && !p.has_scripts()
                    {
                        p.fuse(&current);
                        continue;
                    }
                }
                _ => {}
            }
            out.atoms.push(current);
        }

        if let Some(last) = out.atoms.last_mut()
            && last.atom_type() == AtomType::BinaryOperator
        {
            last.set_atom_type(AtomType::UnaryOperator);
        }
        out
    }
}
