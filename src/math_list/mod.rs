//! The math-list data model
//!
//! A [`MathList`] is the ordered sequence of [`Atom`]s produced by the parser
//! and consumed by the typesetter. Lists nest: scripts, fraction parts,
//! radicands, table cells and the like are lists themselves.

use core::ops::Range;

mod atom;
mod finalize;
mod table;

pub use atom::{Atom, AtomKind, AtomType, Fraction, Inner, Radical};
pub use table::Table;

/// An ordered sequence of atoms in reading order.
///
/// A list never contains an atom of type [`AtomType::Boundary`]; boundary
/// atoms only live in the boundary slots of an [`Inner`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MathList {
    atoms: Vec<Atom>,
}

impl MathList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { atoms: Vec::new() }
    }

    /// A list holding `atoms`.
    ///
    /// # Panics
    /// If any atom is of type [`AtomType::Boundary`].
    #[must_use]
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        for atom in &atoms {
            Self::check_insertable(atom);
        }
        Self { atoms }
    }

    fn check_insertable(atom: &Atom) {
        assert!(
            atom.atom_type() != AtomType::Boundary,
            "Boundary atoms cannot be added to a math list"
        );
    }

    /// The atoms in order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Number of atoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the list has no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Iterate over the atoms.
    pub fn iter(&self) -> core::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// The last atom.
    #[must_use]
    pub fn last(&self) -> Option<&Atom> {
        self.atoms.last()
    }

    /// Mutable access to the last atom, e.g. to attach scripts.
    pub fn last_mut(&mut self) -> Option<&mut Atom> {
        self.atoms.last_mut()
    }

    /// Append an atom.
    ///
    /// # Panics
    /// If the atom is of type [`AtomType::Boundary`].
    pub fn add_atom(&mut self, atom: Atom) {
        Self::check_insertable(&atom);
        self.atoms.push(atom);
    }

    /// Insert an atom at `index`.
    ///
    /// # Panics
    /// If the atom is of type [`AtomType::Boundary`] or `index` is past the
    /// end of the list.
    pub fn insert_atom(&mut self, atom: Atom, index: usize) {
        Self::check_insertable(&atom);
        self.atoms.insert(index, atom);
    }

    /// Move every atom of `other` to the end of this list.
    pub fn append(&mut self, other: Self) {
        self.atoms.extend(other.atoms);
    }

    /// Remove and return the last atom.
    pub fn remove_last_atom(&mut self) -> Option<Atom> {
        self.atoms.pop()
    }

    /// Remove and return the atom at `index`.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn remove_atom(&mut self, index: usize) -> Atom {
        self.atoms.remove(index)
    }

    /// Remove the atoms in `range`.
    ///
    /// # Panics
    /// If the range is out of bounds.
    pub fn remove_atoms_in_range(&mut self, range: Range<usize>) {
        self.atoms.drain(range);
    }
}

impl<'a> IntoIterator for &'a MathList {
    type Item = &'a Atom;
    type IntoIter = core::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl IntoIterator for MathList {
    type Item = Atom;
    type IntoIter = alloc::vec::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}
