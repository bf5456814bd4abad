//! Command and character tables
//!
//! [`SymbolTable`] is the atom factory used by the parser and the reverse
//! index used by the LaTeX serializer. The forward tables are `phf` statics
//! in [`data`]; the reverse tables are built once in [`SymbolTable::new`].
//!
//! # Examples
//!
//! ```rust
//! use mathlayout::math_list::AtomType;
//! use mathlayout::symbols::SymbolTable;
//!
//! let symbols = SymbolTable::new();
//! let alpha = symbols.atom_for_command("alpha").unwrap();
//! assert_eq!(alpha.atom_type(), AtomType::Variable);
//! assert_eq!(symbols.command_for_atom(&alpha), Some("alpha"));
//! ```

mod data;

use std::collections::HashMap;

pub use data::{
    ACCENTS, ALIASES, DELIMITERS, DIVISION, FONT_STYLES, MINUS, MULTIPLICATION, RATIO, SYMBOLS,
    SymbolDef, WHITE_SQUARE,
};

use crate::math_list::{Atom, AtomType, MathList};
use crate::types::FontStyle;

/// Atom factory and reverse lookup tables.
///
/// Build one per application and share it by reference; construction walks
/// every static table once.
///
/// # Cross-references
/// - [`crate::parser::MathListBuilder`] creates atoms through it.
/// - [`crate::latex::to_latex`] uses the reverse lookups.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    nucleus_to_command: HashMap<&'static str, &'static str>,
    accent_to_command: HashMap<&'static str, &'static str>,
    delimiter_to_name: HashMap<&'static str, &'static str>,
}

/// Keep `candidate` for `key` when it is shorter, or as long and
/// lexicographically smaller, than the current entry.
fn insert_preferred(
    map: &mut HashMap<&'static str, &'static str>,
    key: &'static str,
    candidate: &'static str,
) {
    let better = map.get(key).is_none_or(|existing| {
        (candidate.len(), candidate) < (existing.len(), *existing)
    });
    if better {
        map.insert(key, candidate);
    }
}

impl SymbolTable {
    /// Build the reverse tables.
    #[must_use]
    pub fn new() -> Self {
        let mut nucleus_to_command = HashMap::new();
        for (command, def) in &SYMBOLS {
            let nucleus = match def {
                SymbolDef::Atom(_, nucleus) | SymbolDef::LargeOperator(nucleus, _) => *nucleus,
                SymbolDef::Space(_) | SymbolDef::Style(_) => continue,
            };
            if !nucleus.is_empty() {
                insert_preferred(&mut nucleus_to_command, nucleus, *command);
            }
        }

        let mut accent_to_command = HashMap::new();
        for (command, accent) in &ACCENTS {
            insert_preferred(&mut accent_to_command, *accent, *command);
        }

        let mut delimiter_to_name = HashMap::new();
        for (name, delimiter) in &DELIMITERS {
            insert_preferred(&mut delimiter_to_name, *delimiter, *name);
        }

        Self {
            nucleus_to_command,
            accent_to_command,
            delimiter_to_name,
        }
    }

    /// Canonical name for `name`, e.g. `neq` for `ne`.
    #[must_use]
    pub fn resolve_alias<'a>(&self, name: &'a str) -> &'a str {
        ALIASES.get(name).copied().unwrap_or(name)
    }

    /// The prototype `name` (or its alias target) maps to.
    #[must_use]
    pub fn symbol_def(&self, name: &str) -> Option<SymbolDef> {
        SYMBOLS.get(self.resolve_alias(name)).copied()
    }

    /// A fresh atom for the command `name`, without the backslash.
    #[must_use]
    pub fn atom_for_command(&self, name: &str) -> Option<Atom> {
        self.symbol_def(name).map(|def| match def {
            SymbolDef::Atom(atom_type, nucleus) => Atom::new(atom_type, nucleus),
            SymbolDef::LargeOperator(nucleus, has_limits) => {
                Atom::large_operator(nucleus, has_limits)
            }
            SymbolDef::Space(width) => Atom::space(width),
            SymbolDef::Style(style) => Atom::style(style),
        })
    }

    /// A fresh atom for a literal input character.
    ///
    /// Returns `None` for characters outside printable ASCII and for the
    /// characters with a control meaning (`$ % # & ~ ' ^ _ { } \`), which
    /// the parser handles itself.
    #[must_use]
    pub fn atom_for_character(&self, ch: char) -> Option<Atom> {
        let (atom_type, nucleus) = match ch {
            '(' | '[' => (AtomType::Open, None),
            ')' | ']' | '!' | '?' => (AtomType::Close, None),
            ',' | ';' => (AtomType::Punctuation, None),
            '=' | '>' | '<' => (AtomType::Relation, None),
            ':' => (AtomType::Relation, Some(RATIO)),
            '-' => (AtomType::BinaryOperator, Some(MINUS)),
            '+' | '*' => (AtomType::BinaryOperator, None),
            '.' | '0'..='9' => (AtomType::Number, None),
            'a'..='z' | 'A'..='Z' => (AtomType::Variable, None),
            '"' | '/' | '@' | '`' | '|' => (AtomType::Ordinary, None),
            _ => return None,
        };
        Some(match nucleus {
            Some(nucleus) => Atom::new(atom_type, nucleus),
            None => Atom::new(atom_type, ch.to_string()),
        })
    }

    /// One atom per character of `chars`, skipping characters with no atom.
    #[must_use]
    pub fn list_for_characters(&self, chars: &str) -> MathList {
        MathList::from_atoms(
            chars
                .chars()
                .filter_map(|ch| self.atom_for_character(ch))
                .collect(),
        )
    }

    /// An accent atom with an empty inner list.
    #[must_use]
    pub fn accent_for_name(&self, name: &str) -> Option<Atom> {
        ACCENTS
            .get(name)
            .map(|accent| Atom::accent(*accent, MathList::new()))
    }

    /// A boundary atom for a `\left`/`\right` delimiter name.
    #[must_use]
    pub fn boundary_for_delimiter_name(&self, name: &str) -> Option<Atom> {
        DELIMITERS
            .get(name)
            .map(|delimiter| Atom::new(AtomType::Boundary, *delimiter))
    }

    /// The font style a command such as `mathbf` selects.
    #[must_use]
    pub fn font_style_for_name(&self, name: &str) -> Option<FontStyle> {
        FONT_STYLES.get(name).copied()
    }

    /// The canonical command for a font style.
    #[must_use]
    pub const fn font_name_for_style(&self, style: FontStyle) -> &'static str {
        match style {
            FontStyle::Default => "mathnormal",
            FontStyle::Roman => "mathrm",
            FontStyle::Bold => "mathbf",
            FontStyle::Fraktur => "mathfrak",
            FontStyle::Caligraphic => "mathcal",
            FontStyle::Italic => "mathit",
            FontStyle::SansSerif => "mathsf",
            FontStyle::Blackboard => "mathbb",
            FontStyle::Typewriter => "mathtt",
            FontStyle::BoldItalic => "bm",
        }
    }

    /// The command that produces `atom`'s nucleus, if any.
    #[must_use]
    pub fn command_for_atom(&self, atom: &Atom) -> Option<&'static str> {
        if atom.nucleus.is_empty() {
            return None;
        }
        self.nucleus_to_command.get(atom.nucleus.as_str()).copied()
    }

    /// The command name of an accent atom.
    #[must_use]
    pub fn accent_name(&self, accent: &Atom) -> Option<&'static str> {
        self.accent_to_command.get(accent.nucleus.as_str()).copied()
    }

    /// The delimiter name of a boundary atom; `.` for the empty delimiter.
    #[must_use]
    pub fn delimiter_name(&self, boundary: &Atom) -> Option<&'static str> {
        if boundary.atom_type() != AtomType::Boundary {
            return None;
        }
        self.delimiter_to_name
            .get(boundary.nucleus.as_str())
            .copied()
    }

    /// All symbol command names, sorted.
    #[must_use]
    pub fn supported_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = SYMBOLS.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
