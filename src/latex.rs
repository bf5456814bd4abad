//! Serialize a math list back to LaTeX.
//!
//! The output re-parses to a list equal to the input after finalization,
//! for lists built from commands in the [`SymbolTable`].

use crate::math_list::{Atom, AtomKind, AtomType, Fraction, MathList, Table};
use crate::symbols::{MINUS, RATIO, SymbolDef, SymbolTable};
use crate::types::FontStyle;

/// Named spaces, in math units.
const SPACE_COMMANDS: [(f32, &str); 6] = [
    (3.0, ","),
    (4.0, ">"),
    (5.0, ";"),
    (-3.0, "!"),
    (18.0, "quad"),
    (36.0, "qquad"),
];

/// Delimiter names written without a backslash.
const BARE_DELIMITERS: [&str; 9] = ["(", ")", "[", "]", "<", ">", "|", ".", "/"];

/// LaTeX for `list`.
///
/// # Examples
///
/// ```rust
/// use mathlayout::latex::to_latex;
/// use mathlayout::parser::build;
/// use mathlayout::symbols::SymbolTable;
///
/// let symbols = SymbolTable::new();
/// let list = build(&symbols, r"\frac{1}{x}").unwrap();
/// assert_eq!(to_latex(&symbols, &list), r"\frac{1}{x}");
/// ```
#[must_use]
pub fn to_latex(symbols: &SymbolTable, list: &MathList) -> String {
    let mut out = String::new();
    write_list(symbols, list, &mut out);
    out
}

fn write_list(symbols: &SymbolTable, list: &MathList, out: &mut String) {
    let mut font_style = FontStyle::Default;
    for atom in list {
        if atom.font_style != font_style {
            if font_style != FontStyle::Default {
                out.push('}');
            }
            if atom.font_style != FontStyle::Default {
                out.push('\\');
                out.push_str(symbols.font_name_for_style(atom.font_style));
                out.push('{');
            }
            font_style = atom.font_style;
        }
        write_atom(symbols, atom, out);
        // Scripts are not part of the styled group.
        if atom.has_scripts() && font_style != FontStyle::Default {
            out.push('}');
            font_style = FontStyle::Default;
        }
        if let Some(superscript) = atom.superscript() {
            out.push_str("^{");
            write_list(symbols, superscript, out);
            out.push('}');
        }
        if let Some(subscript) = atom.subscript() {
            out.push_str("_{");
            write_list(symbols, subscript, out);
            out.push('}');
        }
    }
    if font_style != FontStyle::Default {
        out.push('}');
    }
}

fn write_group(symbols: &SymbolTable, list: &MathList, out: &mut String) {
    out.push('{');
    write_list(symbols, list, out);
    out.push('}');
}

fn write_atom(symbols: &SymbolTable, atom: &Atom, out: &mut String) {
    match atom.kind() {
        AtomKind::Fraction(fraction) => write_fraction(symbols, fraction, out),
        AtomKind::Radical(radical) => {
            out.push_str("\\sqrt");
            if let Some(degree) = &radical.degree {
                out.push('[');
                write_list(symbols, degree, out);
                out.push(']');
            }
            write_group(symbols, &radical.radicand, out);
        }
        AtomKind::LargeOperator { has_limits } => {
            let Some(command) = symbols.command_for_atom(atom) else {
                out.push_str(&atom.nucleus);
                return;
            };
            out.push('\\');
            out.push_str(command);
            out.push(' ');
            if let Some(SymbolDef::LargeOperator(_, default_limits)) = symbols.symbol_def(command)
                && default_limits != *has_limits
            {
                out.push_str(if *has_limits {
                    "\\limits "
                } else {
                    "\\nolimits "
                });
            }
        }
        AtomKind::Inner(inner) => {
            if inner.left_boundary().is_none() && inner.right_boundary().is_none() {
                write_group(symbols, &inner.inner_list, out);
                return;
            }
            // `cases` supplies its own brace and space.
            if let Some(table) = cases_table(&inner.inner_list) {
                write_table(symbols, table, out);
                return;
            }
            out.push_str("\\left");
            out.push_str(&delimiter_latex(symbols, inner.left_boundary()));
            out.push(' ');
            write_list(symbols, &inner.inner_list, out);
            out.push_str("\\right");
            out.push_str(&delimiter_latex(symbols, inner.right_boundary()));
            out.push(' ');
        }
        AtomKind::Overline { inner_list } => {
            out.push_str("\\overline");
            write_group(symbols, inner_list, out);
        }
        AtomKind::Underline { inner_list } => {
            out.push_str("\\underline");
            write_group(symbols, inner_list, out);
        }
        AtomKind::Accent { inner_list } => {
            if let Some(name) = symbols.accent_name(atom) {
                out.push('\\');
                out.push_str(name);
            }
            write_group(symbols, inner_list, out);
        }
        AtomKind::Space { width } => {
            match SPACE_COMMANDS
                .iter()
                .find(|(mu, _)| (mu - width).abs() < f32::EPSILON)
            {
                Some((_, command)) => {
                    out.push('\\');
                    out.push_str(command);
                }
                None => out.push_str(&format!("\\mkern{width:.1}mu")),
            }
            out.push(' ');
        }
        AtomKind::Style { style } => {
            out.push('\\');
            out.push_str(style.command());
            out.push(' ');
        }
        AtomKind::Color { color, inner_list } => {
            out.push_str(if atom.atom_type() == AtomType::TextColor {
                "\\textcolor{"
            } else {
                "\\color{"
            });
            out.push_str(color);
            out.push('}');
            write_group(symbols, inner_list, out);
        }
        AtomKind::Table(table) => write_table(symbols, table, out),
        AtomKind::Plain => write_nucleus(symbols, atom, out),
    }
}

fn write_nucleus(symbols: &SymbolTable, atom: &Atom, out: &mut String) {
    if atom.nucleus.is_empty() {
        out.push_str("{}");
    } else if atom.nucleus == RATIO {
        out.push(':');
    } else if atom.nucleus == MINUS {
        out.push('-');
    } else if let Some(command) = symbols.command_for_atom(atom) {
        out.push('\\');
        out.push_str(command);
        out.push(' ');
    } else {
        out.push_str(&atom.nucleus);
    }
}

fn write_fraction(symbols: &SymbolTable, fraction: &Fraction, out: &mut String) {
    if fraction.has_rule {
        out.push_str("\\frac");
        write_group(symbols, &fraction.numerator, out);
        write_group(symbols, &fraction.denominator, out);
        return;
    }
    let left = fraction.left_delimiter.as_deref();
    let right = fraction.right_delimiter.as_deref();
    let command = match (left, right) {
        (None, None) => "atop".to_owned(),
        (Some("("), Some(")")) => "choose".to_owned(),
        (Some("{"), Some("}")) => "brace".to_owned(),
        (Some("["), Some("]")) => "brack".to_owned(),
        (left, right) => format!(
            "atopwithdelims{}{}",
            left.unwrap_or_default(),
            right.unwrap_or_default()
        ),
    };
    out.push('{');
    write_list(symbols, &fraction.numerator, out);
    out.push_str(" \\");
    out.push_str(&command);
    out.push(' ');
    write_list(symbols, &fraction.denominator, out);
    out.push('}');
}

fn write_table(symbols: &SymbolTable, table: &Table, out: &mut String) {
    let env = table.environment.as_deref();
    if let Some(env) = env {
        out.push_str("\\begin{");
        out.push_str(env);
        out.push('}');
    }
    let num_rows = table.num_rows();
    for (i, row) in table.rows().iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            let mut atoms = cell.atoms();
            // Drop the atoms the environment inserted itself.
            match env {
                Some("matrix" | "cases")
                    if atoms
                        .first()
                        .is_some_and(|a| a.atom_type() == AtomType::Style) =>
                {
                    atoms = &atoms[1..];
                }
                Some("eqalign" | "aligned" | "split")
                    if j == 1
                        && atoms.first().is_some_and(|a| {
                            a.atom_type() == AtomType::Ordinary && a.nucleus.is_empty()
                        }) =>
                {
                    atoms = &atoms[1..];
                }
                _ => {}
            }
            write_list(symbols, &MathList::from_atoms(atoms.to_vec()), out);
            if j + 1 < row.len() {
                out.push('&');
            }
        }
        if i + 1 < num_rows {
            out.push_str("\\\\ ");
        }
    }
    if let Some(env) = env {
        out.push_str("\\end{");
        out.push_str(env);
        out.push('}');
    }
}

/// The table of a list built by the `cases` environment.
fn cases_table(list: &MathList) -> Option<&Table> {
    match list.last().map(Atom::kind) {
        Some(AtomKind::Table(table)) if table.environment.as_deref() == Some("cases") => Some(table),
        _ => None,
    }
}

fn delimiter_latex(symbols: &SymbolTable, boundary: Option<&Atom>) -> String {
    let Some(name) = boundary.and_then(|b| symbols.delimiter_name(b)) else {
        return ".".to_owned();
    };
    if BARE_DELIMITERS.contains(&name) {
        name.to_owned()
    } else if name == "||" {
        "\\|".to_owned()
    } else {
        format!("\\{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::build;

    fn round_trip(latex: &str) -> String {
        let symbols = SymbolTable::new();
        let list = build(&symbols, latex).unwrap();
        to_latex(&symbols, &list)
    }

    #[test]
    fn test_symbols_and_scripts() {
        assert_eq!(round_trip(r"\alpha^2_i"), r"\alpha ^{2}_{i}");
        assert_eq!(round_trip("x-y:z"), "x-y:z");
        assert_eq!(round_trip(r"\ne"), r"\neq ");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(round_trip(r"\frac12"), r"\frac{1}{2}");
        assert_eq!(round_trip(r"n \choose k"), r"{n \choose k}");
        assert_eq!(round_trip(r"a \atop b"), r"{a \atop b}");
    }

    #[test]
    fn test_radicals_and_groups() {
        assert_eq!(round_trip(r"\sqrt[3]{x}"), r"\sqrt[3]{x}");
        assert_eq!(round_trip(r"\left( x \right)"), r"\left( x\right) ");
        assert_eq!(round_trip(r"\left\langle x \right\|"), r"\left< x\right\| ");
    }

    #[test]
    fn test_limits_are_written_only_when_changed() {
        assert_eq!(round_trip(r"\sum\limits"), r"\sum ");
        assert_eq!(round_trip(r"\sum\nolimits"), r"\sum \nolimits ");
        assert_eq!(round_trip(r"\int\limits"), r"\int \limits ");
    }

    #[test]
    fn test_font_styles() {
        assert_eq!(round_trip(r"\mathbf{xy}z"), r"\mathbf{xy}z");
        assert_eq!(round_trip(r"\text{if}"), r"\mathrm{if}");
        assert_eq!(round_trip(r"\mathrm{ab}^2"), r"\mathrm{ab}^{2}");
        assert_eq!(round_trip(r"\mathbf{x_i y}"), r"\mathbf{x}_{\mathbf{i}}\mathbf{y}");
    }

    #[test]
    fn test_styled_scripts_survive_a_reparse() {
        let symbols = SymbolTable::new();
        let list = build(&symbols, r"\mathrm{ab}^2").unwrap();
        let reparsed = build(&symbols, &to_latex(&symbols, &list)).unwrap();
        assert_eq!(reparsed, list);
        let script = reparsed.atoms()[1].superscript().unwrap();
        assert_eq!(script.atoms()[0].font_style, FontStyle::Default);
    }

    #[test]
    fn test_spaces_styles_and_colors() {
        assert_eq!(round_trip(r"a\quad b"), r"a\quad b");
        assert_eq!(round_trip(r"\displaystyle x"), r"\displaystyle x");
        assert_eq!(
            round_trip(r"\textcolor{red}{x}"),
            r"\textcolor{red}{x}"
        );
        let symbols = SymbolTable::new();
        let list = MathList::from_atoms(vec![Atom::space(7.0)]);
        assert_eq!(to_latex(&symbols, &list), r"\mkern7.0mu ");
    }

    #[test]
    fn test_tables() {
        assert_eq!(
            round_trip(r"\begin{pmatrix}a&b\\c&d\end{pmatrix}"),
            r"\left( \begin{matrix}a&b\\ c&d\end{matrix}\right) "
        );
        assert_eq!(
            round_trip(r"\begin{aligned}x&=1\end{aligned}"),
            r"\begin{aligned}x&=1\end{aligned}"
        );
        assert_eq!(round_trip(r"a\\b"), r"a\\ b");
        assert_eq!(
            round_trip(r"\begin{cases}x\\z\end{cases}"),
            r"\begin{cases}x&\\ z&\end{cases}"
        );
    }

    #[test]
    fn test_cases_survive_a_reparse() {
        let symbols = SymbolTable::new();
        let list = build(&symbols, r"\begin{cases}1 & x>0\\0\end{cases}").unwrap();
        let reparsed = build(&symbols, &to_latex(&symbols, &list)).unwrap();
        assert_eq!(reparsed, list);
    }

    #[test]
    fn test_accents_and_lines() {
        assert_eq!(round_trip(r"\widehat{x}"), r"\hat{x}");
        assert_eq!(round_trip(r"\overline{x}\underline y"), r"\overline{x}\underline{y}");
    }
}
