//! Named environments: column rules, alignment and spacing per environment.

use phf::{Map, phf_map};

use crate::math_list::{Atom, AtomType, Inner, MathList, Table};
use crate::style::LineStyle;
use crate::symbols::SymbolTable;
use crate::types::{ColumnAlignment, ParseErrorKind};

/// Matrix environments and their delimiter names. `matrix` has none.
static MATRIX_DELIMITERS: Map<&'static str, Option<(&'static str, &'static str)>> = phf_map! {
    "matrix" => None,
    "pmatrix" => Some(("(", ")")),
    "bmatrix" => Some(("[", "]")),
    "Bmatrix" => Some(("{", "}")),
    "vmatrix" => Some(("vert", "vert")),
    "Vmatrix" => Some(("Vert", "Vert")),
};

fn check_columns(
    table: &Table,
    env: &str,
    allowed: &[usize],
    expected: &'static str,
) -> Result<(), ParseErrorKind> {
    if allowed.contains(&table.num_columns()) {
        Ok(())
    } else {
        Err(ParseErrorKind::InvalidColumnCount {
            env: env.to_owned(),
            expected,
        })
    }
}

/// Prefix every cell with a text-style switch.
fn insert_text_style(table: &mut Table) {
    for row in table.rows_mut() {
        for cell in row {
            cell.insert_atom(Atom::style(LineStyle::Text), 0);
        }
    }
}

fn delimited(symbols: &SymbolTable, left: &str, right: &str, inner_list: MathList) -> Atom {
    let mut inner = Inner {
        inner_list,
        ..Inner::default()
    };
    inner.set_left_boundary(symbols.boundary_for_delimiter_name(left));
    inner.set_right_boundary(symbols.boundary_for_delimiter_name(right));
    Atom::inner(inner)
}

/// Shape the cells read for environment `env` into an atom.
///
/// | environment | columns | alignment | spacing (row jots, column mu) |
/// |---|---|---|---|
/// | `matrix` family | any | center | 0, 18 |
/// | none (implicit) | any | left | 1, 0 |
/// | `eqalign`, `split`, `aligned` | 2 | right, left | 1, 0 |
/// | `displaylines`, `gather` | 1 | center | 1, 0 |
/// | `eqnarray` | 3 | right, center, left | 1, 18 |
/// | `cases` | 1 or 2 | left, left | 0, 18 |
///
/// Delimited matrices and `cases` come back as an inner atom wrapping the
/// table.
///
/// # Errors
/// [`ParseErrorKind::InvalidColumnCount`] when the environment restricts
/// the column count, [`ParseErrorKind::InvalidEnvironment`] for unknown
/// environments.
pub fn table_with_environment(
    symbols: &SymbolTable,
    env: Option<&str>,
    cells: Vec<Vec<MathList>>,
) -> Result<Atom, ParseErrorKind> {
    let mut table = Table::with_cells(env.map(str::to_owned), cells);

    let Some(env) = env else {
        table.inter_row_additional_spacing = 1.0;
        table.inter_column_spacing = 0.0;
        for column in 0..table.num_columns() {
            table.set_alignment(ColumnAlignment::Left, column);
        }
        return Ok(Atom::table(table));
    };

    if let Some(delimiters) = MATRIX_DELIMITERS.get(env) {
        table.environment = Some("matrix".to_owned());
        table.inter_row_additional_spacing = 0.0;
        table.inter_column_spacing = 18.0;
        insert_text_style(&mut table);
        return Ok(match delimiters {
            Some((left, right)) => delimited(
                symbols,
                left,
                right,
                MathList::from_atoms(vec![Atom::table(table)]),
            ),
            None => Atom::table(table),
        });
    }

    match env {
        "eqalign" | "split" | "aligned" => {
            check_columns(&table, env, &[2], "2")?;
            for row in table.rows_mut() {
                if let Some(cell) = row.get_mut(1) {
                    cell.insert_atom(Atom::new(AtomType::Ordinary, ""), 0);
                }
            }
            table.inter_row_additional_spacing = 1.0;
            table.inter_column_spacing = 0.0;
            table.set_alignment(ColumnAlignment::Right, 0);
            table.set_alignment(ColumnAlignment::Left, 1);
            Ok(Atom::table(table))
        }
        "displaylines" | "gather" => {
            check_columns(&table, env, &[1], "1")?;
            table.inter_row_additional_spacing = 1.0;
            table.inter_column_spacing = 0.0;
            table.set_alignment(ColumnAlignment::Center, 0);
            Ok(Atom::table(table))
        }
        "eqnarray" => {
            check_columns(&table, env, &[3], "3")?;
            table.inter_row_additional_spacing = 1.0;
            table.inter_column_spacing = 18.0;
            table.set_alignment(ColumnAlignment::Right, 0);
            table.set_alignment(ColumnAlignment::Center, 1);
            table.set_alignment(ColumnAlignment::Left, 2);
            Ok(Atom::table(table))
        }
        "cases" => {
            check_columns(&table, env, &[1, 2], "1 or 2")?;
            if table.num_columns() == 1 {
                for row in table.rows_mut() {
                    if row.len() == 1 {
                        row.push(MathList::new());
                    }
                }
            }
            table.inter_row_additional_spacing = 0.0;
            table.inter_column_spacing = 18.0;
            table.set_alignment(ColumnAlignment::Left, 0);
            table.set_alignment(ColumnAlignment::Left, 1);
            insert_text_style(&mut table);

            let mut inner_list = MathList::new();
            if let Some(space) = symbols.atom_for_command(",") {
                inner_list.add_atom(space);
            }
            inner_list.add_atom(Atom::table(table));
            Ok(delimited(symbols, "{", ".", inner_list))
        }
        _ => Err(ParseErrorKind::InvalidEnvironment {
            message: format!("Unknown environment: {env}"),
        }),
    }
}
