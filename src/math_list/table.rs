//! Tables: the payload of matrix and alignment environments.

use super::MathList;
use crate::types::ColumnAlignment;

/// A row-major grid of math lists with per-column alignment.
///
/// Rows may have different lengths while a table is being built; the
/// number of columns is the length of the longest row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Environment the table was created by, e.g. `matrix`. `None` for
    /// tables created by a bare `&` or `\\`.
    pub environment: Option<String>,
    /// Space between columns, in math units.
    pub inter_column_spacing: f32,
    /// Extra space between rows, in jots (0.3 of the font size each).
    pub inter_row_additional_spacing: f32,
    alignments: Vec<ColumnAlignment>,
    cells: Vec<Vec<MathList>>,
}

impl Table {
    /// An empty table for the given environment.
    #[must_use]
    pub fn new(environment: Option<String>) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// A table over an existing row-major grid. Empty rows are kept.
    #[must_use]
    pub fn with_cells(environment: Option<String>, cells: Vec<Vec<MathList>>) -> Self {
        Self {
            environment,
            cells,
            ..Self::default()
        }
    }

    /// Store `list` at (`row`, `column`), growing the grid with empty
    /// lists as needed.
    pub fn set_cell(&mut self, list: MathList, row: usize, column: usize) {
        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= column {
            cells.resize_with(column + 1, MathList::new);
        }
        cells[column] = list;
    }

    /// The cell at (`row`, `column`), if the grid reaches that far.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&MathList> {
        self.cells.get(row).and_then(|cells| cells.get(column))
    }

    /// All rows of the grid.
    #[must_use]
    pub fn rows(&self) -> &[Vec<MathList>] {
        &self.cells
    }

    /// Mutable access to the rows, e.g. to insert atoms into every cell.
    pub fn rows_mut(&mut self) -> &mut [Vec<MathList>] {
        &mut self.cells
    }

    /// Set the alignment of `column`, growing the alignment list with
    /// [`ColumnAlignment::Center`].
    pub fn set_alignment(&mut self, alignment: ColumnAlignment, column: usize) {
        if self.alignments.len() <= column {
            self.alignments.resize(column + 1, ColumnAlignment::Center);
        }
        self.alignments[column] = alignment;
    }

    /// Alignment of `column`; columns never configured are centered.
    #[must_use]
    pub fn alignment(&self, column: usize) -> ColumnAlignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Explicitly configured alignments.
    #[must_use]
    pub fn alignments(&self) -> &[ColumnAlignment] {
        &self.alignments
    }

    /// Number of columns: the length of the longest row.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.cells.len()
    }

    /// A copy of the table with every cell transformed by `f`.
    #[must_use]
    pub fn map_cells<F>(&self, f: &mut F) -> Self
    where
        F: FnMut(&MathList) -> MathList,
    {
        Self {
            environment: self.environment.clone(),
            inter_column_spacing: self.inter_column_spacing,
            inter_row_additional_spacing: self.inter_row_additional_spacing,
            alignments: self.alignments.clone(),
            cells: self
                .cells
                .iter()
                .map(|row| row.iter().map(&mut *f).collect())
                .collect(),
        }
    }
}
