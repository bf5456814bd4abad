//! Tables: matrices and aligned environments.

use super::{
    BASELINE_SKIP_MULTIPLIER, JOT_MULTIPLIER, LINE_SKIP_LIMIT_MULTIPLIER, LINE_SKIP_MULTIPLIER, LayoutError,
    Typesetter,
};
use crate::display::Display;
use crate::math_list::Table;
use crate::types::{ColumnAlignment, IndexRange, Point};

impl Typesetter {
    pub(super) fn make_table(&self, table: &Table, range: IndexRange) -> Result<Display, LayoutError> {
        let num_columns = table.num_columns();
        if num_columns == 0 || table.num_rows() == 0 {
            return Ok(Display::list(Vec::new(), range));
        }

        let mut column_widths = vec![0.0_f32; num_columns];
        let mut cells = Vec::with_capacity(table.num_rows());
        for row in table.rows() {
            let mut displays = Vec::with_capacity(row.len());
            for (column, cell) in row.iter().enumerate() {
                let display = self.sub_line(cell, self.style, false, false)?;
                column_widths[column] = column_widths[column].max(display.width);
                displays.push(display);
            }
            cells.push(displays);
        }

        let mut rows: Vec<Display> = cells
            .into_iter()
            .map(|row| self.make_row(table, row, &column_widths))
            .collect();
        self.position_rows(table, &mut rows);
        Ok(Display::list(rows, range))
    }

    /// Place the cells of one row in their columns.
    fn make_row(&self, table: &Table, mut cells: Vec<Display>, column_widths: &[f32]) -> Display {
        let column_spacing = table.inter_column_spacing * self.style_font.mu();
        let mut column_start = 0.0;
        let mut range: Option<IndexRange> = None;
        for (column, (cell, &width)) in cells.iter_mut().zip(column_widths).enumerate() {
            let x = match table.alignment(column) {
                ColumnAlignment::Left => column_start,
                ColumnAlignment::Center => column_start + (width - cell.width) / 2.0,
                ColumnAlignment::Right => column_start + width - cell.width,
            };
            range = Some(range.map_or(cell.range, |range| range.union(&cell.range)));
            cell.set_position(Point::new(x, 0.0));
            column_start += width + column_spacing;
        }
        Display::list(cells, range.unwrap_or_default())
    }

    /// Stack the rows downwards, then center the table on the math axis.
    fn position_rows(&self, table: &Table, rows: &mut [Display]) {
        let size = self.style_font.size();
        let openup = table.inter_row_additional_spacing * JOT_MULTIPLIER * size;
        let baseline_skip = openup + BASELINE_SKIP_MULTIPLIER * size;
        let line_skip = openup + LINE_SKIP_MULTIPLIER * size;
        let line_skip_limit = openup + LINE_SKIP_LIMIT_MULTIPLIER * size;

        let mut y = 0.0;
        let mut ascent = 0.0;
        let mut previous_descent: Option<f32> = None;
        for row in rows.iter_mut() {
            match previous_descent {
                None => {
                    row.set_position(Point::ZERO);
                    ascent = row.ascent;
                }
                Some(previous_descent) => {
                    let mut skip = baseline_skip;
                    if skip - (previous_descent + row.ascent) < line_skip_limit {
                        // Rows too close to each other.
                        skip = previous_descent + row.ascent + line_skip;
                    }
                    y -= skip;
                    row.set_position(Point::new(0.0, y));
                }
            }
            previous_descent = Some(row.descent);
        }

        let descent = -y + previous_descent.unwrap_or_default();
        let shift_down = 0.5 * (ascent - descent) - self.axis_height();
        for row in rows.iter_mut() {
            let position = row.position();
            row.set_position(position.translated(0.0, -shift_down));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::font_metrics::MathConstant;
    use crate::font_metrics::testing::test_font;
    use crate::math_list::{Atom, AtomType, MathList, Table};
    use crate::style::LineStyle;
    use crate::types::ColumnAlignment;
    use crate::typesetter::layout;

    fn cell(text: &str) -> MathList {
        MathList::from_atoms(vec![Atom::new(AtomType::Variable, text)])
    }

    fn matrix() -> Table {
        let mut table = Table::with_cells(
            Some("matrix".to_owned()),
            vec![vec![cell("a"), cell("bc")], vec![cell("de"), cell("f")]],
        );
        table.inter_column_spacing = 18.0;
        table
    }

    #[test]
    fn test_rows_are_a_baseline_skip_apart() {
        let font = test_font(10.0);
        let display = layout(&MathList::from_atoms(vec![Atom::table(matrix())]), &font, LineStyle::Text).unwrap();
        let rows = display.children()[0].children();
        assert_eq!(rows.len(), 2);
        let distance = rows[0].position().y - rows[1].position().y;
        assert!((distance - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_table_is_centered_on_axis() {
        let font = test_font(10.0);
        let display = layout(&MathList::from_atoms(vec![Atom::table(matrix())]), &font, LineStyle::Text).unwrap();
        let table = &display.children()[0];
        let axis = font.constant(MathConstant::AxisHeight);
        let rows = table.children();
        let top = rows[0].position().y + rows[0].ascent;
        let bottom = rows[1].position().y - rows[1].descent;
        assert!(((top + bottom) / 2.0 - axis).abs() < 1e-4);
    }

    #[test]
    fn test_columns_follow_alignment() {
        let font = test_font(10.0);
        let mut table = matrix();
        table.set_alignment(ColumnAlignment::Right, 0);
        table.set_alignment(ColumnAlignment::Left, 1);
        let display = layout(&MathList::from_atoms(vec![Atom::table(table)]), &font, LineStyle::Text).unwrap();
        let rows = display.children()[0].children();
        // Column 0 is 10pt wide; "a" is right aligned in it.
        assert!((rows[0].children()[0].position().x - 5.0).abs() < 1e-4);
        // Column 1 starts after 10pt plus one quad of spacing.
        assert!((rows[1].children()[1].position().x - 20.0).abs() < 1e-4);
        assert!((display.width - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_table_is_empty_list() {
        let font = test_font(10.0);
        let table = Table::new(None);
        let display = layout(&MathList::from_atoms(vec![Atom::table(table)]), &font, LineStyle::Text).unwrap();
        assert!(display.children()[0].children().is_empty());
        assert_eq!(display.width, 0.0);
    }
}
