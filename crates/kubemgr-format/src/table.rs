//! Fixed-width table rendering

use std::fmt;

use unicode_width::UnicodeWidthStr;

/// Separator printed under the header
pub const SEPARATOR: &str = "----------------------------------------------------------------";

/// A column header and its minimum display width
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

impl Column {
    pub const fn new(title: &'static str, width: usize) -> Self {
        Self { title, width }
    }
}

/// Left-aligned text table
///
/// Cells are padded to the column width and never truncated, so an
/// overlong value pushes the rest of its row to the right.
#[derive(Clone, Debug)]
pub struct Table {
    columns: &'static [Column],
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &'static [Column]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn write_line<'a>(
        &self,
        f: &mut fmt::Formatter<'_>,
        cells: impl Iterator<Item = &'a str>,
    ) -> fmt::Result {
        let mut line = String::new();
        for (i, (cell, column)) in cells.zip(self.columns).enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(cell);
            let pad = column.width.saturating_sub(cell.width());
            line.extend(std::iter::repeat_n(' ', pad));
        }
        writeln!(f, "{}", line.trim_end())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_line(f, self.columns.iter().map(|c| c.title))?;
        writeln!(f, "{SEPARATOR}")?;
        for row in &self.rows {
            self.write_line(f, row.iter().map(String::as_str))?;
        }
        Ok(())
    }
}
