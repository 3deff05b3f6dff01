//! Plain-text tables for console listings.

use std::fmt;

/// A column-aligned text table with an optional underlined header.
#[derive(Debug, Clone)]
pub struct Table {
    header: Option<String>,
    prefix: String,
    postfix: String,
    indent: usize,
    cell_pad: usize,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column titles.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: None,
            prefix: String::new(),
            postfix: String::new(),
            indent: 4,
            cell_pad: 2,
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Set the title printed above the columns.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set text written before the table.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set text written after the table.
    #[must_use]
    pub fn postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    /// Set the left indentation of the column block.
    #[must_use]
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Append a row. Missing cells render empty, extra cells are dropped.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, title)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(title.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn write_line(
        &self,
        f: &mut fmt::Formatter<'_>,
        cells: &[String],
        widths: &[usize],
    ) -> fmt::Result {
        let mut line = " ".repeat(self.indent);
        for (i, cell) in cells.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < cells.len() {
                let pad = widths[i] - cell.chars().count() + self.cell_pad;
                line.push_str(&" ".repeat(pad));
            }
        }
        writeln!(f, "{}", line.trim_end())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        f.write_str(&self.prefix)?;
        if let Some(header) = &self.header {
            writeln!(f, "{header}")?;
            writeln!(f, "{}", "=".repeat(header.chars().count()))?;
            writeln!(f)?;
        }

        self.write_line(f, &self.columns, &widths)?;
        let rules: Vec<String> =
            self.columns.iter().map(|c| "-".repeat(c.chars().count())).collect();
        self.write_line(f, &rules, &widths)?;
        for row in &self.rows {
            self.write_line(f, row, &widths)?;
        }

        f.write_str(&self.postfix)
    }
}
