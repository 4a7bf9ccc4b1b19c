//! Read-only data table.

use unicode_width::UnicodeWidthStr;
use weft_core::{Node, NodeKind, TableData};

use crate::error::BuildError;

/// A header row over rows of cells, optionally framed with box-drawing lines.
///
/// Each column is as wide as its widest cell. Every row must have one cell
/// per header.
///
/// ```rust,ignore
/// let table = Table::new(["Name", "Age"])
///     .with_row(["Alice", "30"])
///     .with_row(["Bob", "4"])
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    borders: bool,
}

impl Table {
    /// A bordered table with the given column headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            borders: true,
        }
    }

    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_rows<R, I, S>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self = self.with_row(row);
        }
        self
    }

    /// Draw box-drawing borders (default) or separate columns with spaces.
    pub fn with_borders(mut self, borders: bool) -> Self {
        self.borders = borders;
        self
    }

    pub fn build(self) -> Result<Node, BuildError> {
        if self.headers.is_empty() || self.rows.is_empty() {
            return Err(BuildError::EmptyTable);
        }
        let expected = self.headers.len();
        if let Some((row, cells)) = self.rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(BuildError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }

        let column_widths = (0..expected)
            .map(|col| {
                self.rows
                    .iter()
                    .map(|r| r[col].width())
                    .chain(std::iter::once(self.headers[col].width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        Ok(Node::new(NodeKind::Table(TableData {
            headers: self.headers,
            rows: self.rows,
            column_widths,
            borders: self.borders,
        })))
    }
}

impl TryFrom<Table> for Node {
    type Error = BuildError;

    fn try_from(table: Table) -> Result<Self, Self::Error> {
        table.build()
    }
}
