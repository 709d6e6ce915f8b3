//! Bordered text tables, drawn by `comfy-table` with its ASCII preset.

use comfy_table::{presets, ContentArrangement, Table};

const FLOAT_PRECISION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Float,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Float(f64),
}

/// Consumer of report rows. Rows arrive one at a time; the table is drawn
/// once all of them are in.
pub trait TableSink {
    fn append(&mut self, row: Vec<Cell>);
    fn draw(&self) -> String;
}

/// A [`TableSink`] over a `comfy_table::Table` with a fixed, typed schema.
///
/// Width handling:
/// - `None`: fit the detected terminal width, if there is one
/// - `Some(0)`: never wrap
/// - `Some(n)`: wrap cells so the table fits in `n` columns
pub struct TextTable {
    table: Table,
    types: Vec<ColumnType>,
    rows: usize,
}

impl TextTable {
    pub fn new(header: &[&str], types: &[ColumnType], width: Option<usize>) -> Self {
        let mut table = Table::new();
        table.load_preset(presets::ASCII_FULL);
        match width {
            Some(0) => {
                table.set_content_arrangement(ContentArrangement::Disabled);
            }
            Some(w) => {
                table
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_width(u16::try_from(w).unwrap_or(u16::MAX));
            }
            None => {
                table.set_content_arrangement(ContentArrangement::Dynamic);
            }
        }
        table.set_header(header.to_vec());
        Self {
            table,
            types: types.to_vec(),
            rows: 0,
        }
    }

    /// The five-column report schema.
    pub fn report(width: Option<usize>) -> Self {
        Self::new(&super::HEADER, &super::COLUMN_TYPES, width)
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    fn format_cell(&self, column: usize, cell: &Cell) -> String {
        match (self.types.get(column), cell) {
            (_, Cell::Float(x)) => format!("{:.*}", FLOAT_PRECISION, x),
            (Some(ColumnType::Float), Cell::Text(s)) => match s.trim().parse::<f64>() {
                Ok(x) => format!("{:.*}", FLOAT_PRECISION, x),
                Err(_) => s.clone(),
            },
            (_, Cell::Text(s)) => s.clone(),
        }
    }
}

impl TableSink for TextTable {
    fn append(&mut self, mut row: Vec<Cell>) {
        row.resize(self.types.len(), Cell::Text(String::new()));
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| self.format_cell(i, cell))
            .collect();
        self.table.add_row(cells);
        self.rows += 1;
    }

    fn draw(&self) -> String {
        self.table.to_string()
    }
}
