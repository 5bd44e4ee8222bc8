use super::region::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Cells(Vec<String>),
    /// Stands in for data when a result set is empty; spans every column.
    Placeholder { message: String, colspan: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn new(columns: &[&'static str]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(TableRow::Cells(cells));
    }

    pub fn push_placeholder(&mut self, message: impl Into<String>) {
        self.rows.push(TableRow::Placeholder {
            message: message.into(),
            colspan: self.columns.len(),
        });
    }

    pub fn data_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, TableRow::Cells(_)))
            .count()
    }
}

impl View for TableView {
    fn clear(&mut self) {
        self.rows.clear();
    }
}
