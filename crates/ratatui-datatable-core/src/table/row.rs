use crate::table::error::DimensionError;
use crate::table::filter::fold;

/// One record of the table.
///
/// `original_index` is the row's position in the data passed to the most recent successful
/// `set_data`. It is never renumbered by filtering or sorting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    original_index: usize,
    columns: Vec<String>,
    // Case-folded cells, computed once per load for filtering.
    folded: Vec<String>,
}

impl Row {
    pub fn original_index(&self) -> usize {
        self.original_index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn cell(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(String::as_str)
    }

    pub(crate) fn folded_cells(&self) -> &[String] {
        &self.folded
    }
}

/// The authoritative row set of one data generation.
#[derive(Clone, Debug)]
pub struct RowStore {
    num_cols: usize,
    rows: Vec<Row>,
}

impl RowStore {
    pub fn new(num_cols: usize) -> Self {
        Self {
            num_cols,
            rows: Vec::new(),
        }
    }

    /// Replaces the stored rows with `rows`, numbering them in input order.
    ///
    /// All rows are validated before anything is touched, so on error the previous generation is
    /// kept as is.
    pub fn load(&mut self, rows: Vec<Vec<String>>) -> Result<(), DimensionError> {
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != self.num_cols)
        {
            return Err(DimensionError {
                row,
                expected: self.num_cols,
                actual: r.len(),
            });
        }

        self.rows = rows
            .into_iter()
            .enumerate()
            .map(|(original_index, columns)| Row {
                original_index,
                folded: columns.iter().map(|c| fold(c)).collect(),
                columns,
            })
            .collect();
        Ok(())
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// A fixed-shape row handle owned by the render shell.
///
/// Created with one slot per column by
/// [`TableController::new_row_template`](crate::table::TableController::new_row_template) and
/// filled by [`TableController::populate_row`](crate::table::TableController::populate_row).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowSlots {
    cells: Vec<String>,
}

impl RowSlots {
    pub fn new(num_cols: usize) -> Self {
        Self {
            cells: vec![String::new(); num_cols],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, col: usize) -> &str {
        self.cells.get(col).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub(crate) fn fill(&mut self, row: &Row) {
        for (slot, value) in self.cells.iter_mut().zip(row.columns()) {
            slot.clear();
            slot.push_str(value);
        }
    }

    pub(crate) fn clear(&mut self) {
        for slot in &mut self.cells {
            slot.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn load_numbers_rows_in_input_order() {
        let mut store = RowStore::new(2);
        store
            .load(rows(&[&["a", "1"], &["b", "2"], &["c", "3"]]))
            .unwrap();
        let idx: Vec<usize> = store.rows().iter().map(Row::original_index).collect();
        assert_eq!(idx, vec![0, 1, 2]);
        assert_eq!(store.get(1).and_then(|r| r.cell(0)), Some("b"));
    }

    #[test]
    fn load_rejects_wrong_dimension_without_mutating() {
        let mut store = RowStore::new(2);
        store.load(rows(&[&["a", "1"]])).unwrap();

        let err = store.load(rows(&[&["x", "9"], &["y"]])).unwrap_err();
        assert_eq!(
            err,
            DimensionError {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).and_then(|r| r.cell(0)), Some("a"));
    }

    #[test]
    fn slots_fill_and_clear() {
        let mut store = RowStore::new(2);
        store.load(rows(&[&["left", "right"]])).unwrap();
        let mut slots = RowSlots::new(2);
        slots.fill(&store.rows()[0]);
        assert_eq!(slots.cell(1), "right");
        slots.clear();
        assert_eq!(slots.cell(0), "");
        assert_eq!(slots.cell(7), "");
    }
}
