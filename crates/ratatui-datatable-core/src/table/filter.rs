use crate::table::row::Row;

/// Per-column filter texts.
///
/// A row matches when, for every column with non-empty filter text, the case-folded cell contains
/// the case-folded text. Columns with empty text always match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    texts: Vec<String>,
    // Case-folded copies of `texts`, kept in sync by `set`.
    folded: Vec<String>,
}

impl FilterSet {
    pub fn new(num_cols: usize) -> Self {
        Self {
            texts: vec![String::new(); num_cols],
            folded: vec![String::new(); num_cols],
        }
    }

    pub fn num_cols(&self) -> usize {
        self.texts.len()
    }

    /// Sets the filter text of `column`. Returns `false` when `column` is out of range.
    pub fn set(&mut self, column: usize, text: impl Into<String>) -> bool {
        let Some(slot) = self.texts.get_mut(column) else {
            return false;
        };
        *slot = text.into();
        self.folded[column] = fold(slot);
        true
    }

    pub fn text(&self, column: usize) -> Option<&str> {
        self.texts.get(column).map(String::as_str)
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// `true` when no column has filter text.
    pub fn is_empty(&self) -> bool {
        self.texts.iter().all(String::is_empty)
    }

    pub fn clear(&mut self) {
        self.texts.iter_mut().for_each(String::clear);
        self.folded.iter_mut().for_each(String::clear);
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.folded
            .iter()
            .zip(row.folded_cells())
            .all(|(needle, cell)| needle.is_empty() || cell.contains(needle.as_str()))
    }
}

pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
}
