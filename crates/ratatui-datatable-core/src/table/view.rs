use crate::table::filter::FilterSet;
use crate::table::row::Row;
use crate::table::row::RowStore;
use crate::table::sort::SortDirection;
use crate::table::sort::SortState;
use std::cmp::Ordering;

/// A derived, ordered subset of a [`RowStore`].
///
/// Holds positions into the store it was computed from, never copies of rows. A `View` is only
/// meaningful together with that store generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct View {
    positions: Vec<usize>,
}

impl View {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Store position of the row shown at `view_index`.
    pub fn position(&self, view_index: usize) -> Option<usize> {
        self.positions.get(view_index).copied()
    }

    pub fn row<'a>(&self, store: &'a RowStore, view_index: usize) -> Option<&'a Row> {
        self.position(view_index).and_then(|p| store.get(p))
    }

    pub fn rows<'a>(&'a self, store: &'a RowStore) -> impl Iterator<Item = &'a Row> + 'a {
        self.positions.iter().filter_map(|&p| store.get(p))
    }

    /// Original indices in view order.
    pub fn original_indices(&self, store: &RowStore) -> Vec<usize> {
        self.rows(store).map(Row::original_index).collect()
    }
}

/// Derives views from a row store, filter texts and sort state.
pub struct ViewEngine;

impl ViewEngine {
    /// Full recomputation of the view.
    ///
    /// The whole store is stable-sorted first (ordinal comparison of the active column, ties keep
    /// input order), then filtered. Filtering therefore never reorders rows: the result is always
    /// the unfiltered sorted order with non-matching rows removed.
    ///
    /// Sorting compares bytes, not collation keys, so uppercase sorts before lowercase:
    /// `"Bruce" < "Joker" < "alpha"`.
    pub fn compute(store: &RowStore, filters: &FilterSet, sort: &SortState) -> View {
        let rows = store.rows();
        let mut positions: Vec<usize> = (0..rows.len()).collect();

        if let Some(key) = sort.active() {
            let col = key.column;
            let descending = key.direction == SortDirection::Descending;
            positions.sort_by(|&a, &b| {
                let ord = cmp_cell(&rows[a], &rows[b], col);
                if descending { ord.reverse() } else { ord }
            });
        }

        if !filters.is_empty() {
            positions.retain(|&p| filters.matches(&rows[p]));
        }

        View { positions }
    }
}

fn cmp_cell(a: &Row, b: &Row, col: usize) -> Ordering {
    a.cell(col).unwrap_or("").cmp(b.cell(col).unwrap_or(""))
}
