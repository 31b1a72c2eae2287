use crate::table::config::Alignment;
use crate::table::config::TableConfig;
use crate::table::error::ConfigError;
use crate::table::error::DimensionError;
use crate::table::filter::FilterSet;
use crate::table::layout;
use crate::table::row::RowSlots;
use crate::table::row::RowStore;
use crate::table::sort::SortDirection;
use crate::table::sort::SortState;
use crate::table::summary::EntrySummary;
use crate::table::view::View;
use crate::table::view::ViewEngine;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;
use tracing::debug;
use tracing::trace;

/// Host callback receiving the original index of an activated row.
pub type SelectHandler = Arc<dyn Fn(usize) + Send + Sync>;

/// Host callback asking the render shell to redraw.
pub type RefreshHandler = Arc<dyn Fn() + Send + Sync>;

/// Everything a mutation touches. Always replaced as a unit under the write lock.
struct TableState {
    store: RowStore,
    filters: FilterSet,
    sort: SortState,
    view: View,
    captions: Vec<String>,
    widths: Vec<u16>,
}

impl TableState {
    fn recompute(&mut self) {
        self.view = ViewEngine::compute(&self.store, &self.filters, &self.sort);
        trace!(
            shown = self.view.len(),
            total = self.store.len(),
            "recomputed table view"
        );
    }

    fn relabel(&mut self, headers: &[String]) {
        self.captions = headers
            .iter()
            .enumerate()
            .map(|(i, t)| self.sort.caption(i, t))
            .collect();
    }
}

/// Concurrency-safe facade over the row store, sort state, filter texts and derived view.
///
/// Mutations (`set_data`, `on_filter_changed`, `on_header_clicked`, `reset_sort`) take an
/// exclusive lock and recompute the view inside the same critical section. Reads take a shared
/// lock, so a render thread may populate rows while the event loop keeps processing input. A read
/// never observes a view computed from a different data generation or sort state than the one
/// stored next to it.
///
/// Reads with a view index that is out of range (the view shrank after the caller read the row
/// count) are silent no-ops.
pub struct TableController {
    headers: Vec<String>,
    alignments: Vec<Alignment>,
    fixed_widths: Vec<u16>,
    initial_sort: SortState,
    header_hidden: bool,
    footer_hidden: bool,
    filter_bar_hidden: bool,
    state: RwLock<TableState>,
    on_selected: RwLock<Option<SelectHandler>>,
    on_refresh: RwLock<Option<RefreshHandler>>,
}

impl TableController {
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        let validated = config.validate().inspect_err(|err| {
            debug!(%err, "rejected table configuration");
        })?;
        let num_cols = validated.headers.len();
        let (sort_col, sort_dir) = validated.initial_sort;
        let sort = SortState::new(num_cols, sort_col, sort_dir)?;

        let store = RowStore::new(num_cols);
        let widths = layout::measure_column_widths(
            &validated.headers,
            &validated.widths,
            store.rows().iter().map(|r| r.columns()),
        );
        let mut state = TableState {
            store,
            filters: FilterSet::new(num_cols),
            sort: sort.clone(),
            view: View::default(),
            captions: Vec::new(),
            widths,
        };
        state.relabel(&validated.headers);
        state.recompute();

        Ok(Self {
            headers: validated.headers,
            alignments: validated.alignments,
            fixed_widths: validated.widths,
            initial_sort: sort,
            header_hidden: config.header_hidden,
            footer_hidden: config.footer_hidden,
            filter_bar_hidden: config.filter_bar_hidden,
            state: RwLock::new(state),
            on_selected: RwLock::new(None),
            on_refresh: RwLock::new(None),
        })
    }

    /// Sets the callback invoked with the original row index when a row is activated.
    pub fn set_on_selected(&self, f: impl Fn(usize) + Send + Sync + 'static) {
        *write_lock(&self.on_selected) = Some(Arc::new(f));
    }

    /// Sets the callback invoked after every successful mutation.
    pub fn set_on_refresh(&self, f: impl Fn() + Send + Sync + 'static) {
        *write_lock(&self.on_refresh) = Some(Arc::new(f));
    }

    /// Replaces the table data.
    ///
    /// On success the view is recomputed with the current filter texts and sort state, and column
    /// widths are re-measured. On error nothing changes and no refresh is requested.
    pub fn set_data(&self, rows: Vec<Vec<String>>) -> Result<(), DimensionError> {
        {
            let mut state = write_lock(&self.state);
            state.store.load(rows).inspect_err(|err| {
                debug!(%err, "rejected table data");
            })?;
            state.widths = layout::measure_column_widths(
                &self.headers,
                &self.fixed_widths,
                state.store.rows().iter().map(|r| r.columns()),
            );
            state.recompute();
            debug!(rows = state.store.len(), "loaded table data");
        }
        self.request_refresh();
        Ok(())
    }

    /// Sets the filter text of `column` and recomputes the view.
    ///
    /// Returns `false` (no-op, no refresh) when `column` is out of range.
    pub fn on_filter_changed(&self, column: usize, text: impl Into<String>) -> bool {
        {
            let mut state = write_lock(&self.state);
            let text = text.into();
            if !state.filters.set(column, text.as_str()) {
                debug!(column, "ignored filter change for unknown column");
                return false;
            }
            debug!(column, text = %text, "filter changed");
            state.recompute();
        }
        self.request_refresh();
        true
    }

    /// Clears every filter text and recomputes the view.
    pub fn clear_filters(&self) {
        {
            let mut state = write_lock(&self.state);
            state.filters.clear();
            state.recompute();
        }
        self.request_refresh();
    }

    /// Advances the sort state for a click on `column`, relabels the header and recomputes the
    /// view.
    ///
    /// Returns `false` (no-op, no refresh) when `column` is out of range.
    pub fn on_header_clicked(&self, column: usize) -> bool {
        {
            let mut state = write_lock(&self.state);
            if !state.sort.click(column) {
                debug!(column, "ignored header click for unknown column");
                return false;
            }
            debug!(column, direction = ?state.sort.direction(column), "sort changed");
            state.relabel(&self.headers);
            state.recompute();
        }
        self.request_refresh();
        true
    }

    /// Restores the configured initial sort.
    pub fn reset_sort(&self) {
        {
            let mut state = write_lock(&self.state);
            state.sort = self.initial_sort.clone();
            state.relabel(&self.headers);
            state.recompute();
        }
        self.request_refresh();
    }

    /// Number of rows in the current view.
    pub fn row_count(&self) -> usize {
        read_lock(&self.state).view.len()
    }

    /// Number of rows in the current data generation, ignoring filters.
    pub fn total_rows(&self) -> usize {
        read_lock(&self.state).store.len()
    }

    /// Displayed columns of the row at `view_index`, or `None` when out of range.
    pub fn row_at(&self, view_index: usize) -> Option<Vec<String>> {
        let state = read_lock(&self.state);
        let row = state.view.row(&state.store, view_index);
        if row.is_none() {
            trace!(view_index, "row_at outside of view");
        }
        row.map(|r| r.columns().to_vec())
    }

    /// A row handle with one empty slot per column.
    pub fn new_row_template(&self) -> RowSlots {
        RowSlots::new(self.headers.len())
    }

    /// Writes the row at `view_index` into `slots`.
    ///
    /// Returns `false` and leaves the slots empty when `view_index` is out of range.
    pub fn populate_row(&self, view_index: usize, slots: &mut RowSlots) -> bool {
        let state = read_lock(&self.state);
        match state.view.row(&state.store, view_index) {
            Some(row) => {
                slots.fill(row);
                true
            }
            None => {
                trace!(view_index, "populate_row outside of view");
                slots.clear();
                false
            }
        }
    }

    /// Original index of the row at `view_index`.
    pub fn original_index(&self, view_index: usize) -> Option<usize> {
        let state = read_lock(&self.state);
        state
            .view
            .row(&state.store, view_index)
            .map(|r| r.original_index())
    }

    /// Resolves the original index of the row at `view_index` and reports it to the host's
    /// selection callback.
    ///
    /// Out-of-range indices are ignored. The callback runs after the state lock is released.
    pub fn on_row_selected(&self, view_index: usize) -> Option<usize> {
        let Some(original) = self.original_index(view_index) else {
            trace!(view_index, "selection outside of view");
            return None;
        };
        // Cloned out so the handler may replace itself.
        let handler = read_lock(&self.on_selected).clone();
        if let Some(f) = handler {
            f(original);
        }
        Some(original)
    }

    pub fn num_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    pub fn header_hidden(&self) -> bool {
        self.header_hidden
    }

    pub fn footer_hidden(&self) -> bool {
        self.footer_hidden
    }

    pub fn filter_bar_hidden(&self) -> bool {
        self.filter_bar_hidden
    }

    /// Header titles with the sort-direction glyph of the active column.
    pub fn header_captions(&self) -> Vec<String> {
        read_lock(&self.state).captions.clone()
    }

    pub fn sort_state(&self) -> SortState {
        read_lock(&self.state).sort.clone()
    }

    pub fn sort_direction(&self, column: usize) -> SortDirection {
        read_lock(&self.state).sort.direction(column)
    }

    pub fn filter_text(&self, column: usize) -> Option<String> {
        read_lock(&self.state)
            .filters
            .text(column)
            .map(str::to_string)
    }

    pub fn summary(&self) -> EntrySummary {
        let state = read_lock(&self.state);
        EntrySummary {
            shown: state.view.len(),
            total: state.store.len(),
        }
    }

    /// Measured display widths, one per column.
    pub fn column_widths(&self) -> Vec<u16> {
        read_lock(&self.state).widths.clone()
    }

    /// Runs `f` with a consistent snapshot of the view and row store.
    ///
    /// Lets a render pass read many rows under one shared lock.
    pub fn with_view<R>(&self, f: impl FnOnce(&View, &RowStore) -> R) -> R {
        let state = read_lock(&self.state);
        f(&state.view, &state.store)
    }

    fn request_refresh(&self) {
        let handler = read_lock(&self.on_refresh).clone();
        if let Some(f) = handler {
            f();
        }
    }
}

// Every mutation builds its new state before assigning it, so a poisoned lock still guards a
// consistent value.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::config::ColumnConfig;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    fn data(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn heroes() -> TableController {
        let t = TableController::new(TableConfig::with_headers(["First", "Second", "Third"]))
            .unwrap();
        t.set_data(data(&[
            &["Joker", "Peter Parker", "Superman"],
            &["Bruce Wayne", "Penguin", "Dr. Doom"],
            &["alpha", "bravo", "charlie"],
        ]))
        .unwrap();
        t
    }

    fn originals(t: &TableController) -> Vec<usize> {
        (0..t.row_count())
            .filter_map(|i| t.original_index(i))
            .collect()
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            TableController::new(TableConfig::default()).err(),
            Some(ConfigError::NoColumns)
        );
        let cfg = TableConfig {
            initial_sort: Some((3, SortDirection::Ascending)),
            ..TableConfig::with_headers(["a", "b", "c"])
        };
        assert!(matches!(
            TableController::new(cfg),
            Err(ConfigError::SortColumnOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn initial_sort_is_column_zero_ascending() {
        let t = heroes();
        assert_eq!(t.sort_direction(0), SortDirection::Ascending);
        assert_eq!(originals(&t), vec![1, 0, 2]);
        assert_eq!(t.header_captions(), vec!["First↑", "Second", "Third"]);
        assert_eq!(t.summary().to_string(), "3 entries");
    }

    #[test]
    fn filter_updates_view_and_summary() {
        let t = heroes();
        assert!(t.on_filter_changed(1, "O"));
        assert_eq!(originals(&t), vec![2]);
        assert_eq!(t.summary().to_string(), "1 of 3 entries (filtered)");
        assert_eq!(
            t.row_at(0),
            Some(vec![
                "alpha".to_string(),
                "bravo".to_string(),
                "charlie".to_string()
            ])
        );

        assert!(t.on_filter_changed(1, ""));
        assert_eq!(t.row_count(), 3);
        assert!(!t.on_filter_changed(9, "x"));
    }

    #[test]
    fn header_clicks_cycle_and_relabel() {
        let t = heroes();
        t.on_header_clicked(0);
        assert_eq!(t.sort_direction(0), SortDirection::Descending);
        assert_eq!(originals(&t), vec![2, 0, 1]);
        assert_eq!(t.header_captions()[0], "First↓");

        t.on_header_clicked(2);
        assert_eq!(t.sort_direction(0), SortDirection::Off);
        assert_eq!(t.header_captions(), vec!["First", "Second", "Third↑"]);
        assert_eq!(originals(&t), vec![1, 0, 2]);

        t.reset_sort();
        assert_eq!(t.header_captions(), vec!["First↑", "Second", "Third"]);
    }

    #[test]
    fn sort_and_filter_persist_across_set_data() {
        let t = heroes();
        t.on_header_clicked(1);
        t.on_filter_changed(0, "e");
        t.set_data(data(&[&["eve", "z", ""], &["bob", "a", ""], &["dave", "m", ""]]))
            .unwrap();
        assert_eq!(t.sort_direction(1), SortDirection::Ascending);
        assert_eq!(t.filter_text(0).as_deref(), Some("e"));
        assert_eq!(originals(&t), vec![2, 0]);
    }

    #[test]
    fn dimension_error_keeps_previous_generation() {
        let t = heroes();
        let refreshes = Arc::new(AtomicUsize::new(0));
        let r = refreshes.clone();
        t.set_on_refresh(move || {
            r.fetch_add(1, Ordering::SeqCst);
        });

        let err = t.set_data(data(&[&["a", "b", "c"], &["only", "two"]])).unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.expected, 3);
        assert_eq!(err.actual, 2);
        assert_eq!(originals(&t), vec![1, 0, 2]);
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);

        t.on_filter_changed(0, "a");
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn selection_reports_original_index() {
        let t = heroes();
        let picked = Arc::new(Mutex::new(Vec::new()));
        let p = picked.clone();
        t.set_on_selected(move |i| p.lock().unwrap().push(i));

        assert_eq!(t.on_row_selected(0), Some(1));
        assert_eq!(t.on_row_selected(2), Some(2));
        assert_eq!(t.on_row_selected(3), None);
        assert_eq!(*picked.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn stale_indices_are_no_ops() {
        let t = heroes();
        t.on_filter_changed(0, "joker");
        assert_eq!(t.row_count(), 1);
        assert_eq!(t.row_at(2), None);

        let mut slots = t.new_row_template();
        assert!(t.populate_row(0, &mut slots));
        assert_eq!(slots.cell(0), "Joker");
        assert!(!t.populate_row(1, &mut slots));
        assert!(slots.cells().iter().all(String::is_empty));
    }

    #[test]
    fn selection_callback_may_reenter() {
        let t = Arc::new(heroes());
        let inner = Arc::downgrade(&t);
        t.set_on_selected(move |_| {
            if let Some(t) = inner.upgrade() {
                t.on_filter_changed(0, "zzz");
            }
        });
        t.on_row_selected(0);
        assert_eq!(t.row_count(), 0);
    }

    #[test]
    fn widths_follow_full_data() {
        let cfg = TableConfig {
            widths: vec![0, 3],
            ..TableConfig::new(vec![
                ColumnConfig::new("A"),
                ColumnConfig::new("B").with_alignment(Alignment::Trailing),
            ])
        };
        let t = TableController::new(cfg).unwrap();
        assert_eq!(t.column_widths(), vec![2, 3]);
        t.set_data(data(&[&["wide cell", "ignored long text"]])).unwrap();
        assert_eq!(t.column_widths(), vec![9, 3]);
        t.on_filter_changed(0, "nothing");
        assert_eq!(t.column_widths(), vec![9, 3]);
        assert_eq!(t.alignments()[1], Alignment::Trailing);
    }

    #[test]
    fn handlers_may_replace_themselves() {
        let t = Arc::new(heroes());
        let selected = Arc::new(AtomicUsize::new(0));
        {
            let inner = Arc::downgrade(&t);
            let selected = selected.clone();
            t.set_on_selected(move |_| {
                selected.fetch_add(1, Ordering::SeqCst);
                if let Some(t) = inner.upgrade() {
                    t.set_on_selected(|_| {});
                }
            });
        }
        assert_eq!(t.on_row_selected(0), Some(1));
        assert_eq!(t.on_row_selected(0), Some(1));
        assert_eq!(selected.load(Ordering::SeqCst), 1);

        let refreshes = Arc::new(AtomicUsize::new(0));
        {
            let inner = Arc::downgrade(&t);
            let refreshes = refreshes.clone();
            t.set_on_refresh(move || {
                refreshes.fetch_add(1, Ordering::SeqCst);
                if let Some(t) = inner.upgrade() {
                    t.set_on_refresh(|| {});
                }
            });
        }
        t.set_data(data(&[&["a", "b", "c"]])).unwrap();
        t.on_filter_changed(0, "a");
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }
}
