//! `ratatui-datatable-core` provides the data-view engine and widget primitives behind
//! `ratatui-datatable`.
//!
//! The crate is split in two layers:
//!
//! - [`table`]: a UI-independent engine. A [`table::TableController`] owns the rows, the
//!   per-column filter texts and the sort state, and keeps a derived view (sort first, then
//!   filter) that a renderer reads by view index. It is safe to share across threads.
//! - Widgets: [`datatable::view::DataTableView`] renders a controller with a filter bar, a
//!   sortable header, a virtualized body and an entry-count footer, and maps key/mouse input to
//!   controller operations.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: a render thread and a data-loading thread only share a lock.
//! - Original row indices are stable: selection callbacks always report the position a row had
//!   in the data you loaded, whatever the current sort or filter.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-datatable`. Use this crate directly if
//! you only need the engine or want to build your own render shell.
//!
//! Useful entry points:
//! - [`table::TableController`]: configure columns, load data, react to filter/header input.
//! - [`datatable::view::DataTableView`]: the ready-made table widget.
//! - [`row_list::RowListView`]: virtualized one-line rows with a cursor.
//! - [`text_input::TextInput`]: single-line input used for the filter bar.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;
pub mod viewport;

pub mod datatable;
pub mod input;
pub mod keymap;
pub mod row_list;
pub mod table;
pub mod text_input;
