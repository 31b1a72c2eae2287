//! The data-view engine.
//!
//! [`TableController`] owns a [`RowStore`], per-column [`FilterSet`] and a single-column
//! [`SortState`], and derives a [`View`] from them with [`ViewEngine`] on every mutation. Rows keep
//! their original index across filtering and sorting, so selections can be reported in terms of
//! the data the host supplied.

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod layout;
pub mod row;
pub mod sort;
pub mod summary;
pub mod view;

pub use config::Alignment;
pub use config::ColumnConfig;
pub use config::TableConfig;
pub use controller::TableController;
pub use error::ConfigError;
pub use error::DimensionError;
pub use filter::FilterSet;
pub use row::Row;
pub use row::RowSlots;
pub use row::RowStore;
pub use sort::SortDirection;
pub use sort::SortKey;
pub use sort::SortState;
pub use summary::EntrySummary;
pub use view::View;
pub use view::ViewEngine;
