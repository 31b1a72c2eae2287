//! A filterable, sortable, virtualized data table for [ratatui](https://ratatui.rs).
//!
//! ```no_run
//! use ratatui_datatable::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Arc::new(TableController::new(TableConfig::with_headers(["Name", "City"]))?);
//! table.set_data(vec![
//!     vec!["Ada".into(), "London".into()],
//!     vec!["Grace".into(), "New York".into()],
//! ])?;
//! table.set_on_selected(|original| println!("picked row {original}"));
//!
//! let mut view = DataTableView::new(table.clone());
//! // In your draw loop: view.render(area, buf, &Theme::default());
//! // In your event loop: view.handle_event(event);
//! # let _ = &mut view;
//! # Ok(())
//! # }
//! ```
//!
//! The engine lives in [`table`] and does not depend on any terminal backend; enable the
//! `crossterm` feature for [`crossterm_input`] conversions.
pub use ratatui_datatable_core::datatable;
pub use ratatui_datatable_core::input;
pub use ratatui_datatable_core::keymap;
pub use ratatui_datatable_core::render;
pub use ratatui_datatable_core::row_list;
pub use ratatui_datatable_core::table;
pub use ratatui_datatable_core::text_input;
pub use ratatui_datatable_core::theme;
pub use ratatui_datatable_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_datatable_core::crossterm_input;

pub mod prelude {
    pub use crate::datatable::view::DataTableAction;
    pub use crate::datatable::view::DataTableView;
    pub use crate::datatable::view::DataTableViewOptions;
    pub use crate::input::InputEvent;
    pub use crate::table::Alignment;
    pub use crate::table::ColumnConfig;
    pub use crate::table::SortDirection;
    pub use crate::table::TableConfig;
    pub use crate::table::TableController;
    pub use crate::theme::Theme;
}
