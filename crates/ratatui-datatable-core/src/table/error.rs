//! Error types surfaced by the table engine.

/// Invalid construction-time configuration. The table is not created.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The header defines no columns.
    #[error("no headers defined")]
    NoColumns,

    /// Fixed widths were given, but not one per column.
    #[error("need to provide widths for exactly {expected} columns, got {actual}")]
    WidthCount { expected: usize, actual: usize },

    /// The initial sort column is outside `[0, columns)`.
    #[error("invalid index {index} for initial sort column, table has {columns} columns")]
    SortColumnOutOfRange { index: usize, columns: usize },
}

/// `set_data` was called with a row whose column count disagrees with the header.
///
/// Carries the first offending row. Nothing was applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("row {row} has {actual} columns, expected {expected}")]
pub struct DimensionError {
    pub row: usize,
    pub expected: usize,
    pub actual: usize,
}
