use crate::table::error::ConfigError;
use crate::table::sort::SortDirection;

/// Horizontal alignment of a column's header caption and cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// Configuration for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnConfig {
    pub title: String,
    pub alignment: Alignment,
}

impl ColumnConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            alignment: Alignment::Leading,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Construction-time configuration for a [`TableController`](crate::table::TableController).
///
/// Only `columns` is mandatory. Everything else has a sensible default:
///
/// - `widths`: empty means every column is auto-sized; otherwise exactly one entry per column,
///   where `0` auto-sizes that column.
/// - `initial_sort`: `None` sorts column 0 ascending. An `Off` direction is treated as ascending.
#[derive(Clone, Debug, Default)]
pub struct TableConfig {
    pub columns: Vec<ColumnConfig>,
    pub widths: Vec<u16>,
    pub header_hidden: bool,
    pub footer_hidden: bool,
    pub filter_bar_hidden: bool,
    pub initial_sort: Option<(usize, SortDirection)>,
}

impl TableConfig {
    pub fn new(columns: Vec<ColumnConfig>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Shorthand for a config with leading-aligned columns titled by `headers`.
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(headers.into_iter().map(ColumnConfig::new).collect())
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let columns = self.columns.len();
        if columns == 0 {
            return Err(ConfigError::NoColumns);
        }

        let widths = if self.widths.is_empty() {
            vec![0; columns]
        } else if self.widths.len() == columns {
            self.widths.clone()
        } else {
            return Err(ConfigError::WidthCount {
                expected: columns,
                actual: self.widths.len(),
            });
        };

        let (index, direction) = self.initial_sort.unwrap_or((0, SortDirection::Ascending));
        if index >= columns {
            return Err(ConfigError::SortColumnOutOfRange { index, columns });
        }
        let direction = match direction {
            SortDirection::Off => SortDirection::Ascending,
            d => d,
        };

        Ok(ValidatedConfig {
            headers: self.columns.iter().map(|c| c.title.clone()).collect(),
            alignments: self.columns.iter().map(|c| c.alignment).collect(),
            widths,
            initial_sort: (index, direction),
        })
    }
}

pub(crate) struct ValidatedConfig {
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
    pub widths: Vec<u16>,
    pub initial_sort: (usize, SortDirection),
}
