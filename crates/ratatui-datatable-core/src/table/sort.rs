use crate::table::error::ConfigError;

/// Sort direction of a single column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Off,
    Ascending,
    Descending,
}

impl SortDirection {
    /// The direction a column moves to when its own header is clicked.
    ///
    /// `Off -> Ascending -> Descending -> Ascending -> ...`. `Off` is never a target; a column only
    /// returns to `Off` when another column is activated.
    pub fn on_click(self) -> Self {
        match self {
            SortDirection::Off => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Glyph appended to a header caption.
    pub fn indicator(self) -> Option<&'static str> {
        match self {
            SortDirection::Off => None,
            SortDirection::Ascending => Some(SORT_ASC_GLYPH),
            SortDirection::Descending => Some(SORT_DESC_GLYPH),
        }
    }
}

pub const SORT_ASC_GLYPH: &str = "↑";
pub const SORT_DESC_GLYPH: &str = "↓";

/// The active sort column and its (never `Off`) direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub direction: SortDirection,
}

/// Single-column sort state.
///
/// At most one column has a non-`Off` direction; this is enforced by storing only the active key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    num_cols: usize,
    active: Option<SortKey>,
}

impl SortState {
    /// A state with every column `Off`.
    pub fn unsorted(num_cols: usize) -> Self {
        Self {
            num_cols,
            active: None,
        }
    }

    /// A state with `column` sorted in `direction`. `Off` yields an unsorted state.
    pub fn new(
        num_cols: usize,
        column: usize,
        direction: SortDirection,
    ) -> Result<Self, ConfigError> {
        if column >= num_cols {
            return Err(ConfigError::SortColumnOutOfRange {
                index: column,
                columns: num_cols,
            });
        }
        let active = match direction {
            SortDirection::Off => None,
            direction => Some(SortKey { column, direction }),
        };
        Ok(Self { num_cols, active })
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn active(&self) -> Option<SortKey> {
        self.active
    }

    pub fn direction(&self, column: usize) -> SortDirection {
        match self.active {
            Some(key) if key.column == column => key.direction,
            _ => SortDirection::Off,
        }
    }

    /// Applies a header click on `column`.
    ///
    /// Every other column is forced `Off`; `column` advances per [`SortDirection::on_click`].
    /// Returns `false` (and changes nothing) when `column` is out of range.
    pub fn click(&mut self, column: usize) -> bool {
        if column >= self.num_cols {
            return false;
        }
        let direction = self.direction(column).on_click();
        self.active = Some(SortKey { column, direction });
        true
    }

    /// Header caption for `column`: the title plus the direction glyph, if any.
    pub fn caption(&self, column: usize, title: &str) -> String {
        match self.direction(column).indicator() {
            Some(glyph) => format!("{title}{glyph}"),
            None => title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_same_column_cycles_without_off() {
        let mut s = SortState::unsorted(3);
        s.click(1);
        assert_eq!(s.direction(1), SortDirection::Ascending);
        s.click(1);
        assert_eq!(s.direction(1), SortDirection::Descending);
        s.click(1);
        assert_eq!(s.direction(1), SortDirection::Ascending);
    }

    #[test]
    fn clicking_other_column_resets_previous() {
        let mut s = SortState::new(3, 0, SortDirection::Descending).unwrap();
        s.click(2);
        assert_eq!(s.direction(0), SortDirection::Off);
        assert_eq!(s.direction(1), SortDirection::Off);
        assert_eq!(s.direction(2), SortDirection::Ascending);
    }

    #[test]
    fn out_of_range_click_is_ignored() {
        let mut s = SortState::new(2, 0, SortDirection::Ascending).unwrap();
        assert!(!s.click(5));
        assert_eq!(
            s.active(),
            Some(SortKey {
                column: 0,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn captions_carry_direction_glyph() {
        let mut s = SortState::new(2, 0, SortDirection::Ascending).unwrap();
        assert_eq!(s.caption(0, "Name"), "Name↑");
        assert_eq!(s.caption(1, "Age"), "Age");
        s.click(0);
        assert_eq!(s.caption(0, "Name"), "Name↓");
    }

    #[test]
    fn new_validates_column() {
        assert!(SortState::new(2, 2, SortDirection::Ascending).is_err());
        assert_eq!(
            SortState::new(2, 1, SortDirection::Off).unwrap().active(),
            None
        );
    }
}
