use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

/// Horizontal placement of the table's columns in content coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    starts: Vec<u32>,
    widths: Vec<u16>,
    gap: u16,
    total: u32,
}

impl ColumnLayout {
    pub fn new(widths: &[u16], gap: u16) -> Self {
        let mut starts = Vec::with_capacity(widths.len());
        let mut x = 0u32;
        for (i, w) in widths.iter().enumerate() {
            if i > 0 {
                x += gap as u32;
            }
            starts.push(x);
            x += *w as u32;
        }
        Self {
            starts,
            widths: widths.to_vec(),
            gap,
            total: x,
        }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn width(&self, col: usize) -> u16 {
        self.widths.get(col).copied().unwrap_or(0)
    }

    pub fn start(&self, col: usize) -> u32 {
        self.starts.get(col).copied().unwrap_or(self.total)
    }

    pub fn total_width(&self) -> u32 {
        self.total
    }

    /// Column under content x-coordinate `x`. Gaps belong to the column on their left.
    pub fn column_at(&self, x: u32) -> Option<usize> {
        if x >= self.total {
            return None;
        }
        let idx = self.starts.partition_point(|&s| s <= x);
        idx.checked_sub(1)
    }

    /// Screen rect of `col` inside `area` when scrolled by `scroll_x`, plus the number of columns
    /// clipped off its left edge. `None` when the column is entirely outside `area`.
    pub fn visible_rect(&self, col: usize, scroll_x: u32, area: Rect) -> Option<(Rect, u32)> {
        let start = *self.starts.get(col)? as i64;
        let size = self.width(col) as u32;
        let rel = start - scroll_x as i64;
        let clip_left = (-rel).max(0) as u32;
        if rel >= area.width as i64 {
            return None;
        }
        let x = rel.max(0) as u16;
        let max_w = area.width.saturating_sub(x);
        let visible_w = size.saturating_sub(clip_left).min(max_w as u32) as u16;
        if visible_w == 0 {
            return None;
        }
        Some((
            Rect::new(area.x + x, area.y, visible_w, area.height),
            clip_left,
        ))
    }

    /// Draws a vertical rule in the gap after every column but the last.
    pub fn draw_separators(&self, area: Rect, scroll_x: u32, buf: &mut Buffer, style: Style) {
        if self.gap == 0 {
            return;
        }
        for col in 0..self.len().saturating_sub(1) {
            let sep = self.start(col) as i64 + self.width(col) as i64 - scroll_x as i64;
            if sep < 0 || sep >= area.width as i64 {
                continue;
            }
            for dy in 0..area.height {
                buf.set_span(
                    area.x + sep as u16,
                    area.y + dy,
                    &Span::styled("│", style),
                    1,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_columns_with_gaps() {
        let l = ColumnLayout::new(&[4, 6, 3], 1);
        assert_eq!(l.start(1), 5);
        assert_eq!(l.start(2), 12);
        assert_eq!(l.total_width(), 15);
        assert_eq!(l.column_at(0), Some(0));
        assert_eq!(l.column_at(4), Some(0));
        assert_eq!(l.column_at(5), Some(1));
        assert_eq!(l.column_at(14), Some(2));
        assert_eq!(l.column_at(15), None);
    }

    #[test]
    fn clips_scrolled_columns() {
        let l = ColumnLayout::new(&[4, 6, 3], 1);
        let area = Rect::new(10, 0, 8, 1);
        assert_eq!(l.visible_rect(0, 2, area), Some((Rect::new(10, 0, 2, 1), 2)));
        assert_eq!(l.visible_rect(1, 2, area), Some((Rect::new(13, 0, 5, 1), 0)));
        assert_eq!(l.visible_rect(2, 2, area), None);
        assert_eq!(l.visible_rect(0, 4, area), None);
    }
}
