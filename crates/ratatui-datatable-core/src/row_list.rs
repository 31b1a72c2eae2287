use crate::render;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use virtualizer::Align;
use virtualizer::VirtualItem;
use virtualizer::Virtualizer;
use virtualizer::VirtualizerOptions;

#[derive(Clone, Debug)]
pub struct RowListOptions {
    pub show_scrollbar: bool,
    pub overscan: usize,
    pub style: Style,
    pub cursor_style: Style,
    pub scrollbar_style: Style,
}

impl Default for RowListOptions {
    fn default() -> Self {
        Self {
            show_scrollbar: true,
            overscan: 2,
            style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            scrollbar_style: Style::default(),
        }
    }
}

/// Context passed to the `populate` callback in [`RowListView::render`].
#[derive(Clone, Copy, Debug)]
pub struct RowItemContext {
    pub index: usize,
    pub is_cursor: bool,
}

/// A virtualized list of one-line rows with a cursor.
///
/// Only rows inside the viewport (plus overscan) are handed to the `populate` callback, so the
/// cost of a frame does not depend on the row count. The list does not own row data; the caller
/// supplies the row count and fills each visible row.
pub struct RowListView {
    pub state: ViewportState,
    options: RowListOptions,
    rows: usize,
    cursor: Option<usize>,
    row_v: Virtualizer,
    row_items: Vec<VirtualItem>,
}

impl Default for RowListView {
    fn default() -> Self {
        let options = RowListOptions::default();
        let row_v = make_virtualizer(0, options.overscan);
        Self {
            state: ViewportState::default(),
            options,
            rows: 0,
            cursor: None,
            row_v,
            row_items: Vec::new(),
        }
    }
}

impl RowListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RowListOptions) -> Self {
        let mut v = Self::default();
        v.set_options(options);
        v
    }

    pub fn options(&self) -> &RowListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RowListOptions) {
        self.options = options;
        self.row_v.set_overscan(self.options.overscan);
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Updates the row count, clamping the cursor and scroll position.
    pub fn set_row_count(&mut self, rows: usize) {
        if rows == self.rows {
            return;
        }
        self.rows = rows;
        self.row_v = make_virtualizer(rows, self.options.overscan);
        self.cursor = clamp_cursor(self.cursor, rows);
        self.sync_virtualizer();
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = clamp_cursor(cursor, self.rows);
        self.ensure_cursor_visible();
    }

    /// Moves the cursor by `delta` rows. Returns `false` if it did not move.
    pub fn move_cursor_by(&mut self, delta: i64) -> bool {
        if self.rows == 0 {
            return false;
        }
        let cur = self.cursor.unwrap_or(0) as i64;
        let next = (cur + delta).clamp(0, self.rows as i64 - 1) as usize;
        if self.cursor == Some(next) {
            return false;
        }
        self.cursor = Some(next);
        self.ensure_cursor_visible();
        true
    }

    pub fn page_down(&mut self) -> bool {
        self.move_cursor_by(self.page_size())
    }

    pub fn page_up(&mut self) -> bool {
        self.move_cursor_by(-self.page_size())
    }

    pub fn to_top(&mut self) -> bool {
        self.move_cursor_by(-(self.rows as i64))
    }

    pub fn to_bottom(&mut self) -> bool {
        self.move_cursor_by(self.rows as i64)
    }

    /// Scrolls without moving the cursor.
    pub fn scroll_y_by(&mut self, delta: i32) {
        self.sync_virtualizer();
        self.state.scroll_y_by(delta);
        self.row_v.set_scroll_offset(self.state.y as u64);
        self.state.y = clamp_u32(self.row_v.scroll_offset());
    }

    pub fn ensure_cursor_visible(&mut self) {
        self.sync_virtualizer();
        let Some(c) = self.cursor else {
            return;
        };
        self.row_v.scroll_to_index(c, Align::Auto);
        self.state.y = clamp_u32(self.row_v.scroll_offset());
        self.state.clamp();
    }

    /// Row index displayed `dy` lines below the top of the list area, if any.
    pub fn index_at(&self, dy: u16) -> Option<usize> {
        let offset = self.state.y as u64 + dy as u64;
        if offset >= self.rows as u64 {
            return None;
        }
        self.row_v.index_at_offset(offset)
    }

    pub fn render<F>(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, mut populate: F)
    where
        F: FnMut(Rect, RowItemContext, &mut Buffer),
    {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (content_area, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let base_style = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        let cursor_style = self.options.cursor_style.patch(theme.accent);
        buf.set_style(content_area, base_style);

        self.state.set_viewport(content_area.width, content_area.height);
        self.sync_virtualizer();
        self.row_v.collect_virtual_items(&mut self.row_items);

        let scroll_y = self.row_v.scroll_offset();
        for item in self.row_items.iter().copied() {
            let row_rect = clipped_rect_y(content_area, scroll_y, item.start, item.size);
            if row_rect.height == 0 {
                continue;
            }
            let is_cursor = self.cursor == Some(item.index);
            buf.set_style(row_rect, if is_cursor { cursor_style } else { base_style });
            populate(
                row_rect,
                RowItemContext {
                    index: item.index,
                    is_cursor,
                },
                buf,
            );
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, area.y, 1, area.height),
                buf,
                &self.state,
                self.options.scrollbar_style,
            );
        }
    }

    fn page_size(&self) -> i64 {
        self.state.viewport_h.saturating_sub(1).max(1) as i64
    }

    fn sync_virtualizer(&mut self) {
        self.row_v.set_count(self.rows);
        self.row_v.set_viewport_size(self.state.viewport_h as u32);
        self.row_v.set_overscan(self.options.overscan);
        self.row_v.set_scroll_offset(self.state.y as u64);
        self.state.y = clamp_u32(self.row_v.scroll_offset());

        let content_w = self.state.viewport_w as u32;
        self.state
            .set_content(content_w, clamp_u32(self.row_v.total_size()));
    }
}

fn make_virtualizer(rows: usize, overscan: usize) -> Virtualizer {
    let mut opts = VirtualizerOptions::new(rows, |_| 1);
    opts.overscan = overscan;
    Virtualizer::new(opts)
}

fn clamp_cursor(cursor: Option<usize>, rows: usize) -> Option<usize> {
    match cursor {
        _ if rows == 0 => None,
        None => Some(0),
        Some(i) => Some(i.min(rows - 1)),
    }
}

fn clamp_u32(v: u64) -> u32 {
    v.min(u32::MAX as u64) as u32
}

fn clipped_rect_y(area: Rect, scroll_y: u64, start: u64, size: u32) -> Rect {
    let rel = start as i64 - scroll_y as i64;
    let clip_top = (-rel).max(0) as u32;
    let y = rel.clamp(0, area.height as i64) as u16;
    let max_h = area.height.saturating_sub(y);
    let visible_h = size.saturating_sub(clip_top).min(max_h as u32) as u16;
    Rect::new(area.x, area.y + y, area.width, visible_h)
}
