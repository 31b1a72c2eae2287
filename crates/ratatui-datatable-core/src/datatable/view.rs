use crate::datatable::columns::ColumnLayout;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::TableBindings;
use crate::keymap::TableCommand;
use crate::render;
use crate::row_list::RowListOptions;
use crate::row_list::RowListView;
use crate::table::Alignment;
use crate::table::RowSlots;
use crate::table::TableController;
use crate::text_input::TextInput;
use crate::text_input::TextInputAction;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use std::sync::Arc;

const FILTER_PLACEHOLDER: &str = "filter";
const SCROLL_LINES: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    /// A row was activated; `original_index` has already been reported to the controller's
    /// selection callback.
    Selected {
        view_index: usize,
        original_index: usize,
    },
}

/// Which part of the table receives key events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Body,
    Filter(usize),
}

/// Options for [`DataTableView`].
#[derive(Clone, Debug)]
pub struct DataTableViewOptions {
    pub col_gap: u16,
    pub show_scrollbar: bool,
    pub overscan: usize,
    pub cursor_style: Style,
    pub active_column_style: Style,
    pub grid_line_style: Style,
    pub bindings: TableBindings,
}

impl Default for DataTableViewOptions {
    fn default() -> Self {
        Self {
            col_gap: 1,
            show_scrollbar: true,
            overscan: 2,
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            active_column_style: Style::default().add_modifier(Modifier::UNDERLINED),
            grid_line_style: Style::default(),
            bindings: TableBindings::default(),
        }
    }
}

/// Screen areas of the last render, used to hit-test mouse events.
#[derive(Clone, Copy, Debug, Default)]
struct Regions {
    filter: Option<Rect>,
    header: Option<Rect>,
    body: Rect,
}

/// A filterable, sortable table widget backed by a shared [`TableController`].
///
/// The widget is the render shell around the controller: a row of per-column filter inputs, a
/// header whose captions carry the sort indicator, a virtualized body and an entry-count footer.
/// Key and mouse events are translated into controller operations; the controller stays the
/// single owner of the data, so another thread may call
/// [`TableController::set_data`] while the widget is in use.
///
/// Like the other widgets in this crate it is event-loop agnostic: feed it events with
/// [`handle_event`](Self::handle_event) and draw it with [`render`](Self::render).
pub struct DataTableView {
    controller: Arc<TableController>,
    options: DataTableViewOptions,
    list: RowListView,
    filters: Vec<TextInput>,
    focus: Focus,
    active_col: usize,
    hscroll: ViewportState,
    columns: ColumnLayout,
    slots: RowSlots,
    regions: Regions,
}

impl DataTableView {
    pub fn new(controller: Arc<TableController>) -> Self {
        Self::with_options(controller, DataTableViewOptions::default())
    }

    pub fn with_options(controller: Arc<TableController>, options: DataTableViewOptions) -> Self {
        let filters = vec![TextInput::new(); controller.num_cols()];
        let list = RowListView::with_options(RowListOptions {
            show_scrollbar: options.show_scrollbar,
            overscan: options.overscan,
            cursor_style: options.cursor_style,
            ..Default::default()
        });
        let columns = ColumnLayout::new(&controller.column_widths(), options.col_gap);
        let slots = controller.new_row_template();

        let mut view = Self {
            controller,
            options,
            list,
            filters,
            focus: Focus::Body,
            active_col: 0,
            hscroll: ViewportState::default(),
            columns,
            slots,
            regions: Regions::default(),
        };
        view.sync_from_controller();
        view
    }

    pub fn controller(&self) -> &Arc<TableController> {
        &self.controller
    }

    pub fn options(&self) -> &DataTableViewOptions {
        &self.options
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = match focus {
            Focus::Filter(col)
                if self.controller.filter_bar_hidden() || col >= self.filters.len() =>
            {
                Focus::Body
            }
            f => f,
        };
    }

    /// The column that sort and filter keys apply to.
    pub fn active_column(&self) -> usize {
        self.active_col
    }

    /// View index of the row under the cursor.
    pub fn cursor(&self) -> Option<usize> {
        self.list.cursor()
    }

    /// How far down the body is scrolled, or `None` when every row fits.
    pub fn scroll_percent(&self) -> Option<u8> {
        self.list.state.percent_y()
    }

    pub fn handle_event(&mut self, event: InputEvent) -> DataTableAction {
        self.sync_from_controller();
        match (self.focus, event) {
            (_, InputEvent::Mouse(m)) => self.handle_mouse(m),
            (Focus::Filter(col), event) => self.handle_filter_event(col, event),
            (Focus::Body, InputEvent::Key(key)) => self.handle_body_key(key),
            (Focus::Body, InputEvent::Paste(_)) => DataTableAction::None,
        }
    }

    /// Terminal cursor position while a filter input has focus.
    pub fn cursor_pos(&self) -> Option<(u16, u16)> {
        let Focus::Filter(col) = self.focus else {
            return None;
        };
        let area = self.regions.filter?;
        let (rect, _) = self.columns.visible_rect(col, self.hscroll.x, area)?;
        self.filters.get(col)?.cursor_pos(rect)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.sync_from_controller();
        self.columns = ColumnLayout::new(&self.controller.column_widths(), self.options.col_gap);

        let content_w = if self.options.show_scrollbar && area.width >= 2 {
            area.width - 1
        } else {
            area.width
        };
        self.hscroll.set_viewport(content_w, 1);
        self.hscroll.set_content(self.columns.total_width(), 1);

        let mut y = area.y;
        let bottom = area.y + area.height;
        let take_line = |hidden: bool, y: &mut u16| -> Option<Rect> {
            if hidden || *y >= bottom {
                return None;
            }
            let r = Rect::new(area.x, *y, content_w, 1);
            *y += 1;
            Some(r)
        };
        let filter_area = take_line(self.controller.filter_bar_hidden(), &mut y);
        let header_area = take_line(self.controller.header_hidden(), &mut y);
        let footer_h = u16::from(!self.controller.footer_hidden() && bottom > y);
        let body_area = Rect::new(area.x, y, area.width, bottom - y - footer_h);
        let footer_area = (footer_h > 0).then(|| Rect::new(area.x, bottom - 1, area.width, 1));

        self.regions = Regions {
            filter: filter_area,
            header: header_area,
            body: body_area,
        };

        if let Some(r) = filter_area {
            self.render_filter_bar(r, buf, theme);
        }
        if let Some(r) = header_area {
            self.render_header(r, buf, theme);
        }
        self.render_body(body_area, buf, theme);
        if let Some(r) = footer_area {
            let summary = self.controller.summary().to_string();
            buf.set_style(r, theme.footer);
            render::render_str_clipped(r.x, r.y, 0, r.width, buf, &summary, theme.footer);
        }
    }

    fn render_filter_bar(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        buf.set_style(area, theme.text_primary);
        for col in 0..self.filters.len() {
            let Some((rect, _)) = self.columns.visible_rect(col, self.hscroll.x, area) else {
                continue;
            };
            let focused = self.focus == Focus::Filter(col);
            let style = if focused {
                theme.filter_focused
            } else {
                theme.filter
            };
            let input = &mut self.filters[col];
            if input.is_empty() && !focused {
                buf.set_style(rect, style);
                render::render_str_clipped(
                    rect.x,
                    rect.y,
                    0,
                    rect.width,
                    buf,
                    FILTER_PLACEHOLDER,
                    theme.text_muted,
                );
            } else {
                input.render_ref(rect, buf, style);
            }
        }
        self.columns.draw_separators(
            area,
            self.hscroll.x,
            buf,
            grid_style(&self.options, theme),
        );
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let header_style = theme.header;
        buf.set_style(area, header_style);
        let captions = self.controller.header_captions();
        let alignments = self.controller.alignments();
        for (col, caption) in captions.iter().enumerate() {
            let Some((rect, clip_left)) = self.columns.visible_rect(col, self.hscroll.x, area)
            else {
                continue;
            };
            let mut style = header_style;
            if col == self.active_col {
                style = style.patch(self.options.active_column_style);
            }
            let alignment = alignments.get(col).copied().unwrap_or_default();
            let text = render::align_text(caption, self.columns.width(col), alignment);
            render::render_str_clipped(rect.x, rect.y, clip_left, rect.width, buf, &text, style);
        }
        self.columns.draw_separators(
            area,
            self.hscroll.x,
            buf,
            grid_style(&self.options, theme),
        );
    }

    fn render_body(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let controller = &self.controller;
        let columns = &self.columns;
        let slots = &mut self.slots;
        let scroll_x = self.hscroll.x;
        let grid = grid_style(&self.options, theme);
        let alignments = controller.alignments();

        self.list.render(area, buf, theme, |rect, ctx, buf| {
            // The view may have shrunk since the row count was read; render a blank row then.
            controller.populate_row(ctx.index, slots);
            let style = buf
                .cell((rect.x, rect.y))
                .map(|c| c.style())
                .unwrap_or_default();
            for col in 0..columns.len() {
                let Some((cell, clip_left)) = columns.visible_rect(col, scroll_x, rect) else {
                    continue;
                };
                let alignment = alignments.get(col).copied().unwrap_or(Alignment::Leading);
                let text = render::align_text(slots.cell(col), columns.width(col), alignment);
                render::render_str_clipped(cell.x, cell.y, clip_left, cell.width, buf, &text, style);
            }
            columns.draw_separators(rect, scroll_x, buf, grid);
        });
    }

    fn handle_body_key(&mut self, key: KeyEvent) -> DataTableAction {
        let Some(cmd) = self.options.bindings.command_for(&key) else {
            return DataTableAction::None;
        };
        match cmd {
            TableCommand::Up => redraw_if(self.list.move_cursor_by(-1)),
            TableCommand::Down => redraw_if(self.list.move_cursor_by(1)),
            TableCommand::PageUp => redraw_if(self.list.page_up()),
            TableCommand::PageDown => redraw_if(self.list.page_down()),
            TableCommand::Top => redraw_if(self.list.to_top()),
            TableCommand::Bottom => redraw_if(self.list.to_bottom()),
            TableCommand::PrevColumn => self.set_active_column(self.active_col.saturating_sub(1)),
            TableCommand::NextColumn => self.set_active_column(self.active_col + 1),
            TableCommand::Activate => self.activate_cursor(),
            TableCommand::Sort => self.click_header(self.active_col),
            TableCommand::ResetSort => {
                self.controller.reset_sort();
                self.sync_from_controller();
                DataTableAction::Redraw
            }
            TableCommand::FocusFilter => {
                self.set_focus(Focus::Filter(self.active_col));
                redraw_if(self.focus != Focus::Body)
            }
            TableCommand::ClearFilters => {
                if self.filters.iter().all(TextInput::is_empty) {
                    return DataTableAction::None;
                }
                self.filters.iter_mut().for_each(TextInput::clear);
                self.controller.clear_filters();
                self.after_view_change();
                DataTableAction::Redraw
            }
        }
    }

    fn handle_filter_event(&mut self, col: usize, event: InputEvent) -> DataTableAction {
        if let InputEvent::Key(key) = &event {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.focus = Focus::Body;
                    return DataTableAction::Redraw;
                }
                KeyCode::Tab => return self.focus_filter((col + 1) % self.filters.len()),
                KeyCode::BackTab => {
                    let n = self.filters.len();
                    return self.focus_filter((col + n - 1) % n);
                }
                _ => {}
            }
        }

        let Some(input) = self.filters.get_mut(col) else {
            self.focus = Focus::Body;
            return DataTableAction::Redraw;
        };
        match input.input(event) {
            TextInputAction::None => DataTableAction::None,
            TextInputAction::Redraw => DataTableAction::Redraw,
            TextInputAction::Changed(text) => {
                self.controller.on_filter_changed(col, text);
                self.after_view_change();
                DataTableAction::Redraw
            }
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> DataTableAction {
        let body = self.regions.body;
        match m.kind {
            MouseEventKind::ScrollUp if contains(body, m.x, m.y) => {
                self.list.scroll_y_by(-SCROLL_LINES);
                DataTableAction::Redraw
            }
            MouseEventKind::ScrollDown if contains(body, m.x, m.y) => {
                self.list.scroll_y_by(SCROLL_LINES);
                DataTableAction::Redraw
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(col) = self.column_hit(self.regions.header, m) {
                    self.active_col = col;
                    return self.click_header(col);
                }
                if let Some(col) = self.column_hit(self.regions.filter, m) {
                    self.active_col = col;
                    return self.focus_filter(col);
                }
                if contains(body, m.x, m.y) {
                    let Some(index) = self.list.index_at(m.y - body.y) else {
                        return DataTableAction::None;
                    };
                    self.focus = Focus::Body;
                    self.list.set_cursor(Some(index));
                    return self.activate_cursor();
                }
                DataTableAction::None
            }
            _ => DataTableAction::None,
        }
    }

    fn column_hit(&self, area: Option<Rect>, m: MouseEvent) -> Option<usize> {
        let area = area?;
        if !contains(area, m.x, m.y) {
            return None;
        }
        self.columns
            .column_at(self.hscroll.x + (m.x - area.x) as u32)
    }

    fn click_header(&mut self, col: usize) -> DataTableAction {
        if !self.controller.on_header_clicked(col) {
            return DataTableAction::None;
        }
        self.sync_from_controller();
        DataTableAction::Redraw
    }

    fn focus_filter(&mut self, col: usize) -> DataTableAction {
        self.set_focus(Focus::Filter(col));
        if let Focus::Filter(col) = self.focus {
            self.active_col = col;
            self.reveal_active_column();
        }
        DataTableAction::Redraw
    }

    fn activate_cursor(&mut self) -> DataTableAction {
        let Some(view_index) = self.list.cursor() else {
            return DataTableAction::None;
        };
        match self.controller.on_row_selected(view_index) {
            Some(original_index) => DataTableAction::Selected {
                view_index,
                original_index,
            },
            None => DataTableAction::None,
        }
    }

    fn set_active_column(&mut self, col: usize) -> DataTableAction {
        let col = col.min(self.controller.num_cols().saturating_sub(1));
        if col == self.active_col {
            return DataTableAction::None;
        }
        self.active_col = col;
        self.reveal_active_column();
        DataTableAction::Redraw
    }

    fn reveal_active_column(&mut self) {
        let col = self.active_col;
        self.hscroll
            .reveal_x(self.columns.start(col), self.columns.width(col) as u32);
    }

    fn after_view_change(&mut self) {
        self.sync_from_controller();
        self.list.set_cursor(Some(0));
    }

    /// Pulls state the host may have changed through the shared controller: the row count and
    /// the filter texts.
    fn sync_from_controller(&mut self) {
        self.list.set_row_count(self.controller.row_count());
        for (col, input) in self.filters.iter_mut().enumerate() {
            let Some(text) = self.controller.filter_text(col) else {
                continue;
            };
            if input.text() != text {
                input.set_text(text);
            }
        }
    }
}

fn redraw_if(changed: bool) -> DataTableAction {
    if changed {
        DataTableAction::Redraw
    } else {
        DataTableAction::None
    }
}

fn grid_style(options: &DataTableViewOptions, theme: &Theme) -> Style {
    if options.grid_line_style == Style::default() {
        theme.text_muted
    } else {
        options.grid_line_style
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableConfig;

    fn heroes() -> Arc<TableController> {
        let t = TableController::new(TableConfig::with_headers(["First", "Second", "Third"]))
            .unwrap();
        t.set_data(vec![
            vec!["Joker".into(), "Peter Parker".into(), "Superman".into()],
            vec!["Bruce Wayne".into(), "Penguin".into(), "Dr. Doom".into()],
            vec!["alpha".into(), "bravo".into(), "charlie".into()],
        ])
        .unwrap();
        Arc::new(t)
    }

    fn draw(view: &mut DataTableView) -> Buffer {
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, &Theme::default());
        buf
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn press(view: &mut DataTableView, code: KeyCode) -> DataTableAction {
        view.handle_event(InputEvent::Key(KeyEvent::new(code)))
    }

    #[test]
    fn renders_header_body_and_footer() {
        let mut view = DataTableView::new(heroes());
        let buf = draw(&mut view);
        assert!(line(&buf, 0).starts_with("filter"));
        assert!(line(&buf, 1).starts_with("First↑"));
        assert!(line(&buf, 1).contains("Second"));
        assert!(line(&buf, 2).starts_with("Bruce Wayne"));
        assert!(line(&buf, 3).starts_with("Joker"));
        assert!(line(&buf, 4).starts_with("alpha"));
        assert_eq!(line(&buf, 7), "3 entries");
    }

    #[test]
    fn clicking_header_sorts_and_shows_glyph() {
        let ctl = heroes();
        let mut view = DataTableView::new(ctl.clone());
        draw(&mut view);

        let action = view.handle_event(InputEvent::Mouse(MouseEvent::left_click(13, 1)));
        assert_eq!(action, DataTableAction::Redraw);
        assert_eq!(view.active_column(), 1);
        assert_eq!(ctl.sort_direction(1), crate::table::SortDirection::Ascending);

        let buf = draw(&mut view);
        assert!(line(&buf, 1).contains("Second↑"));
        // 'P' (Penguin, Peter Parker) sorts before 'b' (bravo).
        assert!(line(&buf, 2).starts_with("Bruce Wayne"));
        assert!(line(&buf, 4).starts_with("alpha"));
    }

    #[test]
    fn typing_in_filter_narrows_rows() {
        let ctl = heroes();
        let mut view = DataTableView::new(ctl.clone());
        draw(&mut view);

        assert_eq!(press(&mut view, KeyCode::Char('/')), DataTableAction::Redraw);
        assert_eq!(view.focus(), Focus::Filter(0));
        press(&mut view, KeyCode::Char('O'));
        assert_eq!(ctl.filter_text(0).as_deref(), Some("O"));
        assert_eq!(ctl.row_count(), 1);

        let buf = draw(&mut view);
        assert!(line(&buf, 0).starts_with("O"));
        assert!(line(&buf, 2).starts_with("Joker"));
        assert_eq!(line(&buf, 3), "");
        assert_eq!(line(&buf, 7), "1 of 3 entries (filtered)");
        assert!(view.cursor_pos().is_some());

        press(&mut view, KeyCode::Esc);
        assert_eq!(view.focus(), Focus::Body);
        press(&mut view, KeyCode::Esc);
        assert_eq!(ctl.row_count(), 3);
        assert_eq!(ctl.filter_text(0).as_deref(), Some(""));
    }

    #[test]
    fn filter_bar_follows_filters_changed_through_controller() {
        let ctl = heroes();
        let mut view = DataTableView::new(ctl.clone());
        draw(&mut view);

        press(&mut view, KeyCode::Char('/'));
        press(&mut view, KeyCode::Char('j'));
        press(&mut view, KeyCode::Esc);
        assert_eq!(ctl.filter_text(0).as_deref(), Some("j"));

        ctl.clear_filters();
        let buf = draw(&mut view);
        assert!(line(&buf, 0).starts_with("filter"));

        press(&mut view, KeyCode::Char('/'));
        press(&mut view, KeyCode::Char('o'));
        assert_eq!(ctl.filter_text(0).as_deref(), Some("o"));

        ctl.on_filter_changed(0, "bru");
        press(&mut view, KeyCode::Char('c'));
        assert_eq!(ctl.filter_text(0).as_deref(), Some("bruc"));
        assert_eq!(ctl.row_count(), 1);
    }

    #[test]
    fn enter_reports_original_index() {
        let ctl = heroes();
        let selected = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = selected.clone();
        ctl.set_on_selected(move |i| sink.lock().unwrap().push(i));

        let mut view = DataTableView::new(ctl.clone());
        draw(&mut view);
        press(&mut view, KeyCode::Char('s'));
        assert_eq!(
            ctl.sort_direction(0),
            crate::table::SortDirection::Descending
        );
        press(&mut view, KeyCode::Down);
        assert_eq!(
            press(&mut view, KeyCode::Enter),
            DataTableAction::Selected {
                view_index: 1,
                original_index: 0
            }
        );
        assert_eq!(*selected.lock().unwrap(), vec![0]);
    }

    #[test]
    fn clicking_body_row_selects_it() {
        let mut view = DataTableView::new(heroes());
        draw(&mut view);
        let action = view.handle_event(InputEvent::Mouse(MouseEvent::left_click(2, 4)));
        assert_eq!(
            action,
            DataTableAction::Selected {
                view_index: 2,
                original_index: 2
            }
        );
        assert_eq!(view.cursor(), Some(2));
        assert_eq!(
            view.handle_event(InputEvent::Mouse(MouseEvent::left_click(2, 6))),
            DataTableAction::None
        );
    }

    #[test]
    fn hidden_bars_give_body_the_space() {
        let mut config = TableConfig::with_headers(["A"]);
        config.header_hidden = true;
        config.filter_bar_hidden = true;
        config.footer_hidden = true;
        let ctl = Arc::new(TableController::new(config).unwrap());
        ctl.set_data(vec![vec!["x".into()], vec!["y".into()]]).unwrap();

        let mut view = DataTableView::new(ctl);
        let buf = draw(&mut view);
        assert!(line(&buf, 0).starts_with('x'));
        assert!(line(&buf, 1).starts_with('y'));
        assert_eq!(press(&mut view, KeyCode::Char('/')), DataTableAction::None);
        assert_eq!(view.focus(), Focus::Body);
    }
}
