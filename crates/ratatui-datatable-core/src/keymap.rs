use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

/// Commands a [`DataTableView`](crate::datatable::view::DataTableView) understands while its
/// body has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableCommand {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    PrevColumn,
    NextColumn,
    Activate,
    Sort,
    ResetSort,
    FocusFilter,
    ClearFilters,
}

/// Key bindings for table navigation.
///
/// Defaults are Vim-like, matching the other list widgets: `j`/`k` move, `h`/`l` pick the column
/// a sort or filter applies to, `s` sorts that column, `/` edits its filter.
#[derive(Clone, Debug)]
pub struct TableBindings {
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
    pub prev_column: Vec<KeyEvent>,
    pub next_column: Vec<KeyEvent>,
    pub activate: Vec<KeyEvent>,
    pub sort: Vec<KeyEvent>,
    pub reset_sort: Vec<KeyEvent>,
    pub focus_filter: Vec<KeyEvent>,
    pub clear_filters: Vec<KeyEvent>,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            up: vec![key(KeyCode::Up), key_char('k')],
            down: vec![key(KeyCode::Down), key_char('j')],
            page_up: vec![key(KeyCode::PageUp), key_ctrl('u')],
            page_down: vec![key(KeyCode::PageDown), key_ctrl('d')],
            top: vec![key(KeyCode::Home), key_char('g')],
            bottom: vec![key(KeyCode::End), key_char('G')],
            prev_column: vec![key(KeyCode::Left), key_char('h')],
            next_column: vec![key(KeyCode::Right), key_char('l')],
            activate: vec![key(KeyCode::Enter)],
            sort: vec![key_char('s')],
            reset_sort: vec![key_char('S')],
            focus_filter: vec![key_char('/')],
            clear_filters: vec![key(KeyCode::Esc)],
        }
    }
}

impl TableBindings {
    pub fn command_for(&self, event: &KeyEvent) -> Option<TableCommand> {
        let table: [(&[KeyEvent], TableCommand); 13] = [
            (self.up.as_slice(), TableCommand::Up),
            (self.down.as_slice(), TableCommand::Down),
            (self.page_up.as_slice(), TableCommand::PageUp),
            (self.page_down.as_slice(), TableCommand::PageDown),
            (self.top.as_slice(), TableCommand::Top),
            (self.bottom.as_slice(), TableCommand::Bottom),
            (self.prev_column.as_slice(), TableCommand::PrevColumn),
            (self.next_column.as_slice(), TableCommand::NextColumn),
            (self.activate.as_slice(), TableCommand::Activate),
            (self.sort.as_slice(), TableCommand::Sort),
            (self.reset_sort.as_slice(), TableCommand::ResetSort),
            (self.focus_filter.as_slice(), TableCommand::FocusFilter),
            (self.clear_filters.as_slice(), TableCommand::ClearFilters),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|p| key_event_matches(p, event)))
            .map(|(_, cmd)| cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_modifiers() {
        assert!(key_event_matches(&key_char('d'), &key_char('d')));
        assert!(!key_event_matches(&key_char('d'), &key_ctrl('d')));
    }

    #[test]
    fn default_bindings_resolve_commands() {
        let b = TableBindings::default();
        assert_eq!(b.command_for(&key_char('j')), Some(TableCommand::Down));
        assert_eq!(b.command_for(&key_ctrl('d')), Some(TableCommand::PageDown));
        assert_eq!(b.command_for(&key_char('s')), Some(TableCommand::Sort));
        assert_eq!(b.command_for(&key_char('/')), Some(TableCommand::FocusFilter));
        assert_eq!(b.command_for(&key_char('x')), None);
    }
}
