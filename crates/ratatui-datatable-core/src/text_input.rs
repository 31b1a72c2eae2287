use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextInputAction {
    /// The key was not consumed.
    None,
    /// Only the cursor moved.
    Redraw,
    /// The content changed; carries the new text.
    Changed(String),
}

/// A single-line editable text box.
///
/// Every edit reports the full new content via [`TextInputAction::Changed`], which is what a
/// filter-as-you-type search box needs. Newlines in pasted text are dropped.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    text: String,
    cursor: usize, // char index
    scroll_x: u32, // display columns
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = single_line(&text.into());
        self.cursor = self.char_len();
        self.scroll_x = 0;
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    pub fn input(&mut self, event: InputEvent) -> TextInputAction {
        match event {
            InputEvent::Paste(s) => {
                let s = single_line(&s);
                if s.is_empty() {
                    return TextInputAction::None;
                }
                for ch in s.chars() {
                    self.insert_char(ch);
                }
                self.changed()
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_) => TextInputAction::None,
        }
    }

    /// Renders the text with horizontal scrolling that keeps the cursor visible.
    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, style: Style) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), style);
        self.ensure_cursor_visible(area.width);
        render::render_str_clipped(
            area.x,
            area.y,
            self.scroll_x,
            area.width,
            buf,
            &self.text,
            style,
        );
    }

    /// Terminal position of the cursor inside `area`, if visible.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let x = self.cursor_display_x().saturating_sub(self.scroll_x);
        if x >= area.width as u32 {
            return None;
        }
        Some((area.x + x as u16, area.y))
    }

    fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if !key.is_text() {
                    return TextInputAction::None;
                }
                self.insert_char(c);
                self.changed()
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return TextInputAction::None;
                }
                self.cursor -= 1;
                let b = byte_index_from_char_index(&self.text, self.cursor);
                self.text.remove(b);
                self.changed()
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return TextInputAction::None;
                }
                let b = byte_index_from_char_index(&self.text, self.cursor);
                self.text.remove(b);
                self.changed()
            }
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to((self.cursor + 1).min(self.char_len())),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.char_len()),
            _ => TextInputAction::None,
        }
    }

    fn move_to(&mut self, cursor: usize) -> TextInputAction {
        if cursor == self.cursor {
            return TextInputAction::None;
        }
        self.cursor = cursor;
        TextInputAction::Redraw
    }

    fn changed(&self) -> TextInputAction {
        TextInputAction::Changed(self.text.clone())
    }

    fn insert_char(&mut self, ch: char) {
        let b = byte_index_from_char_index(&self.text, self.cursor);
        self.text.insert(b, ch);
        self.cursor += 1;
    }

    fn ensure_cursor_visible(&mut self, width: u16) {
        let cx = self.cursor_display_x();
        let w = width as u32;
        if cx < self.scroll_x {
            self.scroll_x = cx;
        } else if cx >= self.scroll_x.saturating_add(w) {
            self.scroll_x = cx.saturating_sub(w.saturating_sub(1));
        }
    }

    fn cursor_display_x(&self) -> u32 {
        self.text
            .chars()
            .take(self.cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0) as u32)
            .sum()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

fn single_line(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(s.len())
}
