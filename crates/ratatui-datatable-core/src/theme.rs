use ratatui::style::Modifier;
use ratatui::style::Style;

/// Styles shared by the table widgets.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub header: Style,
    pub filter: Style,
    pub filter_focused: Style,
    pub footer: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            header: Style::default().add_modifier(Modifier::BOLD),
            filter: Style::default().dark_gray(),
            filter_focused: Style::default().add_modifier(Modifier::UNDERLINED),
            footer: Style::default().dark_gray(),
        }
    }
}
