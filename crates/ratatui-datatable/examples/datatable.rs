use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_datatable::crossterm_input::input_event_from_crossterm;
use ratatui_datatable::datatable::view::DataTableAction;
use ratatui_datatable::datatable::view::DataTableView;
use ratatui_datatable::datatable::view::Focus;
use ratatui_datatable::table::Alignment;
use ratatui_datatable::table::ColumnConfig;
use ratatui_datatable::table::SortDirection;
use ratatui_datatable::table::TableConfig;
use ratatui_datatable::table::TableController;
use ratatui_datatable::theme::Theme;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use tracing::info;

const HEROES: &[[&str; 4]] = &[
    ["Joker", "Peter Parker", "Superman", "1939"],
    ["Bruce Wayne", "Penguin", "Dr. Doom", "1941"],
    ["alpha", "bravo", "charlie", "1962"],
    ["Diana Prince", "Riddler", "Lex Luthor", "1941"],
    ["Clark Kent", "Two-Face", "Magneto", "1963"],
];

fn main() -> io::Result<()> {
    init_logging()?;

    let table = Arc::new(build_table().map_err(io::Error::other)?);
    let last_selected = Arc::new(Mutex::new(None::<usize>));
    {
        let last_selected = last_selected.clone();
        table.set_on_selected(move |original| {
            info!(original, "row selected");
            if let Ok(mut slot) = last_selected.lock() {
                *slot = Some(original);
            }
        });
    }

    // Load a large data set off the UI thread; the table shows the heroes until it lands.
    let loader = {
        let table = table.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(err) = table.set_data(generated_rows(100_000)) {
                info!(%err, "background load failed");
            }
        })
    };

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut view = DataTableView::new(table.clone());

    let res = run(&mut terminal, &theme, &mut view, &last_selected);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    let _ = loader.join();
    res
}

fn init_logging() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = std::fs::File::create("datatable.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_table() -> Result<TableController, Box<dyn std::error::Error + Send + Sync>> {
    let mut config = TableConfig::new(vec![
        ColumnConfig::new("Hero"),
        ColumnConfig::new("Villain"),
        ColumnConfig::new("Rival"),
        ColumnConfig::new("Year").with_alignment(Alignment::Trailing),
    ]);
    config.widths = vec![0, 0, 0, 6];
    config.initial_sort = Some((3, SortDirection::Ascending));

    let table = TableController::new(config)?;
    table.set_data(
        HEROES
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )?;
    Ok(table)
}

fn generated_rows(n: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| {
            let [hero, villain, rival, _] = HEROES[i % HEROES.len()];
            vec![
                format!("{hero} #{i}"),
                villain.to_string(),
                format!("{rival} {}", (i * 7_919) % 97),
                format!("{}", 1938 + (i * 31) % 86),
            ]
        })
        .collect()
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    view: &mut DataTableView,
    last_selected: &Mutex<Option<usize>>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("DataTable (jk/↑↓, hl/←→ column, s sort, S reset, / filter, Enter, q)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(1),
            );
            let status_area = Rect::new(inner.x, inner.y + table_area.height, inner.width, 1);

            let buf = f.buffer_mut();
            view.render(table_area, buf, theme);
            render_status(status_area, buf, theme, view, last_selected);

            if let Some((x, y)) = view.cursor_pos() {
                f.set_cursor_position((x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if view.focus() == Focus::Body && matches!(key.code, KeyCode::Char('q')) {
                return Ok(());
            }
        }

        if let Some(ev) = input_event_from_crossterm(ev) {
            match view.handle_event(ev) {
                DataTableAction::Selected {
                    view_index,
                    original_index,
                } => {
                    info!(view_index, original_index, "activated");
                }
                DataTableAction::Redraw | DataTableAction::None => {}
            }
        }
    }
}

fn render_status(
    area: Rect,
    buf: &mut ratatui::buffer::Buffer,
    theme: &Theme,
    view: &DataTableView,
    last_selected: &Mutex<Option<usize>>,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let selected = last_selected
        .lock()
        .ok()
        .and_then(|s| *s)
        .map(|i| i.to_string())
        .unwrap_or("-".to_string());
    let sort = match view.controller().sort_state().active() {
        Some(key) => format!("col {} {:?}", key.column, key.direction),
        None => "-".to_string(),
    };
    let pct = view.scroll_percent().unwrap_or(100);
    let s = format!(
        "column={}  sort={sort}  selected(original)={selected}  scroll={pct}%",
        view.active_column()
    );
    let span = Span::styled(s, theme.text_muted);
    buf.set_span(area.x, area.y, &span, area.width);
}
