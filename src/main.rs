use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Row, Table};

use leaderboard_terminal::charts::{RatingHistogram, WdlSeries, WinRateSeries};
use leaderboard_terminal::config::Config;
use leaderboard_terminal::loader::spawn_standings_loader;
use leaderboard_terminal::state::{AppState, Delta, LoadState, Screen, apply_delta, theme_label};
use leaderboard_terminal::store::{FileStore, KeyValueStore, MemoryStore};
use leaderboard_terminal::table::{
    COLUMNS, DisplayRow, TableBody, classify, format_number, format_percent, truncate_text,
};
use leaderboard_terminal::theme::Palette;

struct App {
    state: AppState,
    store: Box<dyn KeyValueStore>,
    should_quit: bool,
}

impl App {
    fn new(config: &Config) -> Self {
        let mut state =
            AppState::new().with_search(config.search_fields, config.search_debounce);
        let opened = FileStore::open_default(config.state_dir.as_deref());
        let store: Box<dyn KeyValueStore> = match opened {
            Some(store) => {
                state.push_log(format!("[INFO] Preferences at {}", store.path().display()));
                Box::new(store)
            }
            None => {
                state.push_log("[WARN] No state directory; pins and theme won't persist");
                Box::new(MemoryStore::new())
            }
        };
        state.load_preferences(&*store);
        Self {
            state,
            store,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.state.begin_search(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('s') => self.state.cycle_sort(),
            KeyCode::Char('r') => self.state.reverse_sort(),
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.state.toggle_pin_current(&mut *self.store)
            }
            KeyCode::Char('t') => self.state.toggle_theme(&mut *self.store),
            KeyCode::Char('d') | KeyCode::Enter => self.state.open_selected_player(),
            KeyCode::Char('b') | KeyCode::Esc => {
                if matches!(self.state.screen, Screen::PlayerDetail { .. }) {
                    self.state.back();
                } else {
                    self.state.clear_search(Instant::now());
                }
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Char(c) => self.state.search_push(c, now),
            KeyCode::Backspace => self.state.search_backspace(now),
            KeyCode::Enter => self.state.end_search(),
            KeyCode::Esc => {
                self.state.clear_search(now);
                self.state.end_search();
            }
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env(std::env::args().nth(1));
    let mut app = App::new(&config);

    let (tx, rx) = mpsc::channel();
    spawn_standings_loader(config.standings_path.clone(), tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.state.tick(Instant::now());

        terminal.draw(|f| ui(f, &app.state))?;

        let mut timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if let Some(pending) = app.state.search_debounce.remaining(Instant::now()) {
            timeout = timeout.min(pending);
        }
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, state: &AppState) {
    let palette = state.theme.palette();
    frame.render_widget(
        Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
        frame.size(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .style(Style::default().fg(palette.accent))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match state.screen {
        Screen::Leaderboard => render_leaderboard(frame, chunks[1], state, &palette),
        Screen::PlayerDetail { .. } => render_player_detail(frame, chunks[1], state, &palette),
    }

    let search = Paragraph::new(search_text(state)).style(if state.search_active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    });
    frame.render_widget(search, chunks[2]);

    let console = Paragraph::new(console_text(state))
        .style(Style::default().fg(palette.muted))
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(palette.muted));
    frame.render_widget(footer, chunks[4]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let loaded = match &state.load {
        LoadState::Loading => "loading…".to_string(),
        LoadState::Loaded { loaded_at } => format!("loaded {loaded_at}"),
        LoadState::Failed(_) => "load failed".to_string(),
    };
    let title = format!(
        "LEADERBOARD | Sort: {} | Rows: {}/{} | Pins: {} | Theme: {} | {}",
        state.sort.label(),
        state.view.len(),
        state.rows.len(),
        state.pins.len(),
        theme_label(state.theme),
        loaded
    );
    let line1 = format!("  _|_  {}", title);
    let line2 = " |___|".to_string();
    format!("{line1}\n{line2}")
}

fn search_text(state: &AppState) -> String {
    if state.search_active {
        format!("/{}_", state.search)
    } else if state.search.is_empty() {
        "/ to search player, model or prompt".to_string()
    } else {
        format!("filter: {}", state.search)
    }
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to filter | Enter Done | Esc Clear | Backspace Delete".to_string();
    }
    match state.screen {
        Screen::Leaderboard => concat!(
            "j/k/↑/↓ Move | / Search | s Sort | r Reverse | p Pin | ",
            "Enter/d Player | t Theme | ? Help | q Quit"
        )
        .to_string(),
        Screen::PlayerDetail { .. } => "b/Esc Back | p Pin | t Theme | ? Help | q Quit".to_string(),
    }
}

fn render_leaderboard(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(14)])
        .split(area);

    render_table(frame, sections[0], state, palette);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(sections[1]);

    match state.charts.current() {
        Some(set) => {
            render_win_rate_chart(frame, charts[0], &set.win_rate, palette);
            render_rating_chart(frame, charts[1], set.rating.as_ref(), palette);
            render_wdl_chart(frame, charts[2], &set.wdl, palette);
        }
        None => {
            let titles = ["Win Rate", "Rating Distribution", "W / D / L"];
            for (area, title) in charts.iter().zip(titles) {
                let empty = Paragraph::new("No data")
                    .style(Style::default().fg(palette.muted))
                    .block(Block::default().title(title).borders(Borders::ALL));
                frame.render_widget(empty, *area);
            }
        }
    }
}

fn table_columns() -> [Constraint; 12] {
    [
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(18),
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(7),
    ]
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let block = Block::default().title("Standings").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new(COLUMNS.to_vec())
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));

    let rows = match &state.table {
        TableBody::Placeholder(text) => {
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(inner);
            let header_only = Table::new(Vec::<Row>::new(), table_columns()).header(header);
            frame.render_widget(header_only, sections[0]);
            let placeholder = Paragraph::new(text.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.error));
            frame.render_widget(placeholder, sections[1]);
            return;
        }
        TableBody::Rows(rows) => rows,
    };

    if rows.is_empty() {
        let text = match state.load {
            LoadState::Loading => "Loading standings…",
            _ => "No players match the current search",
        };
        let empty = Paragraph::new(text).style(Style::default().fg(palette.muted));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = inner.height.saturating_sub(1) as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);
    let body: Vec<Row> = rows[start..end]
        .iter()
        .enumerate()
        .map(|(offset, row)| table_row(row, start + offset == state.selected, palette))
        .collect();

    let table = Table::new(body, table_columns())
        .header(header)
        .column_spacing(1);
    frame.render_widget(table, inner);
}

fn table_row<'a>(row: &'a DisplayRow, selected: bool, palette: &Palette) -> Row<'a> {
    let mut style = Style::default();
    if row.badges.top3 {
        style = style.fg(palette.top3);
    } else if row.badges.high_win_rate {
        style = style.fg(palette.high_win);
    }
    if row.badges.pinned {
        style = style.add_modifier(Modifier::BOLD);
    }
    if selected {
        style = style.bg(palette.selected_bg);
    }
    Row::new(row.cells.iter().map(String::as_str)).style(style)
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_win_rate_chart(frame: &mut Frame, area: Rect, series: &WinRateSeries, palette: &Palette) {
    let block = Block::default().title("Win Rate").borders(Borders::ALL);
    let inner = block.inner(area);
    const BAR_WIDTH: u16 = 5;
    let capacity = (inner.width / (BAR_WIDTH + 1)).max(1) as usize;

    let bars: Vec<Bar> = series
        .labels
        .iter()
        .zip(&series.percents)
        .take(capacity)
        .map(|(label, pct)| {
            Bar::default()
                .value(pct.round() as u64)
                .label(Line::from(truncate_text(label, BAR_WIDTH as usize)))
                .text_value(format!("{pct:.0}"))
                .style(Style::default().fg(palette.high_win))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .max(100);
    frame.render_widget(chart, area);
}

fn render_rating_chart(
    frame: &mut Frame,
    area: Rect,
    hist: Option<&RatingHistogram>,
    palette: &Palette,
) {
    let block = Block::default().title("Rating Distribution (Mu)").borders(Borders::ALL);
    let Some(hist) = hist else {
        let empty = Paragraph::new("No finite ratings")
            .style(Style::default().fg(palette.muted))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    let slots = hist.counts.len().max(1) as u16;
    let bar_width = (inner.width / slots).saturating_sub(1).max(1);

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .zip(&hist.labels)
        .map(|(count, label)| {
            Bar::default()
                .value(*count)
                .label(Line::from(bin_short_label(label)))
                .style(Style::default().fg(palette.accent))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

// Bars are narrow; keep only the lower edge under each bar.
fn bin_short_label(label: &str) -> String {
    label.split('–').next().unwrap_or(label).to_string()
}

fn render_wdl_chart(frame: &mut Frame, area: Rect, series: &WdlSeries, palette: &Palette) {
    let block = Block::default().title("W / D / L").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    const NAME_WIDTH: usize = 10;
    let bar_space = (inner.width as usize).saturating_sub(NAME_WIDTH + 1).max(1);
    let widths = series.bar_widths(bar_space);
    let max_lines = inner.height.saturating_sub(1) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (label, [wins, draws, losses]) in series.labels.iter().zip(widths).take(max_lines) {
        let name = format!("{:<width$} ", truncate_text(label, NAME_WIDTH), width = NAME_WIDTH);
        lines.push(Line::from(vec![
            Span::raw(name),
            Span::styled("█".repeat(wins), Style::default().fg(palette.wins)),
            Span::styled("█".repeat(draws), Style::default().fg(palette.draws)),
            Span::styled("█".repeat(losses), Style::default().fg(palette.losses)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("■ Wins ", Style::default().fg(palette.wins)),
        Span::styled("■ Draws ", Style::default().fg(palette.draws)),
        Span::styled("■ Losses", Style::default().fg(palette.losses)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_player_detail(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let Screen::PlayerDetail { player } = &state.screen else {
        return;
    };
    let block = Block::default()
        .title(format!("Player ?name={player}"))
        .borders(Borders::ALL);

    let Some(row) = state.player_detail() else {
        let missing = Paragraph::new(format!("No standings row for {player}"))
            .style(Style::default().fg(palette.error))
            .block(block);
        frame.render_widget(missing, area);
        return;
    };

    let badges = classify(row, &state.pins);
    let mut tags = badges.labels().join(", ");
    if badges.pinned {
        if !tags.is_empty() {
            tags.push_str(", ");
        }
        tags.push_str("Pinned");
    }
    let text = [
        format!("Player:       {}", row.player),
        format!("Rank:         {}", format_number(row.rank)),
        format!("Badges:       {}", if tags.is_empty() { "—" } else { tags.as_str() }),
        format!("Model:        {}", row.model.as_deref().unwrap_or("—")),
        format!("Rating Mu:    {}", format_number(row.rating_mu)),
        format!("Rating Sigma: {}", format_number(row.rating_sigma)),
        format!(
            "Record:       {}W {}D {}L in {} games",
            row.wins, row.draws, row.losses, row.games
        ),
        format!("Win rate:     {}", format_percent(row.win_rate)),
        String::new(),
        "Prompt:".to_string(),
        row.prompt.clone().unwrap_or_else(|| "—".to_string()),
    ]
    .join("\n");

    let detail = Paragraph::new(text)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(block);
    frame.render_widget(detail, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Leaderboard Terminal - Help",
        "",
        "Leaderboard:",
        "  j/k or ↑/↓   Move",
        "  /            Search (player, model, prompt)",
        "  s            Cycle sort",
        "  r            Reverse sort direction",
        "  p / Space    Pin or unpin player",
        "  Enter / d    Player detail",
        "  Esc          Clear search",
        "",
        "Global:",
        "  b / Esc      Back",
        "  t            Toggle light/dark theme",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default().bg(Color::Reset));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
