//! Interactive hadith browser using ratatui.
//!
//! Two-pane layout: a paged hit list on the left and the full text of the
//! selected hadith on the right. A blank query lists every hadith in book
//! order; `book:<name>` in the query restricts results to one book.

use std::io::{self, IsTerminal, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::cli::output::one_line;
use crate::corpus::Catalog;
use crate::error::{HadithError, Result};
use crate::search::{Addressing, SearchHit, paginate, scoped_records, search_or_browse};

/// Step used by `+`/`-` when adjusting the row width.
const WIDTH_STEP: usize = 20;

/// Focus state for TUI panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    List,
    Detail,
}

impl FocusPanel {
    const fn toggle(self) -> Self {
        match self {
            Self::List => Self::Detail,
            Self::Detail => Self::List,
        }
    }
}

/// Action to take after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Continue,
}

/// Startup settings for the browser.
#[derive(Debug, Clone)]
pub struct BrowseOptions {
    pub initial_query: String,
    pub page_size: usize,
    pub trunc_width: usize,
}

/// Split `book:<name>` out of a query.
fn parse_query(query: &str) -> (String, Option<String>) {
    let mut book = None;
    let mut words = Vec::new();
    for word in query.split_whitespace() {
        match word.strip_prefix("book:") {
            Some(name) if !name.is_empty() => book = Some(name.to_string()),
            _ => words.push(word),
        }
    }
    (words.join(" "), book)
}

/// TUI application state.
pub struct BrowseTui {
    catalog: Arc<dyn Catalog>,
    /// Full ordered hit list for the applied query
    hits: Vec<SearchHit>,
    /// Zero-based page index
    page: usize,
    page_size: usize,
    trunc_width: usize,
    show_full: bool,
    /// Selection within the current page
    list_state: ListState,
    search_query: String,
    search_focused: bool,
    focus: FocusPanel,
    detail_scroll: u16,
    show_help: bool,
    status_message: Option<String>,
}

impl BrowseTui {
    /// Create a browser and apply the initial query.
    pub fn new(catalog: Arc<dyn Catalog>, options: BrowseOptions) -> Self {
        let mut app = Self {
            catalog,
            hits: Vec::new(),
            page: 0,
            page_size: options.page_size.max(1),
            trunc_width: options.trunc_width,
            show_full: false,
            list_state: ListState::default(),
            search_query: options.initial_query,
            search_focused: false,
            focus: FocusPanel::List,
            detail_scroll: 0,
            show_help: false,
            status_message: None,
        };
        app.apply_query();
        app
    }

    /// Run the TUI main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code, key.modifiers) == Action::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn page_count(&self) -> usize {
        self.hits.len().div_ceil(self.page_size).max(1)
    }

    fn page_hits(&self) -> &[SearchHit] {
        paginate(
            &self.hits,
            Addressing::Page { page: self.page + 1, page_size: self.page_size },
        )
        .items
    }

    fn selected_hit(&self) -> Option<&SearchHit> {
        self.page_hits().get(self.list_state.selected()?)
    }

    fn row_width(&self) -> usize {
        if self.show_full { 0 } else { self.trunc_width }
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(3), // Search bar
                Constraint::Min(10),   // Main content
                Constraint::Length(1), // Help bar
            ])
            .split(f.area());

        self.draw_title_bar(f, chunks[0]);
        self.draw_search_bar(f, chunks[1]);
        self.draw_main_content(f, chunks[2]);
        self.draw_help_bar(f, chunks[3]);

        if self.show_help {
            Self::draw_help_overlay(f);
        }
    }

    fn draw_title_bar(&self, f: &mut Frame, area: Rect) {
        let status = self
            .status_message
            .as_ref()
            .map(|m| format!(" | {m}"))
            .unwrap_or_default();
        let mode = if self.show_full {
            "full".to_string()
        } else {
            format!("width {}", self.trunc_width)
        };

        let title = Line::from(vec![
            Span::styled("hadith browse", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                " | {} books, {} hadiths | {} hits, page {}/{} | {mode}{status}",
                self.catalog.books().len(),
                self.catalog.count(),
                self.hits.len(),
                self.page + 1,
                self.page_count(),
            )),
        ]);

        let paragraph = Paragraph::new(title).style(Style::default().fg(Color::Cyan));
        f.render_widget(paragraph, area);
    }

    fn draw_search_bar(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.search_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let search_text = if self.search_focused {
            format!("{}_", self.search_query)
        } else if self.search_query.is_empty() {
            "Type / to search (book:<name> to filter)...".to_string()
        } else {
            self.search_query.clone()
        };

        let paragraph = Paragraph::new(search_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Search "),
            )
            .style(if self.search_query.is_empty() && !self.search_focused {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            });

        f.render_widget(paragraph, area);
    }

    fn draw_main_content(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.draw_list_panel(f, columns[0]);
        self.draw_detail_panel(f, columns[1]);
    }

    fn draw_list_panel(&mut self, f: &mut Frame, area: Rect) {
        let is_focused = self.focus == FocusPanel::List && !self.search_focused;
        let border_style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let width = self.row_width();
        let first = self.page * self.page_size;
        let items: Vec<ListItem> = self
            .page_hits()
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                let mut header = vec![Span::styled(
                    format!("{:>3}. {} #{}", first + i + 1, hit.hadith.book, hit.hadith.number),
                    Style::default().fg(Color::Yellow),
                )];
                if hit.score > 0 {
                    header.push(Span::styled(
                        format!("  score:{}", hit.score),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(vec![
                    Line::from(header),
                    Line::from(vec![
                        Span::styled("     ID: ", Style::default().fg(Color::Green)),
                        Span::raw(one_line(&hit.hadith.translated_text, width)),
                    ]),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(if is_focused { " Hits [*] " } else { " Hits " }),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_detail_panel(&self, f: &mut Frame, area: Rect) {
        let is_focused = self.focus == FocusPanel::Detail && !self.search_focused;
        let border_style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let paragraph = Paragraph::new(self.selected_detail())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(if is_focused { " Hadith [*] " } else { " Hadith " }),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0));

        f.render_widget(paragraph, area);
    }

    fn draw_help_bar(&self, f: &mut Frame, area: Rect) {
        let help_text = if self.search_focused {
            "Enter: apply  Esc: cancel  Backspace: delete"
        } else {
            "j/k: move  n/p: page  /: search  f: full/short  +/-: width  Tab: pane  ?: help  q: quit"
        };

        let paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
    }

    fn draw_help_overlay(f: &mut Frame) {
        let area = f.area();

        let help_width = 60.min(area.width.saturating_sub(4));
        let help_height = 22.min(area.height.saturating_sub(4));
        let x = (area.width - help_width) / 2;
        let y = (area.height - help_height) / 2;
        let help_area = Rect::new(x, y, help_width, help_height);

        f.render_widget(Clear, help_area);

        let help_text = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Navigation:"),
            Line::from("  j / Down     Next hit on page"),
            Line::from("  k / Up       Previous hit on page"),
            Line::from("  g / G        First / last hit on page"),
            Line::from("  n / p        Next / previous page"),
            Line::from("  Tab          Switch focus between panels"),
            Line::from("  PgUp/PgDn    Scroll hadith pane"),
            Line::from(""),
            Line::from("Display:"),
            Line::from("  f            Toggle full rows / truncated rows"),
            Line::from("  + / -        Widen / narrow truncated rows"),
            Line::from(""),
            Line::from("Search:"),
            Line::from("  /            Focus search box"),
            Line::from("  book:bukhari Restrict to one book"),
            Line::from("  Esc          Clear the query (list everything)"),
            Line::from(""),
            Line::from("Press ? or Esc to close this help"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Help "),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, help_area);
    }

    fn selected_detail(&self) -> Text<'static> {
        let Some(hit) = self.selected_hit() else {
            return Text::from("No hadith selected");
        };
        let h = &hit.hadith;
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled(format!("{} #{}", h.book, h.number), bold)),
        ];
        if hit.score > 0 {
            lines.push(Line::from(format!("Score: {}", hit.score)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("ID:".to_string(), bold.fg(Color::Green))));
        lines.extend(h.translated_text.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("AR:".to_string(), bold.fg(Color::Cyan))));
        lines.extend(h.primary_text.lines().map(|l| Line::from(l.to_string())));

        Text::from(lines)
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Action {
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter) {
                self.show_help = false;
            }
            return Action::Continue;
        }

        if self.search_focused {
            return self.handle_search_key(key);
        }

        match key {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.focus = self.focus.toggle(),
            KeyCode::Char('n') => self.next_page(),
            KeyCode::Char('p') => self.prev_page(),
            KeyCode::Char('f') => {
                self.show_full = !self.show_full;
                self.status_message = Some(if self.show_full {
                    "Full rows".to_string()
                } else {
                    format!("Truncating at {}", self.trunc_width)
                });
            }
            KeyCode::Char('+') => self.adjust_width(true),
            KeyCode::Char('-') => self.adjust_width(false),
            KeyCode::Esc => {
                if !self.search_query.is_empty() {
                    self.search_query.clear();
                    self.apply_query();
                    self.status_message = Some("Query cleared".to_string());
                }
            }
            _ => match self.focus {
                FocusPanel::List => self.handle_list_key(key),
                FocusPanel::Detail => self.handle_detail_key(key),
            },
        }
        Action::Continue
    }

    fn handle_search_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Enter => {
                self.search_focused = false;
                self.apply_query();
            }
            KeyCode::Esc => self.search_focused = false,
            KeyCode::Char(c) => self.search_query.push(c),
            KeyCode::Backspace => {
                self.search_query.pop();
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_list_key(&mut self, key: KeyCode) {
        let len = self.page_hits().len();
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('G') if len > 0 => self.select(Some(len - 1)),
            KeyCode::Char('g') if len > 0 => self.select(Some(0)),
            KeyCode::PageDown | KeyCode::Right => self.next_page(),
            KeyCode::PageUp | KeyCode::Left => self.prev_page(),
            KeyCode::Enter | KeyCode::Char('l') => self.focus = FocusPanel::Detail,
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(3);
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(3);
            }
            KeyCode::Char('g') => self.detail_scroll = 0,
            KeyCode::Char('h') | KeyCode::Left => self.focus = FocusPanel::List,
            _ => {}
        }
    }

    fn select(&mut self, index: Option<usize>) {
        self.list_state.select(index);
        self.detail_scroll = 0;
    }

    fn select_next(&mut self) {
        let len = self.page_hits().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.select(Some(i));
    }

    fn select_prev(&mut self) {
        let len = self.page_hits().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.select(Some(i));
    }

    fn next_page(&mut self) {
        if (self.page + 1) * self.page_size < self.hits.len() {
            self.page += 1;
            self.select(Some(0));
        }
    }

    fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.select(Some(0));
        }
    }

    fn adjust_width(&mut self, wider: bool) {
        self.trunc_width = if wider {
            self.trunc_width.saturating_add(WIDTH_STEP)
        } else {
            self.trunc_width.saturating_sub(WIDTH_STEP).max(WIDTH_STEP)
        };
        self.show_full = false;
        self.status_message = Some(format!("Truncating at {}", self.trunc_width));
    }

    fn apply_query(&mut self) {
        let (text, book) = parse_query(&self.search_query);
        let records = scoped_records(self.catalog.as_ref(), book.as_deref());
        self.hits = search_or_browse(&records, &text, 0);
        self.page = 0;
        self.select(if self.hits.is_empty() { None } else { Some(0) });

        self.status_message = Some(match (text.trim().is_empty(), book) {
            (true, None) => "Browsing all books".to_string(),
            (true, Some(b)) => format!("Browsing {b}"),
            (false, None) => format!("Searching: {text}"),
            (false, Some(b)) => format!("Searching {b}: {text}"),
        });
    }
}

/// RAII Guard to ensure terminal state is restored even on panic.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the browse TUI.
pub fn run_browse_tui(catalog: Arc<dyn Catalog>, options: BrowseOptions) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(HadithError::InvalidArgument(
            "browse command requires an interactive terminal".to_string(),
        ));
    }

    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    BrowseTui::new(catalog, options).run(&mut terminal)
}
