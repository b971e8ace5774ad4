// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use homesearch_app::{
    PortalCommand, PortalEvent, PortalState, PropertyRecord, TabKind, format_count, format_price,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const APP_TITLE: &str = "My Home Search";
const SAVED_MARK: &str = "♥";
const UNSAVED_MARK: &str = "♡";
const UNREAD_DOT: &str = "●";
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

const NEXT_STEPS: [(&str, &str); 3] = [
    ("Schedule Showings", "Book viewings for saved properties"),
    ("Refine Your Search", "Update your preferences"),
    ("Contact Your Agent", "Questions? We're here to help"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    selected_property: usize,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app(state: &mut PortalState) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    tracing::info!(
        properties = state.properties().len(),
        tab = state.active_tab.label(),
        "portal session started"
    );

    let result = event_loop(
        &mut terminal,
        state,
        &mut view_data,
        &internal_tx,
        &internal_rx,
    );

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    tracing::info!(saved = state.saved_count(), "portal session ended");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut PortalState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    internal_rx: &Receiver<InternalEvent>,
) -> Result<()> {
    loop {
        process_internal_events(state, view_data, internal_rx);

        terminal
            .draw(|frame| render(frame, state, view_data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(state, view_data, internal_tx, key)
        {
            return Ok(());
        }
    }
}

fn process_internal_events(
    state: &mut PortalState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(PortalCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut PortalState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    dispatch_command(
        state,
        view_data,
        PortalCommand::SetStatus(message.into()),
        internal_tx,
    );
}

fn dispatch_command(
    state: &mut PortalState,
    view_data: &mut ViewData,
    command: PortalCommand,
    internal_tx: &Sender<InternalEvent>,
) -> Vec<PortalEvent> {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, PortalEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
    clamp_property_cursor(state, view_data);
    events
}

fn handle_key_event(
    state: &mut PortalState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    tracing::trace!(code = ?key.code, modifiers = ?key.modifiers, "key event");

    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            return false;
        }
        (KeyCode::Tab, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
            dispatch_command(state, view_data, PortalCommand::NextTab, internal_tx);
            return false;
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            dispatch_command(state, view_data, PortalCommand::PrevTab, internal_tx);
            return false;
        }
        (KeyCode::Char(digit), KeyModifiers::NONE) => {
            if let Some(tab) = TabKind::from_hotkey(digit) {
                dispatch_command(state, view_data, PortalCommand::SetTab(tab), internal_tx);
                return false;
            }
        }
        _ => {}
    }

    match state.active_tab {
        TabKind::Properties => handle_properties_key(state, view_data, internal_tx, key),
        TabKind::Messages => handle_messages_key(state, view_data, internal_tx, key),
        TabKind::Documents => handle_documents_key(state, view_data, internal_tx, key),
    }
    false
}

fn handle_properties_key(
    state: &mut PortalState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => move_property_cursor(state, view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_property_cursor(state, view_data, -1),
        KeyCode::Char('g') | KeyCode::Home => view_data.selected_property = 0,
        KeyCode::Char('G') | KeyCode::End => {
            view_data.selected_property = state.properties().len().saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Enter => {
            let Some(record) = state.property_at(view_data.selected_property) else {
                emit_status(state, view_data, internal_tx, "no properties to save");
                return;
            };
            let id = record.id.clone();
            dispatch_command(state, view_data, PortalCommand::ToggleSaved(id), internal_tx);
        }
        KeyCode::Char('v') => {
            emit_status(state, view_data, internal_tx, unavailable("view details"));
        }
        KeyCode::Char('o') => {
            emit_status(state, view_data, internal_tx, unavailable("schedule showing"));
        }
        _ => {}
    }
}

fn handle_messages_key(
    state: &mut PortalState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('r') => emit_status(state, view_data, internal_tx, unavailable("reply")),
        KeyCode::Char('n') => {
            emit_status(state, view_data, internal_tx, unavailable("send new message"));
        }
        _ => {}
    }
}

fn handle_documents_key(
    state: &mut PortalState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if key.code == KeyCode::Char('d') {
        emit_status(state, view_data, internal_tx, unavailable("download"));
    }
}

fn unavailable(action: &str) -> String {
    format!("{action} is not available in this portal")
}

fn move_property_cursor(state: &PortalState, view_data: &mut ViewData, delta: isize) {
    let len = state.properties().len();
    if len == 0 {
        view_data.selected_property = 0;
        return;
    }
    let current = view_data.selected_property as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    view_data.selected_property = next as usize;
}

fn clamp_property_cursor(state: &PortalState, view_data: &mut ViewData) {
    view_data.selected_property = view_data
        .selected_property
        .min(state.properties().len().saturating_sub(1));
}

fn render(frame: &mut ratatui::Frame<'_>, state: &PortalState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(render_header_text(state))
        .block(Block::default().title(APP_TITLE).borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    render_stats(frame, layout[1], state);

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tab_titles = TabKind::ALL
        .iter()
        .map(|tab| tab_title(*tab, state))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[2]);

    match state.active_tab {
        TabKind::Properties => render_properties(frame, layout[3], state, view_data),
        TabKind::Messages => {
            let body = Paragraph::new(render_messages_text(state))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(TabKind::Messages.label()),
                );
            frame.render_widget(body, layout[3]);
        }
        TabKind::Documents => render_documents(frame, layout[3], state),
    }

    render_next_steps(frame, layout[4]);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[5]);

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_header_text(state: &PortalState) -> String {
    let greeting = if state.client_name().trim().is_empty() {
        "Welcome back".to_owned()
    } else {
        format!("Welcome back, {}", state.client_name())
    };
    let unread = state.unread_message_count();
    if unread > 0 {
        format!("{greeting}\n{UNREAD_DOT} {unread} unread")
    } else {
        format!("{greeting}\nno new notifications")
    }
}

fn stat_cards(state: &PortalState) -> [(&'static str, usize); 4] {
    let stats = state.stats();
    [
        ("Saved Properties", stats.saved_properties),
        ("New Matches", stats.new_matches),
        ("Unread Messages", stats.unread_messages),
        ("Upcoming Showings", stats.upcoming_showings),
    ]
}

fn render_stats(frame: &mut ratatui::Frame<'_>, area: Rect, state: &PortalState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    for (slot, (label, value)) in columns.iter().zip(stat_cards(state)) {
        let card = Paragraph::new(value.to_string())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().title(label).borders(Borders::ALL));
        frame.render_widget(card, *slot);
    }
}

fn tab_title(tab: TabKind, state: &PortalState) -> String {
    let unread = state.unread_message_count();
    if tab == TabKind::Messages && unread > 0 {
        format!(" {} {} ({unread}) ", tab.hotkey(), tab.label())
    } else {
        format!(" {} {} ", tab.hotkey(), tab.label())
    }
}

fn property_cells(record: &PropertyRecord) -> [String; 7] {
    [
        if record.saved { SAVED_MARK } else { UNSAVED_MARK }.to_owned(),
        record.address.clone(),
        format_price(record.price),
        format!("{} beds", record.bedrooms),
        format!("{} baths", record.bathrooms),
        format!("{} sqft", format_count(u64::from(record.sqft))),
        record.status.as_str().to_owned(),
    ]
}

fn render_properties(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &PortalState,
    view_data: &ViewData,
) {
    let header = Row::new(
        ["", "address", "price", "beds", "baths", "sqft", "status"].map(|label| {
            Cell::from(label).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        }),
    );

    let rows = state
        .properties()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut style = Style::default();
            if record.saved {
                style = style.fg(Color::Red);
            }
            if index == view_data.selected_property {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            let cells = property_cells(record)
                .into_iter()
                .enumerate()
                .map(|(column, text)| {
                    // Only the heart marker carries the saved color.
                    let cell_style = if column == 0 {
                        style
                    } else {
                        style.fg(Color::Reset)
                    };
                    Cell::from(text).style(cell_style)
                })
                .collect::<Vec<_>>();
            Row::new(cells)
        });

    let widths = [
        Constraint::Length(2),
        Constraint::Min(24),
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(properties_title(state))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn properties_title(state: &PortalState) -> String {
    format!(
        "{} ({} saved of {})",
        TabKind::Properties.label(),
        state.saved_count(),
        state.properties().len()
    )
}

fn render_messages_text(state: &PortalState) -> String {
    if state.messages().is_empty() {
        return "no messages yet\n\nn send new message".to_owned();
    }

    let mut lines = Vec::with_capacity(state.messages().len() * 3 + 1);
    for message in state.messages() {
        let marker = if message.unread { "new" } else { "" };
        lines.push(
            format!("{} · {}  {marker}", message.from, message.time)
                .trim_end()
                .to_owned(),
        );
        lines.push(format!("  {}", message.text));
        lines.push(String::new());
    }
    lines.push("r reply | n send new message".to_owned());
    lines.join("\n")
}

fn render_documents(frame: &mut ratatui::Frame<'_>, area: Rect, state: &PortalState) {
    let header = Row::new(["name", "date", "size"].map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let rows = state.documents().iter().map(|document| {
        Row::new([
            Cell::from(document.name.clone()),
            Cell::from(document.date.to_string()),
            Cell::from(document.size.clone()),
        ])
    });
    let widths = [
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .title(TabKind::Documents.label())
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn render_next_steps(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (slot, (title, detail)) in columns.iter().zip(NEXT_STEPS) {
        let step = Paragraph::new(detail)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Blue))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(step, *slot);
    }
}

fn status_text(state: &PortalState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let tab = state.active_tab.label().to_ascii_uppercase();
    let hints = match state.active_tab {
        TabKind::Properties => "j/k move | space save | v details | o showing",
        TabKind::Messages => "r reply | n new message",
        TabKind::Documents => "d download",
    };
    let default = format!("{hints} | 1-3 b/f tabs | ? help | q quit");
    match &state.status_line {
        Some(status) => format!("{tab} | {status} | {default}"),
        None => format!("{tab} | {default}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: q or ctrl+q quit | ? help | esc close help\n\
tabs: 1 properties | 2 messages | 3 documents | f/tab next | b/shift+tab prev\n\
properties: j/k or up/down move | g/G first/last | space, s or enter toggle saved\n\
properties: v view details | o schedule showing\n\
messages: r reply | n send new message\n\
documents: d download"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
