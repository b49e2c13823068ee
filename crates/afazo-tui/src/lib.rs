// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use afazo_app::{
    AppCommand, AppEvent, AppMode, AppState, Filter, Mutation, ObservationId, PreferenceStore,
    ScrollCoordinator, StyleSink, SyncOutcome, SystemPreference, Task, TaskView, Theme,
    VisibilitySignal, VisibilitySource,
};
use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const SENTINEL_LABEL: &str = "··· loading more ···";

pub trait AppRuntime {
    fn run_mutation(
        &mut self,
        mutation: Mutation,
        on_written: &mut dyn FnMut(&Mutation),
    ) -> SyncOutcome;
    fn theme_capabilities(&mut self) -> (&mut dyn PreferenceStore, &dyn SystemPreference);
    fn spawn_mutation(&mut self, mutation: Mutation, tx: Sender<InternalEvent>) -> Result<()> {
        let written_tx = tx.clone();
        let outcome = self.run_mutation(mutation, &mut |written| {
            let _ = written_tx.send(InternalEvent::Written(written.clone()));
        });
        tx.send(InternalEvent::Synced(outcome))
            .map_err(|_| anyhow!("sync event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    // Sent between a successful write and its refetch.
    Written(Mutation),
    Synced(SyncOutcome),
    Visibility(VisibilitySignal),
}

// Platform color-scheme signal for terminals, read from `COLORFGBG`
// (`"<fg>;<bg>"`, sometimes with a middle field).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalColorScheme {
    colorfgbg: Option<String>,
}

impl TerminalColorScheme {
    pub fn from_env() -> Self {
        Self {
            colorfgbg: std::env::var("COLORFGBG").ok(),
        }
    }

    pub fn from_value(value: Option<&str>) -> Self {
        Self {
            colorfgbg: value.map(str::to_owned),
        }
    }
}

impl SystemPreference for TerminalColorScheme {
    fn prefers_dark(&self) -> bool {
        let Some(raw) = self.colorfgbg.as_deref() else {
            return false;
        };
        let Some(background) = raw.rsplit(';').next() else {
            return false;
        };
        match background.trim().parse::<u8>() {
            Ok(index) => index <= 6 || index == 8,
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub done: Color,
    pub danger: Color,
}

const LIGHT_PALETTE: Palette = Palette {
    fg: Color::Black,
    bg: Color::White,
    accent: Color::Blue,
    muted: Color::DarkGray,
    done: Color::Gray,
    danger: Color::Red,
};

const DARK_PALETTE: Palette = Palette {
    fg: Color::White,
    bg: Color::Black,
    accent: Color::LightBlue,
    muted: Color::Gray,
    done: Color::DarkGray,
    danger: Color::LightRed,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleRoot {
    class: Option<Theme>,
}

impl StyleRoot {
    pub fn class(&self) -> Option<&'static str> {
        self.class.map(Theme::as_str)
    }

    pub fn palette(&self) -> Palette {
        match self.class {
            Some(Theme::Dark) => DARK_PALETTE,
            _ => LIGHT_PALETTE,
        }
    }
}

impl StyleSink for StyleRoot {
    fn apply_theme(&mut self, theme: Theme) {
        self.class = Some(theme);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SentinelViewport {
    observation: Option<ObservationId>,
    last_visible: Option<bool>,
}

impl SentinelViewport {
    fn observe(&mut self, sentinel_visible: bool) -> Option<VisibilitySignal> {
        let observation = self.observation?;
        if self.last_visible == Some(sentinel_visible) {
            return None;
        }
        self.last_visible = Some(sentinel_visible);
        Some(VisibilitySignal {
            observation,
            visible: sentinel_visible,
        })
    }
}

impl VisibilitySource for SentinelViewport {
    fn subscribe(&mut self, observation: ObservationId) {
        self.observation = Some(observation);
        self.last_visible = None;
    }

    fn unsubscribe(&mut self, observation: ObservationId) {
        if self.observation == Some(observation) {
            self.observation = None;
            self.last_visible = None;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ViewData {
    cursor: usize,
    offset: usize,
    list_height: usize,
    style: StyleRoot,
    viewport: SentinelViewport,
    scroll: ScrollCoordinator,
    status_token: u64,
    in_flight: usize,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    let result = event_loop(
        &mut terminal,
        state,
        runtime,
        &mut view_data,
        &internal_tx,
        &internal_rx,
    );
    view_data.scroll.unmount(&mut view_data.viewport);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<R: AppRuntime>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    internal_rx: &Receiver<InternalEvent>,
) -> Result<()> {
    // Unresolved theme renders the placeholder only.
    terminal
        .draw(|frame| {
            render(frame, state, view_data);
        })
        .context("draw frame")?;
    resolve_theme(state, runtime, view_data);
    apply_command(state, runtime, view_data, internal_tx, AppCommand::RequestRefresh);

    loop {
        process_internal_events(state, view_data, internal_tx, internal_rx);
        prepare_frame(state, view_data);

        let mut list_height = view_data.list_height;
        terminal
            .draw(|frame| list_height = render(frame, state, view_data))
            .context("draw frame")?;
        view_data.list_height = list_height;
        keep_cursor_in_view(view_data, &state.view());
        if let Some(signal) = view_data.viewport.observe(sentinel_visible(state, view_data)) {
            internal_tx
                .send(InternalEvent::Visibility(signal))
                .map_err(|_| anyhow!("visibility channel closed"))?;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, view_data, internal_tx, key) {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
}

fn resolve_theme<R: AppRuntime>(state: &mut AppState, runtime: &mut R, view_data: &mut ViewData) {
    let (preferences, system) = runtime.theme_capabilities();
    let theme = state
        .theme
        .resolve_initial(&*preferences, system, &mut view_data.style);
    info!(theme = theme.as_str(), "theme resolved");
}

fn prepare_frame(state: &AppState, view_data: &mut ViewData) {
    let view = state.view();
    let visible = view.visible().len();
    view_data.cursor = view_data.cursor.min(visible.saturating_sub(1));
    view_data.scroll.sync(&view, &mut view_data.viewport);
    keep_cursor_in_view(view_data, &view);
}

/// Scrolls the list so the cursor row is on screen. Resting on the last
/// visible task also brings the sentinel row below it into view.
fn keep_cursor_in_view(view_data: &mut ViewData, view: &TaskView<'_>) {
    let visible = view.visible().len();
    let height = view_data.list_height.max(1);
    let mut bottom = view_data.cursor;
    // In a one-row window the sentinel takes the place of the cursor row.
    if view.has_more() && view_data.cursor + 1 == visible {
        bottom += 1;
    }
    if view_data.cursor < view_data.offset {
        view_data.offset = view_data.cursor;
    } else if bottom >= view_data.offset + height {
        view_data.offset = bottom + 1 - height;
    }
    view_data.offset = view_data.offset.min(visible);
}

fn sentinel_visible(state: &AppState, view_data: &ViewData) -> bool {
    let view = state.view();
    if !view.has_more() || view_data.list_height == 0 {
        return false;
    }
    let row = view.visible().len();
    row >= view_data.offset && row < view_data.offset + view_data.list_height
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Written(mutation) => {
                state.dispatch(AppCommand::WriteCompleted(mutation));
            }
            InternalEvent::Synced(outcome) => {
                view_data.in_flight = view_data.in_flight.saturating_sub(1);
                let events = state.dispatch(AppCommand::ApplySync(outcome));
                note_status_events(view_data, tx, &events);
            }
            InternalEvent::Visibility(signal) => {
                let events = view_data.scroll.handle_signal(signal, state);
                if !events.is_empty() {
                    debug!(page = state.page.get(), "sentinel advanced page");
                }
                // Later signals must see the observation for the new view.
                prepare_frame(state, view_data);
            }
        }
    }
}

fn note_status_events(view_data: &mut ViewData, tx: &Sender<InternalEvent>, events: &[AppEvent]) {
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(tx, view_data.status_token);
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
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    let events = state.dispatch(AppCommand::SetStatus(message.into()));
    note_status_events(view_data, internal_tx, &events);
}

fn apply_command<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    note_status_events(view_data, internal_tx, &events);
    for event in events {
        let AppEvent::MutationRequested(mutation) = event else {
            continue;
        };
        let label = mutation.label();
        view_data.in_flight += 1;
        if let Err(error) = runtime.spawn_mutation(mutation, internal_tx.clone()) {
            view_data.in_flight = view_data.in_flight.saturating_sub(1);
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("{label} could not start: {error:#}"),
            );
        }
    }
}

fn selected_task(state: &AppState, view_data: &ViewData) -> Option<Task> {
    state
        .view()
        .visible()
        .get(view_data.cursor)
        .map(|task| (*task).clone())
}

fn move_cursor(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let visible = state.view().visible().len();
    if visible == 0 {
        view_data.cursor = 0;
        return;
    }
    let next = view_data.cursor.saturating_add_signed(delta);
    view_data.cursor = next.min(visible - 1);
}

fn toggle_theme<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let (preferences, _) = runtime.theme_capabilities();
    if let Err(error) = state.theme.toggle(preferences, &mut view_data.style) {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("theme not saved: {error:#}"),
        );
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return true;
    }
    if !state.theme.preference().is_resolved() {
        return false;
    }

    match state.mode {
        AppMode::Draft => handle_draft_key(state, runtime, view_data, internal_tx, key),
        AppMode::Search => handle_search_key(state, key),
        AppMode::Confirm => handle_confirm_key(state, runtime, view_data, internal_tx, key),
        AppMode::Nav => return handle_nav_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn handle_draft_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Enter => {
            apply_command(state, runtime, view_data, internal_tx, AppCommand::SubmitDraft);
        }
        KeyCode::Backspace => {
            let mut draft = state.draft.clone();
            draft.pop();
            state.dispatch(AppCommand::SetDraft(draft));
        }
        KeyCode::Char(ch) => {
            let mut draft = state.draft.clone();
            draft.push(ch);
            state.dispatch(AppCommand::SetDraft(draft));
        }
        _ => {}
    }
}

fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Backspace => {
            let mut search = state.search.clone();
            search.pop();
            state.dispatch(AppCommand::SetSearch(search));
        }
        KeyCode::Char(ch) => {
            let mut search = state.search.clone();
            search.push(ch);
            state.dispatch(AppCommand::SetSearch(search));
        }
        _ => {}
    }
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            apply_command(state, runtime, view_data, internal_tx, AppCommand::ConfirmDelete);
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            state.dispatch(AppCommand::CancelDelete);
        }
        // The list stays interactive underneath the prompt.
        KeyCode::Char('j') | KeyCode::Down => move_cursor(state, view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(state, view_data, -1),
        KeyCode::Char(' ') => request_toggle(state, runtime, view_data, internal_tx),
        KeyCode::Char('d') => stage_selected(state, view_data),
        _ => {}
    }
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('a') | KeyCode::Char('i') => {
            state.dispatch(AppCommand::EnterDraft);
        }
        KeyCode::Char('/') => {
            state.dispatch(AppCommand::EnterSearch);
        }
        KeyCode::Char('f') => {
            state.dispatch(AppCommand::CycleFilter);
        }
        KeyCode::Char('1') => {
            state.dispatch(AppCommand::SetFilter(Filter::All));
        }
        KeyCode::Char('2') => {
            state.dispatch(AppCommand::SetFilter(Filter::Pending));
        }
        KeyCode::Char('3') => {
            state.dispatch(AppCommand::SetFilter(Filter::Done));
        }
        KeyCode::Char('j') | KeyCode::Down => move_cursor(state, view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(state, view_data, -1),
        KeyCode::Char('g') | KeyCode::Home => view_data.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => move_cursor(state, view_data, isize::MAX),
        KeyCode::Char(' ') | KeyCode::Enter => {
            request_toggle(state, runtime, view_data, internal_tx);
        }
        KeyCode::Char('d') | KeyCode::Delete => stage_selected(state, view_data),
        KeyCode::Char('n') | KeyCode::Char(']') => {
            state.dispatch(AppCommand::NextPage);
        }
        KeyCode::Char('p') | KeyCode::Char('[') => {
            state.dispatch(AppCommand::PrevPage);
        }
        KeyCode::Char('t') => toggle_theme(state, runtime, view_data, internal_tx),
        KeyCode::Char('r') => {
            apply_command(state, runtime, view_data, internal_tx, AppCommand::RequestRefresh);
        }
        _ => {}
    }
    false
}

fn request_toggle<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if let Some(task) = selected_task(state, view_data) {
        apply_command(
            state,
            runtime,
            view_data,
            internal_tx,
            AppCommand::RequestToggle(task.id),
        );
    }
}

fn stage_selected(state: &mut AppState, view_data: &ViewData) {
    if let Some(task) = selected_task(state, view_data) {
        state.dispatch(AppCommand::StageDelete(task.id));
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) -> usize {
    let palette = view_data.style.palette();
    let base = Style::default().fg(palette.fg).bg(palette.bg);
    frame.render_widget(Block::default().style(base), frame.area());

    if !state.theme.preference().is_resolved() {
        let loading = Paragraph::new("loading…").style(Style::default());
        frame.render_widget(loading, centered_rect(20, 10, frame.area()));
        return 0;
    }

    let view = state.view();
    let pager_height = if view.show_pager() { 1 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(pager_height),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let border = Style::default().fg(palette.muted);
    let focused = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);

    let header = Paragraph::new(header_text(state, &view, view_data.in_flight)).block(
        Block::default()
            .title(Span::styled(" Afazo ", focused))
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(header, layout[0]);

    let draft_border = if state.mode == AppMode::Draft {
        focused
    } else {
        border
    };
    let draft = Paragraph::new(draft_text(state)).block(
        Block::default()
            .title("new task (a)")
            .borders(Borders::ALL)
            .border_style(draft_border),
    );
    frame.render_widget(draft, layout[1]);

    let search_border = if state.mode == AppMode::Search {
        focused
    } else {
        border
    };
    let search = Paragraph::new(search_line(state, palette)).block(
        Block::default()
            .title("search (/) · filter (f)")
            .borders(Borders::ALL)
            .border_style(search_border),
    );
    frame.render_widget(search, layout[2]);

    let list_area = layout[3];
    let list_height = usize::from(list_area.height.saturating_sub(2));
    let lines = list_lines(&view, view_data, palette, list_height);
    let list = Paragraph::new(lines).block(
        Block::default()
            .title(format!("page {}", state.page.get()))
            .borders(Borders::ALL)
            .border_style(border),
    );
    frame.render_widget(list, list_area);

    if view.show_pager() {
        let pager = Paragraph::new(pager_text(state, &view)).style(Style::default().fg(palette.muted));
        frame.render_widget(pager, layout[4]);
    }

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(palette.accent))
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(status, layout[5]);

    if let Some(task) = state.confirm.staged() {
        let area = centered_rect(60, 30, frame.area());
        frame.render_widget(Clear, area);
        let prompt = Paragraph::new(confirm_text(task))
            .style(base)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("delete")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.danger)),
            );
        frame.render_widget(prompt, area);
    }

    list_height
}

fn theme_toggle_label(theme: Option<Theme>) -> &'static str {
    match theme {
        Some(Theme::Dark) => "t: ☀ light",
        _ => "t: 🌙 dark",
    }
}

fn header_text(state: &AppState, view: &TaskView<'_>, in_flight: usize) -> String {
    let mut out = format!(
        "{} of {} shown · {} matching",
        view.visible().len(),
        state.tasks.len(),
        view.filtered().len()
    );
    if in_flight > 0 {
        out.push_str(&format!(" · syncing {in_flight}"));
    }
    out.push_str(" · ");
    out.push_str(theme_toggle_label(state.theme.theme()));
    out
}

fn draft_text(state: &AppState) -> String {
    if state.mode == AppMode::Draft {
        format!("{}▏", state.draft)
    } else if state.draft.is_empty() {
        "new task…".to_owned()
    } else {
        state.draft.clone()
    }
}

fn search_line(state: &AppState, palette: Palette) -> Line<'static> {
    let cursor = if state.mode == AppMode::Search {
        "▏"
    } else {
        ""
    };
    let mut spans = vec![Span::raw(format!("{}{cursor}", state.search)), Span::raw("   ")];
    for filter in Filter::ALL {
        let style = if filter == state.filter {
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn task_line_text(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{mark}] {}", task.text)
}

fn list_lines(
    view: &TaskView<'_>,
    view_data: &ViewData,
    palette: Palette,
    height: usize,
) -> Vec<Line<'static>> {
    if view.filtered().is_empty() {
        return vec![Line::styled(
            "no tasks match",
            Style::default().fg(palette.muted),
        )];
    }

    let mut lines: Vec<Line<'static>> = view
        .visible()
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let mut style = if task.completed {
                Style::default()
                    .fg(palette.done)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(palette.fg)
            };
            if index == view_data.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::styled(task_line_text(task), style)
        })
        .collect();
    if view.has_more() {
        lines.push(Line::styled(
            SENTINEL_LABEL,
            Style::default().fg(palette.accent),
        ));
    }
    lines
        .into_iter()
        .skip(view_data.offset)
        .take(height)
        .collect()
}

fn pager_text(state: &AppState, view: &TaskView<'_>) -> String {
    let prev = if state.page.get() > 1 {
        "[p] prev"
    } else {
        " -  prev"
    };
    let next = if view.has_more() {
        "[n] next"
    } else {
        " -  next"
    };
    format!("{prev}   page {}   {next}", state.page.get())
}

fn confirm_text(task: &Task) -> String {
    format!(
        "Delete this task?\n\n\"{}\"\n\ny/enter delete · n/esc cancel",
        task.text
    )
}

fn status_text(state: &AppState) -> String {
    let hints = match state.mode {
        AppMode::Nav => "j/k move · space toggle · d delete · a add · / search · f filter · n/p page · t theme · r reload · q quit",
        AppMode::Draft => "enter add · esc back",
        AppMode::Search => "type to search · enter/esc back",
        AppMode::Confirm => "y delete · n cancel · space toggle",
    };
    match &state.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
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
