//! Main application state and rendering

use crate::data::{Difficulty, GameConfig, QuizMode, TimerDuration, MAX_GENERATION};
use crate::game::{RoundPhase, Session};
use crate::net::{CreatureSource, FetchWorker, PokeApiClient};
use crate::tui::widgets::{Banner, TimerBar};
use crate::tui::{create_content_layout, create_main_layout, create_quiz_layout};
use crate::tui::{styled_block, Theme, HELP_TEXT, LOGO, SMALL_LOGO};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Application state
pub struct App {
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub lobby: LobbyState,
    session: Option<Session>,
    worker: FetchWorker,
}

/// Current screen being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Lobby,
    Playing,
}

/// Which lobby option the cursor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyRow {
    Mode,
    Timer,
    Duration,
    Generations,
    Difficulty,
    Start,
}

impl LobbyRow {
    const ORDER: [LobbyRow; 6] = [
        LobbyRow::Mode,
        LobbyRow::Timer,
        LobbyRow::Duration,
        LobbyRow::Generations,
        LobbyRow::Difficulty,
        LobbyRow::Start,
    ];
}

/// Options being assembled on the lobby screen
pub struct LobbyState {
    pub row: usize,
    pub mode_idx: usize,
    pub timer_enabled: bool,
    pub duration_idx: usize,
    pub generations: BTreeSet<u8>,
    pub difficulty_idx: usize,
}

impl Default for LobbyState {
    fn default() -> Self {
        Self {
            row: 0,
            mode_idx: 0,
            timer_enabled: false,
            duration_idx: 0,
            generations: BTreeSet::new(),
            difficulty_idx: 2, // Medium
        }
    }
}

impl LobbyState {
    pub fn mode(&self) -> QuizMode {
        QuizMode::ALL[self.mode_idx]
    }

    pub fn current_row(&self) -> LobbyRow {
        LobbyRow::ORDER[self.row]
    }

    /// Freeze the selections into the session's immutable configuration.
    pub fn to_config(&self) -> GameConfig {
        GameConfig {
            mode: self.mode(),
            timer_enabled: self.timer_enabled,
            timer_duration: TimerDuration::ALL[self.duration_idx],
            generations: self.generations.clone(),
            difficulty: Difficulty::ALL[self.difficulty_idx],
        }
    }

    fn adjust(&mut self, right: bool) {
        match self.current_row() {
            LobbyRow::Mode => {
                self.mode_idx = cycle(self.mode_idx, QuizMode::ALL.len(), right);
            }
            LobbyRow::Timer => self.timer_enabled = !self.timer_enabled,
            LobbyRow::Duration => {
                self.duration_idx = cycle(self.duration_idx, TimerDuration::ALL.len(), right);
            }
            LobbyRow::Difficulty => {
                self.difficulty_idx = cycle(self.difficulty_idx, Difficulty::ALL.len(), right);
            }
            LobbyRow::Generations | LobbyRow::Start => {}
        }
    }

    fn toggle_generation(&mut self, generation: u8) {
        if !(1..=MAX_GENERATION).contains(&generation) {
            return;
        }
        if !self.generations.remove(&generation) {
            self.generations.insert(generation);
        }
    }
}

fn cycle(idx: usize, len: usize, forward: bool) -> usize {
    if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    }
}

impl App {
    /// App against the real PokeAPI.
    pub fn new() -> crate::Result<Self> {
        let client = PokeApiClient::new()?;
        Ok(Self::with_source(Arc::new(client)))
    }

    /// App against any creature source (tests use a stub).
    pub fn with_source(source: Arc<dyn CreatureSource>) -> Self {
        Self {
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::Lobby,
            lobby: LobbyState::default(),
            session: None,
            worker: FetchWorker::spawn(source),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Drain fetch completions and advance the countdown. Called once per
    /// frame, before rendering.
    pub fn tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        while let Some((token, result)) = self.worker.try_recv() {
            session.complete_fetch(token, result);
        }
        session.poll_timer(Instant::now());
    }

    fn start_session(&mut self) {
        let config = self.lobby.to_config();
        tracing::info!(mode = %config.mode, "session start");
        let (session, request) = Session::new(config, Instant::now());
        self.worker.submit(request);
        self.session = Some(session);
        self.current_screen = Screen::Playing;
    }

    fn leave_session(&mut self) {
        // An in-flight fetch may still complete after this; its token belongs
        // to the dead session's round, so the next session's guard drops it.
        self.session = None;
        self.current_screen = Screen::Lobby;
    }

    /// Handle keyboard input
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }

                if key.code == KeyCode::F(1) {
                    self.show_help = !self.show_help;
                    return Ok(true);
                }
                if self.show_help {
                    if key.code == KeyCode::Esc {
                        self.show_help = false;
                    }
                    return Ok(true);
                }

                match self.current_screen {
                    Screen::Lobby => return self.handle_lobby_key(key.code),
                    Screen::Playing => self.handle_playing_key(key.code),
                }
            }
        }
        Ok(true)
    }

    fn handle_lobby_key(&mut self, code: KeyCode) -> std::io::Result<bool> {
        match code {
            KeyCode::Char('q') => {
                self.running = false;
                return Ok(false);
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Up => {
                self.lobby.row = cycle(self.lobby.row, LobbyRow::ORDER.len(), false);
            }
            KeyCode::Down => {
                self.lobby.row = cycle(self.lobby.row, LobbyRow::ORDER.len(), true);
            }
            KeyCode::Left => self.lobby.adjust(false),
            KeyCode::Right => self.lobby.adjust(true),
            KeyCode::Char(c @ '1'..='9') => {
                self.lobby.toggle_generation(c as u8 - b'0');
            }
            KeyCode::Enter => {
                if self.lobby.current_row() == LobbyRow::Start {
                    self.start_session();
                } else if self.lobby.current_row() == LobbyRow::Timer {
                    self.lobby.timer_enabled = !self.lobby.timer_enabled;
                } else {
                    self.lobby.row = cycle(self.lobby.row, LobbyRow::ORDER.len(), true);
                }
            }
            _ => {}
        }
        Ok(true)
    }

    fn handle_playing_key(&mut self, code: KeyCode) {
        let Some(session) = self.session.as_mut() else {
            self.current_screen = Screen::Lobby;
            return;
        };
        match code {
            KeyCode::Esc => self.leave_session(),
            KeyCode::Enter => {
                let phase = session.round().phase();
                let skippable = phase == RoundPhase::Revealed || session.round().load_failed();
                if skippable {
                    if let Some(request) = session.next_round() {
                        self.worker.submit(request);
                    }
                } else {
                    session.submit_guess();
                }
            }
            KeyCode::Tab => session.request_clue(),
            KeyCode::F(3) => session.give_up(),
            KeyCode::Backspace => session.pop_guess_char(),
            KeyCode::Char(c) => session.push_guess_char(c),
            _ => {}
        }
    }

    // --- rendering ----------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame) {
        match self.current_screen {
            Screen::Lobby => self.render_lobby(frame),
            Screen::Playing => self.render_playing(frame),
        }

        if self.show_help {
            self.render_help(frame);
        }
    }

    fn render_lobby(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(19), // Logo
                Constraint::Min(10),    // Options
                Constraint::Length(2),  // Hint
            ])
            .split(frame.area());

        let logo = Paragraph::new(LOGO)
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.theme.header));
        frame.render_widget(logo, chunks[0]);

        let lobby = &self.lobby;
        let generations = if lobby.generations.is_empty() {
            "none (defaults to generation 1)".to_string()
        } else {
            lobby
                .generations
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let rows: Vec<(LobbyRow, String)> = vec![
            (
                LobbyRow::Mode,
                format!(
                    "Mode:        {} - {}",
                    lobby.mode().name(),
                    lobby.mode().description()
                ),
            ),
            (
                LobbyRow::Timer,
                format!(
                    "Timer:       {}",
                    if lobby.timer_enabled { "on" } else { "off" }
                ),
            ),
            (
                LobbyRow::Duration,
                format!(
                    "Duration:    {}",
                    TimerDuration::ALL[lobby.duration_idx].label()
                ),
            ),
            (LobbyRow::Generations, format!("Generations: {}", generations)),
            (
                LobbyRow::Difficulty,
                format!(
                    "Difficulty:  {} (image mode)",
                    Difficulty::ALL[lobby.difficulty_idx].label()
                ),
            ),
            (LobbyRow::Start, "▶ Start".to_string()),
        ];

        let items: Vec<ListItem> = rows
            .into_iter()
            .map(|(row, text)| {
                let style = if row == lobby.current_row() {
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.fg)
                };
                ListItem::new(text).style(style)
            })
            .collect();

        let list = List::new(items).block(styled_block("Lobby", &self.theme));
        frame.render_widget(list, centered_rect(60, chunks[1]));

        let hint = Paragraph::new("↑/↓ select  ←/→ change  1-9 generations  Enter start  F1 help  q quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(self.theme.border));
        frame.render_widget(hint, chunks[2]);
    }

    fn render_playing(&self, frame: &mut Frame) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let view = session.view();
        let chunks = create_main_layout(frame.area());

        // Header: title on the left, countdown on the right.
        let header_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);
        let title = Paragraph::new(format!("{} — {}", SMALL_LOGO, view.mode.name()))
            .style(
                Style::default()
                    .fg(self.theme.header)
                    .add_modifier(Modifier::BOLD),
            )
            .block(styled_block("", &self.theme));
        frame.render_widget(title, header_chunks[0]);

        if let Some(remaining) = view.remaining_secs {
            let total = session.config().timer_duration.seconds();
            frame.render_widget(
                TimerBar::new("Time left", remaining, total).color(self.theme.success),
                header_chunks[1].inner(ratatui::layout::Margin::new(1, 1)),
            );
        }

        let content = create_content_layout(chunks[1]);
        self.render_history(frame, content[0], session);
        self.render_quiz_area(frame, content[1], session);

        // Status bar: the running totals.
        let status = match view.mode {
            QuizMode::Stat => format!(
                "Points: {} | Creatures found: {}",
                view.points, view.correct_count
            ),
            _ => format!("Points: {} | Streak: {}", view.points, view.streak),
        };
        let status_bar = Paragraph::new(status)
            .style(Style::default().fg(self.theme.info))
            .block(styled_block("Score", &self.theme));
        frame.render_widget(status_bar, chunks[2]);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let items: Vec<ListItem> = session
            .messages()
            .iter()
            .rev()
            .map(|m| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        m.timestamp.format("%H:%M:%S ").to_string(),
                        Style::default().fg(self.theme.border),
                    ),
                    Span::raw(m.text.clone()),
                ]))
            })
            .collect();
        let list = List::new(items).block(styled_block("Session", &self.theme));
        frame.render_widget(list, area);
    }

    fn render_quiz_area(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let view = session.view();
        let quiz = create_quiz_layout(area);

        // Creature display, mode-specific.
        let mut lines: Vec<Line> = Vec::new();
        if view.session_over {
            lines.push(Line::from(Span::styled(
                "⏰ Time's up!",
                Style::default()
                    .fg(self.theme.alert)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "Final score: {} points, {} creature(s) found.",
                view.points, view.correct_count
            )));
        } else {
            match view.phase {
                RoundPhase::Loading if view.load_failed => {
                    lines.push(Line::from(Span::styled(
                        "Fetch failed.",
                        Style::default().fg(self.theme.alert),
                    )));
                    lines.push(Line::from("Press Enter to try another creature."));
                }
                RoundPhase::Loading => {
                    lines.push(Line::from("Loading a creature..."));
                }
                _ => match view.mode {
                    QuizMode::Image => {
                        if let Some(ob) = view.obfuscation {
                            if ob.is_clear() {
                                lines.push(Line::from("The sprite, unfiltered:"));
                            } else {
                                lines.push(Line::from(format!(
                                    "The sprite is hidden behind: {}",
                                    ob.filter()
                                )));
                            }
                        }
                        if let Some(url) = &view.sprite_url {
                            lines.push(Line::from(Span::styled(
                                url.clone(),
                                Style::default().fg(self.theme.info),
                            )));
                        }
                    }
                    QuizMode::Audio => {
                        lines.push(Line::from("Play the cry and name the creature:"));
                        if let Some(url) = &view.cry_url {
                            lines.push(Line::from(Span::styled(
                                url.clone(),
                                Style::default().fg(self.theme.info),
                            )));
                        }
                    }
                    QuizMode::Stat => {
                        if let Some((clue, pos, total)) = &view.clue {
                            lines.push(Line::from(format!("Clue {} of {}:", pos, total)));
                            lines.push(Line::from(Span::styled(
                                clue.clone(),
                                Style::default()
                                    .fg(self.theme.accent)
                                    .add_modifier(Modifier::BOLD),
                            )));
                            lines.push(Line::from(""));
                            lines.push(Line::from("Tab reveals another clue (it costs points)."));
                        }
                    }
                },
            }
            if let Some(answer) = &view.answer {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("It was {}!", answer),
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from("Press Enter for the next creature."));
            }
        }
        let display = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(styled_block("Who's that creature?", &self.theme));
        frame.render_widget(display, quiz[0]);

        // Feedback line.
        let feedback = Paragraph::new(view.feedback.clone())
            .style(Style::default().fg(self.theme.warning))
            .block(styled_block("Feedback", &self.theme));
        frame.render_widget(feedback, quiz[1]);

        // Guess input.
        let input_active = view.phase == RoundPhase::Active && !view.session_over;
        let input = Paragraph::new(format!("> {}", view.guess))
            .style(if input_active {
                Style::default().fg(self.theme.fg)
            } else {
                Style::default().fg(self.theme.border)
            })
            .block(styled_block("Your guess (EN or FR)", &self.theme));
        frame.render_widget(input, quiz[2]);
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(70, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(HELP_TEXT)
            .alignment(Alignment::Center)
            .block(styled_block("Help", &self.theme));
        frame.render_widget(help, area);
        frame.render_widget(
            Banner::new("Press F1 or Esc to close").color(self.theme.border),
            Rect {
                y: area.y + area.height.saturating_sub(1),
                height: 1,
                ..area
            },
        );
    }
}

/// Center a rect horizontally at the given percentage width
fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);
    chunks[1]
}
