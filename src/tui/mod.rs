//! Terminal User Interface
//!
//! TUI for the quiz using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Yellow,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::LightRed,
            info: Color::Cyan,
            border: Color::DarkGray,
            header: Color::LightYellow,
        }
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔══════════════════════════════════════════════════════════╗
║                                                          ║
║   ██████╗  ██████╗ ██╗  ██╗███████╗                      ║
║   ██╔══██╗██╔═══██╗██║ ██╔╝██╔════╝                      ║
║   ██████╔╝██║   ██║█████╔╝ █████╗                        ║
║   ██╔═══╝ ██║   ██║██╔═██╗ ██╔══╝                        ║
║   ██║     ╚██████╔╝██║  ██╗███████╗                      ║
║   ╚═╝      ╚═════╝ ╚═╝  ╚═╝╚══════╝                      ║
║                                                          ║
║    ██████╗ ██╗   ██╗██╗███████╗███████╗                  ║
║   ██╔═══██╗██║   ██║██║╚══███╔╝╚══███╔╝                  ║
║   ██║   ██║██║   ██║██║  ███╔╝   ███╔╝                   ║
║   ██║▄▄ ██║██║   ██║██║ ███╔╝   ███╔╝                    ║
║   ╚██████╔╝╚██████╔╝██║███████╗███████╗                  ║
║    ╚══▀▀═╝  ╚═════╝ ╚═╝╚══════╝╚══════╝                  ║
║                                                          ║
║          Who's that creature?                            ║
╚══════════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " POKE QUIZZ ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       LOBBY                                   ║
╠═══════════════════════════════════════════════════════════════╣
║  ↑/↓   Move between options                                   ║
║  ←/→   Change the selected option                             ║
║  1-9   Toggle a generation on or off                          ║
║  Enter Start the selected mode                                ║
║  q     Quit                                                   ║
╠═══════════════════════════════════════════════════════════════╣
║                       PLAYING                                 ║
╠═══════════════════════════════════════════════════════════════╣
║  type  Fill in your guess                                     ║
║  Enter Submit guess / next creature once revealed             ║
║  Tab   Reveal one more clue (stat mode)                       ║
║  F3    Give up and show the answer                            ║
║  F1    Toggle this help                                       ║
║  Esc   Back to the lobby                                      ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(3),   // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the playing-screen layout (history panel + quiz area)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),  // Session history
            Constraint::Percentage(70),  // Quiz area
        ])
        .split(area)
        .to_vec()
}

/// Split the quiz area into display, feedback, and input rows
pub fn create_quiz_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),      // Creature display
            Constraint::Length(3),   // Feedback
            Constraint::Length(3),   // Guess input
        ])
        .split(area)
        .to_vec()
}
