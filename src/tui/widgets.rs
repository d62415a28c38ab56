//! Custom widgets for the quiz UI

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A countdown bar: label plus a bar that drains as time runs out
pub struct TimerBar {
    remaining: u32,
    total: u32,
    label: String,
    color: Color,
    warning_secs: u32,
    danger_secs: u32,
}

impl TimerBar {
    pub fn new(label: &str, remaining: u32, total: u32) -> Self {
        Self {
            remaining,
            total: total.max(1),
            label: label.to_string(),
            color: Color::Green,
            warning_secs: 30,
            danger_secs: 10,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn warning_secs(mut self, secs: u32) -> Self {
        self.warning_secs = secs;
        self
    }

    pub fn danger_secs(mut self, secs: u32) -> Self {
        self.danger_secs = secs;
        self
    }
}

impl Widget for TimerBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = if self.remaining <= self.danger_secs {
            Color::Red
        } else if self.remaining <= self.warning_secs {
            Color::Yellow
        } else {
            self.color
        };

        let filled =
            (self.remaining.min(self.total) as u64 * (area.width as u64 - 2) / self.total as u64) as u16;

        let label = format!("{}: {}", self.label, crate::game::format_remaining(self.remaining));
        buf.set_string(area.x, area.y, &label, Style::default().fg(color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..(area.width - 2) {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// A centered one-line banner, for reveals and the time's-up screen
pub struct Banner {
    message: String,
    color: Color,
}

impl Banner {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            color: Color::Yellow,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for Banner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }
        let len = self.message.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(len) / 2;
        buf.set_string(x, area.y, &self.message, Style::default().fg(self.color));
    }
}
