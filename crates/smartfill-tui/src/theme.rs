use ratatui::style::{Color, Modifier, Style};

use crate::model::activity::ActivityKind;

/// Color theme for the TUI.
pub struct Theme {
    pub ok: Color,
    pub error: Color,
    pub changed: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub label: Color,
    pub highlight_bg: Color,
    pub highlight_border: Color,
    pub active: Color,
    pub spinner: Color,
    pub popup_bg: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            ok: Color::Rgb(0, 210, 0),
            error: Color::Red,
            changed: Color::Yellow,

            header_fg: Color::Black,
            header_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            label: Color::Rgb(0, 210, 0),
            highlight_bg: Color::Rgb(30, 50, 30),
            highlight_border: Color::Rgb(0, 210, 0),
            active: Color::Cyan,
            spinner: Color::Cyan,
            popup_bg: Color::Reset,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Modern theme: white text, electric blue accents, dark blue header.
    pub fn modern() -> Self {
        Self {
            ok: Color::Rgb(0, 200, 80),
            error: Color::Rgb(255, 80, 80),
            changed: Color::Rgb(255, 200, 0),

            header_fg: Color::White,
            header_bg: Color::Rgb(30, 60, 120),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            label: Color::Rgb(200, 200, 220),
            highlight_bg: Color::Rgb(30, 40, 80),
            highlight_border: Color::Rgb(96, 165, 250),
            active: Color::Rgb(60, 140, 255),
            spinner: Color::Rgb(60, 140, 255),
            popup_bg: Color::Rgb(18, 18, 28),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "modern" => Self::modern(),
            _ => Self::hacker(),
        }
    }

    pub fn activity_color(&self, kind: ActivityKind) -> Color {
        match kind {
            ActivityKind::Load => self.ok,
            ActivityKind::Fill => self.active,
            ActivityKind::Changed => self.changed,
            ActivityKind::Error => self.error,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.active)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
