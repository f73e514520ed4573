use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Small y/Esc dialog shown before leaving.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(36, 4, f.area());
    let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    let body = Paragraph::new(vec![
        Line::styled("Leave smartfill?", bold(theme.text)),
        Line::from(vec![
            Span::styled("y", bold(theme.error)),
            Span::styled(" quit  \u{b7}  ", Style::default().fg(theme.dim)),
            Span::styled("Esc", bold(theme.active)),
            Span::styled(" stay", Style::default().fg(theme.dim)),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error)),
    );

    f.render_widget(Clear, area);
    f.render_widget(body, area);
}
