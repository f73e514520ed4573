use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Form",
        &[
            ("Tab / Shift+Tab", "Next / previous input"),
            ("\u{2190} \u{2192} Home End", "Move cursor"),
            ("Ctrl+Space", "Open lookup on this input"),
        ],
    ),
    (
        "Lookup popup",
        &[
            ("\u{2193} / \u{2191}", "Next / previous match (wraps)"),
            ("Enter", "Fill every bound input from the match"),
            ("Esc", "Close without filling"),
            ("Click row", "Fill from that match"),
            ("Click outside", "Close without filling"),
        ],
    ),
    (
        "Global",
        &[
            ("F5 / Ctrl+r", "Reload records from the source"),
            ("F1", "Toggle this help"),
            ("Esc", "Quit (when no popup is open)"),
            ("Ctrl+c", "Force quit"),
        ],
    ),
];

/// Keyboard reference overlay.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(64, 24, f.area());
    let key_style = Style::default().fg(theme.text);
    let desc_style = Style::default().fg(theme.dim);
    let section_style = Style::default().fg(theme.active).add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (title, keys) in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::styled(format!(" {title}"), section_style));
        lines.extend(keys.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("   {key:<18}"), key_style),
                Span::styled(*desc, desc_style),
            ])
        }));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        " Inputs marked \u{2315} are bound to record fields.",
        desc_style,
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focused_border_style())
        .title(Span::styled(" Keys ", theme.header_style()));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}
