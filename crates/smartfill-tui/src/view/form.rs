use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use smartfill_core::LoadState;

use crate::app::App;
use crate::view::{spinner_char, truncate};

/// Height of one input box (border, value, border).
const INPUT_HEIGHT: u16 = 3;
/// Activity lines shown under the form.
const ACTIVITY_LINES: u16 = 4;

/// Render the header, the input boxes, the activity panel and the footer.
/// Records the input areas on the app for hit-testing.
pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),                  // header
        Constraint::Min(INPUT_HEIGHT),          // inputs
        Constraint::Length(ACTIVITY_LINES + 2), // activity
        Constraint::Length(1),                  // footer
    ])
    .split(f.area());

    render_header(f, app, chunks[0]);
    render_inputs(f, app, chunks[1]);
    render_activity(f, app, chunks[2]);
    render_footer(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let settings = app.settings();
    let source = match (&settings.source, &settings.key) {
        (Some(s), Some(k)) => format!(" {s} \u{2192} {k}"),
        _ => " (no source configured)".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(" SMARTFILL ", theme.header_style()),
        Span::styled(
            truncate(&source, area.width.saturating_sub(11) as usize),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_inputs(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let width = area.width.min(60);
    let mut areas = Vec::with_capacity(app.form.fields.len());
    let mut y = area.y;

    for (i, field) in app.form.fields.iter().enumerate() {
        if y + INPUT_HEIGHT > area.bottom() {
            break;
        }
        let rect = Rect::new(area.x + 1, y, width.saturating_sub(2), INPUT_HEIGHT);
        areas.push(rect);
        y += INPUT_HEIGHT;

        let focused = i == app.form.focused;
        let bound = app.popup.is_observed(&field.id);
        let title = if bound {
            format!(" {} \u{2315} ", field.label)
        } else {
            format!(" {} ", field.label)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                theme.focused_border_style()
            } else {
                theme.border_style()
            })
            .title(Span::styled(
                title,
                Style::default().fg(theme.label).add_modifier(if focused {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
            ));
        let inner = block.inner(rect);

        // Scroll horizontally so the cursor stays inside the box.
        let cursor_col = field.value[..field.cursor].chars().count();
        let skip = cursor_col.saturating_sub(inner.width.saturating_sub(1) as usize);
        let visible: String = field.value.chars().skip(skip).collect();

        f.render_widget(
            Paragraph::new(Span::styled(visible, Style::default().fg(theme.text))).block(block),
            rect,
        );

        if focused && !app.confirm_quit && !app.show_help {
            let col = (cursor_col - skip) as u16;
            f.set_cursor_position((inner.x + col, inner.y));
        }
    }

    app.input_areas = areas;
}

fn render_activity(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let lines: Vec<Line> = app
        .activity
        .recent(ACTIVITY_LINES as usize)
        .map(|entry| {
            Line::from(Span::styled(
                truncate(&entry.message, area.width.saturating_sub(4) as usize),
                Style::default().fg(theme.activity_color(entry.kind)),
            ))
        })
        .collect();
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border_style())
        .title(format!(" Activity ({}) ", app.activity.len()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let status = match app.popup.load_state() {
        LoadState::Idle => Span::styled(" idle ", Style::default().fg(theme.dim)),
        LoadState::Loading => Span::styled(
            format!(" {} loading ", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        ),
        LoadState::Loaded(n) => Span::styled(format!(" {n} records "), Style::default().fg(theme.ok)),
        LoadState::Failed(_) => Span::styled(" load failed ", Style::default().fg(theme.error)),
    };
    let hints = Span::styled(
        " Tab:next  \u{2191}\u{2193}:choose  Enter:fill  Esc:close  Ctrl+Space:lookup  F5:reload  F1:help",
        theme.footer_style(),
    );
    f.render_widget(Paragraph::new(Line::from(vec![status, hints])), area);
}
