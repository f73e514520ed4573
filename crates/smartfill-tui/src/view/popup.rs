use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use smartfill_core::{Anchor, NO_MATCHES, PopupRows, RowView};

use crate::app::{App, rect_to_bounds};
use crate::theme::Theme;
use crate::view::truncate;

/// Most content lines the popup shows before it scrolls.
const MAX_VISIBLE_LINES: u16 = 10;
/// Narrowest popup, so short inputs still get readable rows.
const MIN_WIDTH: u16 = 24;

/// Render the popup beneath its anchor, or nothing while hidden.
/// Records row hit areas and the popup bounds on the app.
pub fn render(f: &mut Frame, app: &mut App) {
    app.popup_rows.clear();
    let Some(view) = app.popup.view() else {
        app.popup.set_rendered_bounds(None);
        return;
    };

    let content_lines = match &view.rows {
        PopupRows::Empty => 1,
        PopupRows::Rows(rows) => rows.iter().map(row_height).sum::<u16>().max(1),
    };
    let area = placement(view.anchor, content_lines, f.area());
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(area);

    f.render_widget(Clear, area);

    match view.rows {
        PopupRows::Empty => {
            let placeholder = Paragraph::new(Span::styled(NO_MATCHES, Style::default().fg(theme.dim)))
                .block(block);
            f.render_widget(placeholder, area);
        }
        PopupRows::Rows(rows) => {
            let items: Vec<ListItem> = rows
                .iter()
                .map(|row| row_item(row, inner.width, theme))
                .collect();
            let selected = rows.iter().position(|r| r.highlighted);
            let mut state = ListState::default().with_selected(selected);
            let list = List::new(items)
                .block(block)
                .highlight_style(theme.highlight_style())
                .highlight_symbol("\u{258C}");
            f.render_stateful_widget(list, area, &mut state);

            let mut y = inner.y;
            for row in rows.iter().skip(state.offset()) {
                if y >= inner.bottom() {
                    break;
                }
                let height = row_height(row).min(inner.bottom() - y);
                app.popup_rows
                    .push((Rect::new(inner.x, y, inner.width, height), row.record_index));
                y += height;
            }
        }
    }

    app.popup.set_rendered_bounds(Some(rect_to_bounds(area)));
}

fn row_height(row: &RowView) -> u16 {
    row.fields.len().max(1) as u16
}

fn row_item<'a>(row: &RowView, width: u16, theme: &Theme) -> ListItem<'a> {
    // One column goes to the highlight symbol.
    let avail = width.saturating_sub(1) as usize;
    let mut lines: Vec<Line> = row
        .fields
        .iter()
        .map(|field| {
            let label = format!("{}: ", field.label);
            let value = truncate(&field.value, avail.saturating_sub(label.chars().count()));
            Line::from(vec![
                Span::styled(label, Style::default().fg(theme.label)),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("record #{}", row.record_index + 1),
            Style::default().fg(theme.dim),
        )));
    }
    ListItem::new(Text::from(lines))
}

/// Popup rectangle: directly below the anchor, at least [`MIN_WIDTH`] wide,
/// at most [`MAX_VISIBLE_LINES`] of content tall, kept on screen.
///
/// Near the bottom edge the popup shrinks rather than covering the input;
/// it moves up only when not even one content line fits below.
pub fn placement(anchor: Anchor, content_lines: u16, screen: Rect) -> Rect {
    let wanted = (content_lines.min(MAX_VISIBLE_LINES) + 2).min(screen.height);
    let width = anchor.width.max(MIN_WIDTH).min(screen.width);
    let x = anchor.x.min(screen.right().saturating_sub(width));
    let room_below = screen.bottom().saturating_sub(anchor.y);
    let (y, height) = if room_below >= wanted {
        (anchor.y, wanted)
    } else if room_below >= 3 {
        (anchor.y, room_below)
    } else {
        (screen.bottom().saturating_sub(wanted), wanted)
    };
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sits_below_anchor_when_it_fits() {
        let anchor = Anchor { x: 1, y: 4, width: 40 };
        let rect = placement(anchor, 3, Rect::new(0, 0, 80, 24));
        assert_eq!(rect, Rect::new(1, 4, 40, 5));
    }

    #[test]
    fn height_is_capped_at_max_visible_lines() {
        let anchor = Anchor { x: 0, y: 2, width: 10 };
        let rect = placement(anchor, 50, Rect::new(0, 0, 80, 24));
        assert_eq!(rect.height, MAX_VISIBLE_LINES + 2);
        assert_eq!(rect.width, MIN_WIDTH);
        assert_eq!(rect.y, 2);
    }

    #[test]
    fn shrinks_near_bottom_instead_of_covering_the_input() {
        let anchor = Anchor { x: 0, y: 20, width: 30 };
        let rect = placement(anchor, 50, Rect::new(0, 0, 80, 24));
        assert_eq!(rect.y, 20);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.bottom(), 24);
    }

    #[test]
    fn moves_up_only_when_no_line_fits_below() {
        let anchor = Anchor { x: 0, y: 22, width: 30 };
        let rect = placement(anchor, 3, Rect::new(0, 0, 80, 24));
        assert_eq!(rect.height, 5);
        assert_eq!(rect.bottom(), 24);
    }

    #[test]
    fn narrow_screens_clamp_width_and_x() {
        let anchor = Anchor { x: 15, y: 2, width: 30 };
        let rect = placement(anchor, 1, Rect::new(0, 0, 20, 10));
        assert_eq!(rect.width, 20);
        assert_eq!(rect.x, 0);
    }
}
