use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::category::display_name;
use crate::ui::app::App;
use crate::ui::form::FormField;
use crate::ui::theme;

const LABEL_WIDTH: usize = 13;

/// Centered add-transaction popup drawn over the main layout.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let mut lines = vec![Line::from("")];
    let mut cursor = None;

    for (row, field) in FormField::all().iter().enumerate() {
        let focused = *field == form.field;
        let mut value = form.value(*field, &app.categories);
        if *field == FormField::Category {
            value = display_name(&value);
        }

        let label_style = if focused {
            theme::focused_field_style()
        } else {
            theme::dim_style()
        };
        let marker = if focused { "▸ " } else { "  " };

        let shown = if field.is_text() {
            value
        } else {
            format!("◂ {value} ▸")
        };
        if focused && field.is_text() {
            cursor = Some((row, shown.chars().count()));
        }

        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
            Span::styled(shown, theme::normal_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Tab next | ←/→ change | Enter save | Esc cancel",
        theme::dim_style(),
    )));

    let popup_height = (lines.len() as u16 + 2).min(area.height);
    let popup_width = 56.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(
                " Add Transaction ",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);

    if let Some((row, col)) = cursor {
        // border + blank line, then marker + label
        let cx = popup_area.x + 1 + 2 + LABEL_WIDTH as u16 + col as u16;
        let cy = popup_area.y + 2 + row as u16;
        if cx < popup_area.right() && cy < popup_area.bottom() {
            f.set_cursor_position((cx, cy));
        }
    }
}
