use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode};
use super::commands;
use super::notify::AlertKind;
use super::screens;
use super::theme;
use super::util::truncate;
use crate::ledger::Filter;

const FILTERS: [Filter; 3] = [Filter::All, Filter::Income, Filter::Expense];

/// Rows taken by everything except the transaction table body.
pub(crate) const CHROME_ROWS: u16 = 10;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter bar
            Constraint::Length(4), // Summary cards
            Constraint::Min(5),    // Transactions + budgets
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_filter_bar(f, chunks[0], app);
    screens::summary::render(f, chunks[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(44)])
        .split(chunks[2]);
    screens::transactions::render(f, body[0], app);
    screens::budgets::render(f, body[1], app);

    render_status_bar(f, chunks[3], app);
    render_command_bar(f, chunks[4], app);

    if app.input_mode == InputMode::Entry {
        screens::entry::render(f, chunks[2], app);
    }
    render_alerts(f, f.area(), app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = FILTERS
        .iter()
        .enumerate()
        .map(|(i, filter)| {
            let num = format!("{}", i + 1);
            if *filter == app.filter {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        filter.as_str(),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{filter}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Entry => theme::YELLOW,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} of {} shown",
        app.filter,
        app.transactions.len(),
        app.summary.income_count + app.summary.expense_count
    );

    let right = match app.input_mode {
        InputMode::Normal => " a add | D delete | f filter | ? help ",
        InputMode::Command => " Enter run | Esc cancel ",
        InputMode::Entry => " Tab next field | Enter save | Esc cancel ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.len() as u16),
        ),
        InputMode::Normal | InputMode::Entry => (
            Line::from(Span::styled(
                " Press : for commands, a to add, ? for help",
                theme::dim_style(),
            )),
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Stack live alerts in the top-right corner, newest at the bottom.
fn render_alerts(f: &mut Frame, area: Rect, app: &App) {
    if app.notifications.is_empty() {
        return;
    }
    let width = 44.min(area.width.saturating_sub(2));
    if width < 8 {
        return;
    }
    let x = area.right().saturating_sub(width + 1);
    let mut y = area.y + 1;

    for alert in app.notifications.active() {
        if y + 3 > area.bottom() {
            break;
        }
        let style = match alert.kind {
            AlertKind::Success => theme::success_alert_style(),
            AlertKind::Error => theme::error_alert_style(),
        };
        let rect = Rect::new(x, y, width, 3);
        let text = truncate(&alert.message, width.saturating_sub(4) as usize);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(text, style)))
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            rect,
        );
        y += 3;
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let heading = Style::default()
        .fg(theme::YELLOW)
        .add_modifier(Modifier::BOLD);

    let mut help_text = vec![
        Line::from(Span::styled(
            " pocketbook Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", heading)),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           1-3        All/Income/Expense",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  g/G              Top/Bottom            f          Cycle filter",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Ctrl-q           Quit                  q          Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Actions", heading)),
        Line::from(Span::styled(
            "  a               Add transaction        D          Delete selected",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Tab/Shift-Tab   Next/Prev form field   Left/Right Change type/category",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Enter           Save entry             Esc        Cancel/Back",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", heading)),
    ];

    for (name, desc) in commands::help_entries() {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<22} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
