use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::category::display_name;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

const BAR_WIDTH: usize = 16;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Budgets ", theme::title_style()));

    if app.budget.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No budgets configured", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add [[budget]] entries to config.toml",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Two lines per category: name and amounts, then the bar.
    let items: Vec<ListItem> = app
        .budget
        .iter()
        .map(|spend| {
            let color = if spend.is_warning() {
                theme::BAR_WARNING
            } else {
                theme::BAR_NEUTRAL
            };

            let name = truncate(&display_name(&spend.category), 14);
            let amounts = format!(
                "{} / {}",
                format_amount(spend.spent, &app.currency),
                format_amount(spend.limit, &app.currency)
            );

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{name:<15}"), theme::normal_style()),
                    Span::styled(amounts, theme::dim_style()),
                ]),
                Line::from(vec![
                    Span::styled(progress_bar(spend.ratio(), BAR_WIDTH), Style::default().fg(color)),
                    Span::styled(
                        format!(" {:.0}%", spend.percentage),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]),
            ])
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
