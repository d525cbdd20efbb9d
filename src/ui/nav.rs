use crate::app::{App, BackendStatus};
use crate::models::View;
use crate::ui::layout::split_columns;
use crate::ui::widgets::spinner;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw_nav(f: &mut Frame, area: Rect, app: &App) {
    let (tabs_area, status_area) = split_columns(area, 65);

    let titles: Vec<Line> = View::ALL
        .iter()
        .map(|view| Line::from(format!("F{} {}", view.index() + 1, view.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::styled(
                    " Study Buddy ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(tabs, tabs_area);

    let max_reason = status_area.width.saturating_sub(20) as usize;
    let (text, color) = match &app.backend {
        BackendStatus::Unknown => ("API: unknown".to_string(), Color::DarkGray),
        BackendStatus::Checking => (format!("API: checking {}", spinner(app.tick)), Color::Yellow),
        BackendStatus::Online(_) => ("API: online".to_string(), Color::Green),
        BackendStatus::Offline(reason) => (
            format!("API: offline ({})", truncate_string(reason, max_reason.max(8))),
            Color::Red,
        ),
    };
    let status = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title(app.api_url.clone()));
    f.render_widget(status, status_area);
}
