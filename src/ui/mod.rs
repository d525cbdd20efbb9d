pub mod layout;
mod explain;
mod flashcards;
mod nav;
mod quiz;
mod upload;
pub mod widgets;

use crate::app::{App, TopicSuggestions, TopicsState};
use crate::models::View;
use layout::calculate_app_chunks;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use widgets::help_line;

pub use explain::draw_explain;
pub use flashcards::draw_flashcards;
pub use nav::draw_nav;
pub use quiz::draw_quiz;
pub use upload::draw_upload;

/// Draw the whole screen for the current view.
pub fn draw(f: &mut Frame, app: &mut App) {
    let layout = calculate_app_chunks(f.area());

    draw_nav(f, layout.nav_area, app);

    let tick = app.tick;
    match app.view {
        View::Upload => draw_upload(f, layout.body_area, &app.upload, tick),
        View::Explain => draw_explain(f, layout.body_area, &mut app.explain, tick),
        View::Quiz => draw_quiz(f, layout.body_area, &mut app.quiz, &app.topics, tick),
        View::Flashcards => {
            draw_flashcards(f, layout.body_area, &app.flashcards, &app.topics, tick)
        }
    }

    draw_help(f, layout.help_area, app);
}

const SETUP_KEYS: [(&str, &str); 3] = [
    ("Enter", "Generate"),
    ("↑/↓", "Count"),
    ("Ctrl+T", "Suggest Topic"),
];

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    match app.view {
        View::Upload => pairs.extend([("Enter", "Upload"), ("Esc", "Clear")]),
        View::Explain => pairs.extend([("Enter", "Ask"), ("↑/↓", "Scroll"), ("Esc", "Clear")]),
        View::Quiz if !app.quiz.is_active() => pairs.extend(SETUP_KEYS),
        View::Flashcards if !app.flashcards.is_active() => pairs.extend(SETUP_KEYS),
        View::Flashcards if app.flashcards.jump.is_some() => {}
        View::Quiz | View::Flashcards => pairs.push(("1-4", "Switch View")),
    }
    pairs.extend([
        ("Tab/F1-F4", "Views"),
        ("Ctrl+H", "Check API"),
        ("Ctrl+C", "Exit"),
    ]);

    let help = Paragraph::new(help_line(&pairs))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub(crate) fn draw_topic_suggestions(f: &mut Frame, area: Rect, topics: &TopicSuggestions) {
    let dim = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let lines: Vec<Line> = match topics.state {
        TopicsState::NotLoaded | TopicsState::Loading => {
            vec![Line::styled("Loading topics from your material...", dim)]
        }
        TopicsState::Loaded if topics.items.is_empty() => {
            let hint = topics.hint.as_deref().unwrap_or("No suggestions available.");
            vec![Line::styled(hint.to_string(), dim)]
        }
        TopicsState::Loaded => topics
            .items
            .iter()
            .map(|topic| Line::from(format!("• {}", topic)))
            .collect(),
    };
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Topics in your material (Ctrl+T)"),
        );
    f.render_widget(panel, area);
}
