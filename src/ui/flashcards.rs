use crate::app::TopicSuggestions;
use crate::ui::layout::{calculate_form_chunks, calculate_study_chunks, split_columns};
use crate::ui::widgets::{
    draw_banner, draw_count_selector, draw_info_panel, draw_loading, draw_text_input, draw_title,
    help_line,
};
use crate::views::{FlashcardView, CARD_COUNTS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_flashcards(
    f: &mut Frame,
    area: Rect,
    view: &FlashcardView,
    topics: &TopicSuggestions,
    tick: usize,
) {
    if view.is_active() {
        draw_study(f, area, view);
    } else {
        draw_setup(f, area, view, topics, tick);
    }
}

fn draw_setup(
    f: &mut Frame,
    area: Rect,
    view: &FlashcardView,
    topics: &TopicSuggestions,
    tick: usize,
) {
    let layout = calculate_form_chunks(area, true);

    draw_title(f, layout.title_area, "Generate Flashcards");
    draw_text_input(
        f,
        layout.input_area,
        "What topic would you like to study with flashcards?",
        &view.topic,
        "e.g., vocabulary, concepts, definitions...",
        !view.is_generating,
    );
    draw_count_selector(
        f,
        layout.count_area,
        "Number of flashcards",
        view.num_cards,
        "cards",
        &CARD_COUNTS,
    );

    if view.is_generating {
        draw_loading(f, layout.status_area, "Generating flashcards...", tick);
    } else if !view.error.is_empty() {
        draw_banner(f, layout.status_area, &view.error, true);
    } else {
        let hint = Paragraph::new(help_line(&[("Enter", "Generate Flashcards")]))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, layout.status_area);
    }

    let (left, right) = split_columns(layout.info_area, 50);
    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(left);
    draw_info_panel(
        f,
        panels[0],
        "How it works",
        "The AI creates interactive flashcards from your study material:",
        &[
            "Question and answer format",
            "Flip cards with Space",
            "Navigate between cards",
            "Track your progress",
        ],
    );
    draw_info_panel(
        f,
        panels[1],
        "Study effectively",
        "Flashcards are great for:",
        &[
            "Memorizing vocabulary",
            "Learning definitions",
            "Understanding concepts",
            "Quick review sessions",
        ],
    );
    super::draw_topic_suggestions(f, right, topics);
}

fn draw_study(f: &mut Frame, area: Rect, view: &FlashcardView) {
    let layout = calculate_study_chunks(area, 3);

    let header = Paragraph::new(format!(
        "Flashcards: {}  -  Card {} of {}  -  {} flipped",
        view.topic.value().trim(),
        view.current_card + 1,
        view.cards.len(),
        view.flipped_count()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let grid_rows = grid_height(view.cards.len(), layout.main_area.width);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(grid_rows + 2),
            Constraint::Length(6),
        ])
        .split(layout.main_area);

    draw_card(f, chunks[0], view);
    draw_card_grid(f, chunks[1], view);
    draw_info_panel(
        f,
        chunks[2],
        "Study Tips",
        "",
        &[
            "Try to answer the question before flipping the card",
            "Review cards you find difficult more frequently",
            "Press g and a card number to jump, or use Home/End/PgUp/PgDn",
            "Practice regularly for better retention",
        ],
    );

    let footer = match &view.jump {
        Some(typed) => {
            let mut spans = vec![
                Span::styled(
                    format!("Go to card (1-{}): {}_", view.cards.len(), typed),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::from("   "),
            ];
            spans.extend(help_line(&[("Enter", "Jump"), ("Esc", "Cancel")]).spans);
            Line::from(spans)
        }
        None => help_line(&[
            ("←/→", "Previous/Next"),
            ("Space", "Flip Card"),
            ("g", "Go To Card"),
            ("Home/End", "First/Last"),
            ("r", "Generate New Set"),
        ]),
    };
    let help = Paragraph::new(footer)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

fn draw_card(f: &mut Frame, area: Rect, view: &FlashcardView) {
    let card = &view.cards[view.current_card];
    let flipped = view.is_flipped(view.current_card);
    let (title, body, hint, color) = if flipped {
        ("Answer", card.back.as_str(), "Space to flip back", Color::Green)
    } else {
        ("Question", card.front.as_str(), "Space to flip", Color::Cyan)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(body.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            hint,
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let card_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(card_widget, area);
}

const CELL_WIDTH: u16 = 5;

fn grid_height(cards: usize, width: u16) -> u16 {
    let per_row = (width.saturating_sub(2) / CELL_WIDTH).max(1) as usize;
    cards.div_ceil(per_row).max(1) as u16
}

/// Numbered card buttons; `*` marks flipped cards, reverse video marks the current one.
fn draw_card_grid(f: &mut Frame, area: Rect, view: &FlashcardView) {
    let per_row = (area.width.saturating_sub(2) / CELL_WIDTH).max(1) as usize;
    let lines: Vec<Line> = (0..view.cards.len())
        .collect::<Vec<_>>()
        .chunks(per_row)
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|&i| {
                        let marker = if view.is_flipped(i) { "*" } else { " " };
                        let style = if i == view.current_card {
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                        } else if view.is_flipped(i) {
                            Style::default().fg(Color::Blue)
                        } else {
                            Style::default()
                        };
                        Span::styled(format!("{:>3}{} ", i + 1, marker), style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let grid = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Card Navigation"),
    );
    f.render_widget(grid, area);
}
