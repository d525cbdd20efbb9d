use crate::app::TopicSuggestions;
use crate::ui::layout::{calculate_form_chunks, calculate_study_chunks, split_columns};
use crate::ui::widgets::{
    draw_banner, draw_count_selector, draw_info_panel, draw_loading, draw_text_input, draw_title,
    help_line,
};
use crate::utils::{calculate_max_scroll, estimate_text_height};
use crate::views::{OptionState, QuizView, QUESTION_COUNTS};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(
    f: &mut Frame,
    area: Rect,
    view: &mut QuizView,
    topics: &TopicSuggestions,
    tick: usize,
) {
    if !view.is_active() {
        draw_setup(f, area, view, topics, tick);
    } else if view.show_results {
        draw_results(f, area, view);
    } else {
        draw_question(f, area, view);
    }
}

fn option_style(state: OptionState) -> Style {
    match state {
        OptionState::Plain => Style::default(),
        OptionState::Selected => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        OptionState::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        OptionState::Incorrect => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn option_letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

fn draw_setup(
    f: &mut Frame,
    area: Rect,
    view: &QuizView,
    topics: &TopicSuggestions,
    tick: usize,
) {
    let layout = calculate_form_chunks(area, true);

    draw_title(f, layout.title_area, "Generate Quiz");
    draw_text_input(
        f,
        layout.input_area,
        "What topic would you like to quiz yourself on?",
        &view.topic,
        "e.g., machine learning, photosynthesis, economics...",
        !view.is_generating,
    );
    draw_count_selector(
        f,
        layout.count_area,
        "Number of questions",
        view.num_questions,
        "questions",
        &QUESTION_COUNTS,
    );

    if view.is_generating {
        draw_loading(f, layout.status_area, "Generating quiz...", tick);
    } else if !view.error.is_empty() {
        draw_banner(f, layout.status_area, &view.error, true);
    } else {
        let hint = Paragraph::new(help_line(&[("Enter", "Generate Quiz")]))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, layout.status_area);
    }

    let (left, right) = split_columns(layout.info_area, 50);
    draw_info_panel(
        f,
        left,
        "How it works",
        "The AI analyzes your uploaded study material to create personalized quiz questions:",
        &[
            "Multiple choice questions with explanations",
            "Questions based on your specific study content",
            "Immediate feedback and scoring",
            "Detailed explanations for each answer",
        ],
    );
    super::draw_topic_suggestions(f, right, topics);
}

fn draw_question(f: &mut Frame, area: Rect, view: &QuizView) {
    let layout = calculate_study_chunks(area, 3);
    let question = &view.questions[view.current_question];

    let header = Paragraph::new(format!(
        "Quiz: {}  -  Question {} of {}",
        view.topic.value().trim(),
        view.current_question + 1,
        view.questions.len()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        question.question.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    for (i, option) in question.options.iter().enumerate() {
        let state = view.option_state(view.current_question, option);
        let pointer = if i == view.highlighted { "›" } else { " " };
        let mark = if state == OptionState::Selected {
            "(•)"
        } else {
            "( )"
        };
        text.push_line(Line::from(Span::styled(
            format!("{} {} {}) {}", pointer, mark, option_letter(i), option),
            option_style(state),
        )));
    }
    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(body, layout.main_area);

    let answered = view.can_advance();
    let next_label = if view.is_last_question() {
        "Finish Quiz"
    } else {
        "Next Question"
    };
    let mut pairs = vec![("↑/↓", "Highlight"), ("Space/a-z", "Select")];
    if view.current_question > 0 {
        pairs.push(("←", "Previous"));
    }
    if answered {
        pairs.push(("→/Enter", next_label));
    }
    pairs.push(("Esc", "Quit Quiz"));
    let help = Paragraph::new(help_line(&pairs))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

fn draw_results(f: &mut Frame, area: Rect, view: &mut QuizView) {
    let layout = calculate_study_chunks(area, 3);
    let score = view.score();

    let header = Paragraph::new(format!(
        "Quiz: {}  -  Score: {}/{} ({}%)",
        view.topic.value().trim(),
        score.correct,
        score.total,
        score.percentage
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Quiz Complete!",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(format!(
        "Your Score: {}/{} ({}%)",
        score.correct, score.total, score.percentage
    )));
    let (verdict, color) = if score.passed() {
        ("Great job!", Color::Green)
    } else {
        ("Keep studying!", Color::Red)
    };
    text.push_line(Line::from(Span::styled(verdict, Style::default().fg(color))));

    for (index, question) in view.questions.iter().enumerate() {
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            format!("Question {}: {}", index + 1, question.question),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (i, option) in question.options.iter().enumerate() {
            let state = view.option_state(index, option);
            let suffix = match state {
                OptionState::Correct => "  ✓",
                OptionState::Incorrect => "  ✗",
                _ => "",
            };
            text.push_line(Line::from(Span::styled(
                format!("   {}) {}{}", option_letter(i), option, suffix),
                option_style(state),
            )));
        }
        if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.is_empty()) {
            text.push_line(Line::from(vec![
                Span::styled(
                    "   Explanation: ",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::from(explanation.to_string()),
            ]));
        }
    }

    let visible_height = layout.main_area.height.saturating_sub(2) as usize;
    let text_width = layout.main_area.width.saturating_sub(2) as usize;
    let max_scroll = calculate_max_scroll(estimate_text_height(&text, text_width), visible_height);
    view.results_scroll = view.results_scroll.min(max_scroll);

    let body = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((view.results_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Results"));
    f.render_widget(body, layout.main_area);

    let help = Paragraph::new(help_line(&[
        ("↑/↓", "Scroll"),
        ("Enter/r", "Take Another Quiz"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
