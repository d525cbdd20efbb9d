use crate::ui::layout::{calculate_form_chunks, split_columns};
use crate::ui::widgets::{
    draw_banner, draw_info_panel, draw_loading, draw_text_input, draw_title, key_style,
};
use crate::utils::{calculate_max_scroll, estimate_text_height, render_markdown};
use crate::views::{ExplainView, EXAMPLE_QUESTIONS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_explain(f: &mut Frame, area: Rect, view: &mut ExplainView, tick: usize) {
    let layout = calculate_form_chunks(area, false);

    draw_title(f, layout.title_area, "Ask for Explanations");
    draw_text_input(
        f,
        layout.input_area,
        "What would you like me to explain?",
        &view.question,
        "Ask any question about your study material...",
        !view.is_loading,
    );

    if view.is_loading {
        draw_loading(f, layout.status_area, "Getting explanation...", tick);
    } else if !view.error.is_empty() {
        draw_banner(f, layout.status_area, &view.error, true);
    } else {
        let hint = Paragraph::new(Line::from(vec![
            Span::styled("Enter", key_style()),
            Span::from(" Get Explanation"),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(hint, layout.status_area);
    }

    let (answer_area, side_area) = split_columns(layout.info_area, 62);
    draw_answer(f, answer_area, view);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(side_area);
    draw_examples(f, side[0], view.next_example);
    draw_info_panel(
        f,
        side[1],
        "Tips for Better Explanations",
        "",
        &[
            "Be specific in your questions",
            "Ask for simple explanations of complex topics",
            "Request examples or analogies",
            "Ask follow-up questions for deeper understanding",
        ],
    );
}

fn draw_answer(f: &mut Frame, area: Rect, view: &mut ExplainView) {
    let text = if view.answer.is_empty() {
        Text::from(Span::styled(
            "The explanation will appear here.",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))
    } else {
        Text::from(render_markdown(&view.answer))
    };

    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(2) as usize;
    let max_scroll = calculate_max_scroll(estimate_text_height(&text, text_width), visible_height);
    view.answer_scroll = view.answer_scroll.min(max_scroll);

    let answer = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .scroll((view.answer_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Explanation"));
    f.render_widget(answer, area);
}

fn draw_examples(f: &mut Frame, area: Rect, next_example: usize) {
    let mut lines = vec![
        Line::from("Try asking questions like these:"),
        Line::from(""),
    ];
    for (i, example) in EXAMPLE_QUESTIONS.iter().enumerate() {
        let style = if i == next_example {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("• {}", example), style)));
    }
    let examples = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Example Questions (Ctrl+N / Ctrl+R)"),
        );
    f.render_widget(examples, area);
}
