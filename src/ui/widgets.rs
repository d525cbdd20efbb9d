use crate::input::TextInput;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn spinner(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

pub fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// "key description" pairs rendered as one hint line.
pub fn help_line(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, description) in pairs {
        spans.push(Span::styled(key.to_string(), key_style()));
        spans.push(Span::from(format!(" {}  ", description)));
    }
    Line::from(spans)
}

pub fn draw_title(f: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

pub fn draw_text_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    input: &TextInput,
    placeholder: &str,
    focused: bool,
) {
    let (content, style) = if input.value().is_empty() {
        (
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        (input.value().to_string(), Style::default())
    };
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_col = input.cursor_column();
    // Keep the cursor visible on long single-line values.
    let scroll_x = cursor_col.saturating_sub(inner_width.saturating_sub(1)) as u16;

    let paragraph = Paragraph::new(content)
        .style(style)
        .scroll((0, scroll_x))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(label.to_string()),
        );
    f.render_widget(paragraph, area);

    if focused && area.width > 2 && area.height > 2 {
        let x = area.x + 1 + (cursor_col as u16).saturating_sub(scroll_x);
        f.set_cursor_position((x.min(area.x + area.width - 2), area.y + 1));
    }
}

/// Success/error banner. Nothing is drawn for an empty message.
pub fn draw_banner(f: &mut Frame, area: Rect, message: &str, is_error: bool) {
    if message.is_empty() {
        return;
    }
    let (color, mark) = if is_error {
        (Color::Red, "✗")
    } else {
        (Color::Green, "✓")
    };
    let banner = Paragraph::new(format!("{} {}", mark, message))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(banner, area);
}

pub fn draw_loading(f: &mut Frame, area: Rect, message: &str, tick: usize) {
    let loading = Paragraph::new(format!("{} {}", spinner(tick), message))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(loading, area);
}

/// Static "How it works" style panel: a lead sentence followed by bullets.
pub fn draw_info_panel(f: &mut Frame, area: Rect, title: &str, lead: &str, bullets: &[&str]) {
    let mut lines = Vec::with_capacity(bullets.len() + 2);
    if !lead.is_empty() {
        lines.push(Line::from(lead.to_string()));
        lines.push(Line::from(""));
    }
    for bullet in bullets {
        lines.push(Line::from(format!("• {}", bullet)));
    }
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    title.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(panel, area);
}

/// "◀ 5 questions ▶" selector.
pub fn draw_count_selector(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: u32,
    noun: &str,
    choices: &[u32],
) {
    let at_min = choices.first() == Some(&value);
    let at_max = choices.last() == Some(&value);
    let arrow = |active: bool, glyph: &'static str| {
        if active {
            Span::styled(glyph, key_style())
        } else {
            Span::styled(glyph, Style::default().fg(Color::DarkGray))
        }
    };
    let line = Line::from(vec![
        arrow(!at_min, "↑ "),
        Span::styled(
            format!("{} {}", value, noun),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        arrow(!at_max, " ↓"),
    ]);
    let selector = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string()),
    );
    f.render_widget(selector, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, layout::Position, Terminal};

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner(0), "|");
        assert_eq!(spinner(5), "/");
    }

    fn cursor_after_drawing(input: &TextInput, width: u16) -> Position {
        let mut terminal = Terminal::new(TestBackend::new(width, 3)).unwrap();
        terminal
            .draw(|f| draw_text_input(f, f.area(), "Topic", input, "", true))
            .unwrap();
        terminal.get_cursor_position().unwrap()
    }

    #[test]
    fn test_text_input_cursor_uses_display_width() {
        let mut input = TextInput::new();
        input.set("日本x");
        assert_eq!(cursor_after_drawing(&input, 20), Position::new(6, 1));
    }

    #[test]
    fn test_text_input_cursor_stays_inside_box_on_long_values() {
        let mut input = TextInput::new();
        input.set(&"a".repeat(30));
        assert_eq!(cursor_after_drawing(&input, 12), Position::new(10, 1));
    }

    #[test]
    fn test_help_line_text() {
        let line = help_line(&[("Enter", "Submit"), ("Esc", "Clear")]);
        assert_eq!(line.to_string(), "Enter Submit  Esc Clear  ");
        assert_eq!(line.spans[0].style, key_style());
    }
}
