use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

lazy_static::lazy_static! {
    static ref NUMBERED_ITEM: Regex = Regex::new(r"^(\d+)[.)]\s+(.*)$").expect("valid regex");
    static ref INLINE: Regex =
        Regex::new(r"\*\*(?P<bold>.+?)\*\*|\*(?P<italic>[^*]+?)\*|`(?P<code>[^`]+)`")
            .expect("valid regex");
}

/// Turn the markdown an LLM tends to produce into styled lines.
///
/// Handles headings, bullet and numbered lists, `| tables |`, fenced code
/// blocks and the inline `**bold**`, `*italic*` and `` `code` `` forms.
/// Anything else passes through as plain text, one line per source line.
pub fn render_markdown(content: &str) -> Vec<Line<'static>> {
    let source: Vec<&str> = content.lines().collect();
    let mut out: Vec<Line<'static>> = Vec::new();
    let mut in_fence = false;
    let mut i = 0;

    while i < source.len() {
        let line = source[i];
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            i += 1;
            continue;
        }
        if in_fence {
            out.push(Line::from(Span::styled(
                format!("  {}", line),
                Style::default().add_modifier(Modifier::DIM),
            )));
            i += 1;
            continue;
        }

        if is_table_row(line) && source.get(i + 1).is_some_and(|next| is_table_separator(next)) {
            let header = table_cells(line);
            i += 2;
            let mut rows = Vec::new();
            while i < source.len() && is_table_row(source[i]) {
                rows.push(table_cells(source[i]));
                i += 1;
            }
            push_table(&header, &rows, &mut out);
            continue;
        }

        out.push(render_line(trimmed, line));
        i += 1;
    }

    out
}

fn render_line(trimmed: &str, raw: &str) -> Line<'static> {
    let heading = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    if let Some(text) = ["### ", "## ", "# "]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
    {
        return Line::from(Span::styled(text.to_string(), heading));
    }

    if let Some(item) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        let mut spans = vec![Span::from("  • ")];
        spans.extend(parse_inline(item));
        return Line::from(spans);
    }

    if let Some(caps) = NUMBERED_ITEM.captures(trimmed) {
        let mut spans = vec![Span::from(format!("  {}. ", &caps[1]))];
        spans.extend(parse_inline(&caps[2]));
        return Line::from(spans);
    }

    if trimmed.is_empty() {
        Line::from("")
    } else {
        Line::from(parse_inline(raw))
    }
}

fn parse_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::from(text[last..whole.start()].to_string()));
        }
        let (content, modifier) = if let Some(m) = caps.name("bold") {
            (m.as_str(), Modifier::BOLD)
        } else if let Some(m) = caps.name("italic") {
            (m.as_str(), Modifier::ITALIC)
        } else if let Some(m) = caps.name("code") {
            (m.as_str(), Modifier::DIM)
        } else {
            (whole.as_str(), Modifier::empty())
        };
        spans.push(Span::styled(
            content.to_string(),
            Style::default().add_modifier(modifier),
        ));
        last = whole.end();
    }

    if last < text.len() || spans.is_empty() {
        spans.push(Span::from(text[last..].to_string()));
    }
    spans
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.len() > 1
}

fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

fn table_cells(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Tables become "Header: value" blocks so they wrap in narrow panes.
fn push_table(header: &[String], rows: &[Vec<String>], out: &mut Vec<Line<'static>>) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    if rows.is_empty() {
        out.push(Line::from(Span::styled(header.join(" │ "), bold)));
        return;
    }
    for (n, row) in rows.iter().enumerate() {
        if n > 0 {
            out.push(Line::from(""));
        }
        for (col, cell) in row.iter().enumerate() {
            let name = header.get(col).map(String::as_str).unwrap_or("?");
            let mut spans = vec![Span::styled(format!("{}: ", name), bold)];
            spans.extend(parse_inline(cell));
            out.push(Line::from(spans));
        }
    }
}
