use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub nav_area: Rect,
    pub body_area: Rect,
    pub help_area: Rect,
}

/// Setup form shared by the upload, quiz and flashcard screens.
pub struct FormLayout {
    pub title_area: Rect,
    pub input_area: Rect,
    pub count_area: Rect,
    pub status_area: Rect,
    pub info_area: Rect,
}

pub struct StudyLayout {
    pub header_area: Rect,
    pub main_area: Rect,
    pub footer_area: Rect,
}

pub fn calculate_app_chunks(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    AppLayout {
        nav_area: chunks[0],
        body_area: chunks[1],
        help_area: chunks[2],
    }
}

/// `with_count` reserves a row for the question/card count selector.
pub fn calculate_form_chunks(area: Rect, with_count: bool) -> FormLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(if with_count { 3 } else { 0 }),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    FormLayout {
        title_area: chunks[0],
        input_area: chunks[1],
        count_area: chunks[2],
        status_area: chunks[3],
        info_area: chunks[4],
    }
}

pub fn calculate_study_chunks(area: Rect, footer_height: u16) -> StudyLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(footer_height),
        ])
        .split(area);

    StudyLayout {
        header_area: chunks[0],
        main_area: chunks[1],
        footer_area: chunks[2],
    }
}

/// Two side-by-side panels.
pub fn split_columns(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout() {
        let layout = calculate_app_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.nav_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.body_area.height, 34);
        assert_eq!(layout.body_area.y, 3);
    }

    #[test]
    fn test_form_layout_with_and_without_count() {
        let area = Rect::new(0, 0, 80, 40);
        let with = calculate_form_chunks(area, true);
        assert_eq!(with.title_area.height, 3);
        assert_eq!(with.count_area.height, 3);
        // margin 1 leaves 38 rows, four fixed rows of 3
        assert_eq!(with.info_area.height, 38 - 12);

        let without = calculate_form_chunks(area, false);
        assert_eq!(without.count_area.height, 0);
        assert_eq!(without.info_area.height, 38 - 9);
    }

    #[test]
    fn test_study_layout() {
        let layout = calculate_study_chunks(Rect::new(0, 0, 80, 30), 4);
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.footer_area.height, 4);
        assert_eq!(layout.main_area.height, 28 - 7);
    }

    #[test]
    fn test_split_columns() {
        let (left, right) = split_columns(Rect::new(0, 0, 100, 10), 60);
        assert_eq!(left.width, 60);
        assert_eq!(right.width, 40);
        assert_eq!(right.x, 60);
    }
}
