use crate::models::StatusKind;
use crate::ui::layout::{calculate_form_chunks, split_columns};
use crate::ui::widgets::{draw_banner, draw_info_panel, draw_loading, draw_text_input, draw_title};
use crate::views::UploadView;
use ratatui::{layout::Rect, Frame};

pub fn draw_upload(f: &mut Frame, area: Rect, view: &UploadView, tick: usize) {
    let layout = calculate_form_chunks(area, false);

    draw_title(f, layout.title_area, "Upload Your Study Material");
    draw_text_input(
        f,
        layout.input_area,
        "PDF file path",
        &view.path,
        "e.g. ~/Documents/biology-chapter-3.pdf",
        !view.is_uploading,
    );

    if view.is_uploading {
        draw_loading(f, layout.status_area, "Processing PDF...", tick);
    } else if let Some(status) = &view.status {
        draw_banner(
            f,
            layout.status_area,
            &status.message,
            status.kind == StatusKind::Error,
        );
    } else {
        draw_info_panel(f, layout.status_area, "Supported format: PDF", "", &[]);
    }

    let (left, right) = split_columns(layout.info_area, 50);
    draw_info_panel(
        f,
        left,
        "How it works",
        "Upload your PDF study material and the AI will analyze it to help you:",
        &[
            "Get simple explanations of complex concepts",
            "Generate practice quiz questions",
            "Create interactive flashcards",
        ],
    );
    draw_info_panel(
        f,
        right,
        "Supported Content",
        "Works best with educational content like:",
        &[
            "Textbooks and course materials",
            "Research papers and articles",
            "Lecture notes and presentations",
            "Study guides and summaries",
        ],
    );
}
