use crate::input::TextInput;
use crate::models::{ApiRequest, UploadStatus};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

pub const NOT_A_PDF: &str = "Please select a PDF file.";
pub const UPLOAD_FAILED: &str = "Failed to upload PDF. Please try again.";

#[derive(Debug, Default)]
pub struct UploadView {
    pub path: TextInput,
    pub is_uploading: bool,
    pub status: Option<UploadStatus>,
}

impl UploadView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ApiRequest> {
        if self.is_uploading {
            return None;
        }
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                self.path.clear();
                None
            }
            _ => {
                self.path.handle_key(key);
                None
            }
        }
    }

    pub fn submit(&mut self) -> Option<ApiRequest> {
        let raw = self.path.value().trim();
        if raw.is_empty() {
            return None;
        }
        let path = expand_home(raw);

        if !path.to_string_lossy().to_lowercase().ends_with(".pdf") {
            self.status = Some(UploadStatus::error(NOT_A_PDF));
            return None;
        }

        self.is_uploading = true;
        self.status = None;
        Some(ApiRequest::UploadPdf { path })
    }

    pub fn on_uploaded(&mut self, num_chunks: usize) {
        self.is_uploading = false;
        self.status = Some(UploadStatus::success(format!(
            "PDF uploaded successfully! Processed {} chunks.",
            num_chunks
        )));
    }

    pub fn on_failed(&mut self, detail: Option<String>) {
        self.is_uploading = false;
        self.status = Some(UploadStatus::error(
            detail.unwrap_or_else(|| UPLOAD_FAILED.to_string()),
        ));
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(raw)
}
