use crate::input::TextInput;
use crate::models::ApiRequest;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::seq::SliceRandom;

pub const EXPLAIN_FAILED: &str = "Failed to get explanation. Please try again.";

pub const EXAMPLE_QUESTIONS: [&str; 5] = [
    "What is machine learning?",
    "Explain photosynthesis in simple terms",
    "How does the water cycle work?",
    "What are the main principles of economics?",
    "Explain quantum physics basics",
];

#[derive(Debug, Default)]
pub struct ExplainView {
    pub question: TextInput,
    pub answer: String,
    pub error: String,
    pub is_loading: bool,
    /// Index of the example question `Ctrl+N` fills in next.
    pub next_example: usize,
    pub answer_scroll: u16,
}

impl ExplainView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ApiRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.cycle_example(),
                KeyCode::Char('r') => self.random_example(),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Up => {
                self.answer_scroll = self.answer_scroll.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.answer_scroll = self.answer_scroll.saturating_add(1);
                None
            }
            KeyCode::Esc => {
                if !self.is_loading {
                    self.question.clear();
                }
                None
            }
            _ => {
                if !self.is_loading {
                    self.question.handle_key(key);
                }
                None
            }
        }
    }

    pub fn submit(&mut self) -> Option<ApiRequest> {
        if self.is_loading || self.question.is_blank() {
            return None;
        }
        self.is_loading = true;
        self.error.clear();
        self.answer.clear();
        self.answer_scroll = 0;
        Some(ApiRequest::Explain {
            question: self.question.value().trim().to_string(),
        })
    }

    pub fn use_example(&mut self, index: usize) {
        if self.is_loading {
            return;
        }
        if let Some(example) = EXAMPLE_QUESTIONS.get(index) {
            self.question.set(example);
        }
    }

    fn cycle_example(&mut self) {
        self.use_example(self.next_example);
        self.next_example = (self.next_example + 1) % EXAMPLE_QUESTIONS.len();
    }

    fn random_example(&mut self) {
        if let Some(example) = EXAMPLE_QUESTIONS.choose(&mut rand::thread_rng())
            && !self.is_loading
        {
            self.question.set(example);
        }
    }

    pub fn on_answer(&mut self, answer: String) {
        self.is_loading = false;
        self.answer = answer;
    }

    pub fn on_failed(&mut self, detail: Option<String>) {
        self.is_loading = false;
        self.error = detail.unwrap_or_else(|| EXPLAIN_FAILED.to_string());
    }
}
