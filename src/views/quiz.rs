use crate::input::TextInput;
use crate::models::{ApiRequest, QuizQuestion};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashMap;

pub const QUIZ_FAILED: &str = "Failed to generate quiz. Please try again.";
pub const QUESTION_COUNTS: [u32; 4] = [3, 5, 10, 15];
pub const DEFAULT_QUESTION_COUNT: u32 = 5;
pub const PASS_PERCENTAGE: u32 = 70;

/// How an option should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Plain,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
}

impl Score {
    pub fn passed(&self) -> bool {
        self.percentage >= PASS_PERCENTAGE
    }
}

#[derive(Debug)]
pub struct QuizView {
    pub topic: TextInput,
    pub num_questions: u32,
    pub questions: Vec<QuizQuestion>,
    pub is_generating: bool,
    pub is_taking_quiz: bool,
    pub current_question: usize,
    pub selected_answers: HashMap<usize, String>,
    pub show_results: bool,
    pub error: String,
    /// Option under the keyboard cursor on the current question.
    pub highlighted: usize,
    pub results_scroll: u16,
}

impl Default for QuizView {
    fn default() -> Self {
        Self {
            topic: TextInput::new(),
            num_questions: DEFAULT_QUESTION_COUNT,
            questions: Vec::new(),
            is_generating: false,
            is_taking_quiz: false,
            current_question: 0,
            selected_answers: HashMap::new(),
            show_results: false,
            error: String::new(),
            highlighted: 0,
            results_scroll: 0,
        }
    }
}

impl QuizView {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a quiz is on screen rather than the setup form.
    pub fn is_active(&self) -> bool {
        self.is_taking_quiz && !self.questions.is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ApiRequest> {
        if !self.is_active() {
            return self.handle_setup_key(key);
        }
        if self.show_results {
            match key.code {
                KeyCode::Up => self.results_scroll = self.results_scroll.saturating_sub(1),
                KeyCode::Down => self.results_scroll = self.results_scroll.saturating_add(1),
                KeyCode::Enter | KeyCode::Char('r') => self.reset(),
                _ => {}
            }
            return None;
        }

        let option_count = self.questions[self.current_question].options.len();
        match key.code {
            KeyCode::Up => self.highlighted = self.highlighted.saturating_sub(1),
            KeyCode::Down => {
                if self.highlighted + 1 < option_count {
                    self.highlighted += 1;
                }
            }
            KeyCode::Char(' ') => self.select_highlighted(),
            KeyCode::Char(c) if c.is_ascii_lowercase() => {
                let index = (c as u8 - b'a') as usize;
                if index < option_count {
                    self.highlighted = index;
                    self.select_highlighted();
                }
            }
            KeyCode::Enter => {
                if self.can_advance() {
                    self.next_question();
                } else {
                    self.select_highlighted();
                }
            }
            KeyCode::Right => self.next_question(),
            KeyCode::Left => self.previous_question(),
            KeyCode::Esc => self.reset(),
            _ => {}
        }
        None
    }

    fn handle_setup_key(&mut self, key: KeyEvent) -> Option<ApiRequest> {
        match key.code {
            KeyCode::Enter => return self.generate(),
            KeyCode::Up => self.cycle_count(-1),
            KeyCode::Down => self.cycle_count(1),
            KeyCode::Esc => {
                if !self.is_generating {
                    self.topic.clear();
                }
            }
            _ => {
                if !self.is_generating {
                    self.topic.handle_key(key);
                }
            }
        }
        None
    }

    fn cycle_count(&mut self, step: isize) {
        if self.is_generating {
            return;
        }
        let position = QUESTION_COUNTS
            .iter()
            .position(|&n| n == self.num_questions)
            .unwrap_or(1) as isize;
        let next = (position + step).clamp(0, QUESTION_COUNTS.len() as isize - 1);
        self.num_questions = QUESTION_COUNTS[next as usize];
    }

    pub fn generate(&mut self) -> Option<ApiRequest> {
        if self.is_generating || self.topic.is_blank() {
            return None;
        }
        self.is_generating = true;
        self.error.clear();
        self.questions.clear();
        self.is_taking_quiz = false;
        self.show_results = false;
        self.selected_answers.clear();
        Some(ApiRequest::GenerateQuiz {
            topic: self.topic.value().trim().to_string(),
            num_questions: self.num_questions,
        })
    }

    pub fn on_generated(&mut self, questions: Vec<QuizQuestion>) {
        self.is_generating = false;
        self.questions = questions;
        self.is_taking_quiz = true;
        self.current_question = 0;
        self.highlighted = 0;
        self.results_scroll = 0;
    }

    pub fn on_failed(&mut self, detail: Option<String>) {
        self.is_generating = false;
        self.error = detail.unwrap_or_else(|| QUIZ_FAILED.to_string());
    }

    pub fn select_answer(&mut self, question_index: usize, answer: &str) {
        if question_index < self.questions.len() {
            self.selected_answers
                .insert(question_index, answer.to_string());
        }
    }

    fn select_highlighted(&mut self) {
        let option = self
            .questions
            .get(self.current_question)
            .and_then(|q| q.options.get(self.highlighted))
            .cloned();
        if let Some(option) = option {
            self.select_answer(self.current_question, &option);
        }
    }

    /// An answer is needed to move on, unless the question came back with no options.
    pub fn can_advance(&self) -> bool {
        self.selected_answers.contains_key(&self.current_question)
            || self
                .questions
                .get(self.current_question)
                .is_some_and(|q| q.options.is_empty())
    }

    /// Advance, or finish the quiz on the last question.
    pub fn next_question(&mut self) {
        if !self.can_advance() {
            return;
        }
        if self.current_question + 1 < self.questions.len() {
            self.current_question += 1;
            self.sync_highlight();
        } else {
            self.show_results = true;
            self.results_scroll = 0;
        }
    }

    pub fn previous_question(&mut self) {
        if self.current_question > 0 {
            self.current_question -= 1;
            self.sync_highlight();
        }
    }

    fn sync_highlight(&mut self) {
        self.highlighted = self
            .selected_answers
            .get(&self.current_question)
            .and_then(|selected| {
                self.questions[self.current_question]
                    .options
                    .iter()
                    .position(|option| option == selected)
            })
            .unwrap_or(0);
    }

    pub fn reset(&mut self) {
        self.questions.clear();
        self.is_taking_quiz = false;
        self.show_results = false;
        self.selected_answers.clear();
        self.current_question = 0;
        self.highlighted = 0;
        self.results_scroll = 0;
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question + 1 >= self.questions.len()
    }

    pub fn is_correct(&self, question_index: usize, answer: &str) -> bool {
        self.questions
            .get(question_index)
            .is_some_and(|q| q.correct_answer == answer)
    }

    pub fn score(&self) -> Score {
        let total = self.questions.len();
        let correct = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.selected_answers.get(i) == Some(&q.correct_answer))
            .count();
        let percentage = if total == 0 {
            0
        } else {
            (correct as f64 / total as f64 * 100.0).round() as u32
        };
        Score {
            correct,
            total,
            percentage,
        }
    }

    pub fn option_state(&self, question_index: usize, option: &str) -> OptionState {
        let selected = self
            .selected_answers
            .get(&question_index)
            .is_some_and(|s| s == option);

        if !self.show_results {
            return if selected {
                OptionState::Selected
            } else {
                OptionState::Plain
            };
        }

        if self.is_correct(question_index, option) {
            OptionState::Correct
        } else if selected {
            OptionState::Incorrect
        } else {
            OptionState::Plain
        }
    }
}
