use crate::input::TextInput;
use crate::models::{ApiRequest, Flashcard};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashMap;

pub const FLASHCARDS_FAILED: &str = "Failed to generate flashcards. Please try again.";
pub const CARD_COUNTS: [u32; 4] = [5, 10, 15, 20];
pub const DEFAULT_CARD_COUNT: u32 = 10;
const PAGE_JUMP: usize = 5;

#[derive(Debug)]
pub struct FlashcardView {
    pub topic: TextInput,
    pub num_cards: u32,
    pub cards: Vec<Flashcard>,
    pub is_generating: bool,
    pub is_studying: bool,
    pub current_card: usize,
    pub flipped: HashMap<usize, bool>,
    pub error: String,
    /// Card number being typed after `g`, 1-based.
    pub jump: Option<String>,
}

impl Default for FlashcardView {
    fn default() -> Self {
        Self {
            topic: TextInput::new(),
            num_cards: DEFAULT_CARD_COUNT,
            cards: Vec::new(),
            is_generating: false,
            is_studying: false,
            current_card: 0,
            flipped: HashMap::new(),
            error: String::new(),
            jump: None,
        }
    }
}

impl FlashcardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.is_studying && !self.cards.is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ApiRequest> {
        if !self.is_active() {
            return self.handle_setup_key(key);
        }
        if self.jump.is_some() {
            self.handle_jump_key(key);
            return None;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('f') => {
                self.flip(self.current_card)
            }
            KeyCode::Right => self.next_card(),
            KeyCode::Left => self.previous_card(),
            KeyCode::Home => self.go_to_card(0),
            KeyCode::End => self.go_to_card(self.cards.len() - 1),
            KeyCode::PageDown => {
                let target = (self.current_card + PAGE_JUMP).min(self.cards.len() - 1);
                self.go_to_card(target);
            }
            KeyCode::PageUp => self.go_to_card(self.current_card.saturating_sub(PAGE_JUMP)),
            KeyCode::Char('g') => self.jump = Some(String::new()),
            KeyCode::Char('r') => self.reset(),
            _ => {}
        }
        None
    }

    fn handle_jump_key(&mut self, key: KeyEvent) {
        let Some(typed) = self.jump.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() && typed.len() < 4 => typed.push(c),
            KeyCode::Backspace => {
                typed.pop();
            }
            KeyCode::Enter => {
                if let Some(number) = self.jump.take().and_then(|t| t.parse::<usize>().ok())
                    && number > 0
                {
                    self.go_to_card(number - 1);
                }
            }
            KeyCode::Esc => self.jump = None,
            _ => {}
        }
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
        let position = CARD_COUNTS
            .iter()
            .position(|&n| n == self.num_cards)
            .unwrap_or(1) as isize;
        let next = (position + step).clamp(0, CARD_COUNTS.len() as isize - 1);
        self.num_cards = CARD_COUNTS[next as usize];
    }

    pub fn generate(&mut self) -> Option<ApiRequest> {
        if self.is_generating || self.topic.is_blank() {
            return None;
        }
        self.is_generating = true;
        self.error.clear();
        self.cards.clear();
        self.is_studying = false;
        self.flipped.clear();
        self.current_card = 0;
        Some(ApiRequest::GenerateFlashcards {
            topic: self.topic.value().trim().to_string(),
            num_cards: self.num_cards,
        })
    }

    pub fn on_generated(&mut self, cards: Vec<Flashcard>) {
        self.is_generating = false;
        self.cards = cards;
        self.is_studying = true;
    }

    pub fn on_failed(&mut self, detail: Option<String>) {
        self.is_generating = false;
        self.error = detail.unwrap_or_else(|| FLASHCARDS_FAILED.to_string());
    }

    pub fn flip(&mut self, card_index: usize) {
        if card_index < self.cards.len() {
            let entry = self.flipped.entry(card_index).or_insert(false);
            *entry = !*entry;
        }
    }

    pub fn is_flipped(&self, card_index: usize) -> bool {
        self.flipped.get(&card_index).copied().unwrap_or(false)
    }

    pub fn flipped_count(&self) -> usize {
        self.flipped.values().filter(|&&flipped| flipped).count()
    }

    pub fn next_card(&mut self) {
        if self.current_card + 1 < self.cards.len() {
            self.current_card += 1;
        }
    }

    pub fn previous_card(&mut self) {
        if self.current_card > 0 {
            self.current_card -= 1;
        }
    }

    pub fn go_to_card(&mut self, index: usize) {
        if index < self.cards.len() {
            self.current_card = index;
        }
    }

    pub fn reset(&mut self) {
        self.cards.clear();
        self.is_studying = false;
        self.flipped.clear();
        self.current_card = 0;
        self.jump = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn studying(n: usize) -> FlashcardView {
        let mut view = FlashcardView::new();
        view.topic.set("vocabulary");
        view.generate().unwrap();
        view.on_generated(
            (0..n)
                .map(|i| Flashcard {
                    front: format!("front {}", i),
                    back: format!("back {}", i),
                })
                .collect(),
        );
        view
    }

    #[test]
    fn test_generate_request() {
        let mut view = FlashcardView::new();
        view.topic.set(" definitions ");
        view.handle_key(key(KeyCode::Down));
        assert_eq!(
            view.handle_key(key(KeyCode::Enter)),
            Some(ApiRequest::GenerateFlashcards {
                topic: "definitions".to_string(),
                num_cards: 15
            })
        );
        assert!(view.is_generating);
    }

    #[test]
    fn test_blank_topic_sends_nothing() {
        let mut view = FlashcardView::new();
        assert_eq!(view.generate(), None);
        assert!(!view.is_generating);
    }

    #[test]
    fn test_count_selector_clamps() {
        let mut view = FlashcardView::new();
        assert_eq!(view.num_cards, 10);
        for _ in 0..3 {
            view.handle_key(key(KeyCode::Up));
        }
        assert_eq!(view.num_cards, 5);
        for _ in 0..6 {
            view.handle_key(key(KeyCode::Down));
        }
        assert_eq!(view.num_cards, 20);
    }

    #[test]
    fn test_flip_twice_restores() {
        let mut view = studying(3);
        view.handle_key(key(KeyCode::Char(' ')));
        assert!(view.is_flipped(0));
        assert_eq!(view.flipped_count(), 1);
        view.handle_key(key(KeyCode::Enter));
        assert!(!view.is_flipped(0));
        assert_eq!(view.flipped_count(), 0);
    }

    #[test]
    fn test_flipped_count_only_counts_true() {
        let mut view = studying(4);
        view.flip(0);
        view.flip(1);
        view.flip(2);
        view.flip(1);
        assert_eq!(view.flipped.len(), 3);
        assert_eq!(view.flipped_count(), 2);
    }

    #[test]
    fn test_flip_out_of_range_ignored() {
        let mut view = studying(2);
        view.flip(9);
        assert!(view.flipped.is_empty());
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut view = studying(3);
        view.handle_key(key(KeyCode::Left));
        assert_eq!(view.current_card, 0);
        for _ in 0..5 {
            view.handle_key(key(KeyCode::Right));
        }
        assert_eq!(view.current_card, 2);
        view.handle_key(key(KeyCode::Home));
        assert_eq!(view.current_card, 0);
        view.handle_key(key(KeyCode::End));
        assert_eq!(view.current_card, 2);
    }

    #[test]
    fn test_page_jumps() {
        let mut view = studying(12);
        view.handle_key(key(KeyCode::PageDown));
        assert_eq!(view.current_card, 5);
        view.handle_key(key(KeyCode::PageDown));
        view.handle_key(key(KeyCode::PageDown));
        assert_eq!(view.current_card, 11);
        view.handle_key(key(KeyCode::PageUp));
        assert_eq!(view.current_card, 6);
    }

    #[test]
    fn test_go_to_card_ignores_out_of_range() {
        let mut view = studying(3);
        view.go_to_card(2);
        assert_eq!(view.current_card, 2);
        view.go_to_card(3);
        assert_eq!(view.current_card, 2);
    }

    #[test]
    fn test_flip_state_is_per_card() {
        let mut view = studying(3);
        view.flip(0);
        view.next_card();
        assert!(!view.is_flipped(view.current_card));
        view.previous_card();
        assert!(view.is_flipped(view.current_card));
    }

    #[test]
    fn test_reset_and_regenerate_clears_flips() {
        let mut view = studying(3);
        view.flip(1);
        view.go_to_card(2);
        view.handle_key(key(KeyCode::Char('r')));
        assert!(!view.is_active());
        assert_eq!(view.current_card, 0);
        assert_eq!(view.flipped_count(), 0);

        view.generate();
        assert!(view.cards.is_empty());
        view.on_failed(None);
        assert_eq!(view.error, FLASHCARDS_FAILED);
    }

    #[test]
    fn test_jump_to_typed_card_number() {
        let mut view = studying(12);
        view.handle_key(key(KeyCode::Char('g')));
        view.handle_key(key(KeyCode::Char('1')));
        view.handle_key(key(KeyCode::Char('1')));
        assert_eq!(view.jump.as_deref(), Some("11"));
        view.handle_key(key(KeyCode::Enter));
        assert_eq!(view.current_card, 10);
        assert!(view.jump.is_none());

        // Letters are ignored while typing; out-of-range numbers leave the card alone.
        view.handle_key(key(KeyCode::Char('g')));
        view.handle_key(key(KeyCode::Char('f')));
        view.handle_key(key(KeyCode::Char('4')));
        view.handle_key(key(KeyCode::Char('0')));
        view.handle_key(key(KeyCode::Enter));
        assert_eq!(view.current_card, 10);
        assert!(!view.is_flipped(10));

        view.handle_key(key(KeyCode::Char('g')));
        view.handle_key(key(KeyCode::Char('0')));
        view.handle_key(key(KeyCode::Enter));
        assert_eq!(view.current_card, 10);
    }

    #[test]
    fn test_jump_prompt_cancel_and_backspace() {
        let mut view = studying(5);
        view.handle_key(key(KeyCode::Char('g')));
        view.handle_key(key(KeyCode::Char('4')));
        view.handle_key(key(KeyCode::Backspace));
        view.handle_key(key(KeyCode::Char('3')));
        view.handle_key(key(KeyCode::Esc));
        assert!(view.jump.is_none());
        assert_eq!(view.current_card, 0);

        view.handle_key(key(KeyCode::Char('g')));
        view.handle_key(key(KeyCode::Char('3')));
        view.handle_key(key(KeyCode::Enter));
        assert_eq!(view.current_card, 2);
    }

    #[test]
    fn test_empty_card_list_keeps_setup_form() {
        let mut view = FlashcardView::new();
        view.topic.set("x");
        view.generate();
        view.on_generated(Vec::new());
        assert!(!view.is_active());
        assert_eq!(view.handle_key(key(KeyCode::End)), None);
    }
}
