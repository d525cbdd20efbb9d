use crate::logger;
use crate::models::{ApiRequest, ApiResponse, RequestKind, View};
use crate::views::{ExplainView, FlashcardView, QuizView, UploadView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Unknown,
    Checking,
    Online(String),
    Offline(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicsState {
    NotLoaded,
    Loading,
    Loaded,
}

/// Entries `GET /topics` returns when there is nothing to suggest.
const PLACEHOLDER_TOPICS: [&str; 2] = [
    "Upload a PDF first to see topics",
    "No documents available",
];

/// Topic suggestions taken from the uploaded material.
#[derive(Debug)]
pub struct TopicSuggestions {
    pub items: Vec<String>,
    pub state: TopicsState,
    /// Backend placeholder shown instead of suggestions.
    pub hint: Option<String>,
    /// Bumped on every upload; older responses are dropped.
    generation: u64,
    next: usize,
}

impl Default for TopicSuggestions {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: TopicsState::NotLoaded,
            hint: None,
            generation: 0,
            next: 0,
        }
    }
}

impl TopicSuggestions {
    /// Next suggestion, cycling. Suggestions end in "..." on the server, which is trimmed.
    pub fn next_suggestion(&mut self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        let item = &self.items[self.next % self.items.len()];
        self.next = (self.next + 1) % self.items.len();
        Some(item.trim_end_matches("...").trim().to_string())
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state == TopicsState::Loading && generation == self.generation
    }

    fn load(&mut self, topics: Vec<String>) {
        let (placeholders, items): (Vec<String>, Vec<String>) = topics
            .into_iter()
            .partition(|topic| PLACEHOLDER_TOPICS.contains(&topic.as_str()));
        self.hint = placeholders.into_iter().next();
        self.items = items;
        self.state = TopicsState::Loaded;
        self.next = 0;
    }

    fn invalidate(&mut self) {
        self.items.clear();
        self.hint = None;
        self.state = TopicsState::NotLoaded;
        self.generation += 1;
        self.next = 0;
    }
}

#[derive(Debug)]
pub struct App {
    pub view: View,
    pub upload: UploadView,
    pub explain: ExplainView,
    pub quiz: QuizView,
    pub flashcards: FlashcardView,
    pub backend: BackendStatus,
    pub topics: TopicSuggestions,
    pub api_url: String,
    pub tick: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            view: View::Upload,
            upload: UploadView::new(),
            explain: ExplainView::new(),
            quiz: QuizView::new(),
            flashcards: FlashcardView::new(),
            backend: BackendStatus::Unknown,
            topics: TopicSuggestions::default(),
            api_url: api_url.into(),
            tick: 0,
            should_quit: false,
        }
    }

    pub fn startup_requests(&mut self) -> Vec<ApiRequest> {
        self.check_health().into_iter().collect()
    }

    /// Whether the active view has a focused text field eating plain characters.
    pub fn captures_text(&self) -> bool {
        match self.view {
            View::Upload | View::Explain => true,
            View::Quiz => !self.quiz.is_active(),
            View::Flashcards => !self.flashcards.is_active() || self.flashcards.jump.is_some(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.upload.is_uploading
            || self.explain.is_loading
            || self.quiz.is_generating
            || self.flashcards.is_generating
            || self.backend == BackendStatus::Checking
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<ApiRequest> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return Vec::new();
                }
                KeyCode::Char('h') => return self.check_health().into_iter().collect(),
                KeyCode::Char('t') => {
                    self.fill_topic_suggestion();
                    return Vec::new();
                }
                _ => {}
            }
        }

        let target = match key.code {
            KeyCode::F(n @ 1..=4) => View::from_index(n as usize - 1),
            KeyCode::Tab => Some(self.view.next()),
            KeyCode::BackTab => Some(self.view.previous()),
            KeyCode::Char(c @ '1'..='4') if !ctrl && !self.captures_text() => {
                View::from_index(c as usize - '1' as usize)
            }
            _ => None,
        };
        if let Some(view) = target {
            return self.switch_to(view).into_iter().collect();
        }

        let request = match self.view {
            View::Upload => self.upload.handle_key(key),
            View::Explain => self.explain.handle_key(key),
            View::Quiz => self.quiz.handle_key(key),
            View::Flashcards => self.flashcards.handle_key(key),
        };
        let mut requests: Vec<ApiRequest> = request.into_iter().collect();
        // Leaving a quiz or card set lands back on the setup form.
        requests.extend(self.request_topics_if_needed());
        requests
    }

    pub fn switch_to(&mut self, view: View) -> Option<ApiRequest> {
        if self.view != view {
            logger::log(&format!("Switching to {}", view.title()));
        }
        self.view = view;
        self.request_topics_if_needed()
    }

    fn check_health(&mut self) -> Option<ApiRequest> {
        if self.backend == BackendStatus::Checking {
            return None;
        }
        self.backend = BackendStatus::Checking;
        Some(ApiRequest::Health)
    }

    fn showing_setup_form(&self) -> bool {
        match self.view {
            View::Quiz => !self.quiz.is_active(),
            View::Flashcards => !self.flashcards.is_active(),
            _ => false,
        }
    }

    fn request_topics_if_needed(&mut self) -> Option<ApiRequest> {
        if self.showing_setup_form() && self.topics.state == TopicsState::NotLoaded {
            self.topics.state = TopicsState::Loading;
            return Some(ApiRequest::Topics {
                generation: self.topics.generation,
            });
        }
        None
    }

    fn fill_topic_suggestion(&mut self) {
        if !self.showing_setup_form() {
            return;
        }
        let Some(topic) = self.topics.next_suggestion() else {
            return;
        };
        match self.view {
            View::Quiz if !self.quiz.is_generating => self.quiz.topic.set(&topic),
            View::Flashcards if !self.flashcards.is_generating => {
                self.flashcards.topic.set(&topic)
            }
            _ => {}
        }
    }

    /// Apply a worker response. May return a follow-up request when new
    /// material lands while a setup form is showing.
    pub fn handle_response(&mut self, response: ApiResponse) -> Option<ApiRequest> {
        match response {
            ApiResponse::Uploaded { num_chunks } => {
                self.upload.on_uploaded(num_chunks);
                // New material means new topics.
                self.topics.invalidate();
                return self.request_topics_if_needed();
            }
            ApiResponse::Explanation { answer } => self.explain.on_answer(answer),
            ApiResponse::Quiz { questions } => self.quiz.on_generated(questions),
            ApiResponse::Flashcards { cards } => self.flashcards.on_generated(cards),
            ApiResponse::Health { status, message } => {
                let summary = if message.is_empty() { status } else { message };
                self.backend = BackendStatus::Online(summary);
            }
            ApiResponse::Topics { generation, topics } => {
                if self.topics.is_current(generation) {
                    self.topics.load(topics);
                } else {
                    logger::log(&format!("Dropping stale topics from generation {}", generation));
                }
            }
            ApiResponse::Failed {
                kind,
                detail,
                reason,
            } => match kind {
                RequestKind::Upload => self.upload.on_failed(detail),
                RequestKind::Explain => self.explain.on_failed(detail),
                RequestKind::Quiz => self.quiz.on_failed(detail),
                RequestKind::Flashcards => self.flashcards.on_failed(detail),
                RequestKind::Health => self.backend = BackendStatus::Offline(reason),
                RequestKind::Topics { generation } => {
                    if self.topics.is_current(generation) {
                        self.topics.load(Vec::new());
                    }
                }
            },
        }
        None
    }
}
