use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One multiple-choice question as returned by `/generate_quiz/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One front/back card as returned by `/generate_flashcards/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Upload,
    Explain,
    Quiz,
    Flashcards,
}

impl View {
    pub const ALL: [View; 4] = [View::Upload, View::Explain, View::Quiz, View::Flashcards];

    pub fn title(self) -> &'static str {
        match self {
            View::Upload => "Upload PDF",
            View::Explain => "Explain",
            View::Quiz => "Quiz",
            View::Flashcards => "Flashcards",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Upload => 0,
            View::Explain => 1,
            View::Quiz => 2,
            View::Flashcards => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<View> {
        View::ALL.get(index).copied()
    }

    pub fn next(self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn previous(self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

/// Which view a request belongs to, so failures can be routed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Upload,
    Explain,
    Quiz,
    Flashcards,
    Health,
    /// Tagged with the upload generation the topics were asked for.
    Topics { generation: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    UploadPdf { path: PathBuf },
    Explain { question: String },
    GenerateQuiz { topic: String, num_questions: u32 },
    GenerateFlashcards { topic: String, num_cards: u32 },
    Health,
    Topics { generation: u64 },
}

impl ApiRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            ApiRequest::UploadPdf { .. } => RequestKind::Upload,
            ApiRequest::Explain { .. } => RequestKind::Explain,
            ApiRequest::GenerateQuiz { .. } => RequestKind::Quiz,
            ApiRequest::GenerateFlashcards { .. } => RequestKind::Flashcards,
            ApiRequest::Health => RequestKind::Health,
            ApiRequest::Topics { generation } => RequestKind::Topics {
                generation: *generation,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Uploaded {
        num_chunks: usize,
    },
    Explanation {
        answer: String,
    },
    Quiz {
        questions: Vec<QuizQuestion>,
    },
    Flashcards {
        cards: Vec<Flashcard>,
    },
    Health {
        status: String,
        message: String,
    },
    Topics {
        generation: u64,
        topics: Vec<String>,
    },
    Failed {
        kind: RequestKind,
        /// Server-provided `detail`, shown verbatim when present.
        detail: Option<String>,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl UploadStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycling_wraps() {
        assert_eq!(View::Flashcards.next(), View::Upload);
        assert_eq!(View::Upload.previous(), View::Flashcards);
        assert_eq!(View::Explain.next(), View::Quiz);
    }

    #[test]
    fn test_view_from_index() {
        assert_eq!(View::from_index(2), Some(View::Quiz));
        assert_eq!(View::from_index(4), None);
        for view in View::ALL {
            assert_eq!(View::from_index(view.index()), Some(view));
        }
    }

    #[test]
    fn test_quiz_question_without_explanation() {
        let json = r#"{"question":"Q?","options":["A","B"],"correct_answer":"A"}"#;
        let question: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question.explanation, None);
        assert_eq!(question.options.len(), 2);
    }

    #[test]
    fn test_request_kind() {
        let request = ApiRequest::GenerateQuiz {
            topic: "cells".to_string(),
            num_questions: 5,
        };
        assert_eq!(request.kind(), RequestKind::Quiz);
        assert_eq!(
            ApiRequest::Topics { generation: 3 }.kind(),
            RequestKind::Topics { generation: 3 }
        );
    }
}
