//! Request and response bodies of the Study Buddy API.

use crate::models::{Flashcard, QuizQuestion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainResponse {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizRequest<'a> {
    pub topic: &'a str,
    pub num_questions: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlashcardRequest<'a> {
    pub topic: &'a str,
    pub num_cards: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlashcardResponse {
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub num_chunks: usize,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicsResponse {
    pub topics: Vec<String>,
}
