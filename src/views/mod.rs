mod explain;
mod flashcards;
mod quiz;
mod upload;

pub use explain::{ExplainView, EXAMPLE_QUESTIONS, EXPLAIN_FAILED};
pub use flashcards::{FlashcardView, CARD_COUNTS, FLASHCARDS_FAILED};
pub use quiz::{OptionState, QuizView, Score, QUESTION_COUNTS, QUIZ_FAILED};
pub use upload::{UploadView, NOT_A_PDF, UPLOAD_FAILED};
