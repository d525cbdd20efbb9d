use crate::api::{ApiError, StudyApi};
use crate::logger;
use crate::models::{ApiRequest, ApiResponse, RequestKind};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Receive requests from the UI loop and answer each one on its own task, so a
/// slow quiz generation never holds up a health check.
pub fn spawn_api_worker(
    api: Arc<dyn StudyApi>,
    api_tx: UnboundedSender<ApiResponse>,
    mut api_rx: UnboundedReceiver<ApiRequest>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(request) = api_rx.recv().await {
            logger::log(&format!("Worker received {:?} request", request.kind()));
            let api = Arc::clone(&api);
            let tx = api_tx.clone();
            tokio::spawn(async move {
                let response = handle_request(api.as_ref(), request).await;
                if tx.send(response).is_err() {
                    logger::log("UI loop gone, dropping response");
                }
            });
        }
        logger::log("Worker channel disconnected, exiting");
    })
}

pub async fn handle_request(api: &dyn StudyApi, request: ApiRequest) -> ApiResponse {
    let kind = request.kind();
    let result = match request {
        ApiRequest::UploadPdf { path } => upload(api, &path).await,
        ApiRequest::Explain { question } => api
            .explain(&question)
            .await
            .map(|answer| ApiResponse::Explanation { answer }),
        ApiRequest::GenerateQuiz {
            topic,
            num_questions,
        } => api
            .generate_quiz(&topic, num_questions)
            .await
            .map(|questions| ApiResponse::Quiz { questions }),
        ApiRequest::GenerateFlashcards { topic, num_cards } => api
            .generate_flashcards(&topic, num_cards)
            .await
            .map(|cards| ApiResponse::Flashcards { cards }),
        ApiRequest::Health => api.health().await.map(|health| ApiResponse::Health {
            status: health.status,
            message: health.message,
        }),
        ApiRequest::Topics { generation } => api
            .topics()
            .await
            .map(|topics| ApiResponse::Topics { generation, topics }),
    };

    match result {
        Ok(response) => {
            logger::log(&format!("{:?} request succeeded", kind));
            response
        }
        Err(e) => {
            logger::log(&format!("{:?} request failed: {}", kind, e));
            failure(kind, e)
        }
    }
}

async fn upload(api: &dyn StudyApi, path: &Path) -> Result<ApiResponse, ApiError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let content = tokio::fs::read(path).await?;
    let response = api.upload_pdf(&file_name, content).await?;
    Ok(ApiResponse::Uploaded {
        num_chunks: response.num_chunks,
    })
}

fn failure(kind: RequestKind, error: ApiError) -> ApiResponse {
    let detail = match &error {
        ApiError::Io(e) => Some(format!("Could not read file: {}", e)),
        other => other.detail().map(str::to_string),
    };
    ApiResponse::Failed {
        kind,
        detail,
        reason: error.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::{HealthResponse, UploadResponse};
    use crate::models::{Flashcard, QuizQuestion};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    /// In-memory backend that records what it was asked.
    #[derive(Default)]
    pub(crate) struct MockApi {
        pub calls: Mutex<Vec<String>>,
        pub fail_with: Option<(u16, String)>,
    }

    impl MockApi {
        pub fn failing(status: u16, body: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some((status, body.to_string())),
            }
        }

        fn record(&self, call: String) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some((status, body)) => Err(ApiError::server(*status, body.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl StudyApi for MockApi {
        async fn upload_pdf(
            &self,
            file_name: &str,
            content: Vec<u8>,
        ) -> Result<UploadResponse, ApiError> {
            self.record(format!("upload {} {}", file_name, content.len()))?;
            Ok(UploadResponse {
                num_chunks: 4,
                message: "PDF processed and chunks stored for retrieval.".to_string(),
            })
        }

        async fn explain(&self, question: &str) -> Result<String, ApiError> {
            self.record(format!("explain {}", question))?;
            Ok(format!("Simply put: {}", question))
        }

        async fn generate_quiz(
            &self,
            topic: &str,
            num_questions: u32,
        ) -> Result<Vec<QuizQuestion>, ApiError> {
            self.record(format!("quiz {} {}", topic, num_questions))?;
            Ok((0..num_questions)
                .map(|i| QuizQuestion {
                    question: format!("{} question {}?", topic, i + 1),
                    options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    correct_answer: "A".into(),
                    explanation: None,
                })
                .collect())
        }

        async fn generate_flashcards(
            &self,
            topic: &str,
            num_cards: u32,
        ) -> Result<Vec<Flashcard>, ApiError> {
            self.record(format!("flashcards {} {}", topic, num_cards))?;
            Ok((0..num_cards)
                .map(|i| Flashcard {
                    front: format!("{} term {}", topic, i + 1),
                    back: format!("definition {}", i + 1),
                })
                .collect())
        }

        async fn health(&self) -> Result<HealthResponse, ApiError> {
            self.record("health".to_string())?;
            Ok(HealthResponse {
                status: "healthy".to_string(),
                message: "Study Buddy API is running".to_string(),
            })
        }

        async fn topics(&self) -> Result<Vec<String>, ApiError> {
            self.record("topics".to_string())?;
            Ok(vec!["Cells are the basic...".to_string()])
        }
    }

    #[tokio::test]
    async fn test_handle_explain() {
        let api = MockApi::default();
        let response = handle_request(
            &api,
            ApiRequest::Explain {
                question: "What is ML?".to_string(),
            },
        )
        .await;
        assert_eq!(
            response,
            ApiResponse::Explanation {
                answer: "Simply put: What is ML?".to_string()
            }
        );
        assert_eq!(*api.calls.lock().unwrap(), vec!["explain What is ML?"]);
    }

    #[tokio::test]
    async fn test_handle_quiz_and_flashcards() {
        let api = MockApi::default();
        let quiz = handle_request(
            &api,
            ApiRequest::GenerateQuiz {
                topic: "cells".to_string(),
                num_questions: 3,
            },
        )
        .await;
        assert!(matches!(quiz, ApiResponse::Quiz { ref questions } if questions.len() == 3));

        let cards = handle_request(
            &api,
            ApiRequest::GenerateFlashcards {
                topic: "cells".to_string(),
                num_cards: 5,
            },
        )
        .await;
        assert!(matches!(cards, ApiResponse::Flashcards { ref cards } if cards.len() == 5));
    }

    #[tokio::test]
    async fn test_upload_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chapter1.pdf");
        std::fs::write(&path, b"%PDF-1.4 hello").unwrap();

        let api = MockApi::default();
        let response = handle_request(&api, ApiRequest::UploadPdf { path }).await;
        assert_eq!(response, ApiResponse::Uploaded { num_chunks: 4 });
        assert_eq!(*api.calls.lock().unwrap(), vec!["upload chapter1.pdf 14"]);
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let api = MockApi::default();
        let response = handle_request(
            &api,
            ApiRequest::UploadPdf {
                path: dir.path().join("missing.pdf"),
            },
        )
        .await;
        match response {
            ApiResponse::Failed { kind, detail, .. } => {
                assert_eq!(kind, RequestKind::Upload);
                assert!(detail.unwrap().starts_with("Could not read file"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_failure_keeps_detail() {
        let api = MockApi::failing(500, r#"{"detail": "Gemini quota exceeded"}"#);
        let response = handle_request(
            &api,
            ApiRequest::Explain {
                question: "x".to_string(),
            },
        )
        .await;
        match response {
            ApiResponse::Failed {
                kind,
                detail,
                reason,
            } => {
                assert_eq!(kind, RequestKind::Explain);
                assert_eq!(detail.as_deref(), Some("Gemini quota exceeded"));
                assert!(reason.contains("500"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_topics_failure_keeps_generation() {
        let api = MockApi::failing(503, "unavailable");
        let response = handle_request(&api, ApiRequest::Topics { generation: 7 }).await;
        assert!(matches!(
            response,
            ApiResponse::Failed {
                kind: RequestKind::Topics { generation: 7 },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_worker_round_trip_over_channels() {
        let api: Arc<dyn StudyApi> = Arc::new(MockApi::default());
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = spawn_api_worker(api, resp_tx, req_rx);

        req_tx.send(ApiRequest::Health).unwrap();
        let response = resp_rx.recv().await.unwrap();
        assert_eq!(
            response,
            ApiResponse::Health {
                status: "healthy".to_string(),
                message: "Study Buddy API is running".to_string()
            }
        );

        drop(req_tx);
        handle.await.unwrap();
    }
}
