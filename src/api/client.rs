use crate::api::error::ApiError;
use crate::api::types::{
    ExplainRequest, ExplainResponse, FlashcardRequest, FlashcardResponse, HealthResponse,
    QuizRequest, QuizResponse, TopicsResponse, UploadResponse,
};
use crate::config::Config;
use crate::logger;
use crate::models::{Flashcard, QuizQuestion};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const UPLOAD_PATH: &str = "upload_pdf/";
pub const EXPLAIN_PATH: &str = "explain/";
pub const QUIZ_PATH: &str = "generate_quiz/";
pub const FLASHCARDS_PATH: &str = "generate_flashcards/";
pub const HEALTH_PATH: &str = "health";
pub const TOPICS_PATH: &str = "topics";

/// The backend calls the views depend on.
#[async_trait]
pub trait StudyApi: Send + Sync {
    async fn upload_pdf(&self, file_name: &str, content: Vec<u8>)
        -> Result<UploadResponse, ApiError>;

    async fn explain(&self, question: &str) -> Result<String, ApiError>;

    async fn generate_quiz(
        &self,
        topic: &str,
        num_questions: u32,
    ) -> Result<Vec<QuizQuestion>, ApiError>;

    async fn generate_flashcards(
        &self,
        topic: &str,
        num_cards: u32,
    ) -> Result<Vec<Flashcard>, ApiError>;

    async fn health(&self) -> Result<HealthResponse, ApiError>;

    async fn topics(&self) -> Result<Vec<String>, ApiError>;
}

/// reqwest-backed client for a running Study Buddy API.
#[derive(Debug, Clone)]
pub struct StudyApiClient {
    client: Client,
    base_url: String,
}

impl StudyApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "{} (must start with http:// or https://)",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        logger::log(&format!("POST {}", url));
        let response = self.client.post(&url).json(body).send().await?;
        decode(response).await
    }

    async fn get_json<R>(&self, path: &str) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let url = self.url(path);
        logger::log(&format!("GET {}", url));
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        logger::log(&format!("Request failed with {}: {}", status, body));
        return Err(ApiError::server(status.as_u16(), body));
    }
    Ok(response.json::<R>().await?)
}

#[async_trait]
impl StudyApi for StudyApiClient {
    async fn upload_pdf(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let url = self.url(UPLOAD_PATH);
        logger::log(&format!(
            "POST {} ({}, {} bytes)",
            url,
            file_name,
            content.len()
        ));

        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        decode(response).await
    }

    async fn explain(&self, question: &str) -> Result<String, ApiError> {
        let response: ExplainResponse = self
            .post_json(EXPLAIN_PATH, &ExplainRequest { question })
            .await?;
        Ok(response.answer)
    }

    async fn generate_quiz(
        &self,
        topic: &str,
        num_questions: u32,
    ) -> Result<Vec<QuizQuestion>, ApiError> {
        let response: QuizResponse = self
            .post_json(
                QUIZ_PATH,
                &QuizRequest {
                    topic,
                    num_questions,
                },
            )
            .await?;
        Ok(response.questions)
    }

    async fn generate_flashcards(
        &self,
        topic: &str,
        num_cards: u32,
    ) -> Result<Vec<Flashcard>, ApiError> {
        let response: FlashcardResponse = self
            .post_json(FLASHCARDS_PATH, &FlashcardRequest { topic, num_cards })
            .await?;
        Ok(response.cards)
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json(HEALTH_PATH).await
    }

    async fn topics(&self) -> Result<Vec<String>, ApiError> {
        let response: TopicsResponse = self.get_json(TOPICS_PATH).await?;
        Ok(response.topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one canned HTTP response and hand back the raw request.
    async fn serve_once(status: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let lower = line.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&request).to_string());
        });

        (format!("http://{}", addr), rx)
    }

    fn client_for(base_url: &str) -> StudyApiClient {
        StudyApiClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_joining_ignores_slashes() {
        let client = client_for("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("explain/"), "http://localhost:8000/explain/");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn test_rejects_url_without_scheme() {
        let result = StudyApiClient::new("localhost:8000", Duration::from_secs(5));
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_config_uses_configured_url() {
        let config = Config {
            api_url: "https://buddy.example.com".to_string(),
            ..Config::default()
        };
        let client = StudyApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://buddy.example.com");
    }

    #[tokio::test]
    async fn test_explain_posts_question() {
        let (base, request) = serve_once("200 OK", r#"{"answer": "Plants make sugar."}"#).await;
        let answer = client_for(&base).explain("What is photosynthesis?").await.unwrap();
        assert_eq!(answer, "Plants make sugar.");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /explain/ HTTP/1.1"));
        assert!(raw.contains(r#"{"question":"What is photosynthesis?"}"#));
    }

    #[tokio::test]
    async fn test_generate_quiz_returns_questions() {
        let body = r#"{"questions": [{"question": "Q1?", "options": ["A", "B"], "correct_answer": "B"}]}"#;
        let (base, request) = serve_once("200 OK", body).await;
        let questions = client_for(&base).generate_quiz("cells", 3).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "B");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /generate_quiz/ HTTP/1.1"));
        assert!(raw.contains(r#""num_questions":3"#));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"num_chunks": 7, "message": "PDF processed and chunks stored for retrieval."}"#,
        )
        .await;
        let response = client_for(&base)
            .upload_pdf("notes.pdf", b"%PDF-1.4 test".to_vec())
            .await
            .unwrap();
        assert_eq!(response.num_chunks, 7);

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /upload_pdf/ HTTP/1.1"));
        assert!(raw.contains("multipart/form-data"));
        assert!(raw.contains(r#"name="file"; filename="notes.pdf""#));
        assert!(raw.contains("application/pdf"));
        assert!(raw.contains("%PDF-1.4 test"));
    }

    #[tokio::test]
    async fn test_server_error_carries_detail() {
        let (base, _request) = serve_once(
            "400 Bad Request",
            r#"{"detail": "Only PDF files are supported."}"#,
        )
        .await;
        let err = client_for(&base)
            .upload_pdf("notes.pdf", Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.detail(), Some("Only PDF files are supported."));
        assert!(matches!(err, ApiError::Server { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_health_and_topics() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"status": "healthy", "message": "Study Buddy API is running"}"#,
        )
        .await;
        let health = client_for(&base).health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert!(request.await.unwrap().starts_with("GET /health HTTP/1.1"));

        let (base, _request) = serve_once("200 OK", r#"{"topics": ["Mitochondria are the..."]}"#).await;
        let topics = client_for(&base).topics().await.unwrap();
        assert_eq!(topics, vec!["Mitochondria are the..."]);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_http_error() {
        let (base, _request) = serve_once("200 OK", r#"{"unexpected": true}"#).await;
        let err = client_for(&base).generate_flashcards("x", 5).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert_eq!(err.detail(), None);
    }
}
