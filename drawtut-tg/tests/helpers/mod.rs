//! Shared helpers for drawtut-tg integration tests

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use drawtut_common::config::ContentRoot;
use drawtut_tg::types::{
    GenerativeBackend, InlineImage, ModelError, ModelPart, ModelReply, ModelRequest,
};
use drawtut_tg::AppState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Backend that replays a fixed reply script and records every request
///
/// Replies are consumed front-to-back, one per `generate` call; running
/// past the end of the script fails the call.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<ModelReply, ModelError>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<ModelReply, ModelError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All requests seen so far, in call order
    pub fn recorded_requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate(&self, request: ModelRequest) -> Result<ModelReply, ModelError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Network("reply script exhausted".to_string())))
    }
}

/// Reply with a single text part
pub fn text_reply(text: &str) -> Result<ModelReply, ModelError> {
    Ok(ModelReply {
        parts: vec![ModelPart::Text(text.to_string())],
    })
}

/// Reply with a single PNG image part whose bytes are `[tag; 8]`
pub fn image_reply(tag: u8) -> Result<ModelReply, ModelError> {
    Ok(ModelReply {
        parts: vec![ModelPart::Image(InlineImage::new("image/png", vec![tag; 8]))],
    })
}

/// A well-formed numbered plan with `n` entries
pub fn numbered_plan(n: usize) -> String {
    (1..=n)
        .map(|i| format!("{}. Step {} objective.", i, i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// App state over a temp content root; keep the TempDir alive for the test
pub fn test_app_state(backend: Arc<dyn GenerativeBackend>) -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let content = ContentRoot::new(dir.path().join("data"));
    content.ensure_directories().unwrap();
    (AppState::new(backend, &content), dir)
}

const BOUNDARY: &str = "drawtut-test-boundary";

/// Build a multipart POST to /api/generate-tutorial
///
/// Either field can be omitted to exercise validation.
pub fn tutorial_request(image: Option<&[u8]>, difficulty: Option<&str>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(level) = difficulty {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"difficulty\"\r\n\r\n{}\r\n",
                BOUNDARY, level
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/generate-tutorial")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
