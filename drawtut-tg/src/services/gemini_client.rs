//! Gemini API client
//!
//! Thin adapter over the `generateContent` endpoint. Requests carry the
//! prompt plus inline reference images; responses are decoded exactly once
//! into [`ModelReply`] parts at this boundary.

use crate::types::{GenerativeBackend, InlineImage, ModelError, ModelPart, ModelReply, ModelRequest};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const TEXT_MODEL: &str = "gemini-2.5-flash";
const IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct WireContent {
    role: &'static str,
    parts: Vec<WireRequestPart>,
}

#[derive(Debug, Serialize)]
struct WireRequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireInlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    /// Base64-encoded payload
    data: String,
}

/// Response body for `generateContent`
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<WireCandidate>>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireResponseContent>,
}

#[derive(Debug, Deserialize)]
struct WireResponseContent {
    parts: Option<Vec<WireResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct WireResponsePart {
    text: Option<String>,
    #[serde(rename = "inlineData", alias = "inline_data")]
    inline_data: Option<WireInlineData>,
}

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, ModelError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ModelError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    fn build_body(request: &ModelRequest) -> GenerateContentRequest {
        let mut parts = vec![WireRequestPart {
            text: Some(request.prompt.clone()),
            inline_data: None,
        }];

        for image in &request.images {
            parts.push(WireRequestPart {
                text: None,
                inline_data: Some(WireInlineData {
                    mime_type: image.mime_type.clone(),
                    data: BASE64.encode(&image.bytes),
                }),
            });
        }

        GenerateContentRequest {
            contents: vec![WireContent {
                role: "user",
                parts,
            }],
            generation_config: request.expect_image.then(|| GenerationConfig {
                response_modalities: vec!["IMAGE", "TEXT"],
            }),
        }
    }

    fn decode_reply(response: GenerateContentResponse) -> Result<ModelReply, ModelError> {
        let mut parts = Vec::new();

        for candidate in response.candidates.unwrap_or_default() {
            let wire_parts = candidate
                .content
                .and_then(|content| content.parts)
                .unwrap_or_default();

            for part in wire_parts {
                if let Some(text) = part.text {
                    parts.push(ModelPart::Text(text));
                }
                if let Some(inline) = part.inline_data {
                    let bytes = BASE64
                        .decode(inline.data.as_bytes())
                        .map_err(|e| ModelError::Decode(format!("inline image base64: {}", e)))?;
                    parts.push(ModelPart::Image(InlineImage::new(inline.mime_type, bytes)));
                }
            }
        }

        Ok(ModelReply { parts })
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, request: ModelRequest) -> Result<ModelReply, ModelError> {
        let model = if request.expect_image {
            IMAGE_MODEL
        } else {
            TEXT_MODEL
        };
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = Self::build_body(&request);

        tracing::debug!(
            model = model,
            images = request.images.len(),
            "Calling generative API"
        );

        let response = self
            .http_client
            .post(&url)
            .header("X-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::Api(status.as_u16(), error_text));
        }

        let decoded: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;

        Self::decode_reply(decoded)
    }
}
