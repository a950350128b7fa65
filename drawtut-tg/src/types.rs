//! Base types for generative model calls
//!
//! The external API is treated as an opaque capability: given a prompt and
//! optional reference images, it returns text parts and/or inline image
//! parts. Responses are decoded once, at the adapter boundary, into
//! [`ModelReply`]; nothing downstream inspects raw response JSON.

use async_trait::async_trait;
use thiserror::Error;

/// An image payload passed inline to or returned inline from the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// MIME type (e.g., "image/png")
    pub mime_type: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// A single generation request
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Instruction prompt
    pub prompt: String,
    /// Reference images sent inline, in order
    pub images: Vec<InlineImage>,
    /// Route to the image-capable model and request image output
    pub expect_image: bool,
}

impl ModelRequest {
    /// Text-output request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            images: Vec::new(),
            expect_image: false,
        }
    }

    /// Image-output request
    pub fn image(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            images: Vec::new(),
            expect_image: true,
        }
    }

    /// Attach a reference image
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.images.push(image);
        self
    }
}

/// One decoded part of a model reply
#[derive(Debug, Clone)]
pub enum ModelPart {
    /// Text content
    Text(String),
    /// Inline image content
    Image(InlineImage),
}

/// A decoded model reply
///
/// An empty reply (no candidates, or candidates with no parts) decodes to
/// an empty part list rather than an error; callers decide whether a
/// missing part is fatal or degraded.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    pub parts: Vec<ModelPart>,
}

impl ModelReply {
    /// First non-empty text part, if any
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            ModelPart::Text(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
    }

    /// First inline image part, if any
    pub fn first_image(&self) -> Option<&InlineImage> {
        self.parts.iter().find_map(|part| match part {
            ModelPart::Image(image) => Some(image),
            _ => None,
        })
    }
}

/// Generative backend errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Generation capability injected into every pipeline component
///
/// Constructed once at startup and shared; components never reach for a
/// process-wide client.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: ModelRequest) -> Result<ModelReply, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_skips_images_and_empty_text() {
        let reply = ModelReply {
            parts: vec![
                ModelPart::Image(InlineImage::new("image/png", vec![1])),
                ModelPart::Text(String::new()),
                ModelPart::Text("hello".to_string()),
            ],
        };
        assert_eq!(reply.first_text(), Some("hello"));
    }

    #[test]
    fn first_image_skips_text() {
        let reply = ModelReply {
            parts: vec![
                ModelPart::Text("caption".to_string()),
                ModelPart::Image(InlineImage::new("image/png", vec![9, 9])),
            ],
        };
        assert_eq!(reply.first_image().unwrap().bytes, vec![9, 9]);
    }

    #[test]
    fn empty_reply_has_no_parts() {
        let reply = ModelReply::default();
        assert!(reply.first_text().is_none());
        assert!(reply.first_image().is_none());
    }
}
