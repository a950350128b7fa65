//! Filesystem store for generated image artifacts
//!
//! Persists generated binary payloads under the content root's `generated/`
//! directory and returns the public path the front end fetches them from.

use chrono::Utc;
use drawtut_common::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Public URL prefix the static-file route serves `generated/` under
const PUBLIC_PREFIX: &str = "/generated";

/// Filesystem store for generated artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    generated_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(generated_dir: PathBuf) -> Self {
        Self { generated_dir }
    }

    pub fn generated_dir(&self) -> &Path {
        &self.generated_dir
    }

    /// Persist one artifact and return its public reference path
    ///
    /// Filenames are `<base_name>_<millis-timestamp><ext>`; the timestamp
    /// plus logical base name disambiguates concurrent requests. Two writes
    /// inside the same millisecond with the same base name collide, which
    /// is accepted (see DESIGN.md). I/O errors propagate to the caller.
    pub async fn store(&self, bytes: &[u8], mime_type: &str, base_name: &str) -> Result<String> {
        tokio::fs::create_dir_all(&self.generated_dir).await?;

        let filename = format!(
            "{}_{}{}",
            base_name,
            Utc::now().timestamp_millis(),
            extension_for(mime_type)
        );
        let path = self.generated_dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        debug!(
            path = %path.display(),
            size = bytes.len(),
            "Stored generated artifact"
        );

        Ok(format!("{}/{}", PUBLIC_PREFIX, filename))
    }
}

/// Storage extension for a declared content type
///
/// Accepts full MIME types ("image/png") or bare subtypes ("png");
/// anything unrecognized stores as `.png`.
fn extension_for(mime_type: &str) -> &'static str {
    let subtype = mime_type
        .rsplit('/')
        .next()
        .unwrap_or(mime_type)
        .trim()
        .to_ascii_lowercase();

    match subtype.as_str() {
        "png" => ".png",
        "jpeg" | "jpg" => ".jpg",
        "gif" => ".gif",
        _ => ".png",
    }
}
