//! Blob Commands
//!
//! Uploading inline image and video payloads to the content backend.

use base64::Engine;

use crate::domain::{DomainError, DomainResult};
use crate::AppState;

/// Decoded payload of a `data:` URL or bare base64 string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl DecodedPayload {
    /// File extension matching the declared MIME type, `bin` when unknown
    pub fn extension(&self) -> &'static str {
        self.mime
            .as_deref()
            .and_then(mime_guess::get_mime_extensions_str)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("bin")
    }
}

/// Decode base64 data, with or without a `data:<mime>;base64,` prefix
pub fn decode_data_url(data: &str) -> DomainResult<DecodedPayload> {
    let (mime, payload) = match data.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| DomainError::InvalidInput("data URL has no payload".to_string()))?;
            let mime = header.strip_suffix(";base64").ok_or_else(|| {
                DomainError::InvalidInput("only base64 data URLs are supported".to_string())
            })?;
            let mime = (!mime.is_empty()).then(|| mime.to_string());
            (mime, payload)
        }
        None => (None, data),
    };

    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    Ok(DecodedPayload { mime, bytes })
}

/// Upload a base64 payload to `path` and return its public URL
pub async fn upload_data_url(state: &AppState, data: &str, path: &str) -> DomainResult<String> {
    let payload = decode_data_url(data)?;
    let url = state.service.upload_blob(&payload.bytes, path).await?;
    log::info!("Uploaded {} bytes to {}", payload.bytes.len(), path);
    Ok(url)
}

/// Blob written on behalf of a pending change
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlineUpload {
    pub path: String,
    pub url: String,
}

/// Upload a `data:` URL under `dir/stem.<ext>`, the extension following its MIME type
pub(crate) async fn upload_inline(
    state: &AppState,
    data: &str,
    dir: &str,
    stem: &str,
) -> DomainResult<InlineUpload> {
    let payload = decode_data_url(data)?;
    let path = format!("{}/{}.{}", dir, stem, payload.extension());
    let url = state.service.upload_blob(&payload.bytes, &path).await?;
    log::info!("Uploaded {} bytes to {}", payload.bytes.len(), path);
    Ok(InlineUpload { path, url })
}

/// Best-effort removal of blobs whose change was not saved
pub(crate) async fn discard_uploads(state: &AppState, uploads: &[InlineUpload]) {
    for upload in uploads {
        match state.service.delete_blob(&upload.path).await {
            Ok(()) => log::info!("Discarded unsaved blob {}", upload.path),
            Err(e) => log::warn!("Failed to discard blob {}: {}", upload.path, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::seeded_state;

    #[test]
    fn test_decode_with_prefix() {
        let decoded = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded.mime.as_deref(), Some("image/png"));
        assert_eq!(decoded.bytes, b"hello");
        assert_eq!(decoded.extension(), "png");
    }

    #[test]
    fn test_decode_bare_base64() {
        let decoded = decode_data_url("aGVsbG8=").unwrap();
        assert_eq!(decoded.mime, None);
        assert_eq!(decoded.bytes, b"hello");
        assert_eq!(decoded.extension(), "bin");
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(
            decode_data_url("data:text/plain,hello"),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64"),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(decode_data_url("@@@"), Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_upload_data_url() {
        let (state, memory) = seeded_state().await;

        let url = upload_data_url(&state, "data:image/jpeg;base64,aGVsbG8=", "images/a.jpg")
            .await
            .unwrap();
        assert_eq!(url, "memory://images/a.jpg");
        assert_eq!(memory.blob("images/a.jpg").await, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_upload_inline_picks_extension() {
        let (state, memory) = seeded_state().await;

        let upload = upload_inline(&state, "data:image/png;base64,aGVsbG8=", "images", "banner-1")
            .await
            .unwrap();
        assert_eq!(upload.path, "images/banner-1.png");
        assert_eq!(upload.url, "memory://images/banner-1.png");
        assert!(memory.blob("images/banner-1.png").await.is_some());

        discard_uploads(&state, &[upload]).await;
        assert_eq!(memory.blob_count().await, 0);
    }
}
