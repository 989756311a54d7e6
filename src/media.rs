//! Media arguments
//!
//! Image and video arguments are either remote URLs, which pass through, or
//! local files, which are read and inlined as base64 `data:` URLs for the
//! backend to upload.

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;

/// Encode a file as `data:<mime>;base64,<payload>`
pub fn file_to_data_url(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime.essence_str(), payload))
}

/// Pass URLs through, inline anything else as a local file
pub fn resolve_media_arg(arg: &str) -> Result<String> {
    if is_remote(arg) {
        return Ok(arg.to_string());
    }
    file_to_data_url(Path::new(arg))
}

fn is_remote(arg: &str) -> bool {
    ["http://", "https://", "data:", "file://"]
        .iter()
        .any(|scheme| arg.starts_with(scheme))
}
