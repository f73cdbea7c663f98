use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScreenshotError {
    #[error("Missing 'screenshot' field")]
    Missing,
    #[error("Invalid image data")]
    NotAnImage,
    #[error("Image data must be base64 encoded")]
    NotBase64,
    #[error("Invalid base64 image payload: {0}")]
    Decode(String),
    #[error("Image payload is empty")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct Screenshot {
    pub mime_type: String,
    /// Payload exactly as received, ready for an `inlineData` part.
    pub encoded: String,
    pub bytes: Vec<u8>,
}

impl Screenshot {
    /// Accepts `data:image/<type>[;...];base64,<payload>`.
    pub fn from_data_url(data_url: &str) -> Result<Self, ScreenshotError> {
        let rest = data_url
            .trim()
            .strip_prefix("data:image")
            .ok_or(ScreenshotError::NotAnImage)?;
        let (header, payload) = rest.split_once(',').ok_or(ScreenshotError::NotAnImage)?;

        let mut header_parts = header.split(';');
        let subtype = header_parts.next().unwrap_or_default();
        if !subtype.starts_with('/') || subtype.len() < 2 {
            return Err(ScreenshotError::NotAnImage);
        }
        if !header_parts.any(|p| p.eq_ignore_ascii_case("base64")) {
            return Err(ScreenshotError::NotBase64);
        }

        let encoded = payload.trim().to_string();
        let bytes = STANDARD
            .decode(&encoded)
            .map_err(|e| ScreenshotError::Decode(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ScreenshotError::Empty);
        }

        Ok(Screenshot {
            mime_type: format!("image{}", subtype),
            encoded,
            bytes,
        })
    }

    pub async fn save(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::write(path, &self.bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    #[test]
    fn test_decodes_png_data_url() {
        let shot = Screenshot::from_data_url(&format!("data:image/png;base64,{}", PNG_B64)).unwrap();
        assert_eq!(shot.mime_type, "image/png");
        assert_eq!(shot.encoded, PNG_B64);
        assert_eq!(&shot.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_rejects_non_image() {
        assert_eq!(
            Screenshot::from_data_url("data:text/plain;base64,aGk=").unwrap_err(),
            ScreenshotError::NotAnImage
        );
        assert_eq!(
            Screenshot::from_data_url("iVBORw0KGgo=").unwrap_err(),
            ScreenshotError::NotAnImage
        );
        assert_eq!(
            Screenshot::from_data_url("data:image/png;base64").unwrap_err(),
            ScreenshotError::NotAnImage
        );
    }

    #[test]
    fn test_rejects_non_base64_payloads() {
        assert_eq!(
            Screenshot::from_data_url("data:image/svg+xml,<svg/>").unwrap_err(),
            ScreenshotError::NotBase64
        );
        assert!(matches!(
            Screenshot::from_data_url("data:image/png;base64,!!!").unwrap_err(),
            ScreenshotError::Decode(_)
        ));
        assert_eq!(
            Screenshot::from_data_url("data:image/png;base64,").unwrap_err(),
            ScreenshotError::Empty
        );
    }

    #[tokio::test]
    async fn test_save_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captured_screenshot.png");
        let shot = Screenshot::from_data_url(&format!("data:image/png;base64,{}", PNG_B64)).unwrap();
        shot.save(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), shot.bytes);
    }
}
