use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("bad base64 payload: {0}")]
pub struct DataUrlError(String);

/// A file held in memory as a `data:<mime>;base64,<payload>` URL.
///
/// This is the staged form of an attachment: renderable as an `<img src>` preview
/// before anything is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime: String,
    payload: String,
}

impl DataUrl {
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        let mime = if mime.is_empty() {
            "application/octet-stream"
        } else {
            mime
        };
        Self {
            mime: mime.to_string(),
            payload: STANDARD.encode(bytes),
        }
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        STANDARD
            .decode(&self.payload)
            .map_err(|e| DataUrlError(e.to_string()))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}
