//! Message bodies from raw payloads.
//!
//! SQS bodies are text. UTF-8 payloads go through as-is; anything else is
//! base64-encoded and flagged with a message attribute so job workers can
//! decode it.

use base64::Engine;
use bytes::Bytes;

/// Message attribute naming the encoding of a non-text body.
pub const CONTENT_ENCODING_ATTRIBUTE: &str = "contentEncoding";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    text: String,
    encoding: Option<&'static str>,
}

impl MessageBody {
    pub fn from_payload(payload: &Bytes) -> Self {
        match std::str::from_utf8(payload) {
            Ok(text) => Self {
                text: text.to_string(),
                encoding: None,
            },
            Err(_) => Self {
                text: base64::engine::general_purpose::STANDARD.encode(payload),
                encoding: Some("base64"),
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value for [`CONTENT_ENCODING_ATTRIBUTE`], if the body is not the raw payload.
    pub fn encoding(&self) -> Option<&'static str> {
        self.encoding
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
