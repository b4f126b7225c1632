//! In-memory message body.

use std::borrow::Cow;
use std::io::Cursor;

/// Immutable byte buffer used as the message body stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    bytes: Vec<u8>,
}

impl Body {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// A fresh reader positioned at the start of the body.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body { bytes }
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body {
            bytes: bytes.to_vec(),
        }
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body {
            bytes: text.as_bytes().to_vec(),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body {
            bytes: text.into_bytes(),
        }
    }
}
