//! Multi-valued header map backed by `reqwest::header::HeaderMap`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error_handling::ClientError;

/// Header collection with case-insensitive names.
///
/// Names are stored lower-cased. Values of one name keep their insertion
/// order, so a header with N values is written as N wire lines. Names and
/// values are validated on insertion: a name must be an HTTP token and a
/// value must not contain control characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    map: HeaderMap,
}

fn header_name(name: &str) -> Result<HeaderName, ClientError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::invalid_header(name, e))
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|e| ClientError::invalid_header(name, e))
}

fn value_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// All values stored under `name`, in insertion order.
    pub fn get(&self, name: &str) -> Vec<String> {
        self.map.get_all(name).iter().map(value_text).collect()
    }

    pub fn first(&self, name: &str) -> Option<String> {
        self.map.get(name).map(value_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Comma-joined values, the form used when one line is required.
    pub fn line(&self, name: &str) -> String {
        self.get(name).join(", ")
    }

    /// Replaces every value of `name` with `value`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidHeader` if `name` or `value` is not valid
    /// on the wire.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        self.map.insert(header_name(name)?, header_value(name, value)?);
        Ok(())
    }

    /// Adds `value` under `name`, creating the header if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidHeader` if `name` or `value` is not valid
    /// on the wire.
    pub fn append(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        self.map.append(header_name(name)?, header_value(name, value)?);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) {
        self.map.remove(name);
    }

    /// Iterates over one `(name, value)` pair per stored value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.map
            .iter()
            .map(|(name, value)| (name.as_str(), value_text(value)))
    }

    pub fn as_header_map(&self) -> &HeaderMap {
        &self.map
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.map.keys_len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
