//! HTTP request builder.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// JSON media type sent with every API request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described outbound request.
///
/// Transports consume this value; tests inspect it through the accessors.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request, replacing any previous value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as a string.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| "text/plain".to_string());
        self.body = Some(text.into().into_bytes());
        self
    }

    /// Serialize `value` as the JSON request body.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// Request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Absolute request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All headers set on the request.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up a header, ignoring case.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Raw request body, if any.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Decode the request body as JSON.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let body = self.body.as_deref().unwrap_or(b"null");
        serde_json::from_slice(body).map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_sets_content_type_and_body() {
        let req = RequestBuilder::new(Method::Post, "https://api.test/products")
            .json(&serde_json::json!({ "name": "Lamp" }))
            .unwrap();

        assert_eq!(req.header_value("content-type"), Some(JSON_CONTENT_TYPE));
        let body: serde_json::Value = req.json_body().unwrap();
        assert_eq!(body["name"], "Lamp");
    }

    #[test]
    fn test_text_keeps_explicit_content_type() {
        let req = RequestBuilder::new(Method::Put, "https://api.test/notes")
            .header("Content-Type", JSON_CONTENT_TYPE)
            .text("{}");

        assert_eq!(req.header_value("Content-Type"), Some(JSON_CONTENT_TYPE));
        assert_eq!(req.body_bytes(), Some(&b"{}"[..]));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::Head.as_str(), "HEAD");
    }

    #[test]
    fn test_json_body_without_body_is_null() {
        let req = RequestBuilder::new(Method::Get, "https://api.test/users");
        let body: Option<String> = req.json_body().unwrap();
        assert!(body.is_none());
    }
}
