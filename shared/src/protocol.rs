use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed description of one API call: method, server-relative path,
/// query parameters and optional JSON body.
///
/// `R` is the type of the envelope's `data` field on success. The
/// descriptor itself carries no behaviour; it is handed to the adapter
/// which performs the request.
pub struct Endpoint<R> {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Set when the body could not be serialized; the adapter refuses to send.
    pub build_error: Option<String>,
    _response: PhantomData<fn() -> R>,
}

impl<R> Endpoint<R> {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            build_error: None,
            _response: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds a query parameter only when a value is present.
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => self.build_error = Some(e.to_string()),
        }
        self
    }
}

impl<R> fmt::Debug for Endpoint<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body", &self.body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_parts() {
        let ep: Endpoint<()> = Endpoint::post("/alerts/5/resolve")
            .query("resolveNote", "fixed")
            .query_opt("missing", None::<&str>)
            .json(&json!({ "a": 1 }));
        assert_eq!(ep.method, HttpMethod::Post);
        assert_eq!(ep.path, "/alerts/5/resolve");
        assert_eq!(ep.query, vec![("resolveNote".to_string(), "fixed".to_string())]);
        assert_eq!(ep.body, Some(json!({ "a": 1 })));
        assert!(ep.build_error.is_none());
    }

    #[test]
    fn unserializable_body_is_recorded() {
        use std::collections::HashMap;
        // JSON object keys must be strings
        let mut bad = HashMap::new();
        bad.insert((1, 2), "x");
        let ep: Endpoint<()> = Endpoint::post("/x").json(&bad);
        assert!(ep.body.is_none());
        assert!(ep.build_error.is_some());
    }
}
