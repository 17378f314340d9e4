//! Incoming request abstraction.
//!
//! A [`Request`] is created once per incoming call by the hosting process
//! and carries everything the dispatch pipeline needs: method, path,
//! headers, parsed query/form parameters, a mutable attribute bag (route
//! parameters and the `_controller` reference are merged in by the
//! dispatcher) and an optional session.

use http::Method;
use serde_json::Value;
use std::collections::HashMap;

/// An HTTP request as seen by the dispatch pipeline.
///
/// This crate never reads from a socket; the hosting process builds a
/// `Request` from whatever transport it uses and passes it to
/// [`crate::app::Application::handle`].
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Request path without the query string.
    pub path: String,
    /// HTTP headers (lowercase keys).
    pub headers: HashMap<String, String>,
    /// Parsed query string parameters.
    pub query_params: HashMap<String, String>,
    /// Form/body parameters.
    pub form_params: HashMap<String, String>,
    /// Raw request body, if any.
    pub body: Option<String>,
    /// Mutable attribute bag. Route parameters and the `_controller`
    /// reference are inserted here during dispatch.
    pub attributes: HashMap<String, Value>,
    session: Option<HashMap<String, Value>>,
}

impl Request {
    /// Creates a request for `method` and `target`.
    ///
    /// The query string, if present in `target`, is parsed into
    /// [`Request::query_params`] and stripped from the path. An empty path
    /// normalizes to `/`.
    pub fn new(method: Method, target: &str) -> Self {
        let path = match target.find('?') {
            Some(pos) => &target[..pos],
            None => target,
        };
        let path = if path.is_empty() { "/" } else { path }.to_string();
        let query_params = parse_query_params(target);

        Request {
            method,
            path,
            headers: HashMap::new(),
            query_params,
            form_params: HashMap::new(),
            body: None,
            attributes: HashMap::new(),
            session: None,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(target: &str) -> Self {
        Request::new(Method::GET, target)
    }

    /// Adds a header (key lowercased); chainable.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Sets the raw body; chainable.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns an attribute value, if set.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Inserts an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    /// Returns the session map, if one is attached.
    pub fn session(&self) -> Option<&HashMap<String, Value>> {
        self.session.as_ref()
    }

    /// Returns a mutable reference to the session map, if one is attached.
    pub fn session_mut(&mut self) -> Option<&mut HashMap<String, Value>> {
        self.session.as_mut()
    }

    /// Attaches a session map, replacing any existing one.
    pub fn set_session(&mut self, session: HashMap<String, Value>) {
        self.session = Some(session);
    }
}

/// Parse query string parameters from a request target.
///
/// Extracts everything after the `?` character and URL-decodes parameter
/// names and values.
pub fn parse_query_params(target: &str) -> HashMap<String, String> {
    if let Some(pos) = target.find('?') {
        let query_str = &target[pos + 1..];
        url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else {
        HashMap::new()
    }
}
