//! Outgoing response abstraction.
//!
//! A [`Response`] is the single output of every dispatch call. This crate
//! never transmits it; the hosting process writes it to whatever transport
//! it uses.

/// An HTTP response: status code, body and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
    /// Response headers, in insertion order.
    pub headers: Vec<(String, String)>,
}

impl Response {
    /// Creates a response with the given body and status, no headers.
    pub fn new(body: impl Into<String>, status: u16) -> Self {
        Response {
            status,
            body: body.into(),
            headers: Vec::new(),
        }
    }

    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Response::new(body, 200)
    }

    /// Replaces the status code; chainable.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Appends a header; chainable.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the first header with the given name, if any.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The canonical reason phrase for this response's status code.
    pub fn status_reason(&self) -> &'static str {
        status_reason(self.status)
    }
}

/// Canonical reason phrase for a status code.
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(500), "Internal Server Error");
    }

    #[test]
    fn test_successful_range() {
        assert!(Response::ok("hi").is_successful());
        assert!(Response::new("", 204).is_successful());
        assert!(!Response::new("nope", 404).is_successful());
        assert!(!Response::new("", 302).is_successful());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let res = Response::ok("x").with_header("Content-Type", "text/html");
        assert_eq!(res.header("content-type"), Some("text/html"));
        assert_eq!(res.header("x-missing"), None);
    }
}
