use std::collections::HashMap;

/// HTTP request methods.
///
/// GET and HEAD are served; other parsed verbs are answered with
/// 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    OPTIONS,
    PATCH,
}

impl Method {
    /// Parses an HTTP method from its uppercase wire form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

/// A parsed HTTP request from a client.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// The raw request target (e.g. "/docs/?sort=1")
    pub target: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    pub headers: HashMap<String, String>,
}

impl Request {
    /// The logical path of the request: the target with any query string
    /// split off and percent escapes decoded. Never empty.
    pub fn path(&self) -> String {
        let raw = self
            .target
            .split_once('?')
            .map(|(path, _)| path)
            .unwrap_or(&self.target);

        let decoded = percent_decode(raw);
        if decoded.is_empty() {
            "/".to_string()
        } else {
            decoded
        }
    }

    /// Retrieves a header value by name; lookup is case-insensitive.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Retrieves the Content-Length header value, 0 when missing or invalid.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Whether the connection should remain open after the response.
    /// HTTP/1.1 defaults to keep-alive.
    pub fn keep_alive(&self) -> bool {
        self.header("Connection")
            .map(|v| v.eq_ignore_ascii_case("keep-alive"))
            .unwrap_or(true)
    }
}

/// Builder for constructing Request values, mainly for tests.
pub struct RequestBuilder {
    method: Method,
    target: String,
    version: String,
    headers: HashMap<String, String>,
}

impl RequestBuilder {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            version: "HTTP/1.1".to_string(),
            headers: HashMap::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            target: self.target,
            version: self.version,
            headers: self.headers,
        }
    }
}

/// Decodes %XX escapes; invalid escapes pass through unchanged.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
