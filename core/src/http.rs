//! HTTP values shared by the builder, the parser, and the facade.
//!
//! # Design
//! Requests and responses are described as plain owned data. The builder
//! produces an `HttpRequest`, which only becomes wire text through
//! `HttpRequest::to_wire`; the transport never inspects it. Owned `String`
//! and `Vec` fields keep the values easy to hand across the C ABI.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// HTTP method supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// Map a command-line method word to a `Method`.
    ///
    /// Only the exact string `"POST"` selects `Post`; anything else,
    /// including lowercase `"post"`, falls back to `Get`.
    pub fn from_command(name: &str) -> Self {
        if name == "POST" {
            Method::Post
        } else {
            Method::Get
        }
    }
}

/// Where a request goes: derived from a URL for each call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub port: u16,
    pub host: String,
    /// Always starts with `/`.
    pub path: String,
}

/// Insertion-ordered form fields with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormArgs {
    pairs: Vec<(String, String)>,
}

impl FormArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. An existing key keeps its position and gets
    /// the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// A copy with every key and value form-urlencoded.
    ///
    /// The request builder inserts values raw; callers that need escaping
    /// apply this themselves before building.
    pub fn percent_encoded(&self) -> Self {
        let encode = |s: &str| form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>();
        Self {
            pairs: self.pairs.iter().map(|(k, v)| (encode(k), encode(v))).collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormArgs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = FormArgs::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

/// Caller-supplied request arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Args {
    /// Key/value pairs: a query string for GET, a form body for POST.
    Form(FormArgs),
    /// A plain-text POST body. Ignored by GET.
    Text(String),
}

impl Args {
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Args::Form(pairs.into_iter().collect())
    }

    pub fn text(body: impl Into<String>) -> Self {
        Args::Text(body.into())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `request::build_request`; `path` already carries any query
/// string, and `headers` are written in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Render the request line, headers, blank line, and body exactly as
    /// they go on the wire. No CRLF follows the body.
    pub fn to_wire(&self) -> String {
        let mut out = format!("{} {} HTTP/1.1\r\n", self.method.as_str(), self.path);
        for (name, value) in &self.headers {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        if let Some(body) = &self.body {
            out.push_str(body);
        }
        out
    }
}

/// Outcome of one request: status code and body text.
///
/// `code` is 500 when the status line could not be parsed; that value is
/// assigned locally and does not mean the server reported an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub code: u16,
    pub body: String,
}

impl Response {
    pub fn new(code: u16, body: impl Into<String>) -> Self {
        Self {
            code,
            body: body.into(),
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self {
            code: 200,
            body: String::new(),
        }
    }
}
