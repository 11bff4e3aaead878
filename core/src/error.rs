//! Error types for the raw-socket HTTP client.
//!
//! # Design
//! Every failure inside the crate is a typed `Error`. The `HttpClient`
//! facade logs these and downgrades them to an absent response, so callers
//! of `get`/`post`/`command` never see them; `HttpClient::execute` hands
//! them back untouched.

use std::io;

use thiserror::Error;

/// Errors produced while parsing a URL, talking to the peer, or reading
/// the status line.
#[derive(Debug, Error)]
pub enum Error {
    /// The URL has no `//` separator or an empty host.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The TCP connect failed (name resolution, refusal, or OS timeout).
    #[error("connection to {host}:{port} failed: {source}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// An operation needed an open session and there was none.
    #[error("socket not connected")]
    NotConnected,

    /// The status line is missing or its code is not numeric.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Read or write failure on an open session.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
