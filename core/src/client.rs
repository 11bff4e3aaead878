//! The client facade: one GET or POST per call over a fresh TCP session.
//!
//! # Design
//! `HttpClient` owns its `Transport` exclusively and every method takes
//! `&mut self`, so one instance runs one request at a time. Each call opens
//! a new session and closes it before returning, whether the exchange
//! succeeded or not.
//!
//! `get`/`post`/`command` never surface errors: failures are logged and
//! come back as `None`, and an unreadable status line comes back as code
//! 500. `execute` is the same exchange with the typed error kept.

use crate::error::Error;
use crate::http::{Args, Method, Response};
use crate::request::build_request;
use crate::target::parse_url;
use crate::transport::{Transport, DEFAULT_CHUNK_SIZE};

/// Tunables for `HttpClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Bytes requested per socket read.
    pub read_chunk_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Default)]
pub struct HttpClient {
    transport: Transport,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            transport: Transport::new(config.read_chunk_size),
        }
    }

    pub fn get(&mut self, url: &str, args: Option<&Args>) -> Option<Response> {
        self.request(Method::Get, url, args)
    }

    pub fn post(&mut self, url: &str, args: Option<&Args>) -> Option<Response> {
        self.request(Method::Post, url, args)
    }

    /// Dispatch on a method word: `"POST"` posts, anything else gets.
    pub fn command(&mut self, url: &str, method: &str, args: Option<&Args>) -> Option<Response> {
        self.request(Method::from_command(method), url, args)
    }

    fn request(&mut self, method: Method, url: &str, args: Option<&Args>) -> Option<Response> {
        match self.execute(method, url, args) {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::warn!(method = method.as_str(), url = %url, error = %e, "request failed");
                None
            }
        }
    }

    /// Run one request and return the typed outcome.
    ///
    /// The session is closed before this returns on every path.
    pub fn execute(
        &mut self,
        method: Method,
        url: &str,
        args: Option<&Args>,
    ) -> Result<Response, Error> {
        let result = self.exchange(method, url, args);
        self.transport.close();
        result
    }

    fn exchange(
        &mut self,
        method: Method,
        url: &str,
        args: Option<&Args>,
    ) -> Result<Response, Error> {
        let target = parse_url(url)?;
        tracing::debug!(port = target.port, host = %target.host, path = %target.path, "parsed url");

        self.transport.connect(&target.host, target.port)?;

        let wire = build_request(method, &target.host, &target.path, args).to_wire();
        tracing::debug!(request = %wire, "sending request");
        self.transport.send_all(&wire)?;

        let raw = self.transport.receive_all()?;
        let response = Response::from_raw(&raw);
        tracing::debug!(code = response.code, body = %response.body, "response parsed");
        Ok(response)
    }
}
