//! A minimal HTTP/1.1 client written directly against TCP sockets.
//!
//! # Overview
//! A URL is split into port, host, and path; a GET or POST request is
//! formatted by hand; the request goes out over a blocking `TcpStream`; the
//! reply is read until the peer closes and reduced to a status code and a
//! body.
//!
//! # Design
//! - `target` parses URLs, `request` builds requests, `transport` owns the
//!   socket, and `response` parses replies. None of them depends on another
//!   except through the plain values in `http`.
//! - `HttpClient` strings them together and turns every failure into an
//!   absent `Response`, logging the typed `Error` with `tracing`.
//! - Plaintext only. No keep-alive, chunked encoding, redirects, or TLS.

pub mod client;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod target;
pub mod transport;

pub use client::{ClientConfig, HttpClient};
pub use error::Error;
pub use http::{Args, ConnectionTarget, FormArgs, HttpRequest, Method, Response};
pub use request::build_request;
pub use response::{body, parse_status, status_code};
pub use target::parse_url;
pub use transport::Transport;
