//! Status code and body extraction from a raw response.
//!
//! The body is whatever follows the last CRLF. That is enough for a
//! single-line body after a normal header block; bodies that contain CRLF,
//! or chunked encodings, come back truncated to their last line.

use crate::error::Error;
use crate::http::Response;

/// Code reported when the status line cannot be parsed.
pub const SENTINEL_CODE: u16 = 500;

/// Read the numeric status from the second whitespace-separated token.
pub fn parse_status(raw: &str) -> Result<u16, Error> {
    let token = raw
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| Error::MalformedResponse("missing status code".to_string()))?;
    token
        .parse::<u16>()
        .map_err(|_| Error::MalformedResponse(format!("non-numeric status code {token:?}")))
}

/// Like `parse_status`, with failures mapped to `SENTINEL_CODE`.
pub fn status_code(raw: &str) -> u16 {
    parse_status(raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "falling back to sentinel status");
        SENTINEL_CODE
    })
}

/// The text after the last `\r\n` (the whole input if there is none).
pub fn body(raw: &str) -> &str {
    raw.rsplit("\r\n").next().unwrap_or_default()
}

impl Response {
    pub fn from_raw(raw: &str) -> Self {
        Response::new(status_code(raw), body(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_from_status_line() {
        assert_eq!(status_code("HTTP/1.1 200 OK\r\nServer: x\r\n\r\n"), 200);
        assert_eq!(status_code("HTTP/1.0 404 Not Found\r\n\r\n"), 404);
    }

    #[test]
    fn garbage_maps_to_sentinel() {
        assert_eq!(status_code("garbage"), SENTINEL_CODE);
        assert_eq!(status_code(""), SENTINEL_CODE);
        assert_eq!(status_code("HTTP/1.1 OK\r\n"), SENTINEL_CODE);
        assert_eq!(status_code("HTTP/1.1 -1 Nope"), SENTINEL_CODE);
    }

    #[test]
    fn parse_status_reports_malformed() {
        assert!(matches!(parse_status("garbage"), Err(Error::MalformedResponse(_))));
        assert_eq!(parse_status("HTTP/1.1 201 Created").unwrap(), 201);
    }

    #[test]
    fn body_after_blank_line() {
        assert_eq!(body("HTTP/1.1 200 OK\r\nHeader: x\r\n\r\nHello"), "Hello");
    }

    #[test]
    fn empty_body() {
        assert_eq!(body("HTTP/1.1 204 No Content\r\n\r\n"), "");
    }

    #[test]
    fn multi_line_body_keeps_only_last_line() {
        assert_eq!(body("HTTP/1.1 200 OK\r\n\r\nfirst\r\nsecond"), "second");
    }

    #[test]
    fn from_raw_combines_both() {
        let resp = Response::from_raw("HTTP/1.1 418 I'm a teapot\r\n\r\nshort and stout");
        assert_eq!(resp, Response::new(418, "short and stout"));
    }
}
