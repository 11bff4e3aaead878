//! Decompose a URL into the port, host, and path to connect to.
//!
//! Parsing is deliberately shallow: the scheme is only used to find the
//! authority, host characters and percent-escapes are echoed untouched, and
//! every scheme (including `https:`) defaults to port 80 because the client
//! never negotiates TLS.

use crate::error::Error;
use crate::http::ConnectionTarget;

pub const DEFAULT_PORT: u16 = 80;

/// Parse `url` into a `ConnectionTarget`.
///
/// Fails with `Error::InvalidUrl` when there is no `//` or the host is empty.
pub fn parse_url(url: &str) -> Result<ConnectionTarget, Error> {
    let (_scheme, rest) = url
        .split_once("//")
        .ok_or_else(|| Error::InvalidUrl(format!("missing `//` in {url:?}")))?;

    let mut segments = rest.split('/').filter(|s| !s.is_empty());
    let authority = segments
        .next()
        .ok_or_else(|| Error::InvalidUrl(format!("no host in {url:?}")))?;

    let host = authority.split(':').next().unwrap_or_default();
    if host.is_empty() {
        return Err(Error::InvalidUrl(format!("empty host in {url:?}")));
    }

    let port = authority
        .rsplit_once(':')
        .and_then(|(_, candidate)| candidate.parse::<u16>().ok())
        .filter(|p| *p != 0)
        .unwrap_or(DEFAULT_PORT);

    let rest: Vec<&str> = segments.collect();
    let path = if rest.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", rest.join("/"))
    };

    Ok(ConnectionTarget {
        port,
        host: host.to_string(),
        path,
    })
}
