//! Hand-built HTTP/1.1 requests.
//!
//! # Design
//! GET and POST render form arguments differently on purpose: every GET
//! query pair is followed by `&`, so the query string ends with a dangling
//! separator, while the POST form body joins pairs with `&` and has none.
//! Values go out raw; see `FormArgs::percent_encoded` for escaping.
//!
//! A text POST body is preceded by the usual blank line, so the request is
//! always well formed.

use crate::http::{Args, FormArgs, HttpRequest, Method};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Build the request for `method` against `host` and `path`.
pub fn build_request(method: Method, host: &str, path: &str, args: Option<&Args>) -> HttpRequest {
    match method {
        Method::Get => build_get(host, path, args),
        Method::Post => build_post(host, path, args),
    }
}

/// Build and render in one step.
pub fn build_request_text(method: Method, host: &str, path: &str, args: Option<&Args>) -> String {
    build_request(method, host, path, args).to_wire()
}

fn build_get(host: &str, path: &str, args: Option<&Args>) -> HttpRequest {
    let path = match args {
        Some(Args::Form(form)) if !form.is_empty() => format!("{path}?{}", query_string(form)),
        _ => path.to_string(),
    };
    HttpRequest {
        method: Method::Get,
        path,
        headers: vec![header("Host", host), header("Accept", "*/*")],
        body: None,
    }
}

fn build_post(host: &str, path: &str, args: Option<&Args>) -> HttpRequest {
    let (content_type, body) = match args {
        Some(Args::Form(form)) => (FORM_CONTENT_TYPE, form_body(form)),
        Some(Args::Text(text)) => (TEXT_CONTENT_TYPE, text.clone()),
        None => (TEXT_CONTENT_TYPE, String::new()),
    };
    HttpRequest {
        method: Method::Post,
        path: path.to_string(),
        headers: vec![
            header("Host", host),
            header("Content-Type", content_type),
            header("Content-Length", &body.len().to_string()),
        ],
        body: (!body.is_empty()).then_some(body),
    }
}

/// `k=v&` per pair; the trailing `&` is kept.
fn query_string(form: &FormArgs) -> String {
    form.iter().map(|(k, v)| format!("{k}={v}&")).collect()
}

fn form_body(form: &FormArgs) -> String {
    form.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn header(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> Args {
        Args::form([("a", "1"), ("b", "2")])
    }

    #[test]
    fn get_without_args() {
        let wire = build_request_text(Method::Get, "example.com", "/", None);
        assert_eq!(wire, "GET / HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n");
    }

    #[test]
    fn get_form_keeps_dangling_separator() {
        let req = build_request(Method::Get, "h", "/search", Some(&ab()));
        assert_eq!(req.path, "/search?a=1&b=2&");
        assert!(req.body.is_none());
        let wire = req.to_wire();
        assert!(wire.starts_with("GET /search?a=1&b=2& HTTP/1.1\r\n"));
        assert!(wire.ends_with("\r\n\r\n"));
    }

    #[test]
    fn get_ignores_text_and_empty_form() {
        let text = build_request(Method::Get, "h", "/x", Some(&Args::text("body")));
        assert_eq!(text.path, "/x");
        assert!(text.body.is_none());

        let empty = build_request(Method::Get, "h", "/x", Some(&Args::Form(FormArgs::new())));
        assert_eq!(empty.path, "/x");
    }

    #[test]
    fn post_form_strips_dangling_separator() {
        let wire = build_request_text(Method::Post, "h", "/submit", Some(&ab()));
        assert_eq!(
            wire,
            "POST /submit HTTP/1.1\r\nHost: h\r\n\
             Content-Type: application/x-www-form-urlencoded\r\n\
             Content-Length: 7\r\n\r\na=1&b=2"
        );
    }

    #[test]
    fn post_text_has_blank_line_before_body() {
        let wire = build_request_text(Method::Post, "h", "/", Some(&Args::text("héllo")));
        assert_eq!(
            wire,
            "POST / HTTP/1.1\r\nHost: h\r\nContent-Type: text/plain\r\n\
             Content-Length: 6\r\n\r\nhéllo"
        );
    }

    #[test]
    fn post_without_args_is_empty_text() {
        let req = build_request(Method::Post, "h", "/", None);
        assert!(req.body.is_none());
        assert!(req
            .headers
            .contains(&("Content-Length".to_string(), "0".to_string())));
        assert!(req
            .headers
            .contains(&("Content-Type".to_string(), "text/plain".to_string())));
        assert!(req.to_wire().ends_with("Content-Length: 0\r\n\r\n"));
    }

    #[test]
    fn values_are_not_escaped() {
        let args = Args::form([("q", "a b")]);
        let req = build_request(Method::Get, "h", "/", Some(&args));
        assert_eq!(req.path, "/?q=a b&");
    }
}
