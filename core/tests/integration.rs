//! End-to-end requests over real sockets.
//!
//! # Design
//! Most tests start the axum mock server on a random port in a background
//! tokio runtime and drive the blocking client against it. The raw-bytes
//! cases use a one-shot `std::net::TcpListener` that captures the exact
//! request and replies with hand-written bytes.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

use httpclient_core::{Args, HttpClient, Method};

fn spawn_mock_server() -> SocketAddr {
    let std_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Accept one connection, capture the request, reply with `reply`, close.
fn spawn_canned_server(reply: &'static [u8]) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut conn, _) = listener.accept().unwrap();
        let request = read_request(&mut conn);
        conn.write_all(reply).unwrap();
        request
    });
    (addr, handle)
}

/// Read a request head plus `Content-Length` bytes of body.
fn read_request(conn: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 256];
    loop {
        let n = conn.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|l| l.strip_prefix("Content-Length: "))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

fn dead_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

// ---------------------------------------------------------------------------
// Against the mock server
// ---------------------------------------------------------------------------

#[test]
fn get_returns_code_and_body() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();

    let resp = client.get(&format!("http://{addr}/hello"), None).unwrap();
    assert_eq!(resp.code, 200);
    assert_eq!(resp.body, mock_server::HELLO_BODY);
}

#[test]
fn get_form_args_arrive_as_query_with_dangling_separator() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();
    let args = Args::form([("a", "1"), ("b", "2")]);

    let resp = client.get(&format!("http://{addr}/echo"), Some(&args)).unwrap();
    assert_eq!(resp.code, 200);
    assert_eq!(resp.body, "a=1&b=2&");
}

#[test]
fn post_form_body_reaches_server() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();
    let args = Args::form([("a", "1"), ("b", "2")]);

    let resp = client.post(&format!("http://{addr}/echo"), Some(&args)).unwrap();
    assert_eq!(resp.code, 200);
    assert_eq!(resp.body, "application/x-www-form-urlencoded|a=1&b=2");
}

#[test]
fn post_text_body_reaches_server() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();

    let resp = client
        .post(&format!("http://{addr}/echo"), Some(&Args::text("hello there")))
        .unwrap();
    assert_eq!(resp.code, 200);
    assert_eq!(resp.body, "text/plain|hello there");
}

#[test]
fn post_without_args_sends_empty_body() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();

    let resp = client.post(&format!("http://{addr}/echo"), None).unwrap();
    assert_eq!(resp.code, 200);
    assert_eq!(resp.body, "text/plain|");
}

#[test]
fn command_dispatches_on_method_word() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();
    let url = format!("http://{addr}/echo");
    let args = Args::form([("k", "v")]);

    let posted = client.command(&url, "POST", Some(&args)).unwrap();
    assert_eq!(posted.body, "application/x-www-form-urlencoded|k=v");

    let fetched = client.command(&url, "PATCH", Some(&args)).unwrap();
    assert_eq!(fetched.body, "k=v&");
}

#[test]
fn non_200_status_is_reported() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();

    let teapot = client.get(&format!("http://{addr}/status/418"), None).unwrap();
    assert_eq!(teapot.code, 418);
    assert_eq!(teapot.body, "I'm a teapot");

    let missing = client.get(&format!("http://{addr}/missing"), None).unwrap();
    assert_eq!(missing.code, 404);
    assert_eq!(missing.body, "not found");
}

#[test]
fn json_body_survives_as_text() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();

    let resp = client.get(&format!("http://{addr}/json"), None).unwrap();
    let greeting: mock_server::Greeting = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(greeting.message, mock_server::HELLO_BODY);
}

#[test]
fn one_client_runs_sequential_requests() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();
    let url = format!("http://{addr}/hello");

    for _ in 0..3 {
        let resp = client.get(&url, None).unwrap();
        assert_eq!(resp.code, 200);
    }
}

#[test]
fn execute_returns_typed_response() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();

    let resp = client
        .execute(Method::Get, &format!("http://{addr}/hello"), None)
        .unwrap();
    assert_eq!(resp.body, mock_server::HELLO_BODY);
}

// ---------------------------------------------------------------------------
// Against hand-written bytes
// ---------------------------------------------------------------------------

#[test]
fn exact_get_request_on_the_wire() {
    let (addr, server) = spawn_canned_server(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nHello");
    let mut client = HttpClient::new();
    let args = Args::form([("a", "1"), ("b", "2")]);

    let resp = client
        .get(&format!("http://127.0.0.1:{}/a/b", addr.port()), Some(&args))
        .unwrap();
    let request = server.join().unwrap();

    assert_eq!(
        request,
        "GET /a/b?a=1&b=2& HTTP/1.1\r\nHost: 127.0.0.1\r\nAccept: */*\r\n\r\n"
    );
    assert_eq!(resp.code, 200);
    assert_eq!(resp.body, "Hello");
}

#[test]
fn exact_post_request_on_the_wire() {
    let (addr, server) = spawn_canned_server(b"HTTP/1.1 201 Created\r\n\r\ndone");
    let mut client = HttpClient::new();
    let args = Args::form([("a", "1"), ("b", "2")]);

    let resp = client
        .post(&format!("http://127.0.0.1:{}/submit", addr.port()), Some(&args))
        .unwrap();
    let request = server.join().unwrap();

    assert_eq!(
        request,
        "POST /submit HTTP/1.1\r\nHost: 127.0.0.1\r\n\
         Content-Type: application/x-www-form-urlencoded\r\n\
         Content-Length: 7\r\n\r\na=1&b=2"
    );
    assert_eq!(resp.code, 201);
    assert_eq!(resp.body, "done");
}

#[test]
fn garbage_reply_yields_sentinel_code() {
    let (addr, server) = spawn_canned_server(b"garbage");
    let mut client = HttpClient::new();

    let resp = client
        .get(&format!("http://127.0.0.1:{}/", addr.port()), None)
        .unwrap();
    server.join().unwrap();

    assert_eq!(resp.code, 500);
    assert_eq!(resp.body, "garbage");
}

#[test]
fn empty_reply_yields_sentinel_and_empty_body() {
    let (addr, server) = spawn_canned_server(b"");
    let mut client = HttpClient::new();

    let resp = client
        .get(&format!("http://127.0.0.1:{}/", addr.port()), None)
        .unwrap();
    server.join().unwrap();

    assert_eq!(resp.code, 500);
    assert!(resp.body.is_empty());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn unreachable_port_is_absent() {
    let mut client = HttpClient::new();
    let url = format!("http://127.0.0.1:{}/", dead_port());

    assert!(client.get(&url, None).is_none());
    assert!(client.post(&url, Some(&Args::text("x"))).is_none());
}

#[test]
fn unresolvable_host_is_absent() {
    let mut client = HttpClient::new();
    assert!(client.get("http://nonexistent.invalid/", None).is_none());
}

#[test]
fn client_recovers_after_failure() {
    let addr = spawn_mock_server();
    let mut client = HttpClient::new();

    assert!(client
        .get(&format!("http://127.0.0.1:{}/", dead_port()), None)
        .is_none());
    let resp = client.get(&format!("http://{addr}/hello"), None).unwrap();
    assert_eq!(resp.code, 200);
}
