use std::process::ExitCode;

use httpclient_core::HttpClient;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: client [GET|POST] <url> [--debug] [--json]";

fn main() -> ExitCode {
    let mut debug = false;
    let mut json = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--debug" => debug = true,
            "--json" => json = true,
            _ => positional.push(arg),
        }
    }

    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HTTPCLIENT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut client = HttpClient::new();
    let response = match positional.as_slice() {
        [] => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
        [method, url] => client.command(url, method, None),
        [url, ..] => client.command(url, "GET", None),
    };

    let Some(response) = response else {
        eprintln!("no response (invalid URL or connection failed)");
        return ExitCode::FAILURE;
    };

    if json {
        match serde_json::to_string_pretty(&response) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("failed to encode response: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", response.code);
        println!("{}", response.body);
    }
    ExitCode::SUCCESS
}
