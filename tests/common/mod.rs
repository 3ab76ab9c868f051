#![allow(dead_code)]

use assert_cmd::Command;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

pub fn dons_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dons").unwrap();
    cmd.env_remove("DONS_CONFIG");
    cmd.env_remove("DONS_DATABASE");
    cmd.env_remove("RUST_LOG");
    // Anything that slips past validation hits a closed local port, never the real site
    cmd.env("DONS_BASE_URL", "http://127.0.0.1:1");
    cmd
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

/// Serve canned pages on a loopback port and return the base URL.
/// Unknown paths answer 404. The server thread lives until the test process exits.
pub fn serve_pages(pages: HashMap<String, String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            // Drain headers
            let mut line = String::new();
            while reader.read_line(&mut line).map(|n| n > 2).unwrap_or(false) {
                line.clear();
            }

            let path = request_line.split_whitespace().nth(1).unwrap_or("/");
            let (status, body) = match pages.get(path) {
                Some(body) => ("200 OK", body.as_str()),
                None => ("404 Not Found", "not found"),
            };
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    base_url
}
