//! In-process stand-in for the LIS2 service.
//!
//! Binds `127.0.0.1:0`, records every request and answers from a fixed route
//! table. Unknown paths get a 404. Each connection is served on its own
//! thread, optionally after a fixed delay.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const API_PREFIX: &str = "/api/v1";

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

pub struct StubService {
    port: u16,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubService {
    /// Starts a stub answering `routes` of `(endpoint, status, body)`.
    ///
    /// Endpoints are given without the `/api/v1` prefix, e.g. `"/load"`.
    pub fn start(routes: &[(&str, u16, &str)]) -> Self {
        Self::start_with_delay(routes, Duration::ZERO)
    }

    /// Like [`start`](Self::start), but holds every response back for `delay`.
    pub fn start_with_delay(routes: &[(&str, u16, &str)], delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
        let port = listener.local_addr().expect("local addr").port();

        let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
            routes
                .iter()
                .map(|(path, status, body)| {
                    (format!("{API_PREFIX}{path}"), (*status, body.to_string()))
                })
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || handle(stream, &routes, &recorded, delay));
            }
        });

        Self { port, requests }
    }

    /// Service address with a trailing slash, as a user might type it.
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}{API_PREFIX}/", self.port)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, endpoint: &str) -> Vec<RecordedRequest> {
        let path = format!("{API_PREFIX}{endpoint}");
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

/// An address on which nothing is listening.
pub fn refused_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}{API_PREFIX}")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn handle(
    stream: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    recorded: &Mutex<Vec<RecordedRequest>>,
    delay: Duration,
) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }

    let (status, response_body) = routes
        .get(&path)
        .cloned()
        .unwrap_or((404, "not found".to_string()));

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if !delay.is_zero() {
        thread::sleep(delay);
    }

    let reason = if (200..300).contains(&status) { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response_body}",
        response_body.len()
    );
    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
