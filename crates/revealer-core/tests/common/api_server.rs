//! Minimal HTTP/1.1 server with scripted per-path responses for integration tests.
//!
//! Each path replays its list of (status, body) replies in order; the last
//! reply repeats forever. Unknown paths answer 404. Every request's path and
//! User-Agent are recorded.

use std::collections::{HashMap, VecDeque};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub user_agent: Option<String>,
}

type Scripts = Arc<Mutex<HashMap<String, VecDeque<(u32, String)>>>>;

pub struct ApiServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl ApiServer {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: Vec<(&str, Vec<(u32, String)>)>) -> ApiServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let scripts: Scripts = Arc::new(Mutex::new(
        routes
            .into_iter()
            .map(|(path, replies)| (path.to_string(), replies.into()))
            .collect(),
    ));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let scripts = Arc::clone(&scripts);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &scripts, &recorded));
        }
    });
    ApiServer {
        base: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, scripts: &Scripts, recorded: &Mutex<Vec<Recorded>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let (path, user_agent) = parse_request(request);
    recorded.lock().unwrap().push(Recorded {
        path: path.clone(),
        user_agent,
    });

    let (status, body) = {
        let mut scripts = scripts.lock().unwrap();
        match scripts.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or((404, String::new())),
            None => (404, String::new()),
        }
    };
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Returns (path, optional User-Agent header value).
fn parse_request(request: &str) -> (String, Option<String>) {
    let mut lines = request.lines();
    let path = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    let mut user_agent = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }
    (path, user_agent)
}

/// Thread body holding the given (id, html) items.
pub fn thread_body(items: &[(u64, &str)]) -> String {
    let items: Vec<_> = items
        .iter()
        .map(|(id, html)| serde_json::json!({ "id": id, "html": html }))
        .collect();
    serde_json::json!({ "result": { "items": items } }).to_string()
}
