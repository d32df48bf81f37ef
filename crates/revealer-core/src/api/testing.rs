//! Scripted in-memory transport for fetcher and orchestrator tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::transport::{HttpResponse, Transport};
use crate::retry::TransportError;

#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Reply(u32, String),
    /// curl error code, e.g. 7 (couldn't connect).
    CurlError(u32),
}

/// Replays a per-URL script of responses. The last scripted response
/// repeats forever; unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(self, url: &str, responses: Vec<Scripted>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), responses.into());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|u| u.as_str() == url).count()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        let mut scripts = self.scripts.lock().unwrap();
        let next = match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match next {
            Some(Scripted::Reply(status, body)) => Ok(HttpResponse {
                status,
                body: body.into_bytes(),
            }),
            Some(Scripted::CurlError(code)) => Err(TransportError::Curl(curl::Error::new(code))),
            None => Ok(HttpResponse {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}

/// Thread body holding a single comment.
pub(crate) fn thread_body(id: u64, html: &str) -> String {
    serde_json::json!({ "result": { "items": [ { "id": id, "html": html } ] } }).to_string()
}
