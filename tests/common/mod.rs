//! Shared test fixtures for the snapprice integration tests.
//!
//! Provides a fake camera backend, a scripted lookup backend, and a one-shot
//! HTTP responder. The fakes write to a shared [`EventLog`] so tests can
//! assert on ordering (e.g. tracks stopped before the image is sent).

#![allow(dead_code)]

use snapprice::camera::{Facing, MediaDevices, MediaStream, Snapshot};
use snapprice::models::ScanResponse;
use snapprice::{PriceLookup, Result, SnapPriceError};
use snapprice::models::ScanRequest;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }
}

// ---------------------------------------------------------------------------
// Fake camera
// ---------------------------------------------------------------------------

pub struct FakeMedia {
    pub log: EventLog,
    pub deny: bool,
    pub fail_snapshot: bool,
    granted: usize,
}

impl FakeMedia {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            deny: false,
            fail_snapshot: false,
            granted: 0,
        }
    }

    pub fn denying(log: &EventLog) -> Self {
        Self {
            deny: true,
            ..Self::new(log)
        }
    }
}

impl MediaDevices for FakeMedia {
    type Stream = FakeStream;

    fn get_user_media(&mut self, facing: Facing) -> Result<FakeStream> {
        if self.deny {
            self.log.push("denied");
            return Err(SnapPriceError::Camera("NotAllowedError".into()));
        }
        assert_eq!(facing, Facing::Environment);
        self.granted += 1;
        self.log.push(format!("grant:{}", self.granted));
        Ok(FakeStream {
            log: self.log.clone(),
            id: self.granted,
            fail_snapshot: self.fail_snapshot,
        })
    }
}

pub struct FakeStream {
    log: EventLog,
    id: usize,
    fail_snapshot: bool,
}

impl MediaStream for FakeStream {
    fn snapshot(&mut self, quality: f32) -> Result<Snapshot> {
        if self.fail_snapshot {
            return Err(SnapPriceError::Camera("video not ready".into()));
        }
        self.log.push(format!("snapshot:{}:{}", self.id, quality));
        Ok(Snapshot {
            mime: "image/jpeg".into(),
            bytes: b"frame".to_vec(),
            width: 4,
            height: 3,
        })
    }

    fn stop_tracks(&mut self) {
        self.log.push(format!("stop:{}", self.id));
    }
}

// ---------------------------------------------------------------------------
// Fake lookup
// ---------------------------------------------------------------------------

/// A scripted reply for [`FakeLookup`].
pub enum Reply {
    Json(&'static str),
    Transport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Scan(ScanRequest),
    Search(String),
}

pub struct FakeLookup {
    log: EventLog,
    replies: VecDeque<Reply>,
    pub sent: Arc<Mutex<Vec<Sent>>>,
}

impl FakeLookup {
    pub fn new(log: &EventLog, replies: Vec<Reply>) -> Self {
        Self {
            log: log.clone(),
            replies: replies.into(),
            sent: Arc::default(),
        }
    }

    fn reply(&mut self) -> Result<ScanResponse> {
        match self.replies.pop_front() {
            Some(Reply::Json(body)) => Ok(serde_json::from_str(body)?),
            Some(Reply::Transport) => Err(SnapPriceError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            None => panic!("unexpected lookup request"),
        }
    }
}

impl PriceLookup for FakeLookup {
    fn scan(&mut self, request: &ScanRequest) -> Result<ScanResponse> {
        self.log.push("scan");
        self.sent.lock().unwrap().push(Sent::Scan(request.clone()));
        self.reply()
    }

    fn search(&mut self, item_name: &str) -> Result<ScanResponse> {
        self.log.push("search");
        self.sent.lock().unwrap().push(Sent::Search(item_name.to_string()));
        self.reply()
    }
}

pub const WIDGET: &str = r#"{
    "status": "success",
    "item_name": "Widget",
    "price_info": {
        "average_price": 9.999,
        "min_price": 5,
        "max_price": 15,
        "prices": [5, 9.999, 15],
        "price_count": 3
    }
}"#;

// ---------------------------------------------------------------------------
// One-shot HTTP responder
// ---------------------------------------------------------------------------

/// Serves exactly one HTTP response on a loopback port and hands back the raw
/// request it received.
pub struct OneShotServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

pub fn serve_once(status: &str, content_type: &str, body: &str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });

    OneShotServer {
        base_url: format!("http://{}/api", addr),
        handle,
    }
}

fn read_request(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(end) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Body of a raw HTTP request, parsed as JSON.
pub fn request_json(request: &str) -> serde_json::Value {
    let body = request.split("\r\n\r\n").nth(1).unwrap_or("");
    serde_json::from_str(body).unwrap()
}

/// A loopback URL nothing is listening on.
pub fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}
