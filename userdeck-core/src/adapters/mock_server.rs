//! Mock user-management backend for testing
//!
//! A small HTTP/1.1 server on a random localhost port that mimics the real
//! backend's routes:
//! - GET /users returns `[User]`
//! - GET /users/{id} returns `User` or 404
//! - POST /users assigns a UUID and returns the created `User` (201)
//! - PUT /users/{id} overwrites `nome`/`email` and echoes the record
//! - DELETE /users/{id} returns `{"message": ...}`
//! - GET /cluster/nodes returns the configured topology
//!
//! Every request is recorded as `"METHOD /path"` for later assertions.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{ClusterTopologySnapshot, User, UserDraft, UserPatch};

/// Mock backend for tests
pub struct MockUserServer {
    port: u16,
    running: Arc<AtomicBool>,
    state: Arc<ServerState>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Behavior switches and seed data
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Users present before the first request
    pub initial_users: Vec<User>,
    /// Topology served from /cluster/nodes
    pub topology: ClusterTopologySnapshot,
    /// Answer every request with this status and an error body
    pub fail_status: Option<u16>,
    /// Answer every request with 200 and a body that is not valid JSON
    pub malformed_bodies: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

struct ServerState {
    config: Mutex<MockConfig>,
    users: Mutex<Vec<User>>,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ServerState {
    fn new(config: MockConfig) -> Self {
        Self {
            users: Mutex::new(config.initial_users.clone()),
            config: Mutex::new(config),
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }
}

impl MockUserServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let state = Arc::new(ServerState::new(config));
        let state_clone = state.clone();

        // Non-blocking accept so the loop can notice shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let state = state_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &state);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            state,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Users currently stored by the backend
    pub fn users(&self) -> Vec<User> {
        self.state.users.lock().unwrap().clone()
    }

    /// Requests received so far, e.g. `"PUT /users/1"`
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Highest number of requests that were being handled at the same time
    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }

    /// Switch failure injection on or off while running
    pub fn set_fail_status(&self, status: Option<u16>) {
        self.state.config.lock().unwrap().fail_status = status;
    }

    pub fn set_topology(&self, topology: ClusterTopologySnapshot) {
        self.state.config.lock().unwrap().topology = topology;
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockUserServer {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Request {
    method: String,
    path: String,
    body: Vec<u8>,
}

fn read_request(stream: &TcpStream) -> Option<Request> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(Request { method, path, body })
}

fn handle_connection(mut stream: TcpStream, state: &ServerState) {
    let _ = stream.set_nonblocking(false);

    let Some(request) = read_request(&stream) else {
        send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
        return;
    };

    let path = request.path.split('?').next().unwrap_or("").to_string();
    state
        .requests
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method, path));

    let current = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(current, Ordering::SeqCst);
    respond(&mut stream, &request, &path, state);
    state.in_flight.fetch_sub(1, Ordering::SeqCst);
}

fn respond(stream: &mut TcpStream, request: &Request, path: &str, state: &ServerState) {
    let config = state.config.lock().unwrap().clone();

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if let Some(status) = config.fail_status {
        send_response(stream, status, "Error", r#"{"error": "Injected failure"}"#);
        return;
    }

    if config.malformed_bodies {
        send_response(stream, 200, "OK", "<html>not json</html>");
        return;
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let (status, text, body) = route(request, &segments, &config, state);
    send_response(stream, status, text, &body);
}

fn route(
    request: &Request,
    segments: &[&str],
    config: &MockConfig,
    state: &ServerState,
) -> (u16, &'static str, String) {
    match (request.method.as_str(), segments) {
        ("GET", ["users"]) => {
            let users = state.users.lock().unwrap();
            (200, "OK", to_json(&*users))
        }
        ("POST", ["users"]) => match parse::<UserDraft>(&request.body) {
            Some(draft) => {
                let user = User::new(Uuid::new_v4().to_string(), draft.name, draft.email);
                state.users.lock().unwrap().push(user.clone());
                (201, "Created", to_json(&user))
            }
            None => bad_request(),
        },
        ("GET", ["users", id]) => {
            let users = state.users.lock().unwrap();
            match users.iter().find(|u| u.id == *id) {
                Some(user) => (200, "OK", to_json(user)),
                None => not_found("Usuário não encontrado"),
            }
        }
        ("PUT", ["users", id]) => match parse::<UserPatch>(&request.body) {
            Some(patch) => {
                let mut users = state.users.lock().unwrap();
                if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
                    user.name = patch.name.clone();
                    user.email = patch.email.clone();
                }
                let echoed = User::new(*id, patch.name, patch.email);
                (200, "OK", to_json(&echoed))
            }
            None => bad_request(),
        },
        ("DELETE", ["users", id]) => {
            state.users.lock().unwrap().retain(|u| u.id != *id);
            (
                200,
                "OK",
                r#"{"message": "Usuário deletado com sucesso"}"#.to_string(),
            )
        }
        ("GET", ["cluster", "nodes"]) => (200, "OK", to_json(&config.topology)),
        _ => not_found("Endpoint not found"),
    }
}

fn parse<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Option<T> {
    serde_json::from_slice(body).ok()
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn bad_request() -> (u16, &'static str, String) {
    (400, "Bad Request", r#"{"error": "Invalid body"}"#.to_string())
}

fn not_found(message: &str) -> (u16, &'static str, String) {
    (404, "Not Found", serde_json::json!({ "error": message }).to_string())
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
