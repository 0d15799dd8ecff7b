//! In-process fake evaluation service
//!
//! Speaks just enough HTTP/1.1 for `reqwest`: one request per
//! connection, `Content-Length` bodies, `Connection: close` replies.
//!
//! ```text
//!   POST /api/check-domain HTTP/1.1
//!   content-type: application/json
//!   content-length: 24
//!
//!   {"domain":"example.com"}
//! ```

use super::responses::Responses;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Requests seen by the server, in arrival order.
#[derive(Debug, Default)]
struct Log {
    domains: Vec<String>,
    bodies: Vec<String>,
}

/// A fake evaluation service on localhost with an OS-assigned port.
///
/// The server runs until the `FakeCheckServer` is dropped.
pub struct FakeCheckServer {
    port: u16,
    log: Arc<Mutex<Log>>,
    handle: tokio::task::JoinHandle<()>,
}

#[allow(dead_code)]
impl FakeCheckServer {
    /// Start a server answering from `responses`.
    pub async fn start(responses: Responses) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to ephemeral port");
        let port = listener.local_addr().unwrap().port();

        let responses = Arc::new(responses);
        let log = Arc::new(Mutex::new(Log::default()));
        let server_log = log.clone();

        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _addr)) = listener.accept().await else {
                    break;
                };
                let responses = responses.clone();
                let log = server_log.clone();
                tokio::spawn(async move {
                    handle_connection(stream, &responses, &log).await;
                });
            }
        });

        Self { port, log, handle }
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Value for `SPOOFCHECK_URL` / `CheckerConfig::base_url`.
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Domains received so far.
    pub fn domains(&self) -> Vec<String> {
        self.log.lock().unwrap().domains.clone()
    }

    /// Raw request bodies received so far.
    pub fn bodies(&self) -> Vec<String> {
        self.log.lock().unwrap().bodies.clone()
    }
}

impl Drop for FakeCheckServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve a single request on `stream`.
async fn handle_connection(stream: TcpStream, responses: &Responses, log: &Mutex<Log>) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await.is_err() {
        return;
    }

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header).await {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    if !request_line.starts_with("POST /api/check-domain ") {
        respond(&mut reader, 404, r#"{"error":"Not found"}"#).await;
        return;
    }

    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).await.is_err() {
        return;
    }
    let body = String::from_utf8_lossy(&body).into_owned();

    let domain = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("domain").and_then(|d| d.as_str()).map(ToString::to_string));

    let Some(domain) = domain else {
        respond(&mut reader, 400, r#"{"error":"No domain provided"}"#).await;
        return;
    };

    {
        let mut log = log.lock().unwrap();
        log.domains.push(domain.clone());
        log.bodies.push(body);
    }

    match responses.get(&domain) {
        Some(scripted) => {
            tokio::time::sleep(scripted.delay).await;
            respond(&mut reader, scripted.status, &scripted.body).await;
        }
        None => respond(&mut reader, 404, r#"{"error":"Unknown domain"}"#).await,
    }
}

async fn respond(stream: &mut BufReader<TcpStream>, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Internal Server Error",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    );
    let stream = stream.get_mut();
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.flush().await;
    let _ = stream.shutdown().await;
}
