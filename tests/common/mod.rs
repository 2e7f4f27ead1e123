//! Raw `TcpListener` mock server shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded `application/x-www-form-urlencoded` body.
    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }
}

pub type Log = Arc<Mutex<Vec<Recorded>>>;

/// Start a server answering every connection with `handler`.
/// Returns `http://127.0.0.1:<port>` and the request log.
pub async fn serve<F>(handler: F) -> (String, Log)
where
    F: Fn(&Recorded, &str) -> String + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://{}", addr);
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let handler = Arc::new(handler);
    let server_log = log.clone();
    let server_base = base.clone();
    tokio::spawn(async move {
        loop {
            if let Ok((socket, _)) = listener.accept().await {
                let handler = handler.clone();
                let log = server_log.clone();
                let base = server_base.clone();
                tokio::spawn(async move {
                    handle(socket, handler.as_ref(), &log, &base).await;
                });
            }
        }
    });

    (base, log)
}

async fn handle<F>(mut socket: TcpStream, handler: &F, log: &Log, base: &str)
where
    F: Fn(&Recorded, &str) -> String,
{
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    let response = handler(&request, base);
    log.lock().unwrap().push(request);
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<Recorded> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Some(Recorded {
        method,
        target,
        headers,
        body,
    })
}

/// `200 OK` with an HTML body.
pub fn html(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

/// `200 OK` with an HTML body and `Set-Cookie` lines.
pub fn html_with_cookies(body: &str, cookies: &[&str]) -> String {
    let set_cookie: String = cookies
        .iter()
        .map(|c| format!("Set-Cookie: {}\r\n", c))
        .collect();
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        set_cookie,
        body.len(),
        body
    )
}

/// A redirect with `status` to `location`, optionally setting cookies.
pub fn redirect(status: &str, location: &str, cookies: &[&str]) -> String {
    let set_cookie: String = cookies
        .iter()
        .map(|c| format!("Set-Cookie: {}\r\n", c))
        .collect();
    format!(
        "HTTP/1.1 {}\r\nLocation: {}\r\n{}Content-Length: 0\r\nConnection: close\r\n\r\n",
        status, location, set_cookie
    )
}
