use crate::base::neterror::NetError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::http::requestbody::RequestBody;
use crate::http::response::HttpResponse;
use crate::http::responsebody::ResponseBody;
use crate::socket::connectjob::ConnectJob;
use crate::socket::tls::TlsConfig;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE, COOKIE, HOST, SET_COOKIE};
use http::{HeaderMap, Method, Request, Response, Version};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use url::Url;

/// Internal state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CreateStream,
    SendRequest,
    ReadHeaders,
    ReadBody,
    Done,
}

/// One request/response exchange over a fresh connection.
/// Equivalent to net::HttpNetworkTransaction without pooling or retries.
pub struct HttpNetworkTransaction {
    url: Url,
    method: Method,
    headers: HeaderMap,
    body: RequestBody,
    cookie_header: Option<String>,
    tls: Arc<TlsConfig>,
    state: State,
    sender: Option<http1::SendRequest<Full<Bytes>>>,
    response: Option<Response<Incoming>>,
    result: Option<HttpResponse>,
}

impl HttpNetworkTransaction {
    pub fn new(url: Url, method: Method, tls: Arc<TlsConfig>) -> Self {
        Self {
            url,
            method,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            cookie_header: None,
            tls,
            state: State::Idle,
            sender: None,
            response: None,
            result: None,
        }
    }

    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.headers = headers;
    }

    pub fn set_body(&mut self, body: RequestBody) {
        self.body = body;
    }

    /// Set the `Cookie` header value sent with the request.
    pub fn set_cookie_header(&mut self, value: Option<String>) {
        self.cookie_header = value;
    }

    pub async fn start(&mut self) -> Result<(), NetError> {
        self.state = State::CreateStream;
        self.do_loop().await
    }

    async fn do_loop(&mut self) -> Result<(), NetError> {
        loop {
            match self.state {
                State::Idle | State::Done => return Ok(()),
                State::CreateStream => {
                    let socket = ConnectJob::connect(&self.url, &self.tls).await?;
                    tracing::debug!(
                        peer = ?socket.tcp().peer_addr().ok(),
                        secure = socket.is_secure(),
                        "connected"
                    );
                    let (sender, conn) = http1::handshake(TokioIo::new(socket))
                        .await
                        .map_err(|e| {
                            tracing::debug!(error = %e, "HTTP/1.1 handshake failed");
                            NetError::ConnectionFailed
                        })?;

                    // Drive the connection until the response body is read.
                    tokio::spawn(async move {
                        if let Err(e) = conn.await {
                            tracing::debug!(error = %e, "connection closed with error");
                        }
                    });

                    self.sender = Some(sender);
                    self.state = State::SendRequest;
                }
                State::SendRequest => {
                    tracing::debug!(
                        method = %self.method,
                        url = %self.url,
                        body = self.body.len(),
                        "sending request"
                    );
                    let req = self.build_request()?;
                    let sender = self.sender.as_mut().ok_or(NetError::ConnectionClosed)?;

                    let resp = sender.send_request(req).await.map_err(|e| {
                        tracing::debug!(error = %e, "request failed");
                        if e.is_incomplete_message() {
                            NetError::EmptyResponse
                        } else if e.is_parse() {
                            NetError::InvalidHttpResponse
                        } else {
                            NetError::ConnectionClosed
                        }
                    })?;
                    self.response = Some(resp);
                    self.state = State::ReadHeaders;
                }
                State::ReadHeaders => {
                    // Headers arrive with the response; nothing else to wait on.
                    self.state = State::ReadBody;
                }
                State::ReadBody => {
                    let resp = self.response.take().ok_or(NetError::EmptyResponse)?;
                    let (parts, incoming) = resp.into_parts();
                    let body = ResponseBody::new(incoming);
                    tracing::trace!(declared = ?body.content_length(), "reading body");
                    let body = body.bytes().await?;

                    let cookies: Vec<CanonicalCookie> = parts
                        .headers
                        .get_all(SET_COOKIE)
                        .iter()
                        .filter_map(|v| v.to_str().ok())
                        .filter_map(CanonicalCookie::parse)
                        .collect();

                    tracing::debug!(
                        url = %self.url,
                        status = parts.status.as_u16(),
                        bytes = body.len(),
                        cookies = cookies.len(),
                        "response received"
                    );

                    self.result = Some(HttpResponse::new(
                        parts.status,
                        self.url.clone(),
                        parts.headers,
                        body,
                        cookies,
                    ));
                    self.sender = None;
                    self.state = State::Done;
                }
            }
        }
    }

    fn build_request(&mut self) -> Result<Request<Full<Bytes>>, NetError> {
        let mut headers = self.headers.clone();

        if !headers.contains_key(HOST) {
            let host = self.url.host_str().ok_or(NetError::InvalidUrl)?;
            let host = match self.url.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            headers.insert(
                HOST,
                HeaderValue::from_str(&host).map_err(|_| NetError::InvalidHeader)?,
            );
        }

        if let Some(cookie) = &self.cookie_header {
            headers.insert(
                COOKIE,
                HeaderValue::from_str(cookie).map_err(|_| NetError::InvalidHeader)?,
            );
        }

        if let Some(content_type) = self.body.content_type() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        // Origin-form target: path plus query, as HTTP/1.1 expects.
        let mut target = self.url.path().to_string();
        if let Some(query) = self.url.query() {
            target.push('?');
            target.push_str(query);
        }

        let body = std::mem::take(&mut self.body).into_bytes();
        let mut req = Request::builder()
            .method(self.method.clone())
            .uri(target)
            .version(Version::HTTP_11)
            .body(Full::new(body))
            .map_err(|_| NetError::InvalidUrl)?;
        *req.headers_mut() = headers;
        Ok(req)
    }

    /// Take the buffered response. Can only be called once.
    pub fn take_response(&mut self) -> Option<HttpResponse> {
        self.result.take()
    }
}
