//! HTTP Client with builder pattern.
//!
//! A small, cookie-explicit client: every request is given the cookie jar
//! it should send, and hands back the cookies the server set, so callers
//! decide what to keep.
//!
//! # Example
//!
//! ```rust,ignore
//! use smfedit::client::Client;
//! use smfedit::cookies::jar::CookieJar;
//!
//! let client = Client::builder()
//!     .timeout(std::time::Duration::from_secs(30))
//!     .build();
//!
//! let resp = client
//!     .post("https://example.com/index.php?action=login2")
//!     .cookies(&CookieJar::new())
//!     .form([("user", "me")])
//!     .follow(5)
//!     .send()
//!     .await?;
//! ```

use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::requestbody::RequestBody;
use crate::http::response::HttpResponse;
use crate::socket::tls::TlsConfig;
use crate::urlrequest::job::URLRequestHttpJob;
use http::header::{HeaderValue, ACCEPT, USER_AGENT};
use http::{HeaderMap, Method};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("smfedit/", env!("CARGO_PKG_VERSION"));

/// HTTP Client for making requests.
///
/// Use [`Client::builder()`] to configure and create a client.
#[derive(Clone)]
pub struct Client {
    tls: Arc<TlsConfig>,
    user_agent: String,
    timeout: Option<Duration>,
    redirect_limit: u8,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Start building a GET request.
    pub fn get<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Start building a POST request.
    pub fn post<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// Start building a request with custom method.
    pub fn request<U: AsRef<str>>(&self, method: Method, url: U) -> RequestBuilder {
        let mut headers = HeaderMap::new();
        if let Ok(ua) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );

        RequestBuilder {
            client: self.clone(),
            method,
            url: url.as_ref().to_string(),
            headers,
            body: RequestBody::Empty,
            cookies: CookieJar::new(),
            redirect_limit: self.redirect_limit,
            follow_set_cookies: false,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for creating a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    user_agent: Option<String>,
    timeout: Option<Duration>,
    redirect_limit: u8,
}

impl ClientBuilder {
    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a per-request timeout covering connect, redirects and body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Redirects followed by requests that don't call
    /// [`RequestBuilder::follow`]. Defaults to 0.
    pub fn redirect_limit(mut self, max: u8) -> Self {
        self.redirect_limit = max;
        self
    }

    /// Build the client.
    pub fn build(self) -> Client {
        Client {
            tls: Arc::new(TlsConfig::default()),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout: self.timeout,
            redirect_limit: self.redirect_limit,
        }
    }
}

/// Builder for a single request.
pub struct RequestBuilder {
    client: Client,
    method: Method,
    url: String,
    headers: HeaderMap,
    body: RequestBody,
    cookies: CookieJar,
    redirect_limit: u8,
    follow_set_cookies: bool,
}

impl RequestBuilder {
    /// Send these cookies with the request.
    pub fn cookies(mut self, jar: &CookieJar) -> Self {
        self.cookies = jar.clone();
        self
    }

    /// Set a URL-encoded form body.
    pub fn form<'a, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.body = RequestBody::form(pairs);
        self
    }

    /// Follow up to `max` redirects; 0 returns the first response.
    pub fn follow(mut self, max: u8) -> Self {
        self.redirect_limit = max;
        self
    }

    /// Carry cookies set by redirect responses into the next hop.
    pub fn follow_set_cookies(mut self, enabled: bool) -> Self {
        self.follow_set_cookies = enabled;
        self
    }

    /// Send the request.
    pub async fn send(self) -> Result<HttpResponse, NetError> {
        let url = Url::parse(&self.url).map_err(|_| NetError::InvalidUrl)?;

        let mut job = URLRequestHttpJob::new(url, self.method, self.client.tls.clone());
        job.set_headers(self.headers);
        job.set_body(self.body);
        job.set_cookies(self.cookies);
        job.set_redirect_limit(self.redirect_limit);
        job.set_follow_set_cookies(self.follow_set_cookies);

        match self.client.timeout {
            Some(limit) => tokio::time::timeout(limit, job.start())
                .await
                .map_err(|_| NetError::ConnectionTimedOut)??,
            None => job.start().await?,
        }

        job.take_response().ok_or(NetError::EmptyResponse)
    }
}
