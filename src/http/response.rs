//! Buffered HTTP response.

use crate::cookies::canonicalcookie::CanonicalCookie;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use url::Url;

/// A fully-read response plus the cookies it set.
///
/// Forum pages are small, so the body is read eagerly and the
/// connection released before the caller parses anything.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
    cookies: Vec<CanonicalCookie>,
}

impl HttpResponse {
    pub fn new(
        status: StatusCode,
        url: Url,
        headers: HeaderMap,
        body: Bytes,
        cookies: Vec<CanonicalCookie>,
    ) -> Self {
        Self {
            status,
            url,
            headers,
            body,
            cookies,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// URL this response was served from (after redirects).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// `Location` header, if present and valid ASCII.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(http::header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Cookies set by this response (and by redirects leading to it,
    /// when the request asked for that).
    pub fn cookies(&self) -> &[CanonicalCookie] {
        &self.cookies
    }

    pub(crate) fn with_cookies(mut self, cookies: Vec<CanonicalCookie>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8; invalid sequences are replaced rather
    /// than failing, since legacy boards mix encodings.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
