use crate::base::neterror::NetError;
use crate::cookies::jar::CookieJar;
use crate::http::requestbody::RequestBody;
use crate::http::response::HttpResponse;
use crate::http::transaction::HttpNetworkTransaction;
use crate::socket::tls::TlsConfig;
use http::{HeaderMap, Method, StatusCode};
use std::sync::Arc;
use url::Url;

/// Drives a request through its redirect chain.
///
/// Cookies are only attached to hops on the original host. With
/// `follow_set_cookies`, cookies set by a redirect response on that host
/// are sent on the next hop and reported on the final response.
pub struct URLRequestHttpJob {
    url: Url,
    method: Method,
    headers: HeaderMap,
    body: RequestBody,
    cookies: CookieJar,
    tls: Arc<TlsConfig>,
    redirect_limit: u8,
    follow_set_cookies: bool,
    response: Option<HttpResponse>,
}

impl URLRequestHttpJob {
    pub fn new(url: Url, method: Method, tls: Arc<TlsConfig>) -> Self {
        Self {
            url,
            method,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            cookies: CookieJar::new(),
            tls,
            redirect_limit: 0,
            follow_set_cookies: false,
            response: None,
        }
    }

    pub fn set_headers(&mut self, headers: HeaderMap) {
        self.headers = headers;
    }

    pub fn set_body(&mut self, body: RequestBody) {
        self.body = body;
    }

    pub fn set_cookies(&mut self, cookies: CookieJar) {
        self.cookies = cookies;
    }

    /// Maximum redirects to follow; 0 returns the first response as-is.
    pub fn set_redirect_limit(&mut self, limit: u8) {
        self.redirect_limit = limit;
    }

    pub fn set_follow_set_cookies(&mut self, follow: bool) {
        self.follow_set_cookies = follow;
    }

    pub async fn start(&mut self) -> Result<(), NetError> {
        let origin_host = self.url.host_str().map(str::to_owned);
        let follow = self.redirect_limit > 0;
        let mut remaining = self.redirect_limit;
        let mut jar = self.cookies.clone();
        let mut collected = Vec::new();

        loop {
            let same_host = self.url.host_str().map(str::to_owned) == origin_host;

            let mut transaction =
                HttpNetworkTransaction::new(self.url.clone(), self.method.clone(), self.tls.clone());
            transaction.set_headers(self.headers.clone());
            transaction.set_body(self.body.clone());
            transaction.set_cookie_header(if same_host { jar.header_value() } else { None });
            transaction.start().await?;
            let response = transaction.take_response().ok_or(NetError::EmptyResponse)?;

            // A foreign hop's cookies belong to that host, not this session.
            if self.follow_set_cookies && same_host {
                jar = jar.merged(response.cookies());
                collected.extend_from_slice(response.cookies());
            }

            let next = if follow {
                self.redirect_target(&response)?
            } else {
                None
            };

            let Some(next_url) = next else {
                self.response = Some(if self.follow_set_cookies {
                    response.with_cookies(collected)
                } else {
                    response
                });
                return Ok(());
            };

            if remaining == 0 {
                return Err(NetError::TooManyRedirects);
            }
            remaining -= 1;

            tracing::debug!(
                from = %self.url,
                to = %next_url,
                status = response.status().as_u16(),
                "following redirect"
            );

            // 303, and 301/302 after a POST, continue as a body-less GET.
            let status = response.status();
            if status == StatusCode::SEE_OTHER
                || (self.method == Method::POST
                    && (status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND))
            {
                self.method = Method::GET;
                self.body = RequestBody::Empty;
            }
            self.url = next_url;
        }
    }

    /// Resolve the redirect target of `response`, if it is a redirect.
    fn redirect_target(&self, response: &HttpResponse) -> Result<Option<Url>, NetError> {
        if !response.status().is_redirection() || response.status() == StatusCode::NOT_MODIFIED {
            return Ok(None);
        }
        let Some(location) = response.location() else {
            return Ok(None);
        };
        let next = self.url.join(location).map_err(|_| NetError::InvalidRedirect)?;
        if next.scheme() != "http" && next.scheme() != "https" {
            return Err(NetError::InvalidRedirect);
        }
        Ok(Some(next))
    }

    /// Take the final response. Can only be called once.
    pub fn take_response(&mut self) -> Option<HttpResponse> {
        self.response.take()
    }
}
