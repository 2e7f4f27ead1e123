use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::jar::CookieJar;
use crate::forum::token::XssToken;

/// State carried between the stages of an edit.
///
/// Stages take a session and return a new one; nothing mutates a
/// session another stage still holds, so a stale token cannot leak
/// forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: XssToken,
    cookies: CookieJar,
    user: Option<String>,
}

impl Session {
    pub fn new(token: XssToken, cookies: CookieJar) -> Self {
        Self {
            token,
            cookies,
            user: None,
        }
    }

    pub fn token(&self) -> &XssToken {
        &self.token
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Username shown by the forum after login, `None` before.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Replace the token with one scraped from a newer page.
    pub fn with_token(self, token: XssToken) -> Self {
        Self { token, ..self }
    }

    /// Merge cookies set by a response; new values win.
    pub fn with_cookies(self, received: &[CanonicalCookie]) -> Self {
        let cookies = self.cookies.merged(received);
        Self { cookies, ..self }
    }

    pub fn authenticated(self, user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..self
        }
    }
}
