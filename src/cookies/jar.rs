//! Name-keyed cookie jar carried in a forum session.

use crate::cookies::canonicalcookie::CanonicalCookie;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Cookies for a single forum, keyed by name.
///
/// The jar is a value: merging returns a new jar and leaves the
/// original untouched, so a session snapshot never changes under a
/// later stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.keys().map(String::as_str)
    }

    /// Return a jar with `name=value` set.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Return a new jar with `received` applied on top of this one.
    ///
    /// Later cookies win on a name collision; a cookie that arrives
    /// already expired deletes the entry.
    pub fn merged(&self, received: &[CanonicalCookie]) -> Self {
        let now = OffsetDateTime::now_utc();
        let mut cookies = self.cookies.clone();
        for cookie in received {
            if cookie.is_expired(now) {
                cookies.remove(&cookie.name);
            } else {
                cookies.insert(cookie.name.clone(), cookie.value.clone());
            }
        }
        Self { cookies }
    }

    /// Format as a `Cookie` request header value, `None` when empty.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn parse(line: &str) -> CanonicalCookie {
        CanonicalCookie::parse(line).unwrap()
    }

    #[test]
    fn test_merge_overrides_on_collision() {
        let jar = CookieJar::new().with("PHPSESSID", "old").with("theme", "dark");
        let merged = jar.merged(&[parse("PHPSESSID=new")]);

        assert_eq!(merged.get("PHPSESSID"), Some("new"));
        assert_eq!(merged.get("theme"), Some("dark"));
        // The source jar is unchanged.
        assert_eq!(jar.get("PHPSESSID"), Some("old"));
    }

    #[test]
    fn test_merge_expired_cookie_removes_entry() {
        let jar = CookieJar::new().with("SMFCookie10", "abc");
        let merged = jar.merged(&[parse("SMFCookie10=deleted; Max-Age=0")]);
        assert!(merged.get("SMFCookie10").is_none());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_header_value() {
        assert_eq!(CookieJar::new().header_value(), None);

        let jar = CookieJar::new().with("b", "2").with("a", "1");
        assert_eq!(jar.header_value().as_deref(), Some("a=1; b=2"));
    }
}
