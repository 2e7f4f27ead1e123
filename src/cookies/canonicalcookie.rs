use cookie::Cookie;
use time::OffsetDateTime;

/// A cookie received in a `Set-Cookie` header.
/// Modeled after Chromium's `net::CanonicalCookie`, keeping what a
/// single-forum jar needs: the pair and when it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub expiration_time: Option<OffsetDateTime>,
}

impl CanonicalCookie {
    /// Parse a `Set-Cookie` line.
    ///
    /// Returns `None` for lines the `cookie` crate rejects (missing `=`,
    /// empty name).
    pub fn parse(cookie_line: &str) -> Option<Self> {
        let parsed = match Cookie::parse(cookie_line) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(error = %e, "failed to parse Set-Cookie line");
                return None;
            }
        };

        // Max-Age wins over Expires (RFC 6265 §5.3 step 3).
        let expiration_time = match parsed.max_age() {
            Some(age) => Some(OffsetDateTime::now_utc() + age),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        Some(Self {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            expiration_time,
        })
    }

    /// A cookie is expired once its expiry is not in the future.
    /// Session cookies (no expiry) never expire here.
    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        self.expiration_time
            .is_some_and(|expiry| expiry <= current_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_cookie() {
        let c = CanonicalCookie::parse("PHPSESSID=abc123; path=/; HttpOnly").unwrap();
        assert_eq!(c.name, "PHPSESSID");
        assert_eq!(c.value, "abc123");
        assert_eq!(c.expiration_time, None);
        assert!(!c.is_expired(OffsetDateTime::now_utc()));
    }

    #[test]
    fn test_attributes_do_not_leak_into_value() {
        let c = CanonicalCookie::parse("SMFCookie=x; Domain=.Example.com; Secure").unwrap();
        assert_eq!(c.name, "SMFCookie");
        assert_eq!(c.value, "x");
    }

    #[test]
    fn test_max_age_zero_is_expired() {
        let c = CanonicalCookie::parse("gone=; Max-Age=0").unwrap();
        assert!(c.is_expired(OffsetDateTime::now_utc()));
    }

    #[test]
    fn test_max_age_wins_over_expires() {
        let c = CanonicalCookie::parse(
            "both=1; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=3600",
        )
        .unwrap();
        assert!(!c.is_expired(OffsetDateTime::now_utc()));
    }

    #[test]
    fn test_past_expires_is_expired() {
        let c = CanonicalCookie::parse("old=1; Expires=Thu, 01 Jan 1970 00:00:00 GMT").unwrap();
        assert!(c.is_expired(OffsetDateTime::now_utc()));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(CanonicalCookie::parse("no-equals-sign").is_none());
    }
}
