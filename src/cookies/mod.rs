//! Cookie parsing and the per-session cookie jar.
//!
//! | Chromium (C++) | smfedit (Rust) | Responsibility |
//! |----------------|----------------|----------------|
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonicalcookie::CanonicalCookie) | One parsed `Set-Cookie` |
//! | `net::CookieMonster` | [`CookieJar`](jar::CookieJar) | Name-keyed jar for one forum |

pub mod canonicalcookie;
pub mod jar;
