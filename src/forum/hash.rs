//! SMF login hashing.
//!
//! The board's login form never sends the password. The browser sends
//! `sha1(sha1(lower(user) . password) . token)` instead, where both
//! strings have been through the theme script's `to8bit` re-encoding.
//! The server recomputes the same value, so every step here must match
//! the script byte for byte, quirks included.

use boring::sha::sha1;

/// Re-encode a string the way SMF's `String.prototype.to8bit` does.
///
/// Each UTF-16 code unit is expanded into its UTF-8 byte sequence and each
/// byte becomes one char in the range 0–255. Surrogate halves are encoded
/// on their own as three bytes, exactly like the script.
pub fn to8bit(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for unit in input.encode_utf16() {
        let n = unit as u32;
        if n < 0x80 {
            out.push(byte_char(n));
        } else if n < 0x800 {
            out.push(byte_char(0xC0 | n >> 6));
            out.push(byte_char(0x80 | (n & 63)));
        } else {
            out.push(byte_char(0xE0 | n >> 12));
            out.push(byte_char(0x80 | (n >> 6 & 63)));
            out.push(byte_char(0x80 | (n & 63)));
        }
    }
    out
}

fn byte_char(n: u32) -> char {
    char::from((n & 0xFF) as u8)
}

/// `toLowerCase()` over a byte-valued string.
///
/// Only ASCII capitals and the Latin-1 capitals `À`–`Þ` (minus `×`) have a
/// lowercase form inside 0–255; both shift by 0x20. This also folds UTF-8
/// lead bytes 0xC0–0xDE, which the browser does too.
fn lower_8bit(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'A'..='Z' | '\u{C0}'..='\u{DE}' if c != '\u{D7}' => {
                char::from_u32(c as u32 + 0x20).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Bytes of a byte-valued string (every char is ≤ 0xFF).
fn latin1_bytes(input: &str) -> Vec<u8> {
    input.chars().map(|c| (c as u32 & 0xFF) as u8).collect()
}

fn sha1_hex(data: &[u8]) -> String {
    hex::encode(sha1(data))
}

/// Compute the `hash_passwrd` login field.
pub fn hash_password(username: &str, password: &str, token: &str) -> String {
    let mut credentials = latin1_bytes(&lower_8bit(&to8bit(username)));
    credentials.extend(latin1_bytes(&to8bit(password)));

    let inner = sha1_hex(&credentials);
    let mut salted = inner.into_bytes();
    salted.extend_from_slice(token.as_bytes());
    sha1_hex(&salted)
}
