//! Anti-forgery token extraction.
//!
//! SMF renders its session check as a hidden input with a random name
//! and a 32-character hex value, and expects it back with every form
//! post. Nothing else marks it, so it is located by value length. That is
//! an assumption about this forum engine, not a general rule: the length
//! is configurable, the heuristic is not.

use crate::forum::error::ParseError;
use scraper::{Html, Selector};

/// Expected length of SMF's session-check value.
pub const SMF_TOKEN_LENGTH: usize = 32;

/// The hidden `name=value` pair a form post must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XssToken {
    pub name: String,
    pub value: String,
}

impl XssToken {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Find the first hidden input inside a form whose value is exactly
/// `length` characters long.
///
/// Length is counted in UTF-16 code units, as the browser counts it.
/// `page` only labels the error.
pub fn extract_token(html: &str, length: usize, page: &str) -> Result<XssToken, ParseError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("form input[type=hidden]").map_err(|_| {
        ParseError::InvalidSelector {
            selector: "form input[type=hidden]".to_string(),
        }
    })?;

    document
        .select(&selector)
        .find_map(|input| {
            let element = input.value();
            let value = element.attr("value")?;
            if value.encode_utf16().count() != length {
                return None;
            }
            Some(XssToken::new(element.attr("name").unwrap_or_default(), value))
        })
        .ok_or_else(|| ParseError::TokenNotFound {
            page: page.to_string(),
            length,
        })
}
