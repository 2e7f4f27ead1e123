//! Errors raised while editing a post.

use crate::base::neterror::NetError;
use thiserror::Error;

/// An expected piece of a forum page was missing or malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no hidden input with a {length}-character value found on {page}")]
    TokenNotFound { page: String, length: usize },
    #[error("form `#{form_id}` not found on the edit page")]
    FormNotFound { form_id: String },
    #[error("form `#{form_id}` has no action attribute")]
    FormActionMissing { form_id: String },
    #[error("form action `{action}` is not a valid URL")]
    InvalidFormAction { action: String },
    #[error("invalid CSS selector `{selector}`")]
    InvalidSelector { selector: String },
    #[error("unrecognized override field `{0}`")]
    UnknownField(String),
    #[error("invalid value `{value}` for override field `{field}`")]
    InvalidFieldValue { field: String, value: String },
}

/// Failure of one stage of an edit.
#[derive(Debug, Error)]
pub enum EditError {
    /// Any transport failure.
    #[error("network error: {0}")]
    Network(#[from] NetError),
    /// An expected HTML element was absent.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// The forum still shows the visitor as a guest after logging in.
    #[error("authentication failed: logged in as {shown:?}")]
    Authentication { shown: String },
    /// Writing a debug page dump failed.
    #[error("failed to write page dump {path}: {source}")]
    Dump {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    /// Short label of the error kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            EditError::Network(_) => "network",
            EditError::Parse(_) => "parse",
            EditError::Authentication { .. } => "authentication",
            EditError::Dump { .. } => "dump",
        }
    }

    /// Chromium error code of a transport failure.
    pub fn net_code(&self) -> Option<i32> {
        match self {
            EditError::Network(e) => Some(e.as_i32()),
            _ => None,
        }
    }
}
