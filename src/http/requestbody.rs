//! Request body for POST operations.

use bytes::Bytes;
use url::form_urlencoded;

/// `Content-Type` of a URL-encoded form body.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Request body for HTTP methods that send data.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body (GET, HEAD).
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` body, already serialized.
    Form(String),
}

impl RequestBody {
    /// Serialize `pairs` the way a browser submits a form: UTF-8,
    /// percent-encoded, spaces as `+`, in the given order.
    pub fn form<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in pairs {
            serializer.append_pair(name, value);
        }
        RequestBody::Form(serializer.finish())
    }

    /// Get the length of the body in bytes.
    pub fn len(&self) -> usize {
        match self {
            RequestBody::Empty => 0,
            RequestBody::Form(s) => s.len(),
        }
    }

    /// `Content-Type` implied by the body, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Form(_) => Some(FORM_URLENCODED),
            RequestBody::Empty => None,
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            RequestBody::Empty => Bytes::new(),
            RequestBody::Form(s) => Bytes::from(s),
        }
    }
}
