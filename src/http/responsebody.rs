//! Response body reading.
//! Mirrors Chromium's HttpStream::ReadResponseBody.

use crate::base::neterror::NetError;
use bytes::Bytes;
use http_body::Body;
use http_body_util::BodyExt;
use hyper::body::Incoming;

/// Response body wrapper, consumed once.
pub struct ResponseBody {
    inner: Incoming,
}

impl ResponseBody {
    pub fn new(inner: Incoming) -> Self {
        Self { inner }
    }

    /// Body length when the response declared one.
    pub fn content_length(&self) -> Option<u64> {
        self.inner.size_hint().exact()
    }

    /// Read entire body as bytes.
    pub async fn bytes(self) -> Result<Bytes, NetError> {
        let collected = self.inner.collect().await.map_err(|e| {
            tracing::debug!(error = %e, "failed to read response body");
            NetError::HttpBodyError
        })?;
        Ok(collected.to_bytes())
    }
}
