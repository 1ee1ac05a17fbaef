use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use crate::ApiError;

/// Media types of a response envelope. Anything else is media, including
/// `image/svg+xml` covers.
const ENVELOPE_TYPES: &[&str] = &["application/json", "text/json", "application/xml", "text/xml"];

/// What came back from a GET, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The server sent a response envelope rather than media.
    pub fn is_envelope(&self) -> bool {
        let Some(content_type) = self.content_type.as_deref() else {
            return false;
        };
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        ENVELOPE_TYPES
            .iter()
            .any(|t| essence.eq_ignore_ascii_case(t))
    }
}

/// Performs a fully built GET request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<RawResponse, ApiError>;
}

/// A single `reqwest` client kept for the lifetime of the owning [`Client`].
///
/// [`Client`]: crate::Client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self {
            client: reqwest::ClientBuilder::new()
                .redirect(reqwest::redirect::Policy::none())
                .build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> Result<RawResponse, ApiError> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = res.bytes().await?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn raw(content_type: Option<&str>) -> RawResponse {
        RawResponse {
            status: StatusCode::OK,
            content_type: content_type.map(str::to_owned),
            body: Bytes::new(),
        }
    }

    #[test]
    fn envelope_content_types() {
        assert!(raw(Some("application/xml")).is_envelope());
        assert!(raw(Some("text/xml; charset=utf-8")).is_envelope());
        assert!(raw(Some("application/json")).is_envelope());
        assert!(!raw(Some("audio/mpeg")).is_envelope());
        assert!(!raw(Some("image/jpeg")).is_envelope());
        assert!(!raw(Some("image/svg+xml")).is_envelope());
        assert!(!raw(Some("application/xhtml+xml")).is_envelope());
        assert!(raw(Some("Application/JSON ; charset=UTF-8")).is_envelope());
        assert!(!raw(None).is_envelope());
    }
}
