//! HTTP response types

use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::params::Headers;

/// HTTP Response type - generic over the body type R and error type E
/// This is the primary return type for all HTTP operations
pub type Response<R, E = HttpError> = Result<R, E>;

/// Response returned by a [`crate::Transport`], with the body already read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    status: u16,
    headers: Headers,
    body: Vec<u8>,
}

impl FetchResponse {
    /// Create a response from its parts
    pub fn new(status: u16, headers: Headers, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Read a reqwest response to completion
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Response<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let body = response.bytes().await.map_err(HttpError::from)?;
        Ok(Self::new(status, headers, body.to_vec()))
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response status is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response status is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Response headers
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a response header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Turn a non-2xx status into [`HttpError::Status`] carrying the body text
    pub fn error_for_status(self) -> Response<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(HttpError::Status {
            status: self.status,
            message: String::from_utf8_lossy(&self.body).into_owned(),
        })
    }

    /// Get the response body as text
    pub async fn text(self) -> Response<String> {
        String::from_utf8(self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// Get the response body as JSON
    pub async fn json<T: DeserializeOwned>(self) -> Response<T> {
        serde_json::from_slice(&self.body).map_err(HttpError::from)
    }

    /// Get the response body as bytes
    pub async fn bytes(self) -> Response<Vec<u8>> {
        Ok(self.body)
    }
}
