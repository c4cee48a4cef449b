//! HTTP request builder
//!
//! A [`RequestBuilder`] accumulates the pieces of one request through chained
//! calls, then dispatches it once through a [`Transport`].
//!
//! ```no_run
//! use nx_http_client::{FileAttachment, Method, Params, RequestBuilder};
//!
//! async fn upload() -> nx_http_client::Response<serde_json::Value> {
//!     RequestBuilder::new("https://api.example.com/upload", Method::Post)
//!         .create_file_tag("docs")
//!         .add_file(FileAttachment::new("notes.txt", "hello"))
//!         .add_params(Params::from([("note", "hi")]))
//!         .build()
//!         .send_async()
//!         .await
//! }
//! ```

use std::fmt;

use serde::de::DeserializeOwned;

use crate::client::HttpClient;
use crate::form::{FileAttachment, FormData};
use crate::method::Method;
use crate::params::{Headers, Params, QueryEncoding};
use crate::response::{FetchResponse, Response};
use crate::transport::Transport;

/// Whether cookies and credentials go out with the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsMode {
    /// Never send cookies or credentials
    Omit,
    /// Transport default
    Default,
}

/// Outgoing request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized JSON text
    Json(String),
    /// Multipart form; the transport sets the content type and boundary
    Multipart(FormData),
}

/// Options handed to the transport alongside the URL
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// Request method
    pub method: Method,
    /// Headers, if any were set
    pub headers: Option<Headers>,
    /// Credentials mode, if one was set
    pub credentials: Option<CredentialsMode>,
    /// Body, if any
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    /// Options for `method` with nothing else set
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: None,
            credentials: None,
            body: None,
        }
    }
}

/// A finalized request, as it would be handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// Target URL including any appended query string
    pub url: String,
    /// Request options
    pub options: RequestOptions,
}

/// Fluent builder for one HTTP request
///
/// Setters overwrite earlier values, except that [`RequestBuilder::add_params`]
/// on a read method appends to the URL each time it is called. Call
/// [`RequestBuilder::build`] before dispatching so default headers are applied.
pub struct RequestBuilder<T = &'static HttpClient> {
    transport: T,
    url: String,
    options: RequestOptions,
    params: Option<Params>,
    files: Option<FormData>,
    file_tag: Option<String>,
    query_encoding: QueryEncoding,
}

impl<T> fmt::Debug for RequestBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("url", &self.url)
            .field("options", &self.options)
            .field("file_tag", &self.file_tag)
            .finish_non_exhaustive()
    }
}

impl RequestBuilder<&'static HttpClient> {
    /// Create a builder that dispatches through the process-wide [`HttpClient::shared`]
    ///
    /// `base_url` is not validated; a malformed URL fails at dispatch.
    pub fn new(base_url: impl Into<String>, method: Method) -> Self {
        Self::with_transport(HttpClient::shared(), base_url, method)
    }
}

impl<T: Transport> RequestBuilder<T> {
    /// Create a builder that dispatches through `transport`
    pub fn with_transport(transport: T, base_url: impl Into<String>, method: Method) -> Self {
        Self {
            transport,
            url: base_url.into(),
            options: RequestOptions::new(method),
            params: None,
            files: None,
            file_tag: None,
            query_encoding: QueryEncoding::default(),
        }
    }

    /// Replace the header set
    pub fn add_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.options.headers = Some(headers.into());
        self
    }

    /// Do not send cookies or credentials
    pub fn without_cookie(mut self) -> Self {
        self.options.credentials = Some(CredentialsMode::Omit);
        self
    }

    /// Choose how read-method parameters are written into the URL
    pub fn query_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.query_encoding = encoding;
        self
    }

    /// Add request parameters
    ///
    /// For `GET` the parameters are appended to the URL as `?k=v&k=v&`. Calling
    /// this twice appends twice. For every other method the parameters replace
    /// any earlier ones and become the JSON body.
    pub fn add_params(mut self, params: impl Into<Params>) -> Self {
        let params = params.into();

        if self.options.method.is_read() {
            self.url.push_str(&self.query_encoding.render(&params));
            tracing::trace!(url = %self.url, "Appended query parameters");
            return self;
        }

        self.options.body = Some(RequestBody::Json(params.to_json()));
        self.params = Some(params);
        self
    }

    /// Set the form field name used for attachments and folded parameters
    pub fn create_file_tag(mut self, tag: impl Into<String>) -> Self {
        self.file_tag = Some(tag.into());
        self
    }

    /// Attach one file, discarding any earlier attachments
    pub fn add_file(self, file: FileAttachment) -> Self {
        self.add_files([file])
    }

    /// Attach files in order, discarding any earlier attachments
    pub fn add_files(mut self, files: impl IntoIterator<Item = FileAttachment>) -> Self {
        if self.file_tag.is_none() {
            tracing::warn!("Attaching files without a file tag; field name will be empty");
        }

        let mut form = FormData::new();
        for file in files {
            form.append_file(self.file_tag.as_deref(), file);
        }
        tracing::trace!(count = form.len(), "Attached files");
        self.files = Some(form);
        self
    }

    /// Apply default JSON headers
    ///
    /// Defaults are only set when no headers were given, the method is not a
    /// read method and no file is attached.
    pub fn build(mut self) -> Self {
        if self.options.headers.is_none() && !self.options.method.is_read() && self.files.is_none()
        {
            self.options.headers = Some(Headers::from([
                ("Accept", "application/json"),
                ("Content-Type", "application/json"),
            ]));
        }
        self
    }

    /// Current URL, including any appended query string
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current options
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Cached body parameters
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Attached files
    pub fn files(&self) -> Option<&FormData> {
        self.files.as_ref()
    }

    /// Current file tag
    pub fn file_tag(&self) -> Option<&str> {
        self.file_tag.as_deref()
    }

    /// Current query encoding
    pub fn encoding(&self) -> QueryEncoding {
        self.query_encoding
    }

    /// Transport the request will be dispatched through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn into_parts(self) -> (T, PreparedRequest) {
        let mut options = self.options;
        if let Some(mut form) = self.files {
            if let Some(params) = &self.params {
                for (key, value) in params.iter() {
                    form.append_text(key, value.to_string());
                }
            }
            options.body = Some(RequestBody::Multipart(form));
        }

        (
            self.transport,
            PreparedRequest {
                url: self.url,
                options,
            },
        )
    }

    /// Finalize the body without dispatching
    ///
    /// Attached files become the body, with cached parameters folded in as text
    /// fields; any JSON body set earlier is dropped.
    pub fn into_request(self) -> PreparedRequest {
        self.into_parts().1
    }

    /// Dispatch the request and return the raw response
    ///
    /// The status code is not inspected.
    pub async fn send(self) -> Response<FetchResponse> {
        let (transport, request) = self.into_parts();
        tracing::debug!(
            method = %request.options.method,
            url = %request.url,
            "Sending request"
        );
        transport.fetch(&request.url, request.options).await
    }

    /// Dispatch the request and parse the response body as JSON
    pub async fn send_async(self) -> Response<serde_json::Value> {
        self.send_json().await
    }

    /// Dispatch the request and deserialize the response body as JSON
    pub async fn send_json<R: DeserializeOwned>(self) -> Response<R> {
        let response = self.send().await?;
        response.json().await
    }
}
