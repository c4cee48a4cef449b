//! HTTP client wrapper

use once_cell::sync::Lazy;

use crate::error::HttpError;
use crate::method::Method;
use crate::params::QueryEncoding;
use crate::request::{CredentialsMode, RequestBody, RequestBuilder, RequestOptions};
use crate::response::{FetchResponse, Response};
use crate::settings::Settings;
use crate::transport::Transport;

static SHARED: Lazy<HttpClient> = Lazy::new(HttpClient::new);

/// reqwest-backed [`Transport`]
///
/// Requests with [`CredentialsMode::Omit`] go through a second client that never
/// keeps a cookie store.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    cookieless: reqwest::Client,
    query_encoding: QueryEncoding,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Self {
        let inner = reqwest::Client::new();
        Self {
            cookieless: inner.clone(),
            inner,
            query_encoding: QueryEncoding::default(),
        }
    }

    /// Process-wide client used by [`RequestBuilder::new`]
    ///
    /// Built on first use, so the TLS trust store is loaded once per process.
    pub fn shared() -> &'static HttpClient {
        &SHARED
    }

    /// Create a new HTTP client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create an HttpClient from a reqwest::Client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self {
            cookieless: client.clone(),
            inner: client,
            query_encoding: QueryEncoding::default(),
        }
    }

    /// Create an HttpClient from loaded [`Settings`]
    pub fn from_settings(settings: &Settings) -> Response<Self> {
        HttpClientBuilder::from_settings(settings).build()
    }

    /// Query encoding applied to builders created by this client
    pub fn query_encoding(&self) -> QueryEncoding {
        self.query_encoding
    }

    // === Request builder methods ===

    /// Request builder dispatching through this client
    pub fn request(&self, url: &str, method: Method) -> RequestBuilder<HttpClient> {
        RequestBuilder::with_transport(self.clone(), url, method)
            .query_encoding(self.query_encoding)
    }

    /// GET request builder
    pub fn get(&self, url: &str) -> RequestBuilder<HttpClient> {
        self.request(url, Method::Get)
    }

    /// POST request builder
    pub fn post(&self, url: &str) -> RequestBuilder<HttpClient> {
        self.request(url, Method::Post)
    }

    /// PUT request builder
    pub fn put(&self, url: &str) -> RequestBuilder<HttpClient> {
        self.request(url, Method::Put)
    }

    /// UPDATE request builder
    pub fn update(&self, url: &str) -> RequestBuilder<HttpClient> {
        self.request(url, Method::Update)
    }

    /// DELETE request builder
    pub fn delete(&self, url: &str) -> RequestBuilder<HttpClient> {
        self.request(url, Method::Delete)
    }
}

impl Transport for HttpClient {
    async fn fetch(&self, url: &str, options: RequestOptions) -> Response<FetchResponse> {
        let client = match options.credentials {
            Some(CredentialsMode::Omit) => &self.cookieless,
            _ => &self.inner,
        };

        let method = reqwest::Method::try_from(options.method)?;
        let mut request = client.request(method, url);

        if let Some(headers) = &options.headers {
            for (name, value) in headers.iter() {
                request = request.header(name, value);
            }
        }

        match options.body {
            Some(RequestBody::Json(json)) => request = request.body(json),
            Some(RequestBody::Multipart(form)) => {
                request = request.multipart(form.into_multipart()?);
            }
            None => {}
        }

        tracing::debug!(method = %options.method, url, "Dispatching request");
        let response = request.send().await.map_err(HttpError::from)?;
        tracing::debug!(status = response.status().as_u16(), url, "Received response");

        FetchResponse::from_reqwest(response).await
    }
}

/// HTTP client builder for configuring cookie and user agent settings
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    cookie_store: bool,
    user_agent: Option<String>,
    query_encoding: QueryEncoding,
}

impl HttpClientBuilder {
    /// Start from loaded [`Settings`]
    pub fn from_settings(settings: &Settings) -> Self {
        let builder = HttpClientBuilder::default()
            .cookie_store(settings.cookie_store)
            .query_encoding(settings.query_encoding);

        match &settings.user_agent {
            Some(user_agent) => builder.user_agent(user_agent),
            None => builder,
        }
    }

    /// Keep cookies received from servers and send them on later requests
    pub fn cookie_store(mut self, enable: bool) -> Self {
        self.cookie_store = enable;
        self
    }

    /// Set the `User-Agent` sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Default query encoding for builders created from the client
    pub fn query_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.query_encoding = encoding;
        self
    }

    fn client(&self, cookie_store: bool) -> Response<reqwest::Client> {
        let mut builder = reqwest::Client::builder().cookie_store(cookie_store);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        builder.build().map_err(HttpError::from)
    }

    /// Build the HTTP client
    pub fn build(self) -> Response<HttpClient> {
        let inner = self.client(self.cookie_store)?;
        let cookieless = if self.cookie_store {
            self.client(false)?
        } else {
            inner.clone()
        };

        Ok(HttpClient {
            inner,
            cookieless,
            query_encoding: self.query_encoding,
        })
    }
}
