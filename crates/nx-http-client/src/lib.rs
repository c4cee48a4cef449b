//! Fluent builder for a single HTTP request
//!
//! [`RequestBuilder`] accumulates method, headers, query or body parameters and
//! file attachments, then dispatches the request through a [`Transport`] and
//! optionally parses the response body as JSON. [`HttpClient`] is the default,
//! reqwest-backed transport.
//!
//! # Example
//!
//! ```no_run
//! use nx_http_client::{Method, Params, RequestBuilder};
//!
//! async fn example() -> nx_http_client::Response<serde_json::Value> {
//!     RequestBuilder::new("https://api.example.com/items", Method::Post)
//!         .add_params(Params::from([("name", "widget")]))
//!         .without_cookie()
//!         .build()
//!         .send_async()
//!         .await
//! }
//! ```

mod client;
mod error;
mod form;
mod method;
mod params;
mod request;
mod response;
mod settings;
mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use form::{FileAttachment, FormData, FormEntry, FormValue};
pub use method::Method;
pub use params::{Headers, ParamValue, Params, QueryEncoding};
pub use request::{CredentialsMode, PreparedRequest, RequestBody, RequestBuilder, RequestOptions};
pub use response::{FetchResponse, Response};
pub use settings::Settings;
pub use transport::Transport;
