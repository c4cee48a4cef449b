//! Transport abstraction
//!
//! A [`Transport`] performs the network call for a finished request. The crate
//! ships [`crate::HttpClient`], a reqwest-backed implementation. Tests and
//! embedders can substitute their own.

use std::future::Future;
use std::sync::Arc;

use crate::request::RequestOptions;
use crate::response::{FetchResponse, Response};

/// Fetch-like capability consumed by [`crate::RequestBuilder`]
pub trait Transport: Send + Sync {
    /// Dispatch one request to `url` and resolve with its response
    ///
    /// Implementations must not retry, and must surface network failures as
    /// errors without translating the response status.
    fn fetch(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Response<FetchResponse>> + Send;
}

impl<T: Transport> Transport for &T {
    fn fetch(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Response<FetchResponse>> + Send {
        (**self).fetch(url, options)
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn fetch(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Response<FetchResponse>> + Send {
        (**self).fetch(url, options)
    }
}
