//! Client settings
//!
//! Settings are read from a TOML file layered over [`Settings::default`].
//!
//! ```toml
//! cookie_store = true
//! user_agent = "my-app/1.0"
//! query_encoding = "percent"
//! ```

use std::path::Path;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::params::QueryEncoding;
use crate::response::Response;

/// Transport and builder settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keep a cookie store for requests that do not omit credentials
    pub cookie_store: bool,
    /// `User-Agent` header value
    pub user_agent: Option<String>,
    /// How read-method parameters are written into the URL
    pub query_encoding: QueryEncoding,
}

impl Settings {
    /// Load settings from a file; the format is taken from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Response<Self> {
        let config = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load settings from a TOML string
    pub fn from_toml(contents: &str) -> Response<Self> {
        let config = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
