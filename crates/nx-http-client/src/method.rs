//! Request methods

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HttpError;

/// Request method, fixed when a [`crate::RequestBuilder`] is created
///
/// `Update` is not a standard HTTP verb. It is sent on the wire as the literal
/// `UPDATE` and most servers will reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`, the read method
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case verb as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Update => "UPDATE",
            Method::Delete => "DELETE",
        }
    }

    /// Parameters of a read method travel in the query string, never in the body
    pub fn is_read(&self) -> bool {
        matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "UPDATE" => Ok(Method::Update),
            "DELETE" => Ok(Method::Delete),
            other => Err(HttpError::InvalidMethod(other.to_string())),
        }
    }
}

impl TryFrom<Method> for reqwest::Method {
    type Error = HttpError;

    fn try_from(method: Method) -> Result<Self, Self::Error> {
        reqwest::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|_| HttpError::InvalidMethod(method.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Put.as_str(), "PUT");
        assert_eq!(Method::Update.as_str(), "UPDATE");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_only_get_is_read() {
        assert!(Method::Get.is_read());
        assert!(!Method::Post.is_read());
        assert!(!Method::Update.is_read());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("UPDATE".parse::<Method>().expect("valid"), Method::Update);
        assert!(matches!(
            "get".parse::<Method>(),
            Err(HttpError::InvalidMethod(m)) if m == "get"
        ));
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn test_update_passes_through_to_reqwest() {
        let method = reqwest::Method::try_from(Method::Update).expect("extension token");
        assert_eq!(method.as_str(), "UPDATE");
        let method = reqwest::Method::try_from(Method::Get).expect("standard verb");
        assert_eq!(method, reqwest::Method::GET);
    }

    #[test]
    fn test_serde_literal() {
        let json = serde_json::to_string(&Method::Delete).expect("serializable");
        assert_eq!(json, "\"DELETE\"");
        let method: Method = serde_json::from_str("\"PUT\"").expect("valid literal");
        assert_eq!(method, Method::Put);
    }
}
