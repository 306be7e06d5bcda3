//! Route and RPC metadata, and the annotations that attach them
//!
//! Annotations are plain values. Attaching one to a [`ServiceMember`]
//! overwrites any earlier metadata of the same kind and leaves the other kind
//! alone, so the order in which annotations are applied does not matter.

use crate::error::ServiceError;
use crate::member::ServiceMember;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// HTTP verb of a route
///
/// Verbs outside the standard set are kept as [`HttpMethod::Other`], upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
    /// An extension verb such as `PURGE`
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Other(verb) => verb,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP token characters (RFC 9110 `tchar`)
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

impl FromStr for HttpMethod {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let verb = s.to_ascii_uppercase();
        match verb.as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "TRACE" => Ok(HttpMethod::Trace),
            "CONNECT" => Ok(HttpMethod::Connect),
            other if !other.is_empty() && other.chars().all(is_token_char) => {
                Ok(HttpMethod::Other(other.to_string()))
            }
            _ => Err(ServiceError::InvalidHttpMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let verb = String::deserialize(deserializer)?;
        verb.parse().map_err(de::Error::custom)
    }
}

/// HTTP route metadata: path, verb and query parameters in declared order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRoute {
    pub path: String,
    pub method: HttpMethod,
    pub query_params: Vec<String>,
}

impl HttpRoute {
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_query<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_params = params.into_iter().map(Into::into).collect();
        self
    }
}

/// RPC metadata: the remote method name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcMethod {
    pub name: String,
}

/// Route annotation for `path`, defaulting to GET with no query parameters
pub fn http<P: Into<String>>(path: P) -> HttpRoute {
    HttpRoute {
        path: path.into(),
        method: HttpMethod::default(),
        query_params: Vec::new(),
    }
}

/// RPC annotation with the given method name
pub fn rpc<N: Into<String>>(name: N) -> RpcMethod {
    RpcMethod { name: name.into() }
}

/// Metadata that can be attached to a service member
pub trait Annotation {
    fn attach(self, member: &mut ServiceMember);
}

impl Annotation for HttpRoute {
    fn attach(self, member: &mut ServiceMember) {
        member.set_http_route(self);
    }
}

impl Annotation for RpcMethod {
    fn attach(self, member: &mut ServiceMember) {
        member.set_rpc_method(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_defaults() {
        let route = http("/pets");
        assert_eq!(route.method, HttpMethod::Get);
        assert!(route.query_params.is_empty());
    }

    #[test]
    fn test_query_order_is_preserved() {
        let route = http("/pets").with_query(["tag", "species", "limit"]);
        assert_eq!(route.query_params, vec!["tag", "species", "limit"]);
    }

    #[test]
    fn test_http_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!("trace".parse::<HttpMethod>().unwrap(), HttpMethod::Trace);
        assert_eq!("CONNECT".parse::<HttpMethod>().unwrap(), HttpMethod::Connect);
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(serde_json::to_value(HttpMethod::Post).unwrap(), "POST");
    }

    #[test]
    fn test_extension_verbs() {
        let purge = "purge".parse::<HttpMethod>().unwrap();
        assert_eq!(purge, HttpMethod::Other("PURGE".to_string()));
        assert_eq!(purge.to_string(), "PURGE");
        assert_eq!(serde_json::to_value(&purge).unwrap(), "PURGE");
        assert_eq!(
            serde_json::from_value::<HttpMethod>(serde_json::json!("PROPFIND")).unwrap(),
            HttpMethod::Other("PROPFIND".to_string())
        );

        let route = http("/cache").with_method(purge);
        assert_eq!(route.method.as_str(), "PURGE");

        assert!("".parse::<HttpMethod>().is_err());
        assert!("GET ME".parse::<HttpMethod>().is_err());
        assert!(serde_json::from_value::<HttpMethod>(serde_json::json!("BAD VERB")).is_err());
    }
}
