//! Service members: named callables carrying optional route and RPC metadata

use crate::error::{Result, ServiceError};
use crate::metadata::{Annotation, HttpRoute, RpcMethod};
use schemaspec_core::{RecordInstance, RecordType};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// The callable wrapped by a member
pub type Handler = Arc<dyn Fn(RecordInstance) -> anyhow::Result<RecordInstance> + Send + Sync>;

/// A named callable of a service group
///
/// Members are invoked the same way whether or not they carry metadata; the
/// metadata is only read by [`crate::ServiceGroup::methods`] and by whatever
/// consumes [`crate::ServiceGroup::describe`].
#[derive(Clone)]
pub struct ServiceMember {
    name: String,
    handler: Handler,
    http_route: Option<HttpRoute>,
    rpc_method: Option<RpcMethod>,
    request: Option<RecordType>,
    response: Option<RecordType>,
}

impl ServiceMember {
    pub fn new<N, F>(name: N, handler: F) -> Self
    where
        N: Into<String>,
        F: Fn(RecordInstance) -> anyhow::Result<RecordInstance> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            handler: Arc::new(handler),
            http_route: None,
            rpc_method: None,
            request: None,
            response: None,
        }
    }

    /// Attach route or RPC metadata
    pub fn annotate<A: Annotation>(mut self, annotation: A) -> Self {
        annotation.attach(&mut self);
        self
    }

    /// Declare the record type this member takes
    pub fn with_request(mut self, request: RecordType) -> Self {
        self.request = Some(request);
        self
    }

    /// Declare the record type this member returns
    pub fn with_response(mut self, response: RecordType) -> Self {
        self.response = Some(response);
        self
    }

    pub(crate) fn set_http_route(&mut self, route: HttpRoute) {
        self.http_route = Some(route);
    }

    pub(crate) fn set_rpc_method(&mut self, method: RpcMethod) {
        self.rpc_method = Some(method);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn http_route(&self) -> Option<&HttpRoute> {
        self.http_route.as_ref()
    }

    pub fn rpc_method(&self) -> Option<&RpcMethod> {
        self.rpc_method.as_ref()
    }

    pub fn request_type(&self) -> Option<&RecordType> {
        self.request.as_ref()
    }

    pub fn response_type(&self) -> Option<&RecordType> {
        self.response.as_ref()
    }

    /// True when the member carries route or RPC metadata
    pub fn is_annotated(&self) -> bool {
        self.http_route.is_some() || self.rpc_method.is_some()
    }

    /// Invoke the wrapped callable
    pub fn call(&self, request: RecordInstance) -> Result<RecordInstance> {
        trace!(method = %self.name, "calling service member");
        (self.handler)(request).map_err(|source| ServiceError::Handler {
            method: self.name.clone(),
            source,
        })
    }

    /// Build the request through the declared request type, then invoke
    pub fn call_json(&self, request: &Value) -> Result<RecordInstance> {
        let request_type = self
            .request
            .as_ref()
            .ok_or_else(|| ServiceError::MissingRequestType {
                method: self.name.clone(),
            })?;
        let request = request_type
            .construct_value(request)
            .map_err(|source| ServiceError::InvalidRequest {
                method: self.name.clone(),
                source,
            })?;
        self.call(request)
    }

    /// Metadata of this member as JSON, for external generators
    pub fn describe(&self) -> Value {
        json!({
            "name": self.name,
            "http": self.http_route,
            "rpc": self.rpc_method,
            "request": self.request.as_ref().map(RecordType::json_schema),
            "response": self.response.as_ref().map(RecordType::json_schema),
        })
    }
}

impl fmt::Debug for ServiceMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceMember")
            .field("name", &self.name)
            .field("http_route", &self.http_route)
            .field("rpc_method", &self.rpc_method)
            .field("request", &self.request.as_ref().map(RecordType::name))
            .field("response", &self.response.as_ref().map(RecordType::name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{http, rpc, HttpMethod};
    use schemaspec_core::FieldDescriptor;

    fn echo() -> ServiceMember {
        ServiceMember::new("echo", Ok)
    }

    #[test]
    fn test_reapplying_overwrites() {
        let member = echo()
            .annotate(http("/old"))
            .annotate(http("/new").with_method(HttpMethod::Post));
        let route = member.http_route().unwrap();
        assert_eq!(route.path, "/new");
        assert_eq!(route.method, HttpMethod::Post);
        assert!(member.rpc_method().is_none());
    }

    #[test]
    fn test_annotation_order_does_not_matter() {
        let a = echo().annotate(http("/pets")).annotate(rpc("ListPets"));
        let b = echo().annotate(rpc("ListPets")).annotate(http("/pets"));
        assert_eq!(a.http_route(), b.http_route());
        assert_eq!(a.rpc_method(), b.rpc_method());
        assert!(a.is_annotated() && b.is_annotated());
    }

    #[test]
    fn test_call_json_without_request_type() {
        let err = echo().call_json(&serde_json::json!({})).unwrap_err();
        assert!(matches!(err, ServiceError::MissingRequestType { .. }));
    }

    #[test]
    fn test_handler_errors_are_wrapped() {
        let record = RecordType::builder("Empty").build().unwrap();
        let failing = ServiceMember::new("fail", |_| anyhow::bail!("store offline"))
            .with_request(record.clone());
        let request = record.construct(&serde_json::Map::new()).unwrap();
        let err = failing.call(request).unwrap_err();
        assert_eq!(err.to_string(), "Method 'fail' failed: store offline");
    }

    #[test]
    fn test_describe_includes_schemas() {
        let request = RecordType::builder("Ping")
            .field("message", FieldDescriptor::string())
            .build()
            .unwrap();
        let member = echo().with_request(request).annotate(rpc("Echo"));
        let described = member.describe();
        assert_eq!(described["rpc"]["name"], "Echo");
        assert!(described["http"].is_null());
        assert_eq!(described["request"]["title"], "Ping");
        assert!(described["response"].is_null());
    }
}
