//! Service groups and the annotated-method lookup

use crate::error::{Result, ServiceError};
use crate::member::ServiceMember;
use indexmap::IndexMap;
use schemaspec_core::RecordInstance;
use serde_json::{json, Value};
use tracing::debug;

/// A named, ordered collection of service members
#[derive(Debug, Clone)]
pub struct ServiceGroup {
    name: String,
    members: IndexMap<String, ServiceMember>,
}

impl ServiceGroup {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            members: IndexMap::new(),
        }
    }

    /// Add a member; a later member with the same name replaces the earlier one
    /// but keeps its position
    pub fn member(mut self, member: ServiceMember) -> Self {
        debug!(
            service = %self.name,
            member = %member.name(),
            annotated = member.is_annotated(),
            "registering service member"
        );
        self.members.insert(member.name().to_string(), member);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&ServiceMember> {
        self.members.get(name)
    }

    /// Every member, annotated or not, in declaration order
    pub fn members(&self) -> impl Iterator<Item = &ServiceMember> {
        self.members.values()
    }

    /// Members carrying route or RPC metadata, keyed by declared name
    pub fn methods(&self) -> IndexMap<&str, &ServiceMember> {
        self.members
            .iter()
            .filter(|(_, member)| member.is_annotated())
            .map(|(name, member)| (name.as_str(), member))
            .collect()
    }

    /// Owned form of [`ServiceGroup::methods`]
    pub fn into_methods(self) -> IndexMap<String, ServiceMember> {
        self.members
            .into_iter()
            .filter(|(_, member)| member.is_annotated())
            .collect()
    }

    /// Invoke a member by name
    pub fn call(&self, name: &str, request: RecordInstance) -> Result<RecordInstance> {
        self.lookup(name)?.call(request)
    }

    /// Invoke a member by name with raw JSON input
    pub fn call_json(&self, name: &str, request: &Value) -> Result<RecordInstance> {
        self.lookup(name)?.call_json(request)
    }

    fn lookup(&self, name: &str) -> Result<&ServiceMember> {
        self.members
            .get(name)
            .ok_or_else(|| ServiceError::UnknownMember {
                service: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Metadata of every annotated method as one JSON document
    pub fn describe(&self) -> Value {
        let methods: Vec<Value> = self
            .methods()
            .values()
            .map(|member| member.describe())
            .collect();
        json!({
            "service": self.name,
            "methods": methods,
        })
    }
}

/// A service declared as a type, mirroring class-level method declarations
pub trait Service {
    const NAME: &'static str;

    /// Declare every member of the service
    fn group() -> ServiceGroup;

    /// Annotated members of the service, keyed by declared name
    fn methods() -> IndexMap<String, ServiceMember> {
        Self::group().into_methods()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{http, rpc};

    fn group() -> ServiceGroup {
        ServiceGroup::new("Things")
            .member(ServiceMember::new("list", Ok).annotate(http("/things")))
            .member(ServiceMember::new("helper", Ok))
            .member(ServiceMember::new("get", Ok).annotate(rpc("GetThing")))
    }

    #[test]
    fn test_methods_exclude_plain_members() {
        let group = group();
        let names: Vec<_> = group.methods().keys().copied().collect();
        assert_eq!(names, vec!["list", "get"]);
        assert_eq!(group.members().count(), 3);
        assert!(group.get("helper").is_some());
    }

    #[test]
    fn test_redeclared_member_replaces_in_place() {
        let group = group().member(ServiceMember::new("list", Ok));
        assert_eq!(group.members().next().unwrap().name(), "list");
        assert!(!group.methods().contains_key("list"));
    }

    #[test]
    fn test_unknown_member() {
        let err = group().call_json("missing", &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Service 'Things' has no member named 'missing'");
    }

    #[test]
    fn test_describe_lists_annotated_methods() {
        let described = group().describe();
        assert_eq!(described["service"], "Things");
        assert_eq!(described["methods"].as_array().unwrap().len(), 2);
        assert_eq!(described["methods"][0]["http"]["path"], "/things");
        assert_eq!(described["methods"][1]["rpc"]["name"], "GetThing");
    }
}
