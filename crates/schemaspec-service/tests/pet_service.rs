//! Integration tests for a pet service declared against compiled record types

use schemaspec_core::{FieldDescriptor, RecordInstance, RecordType};
use schemaspec_service::{http, rpc, HttpMethod, Service, ServiceError, ServiceGroup, ServiceMember};
use serde_json::json;

fn pet() -> RecordType {
    RecordType::builder("Pet")
        .field("name", FieldDescriptor::string().with_min_length(3).with_max_length(100))
        .field("age", FieldDescriptor::integer().with_min_value(0).with_max_value(30))
        .field("species", FieldDescriptor::enumeration(["dog", "cat", "bird"]))
        .field("tags", FieldDescriptor::array(FieldDescriptor::string().with_max_length(20)))
        .build()
        .unwrap()
}

fn list_pets_request() -> RecordType {
    RecordType::builder("ListPetsRequest")
        .field("tag", FieldDescriptor::string().with_description("Filter by tag"))
        .field("species", FieldDescriptor::string().with_description("Filter by species"))
        .field(
            "limit",
            FieldDescriptor::integer().with_min_value(1).with_max_value(100).with_default(10),
        )
        .build()
        .unwrap()
}

fn list_pets_response() -> RecordType {
    RecordType::builder("ListPetsResponse")
        .field("items", FieldDescriptor::array(pet()))
        .field("total", FieldDescriptor::integer())
        .build()
        .unwrap()
}

fn list_pets(request: RecordInstance) -> anyhow::Result<RecordInstance> {
    let species = request.text("species").unwrap_or_default().to_string();
    let response = list_pets_response().construct_value(&json!({
        "items": [{"name": "Buddy", "age": 5, "species": species, "tags": ["friendly"]}],
        "total": 1
    }))?;
    Ok(response)
}

struct PetService;

impl Service for PetService {
    const NAME: &'static str = "PetService";

    fn group() -> ServiceGroup {
        ServiceGroup::new(Self::NAME)
            .member(
                ServiceMember::new("list_pets", list_pets)
                    .with_request(list_pets_request())
                    .with_response(list_pets_response())
                    .annotate(
                        http("/pets")
                            .with_method(HttpMethod::Get)
                            .with_query(["tag", "species", "limit"]),
                    )
                    .annotate(rpc("ListPets")),
            )
            .member(ServiceMember::new("audit", Ok))
    }
}

#[cfg(test)]
mod method_metadata {
    use super::*;

    #[test]
    fn test_service_method_metadata() {
        let methods = PetService::methods();
        assert!(methods.contains_key("list_pets"));
        assert!(!methods.contains_key("audit"));

        let method = &methods["list_pets"];
        let route = method.http_route().unwrap();
        assert_eq!(route.path, "/pets");
        assert_eq!(route.method, HttpMethod::Get);
        assert_eq!(route.query_params, vec!["tag", "species", "limit"]);
        assert_eq!(method.rpc_method().unwrap().name, "ListPets");
        assert_eq!(method.request_type().unwrap().name(), "ListPetsRequest");
    }

    #[test]
    fn test_describe_for_generators() {
        let described = PetService::group().describe();
        assert_eq!(described["service"], "PetService");
        let method = &described["methods"][0];
        assert_eq!(method["name"], "list_pets");
        assert_eq!(method["http"], json!({
            "path": "/pets", "method": "GET", "query_params": ["tag", "species", "limit"]
        }));
        assert_eq!(method["rpc"], json!({"name": "ListPets"}));
        assert_eq!(method["request"]["properties"]["limit"]["default"], 10);
        assert_eq!(method["response"]["properties"]["items"]["items"]["title"], "Pet");
    }
}

#[cfg(test)]
mod invocation {
    use super::*;

    #[test]
    fn test_annotated_member_is_still_callable() {
        let group = PetService::group();
        let request = list_pets_request()
            .construct_value(&json!({"tag": "friendly", "species": "dog"}))
            .unwrap();
        let response = group.call("list_pets", request).unwrap();
        assert_eq!(response.integer("total"), Some(1));
        let first = response.list("items").unwrap()[0].as_record().unwrap();
        assert_eq!(first.text("species"), Some("dog"));
    }

    #[test]
    fn test_call_json_validates_through_request_type() {
        let group = PetService::group();
        let err = group
            .call_json("list_pets", &json!({"tag": "friendly", "species": "dog", "limit": 500}))
            .unwrap_err();
        match err {
            ServiceError::InvalidRequest { method, source } => {
                assert_eq!(method, "list_pets");
                assert!(source.violation_at("$.limit").is_some());
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_handler_failure_surfaces_nested_validation() {
        let group = PetService::group();
        let err = group
            .call_json("list_pets", &json!({"tag": "friendly", "species": "hamster"}))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Handler { .. }));
        assert!(err.to_string().contains("list_pets"));
    }

    #[test]
    fn test_plain_member_is_callable() {
        let group = PetService::group();
        let request = pet()
            .construct_value(&json!({"name": "Luna", "age": 2, "species": "bird"}))
            .unwrap();
        let echoed = group.call("audit", request.clone()).unwrap();
        assert_eq!(echoed, request);
    }
}
