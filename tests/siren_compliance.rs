//! Siren wire format compliance tests
//!
//! These tests verify the documents produced for common resource graphs and
//! the rules applied when reading documents back.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use siren_codec::{
    codec::{Codec, Shape, SirenCodec},
    config::SirenConfig,
    policy::{
        EntityClassProvider, PluralRelationProvider, RelationEntityClassProvider,
        SimpleEntityClassProvider, StaticMessageSource, TitleCodes,
    },
    resource::{
        Affordance, Collection, Content, Entity, HttpMethod, InputType, Link, LinkRelation,
        PageMetadata, Paged, PropertyKind, Representation, Resource,
    },
    siren::{SirenAction, SirenError, SirenField, SirenLink},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Employee {
    name: String,
    age: u32,
}

fn peter() -> Employee {
    Employee {
        name: "Peter".into(),
        age: 33,
    }
}

fn to_json(codec: &SirenCodec, resource: impl Into<Resource>) -> Value {
    let bytes = codec.encode(&resource.into()).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_entity_with_update_action() {
    // PUT affordance on the self link renders as an action named after it
    let update = Affordance::new(HttpMethod::Put)
        .with_name("update")
        .with_input(
            InputType::new("Employee")
                .property("name", PropertyKind::String)
                .property("age", PropertyKind::Integer),
        );
    let resource = Entity::of(&peter())
        .unwrap()
        .with_link(Link::of("/employees/1").and_affordance(update));

    let json = to_json(&SirenCodec::new(), resource);

    assert_eq!(
        json,
        json!({
            "class": ["entity"],
            "properties": {"name": "Peter", "age": 33},
            "links": [{"rel": ["self"], "href": "/employees/1"}],
            "actions": [{
                "name": "update",
                "method": "PUT",
                "href": "/employees/1",
                "type": "application/json",
                "fields": [
                    {"name": "name", "type": "text"},
                    {"name": "age", "type": "number"}
                ]
            }]
        })
    );
}

#[test]
fn test_empty_collection() {
    let resource = Collection::empty().with_link(Link::of("/employees"));

    let json = to_json(&SirenCodec::new(), resource);

    assert_eq!(
        json,
        json!({
            "class": ["collection"],
            "properties": {"size": 0},
            "links": [{"rel": ["self"], "href": "/employees"}]
        })
    );
}

#[test]
fn test_empty_paged_collection() {
    let resource = Paged::new(Collection::empty(), PageMetadata::new(20, 0, 0, 0));

    let json = to_json(&SirenCodec::new(), resource);

    assert_eq!(
        json,
        json!({
            "class": ["paged"],
            "properties": {"size": 20, "number": 0, "totalElements": 0, "totalPages": 0}
        })
    );
    assert!(json.get("entities").is_none());
}

#[test]
fn test_page_metadata_from_totals() {
    let page = PageMetadata::from_totals(20, 1, 41);
    assert_eq!(page.total_pages, 3);
    assert_eq!(PageMetadata::from_totals(0, 0, 5).total_pages, 0);
}

#[test]
fn test_collection_of_entities_uses_derived_relations() {
    let resource = Collection::new([
        Entity::of(&peter()).unwrap(),
        Entity::of(&Employee {
            name: "Paul".into(),
            age: 44,
        })
        .unwrap(),
    ]);

    let json = to_json(&SirenCodec::new(), resource);

    assert_eq!(json["properties"], json!({"size": 2}));
    assert_eq!(json["entities"][0]["rel"], json!(["employee"]));
    assert_eq!(json["entities"][1]["class"], json!(["entity"]));
    assert_eq!(json["entities"][1]["properties"]["name"], "Paul");
}

#[test]
fn test_collection_of_values_is_keyed_by_collection_relation() {
    let resource = Collection::of(&[peter()]).unwrap();

    let json = to_json(&SirenCodec::new(), resource.clone());
    assert_eq!(
        json["properties"],
        json!({"employeeList": [{"name": "Peter", "age": 33}], "size": 1})
    );

    let plural = SirenCodec::builder()
        .with_relation_provider(Arc::new(PluralRelationProvider))
        .build()
        .unwrap();
    let json = to_json(&plural, resource);
    assert!(json["properties"].get("employees").is_some());
}

#[test]
fn test_relation_classes() {
    let relations = Arc::new(PluralRelationProvider);
    let codec = SirenCodec::builder()
        .with_relation_provider(relations.clone())
        .with_class_provider(Arc::new(RelationEntityClassProvider::new(relations)))
        .build()
        .unwrap();

    let json = to_json(&codec, Entity::of(&peter()).unwrap());
    assert_eq!(json["class"], json!(["employee"]));

    let json = to_json(&codec, Collection::of(&[peter()]).unwrap());
    assert_eq!(json["class"], json!(["employees"]));

    // untyped nodes keep the variant name
    let json = to_json(&codec, Representation::new());
    assert_eq!(json["class"], json!(["representation"]));
}

#[test]
fn test_simple_classes() {
    let provider = SimpleEntityClassProvider;
    let classes = |resource: Resource| provider.get(&resource).unwrap();

    assert_eq!(classes(Representation::new().into()), ["representation"]);
    assert_eq!(classes(Entity::new(json!({})).into()), ["entity"]);
    assert_eq!(classes(Collection::empty().into()), ["collection"]);
    assert_eq!(
        classes(Paged::new(Collection::empty(), PageMetadata::default()).into()),
        ["paged"]
    );
}

#[test]
fn test_embedded_link_content() {
    let resource = Entity::new(Link::new("/people/1", "author").with_type("text/html"));

    let json = to_json(&SirenCodec::new(), resource);

    assert_eq!(
        json["entities"],
        json!([{"rel": ["author"], "href": "/people/1", "type": "text/html"}])
    );
}

#[test]
fn test_explicit_relations_of_embedded_resources() {
    let manager = Entity::of(&peter()).unwrap();
    let resource = Entity::new(Content::embedded(["manager", "related"], manager));

    let json = to_json(&SirenCodec::new(), resource);

    assert_eq!(json["entities"][0]["rel"], json!(["manager", "related"]));
}

#[test]
fn test_untyped_embedded_resource_needs_relation() {
    let resource: Resource = Entity::new(Entity::new(json!({"a": 1}))).into();

    let err = SirenCodec::new().encode(&resource).unwrap_err();

    match err {
        SirenError::MissingRelation { path } => assert_eq!(path, "/entities/0"),
        other => panic!("Expected MissingRelation, got {other}"),
    }
}

#[test]
fn test_link_relations() {
    let link = Link::with_relations("/", ["self", "about", "self"]).unwrap();
    assert_eq!(link.relations(), [LinkRelation::SELF, LinkRelation::ABOUT]);

    let err = Link::with_relations("/", Vec::<&str>::new()).unwrap_err();
    assert!(matches!(err, SirenError::Construction(_)));

    // titles and affordances do not take part in equality
    let plain = Link::new("/a", "next");
    let decorated = Link::new("/a", "next")
        .with_title("Next page")
        .and_affordance(Affordance::new(HttpMethod::Get));
    assert_eq!(plain, decorated);
    assert_ne!(plain, Link::new("/a", "next").with_type("text/html"));
}

#[test]
fn test_link_title_codes() {
    assert_eq!(
        TitleCodes::link("about"),
        ["_link.about.title", "_link.default.title"]
    );

    let codec = SirenCodec::builder()
        .with_message_source(Arc::new(
            StaticMessageSource::new().with_message("_link.default.title", "Link"),
        ))
        .build()
        .unwrap();
    let resource = Representation::new()
        .with_link(Link::new("/about", "about"))
        .with_link(Link::new("/next", "next").with_title("Next"));

    let json = to_json(&codec, resource);

    assert_eq!(json["links"][0]["title"], "Link");
    assert_eq!(json["links"][1]["title"], "Next");
}

#[test]
fn test_wire_builders() {
    let action = SirenAction::builder().href("/employees").build();
    assert!(matches!(action, Err(SirenError::Construction(_))));

    let action = SirenAction::builder().name("list").build();
    assert!(matches!(action, Err(SirenError::Construction(_))));

    let action = SirenAction::builder()
        .name("list")
        .href("/employees")
        .build()
        .unwrap();
    assert_eq!(action.method, HttpMethod::Get);

    assert!(SirenField::builder().build().is_err());
    let field = SirenField::builder().name("q").build().unwrap();
    assert_eq!(serde_json::to_value(&field).unwrap(), json!({"name": "q", "type": "text"}));

    assert!(SirenLink::builder().rel("self").build().is_err());
    let link = SirenLink::builder().href("/").build().unwrap();
    assert!(link.rel.is_empty());
}

#[test]
fn test_media_type_support_is_strict() {
    let config = SirenConfig::new();

    assert!(config.supports_any(["text/html", "application/vnd.siren+json"]));
    assert!(!config.supports_any(["text/html", "application/hal+json"]));
    assert!(!config.supports("application/json"));
    assert_eq!(SirenCodec::new().content_type(), "application/vnd.siren+json");
}

#[test]
fn test_read_rejects_mismatched_shapes() {
    let codec = SirenCodec::new();
    let body = br#"{"class": ["entity"], "properties": {"name": "Peter"}}"#;

    let err = codec
        .decode(body, &Shape::entity(Shape::of::<Employee>()))
        .unwrap_err();
    assert!(matches!(err, SirenError::ShapeMismatch { .. }));

    let err = codec.decode(b"not json", &Shape::representation()).unwrap_err();
    assert!(matches!(err, SirenError::Serialization(_)));
}

#[test]
fn test_read_rejects_malformed_embedded_links() {
    let codec = SirenCodec::new();

    let body = br#"{"entities": [{"rel": ["author"], "href": 5}]}"#;
    let err = codec
        .decode(body, &Shape::entity(Shape::representation()))
        .unwrap_err();
    assert!(matches!(err, SirenError::Serialization(_)));

    let body = br#"{"entities": [{"rel": ["author"], "href": null, "properties": {"a": 1}}]}"#;
    let err = codec
        .decode(body, &Shape::entity(Shape::entity(Shape::value())))
        .unwrap_err();
    assert!(matches!(err, SirenError::Serialization(_)));
}

#[test]
fn test_read_ignores_actions_and_classes() {
    let body = br#"{
        "class": ["employee", "person"],
        "properties": {"name": "Peter", "age": 33},
        "links": [{"rel": ["self"], "href": "/employees/1", "class": ["x"]}],
        "actions": [{"name": "delete", "method": "DELETE", "href": "/employees/1"}]
    }"#;

    let resource = SirenCodec::new()
        .decode(body, &Shape::entity(Shape::of::<Employee>()))
        .unwrap();

    let Resource::Entity(entity) = resource else {
        panic!("Expected entity");
    };
    assert_eq!(entity.content_as::<Employee>().unwrap(), peter());
    assert_eq!(entity.links, [Link::of("/employees/1")]);
    assert!(entity.links[0].affordances().is_empty());
}
