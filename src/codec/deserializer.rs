//! Siren document to resource graph decoder

use serde_json::{Map, Value};

use super::{
    serializer::{
        child_path, COLLECTION_KEYS, NUMBER, PAGED_KEYS, SIZE, TOTAL_ELEMENTS, TOTAL_PAGES,
        VALUE_PROPERTY,
    },
    shape::{Leaf, Shape},
};
use crate::{
    config::DEFAULT_MAX_DEPTH,
    resource::{
        Collection, Content, Embedded, Entity, Link, LinkRelation, PageMetadata, Paged, Payload,
        Representation, Resource,
    },
    siren::{
        error::{SirenError, SirenResult},
        SirenEmbedded, SirenEmbeddedLink, SirenEntity, SirenLink,
    },
};

/// Shape-directed decoder from a Siren document to a resource graph
///
/// Classes and actions are not read back. Actions carry no input type, so
/// they cannot be turned into affordances again.
#[derive(Debug, Clone, Copy)]
pub struct SirenDeserializer {
    max_depth: usize,
}

impl SirenDeserializer {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decode `doc` as a resource graph of the given shape
    pub fn deserialize(&self, doc: &SirenEntity, shape: &Shape) -> SirenResult<Resource> {
        tracing::debug!(%shape, "deserializing siren document");
        self.resource(doc, shape, "/", 0)
    }

    fn resource(
        &self,
        doc: &SirenEntity,
        shape: &Shape,
        path: &str,
        depth: usize,
    ) -> SirenResult<Resource> {
        if depth > self.max_depth {
            return Err(SirenError::DepthExceeded {
                max: self.max_depth,
            });
        }

        let links = read_links(&doc.links, path)?;
        let resource: Resource = match shape {
            Shape::Representation => Representation { links }.into(),
            Shape::Entity(inner) => Entity {
                content: self.entity_content(doc, inner, path, depth)?,
                links,
            }
            .into(),
            Shape::Collection(inner) => Collection {
                items: self.items(doc, inner, COLLECTION_KEYS, path, depth)?,
                item_type: inner.type_name().map(str::to_string),
                links,
            }
            .into(),
            Shape::Paged(inner) => {
                let page = page_metadata(&doc.properties, path)?;
                let collection = Collection {
                    items: self.items(doc, inner, PAGED_KEYS, path, depth)?,
                    item_type: inner.type_name().map(str::to_string),
                    links,
                };
                Paged::new(collection, page).into()
            }
            Shape::Link | Shape::Leaf(_) => {
                return Err(SirenError::shape_mismatch(
                    path,
                    format!("{shape} cannot be read from a Siren entity"),
                ))
            }
        };

        Ok(resource)
    }

    fn entity_content(
        &self,
        doc: &SirenEntity,
        inner: &Shape,
        path: &str,
        depth: usize,
    ) -> SirenResult<Content> {
        if let Shape::Leaf(leaf) = inner {
            if !doc.entities.is_empty() {
                return Err(SirenError::shape_mismatch(
                    path,
                    format!("expected {inner} properties, found embedded entities"),
                ));
            }
            let value = properties_value(&doc.properties, leaf, path)?;
            return Ok(Content::Value(payload(value, leaf)));
        }

        match doc.entities.as_slice() {
            [embedded] => self.embedded(embedded, inner, &child_path(path, 0), depth + 1),
            entities => Err(SirenError::shape_mismatch(
                path,
                format!(
                    "expected exactly one embedded {inner}, found {}",
                    entities.len()
                ),
            )),
        }
    }

    fn items(
        &self,
        doc: &SirenEntity,
        inner: &Shape,
        synthetic: &[&str],
        path: &str,
        depth: usize,
    ) -> SirenResult<Vec<Content>> {
        let mut unmapped = doc
            .properties
            .iter()
            .filter(|(key, _)| !synthetic.contains(&key.as_str()));

        let Shape::Leaf(leaf) = inner else {
            if let Some((key, _)) = unmapped.next() {
                return Err(SirenError::shape_mismatch(
                    path,
                    format!("unmapped property '{key}' in a collection of {inner}"),
                ));
            }
            return doc
                .entities
                .iter()
                .enumerate()
                .map(|(index, embedded)| {
                    self.embedded(embedded, inner, &child_path(path, index), depth + 1)
                })
                .collect();
        };

        if !doc.entities.is_empty() {
            return Err(SirenError::shape_mismatch(
                path,
                format!("expected {inner} values, found embedded entities"),
            ));
        }

        let (key, values) = match (unmapped.next(), unmapped.next()) {
            (None, _) => return Ok(Vec::new()),
            (Some((key, Value::Array(values))), None) => (key, values),
            (Some((key, _)), None) => {
                return Err(SirenError::shape_mismatch(
                    path,
                    format!("collection property '{key}' is not an array"),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(SirenError::shape_mismatch(
                    path,
                    "more than one unmapped property in a collection",
                ))
            }
        };

        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                if leaf.accepts(value) {
                    Ok(Content::Value(payload(value.clone(), leaf)))
                } else {
                    Err(SirenError::shape_mismatch(
                        format!("{}/properties/{key}/{index}", path.trim_end_matches('/')),
                        format!("value does not match {inner}"),
                    ))
                }
            })
            .collect()
    }

    fn embedded(
        &self,
        embedded: &SirenEmbedded,
        shape: &Shape,
        path: &str,
        depth: usize,
    ) -> SirenResult<Content> {
        match (shape, embedded) {
            (Shape::Link, SirenEmbedded::Link(link)) => {
                Ok(Content::Link(embedded_link(link, path)?))
            }
            (Shape::Link, SirenEmbedded::Entity(_)) => Err(SirenError::shape_mismatch(
                path,
                "expected an embedded link, found an embedded entity",
            )),
            (Shape::Leaf(_), _) => Err(SirenError::shape_mismatch(
                path,
                format!("{shape} cannot be read from an embedded element"),
            )),
            (_, SirenEmbedded::Link(_)) => Err(SirenError::shape_mismatch(
                path,
                format!("expected an embedded {shape}, found an embedded link"),
            )),
            (_, SirenEmbedded::Entity(entity)) => {
                tracing::trace!(path, rel = ?entity.rel, "reading embedded entity");
                let resource = self.resource(&entity.entity, shape, path, depth)?;
                Ok(Content::Embedded(Embedded::new(
                    entity.rel.iter().map(String::as_str),
                    resource,
                )))
            }
        }
    }
}

impl Default for SirenDeserializer {
    fn default() -> Self {
        Self::new()
    }
}

fn payload(value: Value, leaf: &Leaf) -> Payload {
    Payload {
        value,
        type_name: leaf.name().map(str::to_string),
    }
}

/// The properties as a whole, else the unwrapped `value` of a wrapped scalar
fn properties_value(properties: &Map<String, Value>, leaf: &Leaf, path: &str) -> SirenResult<Value> {
    let object = Value::Object(properties.clone());
    if leaf.accepts(&object) {
        return Ok(object);
    }

    if properties.len() == 1 {
        if let Some(value) = properties.get(VALUE_PROPERTY) {
            if leaf.accepts(value) {
                return Ok(value.clone());
            }
        }
    }

    Err(SirenError::shape_mismatch(
        path,
        format!(
            "properties do not match {}",
            leaf.name().unwrap_or("the expected value")
        ),
    ))
}

fn page_metadata(properties: &Map<String, Value>, path: &str) -> SirenResult<PageMetadata> {
    let number = |key: &str| {
        properties.get(key).and_then(Value::as_u64).ok_or_else(|| {
            SirenError::shape_mismatch(
                path,
                format!("page property '{key}' is missing or not an unsigned integer"),
            )
        })
    };

    Ok(PageMetadata::new(
        number(SIZE)?,
        number(NUMBER)?,
        number(TOTAL_ELEMENTS)?,
        number(TOTAL_PAGES)?,
    ))
}

fn read_links(links: &[SirenLink], path: &str) -> SirenResult<Vec<Link>> {
    links
        .iter()
        .enumerate()
        .map(|(index, link)| {
            let link_path = format!("{}/links/{index}", path.trim_end_matches('/'));
            to_link(&link.rel, &link.href, &link_path).map(|resolved| {
                decorate(resolved, link.title.as_deref(), link.media_type.as_deref())
            })
        })
        .collect()
}

fn embedded_link(link: &SirenEmbeddedLink, path: &str) -> SirenResult<Link> {
    let resolved = to_link(&link.rel, &link.href, path)?;
    Ok(decorate(
        resolved,
        link.title.as_deref(),
        link.media_type.as_deref(),
    ))
}

fn to_link(rel: &[String], href: &str, path: &str) -> SirenResult<Link> {
    Link::with_relations(href, rel.iter().map(|r| LinkRelation::new(r.as_str())))
        .map_err(|_| SirenError::shape_mismatch(path, "link has no relations"))
}

fn decorate(mut link: Link, title: Option<&str>, media_type: Option<&str>) -> Link {
    if let Some(title) = title {
        link = link.with_title(title);
    }
    if let Some(media_type) = media_type {
        link = link.with_type(media_type);
    }
    link
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Employee {
        name: String,
        age: u32,
    }

    fn read(doc: Value, shape: &Shape) -> SirenResult<Resource> {
        let doc: SirenEntity = serde_json::from_value(doc)?;
        SirenDeserializer::new().deserialize(&doc, shape)
    }

    #[test]
    fn test_entity() {
        let resource = read(
            json!({
                "class": ["entity"],
                "properties": {"name": "Peter", "age": 33},
                "links": [{"rel": ["self"], "href": "/employees/1", "title": "Peter"}],
                "actions": [{"name": "update", "method": "PUT", "href": "/employees/1"}]
            }),
            &Shape::entity(Shape::of::<Employee>()),
        )
        .unwrap();

        let Resource::Entity(entity) = resource else {
            panic!("Expected entity");
        };
        assert_eq!(
            entity.content_as::<Employee>().unwrap(),
            Employee {
                name: "Peter".into(),
                age: 33
            }
        );
        assert_eq!(entity.content.declared_type(), Some("Employee"));
        assert_eq!(entity.links, [Link::of("/employees/1")]);
        assert_eq!(entity.links[0].title(), Some("Peter"));
        assert!(entity.links[0].affordances().is_empty());
    }

    #[test]
    fn test_entity_shape_mismatch() {
        let err = read(
            json!({"properties": {"name": "Peter"}}),
            &Shape::entity(Shape::of::<Employee>()),
        )
        .unwrap_err();
        assert!(matches!(err, SirenError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_wrapped_scalar() {
        let resource = read(
            json!({"properties": {"value": 42}}),
            &Shape::entity(Shape::of::<u32>()),
        )
        .unwrap();
        assert_eq!(resource, Entity::new(json!(42)).into());
    }

    #[test]
    fn test_collection_of_entities() {
        let resource = read(
            json!({
                "class": ["collection"],
                "properties": {"size": 7},
                "entities": [
                    {"rel": ["employee"], "properties": {"name": "Peter", "age": 33}},
                    {"rel": ["employee"], "properties": {"name": "Paul", "age": 44}}
                ],
                "links": [{"rel": ["self"], "href": "/employees"}]
            }),
            &Shape::collection(Shape::entity(Shape::of::<Employee>())),
        )
        .unwrap();

        let Resource::Collection(collection) = resource else {
            panic!("Expected collection");
        };
        // size comes from the items, not the wire
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.links, [Link::of("/employees")]);
        match &collection.items[1] {
            Content::Embedded(embedded) => {
                assert_eq!(embedded.relations, [LinkRelation::new("employee")]);
            }
            other => panic!("Expected embedded entity, got {other:?}"),
        }
    }

    #[test]
    fn test_collection_without_entities_is_empty() {
        let resource = read(
            json!({"properties": {"size": 0}}),
            &Shape::collection(Shape::entity(Shape::value())),
        )
        .unwrap();
        assert_eq!(resource, Collection::empty().into());
    }

    #[test]
    fn test_collection_rejects_unmapped_properties() {
        let err = read(
            json!({"properties": {"size": 0, "name": "Peter"}}),
            &Shape::collection(Shape::entity(Shape::value())),
        )
        .unwrap_err();
        assert!(matches!(err, SirenError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_collection_of_values() {
        let resource = read(
            json!({"properties": {"employees": [{"name": "Peter", "age": 33}], "size": 1}}),
            &Shape::collection(Shape::of::<Employee>()),
        )
        .unwrap();

        let Resource::Collection(collection) = resource else {
            panic!("Expected collection");
        };
        assert_eq!(collection.values_as::<Employee>().unwrap().len(), 1);
        assert_eq!(collection.item_type.as_deref(), Some("Employee"));

        let err = read(
            json!({"properties": {"content": [1, "two"], "size": 2}}),
            &Shape::collection(Shape::of::<u32>()),
        )
        .unwrap_err();
        match err {
            SirenError::ShapeMismatch { path, .. } => assert_eq!(path, "/properties/content/1"),
            other => panic!("Expected ShapeMismatch, got {other}"),
        }
    }

    #[test]
    fn test_paged() {
        let resource = read(
            json!({
                "class": ["paged"],
                "properties": {"size": 20, "number": 1, "totalElements": 21, "totalPages": 2},
                "entities": [{"rel": ["item"], "properties": {"id": 21}}]
            }),
            &Shape::paged(Shape::entity(Shape::value())),
        )
        .unwrap();

        let Resource::Paged(paged) = resource else {
            panic!("Expected paged collection");
        };
        assert_eq!(paged.page, PageMetadata::new(20, 1, 21, 2));
        assert_eq!(paged.collection.len(), 1);
    }

    #[test]
    fn test_paged_requires_page_metadata() {
        let err = read(
            json!({"properties": {"size": 20, "number": 0}}),
            &Shape::paged(Shape::value()),
        )
        .unwrap_err();
        assert!(matches!(err, SirenError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_representation_reads_links_only() {
        let resource = read(
            json!({
                "class": ["whatever"],
                "properties": {"a": 1},
                "entities": [{"rel": ["x"], "href": "/x"}],
                "links": [{"rel": ["self", "about"], "href": "/"}]
            }),
            &Shape::representation(),
        )
        .unwrap();

        let expected = Link::with_relations("/", ["self", "about"]).unwrap();
        assert_eq!(resource, Representation::new().with_link(expected).into());
    }

    #[test]
    fn test_nested_entity_and_link() {
        let doc = json!({
            "entities": [{
                "rel": ["manager"],
                "entities": [{"rel": ["author"], "href": "/people/1"}]
            }]
        });

        let resource = read(doc, &Shape::entity(Shape::entity(Shape::link()))).unwrap();
        let expected = Entity::new(Entity::new(Link::new("/people/1", "author")));
        assert_eq!(resource, expected.into());
    }

    #[test]
    fn test_embedded_kind_mismatch() {
        let doc = json!({"entities": [{"rel": ["author"], "href": "/people/1"}]});
        let err = read(doc, &Shape::entity(Shape::entity(Shape::value()))).unwrap_err();
        match err {
            SirenError::ShapeMismatch { path, .. } => assert_eq!(path, "/entities/0"),
            other => panic!("Expected ShapeMismatch, got {other}"),
        }
    }

    #[test]
    fn test_link_without_relations() {
        let err = read(
            json!({"links": [{"href": "/a"}]}),
            &Shape::representation(),
        )
        .unwrap_err();
        match err {
            SirenError::ShapeMismatch { path, .. } => assert_eq!(path, "/links/0"),
            other => panic!("Expected ShapeMismatch, got {other}"),
        }
    }

    #[test]
    fn test_leaf_at_top_level() {
        let err = read(json!({}), &Shape::value()).unwrap_err();
        assert!(matches!(err, SirenError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let doc = json!({"entities": [{"rel": ["a"], "entities": [{"rel": ["b"]}]}]});
        let doc: SirenEntity = serde_json::from_value(doc).unwrap();
        let shape = Shape::entity(Shape::entity(Shape::entity(Shape::value())));

        let err = SirenDeserializer::new()
            .with_max_depth(1)
            .deserialize(&doc, &shape)
            .unwrap_err();
        assert!(matches!(err, SirenError::DepthExceeded { max: 1 }));
    }
}
