//! Target shapes for deserialization
//!
//! A Siren document does not say what kind of resource it was rendered from,
//! so reading one needs a description of the expected graph, e.g.
//! `Shape::collection(Shape::entity(Shape::of::<Employee>()))`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::resource::{short_type_name, Collection, Content, Resource};

/// The expected shape of a resource graph
#[derive(Debug, Clone)]
pub enum Shape {
    /// Links only
    Representation,

    /// An entity whose content has the inner shape
    Entity(Box<Shape>),

    /// A collection whose items have the inner shape
    Collection(Box<Shape>),

    /// A paged collection whose items have the inner shape
    Paged(Box<Shape>),

    /// A nested node that is only a link
    Link,

    /// A plain value
    Leaf(Leaf),
}

impl Shape {
    pub fn representation() -> Self {
        Shape::Representation
    }

    pub fn entity(inner: Shape) -> Self {
        Shape::Entity(Box::new(inner))
    }

    pub fn collection(inner: Shape) -> Self {
        Shape::Collection(Box::new(inner))
    }

    pub fn paged(inner: Shape) -> Self {
        Shape::Paged(Box::new(inner))
    }

    pub fn link() -> Self {
        Shape::Link
    }

    /// Any JSON value
    pub fn value() -> Self {
        Shape::Leaf(Leaf::any())
    }

    /// A value that deserializes into `T`
    pub fn of<T: DeserializeOwned>() -> Self {
        Shape::Leaf(Leaf::of::<T>())
    }

    /// Whether this shape describes a plain value
    pub fn is_leaf(&self) -> bool {
        matches!(self, Shape::Leaf(_))
    }

    /// Declared type name of a leaf shape
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Shape::Leaf(leaf) => leaf.name(),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Representation => f.write_str("Representation"),
            Shape::Entity(inner) => write!(f, "Entity<{inner}>"),
            Shape::Collection(inner) => write!(f, "Collection<{inner}>"),
            Shape::Paged(inner) => write!(f, "Paged<{inner}>"),
            Shape::Link => f.write_str("Link"),
            Shape::Leaf(leaf) => f.write_str(leaf.name().unwrap_or("Value")),
        }
    }
}

/// A plain-value shape: an optional type name and a value check
#[derive(Clone)]
pub struct Leaf {
    name: Option<String>,
    accepts: fn(&Value) -> bool,
}

impl Leaf {
    /// Accepts any value
    pub fn any() -> Self {
        Self {
            name: None,
            accepts: |_| true,
        }
    }

    /// Accepts JSON objects only
    pub fn object() -> Self {
        Self {
            name: None,
            accepts: Value::is_object,
        }
    }

    /// Accepts everything but JSON objects
    pub fn scalar() -> Self {
        Self {
            name: None,
            accepts: |value| !value.is_object(),
        }
    }

    /// Accepts values that deserialize into `T`
    pub fn of<T: DeserializeOwned>() -> Self {
        Self {
            name: short_type_name::<T>(),
            accepts: accepts_type::<T>,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn accepts(&self, value: &Value) -> bool {
        (self.accepts)(value)
    }
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf").field("name", &self.name).finish()
    }
}

fn accepts_type<T: DeserializeOwned>(value: &Value) -> bool {
    T::deserialize(value).is_ok()
}

impl Resource {
    /// The shape this graph would be read back with
    pub fn shape(&self) -> Shape {
        match self {
            Resource::Representation(_) => Shape::Representation,
            Resource::Entity(entity) => Shape::entity(content_shape(&entity.content)),
            Resource::Collection(collection) => Shape::collection(items_shape(collection)),
            Resource::Paged(paged) => Shape::paged(items_shape(&paged.collection)),
        }
    }
}

fn content_shape(content: &Content) -> Shape {
    match content {
        Content::Value(payload) => {
            let leaf = if payload.value.is_object() {
                Leaf::object()
            } else {
                Leaf::scalar()
            };
            Shape::Leaf(named(leaf, payload.type_name.as_deref()))
        }
        Content::Link(_) => Shape::Link,
        Content::Embedded(embedded) => embedded.resource.shape(),
    }
}

fn items_shape(collection: &Collection) -> Shape {
    match collection.items.first() {
        Some(Content::Value(_)) | None => {
            Shape::Leaf(named(Leaf::any(), collection.declared_item_type()))
        }
        Some(item) => content_shape(item),
    }
}

fn named(leaf: Leaf, name: Option<&str>) -> Leaf {
    match name {
        Some(name) => leaf.with_name(name),
        None => leaf,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::resource::{Entity, Link, PageMetadata, Paged};

    #[derive(Deserialize)]
    #[allow(unused)]
    struct Employee {
        name: String,
        age: u32,
    }

    #[test]
    fn test_display() {
        let shape = Shape::paged(Shape::entity(Shape::of::<Employee>()));
        assert_eq!(shape.to_string(), "Paged<Entity<Employee>>");
        assert_eq!(Shape::collection(Shape::value()).to_string(), "Collection<Value>");
    }

    #[test]
    fn test_typed_leaf() {
        let leaf = Leaf::of::<Employee>();
        assert_eq!(leaf.name(), Some("Employee"));
        assert!(leaf.accepts(&json!({"name": "Peter", "age": 33})));
        assert!(!leaf.accepts(&json!({"name": "Peter"})));
        assert!(!leaf.accepts(&json!(33)));
    }

    #[test]
    fn test_resource_shape() {
        let nested = Resource::from(Entity::new(Entity::new(json!({"a": 1}))));
        assert_eq!(nested.shape().to_string(), "Entity<Entity<Value>>");
        assert!(matches!(
            nested.shape(),
            Shape::Entity(inner) if matches!(*inner, Shape::Entity(_))
        ));

        let links = Resource::from(Collection::new([Link::of("/a")]));
        assert_eq!(links.shape().to_string(), "Collection<Link>");

        let paged = Resource::from(Paged::new(Collection::empty(), PageMetadata::default()));
        assert_eq!(paged.shape().to_string(), "Paged<Value>");
    }

    #[test]
    fn test_scalar_content_shape() {
        let shape = Resource::from(Entity::new(json!(5))).shape();
        match shape {
            Shape::Entity(inner) => match *inner {
                Shape::Leaf(leaf) => {
                    assert!(leaf.accepts(&json!(5)));
                    assert!(!leaf.accepts(&json!({"value": 5})));
                }
                other => panic!("Expected leaf shape, got {other}"),
            },
            other => panic!("Expected entity shape, got {other}"),
        }
    }
}
