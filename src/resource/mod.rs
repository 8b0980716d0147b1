//! Resource graph model
//!
//! A resource graph is what an application hands to the codec: plain
//! representations carrying links, entities wrapping a payload, collections of
//! items and paged collections. Payloads are either plain JSON values or
//! further resources, so graphs nest to arbitrary depth.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub mod affordance;
pub mod link;

pub use affordance::{Affordance, HttpMethod, InputType, PropertyDescriptor, PropertyKind};
pub use link::{Link, LinkRelation};

use crate::siren::error::{SirenError, SirenResult};

/// A node of the resource graph
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// Links only, no payload
    Representation(Representation),

    /// A single payload plus links
    Entity(Entity),

    /// An ordered sequence of items plus links
    Collection(Collection),

    /// A collection slice with page metadata
    Paged(Paged),
}

impl Resource {
    /// Links owned by this node
    pub fn links(&self) -> &[Link] {
        match self {
            Resource::Representation(r) => &r.links,
            Resource::Entity(e) => &e.links,
            Resource::Collection(c) => &c.links,
            Resource::Paged(p) => &p.collection.links,
        }
    }

    /// Lower-case name of the variant
    pub fn variant_name(&self) -> &'static str {
        match self {
            Resource::Representation(_) => "representation",
            Resource::Entity(_) => "entity",
            Resource::Collection(_) => "collection",
            Resource::Paged(_) => "paged",
        }
    }

    /// Declared payload type name, if one is known
    ///
    /// For entities this is the type of the content, for collections the type
    /// of the items.
    pub fn declared_type(&self) -> Option<&str> {
        match self {
            Resource::Representation(_) => None,
            Resource::Entity(e) => e.content.declared_type(),
            Resource::Collection(c) => c.declared_item_type(),
            Resource::Paged(p) => p.collection.declared_item_type(),
        }
    }

    /// Whether this node is a collection or a paged collection
    pub fn is_collection(&self) -> bool {
        matches!(self, Resource::Collection(_) | Resource::Paged(_))
    }
}

impl From<Representation> for Resource {
    fn from(r: Representation) -> Self {
        Resource::Representation(r)
    }
}

impl From<Entity> for Resource {
    fn from(e: Entity) -> Self {
        Resource::Entity(e)
    }
}

impl From<Collection> for Resource {
    fn from(c: Collection) -> Self {
        Resource::Collection(c)
    }
}

impl From<Paged> for Resource {
    fn from(p: Paged) -> Self {
        Resource::Paged(p)
    }
}

/// A resource carrying nothing but links
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Representation {
    pub links: Vec<Link>,
}

impl Representation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }
}

/// A single payload plus links
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub content: Content,
    pub links: Vec<Link>,
}

impl Entity {
    /// Wrap untyped content
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            links: Vec::new(),
        }
    }

    /// Wrap a typed value, recording its type name as the declared type
    pub fn of<T: Serialize>(content: &T) -> SirenResult<Self> {
        Ok(Self::new(Payload::of(content)?))
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Decode a plain payload into `T`
    pub fn content_as<T: DeserializeOwned>(&self) -> SirenResult<T> {
        match &self.content {
            Content::Value(payload) => Ok(T::deserialize(&payload.value)?),
            other => Err(SirenError::InvalidArgument(format!(
                "entity content is {}, not a plain value",
                other.kind_name()
            ))),
        }
    }
}

/// An ordered sequence of items plus links
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub items: Vec<Content>,

    /// Declared item type, used when items carry no type themselves
    pub item_type: Option<String>,

    pub links: Vec<Link>,
}

impl Collection {
    pub fn new<I, C>(items: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            item_type: None,
            links: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap typed values, recording their type name as the item type
    pub fn of<T: Serialize>(items: &[T]) -> SirenResult<Self> {
        let items = items
            .iter()
            .map(|item| Payload::of(item).map(Content::Value))
            .collect::<SirenResult<Vec<_>>>()?;

        Ok(Self {
            items,
            item_type: short_type_name::<T>(),
            links: Vec::new(),
        })
    }

    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The explicit item type, else the declared type of the first item that has one
    pub fn declared_item_type(&self) -> Option<&str> {
        self.item_type
            .as_deref()
            .or_else(|| self.items.iter().find_map(Content::declared_type))
    }

    /// Decode all plain-value items into `T`
    pub fn values_as<T: DeserializeOwned>(&self) -> SirenResult<Vec<T>> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Content::Value(payload) => {
                    Some(T::deserialize(&payload.value).map_err(SirenError::from))
                }
                _ => None,
            })
            .collect()
    }
}

/// The declared item type is a serialization hint and not part of equality.
impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.links == other.links
    }
}

/// Page metadata of a paged collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Requested page size
    pub size: u64,

    /// Zero-based page number
    pub number: u64,

    pub total_elements: u64,

    pub total_pages: u64,
}

impl PageMetadata {
    pub fn new(size: u64, number: u64, total_elements: u64, total_pages: u64) -> Self {
        Self {
            size,
            number,
            total_elements,
            total_pages,
        }
    }

    /// Page metadata with the page count computed from the totals
    pub fn from_totals(size: u64, number: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self::new(size, number, total_elements, total_pages)
    }
}

/// A collection slice with page metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Paged {
    pub collection: Collection,
    pub page: PageMetadata,
}

impl Paged {
    pub fn new(collection: Collection, page: PageMetadata) -> Self {
        Self { collection, page }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.collection.links.push(link);
        self
    }
}

/// The payload slot of an entity or a collection item
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A plain value, flattened into properties
    Value(Payload),

    /// A nested node that is only a link
    Link(Link),

    /// A nested resource, rendered as an embedded entity
    Embedded(Embedded),
}

impl Content {
    /// Embed a resource under explicit relations
    pub fn embedded<I, R>(rels: I, resource: impl Into<Resource>) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<LinkRelation>,
    {
        Content::Embedded(Embedded::new(rels, resource))
    }

    pub fn declared_type(&self) -> Option<&str> {
        match self {
            Content::Value(payload) => payload.type_name.as_deref(),
            Content::Link(_) => None,
            Content::Embedded(embedded) => embedded.resource.declared_type(),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Content::Value(_) => "a plain value",
            Content::Link(_) => "a link",
            Content::Embedded(_) => "an embedded resource",
        }
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Content::Value(Payload::new(value))
    }
}

impl From<Payload> for Content {
    fn from(payload: Payload) -> Self {
        Content::Value(payload)
    }
}

impl From<Link> for Content {
    fn from(link: Link) -> Self {
        Content::Link(link)
    }
}

impl From<Embedded> for Content {
    fn from(embedded: Embedded) -> Self {
        Content::Embedded(embedded)
    }
}

impl From<Resource> for Content {
    fn from(resource: Resource) -> Self {
        Content::Embedded(Embedded::derived(resource))
    }
}

impl From<Representation> for Content {
    fn from(r: Representation) -> Self {
        Resource::from(r).into()
    }
}

impl From<Entity> for Content {
    fn from(e: Entity) -> Self {
        Resource::from(e).into()
    }
}

impl From<Collection> for Content {
    fn from(c: Collection) -> Self {
        Resource::from(c).into()
    }
}

impl From<Paged> for Content {
    fn from(p: Paged) -> Self {
        Resource::from(p).into()
    }
}

/// A plain JSON payload and its declared type
#[derive(Debug, Clone)]
pub struct Payload {
    pub value: Value,

    /// Short type name, e.g. `Employee`
    pub type_name: Option<String>,
}

impl Payload {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            type_name: None,
        }
    }

    /// Serialize a typed value, keeping its short type name
    pub fn of<T: Serialize>(value: &T) -> SirenResult<Self> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            type_name: short_type_name::<T>(),
        })
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// A nested resource and the relations its parent refers to it by
///
/// Empty relations mean the relation is derived from the declared type of the
/// nested resource when it is serialized.
#[derive(Debug, Clone)]
pub struct Embedded {
    pub relations: Vec<LinkRelation>,
    pub resource: Box<Resource>,
}

impl Embedded {
    pub fn new<I, R>(rels: I, resource: impl Into<Resource>) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<LinkRelation>,
    {
        Self {
            relations: rels.into_iter().map(Into::into).collect(),
            resource: Box::new(resource.into()),
        }
    }

    /// Embed without explicit relations
    pub fn derived(resource: impl Into<Resource>) -> Self {
        Self {
            relations: Vec::new(),
            resource: Box::new(resource.into()),
        }
    }
}

impl PartialEq for Embedded {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
    }
}

/// Wrappers named after their single type argument
const TRANSPARENT_TYPES: [&str; 4] = ["Option", "Box", "Rc", "Arc"];

/// Last path segment of a Rust type name, without generic arguments
///
/// `Option`, `Box`, `Rc` and `Arc` are named after their argument. Tuples,
/// arrays, slices and other types without a plain identifier have no name.
pub(crate) fn short_type_name<T: ?Sized>() -> Option<String> {
    declared_name(std::any::type_name::<T>())
}

fn declared_name(full: &str) -> Option<String> {
    let full = full.trim_start_matches('&').trim_start_matches("mut ");
    if full.starts_with(['(', '[']) {
        return None;
    }

    let (path, arguments) = match full.split_once('<') {
        Some((path, arguments)) => (path, arguments.strip_suffix('>')),
        None => (full, None),
    };
    let name = path.rsplit("::").next().unwrap_or(path);
    if TRANSPARENT_TYPES.contains(&name) {
        return arguments.and_then(declared_name);
    }

    let mut chars = name.chars();
    let leading = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
    (leading && chars.all(|c| c.is_alphanumeric() || c == '_')).then(|| name.to_string())
}
