//! Resource graph to Siren document encoder

use serde_json::{json, Value};

use crate::{
    config::DEFAULT_MAX_DEPTH,
    policy::{
        AffordanceMapper, EntityClassProvider, LinkRelationProvider, PropertyIntrospector,
        TitleResolver,
    },
    resource::{Collection, Content, Embedded, Link, LinkRelation, Resource},
    siren::{
        error::{SirenError, SirenResult},
        SirenEmbedded, SirenEmbeddedEntity, SirenEmbeddedLink, SirenEntity, SirenLink,
    },
};

/// Property key holding plain-value items when the item type is unknown
pub const CONTENT_PROPERTY: &str = "content";

/// Property key wrapping entity content that is not a JSON object
pub const VALUE_PROPERTY: &str = "value";

pub(crate) const SIZE: &str = "size";
pub(crate) const NUMBER: &str = "number";
pub(crate) const TOTAL_ELEMENTS: &str = "totalElements";
pub(crate) const TOTAL_PAGES: &str = "totalPages";

/// Properties written by the codec next to the items of a collection
pub(crate) const COLLECTION_KEYS: &[&str] = &[SIZE];
pub(crate) const PAGED_KEYS: &[&str] = &[SIZE, NUMBER, TOTAL_ELEMENTS, TOTAL_PAGES];

/// Recursive encoder from a resource graph to a Siren document
///
/// Plain payloads become `properties`, nested resources and link-only
/// contents become `entities`, and every link is rendered both as a link and
/// as one action per affordance it carries.
pub struct SirenSerializer<'a> {
    classes: &'a dyn EntityClassProvider,
    relations: &'a dyn LinkRelationProvider,
    titles: &'a TitleResolver,
    introspector: &'a dyn PropertyIntrospector,
    resolve_titles: bool,
    max_depth: usize,
}

impl<'a> SirenSerializer<'a> {
    pub fn new(
        classes: &'a dyn EntityClassProvider,
        relations: &'a dyn LinkRelationProvider,
        titles: &'a TitleResolver,
        introspector: &'a dyn PropertyIntrospector,
    ) -> Self {
        Self {
            classes,
            relations,
            titles,
            introspector,
            resolve_titles: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Enable or disable link title resolution
    pub fn with_titles(mut self, enabled: bool) -> Self {
        self.resolve_titles = enabled;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Encode `root` as a Siren document
    pub fn serialize(&self, root: &Resource) -> SirenResult<SirenEntity> {
        tracing::debug!(variant = root.variant_name(), "serializing resource graph");
        self.entity(root, "/", 0)
    }

    fn entity(&self, resource: &Resource, path: &str, depth: usize) -> SirenResult<SirenEntity> {
        if depth > self.max_depth {
            return Err(SirenError::DepthExceeded {
                max: self.max_depth,
            });
        }

        let class = self.classes.get(resource)?;
        if class.is_empty() {
            return Err(SirenError::InvalidArgument(format!(
                "class provider returned no classes for the {} at '{path}'",
                resource.variant_name()
            )));
        }

        let mut doc = SirenEntity {
            class,
            ..SirenEntity::default()
        };

        match resource {
            Resource::Representation(_) => {}
            Resource::Entity(entity) => {
                self.content(&entity.content, &mut doc, path, depth)?;
            }
            Resource::Collection(collection) => {
                self.items(collection, COLLECTION_KEYS, &mut doc, path, depth)?;
            }
            Resource::Paged(paged) => {
                self.items(&paged.collection, PAGED_KEYS, &mut doc, path, depth)?;
                let page = &paged.page;
                // page size replaces the item count
                doc.properties.insert(SIZE.into(), json!(page.size));
                doc.properties.insert(NUMBER.into(), json!(page.number));
                doc.properties
                    .insert(TOTAL_ELEMENTS.into(), json!(page.total_elements));
                doc.properties
                    .insert(TOTAL_PAGES.into(), json!(page.total_pages));
            }
        }

        self.links(resource.links(), &mut doc)?;
        Ok(doc)
    }

    fn content(
        &self,
        content: &Content,
        doc: &mut SirenEntity,
        path: &str,
        depth: usize,
    ) -> SirenResult<()> {
        match content {
            Content::Value(payload) => match &payload.value {
                Value::Object(map) => doc.properties = map.clone(),
                other => {
                    doc.properties.insert(VALUE_PROPERTY.into(), other.clone());
                }
            },
            Content::Link(link) => doc.entities.push(self.embedded_link(link)?.into()),
            Content::Embedded(embedded) => {
                let child = child_path(path, 0);
                doc.entities.push(self.embedded(embedded, &child, depth + 1)?);
            }
        }
        Ok(())
    }

    fn items(
        &self,
        collection: &Collection,
        reserved: &[&str],
        doc: &mut SirenEntity,
        path: &str,
        depth: usize,
    ) -> SirenResult<()> {
        let mut values = Vec::new();
        for item in &collection.items {
            match item {
                Content::Value(payload) => values.push(payload.value.clone()),
                Content::Link(link) => doc.entities.push(self.embedded_link(link)?.into()),
                Content::Embedded(embedded) => {
                    let child = child_path(path, doc.entities.len());
                    doc.entities.push(self.embedded(embedded, &child, depth + 1)?);
                }
            }
        }

        if !values.is_empty() {
            let key = collection
                .declared_item_type()
                .map(|item_type| self.relations.collection_relation(item_type).to_string())
                .unwrap_or_else(|| CONTENT_PROPERTY.to_string());
            if reserved.contains(&key.as_str()) {
                return Err(SirenError::InvalidArgument(format!(
                    "Collection property '{key}' at '{path}' collides with a reserved property"
                )));
            }
            doc.properties.insert(key, Value::Array(values));
        }
        doc.properties
            .insert(SIZE.into(), json!(collection.items.len()));

        Ok(())
    }

    fn embedded(
        &self,
        embedded: &Embedded,
        path: &str,
        depth: usize,
    ) -> SirenResult<SirenEmbedded> {
        let rel: Vec<String> = if embedded.relations.is_empty() {
            let derived = self
                .derived_relation(&embedded.resource)
                .ok_or_else(|| SirenError::missing_relation(path))?;
            vec![derived.to_string()]
        } else {
            embedded.relations.iter().map(ToString::to_string).collect()
        };

        tracing::trace!(path, ?rel, "embedding resource");
        let entity = self.entity(&embedded.resource, path, depth)?;
        Ok(SirenEmbeddedEntity::new(rel, entity)?.into())
    }

    /// Relation of a nested resource derived from its declared type
    fn derived_relation(&self, resource: &Resource) -> Option<LinkRelation> {
        let type_name = resource.declared_type()?;
        Some(if resource.is_collection() {
            self.relations.collection_relation(type_name)
        } else {
            self.relations.item_relation(type_name)
        })
    }

    fn embedded_link(&self, link: &Link) -> SirenResult<SirenEmbeddedLink> {
        let mut embedded = SirenEmbeddedLink::new(relation_names(link), link.href())?;
        embedded.title = self.link_title(link);
        embedded.media_type = link.media_type().map(str::to_string);
        Ok(embedded)
    }

    fn links(&self, links: &[Link], doc: &mut SirenEntity) -> SirenResult<()> {
        let mapper = AffordanceMapper::new(self.titles, self.introspector);
        for link in links {
            doc.links.push(SirenLink {
                rel: relation_names(link),
                class: Vec::new(),
                href: link.href().to_string(),
                title: self.link_title(link),
                media_type: link.media_type().map(str::to_string),
            });
            doc.actions.extend(mapper.to_actions(link)?);
        }
        Ok(())
    }

    /// Explicit title, else the catalog title for the first relation
    fn link_title(&self, link: &Link) -> Option<String> {
        link.title().map(str::to_string).or_else(|| {
            self.resolve_titles
                .then(|| self.titles.link_title(link.relation().as_str(), None))
                .flatten()
        })
    }
}

impl std::fmt::Debug for SirenSerializer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SirenSerializer")
            .field("resolve_titles", &self.resolve_titles)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

fn relation_names(link: &Link) -> Vec<String> {
    link.relations().iter().map(ToString::to_string).collect()
}

pub(crate) fn child_path(path: &str, index: usize) -> String {
    let parent = path.trim_end_matches('/');
    format!("{parent}/entities/{index}")
}
