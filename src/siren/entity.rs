//! Siren entities, root and embedded

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{
    action::SirenAction,
    error::{SirenError, SirenResult},
    link::SirenLink,
    non_empty_strings,
};

/// A Siren entity
///
/// Used as the document root and as the body of embedded entities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SirenEntity {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<SirenEmbedded>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<SirenLink>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<SirenAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SirenEntity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class.push(class.into());
        self
    }

    /// Add a property
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Add an embedded entity or link
    pub fn with_entity(mut self, entity: impl Into<SirenEmbedded>) -> Self {
        self.entities.push(entity.into());
        self
    }

    pub fn with_link(mut self, link: SirenLink) -> Self {
        self.links.push(link);
        self
    }

    pub fn with_action(mut self, action: SirenAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Links carrying the given relation
    pub fn links_with_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a SirenLink> {
        self.links
            .iter()
            .filter(move |link| link.rel.iter().any(|r| r == rel))
    }

    /// The action with the given name
    pub fn action(&self, name: &str) -> Option<&SirenAction> {
        self.actions.iter().find(|action| action.name == name)
    }
}

/// A sub-entity nested in the `entities` of its parent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SirenEmbeddedEntity {
    /// Relations to the parent, never empty
    #[serde(deserialize_with = "non_empty_strings")]
    pub rel: Vec<String>,

    #[serde(flatten)]
    pub entity: SirenEntity,
}

impl SirenEmbeddedEntity {
    /// Fails with [`SirenError::Construction`] when `rel` is empty.
    pub fn new(rel: Vec<String>, entity: SirenEntity) -> SirenResult<Self> {
        if rel.is_empty() {
            return Err(SirenError::Construction(
                "Embedded entity requires at least one relation".into(),
            ));
        }
        Ok(Self { rel, entity })
    }
}

/// A sub-entity that is only a link to the full representation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SirenEmbeddedLink {
    #[serde(deserialize_with = "non_empty_strings")]
    pub rel: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,

    pub href: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SirenEmbeddedLink {
    /// Fails with [`SirenError::Construction`] when `rel` is empty.
    pub fn new(rel: Vec<String>, href: impl Into<String>) -> SirenResult<Self> {
        if rel.is_empty() {
            return Err(SirenError::Construction(
                "Embedded link requires at least one relation".into(),
            ));
        }
        Ok(Self {
            rel,
            class: Vec::new(),
            href: href.into(),
            media_type: None,
            title: None,
        })
    }
}

/// An element of `entities`
///
/// On read, elements carrying an `href` are embedded links; everything else is
/// an embedded entity. An element with an unusable `href` is rejected.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SirenEmbedded {
    Link(SirenEmbeddedLink),
    Entity(SirenEmbeddedEntity),
}

impl<'de> Deserialize<'de> for SirenEmbedded {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let element = Map::<String, Value>::deserialize(deserializer)?;
        let embedded = if element.contains_key("href") {
            SirenEmbeddedLink::deserialize(Value::Object(element)).map(SirenEmbedded::Link)
        } else {
            SirenEmbeddedEntity::deserialize(Value::Object(element)).map(SirenEmbedded::Entity)
        };
        embedded.map_err(D::Error::custom)
    }
}

impl SirenEmbedded {
    pub fn rel(&self) -> &[String] {
        match self {
            SirenEmbedded::Link(link) => &link.rel,
            SirenEmbedded::Entity(entity) => &entity.rel,
        }
    }
}

impl From<SirenEmbeddedEntity> for SirenEmbedded {
    fn from(entity: SirenEmbeddedEntity) -> Self {
        SirenEmbedded::Entity(entity)
    }
}

impl From<SirenEmbeddedLink> for SirenEmbedded {
    fn from(link: SirenEmbeddedLink) -> Self {
        SirenEmbedded::Link(link)
    }
}
