//! Siren codec for resource graphs

use std::sync::Arc;

use bytes::Bytes;

use super::{
    builder::SirenCodecBuilder, deserializer::SirenDeserializer, serializer::SirenSerializer,
    shape::Shape, Codec,
};
use crate::{
    config::SirenConfig,
    policy::{
        DeclaredProperties, DefaultRelationProvider, EntityClassProvider, LinkRelationProvider,
        PropertyIntrospector, SimpleEntityClassProvider, TitleResolver,
    },
    resource::Resource,
    siren::{error::SirenResult, SirenEntity, SIREN_MEDIA_TYPE},
};

/// Codec for the `application/vnd.siren+json` media type
///
/// Bundles the configuration with the naming, class, title and introspection
/// policies. Cloning is cheap; policies are shared.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use siren_codec::prelude::*;
///
/// let codec = SirenCodec::new();
/// let resource = Entity::new(json!({"name": "Peter"})).with_link(Link::of("/employees/1"));
///
/// let text = codec.to_string(&resource.into()).unwrap();
/// assert!(text.contains("\"class\":[\"entity\"]"));
/// ```
#[derive(Clone)]
pub struct SirenCodec {
    pub(super) config: SirenConfig,
    pub(super) classes: Arc<dyn EntityClassProvider>,
    pub(super) relations: Arc<dyn LinkRelationProvider>,
    pub(super) titles: TitleResolver,
    pub(super) introspector: Arc<dyn PropertyIntrospector>,
}

impl SirenCodec {
    /// Create a codec with the default configuration and policies
    pub fn new() -> Self {
        Self {
            config: SirenConfig::default(),
            classes: Arc::new(SimpleEntityClassProvider),
            relations: Arc::new(DefaultRelationProvider),
            titles: TitleResolver::none(),
            introspector: Arc::new(DeclaredProperties),
        }
    }

    pub fn builder() -> SirenCodecBuilder {
        SirenCodecBuilder::new()
    }

    pub fn config(&self) -> &SirenConfig {
        &self.config
    }

    /// A serializer borrowing this codec's policies
    pub fn serializer(&self) -> SirenSerializer<'_> {
        SirenSerializer::new(
            self.classes.as_ref(),
            self.relations.as_ref(),
            &self.titles,
            self.introspector.as_ref(),
        )
        .with_titles(self.config.resolve_titles)
        .with_max_depth(self.config.max_depth)
    }

    pub fn deserializer(&self) -> SirenDeserializer {
        SirenDeserializer::new().with_max_depth(self.config.max_depth)
    }

    /// Encode a resource graph as a Siren document tree
    pub fn serialize(&self, resource: &Resource) -> SirenResult<SirenEntity> {
        self.serializer().serialize(resource)
    }

    /// Decode a Siren document tree as a resource graph of the given shape
    pub fn deserialize(&self, doc: &SirenEntity, shape: &Shape) -> SirenResult<Resource> {
        self.deserializer().deserialize(doc, shape)
    }

    /// Render a resource graph as Siren JSON text
    pub fn to_string(&self, resource: &Resource) -> SirenResult<String> {
        let doc = self.serialize(resource)?;
        let text = if self.config.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(text)
    }

    /// Parse Siren JSON text as a resource graph of the given shape
    pub fn from_str(&self, text: &str, shape: &Shape) -> SirenResult<Resource> {
        let doc: SirenEntity = serde_json::from_str(text)?;
        self.deserialize(&doc, shape)
    }
}

impl Default for SirenCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SirenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SirenCodec")
            .field("config", &self.config)
            .field("titles", &self.titles)
            .finish_non_exhaustive()
    }
}

impl Codec for SirenCodec {
    fn encode(&self, resource: &Resource) -> SirenResult<Bytes> {
        let doc = self.serialize(resource)?;
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(&doc)?
        } else {
            serde_json::to_vec(&doc)?
        };
        Ok(Bytes::from(bytes))
    }

    fn decode(&self, body: &[u8], shape: &Shape) -> SirenResult<Resource> {
        let doc: SirenEntity = serde_json::from_slice(body)?;
        self.deserialize(&doc, shape)
    }

    fn content_type(&self) -> &str {
        SIREN_MEDIA_TYPE
    }
}
