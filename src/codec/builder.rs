//! Builder for constructing Siren codecs with custom policies

use std::sync::Arc;

use super::siren::SirenCodec;
use crate::{
    config::{SirenConfig, MAX_SUPPORTED_DEPTH},
    policy::{
        EntityClassProvider, LinkRelationProvider, MessageSource, PropertyIntrospector,
        TitleResolver,
    },
    siren::{error::SirenError, SIREN_MEDIA_TYPE},
};

/// Builder for constructing Siren codecs
///
/// Every policy not set explicitly keeps the default of [`SirenCodec::new`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use siren_codec::prelude::*;
///
/// # fn example() -> Result<(), SirenError> {
/// let messages = StaticMessageSource::new().with_message("_link.self.title", "Self");
/// let codec = SirenCodec::builder()
///     .with_relation_provider(Arc::new(PluralRelationProvider))
///     .with_message_source(Arc::new(messages))
///     .with_max_depth(16)
///     .build()?;
///
/// assert_eq!(codec.config().max_depth, 16);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct SirenCodecBuilder {
    config: SirenConfig,
    classes: Option<Arc<dyn EntityClassProvider>>,
    relations: Option<Arc<dyn LinkRelationProvider>>,
    titles: Option<TitleResolver>,
    introspector: Option<Arc<dyn PropertyIntrospector>>,
}

impl SirenCodecBuilder {
    pub fn new() -> Self {
        Self {
            config: SirenConfig::default(),
            classes: None,
            relations: None,
            titles: None,
            introspector: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: SirenConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom entity class provider
    ///
    /// # Arguments
    ///
    /// * `classes` - Provider of the `class` array of every entity
    pub fn with_class_provider(mut self, classes: Arc<dyn EntityClassProvider>) -> Self {
        self.classes = Some(classes);
        self
    }

    /// Use a custom link relation provider
    ///
    /// # Arguments
    ///
    /// * `relations` - Naming policy for derived item and collection relations
    pub fn with_relation_provider(mut self, relations: Arc<dyn LinkRelationProvider>) -> Self {
        self.relations = Some(relations);
        self
    }

    /// Resolve titles from a message catalog
    pub fn with_message_source(mut self, source: Arc<dyn MessageSource>) -> Self {
        self.titles = Some(TitleResolver::new(source));
        self
    }

    pub fn with_title_resolver(mut self, titles: TitleResolver) -> Self {
        self.titles = Some(titles);
        self
    }

    /// Use a custom property introspector for action fields
    pub fn with_property_introspector(
        mut self,
        introspector: Arc<dyn PropertyIntrospector>,
    ) -> Self {
        self.introspector = Some(introspector);
        self
    }

    /// Set the maximum nesting depth
    ///
    /// # Arguments
    ///
    /// * `max_depth` - Deepest embedded entity level (default: 32, at most 48)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Enable or disable link title resolution
    pub fn with_titles(mut self, enabled: bool) -> Self {
        self.config.resolve_titles = enabled;
        self
    }

    /// Build the Siren codec
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The maximum depth is zero or above [`MAX_SUPPORTED_DEPTH`]
    /// - No media type is configured
    pub fn build(self) -> Result<SirenCodec, SirenError> {
        if self.config.max_depth == 0 {
            return Err(SirenError::InvalidArgument(
                "max_depth must be at least 1".into(),
            ));
        }

        if self.config.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(SirenError::InvalidArgument(format!(
                "max_depth {} exceeds the supported maximum of {MAX_SUPPORTED_DEPTH}",
                self.config.max_depth
            )));
        }

        if self.config.media_types.is_empty() {
            return Err(SirenError::InvalidArgument(
                "at least one media type must be configured".into(),
            ));
        }

        if !self.config.supports(SIREN_MEDIA_TYPE) {
            tracing::warn!(
                media_types = ?self.config.media_types,
                "codec configured without {SIREN_MEDIA_TYPE}"
            );
        }

        let defaults = SirenCodec::new();
        Ok(SirenCodec {
            config: self.config,
            classes: self.classes.unwrap_or(defaults.classes),
            relations: self.relations.unwrap_or(defaults.relations),
            titles: self.titles.unwrap_or(defaults.titles),
            introspector: self.introspector.unwrap_or(defaults.introspector),
        })
    }
}

impl Default for SirenCodecBuilder {
    fn default() -> Self {
        Self::new()
    }
}
