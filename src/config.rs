//! Codec configuration

use crate::siren::SIREN_MEDIA_TYPE;

/// Default limit for resource graph nesting
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Highest nesting limit a codec accepts
///
/// serde_json stops parsing at 128 nested arrays and objects. Every embedded
/// level takes two of them (`entities` and the element), and the deepest
/// entity still needs room for its links, actions and properties.
pub const MAX_SUPPORTED_DEPTH: usize = 48;

const _: () =
    assert!(2 * MAX_SUPPORTED_DEPTH + 1 < 128 && DEFAULT_MAX_DEPTH <= MAX_SUPPORTED_DEPTH);

/// Configuration for a Siren codec
#[derive(Debug, Clone)]
pub struct SirenConfig {
    /// Media types the codec answers for
    pub media_types: Vec<String>,

    /// Resolve link titles from the message catalog when a link has none
    pub resolve_titles: bool,

    /// Maximum nesting depth of embedded entities
    pub max_depth: usize,

    /// Render indented JSON
    pub pretty: bool,
}

impl SirenConfig {
    /// Create a configuration supporting the Siren media type
    pub fn new() -> Self {
        Self {
            media_types: vec![SIREN_MEDIA_TYPE.to_string()],
            resolve_titles: true,
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }

    /// Support an additional media type
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_types.push(media_type.into());
        self
    }

    /// Enable or disable title resolution
    pub fn with_titles(mut self, enabled: bool) -> Self {
        self.resolve_titles = enabled;
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Whether `media_type` is one of the supported media types
    ///
    /// Comparison ignores case and media type parameters such as `charset`.
    pub fn supports(&self, media_type: &str) -> bool {
        let wanted = essence(media_type);
        !wanted.is_empty()
            && self
                .media_types
                .iter()
                .any(|supported| essence(supported) == wanted)
    }

    /// Whether at least one of `media_types` is supported
    pub fn supports_any<I, S>(&self, media_types: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        media_types
            .into_iter()
            .any(|media_type| self.supports(media_type.as_ref()))
    }
}

impl Default for SirenConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `type/subtype` without parameters, lower-cased
fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
