//! Title resolution from message catalogs
//!
//! Titles of links, actions and fields are looked up by message codes. Every
//! lookup tries a specific code first and a per-kind default code second, e.g.
//! `_link.about.title` then `_link.default.title`. External catalogs key off
//! these exact strings.

use std::{collections::HashMap, sync::Arc};

/// A catalog of messages keyed by code
#[cfg_attr(test, mockall::automock)]
pub trait MessageSource: Send + Sync {
    /// The message for `code`, if the catalog has one
    fn message(&self, code: &str) -> Option<String>;
}

impl MessageSource for HashMap<String, String> {
    fn message(&self, code: &str) -> Option<String> {
        self.get(code).cloned()
    }
}

/// An in-memory message catalog
#[derive(Debug, Clone, Default)]
pub struct StaticMessageSource {
    messages: HashMap<String, String>,
}

impl StaticMessageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message
    pub fn with_message(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(code.into(), message.into());
        self
    }
}

impl MessageSource for StaticMessageSource {
    fn message(&self, code: &str) -> Option<String> {
        self.messages.get(code).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for StaticMessageSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Message code patterns for titles
pub struct TitleCodes;

impl TitleCodes {
    /// `["_link.<rel>.title", "_link.default.title"]`
    pub fn link(rel: &str) -> [String; 2] {
        Self::codes("_link", rel)
    }

    /// `["_action.<name>.title", "_action.default.title"]`
    pub fn action(name: &str) -> [String; 2] {
        Self::codes("_action", name)
    }

    /// `["_field.<name>.title", "_field.default.title"]`
    pub fn field(name: &str) -> [String; 2] {
        Self::codes("_field", name)
    }

    fn codes(prefix: &str, name: &str) -> [String; 2] {
        [
            format!("{prefix}.{name}.title"),
            format!("{prefix}.default.title"),
        ]
    }
}

/// Resolves titles against an optional message catalog
#[derive(Clone, Default)]
pub struct TitleResolver {
    source: Option<Arc<dyn MessageSource>>,
}

impl TitleResolver {
    pub fn new(source: Arc<dyn MessageSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// A resolver without a catalog; every lookup yields the fallback
    pub fn none() -> Self {
        Self::default()
    }

    /// First catalog match among `codes`, else `fallback`
    pub fn resolve<S: AsRef<str>>(&self, codes: &[S], fallback: Option<&str>) -> Option<String> {
        self.source
            .as_ref()
            .and_then(|source| codes.iter().find_map(|code| source.message(code.as_ref())))
            .or_else(|| fallback.map(str::to_string))
    }

    pub fn link_title(&self, rel: &str, fallback: Option<&str>) -> Option<String> {
        self.resolve(&TitleCodes::link(rel), fallback)
    }

    pub fn action_title(&self, name: &str) -> Option<String> {
        self.resolve(&TitleCodes::action(name), None)
    }

    pub fn field_title(&self, name: &str) -> Option<String> {
        self.resolve(&TitleCodes::field(name), None)
    }
}

impl std::fmt::Debug for TitleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleResolver")
            .field("has_source", &self.source.is_some())
            .finish()
    }
}
