//! Siren links

use serde::{Deserialize, Serialize};

use super::error::{SirenError, SirenResult};

/// A navigational link in a Siren document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SirenLink {
    /// Relations of the link (empty when not supplied)
    #[serde(default)]
    pub rel: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,

    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Media type of the link target
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl SirenLink {
    /// Create a link with the given relations and target
    pub fn new<I, S>(rel: I, href: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rel: rel.into_iter().map(Into::into).collect(),
            class: Vec::new(),
            href: href.into(),
            title: None,
            media_type: None,
        }
    }

    pub fn builder() -> SirenLinkBuilder {
        SirenLinkBuilder::new()
    }
}

/// Builder for constructing SirenLink instances
#[derive(Debug, Default)]
pub struct SirenLinkBuilder {
    rel: Vec<String>,
    class: Vec<String>,
    href: Option<String>,
    title: Option<String>,
    media_type: Option<String>,
}

impl SirenLinkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relation
    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel.push(rel.into());
        self
    }

    /// Add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class.push(class.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Build the link
    ///
    /// Fails with [`SirenError::Construction`] when no href was set.
    pub fn build(self) -> SirenResult<SirenLink> {
        let href = self
            .href
            .ok_or_else(|| SirenError::Construction("SirenLink requires an href".into()))?;

        Ok(SirenLink {
            rel: self.rel,
            class: self.class,
            href,
            title: self.title,
            media_type: self.media_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builder_requires_href() {
        let result = SirenLink::builder().rel("self").build();
        assert!(matches!(result, Err(SirenError::Construction(_))));
    }

    #[test]
    fn test_builder_defaults_rel_to_empty() {
        let link = SirenLink::builder().href("/a").build().unwrap();
        assert!(link.rel.is_empty());
    }

    #[test]
    fn test_link_wire_shape() {
        let link = SirenLink::builder()
            .rel("self")
            .href("/orders/42")
            .media_type("application/json")
            .build()
            .unwrap();

        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(
            json,
            json!({"rel": ["self"], "href": "/orders/42", "type": "application/json"})
        );
    }

    #[test]
    fn test_link_without_href_is_malformed() {
        let result = serde_json::from_value::<SirenLink>(json!({"rel": ["self"]}));
        assert!(result.is_err());

        let link: SirenLink = serde_json::from_value(json!({"href": "/a"})).unwrap();
        assert!(link.rel.is_empty());
    }
}
