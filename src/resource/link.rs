//! Links and link relations

use std::{borrow::Cow, fmt};

use super::affordance::Affordance;
use crate::siren::error::{SirenError, SirenResult};

/// A link relation type such as `self` or `next`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkRelation(Cow<'static, str>);

impl LinkRelation {
    pub const SELF: LinkRelation = LinkRelation(Cow::Borrowed("self"));
    pub const ITEM: LinkRelation = LinkRelation(Cow::Borrowed("item"));
    pub const COLLECTION: LinkRelation = LinkRelation(Cow::Borrowed("collection"));
    pub const NEXT: LinkRelation = LinkRelation(Cow::Borrowed("next"));
    pub const PREV: LinkRelation = LinkRelation(Cow::Borrowed("prev"));
    pub const FIRST: LinkRelation = LinkRelation(Cow::Borrowed("first"));
    pub const LAST: LinkRelation = LinkRelation(Cow::Borrowed("last"));
    pub const ABOUT: LinkRelation = LinkRelation(Cow::Borrowed("about"));
    pub const DESCRIBED_BY: LinkRelation = LinkRelation(Cow::Borrowed("describedby"));
    pub const EDIT: LinkRelation = LinkRelation(Cow::Borrowed("edit"));

    /// Create a relation from an arbitrary name
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The relation name as it appears on the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LinkRelation {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LinkRelation {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&LinkRelation> for LinkRelation {
    fn from(rel: &LinkRelation) -> Self {
        rel.clone()
    }
}

impl AsRef<str> for LinkRelation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A link from a resource to another resource
///
/// A link always carries at least one relation. Relations behave like an
/// insertion-ordered set: adding a relation twice keeps the first occurrence.
/// Affordances attached to the link describe the state transitions available
/// on its target.
#[derive(Debug, Clone)]
pub struct Link {
    relations: Vec<LinkRelation>,
    href: String,
    title: Option<String>,
    media_type: Option<String>,
    affordances: Vec<Affordance>,
}

impl Link {
    /// Create a link with a single relation
    pub fn new(href: impl Into<String>, rel: impl Into<LinkRelation>) -> Self {
        Self {
            relations: vec![rel.into()],
            href: href.into(),
            title: None,
            media_type: None,
            affordances: Vec::new(),
        }
    }

    /// Create a `self` link
    pub fn of(href: impl Into<String>) -> Self {
        Self::new(href, LinkRelation::SELF)
    }

    /// Create a link with several relations
    ///
    /// Fails with [`SirenError::Construction`] when `rels` is empty.
    pub fn with_relations<I, R>(href: impl Into<String>, rels: I) -> SirenResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<LinkRelation>,
    {
        let mut relations: Vec<LinkRelation> = Vec::new();
        for rel in rels {
            let rel = rel.into();
            if !relations.contains(&rel) {
                relations.push(rel);
            }
        }

        if relations.is_empty() {
            return Err(SirenError::Construction(
                "Link must have at least one relation".into(),
            ));
        }

        Ok(Self {
            relations,
            href: href.into(),
            title: None,
            media_type: None,
            affordances: Vec::new(),
        })
    }

    /// Add another relation
    pub fn and_relation(mut self, rel: impl Into<LinkRelation>) -> Self {
        let rel = rel.into();
        if !self.relations.contains(&rel) {
            self.relations.push(rel);
        }
        self
    }

    /// Set an explicit title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the media type of the link target
    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Attach an affordance
    pub fn and_affordance(mut self, affordance: Affordance) -> Self {
        self.affordances.push(affordance);
        self
    }

    pub fn relations(&self) -> &[LinkRelation] {
        &self.relations
    }

    /// The first relation of the link
    pub fn relation(&self) -> &LinkRelation {
        // non-empty by construction
        &self.relations[0]
    }

    pub fn has_relation(&self, rel: &str) -> bool {
        self.relations.iter().any(|r| r.as_str() == rel)
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn affordances(&self) -> &[Affordance] {
        &self.affordances
    }
}

/// Titles and affordances are left out: titles may be resolved from a message
/// catalog and affordances are never read back from a document.
impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.relations == other.relations
            && self.href == other.href
            && self.media_type == other.media_type
    }
}
