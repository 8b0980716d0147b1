//! Pluggable policies used by the codec
//!
//! Every policy is a narrow `Send + Sync` capability so one codec instance can
//! be shared by concurrent callers.

pub mod affordance;
pub mod class;
pub mod relation;
pub mod title;

pub use affordance::{AffordanceMapper, DeclaredProperties, PropertyIntrospector};
pub use class::{EntityClassProvider, RelationEntityClassProvider, SimpleEntityClassProvider};
pub use relation::{DefaultRelationProvider, LinkRelationProvider, PluralRelationProvider};
pub use title::{MessageSource, StaticMessageSource, TitleCodes, TitleResolver};
