//! # Siren Codec
//!
//! Serialization of hypermedia resource graphs to and from the Siren format
//! (`application/vnd.siren+json`).
//!
//! Applications describe what they return as a resource graph: entities,
//! collections and paged collections of payloads, each carrying links whose
//! affordances describe the operations a client may perform. The codec renders
//! the graph as a Siren document and reads documents back given the expected
//! shape of the graph.
//!
//! ## Features
//!
//! - **Typed Model**: Closed resource and wire types with serde support
//! - **Pluggable Policies**: Entity classes, relation naming, titles and field
//!   introspection are injected traits
//! - **Shape Directed Reads**: Documents decode into the graph shape the caller expects
//!
//! ## Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use siren_codec::prelude::*;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Employee {
//!     name: String,
//!     age: u32,
//! }
//!
//! fn main() -> Result<(), SirenError> {
//!     let peter = Employee { name: "Peter".into(), age: 33 };
//!     let update = Affordance::new(HttpMethod::Put)
//!         .with_name("update")
//!         .with_input(InputType::new("Employee").property("age", PropertyKind::Integer));
//!     let resource = Entity::of(&peter)?
//!         .with_link(Link::of("/employees/1").and_affordance(update));
//!
//!     let codec = SirenCodec::new();
//!     let text = codec.to_string(&resource.into())?;
//!
//!     let shape = Shape::entity(Shape::of::<Employee>());
//!     let read = codec.from_str(&text, &shape)?;
//!     assert_eq!(read.links()[0].href(), "/employees/1");
//!
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod policy;
pub mod resource;
pub mod siren;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        codec::{Codec, Shape, SirenCodec, SirenCodecBuilder},
        config::SirenConfig,
        policy::{
            EntityClassProvider, LinkRelationProvider, MessageSource, PluralRelationProvider,
            PropertyIntrospector, RelationEntityClassProvider, StaticMessageSource,
        },
        resource::{
            Affordance, Collection, Content, Entity, HttpMethod, InputType, Link, LinkRelation,
            PageMetadata, Paged, PropertyKind, Representation, Resource,
        },
        siren::{SirenEntity, SirenError, SirenResult},
    };
}
