//! Encoding and decoding of resource graphs

pub mod builder;
pub mod deserializer;
pub mod serializer;
pub mod shape;
pub mod siren;

pub use builder::SirenCodecBuilder;
pub use deserializer::SirenDeserializer;
pub use serializer::SirenSerializer;
pub use shape::{Leaf, Shape};
pub use siren::SirenCodec;

use bytes::Bytes;

use crate::{resource::Resource, siren::error::SirenResult};

/// Codec trait for encoding and decoding resource graphs
///
/// Each implementation renders one hypermedia media type.
pub trait Codec: Send + Sync {
    /// Serialize a resource graph to bytes
    ///
    /// # Arguments
    ///
    /// * `resource` - The root of the resource graph
    ///
    /// # Returns
    ///
    /// The serialized bytes or an error
    fn encode(&self, resource: &Resource) -> SirenResult<Bytes>;

    /// Deserialize bytes to a resource graph
    ///
    /// # Arguments
    ///
    /// * `body` - The document bytes
    /// * `shape` - The expected shape of the graph
    ///
    /// # Returns
    ///
    /// The decoded resource graph or an error
    fn decode(&self, body: &[u8], shape: &Shape) -> SirenResult<Resource>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;
}
