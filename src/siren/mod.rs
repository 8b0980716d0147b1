//! Siren wire model
//!
//! These types mirror the `application/vnd.siren+json` document format one to
//! one. Optional members that are absent or empty are left out of the rendered
//! JSON entirely, so the serde attributes here define the exact wire shape.

use serde::{de::Error as _, Deserialize, Deserializer};

pub mod action;
pub mod entity;
pub mod error;
pub mod link;

pub use action::{FieldType, SirenAction, SirenActionBuilder, SirenField, SirenFieldBuilder};
pub use entity::{SirenEmbedded, SirenEmbeddedEntity, SirenEmbeddedLink, SirenEntity};
pub use error::{SirenError, SirenResult};
pub use link::{SirenLink, SirenLinkBuilder};

/// The Siren media type
pub const SIREN_MEDIA_TYPE: &str = "application/vnd.siren+json";

/// Deserialize a string that must not be empty
pub(crate) fn non_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(D::Error::custom("value must not be empty"));
    }
    Ok(value)
}

/// Deserialize a string sequence that must have at least one element
pub(crate) fn non_empty_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<String>::deserialize(deserializer)?;
    if values.is_empty() {
        return Err(D::Error::custom("sequence must not be empty"));
    }
    Ok(values)
}
