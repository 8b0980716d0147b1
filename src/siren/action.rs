//! Siren actions and their fields

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    error::{SirenError, SirenResult},
    non_empty_string,
};
use crate::resource::HttpMethod;

/// A state transition exposed by a Siren entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SirenAction {
    #[serde(deserialize_with = "non_empty_string")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,

    /// HTTP method, `GET` when not supplied
    #[serde(default)]
    pub method: HttpMethod,

    #[serde(deserialize_with = "non_empty_string")]
    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Encoding of the request body
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SirenField>,
}

impl SirenAction {
    pub fn builder() -> SirenActionBuilder {
        SirenActionBuilder::new()
    }
}

/// Builder for constructing SirenAction instances
#[derive(Debug, Default)]
pub struct SirenActionBuilder {
    name: Option<String>,
    class: Vec<String>,
    method: Option<HttpMethod>,
    href: Option<String>,
    title: Option<String>,
    media_type: Option<String>,
    fields: Vec<SirenField>,
}

impl SirenActionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class.push(class.into());
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
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

    /// Set an optional title
    pub fn maybe_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Add a single field
    pub fn field(mut self, field: SirenField) -> Self {
        self.fields.push(field);
        self
    }

    /// Set all fields
    pub fn fields(mut self, fields: Vec<SirenField>) -> Self {
        self.fields = fields;
        self
    }

    /// Build the action
    ///
    /// Fails with [`SirenError::Construction`] when the name or the href is
    /// missing or empty.
    pub fn build(self) -> SirenResult<SirenAction> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SirenError::Construction("SirenAction requires a name".into()))?;
        let href = self
            .href
            .filter(|href| !href.is_empty())
            .ok_or_else(|| SirenError::Construction("SirenAction requires an href".into()))?;

        Ok(SirenAction {
            name,
            class: self.class,
            method: self.method.unwrap_or_default(),
            href,
            title: self.title,
            media_type: self.media_type,
            fields: self.fields,
        })
    }
}

/// Input type of a Siren field
///
/// The set follows the HTML5 input types referenced by the Siren format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Hidden,
    #[default]
    Text,
    Search,
    Tel,
    Url,
    Email,
    Password,
    Datetime,
    Date,
    Month,
    Week,
    Time,
    #[serde(rename = "datetime-local")]
    DatetimeLocal,
    Number,
    Range,
    Color,
    Checkbox,
    Radio,
    File,
}

/// An input control of a Siren action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SirenField {
    #[serde(deserialize_with = "non_empty_string")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,

    /// Input type, `text` when not supplied
    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SirenField {
    pub fn builder() -> SirenFieldBuilder {
        SirenFieldBuilder::new()
    }
}

/// Builder for constructing SirenField instances
#[derive(Debug, Default)]
pub struct SirenFieldBuilder {
    name: Option<String>,
    class: Vec<String>,
    field_type: Option<FieldType>,
    value: Option<Value>,
    title: Option<String>,
}

impl SirenFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class.push(class.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set an optional title
    pub fn maybe_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Build the field
    ///
    /// Fails with [`SirenError::Construction`] when the name is missing or empty.
    pub fn build(self) -> SirenResult<SirenField> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SirenError::Construction("SirenField requires a name".into()))?;

        Ok(SirenField {
            name,
            class: self.class,
            field_type: self.field_type.unwrap_or_default(),
            value: self.value,
            title: self.title,
        })
    }
}
