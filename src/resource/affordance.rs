//! Affordances and the type descriptors they carry

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::siren::FieldType;

/// HTTP method of a state transition
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl HttpMethod {
    /// The upper-case method token
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Whether requests with this method carry a body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic type of an input property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    String,
    Integer,
    Float,
    Boolean,
    Object,
}

impl PropertyKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, PropertyKind::Integer | PropertyKind::Float)
    }
}

/// An addressable property of an input type
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,

    pub kind: PropertyKind,

    /// Explicit field type, overriding the one derived from `kind`
    pub field_type: Option<FieldType>,

    /// Seed value rendered as the field's `value`
    pub value: Option<Value>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            field_type: None,
            value: None,
        }
    }

    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Type descriptor for the input or output of an affordance
#[derive(Debug, Clone, PartialEq)]
pub struct InputType {
    /// Short type name, e.g. `Employee`
    pub name: String,

    /// Declared properties in declaration order
    pub properties: Vec<PropertyDescriptor>,
}

impl InputType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Declare a property
    pub fn property(mut self, name: impl Into<String>, kind: PropertyKind) -> Self {
        self.properties.push(PropertyDescriptor::new(name, kind));
        self
    }

    /// Declare a fully described property
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }
}

/// An available state transition on a link target
#[derive(Debug, Clone, PartialEq)]
pub struct Affordance {
    pub method: HttpMethod,

    pub name: Option<String>,

    pub input: Option<InputType>,

    pub output: Option<InputType>,
}

impl Affordance {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            name: None,
            input: None,
            output: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_input(mut self, input: InputType) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_output(mut self, output: InputType) -> Self {
        self.output = Some(output);
        self
    }
}
