//! Mapping of affordances to Siren actions

use heck::ToUpperCamelCase;

use super::title::TitleResolver;
use crate::{
    resource::{Affordance, InputType, Link, PropertyDescriptor},
    siren::{error::SirenResult, FieldType, SirenAction, SirenField},
};

/// Media type of action bodies rendered from typed inputs
pub const ACTION_MEDIA_TYPE: &str = "application/json";

/// Enumerates the addressable properties of an input type
#[cfg_attr(test, mockall::automock)]
pub trait PropertyIntrospector: Send + Sync {
    /// Properties of `input` in declaration order
    fn properties(&self, input: &InputType) -> Vec<PropertyDescriptor>;
}

/// Uses the properties declared on the input type itself
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredProperties;

impl PropertyIntrospector for DeclaredProperties {
    fn properties(&self, input: &InputType) -> Vec<PropertyDescriptor> {
        input.properties.clone()
    }
}

/// Turns the affordances of a link into Siren actions
#[derive(Clone)]
pub struct AffordanceMapper<'a> {
    titles: &'a TitleResolver,
    introspector: &'a dyn PropertyIntrospector,
}

impl<'a> AffordanceMapper<'a> {
    pub fn new(titles: &'a TitleResolver, introspector: &'a dyn PropertyIntrospector) -> Self {
        Self {
            titles,
            introspector,
        }
    }

    /// One action per affordance of `link`, in affordance order
    pub fn to_actions(&self, link: &Link) -> SirenResult<Vec<SirenAction>> {
        link.affordances()
            .iter()
            .map(|affordance| self.to_action(link, affordance))
            .collect()
    }

    fn to_action(&self, link: &Link, affordance: &Affordance) -> SirenResult<SirenAction> {
        let name = action_name(affordance);
        let fields = match &affordance.input {
            Some(input) => self
                .introspector
                .properties(input)
                .iter()
                .map(|property| self.to_field(property))
                .collect::<SirenResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        let mut builder = SirenAction::builder()
            .maybe_title(self.titles.action_title(&name))
            .name(name)
            .method(affordance.method)
            .href(link.href());

        if affordance.method.has_body() && !fields.is_empty() {
            builder = builder.media_type(ACTION_MEDIA_TYPE);
        }

        builder.fields(fields).build()
    }

    fn to_field(&self, property: &PropertyDescriptor) -> SirenResult<SirenField> {
        let mut builder = SirenField::builder()
            .name(&property.name)
            .field_type(field_type(property))
            .maybe_title(self.titles.field_title(&property.name));

        if let Some(value) = &property.value {
            builder = builder.value(value.clone());
        }

        builder.build()
    }
}

impl std::fmt::Debug for AffordanceMapper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffordanceMapper")
            .field("titles", self.titles)
            .finish()
    }
}

/// The affordance name, else the lower-case method followed by the input type name
///
/// A `PUT` affordance taking an `Employee` is named `putEmployee`.
pub fn action_name(affordance: &Affordance) -> String {
    if let Some(name) = affordance.name.as_ref().filter(|name| !name.is_empty()) {
        return name.clone();
    }

    let method = affordance.method.as_str().to_lowercase();
    match &affordance.input {
        Some(input) => format!("{method}{}", input.name.to_upper_camel_case()),
        None => method,
    }
}

/// Explicit field type, else `number` for numeric properties and `text` otherwise
pub fn field_type(property: &PropertyDescriptor) -> FieldType {
    property.field_type.unwrap_or(if property.kind.is_numeric() {
        FieldType::Number
    } else {
        FieldType::Text
    })
}
