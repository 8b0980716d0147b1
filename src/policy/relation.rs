//! Link relation naming policies

use heck::ToLowerCamelCase;

use crate::resource::LinkRelation;

/// Derives relation names from a declared payload type name
pub trait LinkRelationProvider: Send + Sync {
    /// Relation for a single item of the type, e.g. `employee`
    fn item_relation(&self, type_name: &str) -> LinkRelation;

    /// Relation for a collection of the type, e.g. `employees`
    fn collection_relation(&self, type_name: &str) -> LinkRelation;
}

/// Uncapitalized type name for items, suffixed with `List` for collections
///
/// `Employee` becomes `employee` and `employeeList`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRelationProvider;

impl LinkRelationProvider for DefaultRelationProvider {
    fn item_relation(&self, type_name: &str) -> LinkRelation {
        LinkRelation::new(type_name.to_lower_camel_case())
    }

    fn collection_relation(&self, type_name: &str) -> LinkRelation {
        LinkRelation::new(format!("{}List", type_name.to_lower_camel_case()))
    }
}

/// Uncapitalized type name for items, its English plural for collections
///
/// `Employee` becomes `employee` and `employees`, `Category` becomes
/// `category` and `categories`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PluralRelationProvider;

impl LinkRelationProvider for PluralRelationProvider {
    fn item_relation(&self, type_name: &str) -> LinkRelation {
        LinkRelation::new(type_name.to_lower_camel_case())
    }

    fn collection_relation(&self, type_name: &str) -> LinkRelation {
        LinkRelation::new(pluralize(&type_name.to_lower_camel_case()))
    }
}

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
];

fn pluralize(word: &str) -> String {
    if word.is_ascii() {
        let lower = word.to_ascii_lowercase();
        for (singular, plural) in IRREGULAR {
            if !lower.ends_with(singular) {
                continue;
            }
            let (stem, tail) = word.split_at(word.len() - singular.len());
            // whole word, or the last hump of a compound such as `salesPerson`
            if stem.is_empty() {
                return plural.to_string();
            }
            if tail.starts_with(|c: char| c.is_ascii_uppercase()) {
                return format!("{stem}{}{}", plural[..1].to_ascii_uppercase(), &plural[1..]);
            }
        }
    }

    let mut chars = word.chars().rev();
    if let (Some('y'), Some(before)) = (chars.next(), chars.next()) {
        if !"aeiou".contains(before.to_ascii_lowercase()) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{word}es");
    }

    format!("{word}s")
}
