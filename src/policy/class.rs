//! Entity class providers

use std::sync::Arc;

use super::relation::LinkRelationProvider;
use crate::{resource::Resource, siren::error::SirenResult};

/// Maps a resource graph node to the `class` of its Siren entity
pub trait EntityClassProvider: Send + Sync {
    /// Classes for `resource`; the result must not be empty
    fn get(&self, resource: &Resource) -> SirenResult<Vec<String>>;
}

/// Classifies nodes purely by their variant
///
/// Yields exactly one of `representation`, `entity`, `collection` or `paged`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleEntityClassProvider;

impl EntityClassProvider for SimpleEntityClassProvider {
    fn get(&self, resource: &Resource) -> SirenResult<Vec<String>> {
        let class = match resource {
            Resource::Paged(_) => "paged",
            Resource::Collection(_) => "collection",
            Resource::Entity(_) => "entity",
            Resource::Representation(_) => "representation",
        };
        Ok(vec![class.to_string()])
    }
}

/// Classifies nodes by the relation name of their declared payload type
///
/// Entities get the item relation of their content type, collections the
/// collection relation of their item type. Nodes without a declared type fall
/// back to the variant name.
#[derive(Clone)]
pub struct RelationEntityClassProvider {
    relations: Arc<dyn LinkRelationProvider>,
}

impl RelationEntityClassProvider {
    pub fn new(relations: Arc<dyn LinkRelationProvider>) -> Self {
        Self { relations }
    }
}

impl EntityClassProvider for RelationEntityClassProvider {
    fn get(&self, resource: &Resource) -> SirenResult<Vec<String>> {
        let Some(type_name) = resource.declared_type() else {
            return SimpleEntityClassProvider.get(resource);
        };

        let relation = if resource.is_collection() {
            self.relations.collection_relation(type_name)
        } else {
            self.relations.item_relation(type_name)
        };
        Ok(vec![relation.as_str().to_string()])
    }
}

impl std::fmt::Debug for RelationEntityClassProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationEntityClassProvider").finish()
    }
}
