use std::sync::Arc;

use serde::{Deserialize, Serialize};
use siren_codec::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize)]
struct Employee {
    name: String,
    role: String,
    age: u32,
}

fn employee(id: u32, name: &str, role: &str, age: u32) -> Result<Entity, SirenError> {
    let href = format!("/employees/{id}");
    let update = Affordance::new(HttpMethod::Put).with_name("update").with_input(
        InputType::new("Employee")
            .property("name", PropertyKind::String)
            .property("role", PropertyKind::String)
            .property("age", PropertyKind::Integer),
    );
    let delete = Affordance::new(HttpMethod::Delete).with_name("remove");

    Ok(Entity::of(&Employee {
        name: name.into(),
        role: role.into(),
        age,
    })?
    .with_link(Link::of(href).and_affordance(update).and_affordance(delete)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing, e.g. RUST_LOG=siren_codec=trace
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Siren Employee Directory Example\n");

    let relations = Arc::new(PluralRelationProvider);
    let messages = StaticMessageSource::new()
        .with_message("_link.self.title", "This page")
        .with_message("_link.next.title", "Next page")
        .with_message("_action.update.title", "Update employee")
        .with_message("_action.remove.title", "Remove employee");
    let codec = SirenCodec::builder()
        .with_relation_provider(relations.clone())
        .with_class_provider(Arc::new(RelationEntityClassProvider::new(relations)))
        .with_message_source(Arc::new(messages))
        .with_pretty(true)
        .build()?;

    let page = Collection::new([
        employee(1, "Peter", "engineer", 33)?,
        employee(2, "Paul", "designer", 44)?,
    ])
    .with_item_type("Employee");
    let directory = Paged::new(page, PageMetadata::from_totals(2, 0, 5))
        .with_link(Link::of("/employees?page=0"))
        .with_link(Link::new("/employees?page=1", LinkRelation::NEXT));

    let resource: Resource = directory.into();
    let text = codec.to_string(&resource)?;
    println!("{text}\n");

    let read = codec.from_str(&text, &resource.shape())?;
    println!("Read back equal graph: {}", read == resource);

    Ok(())
}
