//! Entity contract and descriptor.

mod descriptor;
mod model;

pub use descriptor::{describe, EntityKey};
pub use model::EntityModel;
