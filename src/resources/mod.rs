//! Shared resource library, filtered per role.

pub mod model;
pub mod routes;

pub use model::{ResourceCatalog, ResourceRecord};
pub use routes::resource_routes;
