//! Workforce catalogs: time off, time tracking, groups, entities.

pub mod model;
pub mod routes;

pub use model::{Entity, Groups, TimeOff, TimeTracking, WorkforceCatalog};
pub use routes::workforce_routes;
