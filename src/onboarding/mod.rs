//! Staff onboarding: per-hire task checklists with a persisted toggle.
//!
//! The task store is the only mutable domain state besides the upload
//! archive. Every change is flushed to the record store before the toggle
//! returns.

pub mod model;
pub mod routes;
pub mod store;

pub use model::{StaffRecord, Task};
pub use routes::onboarding_routes;
pub use store::TaskStore;
