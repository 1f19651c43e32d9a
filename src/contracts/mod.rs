//! Contractor tracking: full list and the 30-day expiry view.

pub mod model;
pub mod routes;

pub use model::{ContractCatalog, ContractorRecord, EXPIRY_WINDOW_DAYS};
pub use routes::contract_routes;
