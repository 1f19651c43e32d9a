//! Role-based access control.
//!
//! Every HTTP endpoint resolves a caller role and passes it through
//! [`AccessGate`] with the feature it serves. Nothing else in the crate
//! makes permission decisions.

pub mod feature;
pub mod gate;
pub mod role;
pub mod table;

pub use feature::Feature;
pub use gate::AccessGate;
pub use role::Role;
pub use table::PermissionTable;
