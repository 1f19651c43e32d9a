//! Login sessions that attach a role to later requests.

pub mod routes;
pub mod session;

pub use routes::auth_routes;
pub use session::{Session, SessionStore, UserRecord, hash_password};
