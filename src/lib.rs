//! MuvHR: role-gated HR administration backend.

pub mod access;
pub mod api;
pub mod auth;
pub mod config;
pub mod contracts;
pub mod error;
pub mod onboarding;
pub mod resources;
pub mod store;
pub mod uploads;
pub mod workforce;
