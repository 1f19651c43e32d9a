//! HTTP surface: state, error envelope, and router assembly.

pub mod caller;
pub mod error;
pub mod state;
pub mod system;

use axum::Router;
use axum::http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use error::ApiError;
pub use state::{AppState, Catalog};

use crate::auth::auth_routes;
use crate::contracts::contract_routes;
use crate::onboarding::onboarding_routes;
use crate::resources::resource_routes;
use crate::uploads::upload_routes;
use crate::workforce::workforce_routes;

/// CORS for the dashboard. An empty list or `*` allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.is_empty() || origins.iter().any(|o| o == "*");
    let origin = if allow_any {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application router.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(system::system_routes())
        .merge(auth_routes())
        .merge(contract_routes())
        .merge(onboarding_routes())
        .merge(resource_routes())
        .merge(upload_routes())
        .merge(workforce_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}
