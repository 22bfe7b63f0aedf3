use axum::Router;

use crate::state::AppState;

pub mod doc;
pub mod extract;
pub mod health;
pub mod products;

// State is provided at the top level so tests can mount the same router.
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest("/products", products::router())
}
