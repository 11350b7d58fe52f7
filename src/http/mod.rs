use axum::Router;

use crate::AppState;

mod auth;
mod error;
mod handlers;
mod routes;

pub use auth::BearerToken;
pub use error::AppError;

pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(routes::health())
        .merge(routes::login())
        .merge(routes::users())
        .merge(routes::posts());

    if state.enable_test_routes {
        router = router.merge(routes::testing());
    }

    router.fallback(handlers::unknown_endpoint).with_state(state)
}
