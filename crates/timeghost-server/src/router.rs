//! Axum router construction for the Timeghost server.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /`, `GET /worst/random` -- random middle, chronological scan, last = now
/// - `GET /random/random` -- random middle, shuffled scan, last = now
/// - `GET /arbitrary/{worst,random}/random` -- random middle, arbitrary last
/// - `GET /worst/{slug}`, `GET /random/{slug}` -- pinned middle, last = now
/// - `GET /arbitrary/{worst,random}/{slug}` -- pinned middle, arbitrary last
/// - `GET /{first}/{middle}/{last}` -- fully specified, unchecked
/// - `GET /pick`, `POST /pick` -- choose a first and middle by hand
/// - `GET /raves` -- static page
/// - `GET /api/timeghost` -- one selection as JSON
///
/// Static segments win over parameters, so `/worst/random` is never read
/// as a slug and `/arbitrary/...` never reaches the fully specified route.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::worst_random))
        .route("/worst/random", get(handlers::worst_random))
        .route("/random/random", get(handlers::random_random))
        .route("/arbitrary/worst/random", get(handlers::arbitrary_worst_random))
        .route("/arbitrary/random/random", get(handlers::arbitrary_random_random))
        .route("/worst/{slug}", get(handlers::worst_pinned))
        .route("/random/{slug}", get(handlers::random_pinned))
        .route("/arbitrary/worst/{slug}", get(handlers::arbitrary_worst_pinned))
        .route("/arbitrary/random/{slug}", get(handlers::arbitrary_random_pinned))
        .route("/pick", get(handlers::pick_form).post(handlers::pick_submit))
        .route("/raves", get(handlers::raves))
        .route("/api/timeghost", get(handlers::api_timeghost))
        .route("/{first}/{middle}/{last}", get(handlers::fully_specified))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
