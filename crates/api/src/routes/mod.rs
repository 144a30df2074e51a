pub mod health;
pub mod submissions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /submissions/schema                              expected columns (GET)
/// /submissions/validate                            validate upload, JSON report (POST)
/// /submissions/validate/csv                        validate upload, CSV error list (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/submissions", submissions::router())
}
