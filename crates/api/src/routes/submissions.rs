//! Route definitions for the `/submissions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

/// Routes mounted at `/submissions`.
///
/// ```text
/// GET    /schema         -> schema
/// POST   /validate       -> validate      (multipart, field `file`)
/// POST   /validate/csv   -> validate_csv  (multipart, field `file`)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schema", get(submissions::schema))
        .route("/validate", post(submissions::validate))
        .route("/validate/csv", post(submissions::validate_csv))
}
