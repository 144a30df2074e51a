use std::sync::Arc;

use rowcheck_core::rules::RuleSet;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Column rules, built once at startup.
    pub rules: Arc<RuleSet>,
}
