use axum::{
    routing::{get, post},
    Router,
};

pub mod categories;
pub mod common;
pub mod dashboards;
pub mod exports;
pub mod logs;
pub mod movements;
pub mod products;
pub mod session;
pub mod system;

/// Endpoints reachable without a session.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/", get(session::index))
        .route("/login", get(session::login_form).post(session::login))
        .route("/logout", post(session::logout))
}

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/api/categorias", categories::router())
        .nest("/api/productos", products::router())
        .nest("/api/inventarios", movements::router())
        .nest("/dashboard", dashboards::router())
        .nest("/export", exports::router())
        .nest("/logs", logs::router())
}
