use super::AppState;
use super::handlers;
use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/content", get(handlers::admin_content))
        .route("/sections/:section", put(handlers::save_section))
        .route("/sections/:section/draft", get(handlers::section_draft))
        .route("/sections/:section/schema", get(handlers::section_schema))
        .route("/sections/:section/preview", post(handlers::preview_section))
        .route("/notifications", get(handlers::notifications))
        .route("/activity", get(handlers::activity));

    let api = Router::new()
        .route("/auth/sign-in", post(handlers::sign_in))
        .route("/auth/sign-out", post(handlers::sign_out))
        .route("/content", get(handlers::public_content))
        .nest("/admin", admin);

    Router::new()
        .route("/health", get(handlers::healthcheck))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
