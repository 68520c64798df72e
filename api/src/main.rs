mod error;
mod handlers;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use common::db;
use common::settings::Settings;
use common::Services;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct AppState {
    pub services: Services,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().expect("Failed to load configuration");

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = db::establish_connection(&settings.database.url).await?;
    let (_repos, services) = common::build_all(Arc::new(db));

    let state = Arc::new(AppState { services });

    let cors = build_cors(&settings);
    let app = build_router(state).layer(TraceLayer::new_for_http()).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();

    Ok(())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "HR Directory API" }))
        .route(
            "/api/departments",
            get(handlers::departments::index).post(handlers::departments::store),
        )
        .route(
            "/api/departments/:id",
            get(handlers::departments::show)
                .put(handlers::departments::update)
                .delete(handlers::departments::destroy),
        )
        .route(
            "/api/skills",
            get(handlers::skills::index).post(handlers::skills::store),
        )
        .route(
            "/api/skills/:id",
            get(handlers::skills::show)
                .put(handlers::skills::update)
                .delete(handlers::skills::destroy),
        )
        .route(
            "/api/employees",
            get(handlers::employees::index).post(handlers::employees::store),
        )
        .route("/api/employees/form-data", get(handlers::employees::form_data))
        .route(
            "/api/employees/:id",
            get(handlers::employees::show)
                .put(handlers::employees::update)
                .delete(handlers::employees::destroy),
        )
        .route("/api/check-email", post(handlers::employees::check_email))
        .with_state(state)
}

fn build_cors(settings: &Settings) -> CorsLayer {
    let origin = settings
        .frontend_origin
        .as_ref()
        .and_then(|s| HeaderValue::from_str(s).ok());

    match (settings.debug, origin) {
        (false, Some(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .allow_methods(Any),
        _ => CorsLayer::permissive(),
    }
}
