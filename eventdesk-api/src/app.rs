/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use eventdesk_api::{app::{build_router, AppState}, config::Config};
/// use eventdesk_shared::auth::service::AuthService;
/// use sqlx::PgPool;
///
/// # async fn example(auth: AuthService) -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, auth, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use eventdesk_shared::{
    auth::{
        authorization::create_role_middleware, middleware::create_jwt_middleware,
        service::AuthService,
    },
    models::user::Role,
};
use sqlx::PgPool;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{config::Config, routes};

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Auth pipeline
    pub auth: Arc<AuthService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, auth: AuthService, config: Config) -> Self {
        Self {
            db,
            auth: Arc::new(auth),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router
///
/// ```text
/// /
/// ├── GET /health
/// └── /api/
///     ├── /auth/
///     │   ├── POST /register
///     │   ├── POST /login
///     │   ├── POST /activation
///     │   └── GET  /me                 (bearer)
///     ├── /category/
///     │   ├── GET    /  , /:id
///     │   └── POST / , PUT|DELETE /:id (admin)
///     └── /events/
///         ├── GET    /  , /:id , /:slug/slug
///         └── POST / , PUT|DELETE /:id (admin)
/// ```
///
/// Layers, outermost first: CORS, tracing, then per-route authentication
/// and role checks.
pub fn build_router(state: AppState) -> Router {
    let issuer = state.auth.issuer().clone();
    let authenticated = from_fn(create_jwt_middleware(issuer));
    let admin_only = from_fn(create_role_middleware(&[Role::Admin]));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/activation", post(routes::auth::activation))
        .merge(
            Router::new()
                .route("/me", get(routes::auth::me))
                .route_layer(authenticated.clone()),
        );

    let category_routes = Router::new()
        .route("/", get(routes::category::find_all))
        .route("/:id", get(routes::category::find_one))
        .merge(
            Router::new()
                .route("/", post(routes::category::create))
                .route(
                    "/:id",
                    axum::routing::put(routes::category::update)
                        .delete(routes::category::remove),
                )
                .route_layer(admin_only.clone())
                .route_layer(authenticated.clone()),
        );

    // Both dynamic segments share the `:id` name; the slug handler reads it
    // as a string.
    let event_routes = Router::new()
        .route("/", get(routes::event::find_all))
        .route("/:id", get(routes::event::find_one))
        .route("/:id/slug", get(routes::event::find_by_slug))
        .merge(
            Router::new()
                .route("/", post(routes::event::create))
                .route(
                    "/:id",
                    axum::routing::put(routes::event::update).delete(routes::event::remove),
                )
                .route_layer(admin_only)
                .route_layer(authenticated),
        );

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/category", category_routes)
        .nest("/events", event_routes);

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
