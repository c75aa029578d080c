//! # EventDesk API Server
//!
//! Event management backend: user registration with mailed activation
//! codes, token login, and category/event CRUD.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p eventdesk-api
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use eventdesk_api::{
    app::{build_router, AppState},
    config::Config,
};
use eventdesk_shared::{
    auth::{
        jwt::TokenIssuer,
        password::{CredentialHasher, HashParams},
        service::{AuthOptions, AuthService},
    },
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    mail::{
        relay::{RelayConfig, RelayMailer},
        LogMailer, Mailer,
    },
    store::PgUserStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventdesk_api=debug,eventdesk_shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "EventDesk API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await
    .context("Failed to connect to database")?;

    run_migrations(&pool).await.context("Failed to run migrations")?;

    let hasher = CredentialHasher::new(&config.hash.secret, HashParams::default())?;
    let issuer = TokenIssuer::new(
        &config.jwt.secret,
        chrono::Duration::seconds(config.jwt.expires_in_seconds),
    )?;

    let mailer: Arc<dyn Mailer> = match &config.mail.relay_url {
        Some(url) => {
            tracing::info!(relay = %url, "Sending mail through relay");
            Arc::new(RelayMailer::new(RelayConfig {
                url: url.clone(),
                token: config.mail.relay_token.clone(),
                timeout: Duration::from_secs(10),
            })?)
        }
        None => {
            tracing::warn!("MAIL_RELAY_URL not set, activation mail will only be logged");
            Arc::new(LogMailer)
        }
    };

    let auth = AuthService::new(
        Arc::new(PgUserStore::new(pool.clone())),
        hasher,
        issuer,
        mailer,
        AuthOptions {
            require_active: config.auth.require_active,
            mail_from: config.mail.from.clone(),
            client_host: config.mail.client_host.clone(),
        },
    );

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), auth, config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
