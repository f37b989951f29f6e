mod auth;
mod config;
mod db;
mod diagram;
mod errors;
mod execution;
mod extract;
mod insights;
mod interview;
mod llm_client;
mod resume;
mod roadmap;
mod routes;
mod state;
mod whiteboard;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::AuthKeys;
use crate::config::Config;
use crate::db::create_pool;
use crate::diagram::hub::DiagramHub;
use crate::execution::client::Judge0Client;
use crate::insights::generator::LlmInsightGenerator;
use crate::insights::service::InsightService;
use crate::insights::store::PgInsightStore;
use crate::interview::repository::PgInterviewRepository;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Placement API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize execution client
    let executor = Judge0Client::new(
        &config.judge0_url,
        config.judge0_api_key.clone(),
        Duration::from_millis(config.judge0_poll_ms),
    )?;
    info!(
        "Execution client initialized ({}, poll every {}ms)",
        config.judge0_url, config.judge0_poll_ms
    );

    // Build app state
    let state = AppState {
        auth: AuthKeys::new(&config.jwt_secret, config.jwt_audience.as_deref()),
        interviews: Arc::new(PgInterviewRepository::new(db.clone())),
        insights: InsightService::new(
            Arc::new(PgInsightStore::new(db)),
            Arc::new(LlmInsightGenerator::new(llm.clone())),
        ),
        executor,
        completion: Arc::new(llm),
        diagrams: DiagramHub::default(),
        resume_role: config.resume_role.as_str().into(),
    };

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_url.parse::<HeaderValue>()?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
