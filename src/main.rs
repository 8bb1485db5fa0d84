// src/main.rs

use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use persona_backend::api::http::http_router;
use persona_backend::config::Config;
use persona_backend::llm::{ChatClient, OpenAiClient};
use persona_backend::persona::{PersonaStore, migration::run_migrations};
use persona_backend::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "persona-backend", version, about = "Persona CRUD service with an LLM chat-completion relay")]
struct Args {
    /// Address to bind (overrides PERSONA_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PERSONA_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!("Starting persona backend");
    info!("Model: {}", config.openai_model);
    if config.openai_api_key.is_none() {
        info!("OPENAI_API_KEY not set - prompt relay will answer 500 until it is");
    }

    // Create database pool; the database file is created if absent, the
    // table on every startup (idempotent).
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.sqlite_max_connections)
        .connect_with(connect_options)
        .await?;
    run_migrations(&pool).await?;

    let persona_store = Arc::new(PersonaStore::new(pool));
    let chat_client: Arc<dyn ChatClient> = Arc::new(OpenAiClient::new(&config)?);
    let app_state = Arc::new(AppState::new(persona_store, chat_client));

    let app = http_router(app_state).layer(tower_http::trace::TraceLayer::new_for_http());

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("HTTP server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
