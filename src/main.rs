//! FitTrack
//!
//! An MCP server for health, nutrition and training targets.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fittrack::ai::{AiError, OpenAiClient, PlanRequester};
use fittrack::config::Config;
use fittrack::mcp::FitTrackService;
use fittrack::{build_info, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stderr only; stdout carries the MCP stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fittrack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    let db_path = config.database_path.clone();
    eprintln!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = db::Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let (planner, ai_model) = match OpenAiClient::new(&config.ai) {
        Ok(client) => {
            let model = client.model().to_string();
            info!(%model, "AI recommendations enabled");
            (Some(PlanRequester::new(Arc::new(client))), Some(model))
        }
        Err(AiError::NotConfigured) => {
            warn!("OPENAI_API_KEY not set; AI recommendation tools are disabled");
            (None, None)
        }
        Err(e) => return Err(e.into()),
    };

    let service = FitTrackService::new(db_path, database, planner, ai_model);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
