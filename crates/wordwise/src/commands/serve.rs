//! Serve command: MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use wordwise_core::config::Config;
use wordwise_core::{Engine, EngineOptions};

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// History entries to keep for the server's lifetime (overrides config).
    #[arg(long, value_name = "N")]
    pub history_capacity: Option<usize>,

    /// Word counts to keep for the server's lifetime (overrides config).
    #[arg(long, value_name = "N")]
    pub statistics_capacity: Option<usize>,
}

/// Run the MCP server until the client disconnects.
///
/// All tools share one engine, so history and statistics accumulate across
/// calls for the life of the connection.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    args: ServeArgs,
    max_input: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let mut options = EngineOptions::from(&config);
    if let Some(capacity) = args.history_capacity {
        options.history_capacity = capacity;
    }
    if let Some(capacity) = args.statistics_capacity {
        options.statistics_capacity = capacity;
    }
    let engine = Arc::new(Engine::new(options).context("invalid server settings")?);

    info!(
        history_capacity = options.history_capacity,
        statistics_capacity = options.statistics_capacity,
        "starting MCP server on stdio"
    );

    let service = ProjectServer::new(engine, max_input)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server stopped")?;

    info!("MCP server shut down");
    Ok(())
}
