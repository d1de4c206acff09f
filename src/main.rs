//! Swagger MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and starts the server with the
//! configured transport. Logs go to stderr; stdout belongs to the STDIO
//! transport.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use swagger_mcp_server::core::config::{ConfigOrigin, LoggingConfig};
use swagger_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging comes first so config discovery can report problems.
    init_logging(&LoggingConfig::from_env().level);

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);
    log_swagger_config(&config);

    let server = McpServer::new(config.clone());

    info!("Server initialized");

    run(server, config).await?;

    info!("Server shutting down");

    Ok(())
}

async fn run(server: McpServer, config: Config) -> swagger_mcp_server::Result<()> {
    let transport = TransportService::new(config.transport);
    transport.run(server).await?;
    Ok(())
}

/// Report where the document will be loaded from, never the token itself.
fn log_swagger_config(config: &Config) {
    let swagger = &config.swagger;
    match &swagger.origin {
        ConfigOrigin::File(path) => info!("Using config file: {}", path.display()),
        ConfigOrigin::Project(project) => info!("Using project config for: {}", project),
        ConfigOrigin::Environment => info!("Using SWAGGER_URL from environment"),
        ConfigOrigin::None => {
            warn!("No Swagger URL configured; tool calls will fail until one is set")
        }
    }

    if let Some(url) = &swagger.url {
        info!(
            "Swagger URL: {} (token {}, timeout {}s)",
            url,
            if swagger.token.is_some() { "set" } else { "not set" },
            swagger.timeout_secs
        );
    }
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
