use tracing::info;

use whisperbox::notify::build_notifier;
use whisperbox::{Config, Database, MailboxService, WebServer, WhisperboxError};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = whisperbox::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        whisperbox::logging::init_console_only(&config.logging.level);
    }

    info!("whisperbox - Anonymous Message Mailbox");

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("Fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> whisperbox::Result<()> {
    // Open the database; migrations are applied on open
    let db = Database::open_with(&config.database.path, config.database.max_connections).await?;

    // Build the verification notifier
    let notifier =
        build_notifier(&config.notifier).map_err(|e| WhisperboxError::Config(e.to_string()))?;
    info!("Verification notifier: {}", notifier.name());

    let service = MailboxService::new(db, notifier, config.verification.code_ttl_secs);

    // Start the web server
    let server = WebServer::new(&config.web, service)?;
    info!(
        "Web API configured on {}:{}",
        config.web.host, config.web.port
    );

    server.run().await.map_err(WhisperboxError::Io)
}
