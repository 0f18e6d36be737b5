//! Web server for whisperbox.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::WebConfig;
use crate::service::MailboxService;
use crate::{Result, WhisperboxError};

use super::handlers::AppState;
use super::middleware::JwtState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// JWT state.
    jwt_state: Arc<JwtState>,
    /// Web configuration.
    web_config: WebConfig,
}

impl std::fmt::Debug for WebServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebServer")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &WebConfig, service: MailboxService) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|_| {
                WhisperboxError::Config(format!(
                    "invalid web server address: {}:{}",
                    config.host, config.port
                ))
            })?;

        let app_state = AppState::new(
            service,
            &config.jwt_secret,
            config.jwt_access_token_expiry_secs,
        );

        let jwt_state = Arc::new(JwtState::new(&config.jwt_secret));

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            jwt_state,
            web_config: config.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> std::io::Result<()> {
        let router = create_router(
            self.app_state,
            self.jwt_state,
            &self.web_config.cors_origins,
        )
        .merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let router = create_router(
            self.app_state,
            self.jwt_state,
            &self.web_config.cors_origins,
        )
        .merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
