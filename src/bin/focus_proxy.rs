//! Stateless HTTP proxy between the task board and the language model.
//!
//! Usage:
//!
//! ```text
//! focus_proxy [--listen 127.0.0.1:3001] [--model NAME] [--api-base URL]
//! ```
//!
//! Every flag falls back to its environment variable, then to the defaults
//! documented in `focusboard::config`. Logging follows `RUST_LOG`, defaulting
//! to `info`.

use clap::Parser;
use focusboard::assistant::adapters::AnthropicClient;
use focusboard::assistant::services::AssistantService;
use focusboard::config::{self, ProxyConfig};
use mockable::DefaultClock;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "focus_proxy", about = "Assistant proxy for the focus board")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = config::LISTEN_VAR)]
    listen: Option<SocketAddr>,
    /// Model name.
    #[arg(long, env = config::MODEL_VAR)]
    model: Option<String>,
    /// API base URL.
    #[arg(long, env = config::API_BASE_VAR)]
    api_base: Option<String>,
    /// Answer token limit.
    #[arg(long, env = config::MAX_TOKENS_VAR)]
    max_tokens: Option<u32>,
}

impl Args {
    fn apply(self, mut config: ProxyConfig) -> ProxyConfig {
        if let Some(listen) = self.listen {
            config.listen = listen;
        }
        if let Some(model) = self.model {
            config.assistant.model = model;
        }
        if let Some(api_base) = self.api_base {
            config.assistant.api_base = api_base.trim_end_matches('/').to_owned();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.assistant.max_tokens = max_tokens;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.apply(ProxyConfig::from_env()?);
    if !config.assistant.has_credentials() {
        warn!(
            variable = config::API_KEY_VAR,
            "no API key configured; assistant requests will fail"
        );
    }

    let offset = config.assistant.utc_offset;
    let model = Arc::new(AnthropicClient::new(config.assistant));
    let service = Arc::new(AssistantService::new(model, Arc::new(DefaultClock), offset));
    let app = focusboard::proxy::router(service);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!(address = %config.listen, "focus proxy listening");
    axum::serve(listener, app).await?;
    Ok(())
}
