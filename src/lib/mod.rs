pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod tui;

pub use application::{conversation, exchange, stdio, transport};
pub use cli::{Cli, RunMode};
pub use config::{AppConfig, ConfigError};
pub use domain::types;

use application::conversation::Conversation;
use application::transport::{ChatTransport, HttpChatTransport};
use serde_json::{Value, json};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    config::loader::ensure_env_loaded();
    init_tracing(cli.mode == RunMode::Tui);
    info!("Starting advisor-chat");
    debug!(mode = ?cli.mode, config = ?cli.config, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let config = AppConfig::load(config_path)?.with_overrides(cli.base_url.clone(), cli.shape)?;
    info!(
        base_url = %config.base_url,
        shape = config.response_shape.as_str(),
        "Configuration loaded"
    );

    let transport = Arc::new(HttpChatTransport::from_config(&config)?);

    match cli.mode {
        RunMode::Tui => {
            info!("Launching terminal chat interface");
            tui::run_chat(transport, &config).await?;
        }
        RunMode::Stdio => {
            info!("Launching STDIO chat interface");
            stdio::run(transport.as_ref(), &config).await?;
        }
        RunMode::Once => {
            let prompt = cli.prompt.join(" ");
            let report = run_once(transport.as_ref(), &config, &prompt).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    info!("Client execution finished");
    Ok(())
}

/// Send a single message and describe the resulting session as JSON
pub async fn run_once<T>(
    transport: &T,
    config: &AppConfig,
    prompt: &str,
) -> Result<Value, Box<dyn Error>>
where
    T: ChatTransport + ?Sized,
{
    let mut conversation = Conversation::new(&config.assistant_label, &config.greeting);
    if !exchange::round_trip(&mut conversation, transport, prompt, config.response_shape).await {
        warn!("Prompt not provided via arguments");
        return Err("a non-empty prompt is required in once mode".into());
    }
    Ok(session_report(&conversation))
}

/// JSON view of a conversation: its turns and current records
pub fn session_report(conversation: &Conversation) -> Value {
    let turns: Vec<Value> = conversation
        .turns()
        .iter()
        .map(|turn| json!({ "speaker": turn.speaker(), "text": turn.text() }))
        .collect();
    json!({
        "turns": turns,
        "records": conversation.result_set(),
    })
}

fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
