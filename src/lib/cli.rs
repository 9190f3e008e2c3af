use crate::domain::ResponseShape;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "advisor-chat",
    version,
    about = "Chat client for the Client Service Advisor backend"
)]
pub struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,
    /// Configuration file path
    #[arg(long)]
    pub config: Option<String>,
    /// How the backend packs reply data
    #[arg(long, value_enum)]
    pub shape: Option<ResponseShape>,
    #[arg(long, value_enum, default_value_t = RunMode::Tui)]
    pub mode: RunMode,
    /// Message to send in `once` mode
    #[arg()]
    pub prompt: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Full-screen terminal chat
    Tui,
    /// Line-based chat over stdin/stdout
    Stdio,
    /// Send one message and print the outcome as JSON
    Once,
}
