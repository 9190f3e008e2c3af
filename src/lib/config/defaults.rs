use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ASSISTANT_LABEL: &str = "Client Service Advisor Bot";
pub const DEFAULT_GREETING: &str = "Hello, how may I help you?";
pub const DEFAULT_CONFIG_PATH: &str = "config/client.toml";
pub const DEFAULT_ENV_PATH: &str = "config/.env";
pub const DEFAULT_SHOW_COMPANY: bool = true;
pub const DEFAULT_REQUEST_TIMEOUT: Option<Duration> = None;
