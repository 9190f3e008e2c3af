//! Chat transport - the outbound exchange with the advisor backend

mod error;
mod http;

pub use error::TransportError;
pub use http::HttpChatTransport;

use crate::domain::ResultSet;
use async_trait::async_trait;

/// Outcome of a successful `/chat` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub records: ResultSet,
    /// Free-text commentary the backend may attach alongside the data
    pub message: Option<String>,
}

/// Trait for backend transports
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Issue exactly one chat request carrying `text`
    async fn send(&self, text: &str) -> Result<ChatReply, TransportError>;

    /// Check that the backend is reachable and healthy
    async fn ping(&self) -> Result<(), TransportError>;

    /// Fetch every client record the backend knows about
    async fn list_clients(&self) -> Result<ResultSet, TransportError>;
}
