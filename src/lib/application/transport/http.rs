//! reqwest-backed transport

use super::{ChatReply, ChatTransport, TransportError};
use crate::config::AppConfig;
use crate::domain::{ClientRecord, ResponseShape, ResultSet};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const CHAT_PATH: &str = "chat";
const PING_PATH: &str = "ping";
const USER_LIST_PATH: &str = "user-list";
const HEALTHY_STATUS: &str = "SUCCESS";

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    #[serde(rename = "textInputForGPT")]
    text_input_for_gpt: &'a str,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: String,
}

/// HTTP transport talking JSON to the advisor backend
#[derive(Clone)]
pub struct HttpChatTransport {
    base_url: String,
    shape: ResponseShape,
    http: Client,
}

impl HttpChatTransport {
    pub fn new(base_url: impl Into<String>, shape: ResponseShape) -> Self {
        Self {
            base_url: base_url.into(),
            shape,
            http: Client::new(),
        }
    }

    /// Build a transport with a per-request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        shape: ResponseShape,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| TransportError::Build { source })?;
        Ok(Self {
            base_url: base_url.into(),
            shape,
            http,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, TransportError> {
        match config.request_timeout {
            Some(timeout) => Self::with_timeout(&config.base_url, config.response_shape, timeout),
            None => Ok(Self::new(&config.base_url, config.response_shape)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn shape(&self) -> ResponseShape {
        self.shape
    }

    /// Build URL from base and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    async fn get_json<Res>(&self, url: &str) -> Result<Res, TransportError>
    where
        Res: DeserializeOwned,
    {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::network(url, e))?
            .error_for_status()
            .map_err(|e| TransportError::network(url, e))?
            .json()
            .await
            .map_err(|e| TransportError::network(url, e))
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, text: &str) -> Result<ChatReply, TransportError> {
        let url = self.build_url(CHAT_PATH);
        debug!(url = %url, shape = self.shape.as_str(), "Posting chat message");

        let envelope: DataEnvelope = self
            .http
            .post(&url)
            .json(&ChatPayload {
                text_input_for_gpt: text,
            })
            .send()
            .await
            .map_err(|e| TransportError::network(&url, e))?
            .error_for_status()
            .map_err(|e| TransportError::network(&url, e))?
            .json()
            .await
            .map_err(|e| TransportError::network(&url, e))?;

        let records = decode_records(envelope.data, self.shape).map_err(|reason| {
            warn!(url = %url, reason = %reason, "Chat reply did not match the expected shape");
            TransportError::invalid_response(&url, reason)
        })?;
        debug!(url = %url, rows = records.len(), "Chat reply decoded");

        Ok(ChatReply {
            records,
            message: envelope.msg.filter(|m| !m.trim().is_empty()),
        })
    }

    async fn ping(&self) -> Result<(), TransportError> {
        let url = self.build_url(PING_PATH);
        let reply: StatusEnvelope = self.get_json(&url).await?;
        if reply.status == HEALTHY_STATUS {
            Ok(())
        } else {
            Err(TransportError::Unhealthy {
                endpoint: url,
                status: reply.status,
            })
        }
    }

    async fn list_clients(&self) -> Result<ResultSet, TransportError> {
        let url = self.build_url(USER_LIST_PATH);
        let envelope: DataEnvelope = self.get_json(&url).await?;
        decode_records(envelope.data, ResponseShape::List)
            .map_err(|reason| TransportError::invalid_response(&url, reason))
    }
}

/// Turn the `data` field into a result set according to `shape`
pub(crate) fn decode_records(data: Value, shape: ResponseShape) -> Result<ResultSet, String> {
    match (shape, data) {
        (_, Value::Null) => Ok(ResultSet::empty()),
        // The backend answers "nothing found" with an empty list in either shape
        (ResponseShape::Single, Value::Array(items)) if items.is_empty() => {
            Ok(ResultSet::empty())
        }
        (ResponseShape::List, Value::Array(items)) => {
            let records: Vec<ClientRecord> = serde_json::from_value(Value::Array(items))
                .map_err(|e| format!("malformed record list: {e}"))?;
            Ok(ResultSet::new(records))
        }
        (ResponseShape::Single, Value::Object(fields)) => {
            let record: ClientRecord = serde_json::from_value(Value::Object(fields))
                .map_err(|e| format!("malformed record: {e}"))?;
            Ok(ResultSet::new(vec![record]))
        }
        (ResponseShape::List, other) => Err(format!(
            "expected a list of records, got {}",
            json_kind(&other)
        )),
        (ResponseShape::Single, other) => Err(format!(
            "expected a single record object, got {}",
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
