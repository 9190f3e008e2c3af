//! Chat round-trip sequencing
//!
//! A submission first records the user turn, then the transport call runs
//! (possibly on another task), then its outcome is applied. Outcomes are
//! applied in whatever order they arrive.

use super::conversation::Conversation;
use super::transport::{ChatReply, ChatTransport, TransportError};
use crate::domain::ResponseShape;
use tracing::{error, info};

/// Record the user turn and return the text to send, if any
pub fn submit(conversation: &mut Conversation, text: &str) -> Option<String> {
    conversation
        .append_user_turn(text)
        .map(|turn| turn.text().to_string())
}

/// Apply the transport outcome of one submission
pub fn complete(
    conversation: &mut Conversation,
    outcome: Result<ChatReply, TransportError>,
    shape: ResponseShape,
) {
    match outcome {
        Ok(reply) => {
            info!(rows = reply.records.len(), "Chat exchange completed");
            conversation.apply_reply(reply, shape);
        }
        Err(err) => {
            error!(%err, "Chat exchange failed");
            conversation.apply_failure(&err);
        }
    }
}

/// Run a whole exchange in place.
///
/// Returns `false` when the text was blank and nothing was sent.
pub async fn round_trip<T>(
    conversation: &mut Conversation,
    transport: &T,
    text: &str,
    shape: ResponseShape,
) -> bool
where
    T: ChatTransport + ?Sized,
{
    let Some(prompt) = submit(conversation, text) else {
        return false;
    };
    let outcome = transport.send(&prompt).await;
    complete(conversation, outcome, shape);
    true
}
