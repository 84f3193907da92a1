pub mod attendance;
pub mod general;
pub mod registration;

use crate::bot::Outbound;
use crate::error::BotError;
use crate::utils::format;

/// Turns a failure into its user-facing reply. Store faults get logged here;
/// domain outcomes are ordinary replies, not errors.
pub(crate) fn fail_reply(chat_id: i64, error: &BotError) -> Outbound {
    if let BotError::Store(store_error) = error {
        tracing::error!("Store operation failed: {}", store_error);
    }
    Outbound {
        chat_id,
        text: format::error_reply(error),
    }
}
