pub mod commands;
pub mod dispatcher;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::directory::Directory;
use crate::ledger::Ledger;
use crate::store::RowStore;
use crate::telegram::TelegramClient;
use crate::telegram::types::Update;

/// Shared handles for the command handlers.
#[derive(Clone)]
pub struct Services {
    pub directory: Directory,
    pub ledger: Ledger,
    pub config: Config,
}

/// A reply to deliver through the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub chat_id: i64,
    pub text: String,
}

/// Typed inbound event, decoupled from the transport's wire format.
#[derive(Debug, Clone)]
pub struct Event {
    pub sender: i64,
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub enum EventKind {
    Command { name: String, args: Vec<String> },
    Text { body: String },
    Location { lat: f64, lon: f64 },
}

impl Event {
    /// Converts a Telegram update into a typed event. Updates without a
    /// usable payload are dropped.
    pub fn from_update(update: Update) -> Option<Event> {
        let message = update.message?;
        let sender = message.chat.id;
        let timestamp = Utc
            .timestamp_opt(message.date, 0)
            .single()
            .unwrap_or_else(Utc::now);

        if let Some(location) = message.location {
            return Some(Event {
                sender,
                timestamp,
                kind: EventKind::Location {
                    lat: location.latitude,
                    lon: location.longitude,
                },
            });
        }

        let text = message.text?;
        let kind = match parse_command(&text) {
            Some((name, args)) => EventKind::Command { name, args },
            None => EventKind::Text { body: text },
        };
        Some(Event {
            sender,
            timestamp,
            kind,
        })
    }
}

/// `/name arg arg ...`; a `@botname` suffix on the command is stripped.
fn parse_command(text: &str) -> Option<(String, Vec<String>)> {
    let rest = text.strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next()?;
    let name = match name.split_once('@') {
        Some((bare, _)) => bare,
        None => name,
    };
    let args = parts.map(str::to_string).collect();
    Some((name.to_lowercase(), args))
}

/// Long-poll loop: updates in, replies out. Runs until the process stops.
pub async fn run(config: Config, store: Arc<dyn RowStore>) -> Result<()> {
    let client = Arc::new(TelegramClient::new(&config.bot_token));
    let services = Arc::new(Services {
        directory: Directory::new(store.clone()),
        ledger: Ledger::new(store),
        config,
    });

    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<Outbound>();
    let dispatcher = dispatcher::Dispatcher::new(services, outbox_tx);

    let sender = client.clone();
    tokio::spawn(async move {
        while let Some(outbound) = outbox_rx.recv().await {
            if let Err(e) = sender.send_message(outbound.chat_id, &outbound.text).await {
                tracing::error!("Failed to send message to {}: {}", outbound.chat_id, e);
            }
        }
    });

    tracing::info!("Listening for updates...");
    let mut offset = 0i64;
    loop {
        match client.get_updates(offset).await {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    if let Some(event) = Event::from_update(update) {
                        dispatcher.dispatch(event);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Polling error: {}", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_args() {
        let (name, args) = parse_command("/approve 12345 Budi Kandangan").unwrap();
        assert_eq!(name, "approve");
        assert_eq!(args, vec!["12345", "Budi", "Kandangan"]);
    }

    #[test]
    fn test_parse_command_strips_bot_mention() {
        let (name, args) = parse_command("/checkin@absensi_bot").unwrap();
        assert_eq!(name, "checkin");
        assert!(args.is_empty());
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(parse_command("Toko Abadi, Kandangan").is_none());
        assert!(parse_command("/").is_none());
    }
}
