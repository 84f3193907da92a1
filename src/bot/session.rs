use crate::bot::commands;
use crate::bot::{Event, EventKind, Outbound, Services};
use crate::utils::{format, parse};

/// Conversation position for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingStoreInfo,
    AwaitingLocation { store_name: String, area: String },
    AwaitingCheckoutForm,
}

/// Per-user conversation state machine. Cycles through the check-in and
/// check-out flows; every completed or failed flow lands back in `Idle`,
/// except the location step, which survives non-matching input so the user
/// can retry.
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Session {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub async fn handle(&mut self, services: &Services, event: Event) -> Vec<Outbound> {
        let sender = event.sender;
        let timestamp = event.timestamp;
        let state = std::mem::replace(&mut self.state, SessionState::Idle);

        let (replies, next) = match (state, event.kind) {
            (state, EventKind::Command { name, args }) => match (name.as_str(), state) {
                // Stateless commands work from any state and leave it alone.
                ("start", state) => (vec![commands::general::start(sender)], state),
                ("help", state) => (vec![commands::general::help(sender)], state),
                ("reg", state) => (commands::registration::request(services, sender).await, state),
                ("approve", state) => (
                    commands::registration::approve(services, sender, &args).await,
                    state,
                ),
                ("status", state) => (commands::attendance::status(services, sender).await, state),
                ("checkin", SessionState::Idle) => {
                    commands::attendance::begin_checkin(services, sender).await
                }
                ("checkout", SessionState::Idle) => {
                    commands::attendance::begin_checkout(services, sender).await
                }
                // A flow command mid-flow does not reset the session.
                (_, state) => (vec![commands::general::unrecognized(sender)], state),
            },

            (SessionState::AwaitingStoreInfo, EventKind::Text { body }) => {
                let (store_name, area) = parse::split_store_info(&body);
                (
                    vec![Outbound {
                        chat_id: sender,
                        text: "Silakan bagikan lokasi Anda (gunakan tombol kirim lokasi)."
                            .to_string(),
                    }],
                    SessionState::AwaitingLocation { store_name, area },
                )
            }

            (SessionState::AwaitingStoreInfo, EventKind::Location { .. }) => (
                vec![Outbound {
                    chat_id: sender,
                    text: format::format_error_message(
                        "Kirim nama toko dan daerah terlebih dahulu, lalu bagikan lokasi.",
                    ),
                }],
                SessionState::Idle,
            ),

            (SessionState::AwaitingLocation { store_name, area }, EventKind::Location { lat, lon }) => (
                commands::attendance::complete_checkin(
                    services, sender, &store_name, &area, lat, lon, timestamp,
                )
                .await,
                SessionState::Idle,
            ),

            (state @ SessionState::AwaitingLocation { .. }, EventKind::Text { .. }) => (
                vec![Outbound {
                    chat_id: sender,
                    text: "Mohon bagikan lokasi Anda untuk menyelesaikan check-in.".to_string(),
                }],
                state,
            ),

            (SessionState::AwaitingCheckoutForm, EventKind::Text { body }) => (
                commands::attendance::complete_checkout(services, sender, &body, timestamp).await,
                SessionState::Idle,
            ),

            (state, _) => (vec![commands::general::unrecognized(sender)], state),
        };

        self.state = next;
        replies
    }
}
