use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::{self, UnboundedSender};

use crate::bot::session::Session;
use crate::bot::{Event, Outbound, Services};

/// Routes inbound events to a worker task per chat id. Events for one user
/// are handled strictly in arrival order; different users run in parallel,
/// so one user's slow store call never stalls another's.
pub struct Dispatcher {
    services: Arc<Services>,
    outbox: UnboundedSender<Outbound>,
    workers: Mutex<HashMap<i64, UnboundedSender<Event>>>,
}

impl Dispatcher {
    pub fn new(services: Arc<Services>, outbox: UnboundedSender<Outbound>) -> Self {
        Dispatcher {
            services,
            outbox,
            workers: Mutex::new(HashMap::new()),
        }
    }

    pub fn dispatch(&self, event: Event) {
        let mut workers = self.workers.lock().unwrap();
        let worker = workers
            .entry(event.sender)
            .or_insert_with(|| self.spawn_worker(event.sender));
        if worker.send(event).is_err() {
            tracing::error!("Session worker is gone; dropping event");
        }
    }

    fn spawn_worker(&self, chat_id: i64) -> UnboundedSender<Event> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
        let services = self.services.clone();
        let outbox = self.outbox.clone();

        tokio::spawn(async move {
            let mut session = Session::new();
            while let Some(event) = rx.recv().await {
                for reply in session.handle(&services, event).await {
                    if outbox.send(reply).is_err() {
                        tracing::debug!("Outbox closed; stopping worker for chat {}", chat_id);
                        return;
                    }
                }
            }
        });

        tx
    }
}
