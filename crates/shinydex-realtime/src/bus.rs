//! Broadcast channel abstraction.
//!
//! `RealtimeBridge` is the seam between the engine and whatever transport
//! actually moves events between trainers. `InMemoryBus` is the process-local
//! implementation used for composition and tests; a networked backend plugs in
//! behind the same trait.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shinydex_core::team::{SessionAnnouncement, TeamEvent};

/// Synchronous callback invoked for every event delivered on a channel.
pub type EventHandler = Arc<dyn Fn(&TeamEvent) + Send + Sync>;

/// A team-scoped publish/subscribe channel.
///
/// Publishing is fire-and-forget. Delivery includes the sender's own events
/// (the transport echoes broadcasts back); suppressing self-echo is the
/// subscriber's responsibility so that it stays explicit and testable.
pub trait RealtimeBridge: Send + Sync {
    /// Subscribes a handler to a team's channel. The returned handle severs
    /// delivery when unsubscribed or dropped.
    fn subscribe(&self, team_id: &str, handler: EventHandler) -> Subscription;

    /// Publishes an event to every current subscriber of a team's channel.
    fn publish(&self, team_id: &str, event: &TeamEvent);

    /// Announces a freshly started shared hunt.
    fn publish_session_started(&self, team_id: &str, announcement: SessionAnnouncement) {
        self.publish(team_id, &TeamEvent::SessionStarted(announcement));
    }

    /// Broadcasts the sender's updated attempt count.
    fn publish_increment(&self, team_id: &str, user_id: &str, count: u32) {
        self.publish(team_id, &TeamEvent::CountIncremented {
            user_id: user_id.to_string(),
            count,
        });
    }

    /// Broadcasts a target discovery.
    fn publish_found(&self, team_id: &str, user_id: &str, trainer_name: &str, pokemon_name: &str) {
        self.publish(team_id, &TeamEvent::TargetFound {
            user_id: user_id.to_string(),
            trainer_name: trainer_name.to_string(),
            pokemon_name: pokemon_name.to_string(),
        });
    }
}

/// Handle to an active channel subscription.
///
/// Unsubscribing is immediate: no event published afterwards reaches the
/// handler. Dropping the handle unsubscribes as well.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wraps the bridge-specific cancellation action.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Severs the subscription.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    channels: HashMap<String, Vec<(u64, EventHandler)>>,
}

/// Process-local bridge implementation.
///
/// Handlers run synchronously on the publishing thread, outside the internal
/// lock, so a handler may itself publish or subscribe without deadlocking.
#[derive(Clone, Default)]
pub struct InMemoryBus {
    state: Arc<Mutex<BusState>>,
}

impl InMemoryBus {
    /// Creates a bus with no channels.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RealtimeBridge for InMemoryBus {
    fn subscribe(&self, team_id: &str, handler: EventHandler) -> Subscription {
        let id = {
            let Ok(mut state) = self.state.lock() else {
                return Subscription::new(|| {});
            };
            state.next_id += 1;
            let id = state.next_id;
            state
                .channels
                .entry(team_id.to_string())
                .or_default()
                .push((id, handler));
            id
        };

        let state = Arc::clone(&self.state);
        let team_id = team_id.to_string();
        Subscription::new(move || {
            if let Ok(mut state) = state.lock()
                && let Some(handlers) = state.channels.get_mut(&team_id)
            {
                handlers.retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    fn publish(&self, team_id: &str, event: &TeamEvent) {
        let handlers: Vec<EventHandler> = {
            let Ok(state) = self.state.lock() else {
                return;
            };
            state
                .channels
                .get(team_id)
                .map(|subscribers| subscribers.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        tracing::trace!(team_id, subscribers = handlers.len(), "delivering event");
        for handler in handlers {
            handler(event);
        }
    }
}
