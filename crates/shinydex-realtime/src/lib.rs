//! Team-scoped realtime messaging.
//!
//! Abstraction over the broadcast channel that carries hunt events between
//! teammates, plus the router that turns inbound events into session-store
//! mutations. The channel contract is fire-and-forget: no acknowledgment, no
//! delivery guarantee, and cancellation is an explicit, immediate severing of
//! the subscription.

mod bus;
mod router;

// Re-export public API
pub use bus::{EventHandler, InMemoryBus, RealtimeBridge, Subscription};
pub use router::{ShinyNotification, TeamEventRouter};
