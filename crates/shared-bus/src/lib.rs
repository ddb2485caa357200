//! # Shared Bus - Event Notifier for Marketplace Views
//!
//! Decouples the lifecycle engine from the poster and collector views.
//!
//! ## Pattern
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────────┐
//! │ Lifecycle Engine │                    │ Poster/Collector │
//! │                  │    publish()       │      views       │
//! │                  │ ──────┐            │                  │
//! └──────────────────┘       │            └──────────────────┘
//!                            ▼                    ↑
//!                     ┌──────────────┐            │
//!                     │   Notifier   │            │
//!                     │              │ ───────────┘
//!                     └──────────────┘  subscribe(topic, handler)
//! ```
//!
//! ## Semantics
//!
//! - **Explicit instance:** the notifier is constructed by the composition root
//!   and injected; there is no process-global bus.
//! - **Synchronous:** `publish` runs every handler for the topic on the calling
//!   thread, in registration order, before returning.
//! - **No masking:** every handler runs; failures are logged and returned.
//! - **No replay:** late subscribers see only later events.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventTopic, MarketplaceEvent};
pub use publisher::{EventNotifier, EventPublisher, HandlerFailure, NoOpPublisher, PublishError};
pub use subscriber::{handler, EventSubscriber, Handler, HandlerError, SubscriptionId};
