//! Ports layer for the Lifecycle Engine.
//!
//! - Inbound (Driving) port: `LifecycleApi`
//!
//! Outbound dependencies are the Entity Store service and the shared-bus
//! `EventPublisher`.

pub mod inbound;

pub use inbound::*;
