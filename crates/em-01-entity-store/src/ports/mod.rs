//! Ports layer for the Entity Store subsystem.
//!
//! - Outbound (Driven) ports: persistence collaborator and time source

pub mod outbound;

pub use outbound::*;
