//! # EcoMatch Test Suite
//!
//! Unified test crate for behaviour that spans subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # Shared harness: container on in-memory storage, mock clock
//!     ├── scenarios.rs    # Lifecycle scenarios end to end
//!     ├── concurrency.rs  # Racing acceptances
//!     ├── properties.rs   # Randomized weight/points checks
//!     └── persistence.rs  # Blob round-trip, file storage, reset
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p em-tests
//! cargo test -p em-tests integration::concurrency::
//! ```

#![allow(dead_code)]

pub mod integration;
