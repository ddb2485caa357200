//! # Domain Layer - Lifecycle Engine
//!
//! - `transitions`: create/accept/complete/review with stat side effects
//! - `rejections`: per-collector "not interested" filter
//! - `pickup_code`: QR pickup code format
//! - `errors`: LifecycleError

pub mod errors;
pub mod pickup_code;
pub mod rejections;
pub mod transitions;

pub use errors::*;
pub use pickup_code::*;
pub use rejections::*;
pub use transitions::*;
