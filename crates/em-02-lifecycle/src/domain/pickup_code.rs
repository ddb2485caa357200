//! QR pickup codes.
//!
//! The poster shows `ecomatch://pickup/<itemId>` as a QR code; the collector
//! scans it to complete the pickup.

use super::errors::LifecycleError;

pub const PICKUP_CODE_PREFIX: &str = "ecomatch://pickup/";

/// Code the poster displays for an accepted item.
pub fn pickup_code(item_id: &str) -> String {
    format!("{}{}", PICKUP_CODE_PREFIX, item_id)
}

/// Extracts the item id from a scanned code.
///
/// # Errors
/// - `InvalidPickupCode` if the prefix is wrong or the id is empty
pub fn parse_pickup_code(code: &str) -> Result<&str, LifecycleError> {
    code.trim()
        .strip_prefix(PICKUP_CODE_PREFIX)
        .filter(|id| !id.is_empty() && !id.contains('/'))
        .ok_or_else(|| LifecycleError::InvalidPickupCode(code.to_string()))
}
