//! Pickup modal payloads.
//!
//! The poster-side pickup dialog has two modes, each with its own data.

use serde::{Deserialize, Serialize};

use crate::entities::PostedItem;

/// What the pickup dialog shows for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PickupModal {
    /// Item is accepted; the poster shows a QR code for the collector to scan.
    #[serde(rename_all = "camelCase")]
    GenerateQr { item: PostedItem, code: String },

    /// Item is completed; the poster may rate the collector.
    #[serde(rename_all = "camelCase")]
    ReviewCollector {
        item: PostedItem,
        rating: Option<u8>,
    },
}

impl PickupModal {
    pub fn item(&self) -> &PostedItem {
        match self {
            Self::GenerateQr { item, .. } | Self::ReviewCollector { item, .. } => item,
        }
    }
}
