//! # Core Domain Entities
//!
//! Defines the marketplace entities shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Accounts**: `User`, `UserRole`
//! - **Listings**: `Material`, `Location`, `RecyclableItem`, `ItemDraft`
//! - **Lifecycle**: `PostedItem`, `ItemStatus`
//! - **Gamification**: `UserStats` (collector), `PosterStats`
//!
//! Field names serialize in camelCase so the persisted blob keeps the
//! `{users, recyclableItems, postedItems, userStats, posterStats}` shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ItemValidationError, TransitionError};
use crate::points::{calculate_points, total_weight};

/// Unique identifier of a user account.
pub type UserId = String;

/// Unique identifier of a listed item.
pub type ItemId = String;

/// Wall-clock timestamp, serialized as an RFC 3339 string.
pub type Timestamp = DateTime<Utc>;

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// Role a user plays in the marketplace.
///
/// Assigned exactly once after first authentication (`Unset` → one of the two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Browses, accepts and picks up bags.
    Collector,
    /// Lists recyclable bags.
    Poster,
    /// Registered but not yet onboarded.
    #[default]
    Unset,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collector => write!(f, "collector"),
            Self::Poster => write!(f, "poster"),
            Self::Unset => write!(f, "unset"),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default)]
    pub display_photo: Option<String>,
    pub created_at: Timestamp,
}

// =============================================================================
// CLUSTER B: LISTINGS
// =============================================================================

/// Material category of a bag component. Each has a fixed per-kilogram rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Electronic,
    Metal,
    Plastic,
    Glass,
    Paper,
}

impl MaterialType {
    /// All material types, highest rate first.
    pub const ALL: [MaterialType; 5] = [
        MaterialType::Electronic,
        MaterialType::Metal,
        MaterialType::Plastic,
        MaterialType::Glass,
        MaterialType::Paper,
    ];

    /// Points awarded per kilogram of this material.
    pub fn rate_per_kg(&self) -> f64 {
        match self {
            Self::Electronic => 100.0,
            Self::Metal => 80.0,
            Self::Plastic => 60.0,
            Self::Glass => 40.0,
            Self::Paper => 30.0,
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Electronic => "electronic",
            Self::Metal => "metal",
            Self::Plastic => "plastic",
            Self::Glass => "glass",
            Self::Paper => "paper",
        };
        f.write_str(name)
    }
}

/// One material line of a bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub quantity: u32,
    /// Kilograms per unit.
    pub weight_per_unit: f64,
}

impl Material {
    pub fn new(material_type: MaterialType, quantity: u32, weight_per_unit: f64) -> Self {
        Self {
            material_type,
            quantity,
            weight_per_unit,
        }
    }

    /// Unrounded weight of this line in kilograms.
    pub fn weight(&self) -> f64 {
        f64::from(self.quantity) * self.weight_per_unit
    }
}

/// Pickup location as shown to collectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    /// Display distance in kilometres.
    pub distance: f64,
}

/// The listing payload of a bag.
///
/// `total_weight` and `points` are derived from `materials` when the listing is
/// created and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclableItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub points: u64,
    pub materials: Vec<Material>,
    pub total_weight: f64,
    pub location: Location,
    pub posted_at: Timestamp,
}

impl RecyclableItem {
    /// Builds a listing from a validated draft, deriving weight and points.
    pub fn from_draft(id: ItemId, draft: ItemDraft, posted_at: Timestamp) -> Self {
        let total_weight = total_weight(&draft.materials);
        let points = calculate_points(&draft.materials);
        Self {
            id,
            title: draft.title,
            description: draft.description,
            image: draft.image,
            points,
            materials: draft.materials,
            total_weight,
            location: draft.location,
            posted_at,
        }
    }

    /// True if `total_weight` and `points` agree with `materials`.
    pub fn is_consistent(&self) -> bool {
        (self.total_weight - total_weight(&self.materials)).abs() < 1e-9
            && self.points == calculate_points(&self.materials)
    }
}

/// Heaviest single unit a listing accepts, in kilograms.
pub const MAX_UNIT_WEIGHT_KG: f64 = 1_000.0;

/// Heaviest bag a listing accepts, in kilograms. Caps a bag at 1,000,000 points.
pub const MAX_BAG_WEIGHT_KG: f64 = 10_000.0;

/// Caller-supplied data for a new listing (`itemData`).
///
/// Weight and points are never taken from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub materials: Vec<Material>,
    pub location: Location,
}

impl ItemDraft {
    /// Checks the draft can produce a meaningful listing.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.title.trim().is_empty() {
            return Err(ItemValidationError::BlankTitle);
        }
        if self.materials.is_empty() {
            return Err(ItemValidationError::NoMaterials);
        }
        for (index, material) in self.materials.iter().enumerate() {
            if material.quantity == 0 {
                return Err(ItemValidationError::ZeroQuantity { index });
            }
            if !material.weight_per_unit.is_finite() || material.weight_per_unit <= 0.0 {
                return Err(ItemValidationError::InvalidWeight {
                    index,
                    weight: material.weight_per_unit,
                });
            }
            if material.weight_per_unit > MAX_UNIT_WEIGHT_KG {
                return Err(ItemValidationError::UnitTooHeavy {
                    index,
                    weight: material.weight_per_unit,
                });
            }
        }

        let total: f64 = self.materials.iter().map(Material::weight).sum();
        if total > MAX_BAG_WEIGHT_KG {
            return Err(ItemValidationError::BagTooHeavy { total });
        }
        Ok(())
    }
}

// =============================================================================
// CLUSTER C: LIFECYCLE
// =============================================================================

/// Lifecycle state of a posted item.
///
/// ```text
/// [ACTIVE] ──accept──→ [ACCEPTED] ──complete──→ [COMPLETED]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Listed and offerable to collectors.
    #[default]
    Active,
    /// Claimed by exactly one collector.
    Accepted,
    /// Picked up; points credited to the poster.
    Completed,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Accepted => write!(f, "accepted"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A listing plus its lifecycle state.
///
/// INVARIANT: `accepted_by`/`accepted_at` are set iff status is Accepted or
/// Completed; `completed_at` is set iff status is Completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedItem {
    #[serde(flatten)]
    pub listing: RecyclableItem,
    pub status: ItemStatus,
    pub posted_by_user_id: UserId,
    #[serde(default)]
    pub accepted_by: Option<UserId>,
    #[serde(default)]
    pub accepted_at: Option<Timestamp>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    /// Poster's rating of the collector, set once after completion.
    #[serde(default)]
    pub collector_rating: Option<u8>,
}

impl PostedItem {
    /// Creates a new active posting owned by `poster`.
    pub fn new(listing: RecyclableItem, poster: UserId) -> Self {
        Self {
            listing,
            status: ItemStatus::Active,
            posted_by_user_id: poster,
            accepted_by: None,
            accepted_at: None,
            completed_at: None,
            collector_rating: None,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.listing.id
    }

    pub fn points(&self) -> u64 {
        self.listing.points
    }

    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    /// Moves the item to Accepted for `collector`.
    ///
    /// # Errors
    /// Returns error unless the item is Active.
    pub fn accept(&mut self, collector: &str, now: Timestamp) -> Result<(), TransitionError> {
        self.expect_status(ItemStatus::Active)?;
        self.status = ItemStatus::Accepted;
        self.accepted_by = Some(collector.to_string());
        self.accepted_at = Some(now);
        Ok(())
    }

    /// Moves the item to Completed.
    ///
    /// # Errors
    /// Returns error unless the item is Accepted.
    pub fn complete(&mut self, now: Timestamp) -> Result<(), TransitionError> {
        self.expect_status(ItemStatus::Accepted)?;
        self.status = ItemStatus::Completed;
        self.completed_at = Some(now);
        Ok(())
    }

    fn expect_status(&self, expected: ItemStatus) -> Result<(), TransitionError> {
        if self.status != expected {
            return Err(TransitionError {
                expected,
                actual: self.status,
            });
        }
        Ok(())
    }

    /// True if the optional lifecycle fields agree with `status`.
    pub fn is_consistent(&self) -> bool {
        let claimed = matches!(self.status, ItemStatus::Accepted | ItemStatus::Completed);
        let completed = self.status == ItemStatus::Completed;
        self.accepted_by.is_some() == claimed
            && self.accepted_at.is_some() == claimed
            && self.completed_at.is_some() == completed
            && (completed || self.collector_rating.is_none())
    }
}

// =============================================================================
// CLUSTER D: GAMIFICATION
// =============================================================================

/// Collector statistics. Mutated only by pickup completion and reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_pickups: u32,
    pub rating: f64,
    pub completed_today: u32,
    /// Number of reviews folded into `rating`.
    #[serde(default = "default_rating_count")]
    pub rating_count: u32,
}

fn default_rating_count() -> u32 {
    1
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_pickups: 0,
            rating: 5.0,
            completed_today: 0,
            rating_count: 1,
        }
    }
}

impl UserStats {
    /// Folds one review into the running mean.
    pub fn record_review(&mut self, rating: u8) {
        let count = f64::from(self.rating_count);
        let mean = (self.rating * count + f64::from(rating)) / (count + 1.0);
        self.rating = (mean * 10.0).round() / 10.0;
        self.rating_count = self.rating_count.saturating_add(1);
    }
}

/// Poster statistics.
///
/// `total_posts`/`active_items` change at creation; `total_points`,
/// `points_this_week`, `total_recycled` and `active_items` change at completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterStats {
    pub total_posts: u32,
    pub total_recycled: u32,
    pub rating: f64,
    pub active_items: u32,
    pub total_points: u64,
    pub points_this_week: u64,
}

impl Default for PosterStats {
    fn default() -> Self {
        Self {
            total_posts: 0,
            total_recycled: 0,
            rating: 5.0,
            active_items: 0,
            total_points: 0,
            points_this_week: 0,
        }
    }
}
