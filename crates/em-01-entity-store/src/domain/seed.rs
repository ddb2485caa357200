//! Seed data restored on first start and by a full reset.
//!
//! Two posters, two collectors and three active bags. Every timestamp is
//! fixed so a reset always produces the same state.

use chrono::{TimeZone, Utc};
use shared_types::{
    ItemDraft, Location, Material, MaterialType, PostedItem, PosterStats, RecyclableItem,
    Timestamp, User, UserRole, UserStats,
};

use super::snapshot::PersistedState;

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

pub const POSTER_MARIA: &str = "poster-1";
pub const POSTER_JAMES: &str = "poster-2";
pub const COLLECTOR_ALEX: &str = "collector-1";
pub const COLLECTOR_SAM: &str = "collector-2";

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn user(id: &str, username: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        password: SEED_PASSWORD.to_string(),
        role,
        display_photo: None,
        created_at: at(2024, 1, 1, 0, 0),
    }
}

fn location(address: &str, distance: f64) -> Location {
    Location {
        address: address.to_string(),
        distance,
    }
}

fn posting(id: &str, poster: &str, draft: ItemDraft, posted_at: Timestamp) -> PostedItem {
    PostedItem::new(
        RecyclableItem::from_draft(id.to_string(), draft, posted_at),
        poster.to_string(),
    )
}

/// The documented seed state.
pub fn seed_state() -> PersistedState {
    let users = vec![
        user(POSTER_MARIA, "maria", UserRole::Poster),
        user(POSTER_JAMES, "james", UserRole::Poster),
        user(COLLECTOR_ALEX, "alex", UserRole::Collector),
        user(COLLECTOR_SAM, "sam", UserRole::Collector),
    ];

    let posted_items = vec![
        posting(
            "item-1",
            POSTER_MARIA,
            ItemDraft {
                title: "Plastic bottles".into(),
                description: "A dozen rinsed PET bottles".into(),
                image: None,
                materials: vec![Material::new(MaterialType::Plastic, 12, 0.175)],
                location: location("12 Green St", 1.2),
            },
            at(2024, 1, 10, 9, 0),
        ),
        posting(
            "item-2",
            POSTER_JAMES,
            ItemDraft {
                title: "Old laptop and cables".into(),
                description: "Broken laptop plus a bundle of copper cables".into(),
                image: None,
                materials: vec![
                    Material::new(MaterialType::Electronic, 1, 2.5),
                    Material::new(MaterialType::Metal, 3, 0.2),
                ],
                location: location("48 Harbor Rd", 3.4),
            },
            at(2024, 1, 11, 14, 30),
        ),
        posting(
            "item-3",
            POSTER_MARIA,
            ItemDraft {
                title: "Glass jars and newspapers".into(),
                description: "Clean jars and a stack of newspapers".into(),
                image: None,
                materials: vec![
                    Material::new(MaterialType::Glass, 6, 0.3),
                    Material::new(MaterialType::Paper, 10, 0.1),
                ],
                location: location("12 Green St", 1.2),
            },
            at(2024, 1, 12, 8, 15),
        ),
    ];

    let recyclable_items = posted_items.iter().map(|p| p.listing.clone()).collect();

    let poster_stats = [
        (
            POSTER_MARIA.to_string(),
            PosterStats {
                total_posts: 2,
                total_recycled: 0,
                rating: 4.8,
                active_items: 2,
                total_points: 0,
                points_this_week: 0,
            },
        ),
        (
            POSTER_JAMES.to_string(),
            PosterStats {
                total_posts: 1,
                total_recycled: 0,
                rating: 4.6,
                active_items: 1,
                total_points: 0,
                points_this_week: 0,
            },
        ),
    ]
    .into_iter()
    .collect();

    let user_stats = [
        (
            COLLECTOR_ALEX.to_string(),
            UserStats {
                total_pickups: 0,
                rating: 4.9,
                completed_today: 0,
                rating_count: 1,
            },
        ),
        (
            COLLECTOR_SAM.to_string(),
            UserStats {
                total_pickups: 0,
                rating: 4.7,
                completed_today: 0,
                rating_count: 1,
            },
        ),
    ]
    .into_iter()
    .collect();

    PersistedState {
        users,
        recyclable_items,
        posted_items,
        user_stats,
        poster_stats,
    }
}
