//! Points and weight calculation for recyclable bags.
//!
//! Each material type has a fixed per-kilogram rate (see
//! [`MaterialType::rate_per_kg`](crate::MaterialType::rate_per_kg)).
//! Points are `round(Σ quantity × weightPerUnit × rate)` and are computed once
//! when a listing is created.

use crate::entities::Material;

/// Total bag weight in kilograms, rounded to one decimal place.
pub fn total_weight(materials: &[Material]) -> f64 {
    round_to_tenth(materials.iter().map(Material::weight).sum())
}

/// Points for a bag using the unrounded per-material weights.
pub fn calculate_points(materials: &[Material]) -> u64 {
    let raw: f64 = materials
        .iter()
        .map(|m| m.weight() * m.material_type.rate_per_kg())
        .sum();

    raw.round().max(0.0) as u64
}

/// Rounds to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
