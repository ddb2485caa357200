//! # Randomized Properties
//!
//! Random bags checked against the weight and points formulas, and random
//! operation sequences checked against the ownership rule.

#[cfg(test)]
mod tests {
    use em_01_entity_store::{COLLECTOR_ALEX, COLLECTOR_SAM, POSTER_JAMES, POSTER_MARIA};
    use em_02_lifecycle::LifecycleApi;
    use em_03_stats_ranking::StatsApi;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use shared_types::{round_to_tenth, ItemStatus, Material, MaterialType};

    use crate::integration::fixtures::{draft, test_app};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const SEED: u64 = 0x00ec_0a7c;

    fn random_materials(rng: &mut impl Rng) -> Vec<Material> {
        (0..rng.gen_range(1..=4))
            .map(|_| {
                let kind = MaterialType::ALL[rng.gen_range(0..MaterialType::ALL.len())];
                let quantity = rng.gen_range(1..=30);
                // Whole grams, like the item form.
                let weight = f64::from(rng.gen_range(5u32..=2_000)) / 1000.0;
                Material::new(kind, quantity, weight)
            })
            .collect()
    }

    // =========================================================================
    // FORMULAS
    // =========================================================================

    #[test]
    fn test_created_items_follow_the_formulas() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let app = test_app();

        for n in 0..200 {
            let materials = random_materials(&mut rng);
            let raw_weight: f64 = materials
                .iter()
                .map(|m| f64::from(m.quantity) * m.weight_per_unit)
                .sum();
            let raw_points: f64 = materials
                .iter()
                .map(|m| f64::from(m.quantity) * m.weight_per_unit * m.material_type.rate_per_kg())
                .sum();

            let item = app
                .container
                .lifecycle
                .create_item(draft(&format!("Bag {}", n), materials), POSTER_MARIA)
                .unwrap();

            assert_eq!(item.listing.total_weight, round_to_tenth(raw_weight));
            assert!((item.points() as f64 - raw_points).abs() <= 0.5 + 1e-9);
            assert!(item.listing.is_consistent());
        }
    }

    // =========================================================================
    // OWNERSHIP
    // =========================================================================

    #[test]
    fn test_points_only_ever_reach_the_owner() {
        let mut rng = StdRng::seed_from_u64(SEED ^ 0xff);
        let app = test_app();
        let lifecycle = &app.container.lifecycle;
        let posters = [POSTER_MARIA, POSTER_JAMES];
        let collectors = [COLLECTOR_ALEX, COLLECTOR_SAM];
        let mut owed = [0u64; 2];

        let mut open = Vec::new();
        for n in 0..120 {
            match rng.gen_range(0..3) {
                0 => {
                    let owner = rng.gen_range(0..2);
                    let item = lifecycle
                        .create_item(
                            draft(&format!("Random bag {}", n), random_materials(&mut rng)),
                            posters[owner],
                        )
                        .unwrap();
                    open.push((item.id().clone(), owner));
                }
                1 if !open.is_empty() => {
                    let (id, _) = &open[rng.gen_range(0..open.len())];
                    let collector = collectors[rng.gen_range(0..2)];
                    let _ = lifecycle.accept_item(id, collector);
                }
                _ if !open.is_empty() => {
                    let index = rng.gen_range(0..open.len());
                    let (id, owner) = open[index].clone();
                    let collector = collectors[rng.gen_range(0..2)];
                    if let Ok(done) = lifecycle.complete_pickup(&id, collector) {
                        assert_eq!(done.status, ItemStatus::Completed);
                        owed[owner] += done.points();
                        open.swap_remove(index);
                    }
                }
                _ => {}
            }
        }

        let stats = &app.container.stats;
        for (poster, points) in posters.iter().zip(owed) {
            assert_eq!(stats.poster_stats(poster).unwrap().total_points, points);
        }
        for item in lifecycle
            .get_poster_items(POSTER_MARIA)
            .into_iter()
            .chain(lifecycle.get_poster_items(POSTER_JAMES))
        {
            assert!(item.is_consistent());
        }
    }
}
