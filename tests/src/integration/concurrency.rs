//! # Concurrency
//!
//! Many collectors racing for the same bag: exactly one acceptance wins,
//! exactly one completion credits the poster, and the bus sees one event
//! per committed transition.

#[cfg(test)]
mod tests {
    use std::sync::Barrier;

    use em_01_entity_store::{COLLECTOR_ALEX, COLLECTOR_SAM, POSTER_MARIA};
    use em_02_lifecycle::{LifecycleApi, LifecycleError};
    use em_03_stats_ranking::StatsApi;
    use em_runtime::handlers::ActivityLog;
    use shared_bus::EventTopic;
    use shared_types::ItemStatus;

    use crate::integration::fixtures::{register_collector, small_electronics, test_app, TestApp};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const RACERS: usize = 8;
    const ROUNDS: usize = 25;

    fn collector_ids(app: &TestApp, n: usize) -> Vec<String> {
        (0..n)
            .map(|i| register_collector(app, &format!("racer{}", i)))
            .collect()
    }

    // =========================================================================
    // ACCEPT RACES
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_one_winner_among_concurrent_accepts() {
        let app = test_app();
        let activity = ActivityLog::attach(app.container.notifier.clone());

        let tasks: Vec<_> = collector_ids(&app, RACERS)
            .into_iter()
            .map(|collector| {
                let lifecycle = app.container.lifecycle.clone();
                tokio::task::spawn_blocking(move || {
                    lifecycle.accept_item("item-2", &collector)
                })
            })
            .collect();

        let mut winners = Vec::new();
        let mut losers = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(item) => winners.push(item),
                Err(LifecycleError::InvalidState { .. }) => losers += 1,
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert_eq!(winners.len(), 1);
        assert_eq!(losers, RACERS - 1);

        let stored = app.container.lifecycle.get_item("item-2").unwrap();
        assert_eq!(stored.status, ItemStatus::Accepted);
        assert_eq!(stored.accepted_by, winners[0].accepted_by);

        let accepted: Vec<_> = activity
            .entries()
            .into_iter()
            .filter(|e| e.topic == EventTopic::ItemAccepted)
            .collect();
        assert_eq!(accepted.len(), 1);
        activity.detach();
    }

    #[test]
    fn test_repeated_races_credit_points_once() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;
        let mut expected_points = 0;

        for _ in 0..ROUNDS {
            let item = lifecycle
                .create_item(small_electronics(), POSTER_MARIA)
                .unwrap();
            let item_id = item.id().clone();
            expected_points += item.points();

            let barrier = Barrier::new(2);
            let accepted: Vec<_> = std::thread::scope(|s| {
                let handles: Vec<_> = [COLLECTOR_ALEX, COLLECTOR_SAM]
                    .into_iter()
                    .map(|collector| {
                        let barrier = &barrier;
                        let item_id = &item_id;
                        s.spawn(move || {
                            barrier.wait();
                            lifecycle
                                .accept_item(item_id, collector)
                                .ok()
                                .map(|_| collector)
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .filter_map(|t| t.join().unwrap())
                    .collect()
            });
            assert_eq!(accepted.len(), 1);
            let winner = accepted[0];

            // The winner and a replay race to complete.
            let barrier = Barrier::new(2);
            let completions = std::thread::scope(|s| {
                let handles: Vec<_> = (0..2)
                    .map(|_| {
                        let barrier = &barrier;
                        let item_id = &item_id;
                        s.spawn(move || {
                            barrier.wait();
                            lifecycle.complete_pickup(item_id, winner).is_ok()
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|t| t.join().unwrap())
                    .filter(|ok| *ok)
                    .count()
            });
            assert_eq!(completions, 1);
        }

        let maria = app.container.stats.poster_stats(POSTER_MARIA).unwrap();
        assert_eq!(maria.total_points, expected_points);
        assert_eq!(maria.total_recycled as usize, ROUNDS);

        let pickups: u32 = [COLLECTOR_ALEX, COLLECTOR_SAM]
            .iter()
            .map(|c| app.container.stats.collector_stats(c).unwrap().total_pickups)
            .sum();
        assert_eq!(pickups as usize, ROUNDS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_torn_items() {
        let app = test_app();
        let lifecycle = app.container.lifecycle.clone();

        let writer = {
            let lifecycle = lifecycle.clone();
            tokio::task::spawn_blocking(move || {
                for _ in 0..ROUNDS {
                    let item = lifecycle
                        .create_item(small_electronics(), POSTER_MARIA)
                        .unwrap();
                    lifecycle.accept_item(item.id(), COLLECTOR_ALEX).unwrap();
                    lifecycle.complete_pickup(item.id(), COLLECTOR_ALEX).unwrap();
                }
            })
        };

        let reader = {
            let lifecycle = lifecycle.clone();
            tokio::task::spawn_blocking(move || {
                let mut observed = 0;
                for _ in 0..ROUNDS * 4 {
                    for item in lifecycle.get_poster_items(POSTER_MARIA) {
                        assert!(item.is_consistent());
                        observed += 1;
                    }
                    for listing in lifecycle.get_available_items() {
                        assert!(listing.is_consistent());
                    }
                }
                observed
            })
        };

        writer.await.unwrap();
        assert!(reader.await.unwrap() > 0);
        assert_eq!(lifecycle.get_collector_history(COLLECTOR_ALEX).len(), ROUNDS);
    }
}
