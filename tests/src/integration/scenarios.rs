//! # Lifecycle Scenarios
//!
//! End-to-end flows through the container: a poster lists a bag, a
//! collector claims and completes it, views and leaderboards follow.

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use em_01_entity_store::{
        seed_state, COLLECTOR_ALEX, COLLECTOR_SAM, POSTER_JAMES, POSTER_MARIA, SEED_PASSWORD,
    };
    use em_02_lifecycle::{LifecycleApi, LifecycleError};
    use em_03_stats_ranking::StatsApi;
    use em_runtime::handlers::{ActivityLog, RewardObserver};
    use shared_bus::EventTopic;
    use shared_types::{
        ItemStatus, ItemValidationError, Material, MaterialType, PickupModal, UserRole,
    };

    use crate::integration::fixtures::{
        draft, plastic_bottles, register_collector, small_electronics, test_app,
    };

    // =========================================================================
    // CREATE
    // =========================================================================

    #[test]
    fn test_create_computes_weight_and_points_without_crediting() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;

        let item = lifecycle.create_item(plastic_bottles(), POSTER_JAMES).unwrap();

        assert_eq!(item.status, ItemStatus::Active);
        assert_eq!(item.listing.total_weight, 2.1);
        assert_eq!(item.points(), 126);
        assert_eq!(item.posted_by_user_id, POSTER_JAMES);

        let stats = app.container.stats.poster_stats(POSTER_JAMES).unwrap();
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.active_items, 2);
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.points_this_week, 0);

        let available = lifecycle.get_available_items();
        assert!(available.iter().any(|l| &l.id == item.id()));
    }

    #[test]
    fn test_new_account_can_post_once_poster() {
        let app = test_app();
        let store = &app.container.store;

        let user = store.register("nina", "hunter2").unwrap();
        store.assign_role(&user.id, UserRole::Poster).unwrap();
        let item = app
            .container
            .lifecycle
            .create_item(small_electronics(), &user.id)
            .unwrap();

        assert_eq!(app.container.lifecycle.get_poster_items(&user.id), vec![item]);
        let stats = app.container.stats.poster_stats(&user.id).unwrap();
        assert_eq!(stats.total_posts, 1);
        assert_eq!(stats.active_items, 1);
    }

    #[test]
    fn test_create_for_unknown_poster_is_rejected() {
        let app = test_app();
        let before = app.blobs.save_count();

        let err = app
            .container
            .lifecycle
            .create_item(plastic_bottles(), "ghost")
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(app.blobs.save_count(), before);
        assert_eq!(app.container.lifecycle.get_available_items().len(), 3);
    }

    #[test]
    fn test_roles_gate_listing_and_accepting() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;
        let before = app.container.store.snapshot();

        let err = lifecycle
            .create_item(small_electronics(), COLLECTOR_ALEX)
            .unwrap_err();
        assert!(matches!(err, LifecycleError::WrongRole { .. }));
        assert_eq!(app.container.store.snapshot(), before);

        let fresh = app.container.store.register("newbie", "pw").unwrap();
        let before_fresh = app.container.store.snapshot();
        let err = lifecycle
            .create_item(small_electronics(), &fresh.id)
            .unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::WrongRole {
                actual: UserRole::Unset,
                ..
            }
        ));

        let err = lifecycle.accept_item("item-1", POSTER_JAMES).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::WrongRole {
                required: UserRole::Collector,
                ..
            }
        ));
        assert!(lifecycle
            .accept_item("item-3", "ghost")
            .unwrap_err()
            .is_not_found());

        assert_eq!(lifecycle.get_available_items().len(), 3);
        assert!(app.container.stats.poster_stats(COLLECTOR_ALEX).is_none());
        assert!(app
            .container
            .stats
            .poster_ranking()
            .iter()
            .all(|e| e.user_id != COLLECTOR_ALEX));
        assert_eq!(app.container.store.snapshot(), before_fresh);

        // A newly registered collector can accept.
        let collector = register_collector(&app, "kim");
        let item = lifecycle.accept_item("item-3", &collector).unwrap();
        assert_eq!(item.accepted_by.as_deref(), Some(collector.as_str()));
    }

    #[test]
    fn test_overweight_bags_never_reach_the_ledger() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;

        for _ in 0..2 {
            let err = lifecycle
                .create_item(
                    draft("Anvil", vec![Material::new(MaterialType::Metal, 1, 1e300)]),
                    POSTER_MARIA,
                )
                .unwrap_err();
            assert!(matches!(
                err,
                LifecycleError::InvalidItem(ItemValidationError::UnitTooHeavy { .. })
            ));
        }

        // The heaviest accepted bag completes twice without trouble.
        for _ in 0..2 {
            let item = lifecycle
                .create_item(
                    draft(
                        "Scrap",
                        vec![Material::new(
                            MaterialType::Electronic,
                            10,
                            shared_types::MAX_UNIT_WEIGHT_KG,
                        )],
                    ),
                    POSTER_MARIA,
                )
                .unwrap();
            lifecycle.accept_item(item.id(), COLLECTOR_ALEX).unwrap();
            lifecycle.complete_pickup(item.id(), COLLECTOR_ALEX).unwrap();
        }
        assert_eq!(
            app.container.stats.poster_stats(POSTER_MARIA).unwrap().total_points,
            2_000_000
        );
    }

    // =========================================================================
    // ACCEPT → COMPLETE
    // =========================================================================

    #[test]
    fn test_accept_removes_item_from_available() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;

        let accepted = lifecycle.accept_item("item-2", COLLECTOR_SAM).unwrap();
        assert_eq!(accepted.status, ItemStatus::Accepted);
        assert_eq!(accepted.accepted_by.as_deref(), Some(COLLECTOR_SAM));
        assert_eq!(accepted.accepted_at, Some(app.clock_now()));

        let ids: Vec<_> = lifecycle
            .get_available_items()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["item-1".to_string(), "item-3".to_string()]);
        assert_eq!(lifecycle.get_collector_pickups(COLLECTOR_SAM).len(), 1);
    }

    #[test]
    fn test_completion_credits_exactly_the_owner() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;
        let stats = &app.container.stats;

        // Bring maria to 100 points with a first completion.
        let first = lifecycle
            .create_item(
                draft("Copper wire", vec![Material::new(MaterialType::Metal, 5, 0.25)]),
                POSTER_MARIA,
            )
            .unwrap();
        assert_eq!(first.points(), 100);
        lifecycle.accept_item(first.id(), COLLECTOR_ALEX).unwrap();
        lifecycle.complete_pickup(first.id(), COLLECTOR_ALEX).unwrap();
        assert_eq!(stats.poster_stats(POSTER_MARIA).unwrap().total_points, 100);

        let second = lifecycle
            .create_item(small_electronics(), POSTER_MARIA)
            .unwrap();
        assert_eq!(second.points(), 85);
        lifecycle.accept_item(second.id(), COLLECTOR_SAM).unwrap();
        let done = lifecycle.complete_pickup(second.id(), COLLECTOR_SAM).unwrap();

        assert_eq!(done.status, ItemStatus::Completed);
        assert!(done.completed_at.is_some());

        let maria = stats.poster_stats(POSTER_MARIA).unwrap();
        assert_eq!(maria.total_points, 185);
        assert_eq!(maria.points_this_week, 185);
        assert_eq!(maria.total_recycled, 2);
        let james = stats.poster_stats(POSTER_JAMES).unwrap();
        assert_eq!(james.total_points, 0);

        assert_eq!(stats.collector_stats(COLLECTOR_ALEX).unwrap().total_pickups, 1);
        assert_eq!(stats.collector_stats(COLLECTOR_SAM).unwrap().total_pickups, 1);
        assert_eq!(stats.collector_stats(COLLECTOR_SAM).unwrap().completed_today, 1);
    }

    #[test]
    fn test_only_the_assignee_completes() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;

        lifecycle.accept_item("item-1", COLLECTOR_ALEX).unwrap();
        let err = lifecycle.complete_pickup("item-1", COLLECTOR_SAM).unwrap_err();
        assert!(matches!(err, LifecycleError::NotAssignee { .. }));

        let item = lifecycle.get_item("item-1").unwrap();
        assert_eq!(item.status, ItemStatus::Accepted);
        assert_eq!(
            app.container.stats.poster_stats(POSTER_MARIA).unwrap().total_points,
            0
        );
    }

    #[test]
    fn test_invalid_transitions_leave_state_unchanged() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;
        let before = app.container.store.snapshot();

        assert!(lifecycle
            .complete_pickup("item-1", COLLECTOR_ALEX)
            .unwrap_err()
            .is_invalid_state());
        assert!(lifecycle
            .accept_item("missing", COLLECTOR_ALEX)
            .unwrap_err()
            .is_not_found());
        assert!(lifecycle.review_collector("item-1", 4).is_err());

        lifecycle.accept_item("item-1", COLLECTOR_ALEX).unwrap();
        lifecycle.complete_pickup("item-1", COLLECTOR_ALEX).unwrap();
        let settled = app.container.store.snapshot();

        assert!(lifecycle
            .accept_item("item-1", COLLECTOR_SAM)
            .unwrap_err()
            .is_invalid_state());
        assert!(lifecycle
            .complete_pickup("item-1", COLLECTOR_ALEX)
            .unwrap_err()
            .is_invalid_state());
        assert_eq!(app.container.store.snapshot(), settled);
        assert_ne!(settled, before);
    }

    // =========================================================================
    // QR CODE AND REVIEW
    // =========================================================================

    #[test]
    fn test_qr_pickup_then_review() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;

        lifecycle.accept_item("item-3", COLLECTOR_ALEX).unwrap();
        let code = match lifecycle.pickup_modal("item-3").unwrap() {
            PickupModal::GenerateQr { code, .. } => code,
            other => panic!("expected QR modal, got {:?}", other),
        };
        assert_eq!(code, lifecycle.pickup_code("item-3").unwrap());

        app.clock.advance(Duration::minutes(20));
        lifecycle
            .complete_pickup_with_code(&code, COLLECTOR_ALEX)
            .unwrap();

        let reviewed = lifecycle.review_collector("item-3", 4).unwrap();
        assert_eq!(reviewed.collector_rating, Some(4));
        // (4.9 + 4) / 2
        assert_eq!(
            app.container.stats.collector_stats(COLLECTOR_ALEX).unwrap().rating,
            4.5
        );

        match lifecycle.pickup_modal("item-3").unwrap() {
            PickupModal::ReviewCollector { rating, .. } => assert_eq!(rating, Some(4)),
            other => panic!("expected review modal, got {:?}", other),
        }
        assert!(matches!(
            lifecycle.review_collector("item-3", 5),
            Err(LifecycleError::AlreadyReviewed { .. })
        ));
    }

    #[test]
    fn test_garbled_code_is_rejected() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;
        lifecycle.accept_item("item-1", COLLECTOR_ALEX).unwrap();

        let err = lifecycle
            .complete_pickup_with_code("https://example.org/item-1", COLLECTOR_ALEX)
            .unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidPickupCode(_)));
        assert_eq!(
            lifecycle.get_item("item-1").unwrap().status,
            ItemStatus::Accepted
        );
    }

    // =========================================================================
    // VIEWS AND OBSERVERS
    // =========================================================================

    #[test]
    fn test_rejected_items_hidden_only_for_that_collector() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;

        lifecycle.reject_item("item-2", COLLECTOR_ALEX).unwrap();

        assert_eq!(lifecycle.get_candidate_items(COLLECTOR_ALEX).len(), 2);
        assert_eq!(lifecycle.get_candidate_items(COLLECTOR_SAM).len(), 3);
        assert_eq!(lifecycle.get_available_items().len(), 3);
    }

    #[test]
    fn test_observers_follow_the_lifecycle() {
        let app = test_app();
        let notifier = app.container.notifier.clone();
        let rewards = RewardObserver::attach(notifier.clone());
        let activity = ActivityLog::attach(notifier.clone());
        let lifecycle = &app.container.lifecycle;

        let item = lifecycle.create_item(small_electronics(), POSTER_JAMES).unwrap();
        lifecycle.accept_item(item.id(), COLLECTOR_ALEX).unwrap();
        lifecycle.complete_pickup(item.id(), COLLECTOR_ALEX).unwrap();

        let topics: Vec<_> = activity.entries().iter().map(|e| e.topic).collect();
        assert_eq!(
            topics,
            vec![
                EventTopic::ItemCreated,
                EventTopic::ItemAccepted,
                EventTopic::ItemCollected
            ]
        );
        assert_eq!(activity.for_poster(POSTER_MARIA).len(), 0);

        let notes = rewards.notifications_for(POSTER_JAMES);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].points, 85);

        activity.detach();
        rewards.detach();
        for topic in EventTopic::ALL {
            assert_eq!(notifier.subscriber_count(topic), 0);
        }
    }

    #[test]
    fn test_leaderboards_after_a_busy_day() {
        let app = test_app();
        let lifecycle = &app.container.lifecycle;
        let stats = &app.container.stats;

        for (item, collector) in [
            ("item-1", COLLECTOR_SAM),
            ("item-2", COLLECTOR_ALEX),
            ("item-3", COLLECTOR_SAM),
        ] {
            lifecycle.accept_item(item, collector).unwrap();
            lifecycle.complete_pickup(item, collector).unwrap();
        }

        // james: 298, maria: 126 + 102
        let posters = stats.poster_ranking();
        assert_eq!(posters[0].user_id, POSTER_JAMES);
        assert_eq!(posters[0].total_points, 298);
        assert_eq!(posters[1].user_id, POSTER_MARIA);
        assert_eq!(posters[1].total_points, 228);
        assert_eq!(stats.poster_rank(POSTER_MARIA), Some(2));

        let collectors = stats.collector_ranking();
        assert_eq!(collectors[0].user_id, COLLECTOR_SAM);
        assert_eq!(collectors[0].total_pickups, 2);
        assert_eq!(collectors[1].rank, 2);

        let history = lifecycle.get_collector_history(COLLECTOR_SAM);
        assert_eq!(history.len(), 2);
        assert!(lifecycle.get_collector_pickups(COLLECTOR_SAM).is_empty());

        let summary = stats
            .derive_poster_summary(POSTER_MARIA, app.clock_now())
            .unwrap();
        assert_eq!(summary.total_points, 228);
        assert_eq!(summary.active_items, 0);
    }

    // =========================================================================
    // RESET
    // =========================================================================

    #[test]
    fn test_reset_restores_seed_and_logs_out() {
        let app = test_app();
        let rewards = RewardObserver::attach(app.container.notifier.clone());
        let lifecycle = &app.container.lifecycle;

        app.container.store.login("alex", SEED_PASSWORD).unwrap();
        lifecycle.create_item(plastic_bottles(), POSTER_MARIA).unwrap();
        lifecycle.accept_item("item-1", COLLECTOR_ALEX).unwrap();
        lifecycle.reject_item("item-2", COLLECTOR_ALEX).unwrap();

        lifecycle.reset_app();

        assert_eq!(app.container.store.snapshot(), seed_state());
        assert!(app.container.store.current_user().is_none());
        assert_eq!(lifecycle.get_candidate_items(COLLECTOR_ALEX).len(), 3);

        // Subscriptions survive a reset.
        lifecycle.accept_item("item-1", COLLECTOR_ALEX).unwrap();
        lifecycle.complete_pickup("item-1", COLLECTOR_ALEX).unwrap();
        assert_eq!(rewards.notifications().len(), 1);
    }
}
