//! Board Module Tests
//!
//! Covers the leaderboard table and its shared store handle.
//!
//! ## Test Scopes
//! - **Submissions**: parsing and validation of incoming numbers and names.
//! - **Leaderboard**: upsert/remove semantics and the ranked projection.
//! - **Store**: export/replace round-trips and the administrative edit path.

#[cfg(test)]
mod tests {
    use crate::board::entry::{round_quantity, Entry, RankedEntry};
    use crate::board::leaderboard::{EntryMap, Leaderboard};
    use crate::board::submission::{Edit, EditRequest, Quantity, Submission};
    use crate::error::BoardError;
    use crate::storage::LeaderboardStore;
    use chrono::{Duration, Local};

    fn ranked_names(store: &LeaderboardStore) -> Vec<String> {
        store.list_ranked().into_iter().map(|r| r.name).collect()
    }

    // ============================================================
    // SUBMISSION TESTS
    // ============================================================

    #[test]
    fn test_rounds_to_three_decimals() {
        assert_eq!(round_quantity(1.23456), 1.235);
        assert_eq!(round_quantity(2.0004), 2.0);
        assert_eq!(round_quantity(2.0), 2.0);
    }

    #[test]
    fn test_quantity_accepts_numbers_and_numeric_strings() {
        assert_eq!(Quantity::from(42.5).parse("cleaned_gb"), Ok(42.5));
        assert_eq!(Quantity::from("42.5").parse("cleaned_gb"), Ok(42.5));
        assert_eq!(Quantity::from(" 100 ").parse("starting_gb"), Ok(100.0));
    }

    #[test]
    fn test_quantity_rejects_garbage_and_negatives() {
        for bad in ["abc", "", "-1", "NaN", "inf"] {
            assert!(
                matches!(
                    Quantity::from(bad).parse("cleaned_gb"),
                    Err(BoardError::Validation(_))
                ),
                "'{}' should be rejected",
                bad
            );
        }
        assert!(Quantity::from(-0.5).parse("cleaned_gb").is_err());
    }

    #[test]
    fn test_quantity_rejects_values_that_overflow_when_rounded() {
        assert!(round_quantity(1e306).is_infinite());
        for huge in [Quantity::from("1e306"), Quantity::from(1e306), Quantity::from(f64::MAX)] {
            assert!(matches!(
                huge.parse("cleaned_gb"),
                Err(BoardError::Validation(_))
            ));
        }
        assert_eq!(Quantity::from("1e12").parse("cleaned_gb"), Ok(1e12));
    }

    #[test]
    fn test_rounding_works_on_the_scaled_binary_value() {
        // 2.675 is 2.67499.. in binary, scaling by 1000 lands back on 2675
        assert_eq!(round_quantity(2.675), 2.675);
        assert_eq!(round_quantity(0.0015), 0.002);
    }

    #[test]
    fn test_submission_requires_name_and_cleaned_gb() {
        let no_name = Submission {
            cleaned_gb: Some(1.0.into()),
            ..Default::default()
        };
        assert!(matches!(no_name.validate(), Err(BoardError::Validation(_))));

        let blank_name = Submission::new("  ", 1.0);
        assert!(blank_name.validate().is_err());

        let no_quantity = Submission {
            name: Some("Alice".to_string()),
            ..Default::default()
        };
        assert!(no_quantity.validate().is_err());
    }

    #[test]
    fn test_submission_payload_from_json() {
        let submission: Submission = serde_json::from_str(
            r#"{"name": "Bob", "starting_gb": "100", "cleaned_gb": 42.5, "location": null}"#,
        )
        .unwrap();
        let valid = submission.validate().unwrap();

        assert_eq!(valid.name, "Bob");
        assert_eq!(valid.cleaned_gb, 42.5);
        assert_eq!(valid.starting_gb, 100.0);
        assert_eq!(valid.location, "");
    }

    #[test]
    fn test_edit_request_validation() {
        let missing = EditRequest {
            action: Some("add".to_string()),
            name: Some("Alice".to_string()),
            cleaned_gb: None,
        };
        assert_eq!(
            missing.validate(),
            Err(BoardError::Validation(
                "Missing required parameters".to_string()
            ))
        );

        let unknown = EditRequest {
            action: Some("rename".to_string()),
            name: Some("Alice".to_string()),
            cleaned_gb: Some(1.0.into()),
        };
        assert!(matches!(unknown.validate(), Err(BoardError::Validation(_))));

        let remove = EditRequest {
            action: Some("remove".to_string()),
            name: Some("Alice".to_string()),
            cleaned_gb: None,
        };
        assert_eq!(
            remove.validate(),
            Ok(Edit::Remove {
                name: "Alice".to_string()
            })
        );
    }

    // ============================================================
    // LEADERBOARD TESTS
    // ============================================================

    #[test]
    fn test_upsert_fully_replaces_entry() {
        let store = LeaderboardStore::new();
        store
            .upsert(
                Submission::new("Alice", 5.0)
                    .with_starting_gb(10.0)
                    .with_location("Zurich"),
            )
            .unwrap();
        store.upsert(Submission::new("Alice", 7.0)).unwrap();

        let table = store.export_all();
        assert_eq!(table.len(), 1);
        let alice = &table["Alice"];
        assert_eq!(alice.cleaned_gb, 7.0);
        assert_eq!(alice.starting_gb, 0.0);
        assert_eq!(alice.location, "");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let store = LeaderboardStore::new();
        store.upsert(Submission::new("alice", 1.0)).unwrap();
        store.upsert(Submission::new("Alice", 2.0)).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_failed_upsert_leaves_table_untouched() {
        let store = LeaderboardStore::new();
        store.upsert(Submission::new("Alice", 5.0)).unwrap();
        let before = store.export_all();
        let revision = store.revision();

        assert!(store.upsert(Submission::new("Alice", "five")).is_err());
        assert_eq!(store.export_all(), before);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_overflowing_submission_is_not_recorded() {
        let store = LeaderboardStore::new();
        store.upsert(Submission::new("Alice", 5.0)).unwrap();
        let before = store.export_all();
        let revision = store.revision();

        let result = store.upsert(Submission::new("Huge", "1e306"));
        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert!(!store.export_all().contains_key("Huge"));
        assert_eq!(store.export_all(), before);
        assert_eq!(store.revision(), revision);
        assert!(serde_json::to_string(&store.export_all()).is_ok());
    }

    #[test]
    fn test_ranked_by_cleaned_desc_then_name() {
        let store = LeaderboardStore::new();
        for (name, cleaned) in [("Dave", 3.0), ("Bob", 10.0), ("Carol", 3.0), ("Alice", 7.5)] {
            store.upsert(Submission::new(name, cleaned)).unwrap();
        }

        assert_eq!(ranked_names(&store), vec!["Bob", "Alice", "Carol", "Dave"]);
    }

    #[test]
    fn test_ranking_keeps_every_entry_once() {
        let store = LeaderboardStore::new();
        for i in 0..50 {
            let name = format!("user_{}", i);
            store.upsert(Submission::new(&name, (i % 7) as f64)).unwrap();
        }
        // resubmissions must not duplicate
        for i in 0..10 {
            let name = format!("user_{}", i);
            store.upsert(Submission::new(&name, 3.0)).unwrap();
        }

        let ranked = store.list_ranked();
        assert_eq!(ranked.len(), 50);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].entry.cleaned_gb >= w[1].entry.cleaned_gb));

        let mut names: Vec<String> = ranked.into_iter().map(|r| r.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 50);
    }

    #[test]
    fn test_bob_scenario() {
        let store = LeaderboardStore::new();
        let before = Local::now().naive_local();
        store
            .upsert(Submission::new("Bob", "42.5").with_starting_gb("100"))
            .unwrap();

        let ranked = store.list_ranked();
        assert_eq!(ranked.len(), 1);
        let bob = &ranked[0];
        assert_eq!(bob.name, "Bob");
        assert_eq!(bob.entry.cleaned_gb, 42.5);
        assert_eq!(bob.entry.starting_gb, 100.0);
        assert_eq!(bob.entry.location, "");
        assert!(bob.entry.timestamp >= before - Duration::seconds(1));
        assert!(bob.entry.timestamp <= Local::now().naive_local() + Duration::seconds(1));
    }

    #[test]
    fn test_ranked_entry_serializes_flat() {
        let store = LeaderboardStore::new();
        store.upsert(Submission::new("Bob", 42.5)).unwrap();

        let value = serde_json::to_value(store.list_ranked()).unwrap();
        let bob = &value[0];
        assert_eq!(bob["name"], "Bob");
        assert_eq!(bob["cleaned_gb"], 42.5);
        assert_eq!(bob["starting_gb"], 0.0);
        assert_eq!(bob["location"], "");
        assert!(bob["timestamp"].is_string());
    }

    #[test]
    fn test_remove_missing_name_is_noop() {
        let store = LeaderboardStore::new();
        store.upsert(Submission::new("Alice", 1.0)).unwrap();
        let before = store.export_all();

        assert!(!store.remove("Zoe"));
        assert_eq!(store.export_all(), before);

        assert!(store.remove("Alice"));
        assert!(store.is_empty());
    }

    // ============================================================
    // STORE TESTS
    // ============================================================

    #[test]
    fn test_export_replace_round_trip() {
        let source = LeaderboardStore::new();
        source
            .upsert(Submission::new("Alice", 5.0).with_location("Zurich"))
            .unwrap();
        source.upsert(Submission::new("Bob", 9.125)).unwrap();
        let exported = source.export_all();

        let target = LeaderboardStore::new();
        target.replace_all(EntryMap::new());
        assert!(target.is_empty());
        target.replace_all(exported.clone());

        assert_eq!(target.export_all(), exported);
        assert_eq!(target.list_ranked(), source.list_ranked());
    }

    #[test]
    fn test_replace_all_drops_previous_entries() {
        let store = LeaderboardStore::new();
        store.upsert(Submission::new("Alice", 5.0)).unwrap();

        let listing = vec![RankedEntry {
            name: "Bob".to_string(),
            entry: Entry::new(2.0, 0.0, String::new()),
        }];
        store.replace_all(listing);

        assert_eq!(ranked_names(&store), vec!["Bob"]);
    }

    #[test]
    fn test_listing_collects_last_occurrence_per_name() {
        let listing = vec![
            RankedEntry {
                name: "Bob".to_string(),
                entry: Entry::new(2.0, 0.0, String::new()),
            },
            RankedEntry {
                name: "Bob".to_string(),
                entry: Entry::new(4.0, 0.0, String::new()),
            },
        ];
        let leaderboard: Leaderboard = listing.into_iter().collect();

        assert_eq!(leaderboard.len(), 1);
        assert_eq!(leaderboard["Bob"].cleaned_gb, 4.0);
    }

    #[test]
    fn test_edit_add_writes_full_entry() {
        let store = LeaderboardStore::new();
        let table = store
            .edit(Edit::Add {
                name: "Alice".to_string(),
                cleaned_gb: 3.0,
            })
            .unwrap();

        let alice = &table["Alice"];
        assert_eq!(alice.cleaned_gb, 3.0);
        assert_eq!(alice.starting_gb, 0.0);
        // every value in the table keeps the entry shape
        assert!(store.list_ranked().iter().all(|r| r.name == "Alice"));
    }

    #[test]
    fn test_edit_update_requires_existing_name() {
        let store = LeaderboardStore::new();
        let result = store.edit(Edit::Update {
            name: "Ghost".to_string(),
            cleaned_gb: 1.0,
        });
        assert!(matches!(result, Err(BoardError::NotFound(_))));
        assert!(store.is_empty());

        store.upsert(Submission::new("Alice", 1.0)).unwrap();
        let table = store
            .edit(Edit::Update {
                name: "Alice".to_string(),
                cleaned_gb: 8.0,
            })
            .unwrap();
        assert_eq!(table["Alice"].cleaned_gb, 8.0);
    }

    #[test]
    fn test_edit_remove_absent_name_returns_table() {
        let store = LeaderboardStore::new();
        store.upsert(Submission::new("Alice", 1.0)).unwrap();
        let revision = store.revision();

        let table = store
            .edit(Edit::Remove {
                name: "Ghost".to_string(),
            })
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_clones_share_the_table() {
        let store = LeaderboardStore::new();
        let handle = store.clone();
        handle.upsert(Submission::new("Alice", 1.0)).unwrap();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_upserts_are_all_recorded() {
        let store = LeaderboardStore::new();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let name = format!("t{}_{}", t, i);
                        store.upsert(Submission::new(&name, i as f64)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 200);
        assert_eq!(store.revision(), 200);
    }
}
