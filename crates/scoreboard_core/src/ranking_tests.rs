use super::*;

fn snapshot(scoreboard: &Scoreboard) -> Vec<(usize, String, i32)> {
    scoreboard
        .standings()
        .map(|(rank, name, score)| (rank, name.to_string(), score))
        .collect()
}

#[test]
fn test_standings_descending_by_score() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Alice"), 5).unwrap();
    scoreboard.add_player(Some("Bob"), 10).unwrap();

    assert_eq!(
        snapshot(&scoreboard),
        vec![(1, "Bob".to_string(), 10), (2, "Alice".to_string(), 5)]
    );
}

#[test]
fn test_ties_break_by_name() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Mallory"), 3).unwrap();
    scoreboard.add_player(Some("Bob"), 3).unwrap();
    scoreboard.add_player(Some("Alice"), 3).unwrap();

    let names: Vec<String> = snapshot(&scoreboard).into_iter().map(|e| e.1).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Mallory"]);
}

#[test]
fn test_duplicate_name_gets_suffix() {
    let mut scoreboard = Scoreboard::new();
    assert_eq!(scoreboard.add_player(Some("Alice"), 0).unwrap(), "Alice");
    assert_eq!(scoreboard.add_player(Some("Alice"), 0).unwrap(), "Alice(1)");

    // both exist with score zero, and the bare name ranks first on the tie
    assert_eq!(
        snapshot(&scoreboard),
        vec![
            (1, "Alice".to_string(), 0),
            (2, "Alice(1)".to_string(), 0)
        ]
    );
}

#[test]
fn test_suffix_reuses_smallest_free_slot() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("A"), 0).unwrap();
    scoreboard.add_player(Some("A"), 0).unwrap();
    scoreboard.add_player(Some("A"), 0).unwrap();
    scoreboard
        .remove_player(&Selector::Name("A(1)".to_string()))
        .unwrap();

    assert_eq!(scoreboard.add_player(Some("A"), 0).unwrap(), "A(1)");
}

#[test]
fn test_default_names_are_synthesized() {
    let mut scoreboard = Scoreboard::new();
    assert_eq!(scoreboard.add_player(None, 0).unwrap(), "Player(1)");
    assert_eq!(scoreboard.add_player(None, 0).unwrap(), "Player(2)");

    scoreboard
        .remove_player(&Selector::Name("Player(1)".to_string()))
        .unwrap();
    assert_eq!(scoreboard.add_player(None, 0).unwrap(), "Player(1)");
}

#[test]
fn test_add_at_capacity_fails_without_change() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.set_max_players(1).unwrap();
    scoreboard.add_player(Some("A"), 0).unwrap();

    let err = scoreboard.add_player(Some("B"), 0).unwrap_err();
    assert_eq!(err, ScoreboardError::AtCapacity { limit: 1 });
    assert_eq!(scoreboard.len(), 1);
    assert_eq!(scoreboard.score_of("A"), Some(0));
}

#[test]
fn test_name_length_limit() {
    let mut scoreboard = Scoreboard::new();
    let longest: String = "x".repeat(32);
    assert!(scoreboard.add_player(Some(&longest), 0).is_ok());

    let too_long: String = "x".repeat(33);
    assert_eq!(
        scoreboard.add_player(Some(&too_long), 0).unwrap_err(),
        ScoreboardError::NameTooLong { name: too_long }
    );
    assert_eq!(
        scoreboard.add_player(Some(""), 0).unwrap_err(),
        ScoreboardError::InvalidName
    );
}

#[test]
fn test_initial_score_clamped() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("High"), 20_000).unwrap();
    scoreboard.add_player(Some("Low"), -20_000).unwrap();

    assert_eq!(scoreboard.score_of("High"), Some(MAX_SCORE));
    assert_eq!(scoreboard.score_of("Low"), Some(MIN_SCORE));
}

#[test]
fn test_adjust_saturates_silently() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("A"), MAX_SCORE as i64).unwrap();

    let selector = Selector::Name("A".to_string());
    assert_eq!(scoreboard.adjust_score(&selector, 1).unwrap(), MAX_SCORE);
    assert_eq!(
        scoreboard.adjust_score(&selector, i64::MAX).unwrap(),
        MAX_SCORE
    );
    assert_eq!(
        scoreboard.adjust_score(&selector, i64::MIN).unwrap(),
        MIN_SCORE
    );
}

#[test]
fn test_set_score_clamped() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("A"), 0).unwrap();

    let selector = Selector::Name("A".to_string());
    assert_eq!(scoreboard.set_score(&selector, 123).unwrap(), 123);
    assert_eq!(scoreboard.set_score(&selector, 100_000).unwrap(), MAX_SCORE);
}

#[test]
fn test_rank_resolution_follows_current_order() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("A"), 3).unwrap();
    scoreboard.add_player(Some("B"), 2).unwrap();
    scoreboard.add_player(Some("C"), 1).unwrap();

    // rank 2 is B right now
    assert_eq!(
        scoreboard.remove_player(&Selector::Rank(2)).unwrap(),
        "B"
    );
    // ranks shifted: C moved up to rank 2
    assert_eq!(
        scoreboard.remove_player(&Selector::Rank(2)).unwrap(),
        "C"
    );
}

#[test]
fn test_invalid_rank_on_empty_board() {
    let mut scoreboard = Scoreboard::new();
    assert_eq!(
        scoreboard.adjust_score(&Selector::Rank(1), 1).unwrap_err(),
        ScoreboardError::InvalidRank { rank: 1, size: 0 }
    );
    assert!(scoreboard.is_empty());
}

#[test]
fn test_remove_unknown_name() {
    let mut scoreboard = Scoreboard::new();
    assert_eq!(
        scoreboard
            .remove_player(&Selector::Name("Ghost".to_string()))
            .unwrap_err(),
        ScoreboardError::NotFound {
            name: "Ghost".to_string()
        }
    );
}

#[test]
fn test_rename_keeps_score() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Alice"), 7).unwrap();

    let stored = scoreboard
        .rename_player(&Selector::Name("Alice".to_string()), "Bob")
        .unwrap();
    assert_eq!(stored, "Bob");
    assert_eq!(scoreboard.score_of("Bob"), Some(7));
    assert_eq!(scoreboard.score_of("Alice"), None);
}

#[test]
fn test_rename_to_own_name_is_not_a_collision() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Alice"), 7).unwrap();

    let stored = scoreboard
        .rename_player(&Selector::Name("Alice".to_string()), "Alice")
        .unwrap();
    assert_eq!(stored, "Alice");
    assert_eq!(scoreboard.len(), 1);
}

#[test]
fn test_rename_collision_gets_suffix() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Alice"), 0).unwrap();
    scoreboard.add_player(Some("Bob"), 0).unwrap();

    let stored = scoreboard
        .rename_player(&Selector::Name("Bob".to_string()), "Alice")
        .unwrap();
    assert_eq!(stored, "Alice(1)");
}

#[test]
fn test_rename_rejects_bad_names() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Alice"), 0).unwrap();

    let selector = Selector::Name("Alice".to_string());
    assert_eq!(
        scoreboard.rename_player(&selector, "").unwrap_err(),
        ScoreboardError::InvalidName
    );
    assert_eq!(
        scoreboard
            .rename_player(&selector, &"x".repeat(33))
            .unwrap_err(),
        ScoreboardError::InvalidName
    );
}

#[test]
fn test_reset_all_is_idempotent() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("A"), 5).unwrap();
    scoreboard.add_player(Some("B"), -5).unwrap();

    scoreboard.reset_all_scores();
    let once = snapshot(&scoreboard);
    scoreboard.reset_all_scores();
    assert_eq!(snapshot(&scoreboard), once);
    assert!(once.iter().all(|entry| entry.2 == 0));
}

#[test]
fn test_reset_single_score() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("A"), 5).unwrap();
    scoreboard.add_player(Some("B"), 9).unwrap();

    scoreboard
        .reset_score(&Selector::Name("B".to_string()))
        .unwrap();
    assert_eq!(scoreboard.score_of("B"), Some(0));
    assert_eq!(scoreboard.score_of("A"), Some(5));
}

#[test]
fn test_shrinking_limit_evicts_lowest_ranks() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("First"), 4).unwrap();
    scoreboard.add_player(Some("Second"), 3).unwrap();
    scoreboard.add_player(Some("Third"), 2).unwrap();
    scoreboard.add_player(Some("Fourth"), 1).unwrap();

    assert_eq!(scoreboard.set_max_players(2).unwrap(), 2);
    assert_eq!(scoreboard.max_players(), 2);
    assert_eq!(
        snapshot(&scoreboard),
        vec![
            (1, "First".to_string(), 4),
            (2, "Second".to_string(), 3)
        ]
    );
}

#[test]
fn test_limit_range_validation() {
    let mut scoreboard = Scoreboard::new();
    assert_eq!(
        scoreboard.set_max_players(-1).unwrap_err(),
        ScoreboardError::OutOfRange { value: -1 }
    );
    assert_eq!(
        scoreboard.set_max_players(65_536).unwrap_err(),
        ScoreboardError::OutOfRange { value: 65_536 }
    );
    assert!(scoreboard.set_max_players(65_535).is_ok());

    assert_eq!(
        scoreboard.set_show_max(-1).unwrap_err(),
        ScoreboardError::OutOfRange { value: -1 }
    );
    assert!(scoreboard.set_show_max(0).is_ok());
    assert_eq!(scoreboard.show_max(), Some(0));
}

#[test]
fn test_init_players_respects_capacity() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.set_max_players(3).unwrap();

    let (created, truncated) = scoreboard.init_players(5);
    assert_eq!(created, 3);
    assert!(truncated);

    let names: Vec<String> = snapshot(&scoreboard).into_iter().map(|e| e.1).collect();
    assert_eq!(names, vec!["Player(1)", "Player(2)", "Player(3)"]);
}

#[test]
fn test_init_players_skips_taken_names() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Player(2)"), 0).unwrap();

    let (created, truncated) = scoreboard.init_players(2);
    assert_eq!(created, 2);
    assert!(!truncated);
    assert!(scoreboard.score_of("Player(1)").is_some());
    assert!(scoreboard.score_of("Player(3)").is_some());
}

#[test]
fn test_remove_all_empties_everything() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("A"), 1).unwrap();
    scoreboard.add_player(Some("B"), 2).unwrap();

    scoreboard.remove_all();
    assert!(scoreboard.is_empty());
    assert_eq!(scoreboard.standings().count(), 0);
}

#[test]
fn test_history_records_mutations() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("A"), 1).unwrap();
    scoreboard
        .adjust_score(&Selector::Name("A".to_string()), 1)
        .unwrap();
    scoreboard
        .rename_player(&Selector::Name("A".to_string()), "B")
        .unwrap();
    scoreboard
        .remove_player(&Selector::Name("B".to_string()))
        .unwrap();

    assert_eq!(
        scoreboard.history(),
        &[
            HistoryEvent::Added {
                name: "A".to_string(),
                score: 1
            },
            HistoryEvent::ScoreChanged {
                name: "A".to_string(),
                from: 1,
                to: 2
            },
            HistoryEvent::Renamed {
                from: "A".to_string(),
                to: "B".to_string()
            },
            HistoryEvent::Removed {
                name: "B".to_string(),
                score: 2
            },
        ]
    );
}

#[test]
fn test_restore_replaces_registry() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Old"), 1).unwrap();

    let loaded = scoreboard
        .restore(
            10,
            Some(5),
            vec![
                Player {
                    name: "A".to_string(),
                    score: 3,
                },
                Player {
                    name: "B".to_string(),
                    score: 20_000,
                },
            ],
        )
        .unwrap();

    assert_eq!(loaded, 2);
    assert_eq!(scoreboard.max_players(), 10);
    assert_eq!(scoreboard.show_max(), Some(5));
    assert_eq!(scoreboard.score_of("Old"), None);
    // out-of-range scores clamp on the way in
    assert_eq!(scoreboard.score_of("B"), Some(MAX_SCORE));
}

#[test]
fn test_restore_failure_leaves_state_untouched() {
    let mut scoreboard = Scoreboard::new();
    scoreboard.add_player(Some("Keep"), 1).unwrap();

    let records = vec![
        Player {
            name: "A".to_string(),
            score: 0,
        },
        Player {
            name: "B".to_string(),
            score: 0,
        },
    ];
    let err = scoreboard.restore(1, None, records).unwrap_err();
    assert_eq!(err, ScoreboardError::AtCapacity { limit: 1 });
    assert_eq!(scoreboard.score_of("Keep"), Some(1));
    assert_eq!(scoreboard.len(), 1);
}
