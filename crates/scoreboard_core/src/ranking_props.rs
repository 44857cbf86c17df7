use std::collections::HashSet;

use proptest::prelude::*;

use super::*;

#[derive(Debug, Clone)]
enum Op {
    Add(String, i64),
    Win(u64),
    Loss(String),
    Remove(u64),
    Rename(u64, String),
    SetLimit(i64),
    ResetAll,
}

// Small name alphabet so collisions and suffixing happen often.
fn op_strategy() -> impl Strategy<Value = Op> {
    let name = "[a-d]{1,2}";
    prop_oneof![
        (name, -20_000i64..20_000).prop_map(|(n, s)| Op::Add(n, s)),
        (1u64..6).prop_map(Op::Win),
        name.prop_map(Op::Loss),
        (1u64..6).prop_map(Op::Remove),
        ((1u64..6), name).prop_map(|(r, n)| Op::Rename(r, n)),
        (0i64..6).prop_map(Op::SetLimit),
        Just(Op::ResetAll),
    ]
}

proptest! {
    /// After any sequence of operations the standings are a complete,
    /// duplicate-free, correctly ordered view of the registry and every
    /// score is inside the clamp range.
    #[test]
    fn standings_stay_consistent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut scoreboard = Scoreboard::new();
        for op in ops {
            // individual operations may fail; the invariants may not
            let _ = match op {
                Op::Add(name, score) => scoreboard.add_player(Some(&name), score).map(|_| ()),
                Op::Win(rank) => scoreboard.adjust_score(&Selector::Rank(rank), 1).map(|_| ()),
                Op::Loss(name) => scoreboard.adjust_score(&Selector::Name(name), -1).map(|_| ()),
                Op::Remove(rank) => scoreboard.remove_player(&Selector::Rank(rank)).map(|_| ()),
                Op::Rename(rank, name) => {
                    scoreboard.rename_player(&Selector::Rank(rank), &name).map(|_| ())
                }
                Op::SetLimit(limit) => scoreboard.set_max_players(limit).map(|_| ()),
                Op::ResetAll => {
                    scoreboard.reset_all_scores();
                    Ok(())
                }
            };

            let standings: Vec<(usize, String, i32)> = scoreboard
                .standings()
                .map(|(rank, name, score)| (rank, name.to_string(), score))
                .collect();

            prop_assert_eq!(standings.len(), scoreboard.len());
            prop_assert!(scoreboard.len() <= scoreboard.max_players() as usize);

            let mut seen = HashSet::new();
            for (i, (rank, name, score)) in standings.iter().enumerate() {
                prop_assert_eq!(*rank, i + 1);
                prop_assert!((MIN_SCORE..=MAX_SCORE).contains(score));
                prop_assert_eq!(scoreboard.score_of(name), Some(*score));
                prop_assert!(seen.insert(name.clone()), "duplicate name {}", name);
            }
            for window in standings.windows(2) {
                let (_, ref above, above_score) = window[0];
                let (_, ref below, below_score) = window[1];
                prop_assert!(
                    above_score > below_score
                        || (above_score == below_score && above < below)
                );
            }
        }
    }

    /// Adjustments of any magnitude land inside the clamp range.
    #[test]
    fn scores_always_clamped(initial in -20_000i64..20_000, delta in any::<i64>()) {
        let mut scoreboard = Scoreboard::new();
        scoreboard.add_player(Some("solo"), initial).unwrap();

        let new = scoreboard
            .adjust_score(&Selector::Name("solo".to_string()), delta)
            .unwrap();
        prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&new));
    }
}
