#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    use crate::{
        CompleteLinkage, DistanceConfig, DistanceMatrix, Encounter, Error, MergeTree, Participant,
        Result, TableSplitter,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 18, 0, 0).unwrap()
    }

    fn player(id: u64, name: &str, rating: f64) -> Participant {
        Participant::new(id, name, rating, now() - Duration::days(10))
    }

    fn ids(group: &[&Participant]) -> Vec<u64> {
        group.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_two_tight_pairs_split_by_subtree() -> Result<()> {
        // A-B and C-D are the closest pairs; {A,B} and {C,D} join last.
        let players = vec![
            player(0, "A", 1000.0),
            player(1, "B", 1010.0),
            player(2, "C", 1500.0),
            player(3, "D", 1520.0),
        ];
        let splitter = TableSplitter::new(
            players,
            &[],
            DistanceConfig::new()
                .with_skill_weight(1.0)
                .with_reference_time(now()),
        )?;

        let pairs: Vec<_> = splitter
            .dendrogram()
            .merges()
            .map(|m| (m.left, m.right))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (2, 3), (4, 5)]);
        let heights = splitter.dendrogram().heights();
        assert!(heights[2] > heights[1] && heights[1] > heights[0]);

        // The C-D subtree merged higher than A-B, so it is emptied first.
        let tables = splitter.split(&[2, 2])?;
        assert_eq!(ids(&tables[0]), vec![3, 2]);
        assert_eq!(ids(&tables[1]), vec![1, 0]);
        Ok(())
    }

    #[test]
    fn test_recent_rematch_goes_to_different_tables() -> Result<()> {
        // Equal skill: only recency separates pairs. 0-1 and 2-3 just played.
        let players: Vec<_> = (0..4).map(|i| player(i, "P", 1500.0)).collect();
        let history = vec![
            Encounter::new(0, 1, now() - Duration::minutes(30)),
            Encounter::new(2, 3, now() - Duration::minutes(20)),
        ];
        let splitter = TableSplitter::new(
            players,
            &history,
            DistanceConfig::new()
                .with_skill_weight(0.0)
                .with_reference_time(now()),
        )?;

        // A fresh rematch sits near the top of the distance range.
        let m = splitter.distances();
        assert!(m.get(0, 1) > 0.99);
        assert_eq!(m.get(2, 3), 1.0);
        assert_eq!(m.get(0, 2), 0.0);

        let tables = splitter.split(&[2, 2])?;
        assert_eq!(ids(&tables[0]), vec![3, 1]);
        assert_eq!(ids(&tables[1]), vec![2, 0]);
        Ok(())
    }

    #[test]
    fn test_five_players() -> Result<()> {
        let players = vec![
            player(10, "a", 1100.0),
            player(11, "b", 1850.0),
            player(12, "c", 1320.0),
            player(13, "d", 1600.0),
            player(14, "e", 1990.0),
        ];
        let history = vec![
            Encounter::new(10, 12, now() - Duration::days(1)),
            Encounter::new(11, 14, now() - Duration::days(3)),
        ];
        let splitter = TableSplitter::new(
            players,
            &history,
            DistanceConfig::new().with_reference_time(now()),
        )?;

        let tables = splitter.split(&[3, 2])?;
        assert_eq!(tables[0].len(), 3);
        assert_eq!(tables[1].len(), 2);

        let err = splitter.split(&[2, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidGroupSizes { n_items: 5, .. }));
        assert!(matches!(
            splitter.split(&[5, 0]),
            Err(Error::InvalidGroupSizes { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_flat_inputs_give_constant_distance() -> Result<()> {
        let players: Vec<_> = (0..6).map(|i| player(i, "P", 1400.0)).collect();
        let when = now() - Duration::hours(2);
        let mut history = Vec::new();
        for a in 0..6 {
            for b in (a + 1)..6 {
                history.push(Encounter::new(a, b, when));
            }
        }
        let splitter = TableSplitter::new(
            players,
            &history,
            DistanceConfig::new()
                .with_skill_weight(0.25)
                .with_reference_time(now()),
        )?;

        let c = splitter.distances().condensed();
        assert!(c.iter().all(|d| d.is_finite()));
        assert!(c.iter().all(|&d| d == c[0]));
        assert!((c[0] - 0.75).abs() < 1e-12);
        assert_eq!(splitter.split(&[3, 3])?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_rounds_rebuild_from_scratch() -> Result<()> {
        let mut players = vec![
            player(0, "A", 1000.0),
            player(1, "B", 1010.0),
            player(2, "C", 1500.0),
            player(3, "D", 1520.0),
        ];
        let config = DistanceConfig::new()
            .with_skill_weight(1.0)
            .with_reference_time(now());
        let before = TableSplitter::new(players.clone(), &[], config.clone())?;

        // Only ratings carry over between rounds.
        players[1].rating = 1510.0;
        let after = TableSplitter::new(players, &[], config)?;

        assert_ne!(before.dendrogram(), after.dendrogram());
        assert_eq!(before.split(&[4])?.len(), 1);
        Ok(())
    }

    /// Cut `n` into positive chunks guided by `hints`.
    fn sizes_from(n: usize, hints: &[usize]) -> Vec<usize> {
        let mut out = Vec::new();
        let mut remaining = n;
        for &h in hints {
            if remaining == 0 {
                break;
            }
            let s = h.min(remaining);
            out.push(s);
            remaining -= s;
        }
        if remaining > 0 {
            out.push(remaining);
        }
        out
    }

    #[allow(clippy::type_complexity)]
    fn pool() -> impl Strategy<Value = (Vec<Participant>, Vec<Encounter>, f64, Vec<usize>)> {
        (2usize..24).prop_flat_map(|n| {
            (
                proptest::collection::vec((800i64..2400, 0i64..2_592_000), n),
                proptest::collection::vec((0..n as u64, 0..n as u64, 0i64..2_592_000), 0..60),
                0.0f64..=1.0,
                proptest::collection::vec(1usize..6, 0..n),
            )
                .prop_map(move |(people, games, w, hints)| {
                    let participants = people
                        .into_iter()
                        .enumerate()
                        .map(|(i, (rating, age))| {
                            Participant::new(
                                i as u64,
                                format!("P{i}"),
                                rating as f64,
                                now() - Duration::seconds(age),
                            )
                        })
                        .collect();
                    let encounters = games
                        .into_iter()
                        .map(|(a, b, age)| Encounter::new(a, b, now() - Duration::seconds(age)))
                        .collect();
                    (participants, encounters, w, sizes_from(n, &hints))
                })
        })
    }

    proptest! {
        #[test]
        fn matrix_is_symmetric_unit_range((players, games, w, _) in pool()) {
            let config = DistanceConfig::new().with_skill_weight(w).with_reference_time(now());
            let m = DistanceMatrix::build(&players, &games, &config).unwrap();
            let n = players.len();
            for i in 0..n {
                prop_assert_eq!(m.get(i, i), 0.0);
                for j in 0..n {
                    prop_assert_eq!(m.get(i, j), m.get(j, i));
                    prop_assert!(m.get(i, j) >= -1e-12 && m.get(i, j) <= 1.0 + 1e-12);
                }
            }
        }

        #[test]
        fn tree_has_n_leaves_and_n_minus_one_merges((players, games, w, _) in pool()) {
            let config = DistanceConfig::new().with_skill_weight(w).with_reference_time(now());
            let m = DistanceMatrix::build(&players, &games, &config).unwrap();
            let dendro = CompleteLinkage::new().fit(&m).unwrap();
            let tree = MergeTree::from_dendrogram(&dendro).unwrap();
            let n = players.len();

            prop_assert_eq!(dendro.n_merges(), n - 1);
            prop_assert_eq!(tree.iter().filter(|node| node.is_leaf()).count(), n);
            prop_assert_eq!(tree.iter().filter(|node| !node.is_leaf()).count(), n - 1);
            prop_assert_eq!(dendro.merges().last().map(|s| s.size), Some(n));
        }

        #[test]
        fn runs_are_deterministic((players, games, w, _) in pool()) {
            let config = DistanceConfig::new().with_skill_weight(w).with_reference_time(now());
            let m1 = DistanceMatrix::build(&players, &games, &config).unwrap();
            let m2 = DistanceMatrix::build(&players, &games, &config).unwrap();
            prop_assert_eq!(m1.as_array(), m2.as_array());

            let d1 = CompleteLinkage::new().fit(&m1).unwrap();
            let d2 = CompleteLinkage::new().fit(&m2).unwrap();
            prop_assert_eq!(d1, d2);
        }

        #[test]
        fn split_partitions_the_pool((players, games, w, sizes) in pool()) {
            let n = players.len();
            let config = DistanceConfig::new().with_skill_weight(w).with_reference_time(now());
            let splitter = TableSplitter::new(players, &games, config).unwrap();
            let tables = splitter.split(&sizes).unwrap();

            let got: Vec<usize> = tables.iter().map(|t| t.len()).collect();
            prop_assert_eq!(&got, &sizes);
            let seen: HashSet<u64> = tables.iter().flatten().map(|p| p.id).collect();
            prop_assert_eq!(seen.len(), n);
            prop_assert_eq!(seen, (0..n as u64).collect::<HashSet<_>>());
        }

        #[test]
        fn wrong_total_is_rejected((players, games, w, sizes) in pool(), extra in 1usize..4) {
            let config = DistanceConfig::new().with_skill_weight(w).with_reference_time(now());
            let splitter = TableSplitter::new(players, &games, config).unwrap();

            let mut over = sizes.clone();
            over.push(extra);
            let rejected = matches!(splitter.split(&over), Err(Error::InvalidGroupSizes { .. }));
            prop_assert!(rejected);

            let mut zero = sizes;
            zero.push(0);
            let rejected = matches!(splitter.split(&zero), Err(Error::InvalidGroupSizes { .. }));
            prop_assert!(rejected);
        }
    }
}
