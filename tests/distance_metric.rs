use std::collections::{BTreeMap, HashMap};

use rank_consensus::{kendall_tau, AggregationError, KendallTau, RankAggregator};

fn make_consensus(order: &[&'static str]) -> RankAggregator<&'static str> {
    let mut aggregator = RankAggregator::new();
    aggregator.add_ordering(order.iter().copied()).unwrap();
    aggregator.solve().unwrap();
    aggregator
}

#[test]
fn single_element_list_has_no_pairs() {
    let aggregator = make_consensus(&["a", "b"]);

    assert_eq!(aggregator.kendall_tau(&["b"], false), Ok(0.0));
    assert_eq!(aggregator.kendall_tau(&["b"], true), Ok(0.0));
}

#[test]
fn raw_count_and_normalized_fraction() {
    let aggregator = make_consensus(&["a", "b", "c", "d"]);
    let ranking = aggregator.ranking().unwrap();

    let measured = ranking.misorderings(&["a", "c", "b", "d"]).unwrap();
    assert_eq!(
        measured,
        KendallTau {
            misorderings: 1,
            max_orderings: 6
        }
    );

    assert_eq!(aggregator.kendall_tau(&["a", "c", "b", "d"], false), Ok(1.0));
    assert_eq!(aggregator.kendall_tau(&["a", "c", "b", "d"], true), Ok(1.0 / 6.0));
    assert_eq!(aggregator.kendall_tau(&["d", "c", "b", "a"], false), Ok(6.0));
    assert_eq!(aggregator.kendall_tau(&["d", "c", "b", "a"], true), Ok(1.0));
}

#[test]
fn reversing_a_list_complements_the_distance() {
    let aggregator = make_consensus(&["a", "b", "c", "d", "e"]);

    let test = ["b", "a", "e", "c", "d"];
    let mut reversed = test;
    reversed.reverse();

    let forward = aggregator.kendall_tau(&test, true).unwrap();
    let backward = aggregator.kendall_tau(&reversed, true).unwrap();

    assert!((backward - (1.0 - forward)).abs() < 1e-12);
}

#[test]
fn partial_test_list_only_counts_its_own_pairs() {
    let aggregator = make_consensus(&["a", "b", "c", "d"]);

    // Only (d, a) is compared.
    assert_eq!(aggregator.kendall_tau(&["d", "a"], false), Ok(1.0));
    assert_eq!(aggregator.kendall_tau(&["d", "a"], true), Ok(1.0));
}

#[test]
fn repeated_test_item_is_not_a_misordering() {
    let aggregator = make_consensus(&["a", "b"]);

    let measured = aggregator.ranking().unwrap().misorderings(&["a", "a", "b"]).unwrap();
    assert_eq!(measured.misorderings, 0);
    assert_eq!(measured.max_orderings, 3);
}

#[test]
fn consensus_agrees_with_itself() {
    let mut aggregator = RankAggregator::new();
    aggregator.add_ordering(["q", "w", "e", "r"]).unwrap();
    aggregator.add_ordering(["w", "q", "r"]).unwrap();
    aggregator.add_ordering(["e", "q", "t"]).unwrap();
    aggregator.solve().unwrap();

    let own: Vec<&str> = aggregator.ranking().unwrap().items().copied().collect();
    assert_eq!(aggregator.kendall_tau(&own, true), Ok(0.0));
}

#[test]
fn standalone_metric_over_map_lookups() {
    let btree: BTreeMap<&str, usize> = [("x", 0), ("y", 1), ("z", 2)].into_iter().collect();
    let hash: HashMap<&str, usize> = btree.iter().map(|(k, v)| (*k, *v)).collect();

    assert_eq!(kendall_tau(&btree, &["z", "y", "x"], false), Ok(3.0));
    assert_eq!(kendall_tau(&hash, &["x", "z", "y"], true), Ok(1.0 / 3.0));
    assert!(matches!(
        kendall_tau(&btree, &["x", "q"], true),
        Err(AggregationError::UnknownItem(_))
    ));
}

#[test]
fn ranks_with_no_pairs_normalize_to_zero() {
    let empty = KendallTau::from_ranks(&[]);
    assert_eq!(empty.max_orderings, 0);
    assert_eq!(empty.normalized(), 0.0);

    let inverted = KendallTau::from_ranks(&[3, 2, 1, 0]);
    assert_eq!(inverted.misorderings, 6);
    assert_eq!(inverted.value(true), 1.0);
    assert_eq!(inverted.value(false), 6.0);
}
