use graft::engine::join_graph::{self, compare, Join};
use pretty_assertions::assert_eq;
use std::cmp::Ordering;

#[test]
fn chains_run_leaf_first() {
    let joins = [
        Join::new("a", "ta").reference("tb"),
        Join::new("b", "tb").reference("tc"),
        Join::new("c", "tc"),
    ];

    assert_eq!(compare(&joins[0], &joins[1]), Ordering::Greater);
    assert_eq!(compare(&joins[2], &joins[1]), Ordering::Less);
    assert_eq!(compare(&joins[0], &joins[2]), Ordering::Equal);

    assert_eq!(join_graph::order(&joins).unwrap(), [2, 1, 0]);
}

#[test]
fn order_is_deterministic() {
    let joins = [
        Join::new("language", "language"),
        Join::new("actors", "actor").reference("film_actor"),
        Join::new("categories", "category").reference("film_category"),
        Join::new("film_actor", "film_actor"),
        Join::new("film_category", "film_category"),
    ];

    let first = join_graph::order(&joins).unwrap();
    assert_eq!(first, [0, 3, 1, 4, 2]);

    for _ in 0..10 {
        assert_eq!(join_graph::order(&joins).unwrap(), first);
    }
}

#[test]
fn cycles_name_the_includes_involved() {
    let joins = [
        Join::new("language", "language"),
        Join::new("a", "ta").reference("tb"),
        Join::new("b", "tb").reference("ta"),
    ];

    let err = join_graph::order(&joins).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: cyclic reference between includes [a, b]"
    );
}
