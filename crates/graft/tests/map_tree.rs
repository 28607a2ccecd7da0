use graft::{
    engine::{map_tree, NodeId, Snapshot, Tree},
    err, Result,
};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio_stream::StreamExt;

/// A random tree of `len` nodes labelled `0..len`.
fn random_tree(rng: &mut StdRng, len: u32) -> Tree<u32> {
    let mut tree = Tree::new(0);
    let mut ids = vec![tree.root()];

    for label in 1..len {
        let parent = ids[rng.gen_range(0..ids.len())];
        ids.push(tree.push_child(parent, label));
    }

    tree
}

async fn collect<U: Clone>(
    stream: impl tokio_stream::Stream<Item = Result<Snapshot<U>>>,
) -> Vec<Result<Snapshot<U>>> {
    tokio::pin!(stream);
    let mut snapshots = vec![];
    while let Some(snapshot) = stream.next().await {
        snapshots.push(snapshot);
    }
    snapshots
}

#[tokio::test]
async fn identity_map_reproduces_the_tree() {
    let mut rng = StdRng::seed_from_u64(0x6772_6166);

    for _ in 0..50 {
        let len = rng.gen_range(1..40);
        let tree = random_tree(&mut rng, len);

        let snapshots = collect(map_tree(&tree, |label: &u32, _parent: Option<&u32>| {
            let label = *label;
            async move { Ok(label) }
        }))
        .await;

        assert_eq!(snapshots.len(), tree.levels().len());

        let last = snapshots.into_iter().last().unwrap().unwrap();
        assert!(last.tree == tree);
        assert_eq!(last.tree.len(), tree.len());
    }
}

#[tokio::test]
async fn each_snapshot_adds_one_level() {
    let mut tree = Tree::new("film");
    let actors = tree.push_child(tree.root(), "actors");
    tree.push_child(tree.root(), "language");
    tree.push_child(actors, "films");

    let snapshots = collect(map_tree(&tree, |name: &&str, parent: Option<&String>| {
        let path = match parent {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_string(),
        };
        async move { Ok(path) }
    }))
    .await;

    let rounds: Vec<Vec<String>> = snapshots
        .into_iter()
        .map(|snapshot| {
            let snapshot = snapshot.unwrap();
            snapshot
                .round
                .iter()
                .map(|&id| snapshot.tree[id].value.clone())
                .collect()
        })
        .collect();

    assert_eq!(
        rounds,
        [
            vec!["film".to_string()],
            vec!["film.actors".to_string(), "film.language".to_string()],
            vec!["film.actors.films".to_string()],
        ]
    );
}

#[tokio::test]
async fn a_round_completes_before_it_is_yielded() {
    let mut tree = Tree::new(0u64);
    for delay in [30, 5, 15] {
        tree.push_child(tree.root(), delay);
    }

    let finished = Arc::new(AtomicUsize::new(0));
    let counter = finished.clone();

    let stream = map_tree(&tree, move |delay: &u64, _parent: Option<&()>| {
        let (delay, finished) = (*delay, counter.clone());
        async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            finished.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    tokio::pin!(stream);

    stream.next().await.unwrap().unwrap();
    assert_eq!(finished.load(Ordering::SeqCst), 1);

    let round = stream.next().await.unwrap().unwrap();
    assert_eq!(finished.load(Ordering::SeqCst), 4);
    assert_eq!(round.round.len(), 3);

    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn a_failed_round_ends_the_stream() {
    let mut tree = Tree::new(1);
    let two = tree.push_child(tree.root(), 2);
    tree.push_child(tree.root(), 3);
    tree.push_child(two, 4);

    let snapshots = collect(map_tree(&tree, |n: &i32, _parent: Option<&i32>| {
        let n = *n;
        async move {
            if n == 3 {
                Err(err!("node {n} failed"))
            } else {
                Ok(n)
            }
        }
    }))
    .await;

    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[0].is_ok());
    assert_eq!(snapshots[1].as_ref().unwrap_err().to_string(), "node 3 failed");
}

#[test]
fn levels_of_a_chain() {
    let mut tree = Tree::new('a');
    let mut last: NodeId = tree.root();
    for c in ['b', 'c', 'd'] {
        last = tree.push_child(last, c);
    }

    assert_eq!(tree.levels().len(), 4);
    assert_eq!(tree[last].depth, 3);
}
