use std::{future::Future, ops};

use futures::future::join_all;
use index_vec::IndexVec;
use tokio_stream::Stream;

use crate::Result;

index_vec::define_index_type! {
    pub struct NodeId = u32;
}

/// A rooted tree stored as an arena.
///
/// Nodes live in a flat table indexed by [`NodeId`]; parent and child links
/// are ids, so a child can reach its parent without an ownership cycle. The
/// root is always the first node.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: IndexVec<NodeId, Node<T>>,
}

#[derive(Debug, Clone)]
pub struct Node<T> {
    pub value: T,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Distance from the root; the root is at depth 0.
    pub depth: usize,
}

/// One step of [`map_tree`]: every node mapped so far, and the nodes mapped
/// in the round that produced it.
#[derive(Debug, Clone)]
pub struct Snapshot<U> {
    pub tree: Tree<U>,
    pub round: Vec<NodeId>,
}

impl<T> Tree<T> {
    pub fn new(root: T) -> Tree<T> {
        let mut nodes = IndexVec::new();
        nodes.push(Node {
            value: root,
            parent: None,
            children: vec![],
            depth: 0,
        });
        Tree { nodes }
    }

    pub fn root(&self) -> NodeId {
        NodeId::from_usize(0)
    }

    /// Appends `value` as the last child of `parent`.
    pub fn push_child(&mut self, parent: NodeId, value: T) -> NodeId {
        let depth = self.nodes[parent].depth + 1;
        let id = self.nodes.push(Node {
            value,
            parent: Some(parent),
            children: vec![],
            depth,
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    pub fn value_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id].value
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Ancestors of `id`, nearest first. Does not include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id].parent, |&id| self.nodes[id].parent)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        self.nodes.iter_enumerated()
    }

    /// Node ids grouped by depth, each level in child order.
    pub fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels = vec![vec![self.root()]];

        loop {
            let next: Vec<NodeId> = levels[levels.len() - 1]
                .iter()
                .flat_map(|&id| self.children(id).iter().copied())
                .collect();

            if next.is_empty() {
                return levels;
            }

            levels.push(next);
        }
    }

    fn eq_at(&self, id: NodeId, other: &Tree<T>, other_id: NodeId) -> bool
    where
        T: PartialEq,
    {
        let a = &self.nodes[id];
        let b = &other.nodes[other_id];

        a.value == b.value
            && a.children.len() == b.children.len()
            && a
                .children
                .iter()
                .zip(&b.children)
                .all(|(&a, &b)| self.eq_at(a, other, b))
    }
}

/// Structural equality: same values in the same shape, regardless of how
/// ids were assigned.
impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Tree<T>) -> bool {
        self.eq_at(self.root(), other, other.root())
    }
}

impl<T> ops::Index<NodeId> for Tree<T> {
    type Output = Node<T>;

    fn index(&self, index: NodeId) -> &Node<T> {
        &self.nodes[index]
    }
}

/// Maps `tree` breadth first, yielding a snapshot after every level.
///
/// The root is mapped with no parent. Every following round maps all
/// children of the previous round's nodes concurrently, passing each the
/// already-mapped output of its parent, and yields once the whole round has
/// completed. A tree with `n` levels yields exactly `n` snapshots.
///
/// If any mapping in a round fails, the rest of the round still runs to
/// completion; the stream then yields the first error and ends.
pub fn map_tree<'a, T, U, F, Fut>(
    tree: &'a Tree<T>,
    f: F,
) -> impl Stream<Item = Result<Snapshot<U>>> + 'a
where
    T: 'a,
    U: Clone + 'a,
    F: Fn(&T, Option<&U>) -> Fut + 'a,
    Fut: Future<Output = Result<U>> + 'a,
{
    async_stream::try_stream! {
        let root = tree.root();
        let mut out = Tree::new(f(&tree[root].value, None).await?);

        yield Snapshot {
            tree: out.clone(),
            round: vec![out.root()],
        };

        // (input node, output node) pairs mapped in the previous round
        let mut frontier = vec![(root, out.root())];

        loop {
            let pending: Vec<(NodeId, NodeId)> = frontier
                .iter()
                .flat_map(|&(src, dst)| tree.children(src).iter().map(move |&child| (child, dst)))
                .collect();

            if pending.is_empty() {
                break;
            }

            let results = join_all(
                pending
                    .iter()
                    .map(|&(src, parent)| f(&tree[src].value, Some(&out[parent].value))),
            )
            .await;

            let mut next = Vec::with_capacity(pending.len());
            for (&(src, parent), result) in pending.iter().zip(results) {
                next.push((src, out.push_child(parent, result?)));
            }

            yield Snapshot {
                tree: out.clone(),
                round: next.iter().map(|&(_, id)| id).collect(),
            };

            frontier = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_child_order() {
        let mut tree = Tree::new("a");
        let b = tree.push_child(tree.root(), "b");
        let c = tree.push_child(tree.root(), "c");
        let d = tree.push_child(c, "d");
        let e = tree.push_child(b, "e");

        assert_eq!(tree.levels(), vec![vec![tree.root()], vec![b, c], vec![e, d]]);
        assert_eq!(tree[d].depth, 2);
        assert_eq!(tree.ancestors(d).collect::<Vec<_>>(), vec![c, tree.root()]);
    }

    #[test]
    fn structural_equality_ignores_ids() {
        let mut a = Tree::new(0);
        let a1 = a.push_child(a.root(), 1);
        a.push_child(a.root(), 2);
        a.push_child(a1, 3);

        // Same shape, ids assigned breadth first
        let mut b = Tree::new(0);
        let b1 = b.push_child(b.root(), 1);
        b.push_child(b.root(), 2);
        b.push_child(b1, 3);
        assert!(a == b);

        let mut c = Tree::new(0);
        c.push_child(c.root(), 1);
        let c2 = c.push_child(c.root(), 2);
        c.push_child(c2, 3);
        assert!(a != c);
    }
}
