use alloc::vec::Vec;

use crate::*;

/// Index of a node inside its [`SearchTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Where the search started.
    Root,
    /// Resting point reached by one slide.
    Slide,
    /// Obstacle broken on the way to the next slide node.
    Impact,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub value: Point,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Flat BFS tree; nodes refer to each other by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new(root: Point) -> Self {
        Self {
            nodes: alloc::vec![SearchNode {
                value: root,
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Appends a child of `parent` and returns its id.
    pub fn push(&mut self, parent: NodeId, value: Point, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode {
            value,
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Strict ancestors of `id`, nearest first, ending with the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.node(id).parent,
        }
    }

    /// Slides taken from the root to reach `id`.
    pub fn slide_count(&self, id: NodeId) -> usize {
        let own = usize::from(self.node(id).kind == NodeKind::Slide);
        own + self
            .ancestors(id)
            .filter(|&ancestor| self.node(ancestor).kind == NodeKind::Slide)
            .count()
    }

    /// Node values from the root down to `id`, impacts included.
    pub fn path_to(&self, id: NodeId) -> Vec<&SearchNode> {
        let mut path: Vec<_> = self.ancestors(id).map(|ancestor| self.node(ancestor)).collect();
        path.reverse();
        path.push(self.node(id));
        path
    }
}

pub struct Ancestors<'a> {
    tree: &'a SearchTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.node(current).parent;
        Some(current)
    }
}
