use crate::NodeTree;

/// Arena index of a node in a [`NodeGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
struct NodeData {
    text: Option<String>,
    child: Option<NodeId>,
    next: Option<NodeId>,
    prev: Option<NodeId>,
}

/// Arena-backed node graph. Links are set independently and may form cycles.
#[derive(Clone, Debug, Default)]
pub struct NodeGraph {
    nodes: Vec<NodeData>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, text: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            text: text.map(str::to_string),
            ..NodeData::default()
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `false` (and changes nothing) if either id is not in this arena.
    pub fn set_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.link(parent, child, |n, to| n.child = Some(to))
    }

    /// Returns `false` (and changes nothing) if either id is not in this arena.
    pub fn set_next_sibling(&mut self, node: NodeId, next: NodeId) -> bool {
        self.link(node, next, |n, to| n.next = Some(to))
    }

    /// Returns `false` (and changes nothing) if either id is not in this arena.
    pub fn set_prev_sibling(&mut self, node: NodeId, prev: NodeId) -> bool {
        self.link(node, prev, |n, to| n.prev = Some(to))
    }

    /// Link `nodes` as a doubly-linked sibling chain in the given order.
    pub fn chain_siblings(&mut self, nodes: &[NodeId]) -> bool {
        nodes.windows(2).all(|pair| match pair {
            [a, b] => self.set_next_sibling(*a, *b) && self.set_prev_sibling(*b, *a),
            _ => true,
        })
    }

    fn link(&mut self, from: NodeId, to: NodeId, set: impl FnOnce(&mut NodeData, NodeId)) -> bool {
        if to.0 >= self.nodes.len() {
            return false;
        }
        match self.nodes.get_mut(from.0) {
            Some(n) => {
                set(n, to);
                true
            }
            None => false,
        }
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }
}

impl NodeTree for NodeGraph {
    type Node = NodeId;

    fn child(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.child
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.next
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.prev
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node)?.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_to_unknown_ids_are_rejected() {
        let mut g = NodeGraph::new();
        let a = g.add_node(Some("a"));
        let mut other = NodeGraph::new();
        other.add_node(None);
        let foreign = other.add_node(None);

        assert!(!g.set_child(a, foreign));
        assert_eq!(g.child(a), None);
        assert!(g.set_child(a, a));
        assert_eq!(g.child(a), Some(a));
    }

    #[test]
    fn chain_siblings_links_both_directions() {
        let mut g = NodeGraph::new();
        let ids: Vec<_> = (0..3).map(|_| g.add_node(None)).collect();
        assert!(g.chain_siblings(&ids));
        assert_eq!(g.next_sibling(ids[0]), Some(ids[1]));
        assert_eq!(g.prev_sibling(ids[2]), Some(ids[1]));
        assert_eq!(g.prev_sibling(ids[0]), None);
        assert_eq!(g.next_sibling(ids[2]), None);
    }
}
