//! Index-based view of a [`Graph`] used by the layout engine.
//!
//! The force simulation works on a flat array of particles, so nodes are
//! addressed by their position in the input rather than by id. This module
//! resolves every edge to a pair of indices once, drops edges whose
//! endpoints are unknown, and builds the undirected adjacency lists the
//! attraction step walks.

use indexmap::IndexMap;
use log::debug;

use trellis_core::{
    graph::{Edge, Graph},
    identifier::Id,
};

/// An edge whose endpoints were both found in the node list.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedEdge<'a> {
    edge: &'a Edge,
    source: usize,
    target: usize,
}

impl<'a> ResolvedEdge<'a> {
    pub fn edge(&self) -> &'a Edge {
        self.edge
    }

    /// Index of the `from` node.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Index of the `to` node.
    pub fn target(&self) -> usize {
        self.target
    }
}

/// A graph with nodes addressed by index.
#[derive(Debug)]
pub struct LayoutGraph<'a> {
    graph: &'a Graph,
    indices: IndexMap<Id, usize>,
    edges: Vec<ResolvedEdge<'a>>,
    adjacency: Vec<Vec<usize>>,
}

impl<'a> LayoutGraph<'a> {
    /// Builds the index view of `graph`.
    ///
    /// When several nodes share an id, edges bind to the last of them.
    pub fn new(graph: &'a Graph) -> Self {
        let mut indices = IndexMap::with_capacity(graph.nodes().len());
        for (index, node) in graph.nodes().iter().enumerate() {
            indices.insert(node.id(), index);
        }

        let mut adjacency = vec![Vec::new(); graph.nodes().len()];
        let mut edges = Vec::with_capacity(graph.edges().len());

        for edge in graph.edges() {
            let (Some(&source), Some(&target)) = (indices.get(&edge.from()), indices.get(&edge.to()))
            else {
                debug!(
                    from = edge.from().to_string(),
                    to = edge.to().to_string();
                    "Skipping edge with unknown endpoint"
                );
                continue;
            };

            // A node exerts no spring force on itself
            if !edge.is_self_loop() {
                adjacency[source].push(target);
                adjacency[target].push(source);
            }
            edges.push(ResolvedEdge {
                edge,
                source,
                target,
            });
        }

        Self {
            graph,
            indices,
            edges,
            adjacency,
        }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.nodes().len()
    }

    /// Index of the last node carrying `id`.
    pub fn index_of(&self, id: Id) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// Indices of the nodes linked to `index`, in either direction.
    ///
    /// A node appears once per linking edge. Self-loops are not listed.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Edges whose endpoints both exist, in input order.
    pub fn edges(&self) -> &[ResolvedEdge<'a>] {
        &self.edges
    }

    /// Number of input edges that were dropped as dangling.
    pub fn dangling_count(&self) -> usize {
        self.graph.edges().len() - self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::graph::Node;

    use super::*;

    fn graph() -> Graph {
        Graph::new(
            vec![Node::new("a", "A"), Node::new("b", "B"), Node::new("c", "C")],
            vec![
                Edge::new("a", "b"),
                Edge::new("b", "c").with_label("next"),
                Edge::new("c", "ghost"),
                Edge::new("a", "a"),
            ],
        )
    }

    #[test]
    fn test_indices_follow_input_order() {
        let graph = graph();
        let layout_graph = LayoutGraph::new(&graph);

        assert_eq!(layout_graph.node_count(), 3);
        assert_eq!(layout_graph.index_of(Id::new("a")), Some(0));
        assert_eq!(layout_graph.index_of(Id::new("c")), Some(2));
        assert_eq!(layout_graph.index_of(Id::new("ghost")), None);
    }

    #[test]
    fn test_adjacency_is_undirected() {
        let graph = graph();
        let layout_graph = LayoutGraph::new(&graph);

        assert_eq!(layout_graph.neighbors(0), &[1]);
        assert_eq!(layout_graph.neighbors(1), &[0, 2]);
        assert_eq!(layout_graph.neighbors(2), &[1]);
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let graph = graph();
        let layout_graph = LayoutGraph::new(&graph);

        assert_eq!(layout_graph.edges().len(), 3);
        assert_eq!(layout_graph.dangling_count(), 1);
        let resolved = layout_graph.edges()[1];
        assert_eq!((resolved.source(), resolved.target()), (1, 2));
        assert_eq!(resolved.edge().label(), Some("next"));
    }

    #[test]
    fn test_duplicate_ids_bind_to_last() {
        let graph = Graph::new(
            vec![Node::new("d", "First"), Node::new("d", "Second"), Node::new("e", "E")],
            vec![Edge::new("d", "e"), Edge::new("d", "d")],
        );
        let layout_graph = LayoutGraph::new(&graph);

        assert_eq!(layout_graph.index_of(Id::new("d")), Some(1));
        assert_eq!(layout_graph.node_count(), 3);
        assert!(layout_graph.neighbors(0).is_empty());
        assert_eq!(layout_graph.neighbors(1), &[2]);
        assert_eq!(layout_graph.neighbors(2), &[1]);

        let resolved = layout_graph.edges()[0];
        assert_eq!((resolved.source(), resolved.target()), (1, 2));
    }
}
