//! The in-memory simple graph handed to the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Anything the serializer can read an adjacency matrix from.
///
/// Implementors promise a simple, loopless, undirected relation over the
/// vertices `0..order()`. The plain [`serialize`](crate::serialize) does not
/// check this; [`serialize_checked`](crate::serialize_checked) does.
pub trait AdjacencySource {
    /// Number of vertices.
    fn order(&self) -> usize;

    /// Whether `u` and `v` are adjacent. Both indices are below `order()`.
    fn has_edge(&self, u: usize, v: usize) -> bool;
}

/// A simple, loopless, unweighted, undirected graph on vertices `0..order`.
///
/// Adjacency is kept as one sorted neighbour set per vertex, so the relation
/// is symmetric and irreflexive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EdgeList", try_from = "EdgeList")]
pub struct Graph {
    neighbours: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `order` isolated vertices.
    pub fn new(order: usize) -> Self {
        Self {
            neighbours: vec![BTreeSet::new(); order],
            edge_count: 0,
        }
    }

    /// Build a graph from an edge list. Duplicate edges collapse.
    pub fn from_edges<I>(order: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(order);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Append a new isolated vertex and return its index.
    pub fn add_vertex(&mut self) -> usize {
        self.neighbours.push(BTreeSet::new());
        self.neighbours.len() - 1
    }

    /// Add the undirected edge `{u, v}`.
    ///
    /// Returns `Ok(false)` if the edge was already present.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool, GraphError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(GraphError::SelfLoop { vertex: u });
        }
        let inserted = self.neighbours[u].insert(v);
        if inserted {
            self.neighbours[v].insert(u);
            self.edge_count += 1;
        }
        Ok(inserted)
    }

    /// Remove the edge `{u, v}`. Returns whether it was present.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        if u >= self.order() || v >= self.order() {
            return false;
        }
        let removed = self.neighbours[u].remove(&v);
        if removed {
            self.neighbours[v].remove(&u);
            self.edge_count -= 1;
        }
        removed
    }

    pub fn order(&self) -> usize {
        self.neighbours.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn degree(&self, vertex: usize) -> Option<usize> {
        self.neighbours.get(vertex).map(BTreeSet::len)
    }

    /// Neighbours of `vertex` in ascending order.
    pub fn neighbours(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbours
            .get(vertex)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Every edge once, as `(u, v)` with `u < v`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbours.iter().enumerate().flat_map(|(u, set)| {
            set.range(u + 1..).map(move |&v| (u, v))
        })
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.order() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                order: self.order(),
            })
        }
    }
}

impl AdjacencySource for Graph {
    fn order(&self) -> usize {
        Graph::order(self)
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.neighbours
            .get(u)
            .is_some_and(|set| set.contains(&v))
    }
}

/// Dense 0/1 matrices read as adjacency sources. Rows must all have
/// `len()` entries; ragged input reads missing cells as non-adjacent.
impl AdjacencySource for Vec<Vec<bool>> {
    fn order(&self) -> usize {
        self.len()
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.get(u)
            .and_then(|row| row.get(v))
            .copied()
            .unwrap_or(false)
    }
}

/// Serde representation: order plus a list of edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeList {
    order: usize,
    edges: Vec<(usize, usize)>,
}

impl From<Graph> for EdgeList {
    fn from(graph: Graph) -> Self {
        Self {
            order: graph.order(),
            edges: graph.edges().collect(),
        }
    }
}

impl TryFrom<EdgeList> for Graph {
    type Error = GraphError;

    fn try_from(list: EdgeList) -> Result<Self, Self::Error> {
        Graph::from_edges(list.order, list.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_is_symmetric() {
        let mut g = Graph::new(3);
        assert!(g.add_edge(0, 2).unwrap());
        assert!(AdjacencySource::has_edge(&g, 0, 2));
        assert!(AdjacencySource::has_edge(&g, 2, 0));
        assert!(!AdjacencySource::has_edge(&g, 0, 1));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn duplicate_edge_collapses() {
        let mut g = Graph::new(2);
        assert!(g.add_edge(0, 1).unwrap());
        assert!(!g.add_edge(1, 0).unwrap());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(0), Some(1));
    }

    #[test]
    fn self_loop_rejected() {
        let mut g = Graph::new(2);
        assert_eq!(g.add_edge(1, 1), Err(GraphError::SelfLoop { vertex: 1 }));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn out_of_range_rejected() {
        let result = Graph::from_edges(2, [(0, 1), (1, 5)]);
        assert_eq!(
            result,
            Err(GraphError::VertexOutOfRange {
                vertex: 5,
                order: 2
            })
        );
    }

    #[test]
    fn remove_edge() {
        let mut g = Graph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
        assert!(g.remove_edge(2, 1));
        assert!(!g.remove_edge(2, 1));
        assert!(!g.remove_edge(0, 9));
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn edges_listed_once_in_order() {
        let g = Graph::from_edges(4, [(3, 0), (1, 2), (0, 1)]).unwrap();
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1), (0, 3), (1, 2)]);
        assert_eq!(g.neighbours(0).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(g.neighbours(7).count(), 0);
    }

    #[test]
    fn add_vertex_extends_order() {
        let mut g = Graph::new(0);
        assert_eq!(g.add_vertex(), 0);
        assert_eq!(g.add_vertex(), 1);
        g.add_edge(0, 1).unwrap();
        assert_eq!(g.order(), 2);
    }

    #[test]
    fn dense_matrix_source() {
        let m = vec![vec![false, true], vec![true, false]];
        assert_eq!(AdjacencySource::order(&m), 2);
        assert!(m.has_edge(1, 0));
        assert!(!m.has_edge(1, 1));
    }
}
