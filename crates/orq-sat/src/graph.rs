//! Simple undirected graphs for the reductions.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::error::{SatError, SatResult};

/// A simple undirected graph over vertices `0..n`.
///
/// Self-loops and parallel edges are rejected. Edges keep their insertion
/// order, which fixes the clause order of every reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EdgeList", into = "EdgeList")]
pub struct Graph {
    inner: UnGraph<(), ()>,
}

/// Serialized form: `{ "vertices": n, "edges": [[u, v], ...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeList {
    /// Vertex count.
    pub vertices: usize,
    /// Edge list over `0..vertices`.
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Create an edgeless graph with `n` vertices.
    pub fn new(n: usize) -> Self {
        let mut inner = UnGraph::with_capacity(n, 0);
        for _ in 0..n {
            inner.add_node(());
        }
        Self { inner }
    }

    /// Create a graph from an edge list.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> SatResult<Self> {
        let mut graph = Self::new(n);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// The complete graph `K_n`.
    pub fn complete(n: usize) -> Self {
        let mut graph = Self::new(n);
        for u in 0..n {
            for v in u + 1..n {
                graph.inner.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
            }
        }
        graph
    }

    /// The cycle `C_n` (`n >= 3`).
    pub fn cycle(n: usize) -> SatResult<Self> {
        if n < 3 {
            return Err(SatError::InvalidGraph(format!(
                "a cycle needs at least 3 vertices, got {n}"
            )));
        }
        let edges: Vec<_> = (0..n).map(|v| (v, (v + 1) % n)).collect();
        Self::from_edges(n, &edges)
    }

    /// Add an undirected edge.
    pub fn add_edge(&mut self, u: usize, v: usize) -> SatResult<()> {
        let n = self.num_vertices();
        if u >= n || v >= n {
            return Err(SatError::InvalidGraph(format!(
                "edge ({u}, {v}) references a vertex outside 0..{n}"
            )));
        }
        if u == v {
            return Err(SatError::InvalidGraph(format!("self-loop on vertex {u}")));
        }
        if self.has_edge(u, v) {
            return Err(SatError::InvalidGraph(format!("duplicate edge ({u}, {v})")));
        }
        self.inner.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
        Ok(())
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.inner.edge_count()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.inner
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
    }

    /// Whether `u` and `v` are adjacent. Out-of-range vertices are never adjacent.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        let n = self.num_vertices();
        u < n && v < n && self.inner.contains_edge(NodeIndex::new(u), NodeIndex::new(v))
    }

    /// Neighbours of `v`, sorted.
    pub fn neighbors(&self, v: usize) -> Vec<usize> {
        if v >= self.num_vertices() {
            return vec![];
        }
        let mut out: Vec<_> = self
            .inner
            .neighbors(NodeIndex::new(v))
            .map(NodeIndex::index)
            .collect();
        out.sort_unstable();
        out
    }

    /// Whether no two vertices of `set` are adjacent.
    pub fn is_independent_set(&self, set: &[usize]) -> bool {
        pairs(set).all(|(u, v)| !self.has_edge(u, v))
    }

    /// Whether all vertices of `set` are distinct and pairwise adjacent.
    pub fn is_clique(&self, set: &[usize]) -> bool {
        pairs(set).all(|(u, v)| self.has_edge(u, v))
    }

    /// Size of the largest clique, by exhaustive search.
    ///
    /// Exponential in the vertex count; intended for test-sized graphs.
    pub fn max_clique_size(&self) -> usize {
        let mut best = 0;
        let mut current = Vec::new();
        self.extend_clique(0, &mut current, &mut best);
        best
    }

    fn extend_clique(&self, start: usize, current: &mut Vec<usize>, best: &mut usize) {
        *best = (*best).max(current.len());
        for v in start..self.num_vertices() {
            if current.iter().all(|&u| self.has_edge(u, v)) {
                current.push(v);
                self.extend_clique(v + 1, current, best);
                current.pop();
            }
        }
    }
}

fn pairs(set: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    set.iter()
        .enumerate()
        .flat_map(move |(i, &u)| set[i + 1..].iter().map(move |&v| (u, v)))
}

impl TryFrom<EdgeList> for Graph {
    type Error = SatError;

    fn try_from(list: EdgeList) -> SatResult<Self> {
        Self::from_edges(list.vertices, &list.edges)
    }
}

impl From<Graph> for EdgeList {
    fn from(graph: Graph) -> Self {
        EdgeList {
            vertices: graph.num_vertices(),
            edges: graph.edges().collect(),
        }
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.num_vertices() == other.num_vertices() && self.edges().eq(other.edges())
    }
}

impl Eq for Graph {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        let g = Graph::complete(3);
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 3);
        assert!(g.has_edge(2, 0));
        assert_eq!(g.neighbors(1), vec![0, 2]);
        assert_eq!(g.max_clique_size(), 3);
    }

    #[test]
    fn test_rejects_bad_edges() {
        assert!(Graph::from_edges(2, &[(0, 0)]).is_err());
        assert!(Graph::from_edges(2, &[(0, 1), (1, 0)]).is_err());
        assert!(Graph::from_edges(2, &[(0, 2)]).is_err());
    }

    #[test]
    fn test_edge_order_preserved() {
        let g = Graph::from_edges(4, &[(2, 3), (0, 1), (1, 2)]).unwrap();
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(2, 3), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_cycle_and_cliques() {
        let c5 = Graph::cycle(5).unwrap();
        assert_eq!(c5.num_edges(), 5);
        assert_eq!(c5.max_clique_size(), 2);
        assert!(c5.is_independent_set(&[0, 2]));
        assert!(!c5.is_independent_set(&[0, 1]));
        assert!(c5.is_clique(&[3, 4]));
        assert!(!c5.is_clique(&[0, 2]));
        assert!(Graph::cycle(2).is_err());
    }

    #[test]
    fn test_edgeless() {
        let g = Graph::new(3);
        assert_eq!(g.max_clique_size(), 1);
        assert_eq!(Graph::new(0).max_clique_size(), 0);
        assert!(g.is_independent_set(&[0, 1, 2]));
    }

    #[test]
    fn test_serde() {
        let g: Graph = serde_json::from_str(r#"{"vertices":3,"edges":[[0,1],[1,2]]}"#).unwrap();
        assert_eq!(g.num_edges(), 2);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"vertices":3,"edges":[[0,1],[1,2]]}"#);

        let bad: Result<Graph, _> = serde_json::from_str(r#"{"vertices":2,"edges":[[0,0]]}"#);
        assert!(bad.is_err());
    }
}
