//! Road network model backing the planner.
//!
//! The network is a dense N×N matrix of non-negative distances. A distance of
//! `0.0` encodes "no edge" — the representation cannot express a true
//! zero-length edge. This convention is inherited from the adjacency-matrix
//! input format and is relied upon throughout the planner.

use std::path::Path;

use crate::error::{Error, Result};

/// Node identifier within a [`RoadGrid`]; valid values are `0..grid.node_count()`.
pub type NodeId = usize;

/// Immutable N×N road network loaded from an adjacency matrix.
#[derive(Debug, Clone)]
pub struct RoadGrid {
    nodes: usize,
    distances: Vec<f64>,
}

impl RoadGrid {
    /// Build a grid from parsed matrix rows, validating squareness.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let nodes = rows.len();
        let values: usize = rows.iter().map(Vec::len).sum();
        if values != nodes * nodes {
            return Err(Error::NonSquareMatrix { rows: nodes, values });
        }

        let distances = rows.into_iter().flatten().collect();
        Ok(Self { nodes, distances })
    }

    /// Parse a whitespace-separated adjacency matrix, one row per line.
    pub fn parse(input: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for line in input.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for token in line.split_whitespace() {
                let value: f64 = token.parse().map_err(|_| Error::InvalidMatrixEntry {
                    value: token.to_string(),
                    message: "not a number".to_string(),
                })?;
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidMatrixEntry {
                        value: token.to_string(),
                        message: "distances must be finite and non-negative".to_string(),
                    });
                }
                row.push(value);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Number of nodes in the grid.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Distance of the directed edge `(u, v)`; `0.0` means no edge.
    pub fn distance(&self, u: NodeId, v: NodeId) -> f64 {
        self.distances[u * self.nodes + v]
    }

    /// Validate that a node identifier addresses this grid.
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if node >= self.nodes {
            return Err(Error::NodeOutOfRange {
                node,
                nodes: self.nodes,
            });
        }
        Ok(())
    }

    /// Outgoing neighbours of `u` in ascending node order, skipping absent
    /// edges. Ascending order keeps downstream tie-breaking deterministic.
    pub fn neighbours(&self, u: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let row = &self.distances[u * self.nodes..(u + 1) * self.nodes];
        row.iter()
            .copied()
            .enumerate()
            .filter(|&(_, distance)| distance != 0.0)
    }
}

/// Load a [`RoadGrid`] from an adjacency matrix file.
pub fn load_grid(path: impl AsRef<Path>) -> Result<RoadGrid> {
    let contents = std::fs::read_to_string(path)?;
    RoadGrid::parse(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_square_matrix() {
        let grid = RoadGrid::parse("0 5\n5 0\n").expect("square matrix parses");
        assert_eq!(grid.node_count(), 2);
        assert_eq!(grid.distance(0, 1), 5.0);
        assert_eq!(grid.distance(1, 0), 5.0);
    }

    #[test]
    fn parse_rejects_non_square_matrix() {
        let error = RoadGrid::parse("0 5 1\n5 0 2\n").expect_err("two rows of three");
        assert!(matches!(
            error,
            Error::NonSquareMatrix { rows: 2, values: 6 }
        ));
    }

    #[test]
    fn parse_rejects_negative_distance() {
        let error = RoadGrid::parse("0 -1\n1 0\n").expect_err("negative distance");
        assert!(matches!(error, Error::InvalidMatrixEntry { .. }));
    }

    #[test]
    fn parse_skips_blank_lines() {
        let grid = RoadGrid::parse("0 1\n\n1 0\n").expect("blank line ignored");
        assert_eq!(grid.node_count(), 2);
    }

    #[test]
    fn neighbours_skip_zero_entries() {
        let grid = RoadGrid::parse("0 3 0\n3 0 4\n0 4 0\n").expect("parses");
        let edges: Vec<_> = grid.neighbours(1).collect();
        assert_eq!(edges, vec![(0, 3.0), (2, 4.0)]);
    }

    #[test]
    fn check_node_rejects_out_of_range() {
        let grid = RoadGrid::parse("0 1\n1 0\n").expect("parses");
        assert!(grid.check_node(1).is_ok());
        assert!(matches!(
            grid.check_node(2),
            Err(Error::NodeOutOfRange { node: 2, nodes: 2 })
        ));
    }
}
