//! Oracle over an explicit list of valid outcome vectors.

use crate::domain::price;
use crate::error::{ProjectionError, Result, SolverError};
use crate::port::outbound::oracle::Oracle;

/// Enumerates every valid outcome vector and returns the first minimizer.
///
/// Suited to small combinatorial markets where the outcome set can be
/// listed; larger markets should use an integer-program oracle.
#[derive(Debug, Clone)]
pub struct VertexOracle {
    vertices: Vec<Vec<f64>>,
}

impl VertexOracle {
    /// Create from a non-empty list of equal-length vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a vertex is empty or
    /// non-finite, or lengths differ.
    pub fn new(vertices: Vec<Vec<f64>>) -> Result<Self> {
        let first = vertices.first().ok_or(ProjectionError::Empty)?;
        for vertex in &vertices {
            price::validate(vertex)?;
            price::ensure_same_len(first, vertex)?;
        }
        Ok(Self { vertices })
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.vertices[0].len()
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vec<f64>] {
        &self.vertices
    }
}

impl Oracle for VertexOracle {
    fn name(&self) -> &'static str {
        "vertex"
    }

    fn solve(&self, gradient: &[f64]) -> Result<Vec<f64>> {
        if gradient.len() != self.dimension() {
            return Err(SolverError::OracleDimension {
                expected: self.dimension(),
                actual: gradient.len(),
            }
            .into());
        }
        let scores: Vec<f64> = self
            .vertices
            .iter()
            .map(|v| price::dot(gradient, v))
            .collect();
        let index = super::argmin(&scores)
            .ok_or_else(|| SolverError::OracleFailed("no finite vertex score".into()))?;
        Ok(self.vertices[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implication() -> VertexOracle {
        VertexOracle::new(vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0]]).unwrap()
    }

    #[test]
    fn returns_minimizing_vertex() {
        let oracle = implication();
        assert_eq!(oracle.solve(&[0.5, -1.0]).unwrap(), vec![1.0, 1.0]);
        assert_eq!(oracle.solve(&[-0.5, 1.0]).unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn first_vertex_wins_ties() {
        assert_eq!(implication().solve(&[0.0, 0.0]).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn rejects_ragged_vertices() {
        assert!(VertexOracle::new(vec![vec![0.0], vec![1.0, 0.0]]).is_err());
        assert!(VertexOracle::new(vec![]).is_err());
    }

    #[test]
    fn dimension_mismatch_is_oracle_error() {
        assert!(implication().solve(&[0.0]).is_err());
    }
}
