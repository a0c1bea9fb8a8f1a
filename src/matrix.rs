//! Pairwise distance matrix construction over waypoint addresses.

use rayon::prelude::*;
use tracing::debug;

use crate::traits::{DistanceOracle, OracleError};

/// Square matrix of travel distances between waypoint addresses, indexed by
/// waypoint position.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distance from waypoint `from` to waypoint `to`.
    ///
    /// Panics on out-of-range indices: a matrix whose dimensions disagree
    /// with the waypoint list is a defect in the calling code, not input.
    pub fn between(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Fills the full pairwise matrix by querying the oracle for every ordered
/// pair of distinct addresses. Diagonal entries are zero without a query.
///
/// Rows are filled in parallel; the oracle calls dominate routing latency
/// and are independent of each other. Any oracle failure aborts the whole
/// build: a route computed on a partial matrix could silently make wildly
/// wrong nearest-neighbor choices.
pub fn build_matrix<D>(addresses: &[String], oracle: &D) -> Result<DistanceMatrix, OracleError>
where
    D: DistanceOracle + Sync,
{
    let n = addresses.len();
    debug!(addresses = n, pairs = n * n.saturating_sub(1), "building distance matrix");

    let rows = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut row = Vec::with_capacity(n);
            for j in 0..n {
                if i == j {
                    row.push(0.0);
                } else {
                    row.push(oracle.distance(&addresses[i], &addresses[j])?);
                }
            }
            Ok(row)
        })
        .collect::<Result<Vec<_>, OracleError>>()?;

    Ok(DistanceMatrix::from_rows(rows))
}
