use crate::error::{OperationError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{EdgeData, OrientedEdge, TopologyStore, VertexData, VertexId, WireData, WireId};

/// Creates a polygonal wire from a sequence of 3D points.
pub struct MakeWire {
    points: Vec<Point3>,
    close: bool,
}

impl MakeWire {
    /// Creates a new `MakeWire` operation. If `close` is set, an extra
    /// edge from the last point back to the first closes the loop.
    #[must_use]
    pub fn new(points: Vec<Point3>, close: bool) -> Self {
        Self { points, close }
    }

    /// Executes the operation, creating the wire in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if fewer than two points
    /// are given, or if any segment (including the closing one) would be
    /// degenerate.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<WireId> {
        if self.points.len() < 2 {
            return Err(
                OperationError::InvalidInput("a wire needs at least two points".into()).into(),
            );
        }
        for pair in self.points.windows(2) {
            if (pair[1] - pair[0]).norm() < TOLERANCE {
                return Err(OperationError::InvalidInput(
                    "degenerate wire segment between coincident points".into(),
                )
                .into());
            }
        }
        if self.close {
            let first = self.points[0];
            let last = self.points[self.points.len() - 1];
            if (last - first).norm() < TOLERANCE {
                return Err(OperationError::InvalidInput(
                    "closing segment is degenerate: last point coincides with first".into(),
                )
                .into());
            }
        }

        let vertices: Vec<VertexId> = self
            .points
            .iter()
            .map(|&point| store.add_vertex(VertexData::new(point)))
            .collect();

        let mut edges = Vec::with_capacity(vertices.len());
        for pair in vertices.windows(2) {
            let edge = store.add_edge(EdgeData::new(pair[0], pair[1]));
            edges.push(OrientedEdge::new(edge, true));
        }
        if self.close {
            let edge = store.add_edge(EdgeData::new(vertices[vertices.len() - 1], vertices[0]));
            edges.push(OrientedEdge::new(edge, true));
        }

        Ok(store.add_wire(WireData::new(edges, self.close)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn closed_wire_has_one_edge_per_point() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();

        let data = store.wire(wire).unwrap();
        assert_eq!(data.edges.len(), 3);
        assert!(data.is_closed);
    }

    #[test]
    fn open_wire_has_one_edge_less_than_points() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();

        let data = store.wire(wire).unwrap();
        assert_eq!(data.edges.len(), 2);
        assert!(!data.is_closed);
    }

    #[test]
    fn single_point_returns_error() {
        let mut store = TopologyStore::new();
        let result = MakeWire::new(vec![p(0.0, 0.0, 0.0)], false).execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn coincident_points_return_error() {
        let mut store = TopologyStore::new();
        let result = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)],
            false,
        )
        .execute(&mut store);
        assert!(result.is_err());
    }
}
