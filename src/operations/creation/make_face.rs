use crate::error::{OperationError, Result, TopologyError};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{FaceData, FaceId, Shape, TopologyStore, WireId};
use crate::traversal::WireExplorer;

/// Creates a planar face from a closed outer wire and optional inner
/// wires (holes).
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
        }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WireNotClosed`] if any boundary wire is
    /// open, and [`OperationError::Failed`] if the boundary polygon is
    /// degenerate.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        if !store.wire(self.outer_wire)?.is_closed {
            return Err(TopologyError::WireNotClosed.into());
        }
        for &inner in &self.inner_wires {
            if !store.wire(inner)?.is_closed {
                return Err(TopologyError::WireNotClosed.into());
            }
        }

        let points = collect_wire_points(store, self.outer_wire)?;
        let normal = newell_normal(&points)?;

        Ok(store.add_face(FaceData {
            normal,
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
            same_sense: true,
        }))
    }
}

/// Collects corner positions of a wire in connectivity order, so the
/// polygon is well formed even when the stored edge list is not.
pub(crate) fn collect_wire_points(store: &TopologyStore, wire_id: WireId) -> Result<Vec<Point3>> {
    WireExplorer::new(store, Shape::wire(wire_id))?
        .ordered_vertices()?
        .map(|corner| -> Result<Point3> { Ok(store.vertex(corner.as_vertex()?)?.point) })
        .collect()
}

/// Computes the unit normal of a polygon using Newell's method.
pub(crate) fn newell_normal(points: &[Point3]) -> Result<Vector3> {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(
            OperationError::Failed("degenerate polygon: cannot compute normal".into()).into(),
        );
    }
    Ok(normal / len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::operations::creation::MakeWire;
    use crate::topology::WireData;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn ccw_square_has_positive_z_normal() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();

        let normal = store.face(face).unwrap().normal;
        assert_relative_eq!(normal.x, 0.0);
        assert_relative_eq!(normal.y, 0.0);
        assert_relative_eq!(normal.z, 1.0);
    }

    #[test]
    fn shuffled_edge_list_still_yields_plane_normal() {
        // The stored edge order is scrambled; the corner polygon must
        // come from connectivity order, keeping the normal intact.
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let mut edges = store.wire(wire).unwrap().edges.clone();
        edges.swap(1, 3);
        let shuffled = store.add_wire(WireData {
            edges,
            is_closed: true,
        });

        let face = MakeFace::new(shuffled, vec![]).execute(&mut store).unwrap();
        let normal = store.face(face).unwrap().normal;
        assert_relative_eq!(normal.z, 1.0);
    }

    #[test]
    fn open_wire_returns_wire_not_closed() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();

        let err = MakeFace::new(wire, vec![]).execute(&mut store).unwrap_err();
        assert!(matches!(
            err,
            crate::error::StrakeError::Topology(TopologyError::WireNotClosed)
        ));
    }

    #[test]
    fn face_with_hole_keeps_inner_wires() {
        let mut store = TopologyStore::new();
        let outer = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(4.0, 4.0, 0.0), p(0.0, 4.0, 0.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let inner = MakeWire::new(
            vec![p(1.0, 1.0, 0.0), p(3.0, 1.0, 0.0), p(3.0, 3.0, 0.0), p(1.0, 3.0, 0.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();

        let face = MakeFace::new(outer, vec![inner]).execute(&mut store).unwrap();
        assert_eq!(store.face(face).unwrap().inner_wires, vec![inner]);
    }
}
