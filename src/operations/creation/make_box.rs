use std::collections::HashMap;

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::operations::creation::make_face::newell_normal;
use crate::topology::{
    EdgeData, EdgeId, FaceData, OrientedEdge, ShellData, SolidData, SolidId, TopologyStore,
    VertexData, VertexId, WireData,
};

/// Corner loops of the six box faces, as indices into the vertex table
/// (bit 0 = x at max, bit 1 = y at max, bit 2 = z at max). Each loop is
/// counter-clockwise when seen from outside the box, so the two faces
/// sharing an edge always traverse it in opposite directions.
const FACE_LOOPS: [[usize; 4]; 6] = [
    [0, 2, 3, 1], // bottom, z at min
    [4, 5, 7, 6], // top, z at max
    [0, 1, 5, 4], // front, y at min
    [2, 6, 7, 3], // back, y at max
    [0, 4, 6, 2], // left, x at min
    [1, 3, 7, 5], // right, x at max
];

/// Creates a box solid from two corner points: 8 vertices, 12 edges,
/// 6 faces, one closed shell.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation, creating the box in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the box extent is
    /// degenerate along any axis.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let extent = self.max_corner - self.min_corner;
        if extent.x < TOLERANCE || extent.y < TOLERANCE || extent.z < TOLERANCE {
            return Err(
                OperationError::InvalidInput("box extent is degenerate along an axis".into())
                    .into(),
            );
        }

        let corners: Vec<Point3> = (0..8)
            .map(|i| {
                Point3::new(
                    if i & 1 == 0 { self.min_corner.x } else { self.max_corner.x },
                    if i & 2 == 0 { self.min_corner.y } else { self.max_corner.y },
                    if i & 4 == 0 { self.min_corner.z } else { self.max_corner.z },
                )
            })
            .collect();
        let vertices: Vec<VertexId> = corners
            .iter()
            .map(|&point| store.add_vertex(VertexData::new(point)))
            .collect();

        // Shared edge table: each of the 12 edges is created once; the
        // second face that needs it picks up the reversed occurrence.
        let mut edge_table: HashMap<(usize, usize), (EdgeId, bool)> = HashMap::new();
        let mut faces = Vec::with_capacity(FACE_LOOPS.len());
        for loop_indices in FACE_LOOPS {
            let mut edges = Vec::with_capacity(loop_indices.len());
            for i in 0..loop_indices.len() {
                let a = loop_indices[i];
                let b = loop_indices[(i + 1) % loop_indices.len()];
                let known = edge_table.get(&(a, b)).copied();
                let (edge, forward) = match known {
                    Some(entry) => entry,
                    None => {
                        let edge = store.add_edge(EdgeData::new(vertices[a], vertices[b]));
                        edge_table.insert((a, b), (edge, true));
                        edge_table.insert((b, a), (edge, false));
                        (edge, true)
                    }
                };
                edges.push(OrientedEdge::new(edge, forward));
            }
            let wire = store.add_wire(WireData::new(edges, true));

            let points: Vec<Point3> = loop_indices.iter().map(|&i| corners[i]).collect();
            let normal = newell_normal(&points)?;
            faces.push(store.add_face(FaceData {
                normal,
                outer_wire: wire,
                inner_wires: vec![],
                same_sense: true,
            }));
        }

        let shell = store.add_shell(ShellData::new(faces, true));
        let solid = store.add_solid(SolidData::new(shell, vec![]));
        debug!(?solid, "built box solid");
        Ok(solid)
    }
}
