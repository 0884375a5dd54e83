use std::collections::HashSet;

use crate::error::Result;
use crate::topology::{EdgeId, Orientation, Shape, TopologyStore, VertexId, WireId};

/// Traverses a single wire and yields its edges or vertices in
/// connectivity order, i.e. the order in which they physically link up
/// to form the loop, rather than the store's native enumeration order.
///
/// Each call to [`WireExplorer::ordered_edges`] or
/// [`WireExplorer::ordered_vertices`] computes a fresh traversal, so an
/// exhausted iterator can be re-obtained from the same explorer and will
/// reproduce the identical sequence.
#[derive(Debug)]
pub struct WireExplorer<'a> {
    store: &'a TopologyStore,
    wire: WireId,
}

impl<'a> WireExplorer<'a> {
    /// Creates an explorer for the given wire shape.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TopologyError::WrongTopologicalType`] if
    /// the shape is not a wire. The check happens before any traversal
    /// starts.
    pub fn new(store: &'a TopologyStore, shape: Shape) -> Result<Self> {
        let wire = shape.as_wire()?;
        Ok(Self { store, wire })
    }

    /// The wire being explored.
    #[must_use]
    pub fn wire(&self) -> WireId {
        self.wire
    }

    /// Edges of the wire in connectivity order, each exactly once.
    ///
    /// The orientation of each yielded edge is the orientation in which
    /// the traversal crosses it, so consecutive edges always share an
    /// endpoint vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is not found in
    /// the store.
    pub fn ordered_edges(&self) -> Result<impl Iterator<Item = Shape>> {
        let chain = self.chained_edges()?;
        let shapes: Vec<Shape> = chain
            .into_iter()
            .map(|(edge, orientation)| Shape::edge(edge).oriented(orientation))
            .collect();
        Ok(shapes.into_iter())
    }

    /// Vertices of the wire in connectivity order, deduplicated by
    /// structural identity.
    ///
    /// A closed wire of N edges yields N vertices; an open wire yields
    /// N + 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is not found in
    /// the store.
    pub fn ordered_vertices(&self) -> Result<impl Iterator<Item = Shape>> {
        let chain = self.chained_edges()?;
        let mut seen: HashSet<VertexId> = HashSet::new();
        let mut vertices: Vec<Shape> = Vec::with_capacity(chain.len() + 1);
        for &(edge, orientation) in &chain {
            let (head, tail) = self.endpoints(edge, orientation)?;
            if seen.insert(head) {
                vertices.push(Shape::vertex(head));
            }
            // The tail of the last edge closes the loop for a closed
            // wire; for an open wire it is a new corner.
            if seen.insert(tail) {
                vertices.push(Shape::vertex(tail));
            }
        }
        Ok(vertices.into_iter())
    }

    /// Number of edges yielded by [`WireExplorer::ordered_edges`].
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is not found in
    /// the store.
    pub fn number_of_ordered_edges(&self) -> Result<usize> {
        Ok(self.ordered_edges()?.count())
    }

    /// Number of vertices yielded by [`WireExplorer::ordered_vertices`].
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is not found in
    /// the store.
    pub fn number_of_ordered_vertices(&self) -> Result<usize> {
        Ok(self.ordered_vertices()?.count())
    }

    /// Endpoints of an edge in traversal order under the given
    /// orientation.
    fn endpoints(
        &self,
        edge: EdgeId,
        orientation: Orientation,
    ) -> Result<(VertexId, VertexId)> {
        let data = self.store.edge(edge)?;
        Ok(match orientation {
            Orientation::Forward => (data.start, data.end),
            Orientation::Reversed => (data.end, data.start),
        })
    }

    /// Chains the wire's edges by shared endpoint vertices, starting
    /// from the first stored edge. Each edge appears at most once; the
    /// stored orientation is preferred, flipping only when the chain
    /// would otherwise break.
    fn chained_edges(&self) -> Result<Vec<(EdgeId, Orientation)>> {
        let data = self.store.wire(self.wire)?;
        let mut chain: Vec<(EdgeId, Orientation)> = Vec::with_capacity(data.edges.len());
        let mut used: HashSet<EdgeId> = HashSet::new();

        let Some(first) = data.edges.first() else {
            return Ok(chain);
        };
        let first_orientation = first.orientation();
        let (_, mut cursor) = self.endpoints(first.edge, first_orientation)?;
        chain.push((first.edge, first_orientation));
        used.insert(first.edge);

        loop {
            let mut next: Option<(EdgeId, Orientation)> = None;
            for oriented in &data.edges {
                if used.contains(&oriented.edge) {
                    continue;
                }
                let stored = oriented.orientation();
                let (head, tail) = self.endpoints(oriented.edge, stored)?;
                if head == cursor {
                    next = Some((oriented.edge, stored));
                    break;
                }
                if tail == cursor && next.is_none() {
                    next = Some((oriented.edge, stored.reversed()));
                }
            }
            let Some((edge, orientation)) = next else {
                break;
            };
            let (_, tail) = self.endpoints(edge, orientation)?;
            chain.push((edge, orientation));
            used.insert(edge);
            cursor = tail;
        }

        Ok(chain)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{StrakeError, TopologyError};
    use crate::math::Point3;
    use crate::operations::creation::{MakeFace, MakeWire};
    use crate::topology::{OrientedEdge, WireData};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn rectangle(store: &mut TopologyStore) -> WireId {
        MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
            true,
        )
        .execute(store)
        .unwrap()
    }

    // ── Ordered edges ──────────────────────────────────────────

    #[test]
    fn rectangle_yields_four_connected_edges() {
        let mut store = TopologyStore::new();
        let wire = rectangle(&mut store);

        let explorer = WireExplorer::new(&store, Shape::wire(wire)).unwrap();
        let edges: Vec<Shape> = explorer.ordered_edges().unwrap().collect();
        assert_eq!(edges.len(), 4);

        // Each edge appears exactly once.
        for (i, a) in edges.iter().enumerate() {
            for b in &edges[i + 1..] {
                assert!(!a.is_same(*b));
            }
        }

        // Consecutive edges (including the closing pair) share exactly
        // one endpoint vertex.
        for i in 0..edges.len() {
            let a = edges[i];
            let b = edges[(i + 1) % edges.len()];
            let ea = store.edge(a.as_edge().unwrap()).unwrap();
            let eb = store.edge(b.as_edge().unwrap()).unwrap();
            let shared = [ea.start, ea.end]
                .iter()
                .filter(|v| **v == eb.start || **v == eb.end)
                .count();
            assert_eq!(shared, 1, "edges {i} and {} must share one vertex", (i + 1) % 4);
        }
    }

    #[test]
    fn traversal_chains_shuffled_edges() {
        // A wire whose edge list is not stored in connection order:
        // the explorer must still chain them by shared vertices.
        let mut store = TopologyStore::new();
        let wire = rectangle(&mut store);
        let mut edges = store.wire(wire).unwrap().edges.clone();
        edges.swap(1, 3);
        let shuffled = store.add_wire(WireData {
            edges,
            is_closed: true,
        });

        let explorer = WireExplorer::new(&store, Shape::wire(shuffled)).unwrap();
        let chained: Vec<Shape> = explorer.ordered_edges().unwrap().collect();
        assert_eq!(chained.len(), 4);
        for i in 0..4 {
            let a = store.edge(chained[i].as_edge().unwrap()).unwrap();
            let b = store.edge(chained[(i + 1) % 4].as_edge().unwrap()).unwrap();
            let shared = [a.start, a.end]
                .iter()
                .filter(|v| **v == b.start || **v == b.end)
                .count();
            assert_eq!(shared, 1);
        }
    }

    #[test]
    fn duplicate_edge_entries_are_deduplicated() {
        let mut store = TopologyStore::new();
        let wire = rectangle(&mut store);
        let mut edges = store.wire(wire).unwrap().edges.clone();
        let dup = edges[0];
        edges.push(OrientedEdge::new(dup.edge, dup.forward));
        let redundant = store.add_wire(WireData {
            edges,
            is_closed: true,
        });

        let explorer = WireExplorer::new(&store, Shape::wire(redundant)).unwrap();
        assert_eq!(explorer.number_of_ordered_edges().unwrap(), 4);
    }

    // ── Ordered vertices ───────────────────────────────────────

    #[test]
    fn closed_wire_yields_one_vertex_per_edge() {
        let mut store = TopologyStore::new();
        let wire = rectangle(&mut store);

        let explorer = WireExplorer::new(&store, Shape::wire(wire)).unwrap();
        let vertices: Vec<Shape> = explorer.ordered_vertices().unwrap().collect();
        assert_eq!(vertices.len(), 4);
        assert_eq!(
            store
                .vertex(vertices[0].as_vertex().unwrap())
                .unwrap()
                .point,
            p(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn open_wire_yields_one_more_vertex_than_edges() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();

        let explorer = WireExplorer::new(&store, Shape::wire(wire)).unwrap();
        assert_eq!(explorer.number_of_ordered_edges().unwrap(), 2);
        assert_eq!(explorer.number_of_ordered_vertices().unwrap(), 3);
    }

    // ── Restart ────────────────────────────────────────────────

    #[test]
    fn restarted_traversal_reproduces_the_sequence() {
        let mut store = TopologyStore::new();
        let wire = rectangle(&mut store);

        let explorer = WireExplorer::new(&store, Shape::wire(wire)).unwrap();
        let first: Vec<Shape> = explorer.ordered_edges().unwrap().collect();
        let second: Vec<Shape> = explorer.ordered_edges().unwrap().collect();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert!(a.is_equal(*b));
        }
    }

    // ── Wrong input kind ───────────────────────────────────────

    #[test]
    fn rejects_non_wire_input() {
        let mut store = TopologyStore::new();
        let wire = rectangle(&mut store);
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();

        let err = WireExplorer::new(&store, Shape::face(face)).unwrap_err();
        assert!(matches!(
            err,
            StrakeError::Topology(TopologyError::WrongTopologicalType { expected: "wire", .. })
        ));
    }
}
