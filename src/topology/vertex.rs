use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// Data associated with a topological vertex.
///
/// The vertex is the only entity in this layer carrying geometry
/// directly; every higher entity locates itself through the vertices it
/// ultimately bounds.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// Position of the vertex in model space.
    pub point: Point3,
}

impl VertexData {
    /// Creates a vertex at the given position.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }
}
