use std::collections::{HashMap, HashSet};

use crate::error::{Result, TopologyError};
use crate::topology::{
    EdgeId, Entity, FaceId, Orientation, Shape, ShapeKind, SolidId, TopologyStore, VertexId,
    WireId,
};

use super::explorer::WireExplorer;

/// Topology traversal from any shape.
///
/// `Topo` enumerates the sub-entities of a requested kind reachable from
/// a root shape and resolves adjacency relationships between kinds that
/// are adjacent in the containment ordering: which faces use an edge,
/// which edges meet at a vertex, which solids a face bounds, and so on.
///
/// By default, occurrences are deduplicated by structural identity
/// together with orientation, so an entity referenced forward and
/// reversed counts twice (a box yields 24 edge occurrences). With
/// [`Topo::ignoring_orientation`], occurrences that differ only by
/// orientation collapse into one (the same box yields 12 edges).
///
/// Enumeration order follows depth-first descent over the shape graph
/// and is stable for a fixed shape, but callers must not rely on any
/// particular numbering.
///
/// When traversing a wire, prefer [`WireExplorer`], which yields edges
/// and vertices in connection order.
#[derive(Debug)]
pub struct Topo<'a> {
    store: &'a TopologyStore,
    shape: Shape,
    ignore_orientation: bool,
}

impl<'a> Topo<'a> {
    /// Creates a walker that deduplicates by structural identity and
    /// orientation.
    #[must_use]
    pub fn new(store: &'a TopologyStore, shape: Shape) -> Self {
        Self {
            store,
            shape,
            ignore_orientation: false,
        }
    }

    /// Creates a walker that collapses occurrences differing only by
    /// orientation.
    #[must_use]
    pub fn ignoring_orientation(store: &'a TopologyStore, shape: Shape) -> Self {
        Self {
            store,
            shape,
            ignore_orientation: true,
        }
    }

    /// The root shape of this walker.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    // --- Generic enumeration ---

    /// All sub-entities of the requested kind reachable from the root
    /// shape, including the root itself if it is of that kind.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the
    /// store.
    pub fn entities(&self, kind: ShapeKind) -> Result<Vec<Shape>> {
        Ok(self.collect_from(self.shape, kind)?)
    }

    /// Number of entities yielded by [`Topo::entities`] for the same
    /// kind. Always computed from the enumeration itself.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the
    /// store.
    pub fn count_of_kind(&self, kind: ShapeKind) -> Result<usize> {
        Ok(self.entities(kind)?.len())
    }

    // --- Named enumerations ---

    /// All vertices reachable from the root shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn vertices(&self) -> Result<Vec<Shape>> {
        self.entities(ShapeKind::Vertex)
    }

    /// Number of vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_vertices(&self) -> Result<usize> {
        self.count_of_kind(ShapeKind::Vertex)
    }

    /// All edges reachable from the root shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn edges(&self) -> Result<Vec<Shape>> {
        self.entities(ShapeKind::Edge)
    }

    /// Number of edges.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_edges(&self) -> Result<usize> {
        self.count_of_kind(ShapeKind::Edge)
    }

    /// All wires reachable from the root shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn wires(&self) -> Result<Vec<Shape>> {
        self.entities(ShapeKind::Wire)
    }

    /// Number of wires.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_wires(&self) -> Result<usize> {
        self.count_of_kind(ShapeKind::Wire)
    }

    /// All faces reachable from the root shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn faces(&self) -> Result<Vec<Shape>> {
        self.entities(ShapeKind::Face)
    }

    /// Number of faces.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_faces(&self) -> Result<usize> {
        self.count_of_kind(ShapeKind::Face)
    }

    /// All shells reachable from the root shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn shells(&self) -> Result<Vec<Shape>> {
        self.entities(ShapeKind::Shell)
    }

    /// Number of shells.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_shells(&self) -> Result<usize> {
        self.count_of_kind(ShapeKind::Shell)
    }

    /// All solids reachable from the root shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn solids(&self) -> Result<Vec<Shape>> {
        self.entities(ShapeKind::Solid)
    }

    /// Number of solids.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_solids(&self) -> Result<usize> {
        self.count_of_kind(ShapeKind::Solid)
    }

    /// All composite solids reachable from the root shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn comp_solids(&self) -> Result<Vec<Shape>> {
        self.entities(ShapeKind::CompSolid)
    }

    /// Number of composite solids.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_comp_solids(&self) -> Result<usize> {
        self.count_of_kind(ShapeKind::CompSolid)
    }

    /// All compounds reachable from the root shape.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn compounds(&self) -> Result<Vec<Shape>> {
        self.entities(ShapeKind::Compound)
    }

    /// Number of compounds.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_compounds(&self) -> Result<usize> {
        self.count_of_kind(ShapeKind::Compound)
    }

    // --- Ordered traversal of wires ---

    /// Edges of a wire in connection order, via [`WireExplorer`].
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is not found in
    /// the store.
    pub fn ordered_edges_from_wire(&self, wire: WireId) -> Result<Vec<Shape>> {
        Ok(WireExplorer::new(self.store, Shape::wire(wire))?
            .ordered_edges()?
            .collect())
    }

    /// Number of edges of a wire in connection order.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is not found in
    /// the store.
    pub fn number_of_ordered_edges_from_wire(&self, wire: WireId) -> Result<usize> {
        Ok(self.ordered_edges_from_wire(wire)?.len())
    }

    /// Vertices of a wire in connection order, via [`WireExplorer`].
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is not found in
    /// the store.
    pub fn ordered_vertices_from_wire(&self, wire: WireId) -> Result<Vec<Shape>> {
        Ok(WireExplorer::new(self.store, Shape::wire(wire))?
            .ordered_vertices()?
            .collect())
    }

    /// Number of vertices of a wire in connection order.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or one of its edges is not found in
    /// the store.
    pub fn number_of_ordered_vertices_from_wire(&self, wire: WireId) -> Result<usize> {
        Ok(self.ordered_vertices_from_wire(wire)?.len())
    }

    // --- Edge <-> Face ---

    /// Faces of the root shape that use the given edge.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn faces_from_edge(&self, edge: EdgeId) -> Result<Vec<Shape>> {
        self.ancestors_of(Entity::Edge(edge), ShapeKind::Face)
    }

    /// Number of faces that use the given edge.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_faces_from_edge(&self, edge: EdgeId) -> Result<usize> {
        Ok(self.faces_from_edge(edge)?.len())
    }

    /// Edges used by the given face.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn edges_from_face(&self, face: FaceId) -> Result<Vec<Shape>> {
        Ok(self.collect_from(Shape::face(face), ShapeKind::Edge)?)
    }

    /// Number of edges used by the given face.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_edges_from_face(&self, face: FaceId) -> Result<usize> {
        Ok(self.edges_from_face(face)?.len())
    }

    // --- Vertex <-> Edge ---

    /// Vertices bounding the given edge.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn vertices_from_edge(&self, edge: EdgeId) -> Result<Vec<Shape>> {
        Ok(self.collect_from(Shape::edge(edge), ShapeKind::Vertex)?)
    }

    /// Number of vertices bounding the given edge.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_vertices_from_edge(&self, edge: EdgeId) -> Result<usize> {
        Ok(self.vertices_from_edge(edge)?.len())
    }

    /// Edges of the root shape that meet at the given vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn edges_from_vertex(&self, vertex: VertexId) -> Result<Vec<Shape>> {
        self.ancestors_of(Entity::Vertex(vertex), ShapeKind::Edge)
    }

    /// Number of edges that meet at the given vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_edges_from_vertex(&self, vertex: VertexId) -> Result<usize> {
        Ok(self.edges_from_vertex(vertex)?.len())
    }

    // --- Wire <-> Edge ---

    /// Edges used by the given wire, in the store's enumeration order.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn edges_from_wire(&self, wire: WireId) -> Result<Vec<Shape>> {
        Ok(self.collect_from(Shape::wire(wire), ShapeKind::Edge)?)
    }

    /// Number of edges used by the given wire.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_edges_from_wire(&self, wire: WireId) -> Result<usize> {
        Ok(self.edges_from_wire(wire)?.len())
    }

    /// Wires of the root shape that use the given edge.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn wires_from_edge(&self, edge: EdgeId) -> Result<Vec<Shape>> {
        self.ancestors_of(Entity::Edge(edge), ShapeKind::Wire)
    }

    /// Number of wires that use the given edge.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_wires_from_edge(&self, edge: EdgeId) -> Result<usize> {
        Ok(self.wires_from_edge(edge)?.len())
    }

    /// Wires of the root shape that pass through the given vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn wires_from_vertex(&self, vertex: VertexId) -> Result<Vec<Shape>> {
        self.ancestors_of(Entity::Vertex(vertex), ShapeKind::Wire)
    }

    /// Number of wires that pass through the given vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_wires_from_vertex(&self, vertex: VertexId) -> Result<usize> {
        Ok(self.wires_from_vertex(vertex)?.len())
    }

    // --- Wire <-> Face ---

    /// Wires bounding the given face.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn wires_from_face(&self, face: FaceId) -> Result<Vec<Shape>> {
        Ok(self.collect_from(Shape::face(face), ShapeKind::Wire)?)
    }

    /// Number of wires bounding the given face.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_wires_from_face(&self, face: FaceId) -> Result<usize> {
        Ok(self.wires_from_face(face)?.len())
    }

    /// Faces of the root shape bounded by the given wire.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn faces_from_wire(&self, wire: WireId) -> Result<Vec<Shape>> {
        self.ancestors_of(Entity::Wire(wire), ShapeKind::Face)
    }

    /// Number of faces bounded by the given wire.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_faces_from_wire(&self, wire: WireId) -> Result<usize> {
        Ok(self.faces_from_wire(wire)?.len())
    }

    // --- Vertex <-> Face ---

    /// Vertices used by the given face.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn vertices_from_face(&self, face: FaceId) -> Result<Vec<Shape>> {
        Ok(self.collect_from(Shape::face(face), ShapeKind::Vertex)?)
    }

    /// Number of vertices used by the given face.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_vertices_from_face(&self, face: FaceId) -> Result<usize> {
        Ok(self.vertices_from_face(face)?.len())
    }

    /// Faces of the root shape that touch the given vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn faces_from_vertex(&self, vertex: VertexId) -> Result<Vec<Shape>> {
        self.ancestors_of(Entity::Vertex(vertex), ShapeKind::Face)
    }

    /// Number of faces that touch the given vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_faces_from_vertex(&self, vertex: VertexId) -> Result<usize> {
        Ok(self.faces_from_vertex(vertex)?.len())
    }

    // --- Face <-> Solid ---

    /// Solids of the root shape bounded by the given face.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn solids_from_face(&self, face: FaceId) -> Result<Vec<Shape>> {
        self.ancestors_of(Entity::Face(face), ShapeKind::Solid)
    }

    /// Number of solids bounded by the given face.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_solids_from_face(&self, face: FaceId) -> Result<usize> {
        Ok(self.solids_from_face(face)?.len())
    }

    /// Faces bounding the given solid.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn faces_from_solid(&self, solid: SolidId) -> Result<Vec<Shape>> {
        Ok(self.collect_from(Shape::solid(solid), ShapeKind::Face)?)
    }

    /// Number of faces bounding the given solid.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced entity is not found in the store.
    pub fn number_of_faces_from_solid(&self, solid: SolidId) -> Result<usize> {
        Ok(self.faces_from_solid(solid)?.len())
    }

    // --- Internals ---

    /// Direct sub-shapes of an entity, with the occurrence orientation
    /// stored at the reference composed with the parent's orientation.
    fn children(&self, shape: Shape) -> std::result::Result<Vec<Shape>, TopologyError> {
        let parent = shape.orientation();
        let compose = |child: Shape| child.oriented(child.orientation().compose(parent));
        let children = match shape.entity() {
            Entity::Vertex(_) => Vec::new(),
            Entity::Edge(id) => {
                let edge = self.store.edge(id)?;
                vec![
                    compose(Shape::vertex(edge.start)),
                    compose(Shape::vertex(edge.end).reversed()),
                ]
            }
            Entity::Wire(id) => self
                .store
                .wire(id)?
                .edges
                .iter()
                .map(|oriented| {
                    compose(Shape::edge(oriented.edge).oriented(oriented.orientation()))
                })
                .collect(),
            Entity::Face(id) => {
                let face = self.store.face(id)?;
                let mut wires = Vec::with_capacity(1 + face.inner_wires.len());
                wires.push(compose(Shape::wire(face.outer_wire)));
                for &inner in &face.inner_wires {
                    wires.push(compose(Shape::wire(inner)));
                }
                wires
            }
            Entity::Shell(id) => self
                .store
                .shell(id)?
                .faces
                .iter()
                .map(|&face| compose(Shape::face(face)))
                .collect(),
            Entity::Solid(id) => {
                let solid = self.store.solid(id)?;
                let mut shells = Vec::with_capacity(1 + solid.inner_shells.len());
                shells.push(compose(Shape::shell(solid.outer_shell)));
                for &inner in &solid.inner_shells {
                    shells.push(compose(Shape::shell(inner)));
                }
                shells
            }
            Entity::CompSolid(id) => self
                .store
                .comp_solid(id)?
                .solids
                .iter()
                .map(|&solid| compose(Shape::solid(solid)))
                .collect(),
            Entity::Compound(id) => self
                .store
                .compound(id)?
                .shapes
                .iter()
                .map(|&member| compose(member))
                .collect(),
        };
        Ok(children)
    }

    /// Depth-first collection of all occurrences of `kind` reachable
    /// from `root`, deduplicated according to the walker's mode.
    fn collect_from(
        &self,
        root: Shape,
        kind: ShapeKind,
    ) -> std::result::Result<Vec<Shape>, TopologyError> {
        let mut seen: HashSet<(Entity, Option<Orientation>)> = HashSet::new();
        let mut out = Vec::new();
        self.visit(root, kind, &mut seen, &mut out)?;
        Ok(out)
    }

    fn visit(
        &self,
        shape: Shape,
        kind: ShapeKind,
        seen: &mut HashSet<(Entity, Option<Orientation>)>,
        out: &mut Vec<Shape>,
    ) -> std::result::Result<(), TopologyError> {
        if shape.kind() == kind {
            let key = if self.ignore_orientation {
                (shape.entity(), None)
            } else {
                (shape.entity(), Some(shape.orientation()))
            };
            if seen.insert(key) {
                out.push(shape);
            }
        }
        // Descent below the requested kind cannot produce further
        // matches, except through compounds, which may nest anything.
        if shape.kind() > kind || shape.kind() == ShapeKind::Compound {
            for child in self.children(shape)? {
                self.visit(child, kind, seen, out)?;
            }
        }
        Ok(())
    }

    /// Builds the full sub-entity to ancestor index for one kind pair
    /// over the root shape, then returns the ancestors of `sub`.
    ///
    /// The index maps every entity of the sub kind to the set of parent
    /// entities of the requested kind that contain it, deduplicated by
    /// structural identity. An entity absent from the index (including
    /// one belonging to an unrelated shape) has no ancestors here, so
    /// the result is empty rather than an error.
    fn ancestors_of(&self, sub: Entity, parent_kind: ShapeKind) -> Result<Vec<Shape>> {
        let sub_kind = sub.kind();
        let mut index: HashMap<Entity, Vec<Shape>> = HashMap::new();
        for parent in self.collect_from(self.shape, parent_kind)? {
            for occurrence in self.collect_from(parent, sub_kind)? {
                let ancestors = index.entry(occurrence.entity()).or_default();
                if !ancestors.iter().any(|known| known.is_same(parent)) {
                    ancestors.push(parent);
                }
            }
        }
        Ok(index.remove(&sub).unwrap_or_default())
    }
}
