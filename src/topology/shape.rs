use std::fmt;

use tracing::error;

use crate::error::TopologyError;

use super::compound::{CompSolidId, CompoundId};
use super::edge::EdgeId;
use super::face::FaceId;
use super::shell::ShellId;
use super::solid::SolidId;
use super::vertex::VertexId;
use super::wire::WireId;

/// The closed set of topological kinds, ordered by containment:
/// a vertex is contained in an edge, an edge in a wire, and so on up
/// to compounds. The derived ordering reflects this containment chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    Vertex,
    Edge,
    Wire,
    Face,
    Shell,
    Solid,
    CompSolid,
    Compound,
}

impl ShapeKind {
    /// All kinds, from innermost (vertex) to outermost (compound).
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Vertex,
        ShapeKind::Edge,
        ShapeKind::Wire,
        ShapeKind::Face,
        ShapeKind::Shell,
        ShapeKind::Solid,
        ShapeKind::CompSolid,
        ShapeKind::Compound,
    ];

    /// Resolves a kernel-style numeric type tag into a kind.
    ///
    /// Tags follow the conventional kernel ordering, compound = 0 down
    /// to vertex = 7.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] for a tag outside
    /// the closed kind set.
    pub fn from_tag(tag: u8) -> Result<Self, TopologyError> {
        match tag {
            0 => Ok(ShapeKind::Compound),
            1 => Ok(ShapeKind::CompSolid),
            2 => Ok(ShapeKind::Solid),
            3 => Ok(ShapeKind::Shell),
            4 => Ok(ShapeKind::Face),
            5 => Ok(ShapeKind::Wire),
            6 => Ok(ShapeKind::Edge),
            7 => Ok(ShapeKind::Vertex),
            _ => {
                error!(tag, "unknown topological kind tag");
                Err(TopologyError::WrongTopologicalType {
                    expected: "a topological kind tag in 0..=7",
                    actual: format!("tag {tag}"),
                })
            }
        }
    }

    /// Lower-case name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Vertex => "vertex",
            ShapeKind::Edge => "edge",
            ShapeKind::Wire => "wire",
            ShapeKind::Face => "face",
            ShapeKind::Shell => "shell",
            ShapeKind::Solid => "solid",
            ShapeKind::CompSolid => "comp-solid",
            ShapeKind::Compound => "compound",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orientation of a shape occurrence within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Forward,
    Reversed,
}

impl Orientation {
    /// The opposite orientation.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reversed,
            Orientation::Reversed => Orientation::Forward,
        }
    }

    /// Composes two orientations: reversing a reversed occurrence is forward.
    #[must_use]
    pub fn compose(self, other: Orientation) -> Self {
        if other == Orientation::Reversed {
            self.reversed()
        } else {
            self
        }
    }
}

/// Typed reference to an entity in the topology store, independent of
/// orientation. Two handles with equal entities are the *same* entity
/// in the structural-identity sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Vertex(VertexId),
    Edge(EdgeId),
    Wire(WireId),
    Face(FaceId),
    Shell(ShellId),
    Solid(SolidId),
    CompSolid(CompSolidId),
    Compound(CompoundId),
}

impl Entity {
    /// The topological kind of this entity.
    #[must_use]
    pub fn kind(self) -> ShapeKind {
        match self {
            Entity::Vertex(_) => ShapeKind::Vertex,
            Entity::Edge(_) => ShapeKind::Edge,
            Entity::Wire(_) => ShapeKind::Wire,
            Entity::Face(_) => ShapeKind::Face,
            Entity::Shell(_) => ShapeKind::Shell,
            Entity::Solid(_) => ShapeKind::Solid,
            Entity::CompSolid(_) => ShapeKind::CompSolid,
            Entity::Compound(_) => ShapeKind::Compound,
        }
    }
}

/// A cheap, copyable handle to one occurrence of a topological entity:
/// the entity reference plus the orientation it carries at that
/// occurrence.
///
/// De-duplication during traversal keys on [`Shape::is_same`] or
/// [`Shape::is_equal`], never on wrapper identity; the walker may hand
/// out many `Shape` values referring to the same underlying entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    entity: Entity,
    orientation: Orientation,
}

impl Shape {
    /// Creates a shape handle with an explicit orientation.
    #[must_use]
    pub fn new(entity: Entity, orientation: Orientation) -> Self {
        Self {
            entity,
            orientation,
        }
    }

    /// Forward-oriented vertex handle.
    #[must_use]
    pub fn vertex(id: VertexId) -> Self {
        Self::new(Entity::Vertex(id), Orientation::Forward)
    }

    /// Forward-oriented edge handle.
    #[must_use]
    pub fn edge(id: EdgeId) -> Self {
        Self::new(Entity::Edge(id), Orientation::Forward)
    }

    /// Forward-oriented wire handle.
    #[must_use]
    pub fn wire(id: WireId) -> Self {
        Self::new(Entity::Wire(id), Orientation::Forward)
    }

    /// Forward-oriented face handle.
    #[must_use]
    pub fn face(id: FaceId) -> Self {
        Self::new(Entity::Face(id), Orientation::Forward)
    }

    /// Forward-oriented shell handle.
    #[must_use]
    pub fn shell(id: ShellId) -> Self {
        Self::new(Entity::Shell(id), Orientation::Forward)
    }

    /// Forward-oriented solid handle.
    #[must_use]
    pub fn solid(id: SolidId) -> Self {
        Self::new(Entity::Solid(id), Orientation::Forward)
    }

    /// Forward-oriented composite-solid handle.
    #[must_use]
    pub fn comp_solid(id: CompSolidId) -> Self {
        Self::new(Entity::CompSolid(id), Orientation::Forward)
    }

    /// Forward-oriented compound handle.
    #[must_use]
    pub fn compound(id: CompoundId) -> Self {
        Self::new(Entity::Compound(id), Orientation::Forward)
    }

    /// The same entity with the opposite orientation.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self::new(self.entity, self.orientation.reversed())
    }

    /// The same entity with the given orientation.
    #[must_use]
    pub fn oriented(self, orientation: Orientation) -> Self {
        Self::new(self.entity, orientation)
    }

    /// The underlying entity reference.
    #[must_use]
    pub fn entity(self) -> Entity {
        self.entity
    }

    /// The orientation of this occurrence.
    #[must_use]
    pub fn orientation(self) -> Orientation {
        self.orientation
    }

    /// The topological kind of this shape.
    #[must_use]
    pub fn kind(self) -> ShapeKind {
        self.entity.kind()
    }

    /// Structural identity: same underlying entity, orientation ignored.
    #[must_use]
    pub fn is_same(self, other: Shape) -> bool {
        self.entity == other.entity
    }

    /// Structural identity plus matching orientation.
    #[must_use]
    pub fn is_equal(self, other: Shape) -> bool {
        self.entity == other.entity && self.orientation == other.orientation
    }

    fn wrong_kind(self, expected: ShapeKind) -> TopologyError {
        error!(actual = %self.kind(), expected = %expected, "wrong topological type");
        TopologyError::WrongTopologicalType {
            expected: expected.as_str(),
            actual: self.kind().to_string(),
        }
    }

    /// Downcasts to a vertex ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] if this shape is
    /// not a vertex.
    pub fn as_vertex(self) -> Result<VertexId, TopologyError> {
        match self.entity {
            Entity::Vertex(id) => Ok(id),
            _ => Err(self.wrong_kind(ShapeKind::Vertex)),
        }
    }

    /// Downcasts to an edge ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] if this shape is
    /// not an edge.
    pub fn as_edge(self) -> Result<EdgeId, TopologyError> {
        match self.entity {
            Entity::Edge(id) => Ok(id),
            _ => Err(self.wrong_kind(ShapeKind::Edge)),
        }
    }

    /// Downcasts to a wire ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] if this shape is
    /// not a wire.
    pub fn as_wire(self) -> Result<WireId, TopologyError> {
        match self.entity {
            Entity::Wire(id) => Ok(id),
            _ => Err(self.wrong_kind(ShapeKind::Wire)),
        }
    }

    /// Downcasts to a face ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] if this shape is
    /// not a face.
    pub fn as_face(self) -> Result<FaceId, TopologyError> {
        match self.entity {
            Entity::Face(id) => Ok(id),
            _ => Err(self.wrong_kind(ShapeKind::Face)),
        }
    }

    /// Downcasts to a shell ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] if this shape is
    /// not a shell.
    pub fn as_shell(self) -> Result<ShellId, TopologyError> {
        match self.entity {
            Entity::Shell(id) => Ok(id),
            _ => Err(self.wrong_kind(ShapeKind::Shell)),
        }
    }

    /// Downcasts to a solid ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] if this shape is
    /// not a solid.
    pub fn as_solid(self) -> Result<SolidId, TopologyError> {
        match self.entity {
            Entity::Solid(id) => Ok(id),
            _ => Err(self.wrong_kind(ShapeKind::Solid)),
        }
    }

    /// Downcasts to a composite-solid ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] if this shape is
    /// not a composite solid.
    pub fn as_comp_solid(self) -> Result<CompSolidId, TopologyError> {
        match self.entity {
            Entity::CompSolid(id) => Ok(id),
            _ => Err(self.wrong_kind(ShapeKind::CompSolid)),
        }
    }

    /// Downcasts to a compound ID.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::WrongTopologicalType`] if this shape is
    /// not a compound.
    pub fn as_compound(self) -> Result<CompoundId, TopologyError> {
        match self.entity {
            Entity::Compound(id) => Ok(id),
            _ => Err(self.wrong_kind(ShapeKind::Compound)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn fresh_ids() -> (VertexId, EdgeId) {
        let mut vertices: SlotMap<VertexId, ()> = SlotMap::with_key();
        let mut edges: SlotMap<EdgeId, ()> = SlotMap::with_key();
        (vertices.insert(()), edges.insert(()))
    }

    #[test]
    fn kinds_are_ordered_by_containment() {
        assert!(ShapeKind::Vertex < ShapeKind::Edge);
        assert!(ShapeKind::Edge < ShapeKind::Wire);
        assert!(ShapeKind::Wire < ShapeKind::Face);
        assert!(ShapeKind::Face < ShapeKind::Shell);
        assert!(ShapeKind::Shell < ShapeKind::Solid);
        assert!(ShapeKind::Solid < ShapeKind::CompSolid);
        assert!(ShapeKind::CompSolid < ShapeKind::Compound);
    }

    #[test]
    fn from_tag_covers_all_kinds() {
        let kinds: Vec<ShapeKind> = (0..8).map(|t| ShapeKind::from_tag(t).unwrap()).collect();
        for kind in ShapeKind::ALL {
            assert!(kinds.contains(&kind));
        }
        assert_eq!(ShapeKind::from_tag(0).unwrap(), ShapeKind::Compound);
        assert_eq!(ShapeKind::from_tag(7).unwrap(), ShapeKind::Vertex);
    }

    #[test]
    fn from_tag_rejects_unknown_tag() {
        let err = ShapeKind::from_tag(8).unwrap_err();
        assert!(matches!(
            err,
            TopologyError::WrongTopologicalType { .. }
        ));
    }

    #[test]
    fn is_same_ignores_orientation() {
        let (v, _) = fresh_ids();
        let fwd = Shape::vertex(v);
        let rev = fwd.reversed();
        assert!(fwd.is_same(rev));
        assert!(!fwd.is_equal(rev));
        assert!(fwd.is_equal(rev.reversed()));
    }

    #[test]
    fn downcast_to_wrong_kind_fails() {
        let (_, e) = fresh_ids();
        let shape = Shape::edge(e);
        assert_eq!(shape.as_edge().unwrap(), e);
        let err = shape.as_wire().unwrap_err();
        assert!(matches!(
            err,
            TopologyError::WrongTopologicalType { expected: "wire", .. }
        ));
    }

    #[test]
    fn orientation_composition() {
        use Orientation::{Forward, Reversed};
        assert_eq!(Forward.compose(Forward), Forward);
        assert_eq!(Forward.compose(Reversed), Reversed);
        assert_eq!(Reversed.compose(Reversed), Forward);
    }
}
