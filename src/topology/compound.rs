use super::shape::Shape;
use super::solid::SolidId;

slotmap::new_key_type! {
    /// Unique identifier for a composite solid in the topology store.
    pub struct CompSolidId;
}

slotmap::new_key_type! {
    /// Unique identifier for a compound in the topology store.
    pub struct CompoundId;
}

/// Data associated with a composite solid.
///
/// A composite solid is a set of solids sharing boundary faces.
#[derive(Debug, Clone)]
pub struct CompSolidData {
    /// The solids that make up this composite solid.
    pub solids: Vec<SolidId>,
}

/// Data associated with a compound.
///
/// A compound is a heterogeneous collection of shapes of any kind,
/// including other compounds.
#[derive(Debug, Clone)]
pub struct CompoundData {
    /// The member shapes of the compound.
    pub shapes: Vec<Shape>,
}
