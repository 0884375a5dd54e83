use crate::error::Result;
use crate::topology::{
    CompSolidData, CompSolidId, CompoundData, CompoundId, Shape, SolidId, TopologyStore,
};

/// Creates a compound from a heterogeneous set of shapes.
pub struct MakeCompound {
    shapes: Vec<Shape>,
}

impl MakeCompound {
    /// Creates a new `MakeCompound` operation. An empty member list is
    /// allowed; it produces an empty compound.
    #[must_use]
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Executes the operation, creating the compound in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if a member shape is not found in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<CompoundId> {
        for &shape in &self.shapes {
            store.ensure_exists(shape)?;
        }
        Ok(store.add_compound(CompoundData {
            shapes: self.shapes.clone(),
        }))
    }
}

/// Creates a composite solid from a set of solids.
pub struct MakeCompSolid {
    solids: Vec<SolidId>,
}

impl MakeCompSolid {
    /// Creates a new `MakeCompSolid` operation.
    #[must_use]
    pub fn new(solids: Vec<SolidId>) -> Self {
        Self { solids }
    }

    /// Executes the operation, creating the composite solid in the
    /// topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if a member solid is not found in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<CompSolidId> {
        for &solid in &self.solids {
            store.solid(solid)?;
        }
        Ok(store.add_comp_solid(CompSolidData {
            solids: self.solids.clone(),
        }))
    }
}
