use crate::error::{OperationError, Result};
use crate::topology::{ShellId, SolidData, SolidId, TopologyStore};

/// Creates a solid from an outer shell and optional inner void shells.
pub struct MakeSolid {
    outer_shell: ShellId,
    inner_shells: Vec<ShellId>,
}

impl MakeSolid {
    /// Creates a new `MakeSolid` operation.
    #[must_use]
    pub fn new(outer_shell: ShellId, inner_shells: Vec<ShellId>) -> Self {
        Self {
            outer_shell,
            inner_shells,
        }
    }

    /// Executes the operation, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if any bounding shell is
    /// not closed, or an error if a shell is not found in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if !store.shell(self.outer_shell)?.is_closed {
            return Err(
                OperationError::InvalidInput("outer shell of a solid must be closed".into()).into(),
            );
        }
        for &inner in &self.inner_shells {
            if !store.shell(inner)?.is_closed {
                return Err(OperationError::InvalidInput(
                    "inner shells of a solid must be closed".into(),
                )
                .into());
            }
        }
        Ok(store.add_solid(SolidData::new(
            self.outer_shell,
            self.inner_shells.clone(),
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeFace, MakeShell, MakeWire};

    #[test]
    fn open_outer_shell_returns_error() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            true,
        )
        .execute(&mut store)
        .unwrap();
        let face = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
        let shell = MakeShell::new(vec![face], false).execute(&mut store).unwrap();

        let result = MakeSolid::new(shell, vec![]).execute(&mut store);
        assert!(result.is_err());
    }
}
