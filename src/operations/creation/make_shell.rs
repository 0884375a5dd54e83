use crate::error::{OperationError, Result};
use crate::topology::{FaceId, ShellData, ShellId, TopologyStore};

/// Creates a shell from a set of faces.
pub struct MakeShell {
    faces: Vec<FaceId>,
    closed: bool,
}

impl MakeShell {
    /// Creates a new `MakeShell` operation.
    #[must_use]
    pub fn new(faces: Vec<FaceId>, closed: bool) -> Self {
        Self { faces, closed }
    }

    /// Executes the operation, creating the shell in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if no faces are given,
    /// or an error if a face is not found in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<ShellId> {
        if self.faces.is_empty() {
            return Err(OperationError::InvalidInput("a shell needs at least one face".into()).into());
        }
        for &face in &self.faces {
            store.face(face)?;
        }
        Ok(store.add_shell(ShellData::new(self.faces.clone(), self.closed)))
    }
}
