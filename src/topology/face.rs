use crate::math::Vector3;

use super::wire::WireId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// Data associated with a topological face.
///
/// A face is a bounded planar region, defined by an outer wire and
/// optionally inner wires (holes). Only the plane normal is carried;
/// surface evaluation is out of scope for this layer.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Unit normal of the plane on which this face lies.
    pub normal: Vector3,
    /// The outer boundary wire.
    pub outer_wire: WireId,
    /// Inner boundary wires (holes).
    pub inner_wires: Vec<WireId>,
    /// If `true`, the face normal agrees with the stored plane normal.
    pub same_sense: bool,
}
