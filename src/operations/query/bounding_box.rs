use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{Shape, TopologyStore};
use crate::traversal::Topo;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

/// Computes the axis-aligned bounding box of any shape by walking its
/// vertices.
pub struct BoundingBox {
    shape: Shape,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Failed`] if the shape has no vertices
    /// to bound.
    pub fn execute(&self, store: &TopologyStore) -> Result<Aabb> {
        let vertices = Topo::ignoring_orientation(store, self.shape).vertices()?;
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut empty = true;
        for vertex in vertices {
            let point = store.vertex(vertex.as_vertex()?)?.point;
            min = Point3::new(min.x.min(point.x), min.y.min(point.y), min.z.min(point.z));
            max = Point3::new(max.x.max(point.x), max.y.max(point.y), max.z.max(point.z));
            empty = false;
        }
        if empty {
            return Err(OperationError::Failed("shape has no vertices to bound".into()).into());
        }
        Ok(Aabb { min, max })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::operations::creation::{MakeBox, MakeCompound, MakeWire};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_bounds_match_its_corners() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(-1.0, 0.0, 2.0), p(3.0, 2.0, 5.0))
            .execute(&mut store)
            .unwrap();

        let aabb = BoundingBox::new(Shape::solid(solid)).execute(&store).unwrap();
        assert_relative_eq!(aabb.min.x, -1.0);
        assert_relative_eq!(aabb.min.y, 0.0);
        assert_relative_eq!(aabb.min.z, 2.0);
        assert_relative_eq!(aabb.max.x, 3.0);
        assert_relative_eq!(aabb.max.y, 2.0);
        assert_relative_eq!(aabb.max.z, 5.0);
    }

    #[test]
    fn wire_bounds_cover_its_points() {
        let mut store = TopologyStore::new();
        let wire = MakeWire::new(
            vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(4.0, 1.0, -2.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();

        let aabb = BoundingBox::new(Shape::wire(wire)).execute(&store).unwrap();
        assert_relative_eq!(aabb.min.z, -2.0);
        assert_relative_eq!(aabb.max.x, 4.0);
    }

    #[test]
    fn empty_compound_cannot_be_bounded() {
        let mut store = TopologyStore::new();
        let compound = MakeCompound::new(vec![]).execute(&mut store).unwrap();

        let result = BoundingBox::new(Shape::compound(compound)).execute(&store);
        assert!(result.is_err());
    }
}
