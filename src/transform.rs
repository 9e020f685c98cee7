use std::fmt;

use geo::Coord;

use crate::coordinates::{finite, CoordinateTree};
use crate::error::ProjectionError;
use crate::projection::{Projector, LKS94};

/// What happens to each position of every geometry.
pub enum Transform {
    /// WGS84 `(lon, lat)` to grid `(x, y)` through a projector.
    ToGrid(Box<dyn Projector>),
    /// `(a, b)` becomes `(b, a)`.
    SwapAxes,
    /// Offsets every position by a reference point.
    RelativeTo { x: f64, y: f64 },
}

impl Transform {
    pub fn lks94() -> Self {
        Transform::ToGrid(Box::new(LKS94))
    }

    pub fn apply(&self, tree: &CoordinateTree) -> Result<CoordinateTree, ProjectionError> {
        match self {
            Transform::ToGrid(projector) => tree.convert(projector.as_ref()),
            Transform::SwapAxes => tree.try_map(&mut |c: Coord<f64>| finite(Coord { x: c.y, y: c.x })),
            // an infinite or NaN reference would otherwise poison every position
            Transform::RelativeTo { x, y } => tree.try_map(&mut |c: Coord<f64>| {
                finite(Coord {
                    x: c.x - x,
                    y: c.y - y,
                })
            }),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::ToGrid(_) => f.write_str("ToGrid"),
            Transform::SwapAxes => f.write_str("SwapAxes"),
            Transform::RelativeTo { x, y } => f
                .debug_struct("RelativeTo")
                .field("x", x)
                .field("y", y)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> CoordinateTree {
        CoordinateTree::from_json(&value).unwrap()
    }

    #[test]
    fn swap_axes_reverses_pairs_and_keeps_altitude() {
        let swapped = Transform::SwapAxes
            .apply(&tree(json!([[6061948.5, 582510.25, 120], [6061950.0, 582512.0]])))
            .unwrap();

        assert_eq!(
            swapped.to_json(),
            json!([[582510.25, 6061948.5, 120], [582512.0, 6061950.0]])
        );
    }

    #[test]
    fn relative_to_subtracts_reference() {
        let relative = Transform::RelativeTo {
            x: 6168029.0,
            y: 606645.0,
        }
        .apply(&tree(json!([[[6168030.0, 606650.0], [6168029.0, 606645.0]]])))
        .unwrap();

        assert_eq!(relative.to_json(), json!([[[1.0, 5.0], [0.0, 0.0]]]));
    }

    #[test]
    fn non_finite_reference_is_rejected() {
        let infinite = Transform::RelativeTo {
            x: f64::INFINITY,
            y: 606645.0,
        };
        assert!(matches!(
            infinite.apply(&tree(json!([[6168030.0, 606650.0]]))),
            Err(ProjectionError::NonFinite { .. })
        ));

        let nan = Transform::RelativeTo { x: 0.0, y: f64::NAN };
        assert!(nan.apply(&tree(json!([1.0, 2.0]))).is_err());

        // nothing to offset, nothing to reject
        assert!(infinite.apply(&tree(json!([]))).is_ok());
    }

    #[test]
    fn lks94_puts_northing_first() {
        let grid = Transform::lks94().apply(&tree(json!([24.0, 55.0]))).unwrap();

        match grid {
            CoordinateTree::Pair(position) => {
                assert!(position.coord.x > 6_000_000.0);
                assert!((position.coord.y - 500_000.0).abs() < 1e-6);
            }
            other => panic!("expected a pair, got {:?}", other),
        }
    }

    #[test]
    fn custom_projector_is_used() {
        let doubling = |lat: f64, lon: f64| (lat * 2.0, lon * 2.0);
        let grid = Transform::ToGrid(Box::new(doubling))
            .apply(&tree(json!([24.1, 56.9])))
            .unwrap();

        assert_eq!(grid.to_json(), json!([113.8, 48.2]));
    }
}
