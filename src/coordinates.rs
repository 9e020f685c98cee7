//! Typed view of a GeoJSON `coordinates` member.
//!
//! A `coordinates` value is parsed once into a [`CoordinateTree`], transformed
//! as a whole, and turned back into JSON. Whether a node is a position or a
//! list of children is decided during parsing and never re-inspected.

use geo::Coord;
use serde_json::{Number, Value};

use crate::error::{GeometryError, ProjectionError};
use crate::projection::Projector;

/// A single GeoJSON position. `coord` holds the first two ordinates; altitude
/// and any further ordinates are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub coord: Coord<f64>,
    pub extra: Vec<Number>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position {
            coord: Coord { x, y },
            extra: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateTree {
    Pair(Position),
    Nested(Vec<CoordinateTree>),
}

impl CoordinateTree {
    /// Parses a `coordinates` value.
    ///
    /// An array is a position iff its elements 0 and 1 are both numbers; any
    /// other array (including the empty one) is a list of child trees.
    pub fn from_json(value: &Value) -> Result<Self, GeometryError> {
        let mut trail = Vec::new();
        Self::parse(value, &mut trail)
    }

    fn parse(value: &Value, trail: &mut Vec<usize>) -> Result<Self, GeometryError> {
        let items = value.as_array().ok_or_else(|| GeometryError::NotAnArray {
            path: pointer(trail.as_slice()),
        })?;

        match (items.first(), items.get(1)) {
            (None, _) => Ok(CoordinateTree::Nested(Vec::new())),
            (Some(Value::Number(first)), Some(Value::Number(second))) => {
                let extra = items[2..]
                    .iter()
                    .map(|ordinate| match ordinate {
                        Value::Number(n) => Ok(n.clone()),
                        _ => Err(GeometryError::NonNumericOrdinate {
                            path: pointer(trail.as_slice()),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let (x, y) = match (first.as_f64(), second.as_f64()) {
                    (Some(x), Some(y)) => (x, y),
                    _ => {
                        return Err(GeometryError::NonNumericOrdinate {
                            path: pointer(trail.as_slice()),
                        })
                    }
                };
                Ok(CoordinateTree::Pair(Position {
                    coord: Coord { x, y },
                    extra,
                }))
            }
            (Some(Value::Number(_)), _) => Err(GeometryError::IncompletePair {
                path: pointer(trail.as_slice()),
            }),
            _ => {
                let mut children = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    trail.push(index);
                    children.push(Self::parse(item, trail)?);
                    trail.pop();
                }
                Ok(CoordinateTree::Nested(children))
            }
        }
    }

    /// Rebuilds the tree with `f` applied to every position, keeping the
    /// nesting, the order and the extra ordinates. Stops at the first error.
    pub fn try_map<E, F>(&self, f: &mut F) -> Result<Self, E>
    where
        F: FnMut(Coord<f64>) -> Result<Coord<f64>, E>,
    {
        match self {
            CoordinateTree::Pair(position) => Ok(CoordinateTree::Pair(Position {
                coord: f(position.coord)?,
                extra: position.extra.clone(),
            })),
            CoordinateTree::Nested(children) => {
                let mut converted = Vec::with_capacity(children.len());
                for child in children {
                    converted.push(child.try_map(f)?);
                }
                Ok(CoordinateTree::Nested(converted))
            }
        }
    }

    /// Projects every position. GeoJSON stores `(lon, lat)`; the projector is
    /// called as `project(lat, lon)` and its `(x, y)` replaces the pair.
    /// A NaN or infinite result fails the walk.
    pub fn convert<P>(&self, projector: &P) -> Result<Self, ProjectionError>
    where
        P: Projector + ?Sized,
    {
        self.try_map(&mut |coord: Coord<f64>| finite(projector.project(coord.y, coord.x)?))
    }

    pub fn to_json(&self) -> Value {
        match self {
            CoordinateTree::Pair(position) => {
                let mut ordinates = Vec::with_capacity(2 + position.extra.len());
                ordinates.push(float(position.coord.x));
                ordinates.push(float(position.coord.y));
                ordinates.extend(position.extra.iter().cloned().map(Value::Number));
                Value::Array(ordinates)
            }
            CoordinateTree::Nested(children) => {
                Value::Array(children.iter().map(CoordinateTree::to_json).collect())
            }
        }
    }

    /// Nesting depth: 0 for a Point, 1 for a LineString, up to 3 for a MultiPolygon.
    pub fn depth(&self) -> usize {
        match self {
            CoordinateTree::Pair(_) => 0,
            CoordinateTree::Nested(children) => {
                1 + children.iter().map(CoordinateTree::depth).max().unwrap_or(0)
            }
        }
    }

    pub fn pair_count(&self) -> usize {
        match self {
            CoordinateTree::Pair(_) => 1,
            CoordinateTree::Nested(children) => children.iter().map(CoordinateTree::pair_count).sum(),
        }
    }
}

/// JSON has no NaN or infinity, so every written position must be finite.
pub(crate) fn finite(coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
    if coord.x.is_finite() && coord.y.is_finite() {
        Ok(coord)
    } else {
        Err(ProjectionError::NonFinite {
            x: coord.x,
            y: coord.y,
        })
    }
}

// `finite` guards every transform, so `null` only shows up for trees built by hand.
fn float(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn pointer(trail: &[usize]) -> String {
    let mut path = String::from("coordinates");
    for index in trail {
        path.push('/');
        path.push_str(&index.to_string());
    }
    path
}
