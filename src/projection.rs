//! Point projection from WGS84 latitude/longitude to a planar grid.

use geo::Coord;

use crate::error::ProjectionError;

/// Maps one geographic position to grid coordinates.
///
/// Arguments are latitude first, matching the `geo2grid(lat, lon)` convention.
/// Implementations must be deterministic and free of side effects.
pub trait Projector {
    fn project(&self, latitude: f64, longitude: f64) -> Result<Coord<f64>, ProjectionError>;
}

// Plain functions and closures make handy stand-ins in tests.
impl<F> Projector for F
where
    F: Fn(f64, f64) -> (f64, f64),
{
    fn project(&self, latitude: f64, longitude: f64) -> Result<Coord<f64>, ProjectionError> {
        let (x, y) = self(latitude, longitude);
        Ok(Coord { x, y })
    }
}

/// Transverse Mercator on an ellipsoid, evaluated with the usual series
/// expansion from Snyder, "Map Projections: A Working Manual".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    pub semi_major_axis: f64,
    pub flattening: f64,
    /// Degrees east of Greenwich.
    pub central_meridian: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

/// LKS94 (EPSG:3346): GRS80, central meridian 24°E, k = 0.9998, E0 = 500 km.
pub const LKS94: TransverseMercator = TransverseMercator {
    semi_major_axis: 6_378_137.0,
    flattening: 1.0 / 298.257_222_101,
    central_meridian: 24.0,
    scale_factor: 0.9998,
    false_easting: 500_000.0,
    false_northing: 0.0,
};

impl Default for TransverseMercator {
    fn default() -> Self {
        LKS94
    }
}

impl TransverseMercator {
    /// Returns `(easting, northing)` in metres.
    pub fn forward(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let a = self.semi_major_axis;
        let k0 = self.scale_factor;
        let e2 = self.flattening * (2.0 - self.flattening);
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = e2 / (1.0 - e2);

        let phi = latitude.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let tan_phi = phi.tan();

        let n = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let l = (longitude - self.central_meridian).to_radians() * cos_phi;

        // meridional arc
        let m = a
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

        let l2 = l * l;
        let l3 = l2 * l;
        let l4 = l3 * l;
        let l5 = l4 * l;
        let l6 = l5 * l;

        let easting = k0
            * n
            * (l + (1.0 - t + c) * l3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * l5 / 120.0)
            + self.false_easting;
        let northing = k0
            * (m + n
                * tan_phi
                * (l2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * l4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * l6 / 720.0))
            + self.false_northing;

        (easting, northing)
    }
}

/// Accepts the whole WGS84 domain; inputs outside it, or non-finite ones, are
/// rejected. Accuracy degrades away from the central meridian (the series is
/// meant for roughly ±3°), but results stay finite and are returned as is.
///
/// The result follows the Lithuanian geodetic axis convention:
/// `x` is the northing, `y` the easting.
impl Projector for TransverseMercator {
    fn project(&self, latitude: f64, longitude: f64) -> Result<Coord<f64>, ProjectionError> {
        if !in_wgs84_domain(latitude, longitude) {
            return Err(ProjectionError::OutOfDomain { latitude, longitude });
        }

        let (easting, northing) = self.forward(latitude, longitude);
        if !easting.is_finite() || !northing.is_finite() {
            return Err(ProjectionError::OutOfDomain { latitude, longitude });
        }

        Ok(Coord {
            x: northing,
            y: easting,
        })
    }
}

fn in_wgs84_domain(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

/// LKS94 through PROJ (EPSG:4326 -> EPSG:3346), for cross-checking the
/// built-in series against a full geodetic library.
#[cfg(feature = "proj")]
pub struct ProjProjector {
    inner: proj::Proj,
}

#[cfg(feature = "proj")]
impl ProjProjector {
    pub fn lks94() -> Result<Self, ProjectionError> {
        let inner = proj::Proj::new_known_crs("EPSG:4326", "EPSG:3346", None)
            .map_err(|e| ProjectionError::Backend(e.to_string()))?;
        Ok(ProjProjector { inner })
    }
}

#[cfg(feature = "proj")]
impl Projector for ProjProjector {
    fn project(&self, latitude: f64, longitude: f64) -> Result<Coord<f64>, ProjectionError> {
        if !in_wgs84_domain(latitude, longitude) {
            return Err(ProjectionError::OutOfDomain { latitude, longitude });
        }
        // new_known_crs normalises axis order to (lon, lat) in and (easting, northing) out
        let (easting, northing) = self
            .inner
            .convert((longitude, latitude))
            .map_err(|e| ProjectionError::Backend(e.to_string()))?;
        Ok(Coord {
            x: northing,
            y: easting,
        })
    }
}
