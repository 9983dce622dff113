//! Coordinate reference systems and the reprojection services the grid
//! engine relies on.
//!
//! The engine only needs one operation from this module: converting a point
//! between two named projections. That operation is modelled by the
//! [`CoordinateTransform`] trait so hosts can plug in whatever reprojection
//! machinery they already use. Two pure-Rust implementations ship with the
//! crate ([`SphericalMercator`] and [`IdentityTransform`]); a PROJ-backed
//! [`ProjTransform`] is available with the `proj` feature.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;
use crate::geometry::Point;

/// Representation of a coordinate reference system.
///
/// A CRS is stored internally as a definition string which can be an EPSG
/// identifier (`"EPSG:4326"`) or a Proj4 definition. When created from an
/// EPSG code the numeric value is retained so that callers can inspect it if
/// necessary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Crs {
    definition: String,
    epsg: Option<u32>,
}

/// EPSG codes that name the spherical (web) mercator projection.
const WEB_MERCATOR_CODES: [u32; 4] = [3857, 900913, 102100, 102113];

impl Crs {
    /// Creates a new CRS from the given EPSG code.
    pub fn from_epsg(code: u32) -> Self {
        Self {
            definition: format!("EPSG:{}", code),
            epsg: Some(code),
        }
    }

    /// Creates a CRS from a Proj4 definition string.
    pub fn from_proj4(definition: &str) -> Self {
        Self {
            definition: definition.to_string(),
            epsg: None,
        }
    }

    /// Parses `EPSG:<code>` definitions, falling back to an opaque definition.
    pub fn from_definition(definition: &str) -> Self {
        let trimmed = definition.trim();
        match parse_epsg_code(trimmed) {
            Some(code) => Self::from_epsg(code),
            None => Self::from_proj4(trimmed),
        }
    }

    /// Returns the EPSG code for this CRS, if available.
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Returns the underlying definition string.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// WGS84 longitude/latitude (EPSG:4326), the reference geographic
    /// projection used for all distance measurements.
    pub fn wgs84() -> Self {
        Self::from_epsg(4326)
    }

    /// Web Mercator (EPSG:3857).
    pub fn web_mercator() -> Self {
        Self::from_epsg(3857)
    }

    pub fn is_wgs84(&self) -> bool {
        self.epsg == Some(4326)
    }

    pub fn is_web_mercator(&self) -> bool {
        self.epsg.is_some_and(|c| WEB_MERCATOR_CODES.contains(&c))
    }

    /// Two CRS values are equivalent when they share an EPSG code, both name
    /// web mercator, or have identical definitions.
    pub fn equivalent(&self, other: &Crs) -> bool {
        if self.is_web_mercator() && other.is_web_mercator() {
            return true;
        }
        match (self.epsg, other.epsg) {
            (Some(a), Some(b)) => a == b,
            _ => self.definition == other.definition,
        }
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::web_mercator()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition)
    }
}

impl FromStr for Crs {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Crs::from_definition(s))
    }
}

impl From<String> for Crs {
    fn from(s: String) -> Self {
        Crs::from_definition(&s)
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.definition
    }
}

/// Get the EPSG code from a CRS string if it's in EPSG format.
pub fn parse_epsg_code(crs: &str) -> Option<u32> {
    let upper = crs.to_ascii_uppercase();
    upper.strip_prefix("EPSG:")?.trim().parse::<u32>().ok()
}

/// Reprojects a point from one CRS to another.
pub trait CoordinateTransform {
    fn transform(&self, point: Point, from: &Crs, to: &Crs) -> Result<Point, GridError>;
}

impl<T: CoordinateTransform + ?Sized> CoordinateTransform for &T {
    fn transform(&self, point: Point, from: &Crs, to: &Crs) -> Result<Point, GridError> {
        (**self).transform(point, from, to)
    }
}

/// Returns every point unchanged, for maps drawn in a local planar system.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl CoordinateTransform for IdentityTransform {
    fn transform(&self, point: Point, _from: &Crs, _to: &Crs) -> Result<Point, GridError> {
        Ok(point)
    }
}

/// Spherical mercator radius in meters.
pub const MERCATOR_RADIUS: f64 = 6_378_137.0;
const MERCATOR_HALF_SIZE: f64 = std::f64::consts::PI * MERCATOR_RADIUS;

/// Pure-Rust conversion between web mercator and WGS84.
///
/// Any other pair of projections is reported as a projection error; use
/// [`ProjTransform`] (feature `proj`) for general reprojection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalMercator;

impl SphericalMercator {
    /// Longitude/latitude in degrees to web mercator meters.
    pub fn forward(lon_lat: Point) -> Point {
        let x = MERCATOR_RADIUS * lon_lat.x.to_radians();
        let y = MERCATOR_RADIUS
            * (std::f64::consts::PI * (lon_lat.y + 90.0) / 360.0)
                .tan()
                .ln();
        Point::new(x, y.clamp(-MERCATOR_HALF_SIZE, MERCATOR_HALF_SIZE))
    }

    /// Web mercator meters to longitude/latitude in degrees.
    pub fn inverse(xy: Point) -> Point {
        let lon = 180.0 * xy.x / MERCATOR_HALF_SIZE;
        let lat = 360.0 * (xy.y / MERCATOR_RADIUS).exp().atan() / std::f64::consts::PI - 90.0;
        Point::new(lon, lat)
    }
}

impl CoordinateTransform for SphericalMercator {
    fn transform(&self, point: Point, from: &Crs, to: &Crs) -> Result<Point, GridError> {
        if from.equivalent(to) {
            return Ok(point);
        }
        let out = if from.is_web_mercator() && to.is_wgs84() {
            Self::inverse(point)
        } else if from.is_wgs84() && to.is_web_mercator() {
            Self::forward(point)
        } else {
            return Err(GridError::Projection(format!(
                "unsupported transform {} -> {}",
                from, to
            )));
        };
        if out.is_finite() {
            Ok(out)
        } else {
            Err(GridError::Projection(format!(
                "({}, {}) has no image in {}",
                point.x, point.y, to
            )))
        }
    }
}

/// General reprojection backed by the PROJ library.
#[cfg(feature = "proj")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjTransform;

#[cfg(feature = "proj")]
impl CoordinateTransform for ProjTransform {
    fn transform(&self, point: Point, from: &Crs, to: &Crs) -> Result<Point, GridError> {
        if from == to {
            return Ok(point);
        }
        let proj = proj::Proj::new_known_crs(from.definition(), to.definition(), None)
            .map_err(|e| GridError::Projection(format!("failed to create transform: {}", e)))?;
        proj.convert((point.x, point.y))
            .map(Point::from)
            .map_err(|e| GridError::Projection(format!("transform failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_to_web_mercator_origin() {
        let p = SphericalMercator
            .transform(Point::new(0.0, 0.0), &Crs::wgs84(), &Crs::web_mercator())
            .unwrap();
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
    }

    #[test]
    fn mercator_round_trip() {
        let geo = Point::new(-113.49, 53.54);
        let xy = SphericalMercator::forward(geo);
        let back = SphericalMercator::inverse(xy);
        assert!((back.x - geo.x).abs() < 1e-9);
        assert!((back.y - geo.y).abs() < 1e-9);
    }

    #[test]
    fn mercator_antimeridian() {
        let xy = SphericalMercator::forward(Point::new(180.0, 0.0));
        assert!((xy.x - MERCATOR_HALF_SIZE).abs() < 1e-6);
    }

    #[test]
    fn unsupported_pair_is_projection_error() {
        let err = SphericalMercator
            .transform(Point::new(0.0, 0.0), &Crs::from_epsg(27700), &Crs::wgs84())
            .unwrap_err();
        assert!(matches!(err, GridError::Projection(_)));
    }

    #[test]
    fn same_crs_is_identity() {
        let p = Point::new(12.0, 34.0);
        let out = SphericalMercator
            .transform(p, &Crs::from_epsg(900913), &Crs::web_mercator())
            .unwrap();
        assert_eq!(out, p);
    }

    #[test]
    fn parses_epsg_definitions() {
        let crs: Crs = "epsg:3857".parse().unwrap();
        assert_eq!(crs.epsg(), Some(3857));
        assert_eq!(crs.definition(), "EPSG:3857");
        let local: Crs = "+proj=tmerc +lon_0=-115".parse().unwrap();
        assert_eq!(local.epsg(), None);
    }

    #[test]
    fn serializes_as_definition_string() {
        let json = serde_json::to_string(&Crs::wgs84()).unwrap();
        assert_eq!(json, "\"EPSG:4326\"");
        let crs: Crs = serde_json::from_str("\"EPSG:3857\"").unwrap();
        assert!(crs.is_web_mercator());
    }
}
