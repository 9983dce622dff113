//! Bundles the reprojection and distance services the grid engine consumes.

use crate::crs::{CoordinateTransform, Crs, IdentityTransform, SphericalMercator};
use crate::error::GridError;
use crate::geometry::Point;
use crate::sphere::{DistanceMetric, Euclidean, Haversine};

/// The external collaborators used to relate projected units to real-world
/// distances.
#[derive(Debug, Clone)]
pub struct MapServices<T, M> {
    pub transform: T,
    pub metric: M,
    /// Projection in which `metric` is valid.
    pub geographic: Crs,
}

impl<T, M> MapServices<T, M>
where
    T: CoordinateTransform,
    M: DistanceMetric,
{
    pub fn new(transform: T, metric: M) -> Self {
        Self {
            transform,
            metric,
            geographic: Crs::wgs84(),
        }
    }

    /// Converts a point in the host projection to the reference geographic
    /// projection.
    pub fn to_geographic(&self, point: Point, projection: &Crs) -> Result<Point, GridError> {
        self.transform.transform(point, projection, &self.geographic)
    }

    pub fn distance(&self, a: Point, b: Point) -> f64 {
        self.metric.distance(a, b)
    }
}

impl MapServices<SphericalMercator, Haversine> {
    /// Web mercator maps measured on a spherical earth.
    pub fn spherical() -> Self {
        Self::new(SphericalMercator, Haversine::default())
    }
}

impl MapServices<IdentityTransform, Euclidean> {
    /// Planar maps without geographic distortion.
    pub fn planar() -> Self {
        Self::new(IdentityTransform, Euclidean)
    }
}

#[cfg(feature = "proj")]
impl MapServices<crate::crs::ProjTransform, Haversine> {
    /// Any PROJ-supported projection measured on a spherical earth.
    pub fn proj() -> Self {
        Self::new(crate::crs::ProjTransform, Haversine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spherical_services_reach_wgs84() {
        let s = MapServices::spherical();
        let geo = s
            .to_geographic(Point::new(0.0, 0.0), &Crs::web_mercator())
            .unwrap();
        assert!(geo.x.abs() < 1e-12 && geo.y.abs() < 1e-12);
    }

    #[test]
    fn planar_services_measure_map_units() {
        let s = MapServices::planar();
        let p = s.to_geographic(Point::new(3.0, 4.0), &Crs::web_mercator()).unwrap();
        assert_eq!(p, Point::new(3.0, 4.0));
        assert_eq!(s.distance(Point::new(0.0, 0.0), p), 5.0);
    }
}
