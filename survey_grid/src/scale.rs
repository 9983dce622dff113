//! Local scale correction.
//!
//! One projected unit does not cover a constant real-world distance on a
//! distorting projection. The factors computed here convert a displacement
//! measured in real-world units into projected units near a given point, so
//! cells keep the size implied by the origin/anchor pair. They are only valid
//! locally and are recomputed on every render pass.

use crate::crs::{CoordinateTransform, Crs};
use crate::error::GridError;
use crate::geometry::{Point, Vector};
use crate::services::MapServices;
use crate::sphere::DistanceMetric;

/// Computes per-axis correction factors `[cx, cy]` around `origin`.
///
/// `origin`, `origin + (1, 0)` and `origin + (0, 1)` are reprojected to the
/// reference geographic projection and each factor is the reciprocal of the
/// real-world length of one projected unit along that axis.
pub fn local_scale_factors<T, M>(
    origin: Point,
    projection: &Crs,
    services: &MapServices<T, M>,
) -> Result<Vector, GridError>
where
    T: CoordinateTransform,
    M: DistanceMetric,
{
    let geo_origin = services.to_geographic(origin, projection)?;
    let geo_x = services.to_geographic(origin.translated(1.0, 0.0), projection)?;
    let geo_y = services.to_geographic(origin.translated(0.0, 1.0), projection)?;

    let factors = Vector::new(
        1.0 / services.distance(geo_origin, geo_x),
        1.0 / services.distance(geo_origin, geo_y),
    );
    if !factors.is_finite() {
        return Err(GridError::DegenerateGrid(
            "projected unit has no measurable length at origin",
        ));
    }
    Ok(factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::EARTH_MEAN_RADIUS;

    #[test]
    fn planar_maps_need_no_correction() {
        let f = local_scale_factors(
            Point::new(250.0, -40.0),
            &Crs::web_mercator(),
            &MapServices::planar(),
        )
        .unwrap();
        assert!((f.x - 1.0).abs() < 1e-12);
        assert!((f.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mercator_at_equator_is_nearly_unit() {
        let f = local_scale_factors(
            Point::new(0.0, 0.0),
            &Crs::web_mercator(),
            &MapServices::spherical(),
        )
        .unwrap();
        // one mercator meter spans R_mean / R_mercator real meters at the equator
        let expected = crate::crs::MERCATOR_RADIUS / EARTH_MEAN_RADIUS;
        assert!((f.x - expected).abs() < 1e-6);
        assert!((f.y - expected).abs() < 1e-6);
    }

    #[test]
    fn mercator_correction_grows_with_latitude() {
        let services = MapServices::spherical();
        let at = |lat: f64| {
            let xy = crate::crs::SphericalMercator::forward(Point::new(0.0, lat));
            local_scale_factors(xy, &Crs::web_mercator(), &services).unwrap()
        };
        let equator = at(0.0);
        let sixty = at(60.0);
        assert!((sixty.x / equator.x - 2.0).abs() < 1e-3);
        assert!((sixty.y / equator.y - 2.0).abs() < 1e-3);
    }

    #[test]
    fn unsupported_projection_propagates() {
        let err = local_scale_factors(
            Point::new(0.0, 0.0),
            &Crs::from_epsg(27700),
            &MapServices::spherical(),
        )
        .unwrap_err();
        assert!(err.is_fatal());
    }
}
