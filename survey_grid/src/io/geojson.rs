//! GeoJSON export of grid point sets.

use ::geojson::{Feature, GeoJson, Geometry, Value};

use crate::error::GridError;
use crate::geometry::Point;

/// Builds a feature holding all `points` as a single MultiPoint geometry.
pub fn grid_feature(points: &[Point]) -> Feature {
    let coords = points.iter().map(|p| vec![p.x, p.y]).collect();
    let mut feature = Feature::from(Geometry::new(Value::MultiPoint(coords)));
    feature.set_property("point_count", points.len());
    feature
}

/// Serializes the grid feature to a GeoJSON string.
pub fn grid_geojson(points: &[Point]) -> String {
    GeoJson::from(grid_feature(points)).to_string()
}

/// Writes the grid feature to `path`.
pub fn write_grid_geojson(path: &str, points: &[Point]) -> Result<(), GridError> {
    super::write_string(path, &grid_geojson(points))?;
    Ok(())
}
