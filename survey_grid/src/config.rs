//! Grid options with defaults and JSON persistence.

use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::error::GridError;
use crate::geometry::Point;

pub const DEFAULT_GRID_SIZE: f64 = 10.0;
pub const DEFAULT_MAX_POINTS_PER_SIDE: usize = 64;

/// User-facing grid settings.
///
/// Cell sizes are in map units. When the origin and rotation anchor share a
/// latitude, `x_grid_size` is the cell width and `y_grid_size` its height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub origin: Point,
    pub rotation_anchor: Option<Point>,
    pub x_grid_size: f64,
    pub y_grid_size: f64,
    /// Cap on lattice points drawn along each axis.
    pub max_points_per_side: usize,
    /// Projection of the host map.
    pub projection: Crs,
    pub active: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            origin: Point::new(0.0, 0.0),
            rotation_anchor: None,
            x_grid_size: DEFAULT_GRID_SIZE,
            y_grid_size: DEFAULT_GRID_SIZE,
            max_points_per_side: DEFAULT_MAX_POINTS_PER_SIDE,
            projection: Crs::web_mercator(),
            active: true,
        }
    }
}

impl GridOptions {
    /// Saves these options to a JSON file.
    pub fn save(&self, path: &str) -> Result<(), GridError> {
        let json = serde_json::to_string_pretty(self)?;
        crate::io::write_string(path, &json)?;
        Ok(())
    }

    /// Loads options from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> Result<Self, GridError> {
        let data = crate::io::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = GridOptions::default();
        assert_eq!(o.origin, Point::new(0.0, 0.0));
        assert_eq!(o.x_grid_size, 10.0);
        assert_eq!(o.max_points_per_side, 64);
        assert!(o.projection.is_web_mercator());
        assert!(o.active);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let o: GridOptions =
            serde_json::from_str(r#"{"x_grid_size": 2.5, "rotation_anchor": {"x": 1.0, "y": 1.0}}"#)
                .unwrap();
        assert_eq!(o.x_grid_size, 2.5);
        assert_eq!(o.y_grid_size, 10.0);
        assert_eq!(o.rotation_anchor, Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn save_load_round_trip() {
        let dir = assert_fs::TempDir::new().unwrap();
        let path = dir.path().join("grid.json");
        let path = path.to_str().unwrap();
        let opts = GridOptions {
            origin: Point::new(-12_600_000.0, 7_080_000.0),
            projection: Crs::from_epsg(3857),
            max_points_per_side: 32,
            ..Default::default()
        };
        opts.save(path).unwrap();
        assert_eq!(GridOptions::load(path).unwrap(), opts);
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = assert_fs::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = GridOptions::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, GridError::Json(_)));
    }
}
