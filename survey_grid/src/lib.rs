//! Core library for drawing viewport-aligned survey grids on projected maps.
//!
//! A grid is defined by an origin, a rotation anchor and two cell sizes.
//! [`grid::build_grid_description`] turns those into ground-measured
//! direction factors, and [`grid::enumerate_lattice_points`] lists the grid
//! points inside a viewport under a fixed point budget. [`engine::GridEngine`]
//! ties both to a host map's lifecycle.

pub mod config;
pub mod crs;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod scale;
pub mod services;
pub mod sphere;

pub use config::GridOptions;
pub use engine::{GridEngine, MapView};
pub use error::GridError;
pub use geometry::{Extent, Point, Vector};
pub use grid::GridDescription;
pub use services::MapServices;
