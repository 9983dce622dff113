//! Grid geometry: orientation from control points and lattice enumeration.

pub mod description;
pub mod lattice;

pub use description::{build_grid_description, describe, GridDescription};
pub use lattice::{enumerate_lattice_points, nearest_lattice_point, Basis, LatticeCoord, LatticeWindow};
