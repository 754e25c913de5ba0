//! tilegrid: tile-aligned raster geometry for classified LIDAR tiles.
//!
//! - Resolves a deterministic north-west origin for a buffered tile cloud.
//! - Bins points into square `grid_size x grid_size` layers (occupancy or density).
//! - Knows nothing about what classification codes mean; callers pick the groups.
//!
//! Grid layout:
//!   rows    : north to south (row 0 touches `origin.y`)
//!   cols    : west to east   (col 0 touches `origin.x`)
//!   storage : row-major, `rows * cols` cells
//!
//! Geotransform (GDAL order):
//!   [origin_x, pixel_size, 0, origin_y, 0, -pixel_size]
//!
//! Origins returned by [`resolve_origin`] sit on multiples of the tile width.
//! Callers shift them with [`RasterOrigin::pixel_centered`] before binning so
//! pixel centres fall on the nominal grid nodes.

mod error;
mod geometry;
mod grid;
mod origin;
mod point;
mod rasterize;

pub use error::GridError;
pub use geometry::{GeoTransform, RasterOrigin, TileGeometry};
pub use grid::Grid;
pub use origin::resolve_origin;
pub use point::{classes_present, ClassId, Point};
pub use rasterize::{rasterize, rasterize_groups, Reduction};
