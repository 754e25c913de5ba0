//! Point binning onto the tile grid.
//!
//! Bin edges run from the origin eastwards (`x`) and from
//! `origin.y - tile_width` northwards (`y`) in `pixel_size` steps. Each bin is
//! half-open except the last one along each axis, which also takes points
//! lying exactly on the closing edge. Points outside the edges (typically the
//! neighbour buffer) are dropped.

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{ClassId, Grid, GridError, Point, RasterOrigin, TileGeometry};

/// How bin counts become pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// 1.0 where at least one point fell in the pixel, else 0.0.
    Occupancy,
    /// Points per square metre.
    Density,
}

#[inline]
fn bin_index(v: f64, start: f64, pixel_size: f64, n: usize) -> Option<usize> {
    let t = (v - start) / pixel_size;
    // NaN fails both comparisons.
    if !(t >= 0.0 && t <= n as f64) {
        return None;
    }
    Some((t.floor() as usize).min(n - 1))
}

/// Bin `points` into one `grid_size x grid_size` layer anchored at `origin`.
pub fn rasterize<'a, I>(
    points: I,
    origin: RasterOrigin,
    geometry: &TileGeometry,
    reduction: Reduction,
) -> Grid<f32>
where
    I: IntoIterator<Item = &'a Point>,
{
    let n = geometry.grid_size();
    let pixel_size = geometry.pixel_size();
    let south = origin.y - geometry.tile_width();

    let mut counts = vec![0u32; n * n];
    if n > 0 {
        for p in points {
            let (Some(col), Some(row_from_south)) = (
                bin_index(p.x, origin.x, pixel_size, n),
                bin_index(p.y, south, pixel_size, n),
            ) else {
                continue;
            };
            // Row 0 is the northern edge.
            let row = n - 1 - row_from_south;
            counts[row * n + col] += 1;
        }
    }

    let area = pixel_size * pixel_size;
    let mut grid = Grid::filled(n, n, 0.0_f32);
    for (cell, count) in grid.data_mut().iter_mut().zip(counts) {
        *cell = match reduction {
            Reduction::Occupancy => {
                if count > 0 {
                    1.0
                } else {
                    0.0
                }
            }
            Reduction::Density => (count as f64 / area) as f32,
        };
    }

    grid
}

/// Check every group entry is a raw classification code.
fn validate_groups<G: AsRef<[ClassId]>>(groups: &[G]) -> Result<(), GridError> {
    for (group, classes) in groups.iter().enumerate() {
        if let Some(&class) = classes.as_ref().iter().find(|&&c| c > ClassId::from(u8::MAX)) {
            return Err(GridError::InvalidClassGroup { group, class });
        }
    }
    Ok(())
}

fn rasterize_group(
    points: &[Point],
    group: &[ClassId],
    origin: RasterOrigin,
    geometry: &TileGeometry,
    reduction: Reduction,
) -> Grid<f32> {
    if group.is_empty() {
        return rasterize(points, origin, geometry, reduction);
    }
    rasterize(
        points
            .iter()
            .filter(|p| group.iter().any(|&class| p.is_class(class))),
        origin,
        geometry,
        reduction,
    )
}

/// Rasterize one layer per class group, in group order.
///
/// An empty group selects every point. Groups are checked before any
/// binning takes place.
pub fn rasterize_groups<G>(
    points: &[Point],
    groups: &[G],
    origin: RasterOrigin,
    geometry: &TileGeometry,
    reduction: Reduction,
) -> Result<Vec<Grid<f32>>, GridError>
where
    G: AsRef<[ClassId]> + Sync,
{
    validate_groups(groups)?;

    debug!(
        "Rasterizing {} group(s) from {} points onto {}x{} px ({:?})",
        groups.len(),
        points.len(),
        geometry.grid_size(),
        geometry.grid_size(),
        reduction
    );

    #[cfg(feature = "parallel")]
    let layers = groups
        .par_iter()
        .map(|g| rasterize_group(points, g.as_ref(), origin, geometry, reduction))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let layers = groups
        .iter()
        .map(|g| rasterize_group(points, g.as_ref(), origin, geometry, reduction))
        .collect();

    Ok(layers)
}
