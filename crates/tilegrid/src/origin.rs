use log::debug;

use crate::{GridError, Point, RasterOrigin, TileGeometry};

/// Resolve the canonical north-west corner of the tile a buffered cloud
/// belongs to.
///
/// The buffer margin is stripped from the cloud's bounds to recover the
/// nominal tile extent; x is snapped down and y snapped up to a multiple of
/// `tile_width`, so small variations in buffer coverage never move the
/// origin.
pub fn resolve_origin(points: &[Point], geometry: &TileGeometry) -> Result<RasterOrigin, GridError> {
    if points.is_empty() {
        return Err(GridError::EmptyCloud);
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);

    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let tile_width = geometry.tile_width();
    let buffer = geometry.buffer_size();

    let (xmin, ymin) = (min_x + buffer, min_y + buffer);
    let (xmax, ymax) = (max_x - buffer, max_y - buffer);

    let diff_x = xmax - xmin;
    let diff_y = ymax - ymin;

    if diff_x.abs() > tile_width || diff_y.abs() > tile_width {
        return Err(GridError::Extent {
            diff_x,
            diff_y,
            tile_width,
            buffer_size: buffer,
        });
    }

    let origin = RasterOrigin::new(
        (xmin / tile_width).floor() * tile_width,
        (ymax / tile_width).ceil() * tile_width,
    );

    debug!(
        "Tile origin ({:.3}, {:.3}) from stripped extent x=[{:.3}, {:.3}] y=[{:.3}, {:.3}]",
        origin.x, origin.y, xmin, xmax, ymin, ymax
    );

    Ok(origin)
}
