use log::warn;

use crate::GridError;

/// Declared geometry of one square tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGeometry {
    tile_width: f64,
    buffer_size: f64,
    pixel_size: f64,
}

impl TileGeometry {
    /// Validate and build a tile geometry (all values in metres).
    pub fn new(tile_width: f64, buffer_size: f64, pixel_size: f64) -> Result<Self, GridError> {
        if !(tile_width.is_finite() && tile_width > 0.0) {
            return Err(GridError::InvalidGeometry(format!(
                "tile_width must be a positive number, got {tile_width}"
            )));
        }
        if !(pixel_size.is_finite() && pixel_size > 0.0) {
            return Err(GridError::InvalidGeometry(format!(
                "pixel_size must be a positive number, got {pixel_size}"
            )));
        }
        if !(buffer_size.is_finite() && buffer_size >= 0.0) {
            return Err(GridError::InvalidGeometry(format!(
                "buffer_size must be zero or positive, got {buffer_size}"
            )));
        }

        let geometry = Self {
            tile_width,
            buffer_size,
            pixel_size,
        };

        if geometry.grid_size() == 0 {
            return Err(GridError::InvalidGeometry(format!(
                "pixel_size {pixel_size} is larger than tile_width {tile_width}"
            )));
        }

        let covered = geometry.grid_size() as f64 * pixel_size;
        if (covered - tile_width).abs() > 1e-9 * tile_width.max(1.0) {
            warn!(
                "tile_width {} is not a multiple of pixel_size {}; grid covers {} m",
                tile_width, pixel_size, covered
            );
        }

        Ok(geometry)
    }

    #[inline]
    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    #[inline]
    pub fn buffer_size(&self) -> f64 {
        self.buffer_size
    }

    #[inline]
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Pixels per side: `tile_width / pixel_size`, rounded.
    #[inline]
    pub fn grid_size(&self) -> usize {
        (self.tile_width / self.pixel_size).round() as usize
    }
}

/// Ground coordinate of a raster's north-west corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOrigin {
    pub x: f64,
    pub y: f64,
}

impl RasterOrigin {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift by half a pixel west and north so pixel centres land on the
    /// nominal grid nodes.
    #[inline]
    pub fn pixel_centered(self, pixel_size: f64) -> Self {
        Self {
            x: self.x - pixel_size / 2.0,
            y: self.y + pixel_size / 2.0,
        }
    }
}

/// North-up affine transform in GDAL coefficient order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_size: f64,
}

impl GeoTransform {
    #[inline]
    pub fn from_origin(origin: RasterOrigin, pixel_size: f64) -> Self {
        Self {
            origin_x: origin.x,
            origin_y: origin.y,
            pixel_size,
        }
    }

    /// `[origin_x, pixel_size, 0, origin_y, 0, -pixel_size]`
    #[inline]
    pub fn to_array(self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_size,
            0.0,
            self.origin_y,
            0.0,
            -self.pixel_size,
        ]
    }

    /// Ground coordinate of the centre of pixel `(row, col)`.
    #[inline]
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        (
            self.origin_x + (col as f64 + 0.5) * self.pixel_size,
            self.origin_y - (row as f64 + 0.5) * self.pixel_size,
        )
    }

    /// Pixel `(row, col)` containing a ground coordinate, if it falls inside
    /// a `size x size` grid.
    pub fn pixel_at(&self, x: f64, y: f64, size: usize) -> Option<(usize, usize)> {
        let col = ((x - self.origin_x) / self.pixel_size).floor();
        let row = ((self.origin_y - y) / self.pixel_size).floor();

        if !(col.is_finite() && row.is_finite()) || col < 0.0 || row < 0.0 {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        (row < size && col < size).then_some((row, col))
    }
}
