use thiserror::Error;

use crate::ClassId;

/// Errors raised while resolving tile geometry or binning points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("invalid tile geometry: {0}")]
    InvalidGeometry(String),

    /// The buffered cloud, once the margin is stripped, is wider than one tile.
    #[error(
        "tile extent {diff_x:.3} x {diff_y:.3} m exceeds tile width {tile_width} m \
         (buffer {buffer_size} m stripped); buffering or tile assignment is inconsistent"
    )]
    Extent {
        diff_x: f64,
        diff_y: f64,
        tile_width: f64,
        buffer_size: f64,
    },

    #[error("point cloud is empty; no tile origin can be resolved")]
    EmptyCloud,

    #[error("class group {group} contains {class}, which is not a classification code (0-255)")]
    InvalidClassGroup { group: usize, class: ClassId },

    #[error("{len} values cannot fill a {rows}x{cols} grid")]
    DataLength { rows: usize, cols: usize, len: usize },

    #[error("grid shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
}
