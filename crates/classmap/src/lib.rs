//! classmap: categorical class maps from classified LIDAR tiles.
//!
//! Per tile:
//!   1. [`ClassSelection`] checks the configuration against the classes seen
//!      in the cloud and resolves the raw classes to rasterize.
//!   2. `tilegrid` resolves the tile origin and bins one occupancy layer per
//!      raw class into a [`LayerStack`].
//!   3. [`apply_rules`] appends one AND-layer per [`CombinationRule`].
//!   4. [`flatten`] picks, per pixel, the first covering class of the
//!      precedence list (`NO_DATA` = 0 when none applies).
//!
//! [`TileRasterizer`] runs the whole chain. Every step is pure and borrows
//! the run-wide [`MapConfig`]; tiles can be processed on any thread.

mod combine;
mod config;
mod error;
mod flatten;
mod selection;
mod stack;
mod tile;

pub use combine::apply_rules;
pub use config::{CombinationRule, MapConfig};
pub use error::{ConfigError, MapError};
pub use flatten::{flatten, NO_DATA};
pub use selection::{validate_classes, ClassSelection};
pub use stack::LayerStack;
pub use tile::{BandStack, CategoricalTile, TileRasterizer};

pub use tilegrid::{ClassId, GeoTransform, Grid, Point, Reduction, TileGeometry};
