use std::collections::BTreeMap;

use log::{debug, info};
use tilegrid::{
    classes_present, rasterize_groups, resolve_origin, ClassId, GeoTransform, Grid, Point,
    RasterOrigin, Reduction,
};

use crate::{apply_rules, flatten, ClassSelection, LayerStack, MapConfig, MapError};

/// Single-band class map of one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalTile {
    pub transform: GeoTransform,
    /// Winning class per pixel, `NO_DATA` where no class applies.
    pub grid: Grid<ClassId>,
    /// `(class, rank)` in precedence order.
    pub palette: Vec<(ClassId, usize)>,
}

impl CategoricalTile {
    /// Pixel count per value, `NO_DATA` included.
    pub fn class_histogram(&self) -> BTreeMap<ClassId, usize> {
        let mut histogram = BTreeMap::new();
        for &class in self.grid.data() {
            *histogram.entry(class).or_insert(0) += 1;
        }
        histogram
    }
}

/// One band per class, ready for a multi-band raster writer.
#[derive(Debug, Clone, PartialEq)]
pub struct BandStack {
    pub transform: GeoTransform,
    pub reduction: Reduction,
    pub stack: LayerStack,
}

/// Runs the per-tile chain: class selection, origin, layers, aggregates,
/// precedence.
///
/// Holds nothing but a borrowed configuration, so one value can serve any
/// number of tiles, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct TileRasterizer<'a> {
    config: &'a MapConfig,
}

impl<'a> TileRasterizer<'a> {
    pub fn new(config: &'a MapConfig) -> Self {
        Self { config }
    }

    /// Validate the tile's classes and resolve its pixel-centred origin.
    fn prepare(&self, points: &[Point]) -> Result<(ClassSelection<'a>, RasterOrigin), MapError> {
        let present = classes_present(points);
        let selection = ClassSelection::resolve(self.config, &present)?;

        let geometry = self.config.geometry();
        let origin = resolve_origin(points, geometry)?.pixel_centered(geometry.pixel_size());

        Ok((selection, origin))
    }

    fn base_stack(
        &self,
        points: &[Point],
        selection: &ClassSelection<'a>,
        origin: RasterOrigin,
        reduction: Reduction,
    ) -> Result<LayerStack, MapError> {
        let geometry = self.config.geometry();
        let groups: Vec<[ClassId; 1]> = selection.base_classes().iter().map(|&c| [c]).collect();
        let layers = rasterize_groups(points, &groups, origin, geometry, reduction)?;

        let mut stack = LayerStack::new(geometry.grid_size(), geometry.grid_size());
        for (&class, layer) in selection.base_classes().iter().zip(layers) {
            stack.push(class, layer)?;
        }
        Ok(stack)
    }

    /// Multi-band output.
    ///
    /// Occupancy bands include the aggregate classes after the base classes.
    /// Density bands hold one band per base class only.
    pub fn render_bands(&self, points: &[Point], reduction: Reduction) -> Result<BandStack, MapError> {
        let (selection, origin) = self.prepare(points)?;
        let mut stack = self.base_stack(points, &selection, origin, reduction)?;

        if reduction == Reduction::Occupancy {
            stack = apply_rules(stack, selection.rules())?;
        }

        debug!("Band stack {:?}: labels {:?}", reduction, stack.labels());

        Ok(BandStack {
            transform: GeoTransform::from_origin(origin, self.config.geometry().pixel_size()),
            reduction,
            stack,
        })
    }

    /// Single-band categorical output.
    pub fn render(&self, points: &[Point]) -> Result<CategoricalTile, MapError> {
        let (selection, origin) = self.prepare(points)?;

        let stack = self.base_stack(points, &selection, origin, Reduction::Occupancy)?;
        let stack = apply_rules(stack, selection.rules())?;
        let grid = flatten(&stack, selection.precedence())?;

        let tile = CategoricalTile {
            transform: GeoTransform::from_origin(origin, self.config.geometry().pixel_size()),
            grid,
            palette: selection.palette(),
        };

        info!(
            "Tile ({:.1}, {:.1}): {} points -> {}x{} px, {} layer(s), classes {:?}",
            origin.x,
            origin.y,
            points.len(),
            tile.grid.rows(),
            tile.grid.cols(),
            stack.len(),
            tile.class_histogram()
        );

        Ok(tile)
    }
}
