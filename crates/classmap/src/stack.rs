use tilegrid::{ClassId, Grid, GridError};

use crate::MapError;

/// A class covers a pixel when its layer value there is positive.
#[inline]
pub(crate) fn is_present(value: f32) -> bool {
    value > 0.0
}

/// Ordered class layers, each tagged with the class id it represents.
///
/// Labels and layers always have the same length and every layer has the
/// stack's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    rows: usize,
    cols: usize,
    labels: Vec<ClassId>,
    layers: Vec<Grid<f32>>,
}

impl LayerStack {
    /// An empty stack accepting `rows x cols` layers.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            labels: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Pair `labels[i]` with `layers[i]`. The first layer fixes the shape.
    pub fn from_layers(labels: Vec<ClassId>, layers: Vec<Grid<f32>>) -> Result<Self, MapError> {
        if labels.len() != layers.len() {
            return Err(MapError::LabelCount {
                labels: labels.len(),
                layers: layers.len(),
            });
        }

        let (rows, cols) = layers.first().map_or((0, 0), Grid::shape);
        let mut stack = Self::new(rows, cols);
        for (label, layer) in labels.into_iter().zip(layers) {
            stack.push(label, layer)?;
        }
        Ok(stack)
    }

    pub fn push(&mut self, label: ClassId, layer: Grid<f32>) -> Result<(), MapError> {
        if layer.shape() != (self.rows, self.cols) {
            return Err(GridError::ShapeMismatch {
                expected_rows: self.rows,
                expected_cols: self.cols,
                rows: layer.rows(),
                cols: layer.cols(),
            }
            .into());
        }
        self.labels.push(label);
        self.layers.push(layer);
        Ok(())
    }

    /// First layer carrying `label`.
    pub fn layer(&self, label: ClassId) -> Option<&Grid<f32>> {
        self.labels
            .iter()
            .position(|&l| l == label)
            .map(|i| &self.layers[i])
    }

    /// Like [`LayerStack::layer`], failing when the label is absent.
    pub fn require(&self, label: ClassId) -> Result<&Grid<f32>, MapError> {
        self.layer(label)
            .ok_or(MapError::MissingLayer { class: label })
    }

    #[inline]
    pub fn labels(&self) -> &[ClassId] {
        &self.labels
    }

    #[inline]
    pub fn layers(&self) -> &[Grid<f32>] {
        &self.layers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &Grid<f32>)> + '_ {
        self.labels.iter().copied().zip(self.layers.iter())
    }

    pub fn into_parts(self) -> (Vec<ClassId>, Vec<Grid<f32>>) {
        (self.labels, self.layers)
    }
}
