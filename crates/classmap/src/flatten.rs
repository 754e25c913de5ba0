use tilegrid::{ClassId, Grid};

use crate::stack::is_present;
use crate::{LayerStack, MapError};

/// Pixel value for "no configured class here".
pub const NO_DATA: ClassId = 0;

/// Collapse a stack into one categorical band.
///
/// Each pixel takes the first class in `precedence` whose layer covers it;
/// pixels no class covers stay [`NO_DATA`]. A pixel, once set, is never
/// overwritten by a later class.
pub fn flatten(stack: &LayerStack, precedence: &[ClassId]) -> Result<Grid<ClassId>, MapError> {
    let ordered = precedence
        .iter()
        .map(|&class| stack.require(class).map(|layer| (class, layer)))
        .collect::<Result<Vec<_>, _>>()?;

    let (rows, cols) = stack.shape();
    let mut result = Grid::filled(rows, cols, NO_DATA);

    for (class, layer) in ordered {
        for (out, &value) in result.data_mut().iter_mut().zip(layer.data()) {
            if *out == NO_DATA && is_present(value) {
                *out = class;
            }
        }
    }

    Ok(result)
}
