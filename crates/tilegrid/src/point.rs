use std::collections::BTreeSet;

/// Class identifier shared by raw classification codes and aggregate classes.
///
/// Raw LIDAR codes occupy `0..=255`; aggregate ids may use the full range.
pub type ClassId = u16;

/// One classified LIDAR return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub classification: u8,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, classification: u8) -> Self {
        Self {
            x,
            y,
            z,
            classification,
        }
    }

    /// Whether this point's classification matches `class`.
    #[inline]
    pub fn is_class(&self, class: ClassId) -> bool {
        ClassId::from(self.classification) == class
    }
}

/// Distinct classification codes observed in a cloud, ascending.
pub fn classes_present(points: &[Point]) -> BTreeSet<u8> {
    points.iter().map(|p| p.classification).collect()
}
