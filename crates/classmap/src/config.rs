use serde::{Deserialize, Serialize};
use tilegrid::{ClassId, GridError, TileGeometry};

/// "Pixel belongs to `aggreg` wherever every class in `cbi` is present."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationRule {
    #[serde(rename = "CBI")]
    pub cbi: Vec<ClassId>,
    #[serde(rename = "AGGREG")]
    pub aggreg: ClassId,
}

impl CombinationRule {
    pub fn new(cbi: Vec<ClassId>, aggreg: ClassId) -> Self {
        Self { cbi, aggreg }
    }
}

/// Run-wide class map settings, read-only once built.
///
/// One value is shared by reference across every tile of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawMapConfig")]
pub struct MapConfig {
    geometry: TileGeometry,
    rules: Vec<CombinationRule>,
    precedence: Vec<ClassId>,
    ignored: Vec<ClassId>,
}

impl MapConfig {
    pub fn new(
        geometry: TileGeometry,
        rules: Vec<CombinationRule>,
        precedence: Vec<ClassId>,
        ignored: Vec<ClassId>,
    ) -> Self {
        Self {
            geometry,
            rules,
            precedence,
            ignored,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &TileGeometry {
        &self.geometry
    }

    /// Combination rules in application order.
    #[inline]
    pub fn rules(&self) -> &[CombinationRule] {
        &self.rules
    }

    /// Class ids, highest priority first.
    #[inline]
    pub fn precedence(&self) -> &[ClassId] {
        &self.precedence
    }

    /// Classification codes dropped without complaint.
    #[inline]
    pub fn ignored(&self) -> &[ClassId] {
        &self.ignored
    }
}

// Flat on-disk shape; geometry is validated on the way in.
#[derive(Deserialize)]
struct RawMapConfig {
    tile_width: f64,
    buffer_size: f64,
    pixel_size: f64,
    #[serde(rename = "CBI_rules", default)]
    rules: Vec<CombinationRule>,
    #[serde(rename = "precedence_classes")]
    precedence: Vec<ClassId>,
    #[serde(rename = "ignored_classes", default)]
    ignored: Vec<ClassId>,
}

impl TryFrom<RawMapConfig> for MapConfig {
    type Error = GridError;

    fn try_from(raw: RawMapConfig) -> Result<Self, Self::Error> {
        let geometry = TileGeometry::new(raw.tile_width, raw.buffer_size, raw.pixel_size)?;
        Ok(Self::new(geometry, raw.rules, raw.precedence, raw.ignored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_config() {
        let json = r#"{
            "tile_width": 1000,
            "buffer_size": 100,
            "pixel_size": 0.5,
            "CBI_rules": [{"CBI": [3, 5], "AGGREG": 35}],
            "precedence_classes": [3, 35, 5],
            "ignored_classes": [1, 65]
        }"#;

        let config: MapConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.geometry().grid_size(), 2000);
        assert_eq!(config.rules(), &[CombinationRule::new(vec![3, 5], 35)]);
        assert_eq!(config.precedence(), &[3, 35, 5]);
        assert_eq!(config.ignored(), &[1, 65]);
    }

    #[test]
    fn test_optional_lists_default_to_empty() {
        let json = r#"{"tile_width": 500, "buffer_size": 0, "pixel_size": 1,
                       "precedence_classes": [2]}"#;

        let config: MapConfig = serde_json::from_str(json).unwrap();
        assert!(config.rules().is_empty());
        assert!(config.ignored().is_empty());
    }

    #[test]
    fn test_invalid_geometry_rejected_at_load() {
        let json = r#"{"tile_width": 500, "buffer_size": -5, "pixel_size": 1,
                       "precedence_classes": [2]}"#;

        let err = serde_json::from_str::<MapConfig>(json).unwrap_err();
        assert!(err.to_string().contains("buffer_size"));
    }

    #[test]
    fn test_non_integer_class_rejected_at_load() {
        let json = r#"{"tile_width": 500, "buffer_size": 0, "pixel_size": 1,
                       "precedence_classes": [2, "ground"]}"#;
        assert!(serde_json::from_str::<MapConfig>(json).is_err());

        let json = r#"{"tile_width": 500, "buffer_size": 0, "pixel_size": 1,
                       "precedence_classes": [2],
                       "CBI_rules": [{"CBI": 3, "AGGREG": 7}]}"#;
        assert!(serde_json::from_str::<MapConfig>(json).is_err());
    }
}
