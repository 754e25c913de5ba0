use std::collections::BTreeMap;
use std::thread;

use anyhow::Result;
use classmap::{
    flatten, validate_classes, CombinationRule, ConfigError, Grid, LayerStack, MapConfig,
    MapError, Point, Reduction, TileRasterizer, NO_DATA,
};

const CONFIG: &str = r#"{
    "tile_width": 10,
    "buffer_size": 2,
    "pixel_size": 1,
    "CBI_rules": [{"CBI": [6, 5], "AGGREG": 56}],
    "precedence_classes": [56, 6, 5, 2],
    "ignored_classes": [1]
}"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tile [x0, x0 + 10] x [y0, y0 + 10] with a 2 m buffer. Ground on every
/// pixel node, a 3x3 building and a 4x4 vegetation patch overlapping it.
fn tile_cloud(x0: f64, y0: f64) -> Vec<Point> {
    let mut points = vec![
        // buffer
        Point::new(x0 - 2.0, y0 - 2.0, 0.0, 2),
        Point::new(x0 + 12.0, y0 + 12.0, 0.0, 2),
        // noise
        Point::new(x0 + 5.0, y0 + 5.0, 40.0, 1),
    ];

    for col in 0..10 {
        for row in 0..10 {
            let (x, y) = (x0 + col as f64, y0 + 10.0 - row as f64);
            points.push(Point::new(x, y, 0.0, 2));
            if (2..5).contains(&col) && (2..5).contains(&row) {
                points.push(Point::new(x, y, 8.0, 6));
            }
            if (3..7).contains(&col) && (3..7).contains(&row) {
                points.push(Point::new(x, y, 3.0, 5));
            }
        }
    }

    points
}

#[test]
fn test_full_tile_pipeline() -> Result<()> {
    init_logging();
    let config: MapConfig = serde_json::from_str(CONFIG)?;

    let tile = TileRasterizer::new(&config).render(&tile_cloud(1000.0, 2000.0))?;

    assert_eq!(tile.transform.to_array(), [999.5, 1.0, 0.0, 2010.5, 0.0, -1.0]);
    assert_eq!(tile.grid.shape(), (10, 10));
    assert_eq!(tile.transform.pixel_center(3, 3), (1003.0, 2007.0));

    assert_eq!(tile.grid.get(3, 3), Some(&56));
    assert_eq!(tile.grid.get(2, 2), Some(&6));
    assert_eq!(tile.grid.get(6, 6), Some(&5));
    assert_eq!(tile.grid.get(0, 0), Some(&2));

    let expected: BTreeMap<u16, usize> = [(2, 79), (5, 12), (6, 5), (56, 4)].into_iter().collect();
    assert_eq!(tile.class_histogram(), expected);
    assert_eq!(tile.palette, vec![(56, 0), (6, 1), (5, 2), (2, 3)]);

    Ok(())
}

#[test]
fn test_band_outputs() -> Result<()> {
    init_logging();
    let config: MapConfig = serde_json::from_str(CONFIG)?;
    let points = tile_cloud(1000.0, 2000.0);
    let rasterizer = TileRasterizer::new(&config);

    let occupancy = rasterizer.render_bands(&points, Reduction::Occupancy)?;
    assert_eq!(occupancy.stack.labels(), &[2, 5, 6, 56]);
    let overlap = occupancy.stack.layer(56).map(|l| l.data().iter().sum::<f32>());
    assert_eq!(overlap, Some(4.0));

    let density = rasterizer.render_bands(&points, Reduction::Density)?;
    assert_eq!(density.stack.labels(), &[2, 5, 6]);
    assert_eq!(density.transform, occupancy.transform);
    let ground = density.stack.layer(2).map(|l| l.data().iter().sum::<f32>());
    assert_eq!(ground, Some(100.0));

    Ok(())
}

#[test]
fn test_tiles_share_one_config_across_threads() -> Result<()> {
    init_logging();
    let config: MapConfig = serde_json::from_str(CONFIG)?;
    let rasterizer = TileRasterizer::new(&config);

    let corners = [(1000.0, 2000.0), (1010.0, 2000.0), (1000.0, 2010.0)];
    let tiles = thread::scope(|s| {
        let handles: Vec<_> = corners
            .iter()
            .map(|&(x0, y0)| s.spawn(move || rasterizer.render(&tile_cloud(x0, y0))))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("tile thread panicked"))
            .collect::<Result<Vec<_>, MapError>>()
    })?;

    let origins: Vec<[f64; 6]> = tiles.iter().map(|t| t.transform.to_array()).collect();
    assert_eq!(origins[1][0], 1009.5);
    assert_eq!(origins[2][3], 2020.5);
    for tile in &tiles {
        assert_eq!(tile.grid, tiles[0].grid);
    }

    Ok(())
}

#[test]
fn test_misconfigured_tile_is_rejected() -> Result<()> {
    init_logging();
    let config: MapConfig = serde_json::from_str(
        r#"{"tile_width": 10, "buffer_size": 2, "pixel_size": 1,
            "precedence_classes": [6, 5, 2]}"#,
    )?;

    let err = TileRasterizer::new(&config)
        .render(&tile_cloud(1000.0, 2000.0))
        .unwrap_err();
    assert_eq!(err, MapError::Config(ConfigError::UnhandledClasses { classes: vec![1] }));

    let mut wide = tile_cloud(1000.0, 2000.0);
    wide.push(Point::new(1030.0, 2005.0, 0.0, 2));
    let config: MapConfig = serde_json::from_str(CONFIG)?;
    let err = TileRasterizer::new(&config).render(&wide).unwrap_err();
    assert!(err.to_string().contains("exceeds tile width"));

    Ok(())
}

#[test]
fn test_precedence_literal() -> Result<()> {
    let layer = |rows: Vec<Vec<f32>>| Grid::from_rows(rows);
    let stack = LayerStack::from_layers(
        vec![3, 5, 35],
        vec![
            layer(vec![vec![1.0, 0.0], vec![0.0, 0.0]])?,
            layer(vec![vec![1.0, 1.0], vec![0.0, 0.0]])?,
            layer(vec![vec![1.0, 0.0], vec![1.0, 0.0]])?,
        ],
    )?;

    let flat = flatten(&stack, &[3, 35, 5])?;
    assert_eq!(flat, Grid::from_rows(vec![vec![3, 5], vec![35, NO_DATA]])?);

    let base = validate_classes(
        &[3, 35, 5].into_iter().collect(),
        &[CombinationRule::new(vec![3, 5], 35)],
        &[3, 35, 5],
        &[],
    )?;
    assert_eq!(base, vec![3, 5]);

    Ok(())
}
