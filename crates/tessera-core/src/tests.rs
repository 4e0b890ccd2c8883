#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::constants::*;
    use crate::enums::{FeatureKind, SampleDepth};
    use crate::paths::{OverlayPath, PowerLinePath, RailPath, RoadPath, SplinePoint};
    use crate::types::*;

    fn make_grid() -> ElevationGrid {
        #[rustfmt::skip]
        let samples: Vec<u16> = vec![
            1, 2, 3,
            4, 5, 6,
        ];
        ElevationGrid::new(3, 2, samples).unwrap()
    }

    fn straight_points(n: usize) -> Vec<SplinePoint> {
        (0..n)
            .map(|i| SplinePoint::new(DVec3::new(i as f64 * 10.0, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_grid_rejects_wrong_sample_count() {
        let err = ElevationGrid::new(3, 3, vec![0; 8]).unwrap_err();
        assert_eq!(
            err,
            GridError::SampleCount {
                width: 3,
                height: 3,
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn test_grid_accessors() {
        let grid = make_grid();
        assert_eq!(grid.get(0, 0), Some(1));
        assert_eq!(grid.get(2, 1), Some(6));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.row(1), &[4, 5, 6]);
        assert_eq!(grid.min_max(), Some((1, 6)));
    }

    #[test]
    fn test_flip_rows_reverses_row_order() {
        let flipped = make_grid().flip_rows();
        assert_eq!(flipped.samples(), &[4, 5, 6, 1, 2, 3]);
        assert_eq!(flipped.width(), 3);
        assert_eq!(flipped.height(), 2);
    }

    #[test]
    fn test_flip_rows_is_involution() {
        let samples: Vec<u16> = (0..35u16).map(|v| v.wrapping_mul(1871)).collect();
        let grid = ElevationGrid::new(5, 7, samples).unwrap();
        assert_eq!(grid.flip_rows().flip_rows(), grid);
    }

    #[test]
    fn test_flip_rows_empty_grid() {
        let grid = ElevationGrid::new(0, 0, Vec::new()).unwrap();
        assert_eq!(grid.flip_rows(), grid);
        assert_eq!(grid.min_max(), None);
    }

    #[test]
    fn test_grid_serde_enforces_invariant() {
        let grid = make_grid();
        let json = serde_json::to_string(&grid).unwrap();
        let back: ElevationGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);

        let bad = r#"{"width":2,"height":2,"samples":[1,2,3]}"#;
        assert!(serde_json::from_str::<ElevationGrid>(bad).is_err());
    }

    #[test]
    fn test_sample_to_elevation() {
        let meta = TerrainMetadata {
            width: 2,
            height: 2,
            min_elevation: -100.0,
            max_elevation: 900.0,
            pixel_size_x: 30.0,
            pixel_size_y: 30.0,
            crs: "EPSG:4326".into(),
            bounds: None,
        };
        assert!(meta.has_valid_elevation_range());
        assert!((meta.sample_to_elevation(0) + 100.0).abs() < 1e-9);
        assert!((meta.sample_to_elevation(MAX_SAMPLE) - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_elevation_range() {
        let meta = TerrainMetadata {
            width: 1,
            height: 1,
            min_elevation: 50.0,
            max_elevation: 50.0,
            pixel_size_x: 1.0,
            pixel_size_y: 1.0,
            crs: String::new(),
            bounds: None,
        };
        assert!(!meta.has_valid_elevation_range());
    }

    #[test]
    fn test_bounds_from_array() {
        let b = GeoBounds::from_array([10.0, 20.0, 11.0, 22.0]);
        assert_eq!(b.min, [10.0, 20.0]);
        assert_eq!(b.max, [11.0, 22.0]);
        assert!((b.width() - 1.0).abs() < 1e-12);
        assert!((b.height() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tile_origins() {
        let layout = TileLayout::new(63, 2, 2, true);
        let origins: Vec<[u32; 2]> = layout.tile_origins().collect();
        assert_eq!(origins, vec![[0, 0], [63, 0], [0, 63], [63, 63]]);
        assert_eq!(layout.tile_count(), 4);
        assert_eq!(layout.covered_quads(), (126, 126));
        assert_eq!(layout.vertices_per_tile(), 64);
        assert_eq!(layout.subsection_quads(), 63);
        assert_eq!(layout.sections_per_tile, SECTIONS_PER_TILE);
    }

    #[test]
    fn test_world_extent() {
        let terrain = NormalizedTerrain {
            grid: ElevationGrid::filled(11, 21, 0),
            scale: DVec3::new(100.0, 50.0, 1.0),
            layout: TileLayout::new(7, 1, 1, false),
        };
        let extent = terrain.world_extent();
        assert!((extent.x - 1000.0).abs() < 1e-9);
        assert!((extent.y - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_result_paths_order_and_kinds() {
        let result = TerrainImportResult {
            terrain: NormalizedTerrain {
                grid: ElevationGrid::filled(2, 2, 0),
                scale: DVec3::ONE,
                layout: TileLayout::new(255, 1, 1, true),
            },
            roads: vec![RoadPath {
                id: "r1".into(),
                name: "Main".into(),
                road_type: "primary".into(),
                width: 800.0,
                lanes: 2,
                surface: "asphalt".into(),
                one_way: false,
                points: straight_points(3),
            }],
            railways: vec![RailPath {
                id: "t1".into(),
                tracks: 2,
                electrified: true,
                gauge: DEFAULT_RAIL_GAUGE_METERS,
                points: straight_points(2),
            }],
            power_lines: vec![PowerLinePath {
                id: "p1".into(),
                cables: 3,
                voltage: "110000".into(),
                cable_points: straight_points(4),
                tower_positions: vec![DVec3::ZERO],
            }],
        };

        let kinds: Vec<FeatureKind> = result.paths().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![FeatureKind::Road, FeatureKind::Railway, FeatureKind::PowerLine]
        );
        assert_eq!(result.feature_count(), 3);

        let line = result.paths().last().unwrap();
        assert_eq!(line.id(), "p1");
        assert_eq!(line.points().len(), 4);
        assert!((line.polyline_length() - 30.0).abs() < 1e-9);

        match result.paths().next().unwrap() {
            OverlayPath::Road(road) => assert_eq!(road.name, "Main"),
            other => panic!("expected road first, got {:?}", other.kind()),
        };
    }

    #[test]
    fn test_feature_kind_keys() {
        assert_eq!(FeatureKind::Road.collection_key(), "roads");
        assert_eq!(FeatureKind::Railway.points_key(), "points");
        assert_eq!(FeatureKind::PowerLine.collection_key(), "power_lines");
        assert_eq!(FeatureKind::PowerLine.points_key(), "cable_points");
    }

    #[test]
    fn test_feature_kind_serde() {
        let variants = vec![FeatureKind::Road, FeatureKind::Railway, FeatureKind::PowerLine];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: FeatureKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        assert_eq!(
            serde_json::to_string(&FeatureKind::PowerLine).unwrap(),
            "\"power_line\""
        );
    }

    #[test]
    fn test_sample_depth_from_bits() {
        assert_eq!(SampleDepth::from_bits(8), Some(SampleDepth::Eight));
        assert_eq!(SampleDepth::from_bits(16), Some(SampleDepth::Sixteen));
        assert_eq!(SampleDepth::from_bits(12), None);
        assert_eq!(SampleDepth::Sixteen.bytes_per_sample(), 2);
        assert_eq!(SampleDepth::Eight.bits(), 8);
    }
}
