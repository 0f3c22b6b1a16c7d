//! Tests for coordinate conversion

use super::*;
use proptest::prelude::*;

#[test]
fn test_new_york_city_at_zoom_16() {
    // New York City: 40.7128°N, 74.0060°W
    let coord = to_tile_coordinate(GeoPoint::new(40.7128, -74.0060), 16);

    assert_eq!(coord.x.floor() as u32, 19295);
    assert_eq!(coord.y.floor() as u32, 24640);
}

#[test]
fn test_london_at_zoom_10() {
    // London: 51.5074°N, 0.1278°W
    let coord = to_tile_coordinate(GeoPoint::new(51.5074, -0.1278), 10);

    assert_eq!(coord.x.floor() as u32, 511);
    assert_eq!(coord.y.floor() as u32, 340);
}

#[test]
fn test_equator_prime_meridian_is_world_center() {
    let coord = to_tile_coordinate(GeoPoint::new(0.0, 0.0), 1);

    assert!((coord.x - 1.0).abs() < 1e-12);
    assert!((coord.y - 1.0).abs() < 1e-12);
}

#[test]
fn test_fixed_point_equator_prime_meridian() {
    let fixed = to_fixed_point(GeoPoint::new(0.0, 0.0));

    assert_eq!(fixed.x, 1 << 31);
    assert_eq!(fixed.y, 1 << 31);
    assert_eq!(fixed.tile_index(0), (0, 0));
    assert_eq!(fixed.tile_index(1), (1, 1));
    assert_eq!(fixed.tile_index(2), (2, 2));
}

#[test]
fn test_fixed_point_matches_float_at_display_zoom() {
    let point = GeoPoint::new(40.7128, -74.0060);
    let fixed = to_fixed_point(point);

    for zoom in [0u8, 5, 10, 16, 20] {
        let coord = to_tile_coordinate(point, zoom);
        assert_eq!(
            fixed.tile_index(zoom),
            (coord.x.floor() as u32, coord.y.floor() as u32),
            "zoom {} tile index should agree with float projection",
            zoom
        );
    }
}

#[test]
fn test_fixed_point_clamps_antimeridian() {
    // lon = 180 lands exactly on the world edge; it belongs to the last tile
    let fixed = to_fixed_point(GeoPoint::new(0.0, 180.0));

    assert_eq!(fixed.x, 1u64 << PRECISION_BITS);
    assert_eq!(fixed.tile_index(0), (0, 0));
    assert_eq!(fixed.tile_index(3).0, 7);
}

#[test]
fn test_fixed_point_clamps_northern_limit() {
    let fixed = to_fixed_point(GeoPoint::new(MAX_LAT, MIN_LON));

    assert_eq!(fixed.x, 0);
    assert_eq!(fixed.y, 0);
}

#[test]
fn test_subdivision_and_subtile_offset() {
    let fixed = FixedTileCoord {
        x: (5u64 << 29) | (0xAB << 21),
        y: (3u64 << 29) | (0x10 << 21),
    };

    // zoom 3: tile index in the top 3 bits, sub-tile offset in the next 8
    assert_eq!(fixed.tile_index(3), (5, 3));
    assert_eq!(fixed.subdivision(3), ((5 << 8) | 0xAB, (3 << 8) | 0x10));
    assert_eq!(fixed.subtile_offset(3), (0xAB, 0x10));
}

#[test]
fn test_subdivision_at_max_zoom_uses_all_bits() {
    let fixed = FixedTileCoord {
        x: 0xDEAD_BEEF,
        y: 0x1234_5678,
    };

    assert_eq!(fixed.subdivision(MAX_ZOOM), (0xDEAD_BEEF, 0x1234_5678));
    assert_eq!(fixed.subtile_offset(MAX_ZOOM), (0xEF, 0x78));
}

#[test]
fn test_projected_origin() {
    let projected = to_projected(GeoPoint::new(0.0, 0.0));

    assert!(projected.x.abs() < 1e-6);
    assert!(projected.y.abs() < 1e-6);
}

#[test]
fn test_projected_world_extent() {
    let east = to_projected(GeoPoint::new(0.0, 180.0));
    assert!((east.x - ORIGIN_SHIFT).abs() < 1e-6);

    let north = to_projected(GeoPoint::new(85.0511287798066, 0.0));
    assert!(
        (north.y - ORIGIN_SHIFT).abs() < 1.0,
        "northern limit should project to the square world edge, got {}",
        north.y
    );
}

#[test]
fn test_projected_is_antisymmetric() {
    let ne = to_projected(GeoPoint::new(40.7, -74.0));
    let sw = to_projected(GeoPoint::new(-40.7, 74.0));

    assert!((ne.x + sw.x).abs() < 1e-6);
    assert!((ne.y + sw.y).abs() < 1e-6);
}

#[test]
fn test_tile_coordinate_to_geo_tile_corner() {
    // Northwest corner of tile (19295, 24640) at zoom 16 is just north-west of NYC
    let geo = tile_coordinate_to_geo(
        TileCoordinate {
            x: 19295.0,
            y: 24640.0,
        },
        16,
    );

    assert!((geo.latitude - 40.713).abs() < 0.01);
    assert!((geo.longitude - (-74.007)).abs() < 0.01);
}

proptest! {
    #[test]
    fn prop_roundtrip_recovers_point(
        lat in -85.0f64..85.0,
        lon in -179.999f64..179.999,
    ) {
        let original = GeoPoint::new(lat, lon);
        let coord = to_tile_coordinate(original, PRECISION_BITS);
        let recovered = tile_coordinate_to_geo(coord, PRECISION_BITS);

        prop_assert!((recovered.latitude - lat).abs() < 1e-9);
        prop_assert!((recovered.longitude - lon).abs() < 1e-9);
    }

    #[test]
    fn prop_fixed_point_within_world(
        lat in MIN_LAT..=MAX_LAT,
        lon in MIN_LON..=MAX_LON,
    ) {
        let fixed = to_fixed_point(GeoPoint::new(lat, lon));
        let max = 1u64 << PRECISION_BITS;

        prop_assert!(fixed.x <= max);
        prop_assert!(fixed.y <= max);
        prop_assert_eq!(fixed.tile_index(0), (0, 0));
    }
}
