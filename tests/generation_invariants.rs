//! Level generation and wave population properties across many seeds.

use delve::generation::utils;
use delve::{
    populate_wave, reachable_count, ClusterGenerator, EntityKind, EntityRegistry,
    GenerationConfig, Generator, GridMap, Position, SpawnEntry, Tile, SPAWN_POSITION,
};
use proptest::prelude::*;

fn generate(config: &GenerationConfig) -> GridMap {
    let mut rng = utils::create_rng(config);
    ClusterGenerator::new().generate(config, &mut rng)
}

fn border_is_wall(grid: &GridMap) -> bool {
    (0..grid.height() as i32).all(|y| {
        (0..grid.width() as i32).all(|x| {
            let pos = Position::new(x, y);
            !grid.is_border(pos) || grid.tile(pos) == Some(Tile::Wall)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_small_levels_stay_connected(seed in any::<u64>()) {
        let config = GenerationConfig::for_testing(seed);
        let grid = generate(&config);

        prop_assert!(border_is_wall(&grid));
        prop_assert_eq!(grid.tile(SPAWN_POSITION), Some(Tile::Ground));
        prop_assert_eq!(reachable_count(&grid, SPAWN_POSITION), grid.ground_count());
        prop_assert!(ClusterGenerator::new().validate(&grid, &config).is_ok());
    }

    #[test]
    fn test_population_lands_on_free_ground(seed in any::<u64>()) {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = utils::create_rng(&config);
        let grid = ClusterGenerator::new().generate(&config, &mut rng);
        let mut registry = EntityRegistry::new();
        populate_wave(&grid, &mut registry, &config, &mut rng);

        prop_assert_eq!(registry.player_position(), Some(SPAWN_POSITION));
        prop_assert_eq!(registry.count_of(EntityKind::Player), 1);
        prop_assert_eq!(registry.len(), config.requested_entities() + 1);
        for (pos, _) in registry.iter() {
            prop_assert!(grid.is_walkable(pos));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_full_size_levels_stay_connected(seed in any::<u64>()) {
        let config = GenerationConfig::new(seed);
        let grid = generate(&config);

        prop_assert_eq!(grid.width(), 80);
        prop_assert_eq!(grid.height(), 30);
        prop_assert!(border_is_wall(&grid));
        prop_assert_eq!(reachable_count(&grid, SPAWN_POSITION), grid.ground_count());
    }
}

#[test]
fn test_full_size_border_and_interior() {
    let config = GenerationConfig::new(2024);
    let grid = generate(&config);

    for x in 0..80 {
        assert_eq!(grid.tile(Position::new(x, 0)), Some(Tile::Wall));
        assert_eq!(grid.tile(Position::new(x, 29)), Some(Tile::Wall));
    }
    for y in 0..30 {
        assert_eq!(grid.tile(Position::new(0, y)), Some(Tile::Wall));
        assert_eq!(grid.tile(Position::new(79, y)), Some(Tile::Wall));
    }

    // Some clusters always survive on an 80x30 field.
    assert!(grid.ground_count() < 78 * 28);
}

#[test]
fn test_generation_is_deterministic_per_seed() {
    let config = GenerationConfig::new(99);
    assert_eq!(generate(&config), generate(&config));
}

#[test]
fn test_crowded_level_places_what_fits() {
    let grid = GridMap::from_rows(&["#######", "#     #", "#######"]);
    let mut config = GenerationConfig::for_testing(3);
    config.spawn_table = vec![SpawnEntry {
        kind: EntityKind::Boss,
        count: 10,
    }];

    let mut rng = utils::create_rng(&config);
    let mut registry = EntityRegistry::new();
    populate_wave(&grid, &mut registry, &config, &mut rng);

    assert_eq!(registry.count_of(EntityKind::Boss), 4);
    assert_eq!(registry.player_position(), Some(SPAWN_POSITION));
}
