use std::time::Duration;

use battleship_engine::{
    ship_type_named, ConfigError, EngineConfig, EngineError, GameEngine, ShipType,
    DEFAULT_AI_FOLLOWUP_DELAY, STANDARD_FLEET,
};

#[test]
fn test_default_config_is_standard_fleet() {
    let config = EngineConfig::default();
    assert_eq!(config.catalog, STANDARD_FLEET.to_vec());
    assert_eq!(config.fleet_size(), 5);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_validate_rejects_bad_catalogs() {
    let cases: Vec<(Vec<ShipType>, ConfigError)> = vec![
        (vec![], ConfigError::EmptyCatalog),
        (
            vec![ShipType::new("pt", 2, 1), ShipType::new("pt", 3, 1)],
            ConfigError::DuplicateName("pt"),
        ),
        (
            vec![ShipType::new("raft", 0, 1)],
            ConfigError::InvalidLength {
                name: "raft",
                length: 0,
            },
        ),
        (vec![ShipType::new("ghost", 2, 0)], ConfigError::ZeroCount("ghost")),
        (
            vec![ShipType::new("wall", 10, 11)],
            ConfigError::FleetTooLarge { cells: 110 },
        ),
    ];
    for (catalog, expected) in cases {
        let config = EngineConfig::default().with_catalog(&catalog);
        assert_eq!(config.validate(), Err(expected));
        assert_eq!(
            GameEngine::with_seed(config, 0).unwrap_err(),
            EngineError::Config(expected)
        );
    }
}

#[test]
fn test_lookup_ignores_case() {
    assert_eq!(
        ship_type_named(&STANDARD_FLEET, "Submarine").map(|t| t.length()),
        Some(3)
    );
    assert!(ship_type_named(&STANDARD_FLEET, "frigate").is_none());
}

#[test]
fn test_from_env_overrides_delays() {
    std::env::set_var("BATTLESHIP_AI_DELAY_MS", "25");
    std::env::set_var("BATTLESHIP_AI_FOLLOWUP_MS", "not a number");
    let config = EngineConfig::from_env();
    std::env::remove_var("BATTLESHIP_AI_DELAY_MS");
    std::env::remove_var("BATTLESHIP_AI_FOLLOWUP_MS");

    assert_eq!(config.ai_turn_delay, Duration::from_millis(25));
    assert_eq!(config.ai_followup_delay, DEFAULT_AI_FOLLOWUP_DELAY);
}
