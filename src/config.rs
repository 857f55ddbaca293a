use alloc::vec::Vec;
use core::time::Duration;

use crate::common::ConfigError;
use crate::ship::ShipType;

pub const BOARD_SIZE: u8 = 10;
pub(crate) const GRID: usize = BOARD_SIZE as usize;

pub const STANDARD_FLEET: [ShipType; 5] = [
    ShipType::new("carrier", 5, 1),
    ShipType::new("battleship", 4, 1),
    ShipType::new("cruiser", 3, 1),
    ShipType::new("submarine", 3, 1),
    ShipType::new("destroyer", 2, 1),
];

/// Pause before the automated side answers a turn handed over by a miss.
pub const DEFAULT_AI_TURN_DELAY: Duration = Duration::from_millis(1000);
/// Pause between consecutive automated moves after a hit.
pub const DEFAULT_AI_FOLLOWUP_DELAY: Duration = Duration::from_millis(1500);
/// Random draws per ship before falling back to enumerating legal spots.
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Tunables for a [`GameEngine`](crate::GameEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Ship types every fleet is built from.
    pub catalog: Vec<ShipType>,
    pub ai_turn_delay: Duration,
    pub ai_followup_delay: Duration,
    /// `None` retries random spots until one fits.
    pub placement_attempts: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog: STANDARD_FLEET.to_vec(),
            ai_turn_delay: DEFAULT_AI_TURN_DELAY,
            ai_followup_delay: DEFAULT_AI_FOLLOWUP_DELAY,
            placement_attempts: Some(DEFAULT_PLACEMENT_ATTEMPTS),
        }
    }
}

impl EngineConfig {
    /// Replace the fleet catalog.
    pub fn with_catalog(mut self, catalog: &[ShipType]) -> Self {
        self.catalog = catalog.to_vec();
        self
    }

    /// Use the same delay for every automated move.
    pub fn with_ai_delay(mut self, delay: Duration) -> Self {
        self.ai_turn_delay = delay;
        self.ai_followup_delay = delay;
        self
    }

    /// Total number of ship instances per fleet.
    pub fn fleet_size(&self) -> usize {
        self.catalog.iter().map(|t| t.count()).sum()
    }

    /// Check the catalog can make up a fleet on the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let mut cells = 0usize;
        for (i, ty) in self.catalog.iter().enumerate() {
            if self.catalog[..i].iter().any(|t| t.name() == ty.name()) {
                return Err(ConfigError::DuplicateName(ty.name()));
            }
            if ty.length() == 0 || ty.length() > GRID {
                return Err(ConfigError::InvalidLength {
                    name: ty.name(),
                    length: ty.length(),
                });
            }
            if ty.count() == 0 {
                return Err(ConfigError::ZeroCount(ty.name()));
            }
            cells += ty.length() * ty.count();
        }
        if cells > GRID * GRID {
            return Err(ConfigError::FleetTooLarge { cells });
        }
        Ok(())
    }

    /// Defaults with the delays overridden from `BATTLESHIP_AI_DELAY_MS` and
    /// `BATTLESHIP_AI_FOLLOWUP_MS` when they parse as milliseconds.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        fn millis(var: &str) -> Option<Duration> {
            std::env::var(var)
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        }

        let mut config = Self::default();
        if let Some(d) = millis("BATTLESHIP_AI_DELAY_MS") {
            config.ai_turn_delay = d;
        }
        if let Some(d) = millis("BATTLESHIP_AI_FOLLOWUP_MS") {
            config.ai_followup_delay = d;
        }
        config
    }
}

/// Look up a catalog entry by name, ignoring ASCII case.
pub fn ship_type_named(catalog: &[ShipType], name: &str) -> Option<ShipType> {
    catalog
        .iter()
        .copied()
        .find(|t| t.name().eq_ignore_ascii_case(name))
}
