use crate::config::{GameConfig, PlayerConfig};
use crate::games::SessionRng;
use super::error::SetupError;
use super::player::{ComputerPlayer, GamePlayer, HumanPlayer, PlayerKind};
use super::types::{Symbol, Variant};

pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 12;
pub const DEFAULT_GRID_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBinding {
    pub kind: PlayerKind,
    pub symbol: Symbol,
}

impl PlayerBinding {
    pub fn human(symbol: Symbol) -> Self {
        Self { kind: PlayerKind::Human, symbol }
    }

    pub fn computer(symbol: Symbol) -> Self {
        Self { kind: PlayerKind::Computer, symbol }
    }

    pub fn create_player(&self, seed: u64) -> Box<dyn GamePlayer> {
        match self.kind {
            PlayerKind::Human => Box::new(HumanPlayer::new(self.symbol)),
            PlayerKind::Computer => Box::new(ComputerPlayer::new(self.symbol, SessionRng::new(seed))),
        }
    }
}

impl TryFrom<&PlayerConfig> for PlayerBinding {
    type Error = SetupError;

    fn try_from(config: &PlayerConfig) -> Result<Self, Self::Error> {
        let kind = match config.kind.trim().to_ascii_lowercase().as_str() {
            "human" => PlayerKind::Human,
            "computer" | "cpu" => PlayerKind::Computer,
            _ => return Err(SetupError::UnknownPlayerKind(config.kind.clone())),
        };
        let symbol = config.symbol.parse::<Symbol>()?;
        Ok(Self { kind, symbol })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub grid_size: usize,
    pub variant: Variant,
    pub red: PlayerBinding,
    pub blue: PlayerBinding,
    /// Seed for the computer players; Blue uses the next value.
    pub seed: u64,
}

impl GameSettings {
    pub fn new(
        grid_size: usize,
        variant: Variant,
        red: PlayerBinding,
        blue: PlayerBinding,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let settings = Self { grid_size, variant, red, blue, seed };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(SetupError::GridSizeOutOfRange {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(())
    }

    /// Free-text description stored in saved games, e.g. "Red: Human, Blue: Computer".
    pub fn player_mode(&self) -> String {
        format!("Red: {}, Blue: {}", self.red.kind.name(), self.blue.kind.name())
    }
}

impl TryFrom<&GameConfig> for GameSettings {
    type Error = SetupError;

    fn try_from(config: &GameConfig) -> Result<Self, Self::Error> {
        let seed = config.seed.unwrap_or_else(|| SessionRng::from_random().seed());
        GameSettings::new(
            config.grid_size as usize,
            config.game_mode.parse::<Variant>()?,
            PlayerBinding::try_from(&config.red)?,
            PlayerBinding::try_from(&config.blue)?,
            seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humans() -> (PlayerBinding, PlayerBinding) {
        (PlayerBinding::human(Symbol::S), PlayerBinding::human(Symbol::O))
    }

    #[test]
    fn test_grid_size_bounds() {
        let (red, blue) = humans();
        for size in [0, 2, 13, 40] {
            assert_eq!(
                GameSettings::new(size, Variant::Simple, red, blue, 0),
                Err(SetupError::GridSizeOutOfRange { size, min: 3, max: 12 })
            );
        }
        for size in 3..=12 {
            assert!(GameSettings::new(size, Variant::General, red, blue, 0).is_ok());
        }
    }

    #[test]
    fn test_from_config_parses_bindings() {
        let config = GameConfig {
            grid_size: 6,
            game_mode: "General".to_string(),
            red: PlayerConfig { kind: "human".to_string(), symbol: "S".to_string() },
            blue: PlayerConfig { kind: "Computer".to_string(), symbol: "O".to_string() },
            seed: Some(11),
        };
        let settings = GameSettings::try_from(&config).unwrap();
        assert_eq!(settings.grid_size, 6);
        assert_eq!(settings.variant, Variant::General);
        assert_eq!(settings.red, PlayerBinding::human(Symbol::S));
        assert_eq!(settings.blue, PlayerBinding::computer(Symbol::O));
        assert_eq!(settings.seed, 11);
        assert_eq!(settings.player_mode(), "Red: Human, Blue: Computer");
    }

    #[test]
    fn test_from_config_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.game_mode = "Misere".to_string();
        assert_eq!(
            GameSettings::try_from(&config),
            Err(SetupError::UnknownVariant("Misere".to_string()))
        );

        let mut config = GameConfig::default();
        config.red.symbol = "X".to_string();
        assert_eq!(
            GameSettings::try_from(&config),
            Err(SetupError::InvalidSymbol("X".to_string()))
        );

        let mut config = GameConfig::default();
        config.blue.kind = "robot".to_string();
        assert_eq!(
            GameSettings::try_from(&config),
            Err(SetupError::UnknownPlayerKind("robot".to_string()))
        );

        let mut config = GameConfig::default();
        config.grid_size = 13;
        assert!(matches!(
            GameSettings::try_from(&config),
            Err(SetupError::GridSizeOutOfRange { size: 13, .. })
        ));
    }
}
