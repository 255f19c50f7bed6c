use serde::{Deserialize, Serialize};

use crate::games::sos::{PlayerBinding, Variant, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
use super::Validate;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SosConfig {
    pub game: GameConfig,
    pub pacing: PacingConfig,
    pub saves: SaveConfig,
}

impl Validate for SosConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.pacing.validate()?;
        self.saves.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: u32,
    pub game_mode: String,
    pub red: PlayerConfig,
    pub blue: PlayerConfig,
    /// Fixed seed for the computer players; random when absent.
    pub seed: Option<u64>,
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        let size = self.grid_size as usize;
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(format!(
                "grid_size must be between {} and {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE
            ));
        }
        self.game_mode
            .parse::<Variant>()
            .map_err(|e| e.to_string())?;
        self.red.validate().map_err(|e| format!("red: {}", e))?;
        self.blue.validate().map_err(|e| format!("blue: {}", e))?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE as u32,
            game_mode: Variant::Simple.name().to_string(),
            red: PlayerConfig {
                kind: "Human".to_string(),
                symbol: "S".to_string(),
            },
            blue: PlayerConfig {
                kind: "Computer".to_string(),
                symbol: "O".to_string(),
            },
            seed: None,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PlayerConfig {
    /// "Human" or "Computer".
    pub kind: String,
    pub symbol: String,
}

impl Validate for PlayerConfig {
    fn validate(&self) -> Result<(), String> {
        PlayerBinding::try_from(self)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PacingConfig {
    pub autoplay_delay_ms: u64,
    pub replay_delay_ms: u64,
}

impl Validate for PacingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.autoplay_delay_ms > 10_000 {
            return Err("autoplay_delay_ms must not exceed 10000".to_string());
        }
        if self.replay_delay_ms > 10_000 {
            return Err("replay_delay_ms must not exceed 10000".to_string());
        }
        Ok(())
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            autoplay_delay_ms: 500,
            replay_delay_ms: 500,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SaveConfig {
    pub enabled: bool,
    pub location: String,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
}

impl Validate for SaveConfig {
    fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("save location must not be empty".to_string());
        }
        if self.retry_attempts == 0 {
            return Err("retry_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            location: "saves".to_string(),
            retry_attempts: 3,
            retry_backoff_ms: 200,
        }
    }
}
