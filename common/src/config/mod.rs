mod config_content_provider;
mod config_manager;
mod config_serializer;
mod sos_config;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use sos_config::{GameConfig, PacingConfig, PlayerConfig, SaveConfig, SosConfig};
pub use validate::Validate;
