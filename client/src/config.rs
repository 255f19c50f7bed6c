use common::config::{ConfigManager, FileContentConfigProvider, SosConfig, YamlConfigSerializer};

pub const DEFAULT_CONFIG_FILE: &str = "sos_config.yaml";

pub fn get_config_manager(path: &str) -> ConfigManager<FileContentConfigProvider, SosConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path() -> String {
        let random_number: u32 = rand::random();
        std::env::temp_dir()
            .join(format!("temp_sos_client_config_{}.yaml", random_number))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_missing_file_yields_default_config() {
        let manager = get_config_manager(&get_temp_file_path());
        assert_eq!(manager.get_config().unwrap(), SosConfig::default());
    }

    #[test]
    fn test_config_is_written_and_read_back() {
        let path = get_temp_file_path();
        let mut config = SosConfig::default();
        config.game.grid_size = 9;
        config.pacing.autoplay_delay_ms = 0;

        get_config_manager(&path).set_config(&config).unwrap();
        assert_eq!(get_config_manager(&path).get_config().unwrap(), config);

        let _ = std::fs::remove_file(path);
    }
}
