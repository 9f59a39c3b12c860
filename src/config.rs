//! Settings import and export

use std::fs;
use std::path::Path;

use particle_physics::SimulationOptions;

use crate::error::ConfigError;

/// File name used by the export key binding
pub const EXPORT_FILE_NAME: &str = "particle-life-settings.json";

/// Parse settings JSON. Missing keys take their default values.
pub fn parse_options(json: &str) -> Result<SimulationOptions, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_options(path: &Path) -> Result<SimulationOptions, ConfigError> {
    let text = fs::read_to_string(path)?;
    parse_options(&text)
}

/// Options from the file at `path`, or the defaults when there is no path or
/// the file cannot be used
pub fn options_or_default(path: Option<&Path>) -> SimulationOptions {
    let Some(path) = path else {
        return SimulationOptions::default();
    };
    match load_options(path) {
        Ok(options) => {
            log::info!("Loaded settings from {}", path.display());
            options
        }
        Err(e) => {
            log::error!("Could not load settings from {}: {}; using defaults", path.display(), e);
            SimulationOptions::default()
        }
    }
}

pub fn export_options(options: &SimulationOptions, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(options)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_then_load() {
        let mut options = SimulationOptions::neutral();
        options.particle_count = 123;
        options.interactions.set("type1", "type3", -0.7);

        let file_name = format!("particle-life-test-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        export_options(&options, &path).unwrap();
        let loaded = load_options(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, options);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(parse_options("{ not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let missing = Path::new("/definitely/not/here/settings.json");
        assert!(matches!(load_options(missing), Err(ConfigError::Io(_))));
        let options = options_or_default(Some(missing));
        assert_eq!(options.particle_count, particle_physics::DEFAULT_PARTICLE_COUNT);
    }
}
