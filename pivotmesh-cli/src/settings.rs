//! Loading the reconstruction parameters from a TOML file

use anyhow::{Context, Result};
use pivotmesh_reconstruction::BpaConfig;
use std::path::Path;
use tracing::{info, warn};

/// Where the configuration is looked for when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Parse a configuration from TOML text. Unknown keys are ignored, missing
/// keys take their defaults.
pub fn from_toml(toml_str: &str) -> Result<BpaConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Load the configuration at `path`.
///
/// A missing file falls back to the defaults with a warning. A file that
/// exists but does not parse is an error. `radius` overrides the file's
/// `ballRadius`, and the result is validated.
pub fn load(path: &Path, radius: Option<f64>) -> Result<BpaConfig> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {:?}", path))?;
        let config =
            from_toml(&contents).with_context(|| format!("Invalid configuration in {:?}", path))?;
        info!(path = %path.display(), "configuration loaded");
        config
    } else {
        warn!(path = %path.display(), "configuration file not found, using defaults");
        BpaConfig::default()
    };

    if let Some(radius) = radius {
        config.ball_radius = radius;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivotmesh_reconstruction::DebugLevel;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load(Path::new("no/such/config.toml"), None).unwrap();
        assert_eq!(config, BpaConfig::default());
    }

    #[test]
    fn test_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ballRadius = 0.5").unwrap();
        writeln!(file, "debugLevel = \"medium\"").unwrap();
        writeln!(file, "useGPU = true").unwrap();
        file.flush().unwrap();

        let config = load(file.path(), None).unwrap();
        assert_eq!(config.ball_radius, 0.5);
        assert_eq!(config.debug_level, DebugLevel::Medium);
        assert!(config.use_gpu);
        assert!(!config.draw_spheres);
    }

    #[test]
    fn test_radius_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ballRadius = 0.5").unwrap();
        file.flush().unwrap();

        assert_eq!(load(file.path(), Some(2.0)).unwrap().ball_radius, 2.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ballRadius = \"wide\"").unwrap();
        file.flush().unwrap();

        assert!(load(file.path(), None).is_err());
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ballRadius = -1.0").unwrap();
        file.flush().unwrap();

        let err = load(file.path(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }
}
