//! AI configuration loader.

use std::path::Path;

use creature_core::AiConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for AI configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`AiConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<AiConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from a TOML string.
    pub fn parse(content: &str) -> LoadResult<AiConfig> {
        let config: AiConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.casting_delay_ms == 0 {
            anyhow::bail!("casting_delay_ms must be greater than zero");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = ConfigLoader::parse("").expect("empty config parses");
        assert_eq!(config, AiConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = ConfigLoader::parse("casting_delay_ms = 600\nrng_seed = 7\n")
            .expect("partial config parses");
        assert_eq!(config.casting_delay_ms, 600);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.alert_cooldown_ms, AiConfig::DEFAULT_ALERT_COOLDOWN_MS);
    }

    #[test]
    fn zero_cadence_is_rejected() {
        assert!(ConfigLoader::parse("casting_delay_ms = 0").is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "alert_cooldown_ms = 5000\n").expect("write config");

        let config = ConfigLoader::load(&path).expect("config loads");
        assert_eq!(config.alert_cooldown_ms, 5000);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml"))
            .expect_err("missing file fails");
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}
