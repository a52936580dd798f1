use super::{
    canvas::CanvasConfig,
    evolution::EvolutionConfig,
    output::OutputConfig,
    traits::ConfigSection,
};
use crate::error::EvoartError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "evoart.toml";
/// Environment overrides look like `EVOART__EVOLUTION__SEED=42`
pub const ENV_PREFIX: &str = "EVOART";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    pub evolution: EvolutionConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), EvoartError> {
        self.canvas.validate()?;
        self.evolution.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Owns the run's configuration. Everything is resolved once at startup.
pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Defaults, then `evoart.toml` if present, then `EVOART__*` variables.
    pub fn load() -> Result<Self, EvoartError> {
        Self::load_layered(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Same layering as [`ConfigManager::load`] with an explicit (optional) file.
    pub fn load_layered<P: AsRef<Path>>(file: P) -> Result<Self, EvoartError> {
        Self::load_with_env(file, None)
    }

    /// `env` replaces the process environment when given.
    fn load_with_env<P: AsRef<Path>>(
        file: P,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, EvoartError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::from(file.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::debug!("Resolved configuration: {:?}", config);
        Ok(Self { config })
    }

    /// Read a TOML file directly; the file must exist.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EvoartError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EvoartError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| EvoartError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(Self { config })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvoartError> {
        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| EvoartError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| EvoartError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_inner(self) -> AppConfig {
        self.config
    }

    /// Apply `f` and keep the result only if it validates
    pub fn update<F>(&mut self, f: F) -> Result<(), EvoartError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
