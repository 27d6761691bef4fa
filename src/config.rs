use crate::core::role::Role;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub role: Role,
    /// Promotion code or teacher name; empty means the role's default view
    #[serde(default)]
    pub context: String,
    pub color: bool,
    /// TOML fixture file replacing the built-in seed data
    #[serde(default)]
    pub fixtures: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long a transient alert stays visible
    pub notification_ms: u64,
    /// Simulated network delay of the mock data service
    pub latency_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_ms: 3000,
            latency_ms: 1000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                role: Role::Admin,
                context: String::new(),
                color: true,
                fixtures: None,
            },
            timing: TimingConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    pub fn ensure_config_exists() -> AppResult<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config = Self::from_toml_str(&content)?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.timing.notification_ms == 0 {
            return Err(AppError::Config(
                "timing.notification_ms must be greater than zero".to_string(),
            ));
        }

        if let Some(path) = &self.general.fixtures
            && !path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
        {
            return Err(AppError::Config(
                "Fixture file should have a .toml extension".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file_path())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("edusched")
            .join("config.toml")
    }

    /// The view to open: explicit override, then config, then the role default
    pub fn context_for(&self, role: Role, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .filter(|c| !c.trim().is_empty())
            .or_else(|| {
                (role == self.general.role && !self.general.context.trim().is_empty())
                    .then(|| self.general.context.clone())
            })
            .unwrap_or_else(|| role.default_context().to_string())
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.timing.notification_ms)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.timing.latency_ms)
    }
}
