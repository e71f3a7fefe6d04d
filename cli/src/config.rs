use cantor_config::{ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};

/// Sección `[logging]` de cantor.toml. `RUST_LOG` tiene prioridad sobre ella.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
  /// Directiva de `EnvFilter`, p. ej. `info` o `cantor_storage=debug`.
  pub level: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    LoggingConfig { level: "info".to_string() }
  }
}

impl LoggingConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(cantor_config::config_backend()?)
  }

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("logging")
  }
}
