use cantor_config::{ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
  /// Relativa al directorio de datos, salvo que sea absoluta.
  pub db_path: PathBuf,
  /// Conexiones máximas en el pool.
  pub pool_size: u32,
  /// Espera máxima al abrir o pedir una conexión antes de dar el almacén por inaccesible.
  pub connect_timeout_secs: u64,
  pub journal_mode: Option<String>,
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig {
      db_path: PathBuf::from("cantor.db"),
      pool_size: 4,
      connect_timeout_secs: 5,
      journal_mode: Some("WAL".to_string()),
    }
  }
}

impl StorageConfig {
  /// Carga la sección `[storage]` de cantor.toml usando el backend global,
  /// escribiendo los valores por defecto si todavía no existía.
  pub fn load() -> Result<Self, ConfigError> {
    let backend = cantor_config::config_backend()?;
    let cfg: Self = backend.load_section_with_default("storage")?;
    backend.save_section("storage", &cfg)?;
    Ok(cfg)
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("storage")
  }

  /// Ruta final de la base: `db_path` resuelta contra `data_dir`.
  pub fn database_path(&self, data_dir: &Path) -> PathBuf {
    data_dir.join(&self.db_path)
  }

  pub fn connect_timeout(&self) -> Duration {
    Duration::from_secs(self.connect_timeout_secs.max(1))
  }
}
