mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{CantorPaths, ConfigError};

use once_cell::sync::OnceCell;

static PATHS: OnceCell<CantorPaths> = OnceCell::new();
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Directorios de Cantor (portable / sistema), detectados una sola vez por proceso.
pub fn paths() -> Result<&'static CantorPaths, ConfigError> {
  PATHS.get_or_try_init(CantorPaths::new)
}

/// Backend de configuración global, apuntando a `cantor.toml` dentro de [`paths`].
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| Ok(TomlConfigBackend::new(paths()?.clone())))
}
