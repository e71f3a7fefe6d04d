use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingConfig;

/// Logs a stderr para que stdout quede solo con la salida de los comandos.
pub fn init(cfg: &LoggingConfig) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

  tracing_subscriber::registry()
    .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
    .with(filter)
    .init();
}
