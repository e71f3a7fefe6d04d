//! `cantor`: lista e índice de artistas sobre el almacén de documentos.
//!
//! La política de terminación vive aquí: la librería devuelve
//! `CollectionError::UnexpectedFailure` y este binario sale con estado 5.

mod cli;
mod commands;
mod config;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};

use crate::cli::Cli;
use crate::config::LoggingConfig;

fn main() -> ExitCode {
  // .env opcional (CANTOR_DATABASE, RUST_LOG, CANTOR_BASE_DIR)
  let dotenv = dotenvy::dotenv();
  let args = Cli::parse();

  let (logging, config_err) = match LoggingConfig::load() {
    Ok(cfg) => (cfg, None),
    Err(e) => (LoggingConfig::default(), Some(e)),
  };
  logging::init(&logging);

  if let Some(e) = config_err {
    warn!(error = %e, "could not read [logging] config, using defaults");
  }
  if let Err(e) = &dotenv
    && !e.not_found()
  {
    warn!(error = %e, "could not load .env");
  }

  let mut stdout = std::io::stdout().lock();
  match commands::run(&args, &mut stdout) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      let code = commands::exit_code_for(&err);
      error!(exit_code = code, "{err:#}");
      ExitCode::from(code)
    }
  }
}
