use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cantor_core::domain::{Artist, ArtistRecord};
use cantor_core::ports::{ArtistRepository, RepoError};
use cantor_core::{ArtistCollection, ArtistQuery, CollectionError};
use cantor_storage::{SqliteArtistRepository, StorageConfig};
use tracing::{error, info};

use crate::cli::{Cli, Command};

/// Estado de salida para un `UnexpectedFailure`.
pub const FATAL_EXIT_CODE: u8 = 5;

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
  let repo = open_repository(cli.database.as_deref())?;

  match &cli.command {
    Command::List(args) => list(&repo, args.query(), out),
    Command::Index(args) => index(&repo, args.query(), out),
    Command::Import { file } => {
      let saved = import(&repo, file)?;
      writeln!(out, "imported {saved} artists")?;
      Ok(())
    }
  }
}

/// `0` ok, `5` para fallos inesperados, `1` para el resto (incluido almacén inaccesible).
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
  match err.downcast_ref::<CollectionError>() {
    Some(e) if e.is_fatal() => FATAL_EXIT_CODE,
    _ => 1,
  }
}

fn open_repository(database: Option<&Path>) -> Result<SqliteArtistRepository> {
  let cfg = StorageConfig::load().context("loading [storage] config")?;

  let opened = match database {
    Some(path) => SqliteArtistRepository::open_with(&path.to_string_lossy(), &cfg),
    None => {
      let paths = cantor_config::paths().context("detecting cantor directories")?;
      SqliteArtistRepository::from_config(&cfg, &paths.data_dir)
    }
  };

  opened.map_err(|err| {
    if let RepoError::Unavailable(reason) = &err {
      error!(%reason, "unable to connect to the artist store for querying");
    }
    anyhow::Error::new(CollectionError::from(err)).context("opening artist store")
  })
}

pub fn list<R: ArtistRepository + ?Sized>(
  repo: &R,
  query: ArtistQuery,
  out: &mut impl Write,
) -> Result<()> {
  let collection = ArtistCollection::load(repo, query)?;
  writeln!(out, "{collection}")?;
  Ok(())
}

pub fn index<R: ArtistRepository + ?Sized>(
  repo: &R,
  query: ArtistQuery,
  out: &mut impl Write,
) -> Result<()> {
  let collection = ArtistCollection::load(repo, query)?;
  for (id, name) in collection.artists() {
    writeln!(out, "{id}\t{name}")?;
  }
  Ok(())
}

/// Valida todos los documentos antes de escribir: un documento malo no deja importación a medias.
pub fn import<R: ArtistRepository + ?Sized>(repo: &R, file: &Path) -> Result<usize> {
  let raw = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
  let records: Vec<ArtistRecord> =
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", file.display()))?;

  let artists = records
    .into_iter()
    .enumerate()
    .map(|(i, rec)| Artist::try_from(rec).with_context(|| format!("artist document #{i}")))
    .collect::<Result<Vec<_>>>()?;

  let saved = repo.save_artists(&artists).map_err(CollectionError::from)?;
  info!(saved, file = %file.display(), "artists imported");
  Ok(saved)
}
