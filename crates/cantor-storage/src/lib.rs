pub mod config;
pub mod models;
pub mod schema;

pub use config::StorageConfig;

use std::path::Path;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use cantor_core::domain::{Artist, ArtistId, ArtistRecord};
use cantor_core::ports::{ArtistRepository, RepoError};

use crate::models::{ArtistRow, NewArtistRow};
use crate::schema::artists;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
type SqlitePooled = PooledConnection<ConnectionManager<SqliteConnection>>;

/// PRAGMAs que se aplican a cada conexión nueva del pool.
#[derive(Debug)]
struct ConnectionOptions {
  busy_timeout: Duration,
  journal_mode: Option<String>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    let mut pragmas = format!("PRAGMA busy_timeout = {};", self.busy_timeout.as_millis());
    let journal_mode =
      self.journal_mode.as_deref().filter(|m| m.chars().all(|c| c.is_ascii_alphabetic()));
    if let Some(mode) = journal_mode {
      pragmas.push_str(&format!(" PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Almacén de documentos de artistas sobre SQLite.
///
/// Cada artista es una fila `(artist_id, document)` donde `document` es el
/// [`ArtistRecord`] serializado en JSON. El orden del almacén es `artist_id` ascendente.
pub struct SqliteArtistRepository {
  pool: SqlitePool,
}

impl SqliteArtistRepository {
  pub fn open(database_url: &str) -> Result<Self, RepoError> {
    Self::open_with(database_url, &StorageConfig::default())
  }

  /// Abre (o crea) la base y aplica las migraciones pendientes.
  ///
  /// Si no se consigue ninguna conexión dentro de `connect_timeout_secs`
  /// devuelve [`RepoError::Unavailable`].
  pub fn open_with(database_url: &str, cfg: &StorageConfig) -> Result<Self, RepoError> {
    let options = ConnectionOptions {
      busy_timeout: cfg.connect_timeout(),
      journal_mode: cfg.journal_mode.clone(),
    };
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
      .max_size(cfg.pool_size.max(1))
      .connection_timeout(cfg.connect_timeout())
      .connection_customizer(Box::new(options))
      .build(manager)
      .map_err(|e| RepoError::Unavailable(format!("{database_url}: {e}")))?;

    let repo = Self { pool };
    {
      let mut pooled = repo.conn()?;
      let conn: &mut SqliteConnection = &mut pooled;
      conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepoError::Storage(format!("migrations: {e}")))?;
    }

    info!(database = database_url, "artist store ready");
    Ok(repo)
  }

  /// `db_path` del config resuelto contra `data_dir`.
  pub fn from_config(cfg: &StorageConfig, data_dir: &Path) -> Result<Self, RepoError> {
    let path = cfg.database_path(data_dir);
    Self::open_with(&path.to_string_lossy(), cfg)
  }

  fn conn(&self) -> Result<SqlitePooled, RepoError> {
    self.pool.get().map_err(|e| RepoError::Unavailable(e.to_string()))
  }
}

fn encode(artist: &Artist) -> Result<String, RepoError> {
  serde_json::to_string(&ArtistRecord::from(artist))
    .map_err(|e| RepoError::Storage(format!("encode artist {}: {e}", artist.id)))
}

fn decode(row: ArtistRow) -> Result<ArtistRecord, RepoError> {
  serde_json::from_str(&row.document)
    .map_err(|e| RepoError::Corrupt { id: row.artist_id, reason: e.to_string() })
}

fn upsert(conn: &mut SqliteConnection, artist_id: i64, document: &str) -> QueryResult<usize> {
  diesel::insert_into(artists::table)
    .values(&NewArtistRow { artist_id, document })
    .on_conflict(artists::artist_id)
    .do_update()
    .set(artists::document.eq(document))
    .execute(conn)
}

fn query_error(err: DieselError) -> RepoError {
  match err {
    DieselError::DatabaseError(
      DatabaseErrorKind::UnableToSendCommand | DatabaseErrorKind::ClosedConnection,
      info,
    ) => RepoError::Unavailable(info.message().to_owned()),
    other => RepoError::Storage(other.to_string()),
  }
}

impl ArtistRepository for SqliteArtistRepository {
  fn get_artists_by_ids(&self, ids: &[ArtistId]) -> Result<Vec<ArtistRecord>, RepoError> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let wanted: Vec<i64> = ids.iter().map(|id| id.get()).collect();
    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;

    let rows = artists::table
      .filter(artists::artist_id.eq_any(wanted))
      .order(artists::artist_id.asc())
      .select(ArtistRow::as_select())
      .load(conn)
      .map_err(query_error)?;

    debug!(requested = ids.len(), found = rows.len(), "artists by id");
    rows.into_iter().map(decode).collect()
  }

  fn get_all_artists(&self) -> Result<Vec<ArtistRecord>, RepoError> {
    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;

    let rows = artists::table
      .order(artists::artist_id.asc())
      .select(ArtistRow::as_select())
      .load(conn)
      .map_err(query_error)?;

    debug!(found = rows.len(), "all artists");
    rows.into_iter().map(decode).collect()
  }

  /// Una sola transacción: o entran todos o ninguno.
  fn save_artists(&self, list: &[Artist]) -> Result<usize, RepoError> {
    let documents = list
      .iter()
      .map(|a| encode(a).map(|doc| (a.id.get(), doc)))
      .collect::<Result<Vec<_>, _>>()?;

    let mut pooled = self.conn()?;
    let conn: &mut SqliteConnection = &mut pooled;

    conn
      .transaction::<_, DieselError, _>(|conn| {
        for (artist_id, document) in &documents {
          upsert(conn, *artist_id, document)?;
        }
        Ok(())
      })
      .map_err(query_error)?;

    debug!(count = documents.len(), "saved artist documents");
    Ok(documents.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cantor_core::{ArtistCollection, ArtistQuery, CollectionError};
  use tempfile::{TempDir, tempdir};

  fn repo() -> (TempDir, SqliteArtistRepository) {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("artists.db");
    let repo = SqliteArtistRepository::open(db.to_str().unwrap()).unwrap();
    (tmp, repo)
  }

  fn seed(repo: &SqliteArtistRepository) {
    repo
      .save_artists(&[
        Artist::new(1141491, "Alfred G. Karnes"),
        Artist::new(1141480, "Alcoa Quartet"),
        Artist::new(1141500, "Blind Alfred Reed").with_bio("fiddler from West Virginia"),
      ])
      .unwrap();
  }

  fn ids(raw: &[i64]) -> Vec<ArtistId> {
    raw.iter().copied().map(ArtistId::new).collect()
  }

  #[test]
  fn all_artists_come_back_in_id_order() {
    let (_tmp, repo) = repo();
    seed(&repo);

    let records = repo.get_all_artists().unwrap();
    let found: Vec<Option<i64>> = records.iter().map(|r| r.artist_id).collect();

    assert_eq!(found, [Some(1141480), Some(1141491), Some(1141500)]);
    assert_eq!(records[2].bio.as_deref(), Some("fiddler from West Virginia"));
  }

  #[test]
  fn by_ids_filters_and_ignores_duplicates_and_unknowns() {
    let (_tmp, repo) = repo();
    seed(&repo);

    let records = repo.get_artists_by_ids(&ids(&[1141500, 42, 1141480, 1141500])).unwrap();
    let found: Vec<Option<i64>> = records.iter().map(|r| r.artist_id).collect();

    assert_eq!(found, [Some(1141480), Some(1141500)]);
  }

  #[test]
  fn by_empty_ids_returns_nothing() {
    let (_tmp, repo) = repo();
    seed(&repo);

    assert!(repo.get_artists_by_ids(&[]).unwrap().is_empty());
  }

  #[test]
  fn save_replaces_existing_document() {
    let (_tmp, repo) = repo();
    repo.save_artists(&[Artist::new(7, "Carter Family")]).unwrap();
    repo.save_artists(&[Artist::new(7, "The Carter Family")]).unwrap();

    let records = repo.get_all_artists().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].artist_name.as_deref(), Some("The Carter Family"));
  }

  #[test]
  fn unreadable_document_is_corrupt() {
    let (_tmp, repo) = repo();
    {
      let mut pooled = repo.conn().unwrap();
      upsert(&mut pooled, 5, "{not json").unwrap();
    }

    let err = repo.get_all_artists().unwrap_err();
    assert!(matches!(err, RepoError::Corrupt { id: 5, .. }));
  }

  #[test]
  fn unreachable_database_is_unavailable() {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("missing-dir").join("artists.db");
    let cfg = StorageConfig { connect_timeout_secs: 1, ..StorageConfig::default() };

    let err = SqliteArtistRepository::open_with(db.to_str().unwrap(), &cfg).err().unwrap();

    assert!(matches!(err, RepoError::Unavailable(_)));
    assert!(matches!(CollectionError::from(err), CollectionError::DataStoreUnavailable(_)));
  }

  #[test]
  fn from_config_resolves_relative_path() {
    let tmp = tempdir().unwrap();
    let cfg = StorageConfig { db_path: "library.db".into(), ..StorageConfig::default() };

    let repo = SqliteArtistRepository::from_config(&cfg, tmp.path()).unwrap();
    repo.save_artists(&[Artist::new(1, "Uncle Dave Macon")]).unwrap();

    assert!(tmp.path().join("library.db").exists());
  }

  #[test]
  fn collection_over_sqlite_store() {
    let (_tmp, repo) = repo();
    seed(&repo);

    let collection =
      ArtistCollection::load(&repo, ArtistQuery::ByIds(ids(&[1141491, 1141480]))).unwrap();

    assert_eq!(
      collection.artists(),
      &[
        (ArtistId::new(1141480), "Alcoa Quartet".to_string()),
        (ArtistId::new(1141491), "Alfred G. Karnes".to_string()),
      ]
    );
    assert_eq!(
      collection.to_display_string(),
      "Alcoa Quartet (1141480), Alfred G. Karnes (1141491)"
    );
  }

  #[test]
  fn document_without_name_fails_collection_load() {
    let (_tmp, repo) = repo();
    {
      let mut pooled = repo.conn().unwrap();
      upsert(&mut pooled, 9, r#"{"artistID": 9}"#).unwrap();
    }

    let err = ArtistCollection::load(&repo, ArtistQuery::All).unwrap_err();
    assert!(err.is_fatal());
  }

  #[test]
  fn empty_name_document_loads_and_sorts_first() {
    let (_tmp, repo) = repo();
    repo.save_artists(&[Artist::new(6, "Alcoa Quartet")]).unwrap();
    {
      let mut pooled = repo.conn().unwrap();
      upsert(&mut pooled, 5, r#"{"artistID": 5, "artistName": ""}"#).unwrap();
    }

    let collection = ArtistCollection::load(&repo, ArtistQuery::All).unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.artists()[0], (ArtistId::new(5), String::new()));
    assert_eq!(collection.artists()[1], (ArtistId::new(6), "Alcoa Quartet".to_string()));
  }
}
