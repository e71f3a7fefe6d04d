use crate::domain::{Artist, ArtistId, ArtistRecord};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  /// No se pudo contactar con el almacén (conexión, pool agotado, ruta inaccesible).
  #[error("store unavailable: {0}")]
  Unavailable(String),

  #[error("storage error: {0}")]
  Storage(String),

  #[error("corrupt document for artist {id}: {reason}")]
  Corrupt { id: i64, reason: String },
}

/// Port que abstrae el almacén de documentos de artistas.
///
/// Devuelve documentos crudos ([`ArtistRecord`]); convertirlos en [`Artist`]
/// es responsabilidad del llamador.
pub trait ArtistRepository {
  /// Documentos cuyo id está en `ids`. El orden lo decide el almacén.
  fn get_artists_by_ids(&self, ids: &[ArtistId]) -> Result<Vec<ArtistRecord>, RepoError>;

  /// Todos los documentos de artistas.
  fn get_all_artists(&self) -> Result<Vec<ArtistRecord>, RepoError>;

  /// Inserta o reemplaza los documentos de `artists`, todos o ninguno.
  /// Devuelve cuántos se guardaron.
  fn save_artists(&self, artists: &[Artist]) -> Result<usize, RepoError>;
}

impl<R: ArtistRepository + ?Sized> ArtistRepository for &R {
  fn get_artists_by_ids(&self, ids: &[ArtistId]) -> Result<Vec<ArtistRecord>, RepoError> {
    (**self).get_artists_by_ids(ids)
  }

  fn get_all_artists(&self) -> Result<Vec<ArtistRecord>, RepoError> {
    (**self).get_all_artists()
  }

  fn save_artists(&self, artists: &[Artist]) -> Result<usize, RepoError> {
    (**self).save_artists(artists)
  }
}
