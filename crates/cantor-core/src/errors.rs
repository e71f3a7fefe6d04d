// crates/cantor-core/src/errors.rs
use thiserror::Error;

use crate::domain::ArtistRecordError;
use crate::ports::RepoError;

/// Error al construir una [`ArtistCollection`](crate::ArtistCollection).
///
/// La librería nunca termina el proceso: las capas superiores (CLI, etc.)
/// deciden qué hacer con un `UnexpectedFailure`.
#[derive(Debug, Error)]
pub enum CollectionError {
  #[error("artist store unavailable: {0}")]
  DataStoreUnavailable(String),

  #[error("unexpected failure while loading artists: {0}")]
  UnexpectedFailure(String),
}

impl CollectionError {
  /// `true` para fallos que no se pueden reintentar.
  pub fn is_fatal(&self) -> bool {
    matches!(self, CollectionError::UnexpectedFailure(_))
  }
}

impl From<RepoError> for CollectionError {
  fn from(err: RepoError) -> Self {
    match err {
      RepoError::Unavailable(msg) => CollectionError::DataStoreUnavailable(msg),
      other => CollectionError::UnexpectedFailure(other.to_string()),
    }
  }
}

impl From<ArtistRecordError> for CollectionError {
  fn from(err: ArtistRecordError) -> Self {
    CollectionError::UnexpectedFailure(err.to_string())
  }
}
