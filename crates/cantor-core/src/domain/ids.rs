use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador numérico de un artista, tal como viene del almacén de documentos
/// (campo `artistID`).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ArtistId(i64);

impl ArtistId {
  pub const fn new(raw: i64) -> Self {
    ArtistId(raw)
  }

  /// Devuelve el entero interno.
  pub const fn get(self) -> i64 {
    self.0
  }
}

impl From<i64> for ArtistId {
  fn from(raw: i64) -> Self {
    ArtistId(raw)
  }
}

impl From<ArtistId> for i64 {
  fn from(id: ArtistId) -> Self {
    id.0
  }
}

impl fmt::Display for ArtistId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
