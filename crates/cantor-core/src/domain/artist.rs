use crate::domain::ids::ArtistId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Representa a un artista dentro del sistema.
///
/// Se construye a partir de un [`ArtistRecord`] leído del almacén y no cambia
/// después de construido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  /// Identificador del artista (`artistID` en el documento).
  pub id: ArtistId,

  /// Nombre con el que se muestra el artista (`artistName`).
  pub name: String,

  /// Información biográfica opcional.
  pub bio: Option<String>,
}

impl Artist {
  pub fn new(id: i64, name: impl Into<String>) -> Self {
    Self { id: ArtistId::new(id), name: name.into(), bio: None }
  }

  pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
    self.bio = Some(bio.into());
    self
  }
}

/// `Alcoa Quartet (1141480)`
impl fmt::Display for Artist {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.id)
  }
}

/// Documento crudo de un artista tal como está guardado en el almacén.
///
/// Los nombres de campo son los del documento guardado (`artistID`, `artistName`).
/// Todo es opcional a este nivel: la validación ocurre al convertirlo en [`Artist`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
  #[serde(rename = "artistID", default)]
  pub artist_id: Option<i64>,

  #[serde(rename = "artistName", default)]
  pub artist_name: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtistRecordError {
  #[error("artist document is missing field `{0}`")]
  MissingField(&'static str),
}

impl TryFrom<ArtistRecord> for Artist {
  type Error = ArtistRecordError;

  fn try_from(record: ArtistRecord) -> Result<Self, Self::Error> {
    let id = ArtistId::new(record.artist_id.ok_or(ArtistRecordError::MissingField("artistID"))?);
    let name = record.artist_name.ok_or(ArtistRecordError::MissingField("artistName"))?;

    Ok(Artist { id, name, bio: record.bio })
  }
}

impl From<&Artist> for ArtistRecord {
  fn from(artist: &Artist) -> Self {
    ArtistRecord {
      artist_id: Some(artist.id.get()),
      artist_name: Some(artist.name.clone()),
      bio: artist.bio.clone(),
    }
  }
}
