use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, error};

use crate::domain::{Artist, ArtistId};
use crate::errors::CollectionError;
use crate::ports::ArtistRepository;

/// Entrada del índice: `(id, nombre)`.
pub type IndexEntry = (ArtistId, String);

/// Qué artistas cargar en la colección.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistQuery {
  /// Solo los documentos cuyo id esté en la lista (orden y duplicados libres).
  ByIds(Vec<ArtistId>),
  /// Todos los artistas del almacén.
  All,
}

impl From<Vec<ArtistId>> for ArtistQuery {
  fn from(ids: Vec<ArtistId>) -> Self {
    ArtistQuery::ByIds(ids)
  }
}

/// Orden por nombre, byte a byte, ascendente. El id no participa.
pub fn compare_by_name(a: &IndexEntry, b: &IndexEntry) -> Ordering {
  a.1.cmp(&b.1)
}

/// Lista de artistas leída una sola vez del almacén.
///
/// Guarda dos vistas de los mismos datos:
/// - `artist_objects`: los [`Artist`] en el orden devuelto por el almacén.
/// - `artist_index`: pares `(id, nombre)` ordenados por nombre (orden estable).
///
/// No hay API de mutación: si el almacén cambia, se construye otra colección.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistCollection {
  artist_objects: Vec<Artist>,
  artist_index: Vec<IndexEntry>,
}

impl ArtistCollection {
  /// Consulta el almacén y materializa la colección completa.
  ///
  /// Si algo falla no se devuelve nada parcial: o la colección entera o el error.
  pub fn load<R>(repo: &R, query: ArtistQuery) -> Result<Self, CollectionError>
  where
    R: ArtistRepository + ?Sized,
  {
    Self::try_load(repo, &query).inspect_err(|err| match err {
      CollectionError::DataStoreUnavailable(reason) => {
        error!(%reason, "unable to connect to the artist store for querying");
      }
      CollectionError::UnexpectedFailure(reason) => {
        error!(%reason, ?query, "unhandled failure while loading artist collection");
      }
    })
  }

  fn try_load<R>(repo: &R, query: &ArtistQuery) -> Result<Self, CollectionError>
  where
    R: ArtistRepository + ?Sized,
  {
    let records = match query {
      ArtistQuery::ByIds(ids) => repo.get_artists_by_ids(ids)?,
      ArtistQuery::All => repo.get_all_artists()?,
    };
    debug!(count = records.len(), ?query, "fetched artist documents");

    let artists = records.into_iter().map(Artist::try_from).collect::<Result<Vec<_>, _>>()?;

    Ok(Self::from_artists(artists))
  }

  /// Construye la colección (y su índice) a partir de artistas ya materializados.
  pub fn from_artists(artist_objects: Vec<Artist>) -> Self {
    let mut artist_index: Vec<IndexEntry> =
      artist_objects.iter().map(|a| (a.id, a.name.clone())).collect();
    // sort_by es estable: los nombres repetidos conservan el orden del almacén
    artist_index.sort_by(compare_by_name);

    Self { artist_objects, artist_index }
  }

  /// Índice `(id, nombre)` ordenado por nombre.
  pub fn artists(&self) -> &[IndexEntry] {
    &self.artist_index
  }

  /// Artistas en el orden del almacén.
  pub fn artist_objects(&self) -> &[Artist] {
    &self.artist_objects
  }

  pub fn len(&self) -> usize {
    self.artist_objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.artist_objects.is_empty()
  }

  /// `Alcoa Quartet (1141480), Alfred G. Karnes (1141491)`; vacío si no hay artistas.
  pub fn to_display_string(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for ArtistCollection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, artist) in self.artist_objects.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{artist}")?;
    }
    Ok(())
  }
}
