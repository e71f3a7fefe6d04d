use crate::schema::artists;

use diesel::prelude::*;

/// Fila cruda: el documento JSON tal cual está guardado.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArtistRow {
  pub artist_id: i64,
  pub document: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = artists)]
pub struct NewArtistRow<'a> {
  pub artist_id: i64,
  pub document: &'a str,
}
