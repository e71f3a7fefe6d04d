use std::path::PathBuf;

use cantor_core::ArtistQuery;
use cantor_core::domain::ArtistId;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cantor", version, about = "Artist collection over a document store")]
pub struct Cli {
  /// SQLite database file; overrides `[storage].db_path`
  #[arg(long, global = true, env = "CANTOR_DATABASE")]
  pub database: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Print the artists in store order, comma separated
  List(QueryArgs),
  /// Print the name-sorted index, one `id<TAB>name` per line
  Index(QueryArgs),
  /// Load artist documents from a JSON array into the store
  Import {
    /// JSON file: `[{"artistID": 1, "artistName": "..."}, ...]`
    file: PathBuf,
  },
}

#[derive(Debug, Args)]
pub struct QueryArgs {
  /// Only these artist ids (comma separated); all artists when omitted
  #[arg(long, value_delimiter = ',', num_args = 1..)]
  pub ids: Option<Vec<i64>>,
}

impl QueryArgs {
  pub fn query(&self) -> ArtistQuery {
    match &self.ids {
      Some(ids) => ArtistQuery::ByIds(ids.iter().copied().map(ArtistId::new).collect()),
      None => ArtistQuery::All,
    }
  }
}
