pub mod domain;
pub mod errors;
pub mod ports;
pub mod services;

pub use errors::CollectionError;
pub use services::artist_collection::{ArtistCollection, ArtistQuery, IndexEntry, compare_by_name};
