pub mod artist;
pub mod ids;

pub use artist::{Artist, ArtistRecord, ArtistRecordError};
pub use ids::ArtistId;
