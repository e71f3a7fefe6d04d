pub mod artist_collection;
