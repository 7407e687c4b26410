//! Data layer: persisted records owned by the favorites store.

pub mod favorite_movie;

pub use favorite_movie::{FavoriteMovie, NewFavoriteMovie};
