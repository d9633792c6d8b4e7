pub mod config;
pub mod error;
pub mod genre;

pub use error::InvalidGenre;
pub use genre::Genre;
