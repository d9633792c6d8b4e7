#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid genre: {0:?}")]
pub struct InvalidGenre(pub String);
