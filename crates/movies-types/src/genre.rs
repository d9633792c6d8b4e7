use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::InvalidGenre;

/// Closed set of movie categories.
///
/// Parsing is case-insensitive, serialization always uses the canonical lower-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Action,
    Comedy,
    Romance,
    Scifi,
    Horror,
}

impl Genre {
    pub const ALL: [Genre; 5] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Romance,
        Genre::Scifi,
        Genre::Horror,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Comedy => "comedy",
            Genre::Romance => "romance",
            Genre::Scifi => "scifi",
            Genre::Horror => "horror",
        }
    }

    /// Returns `None` for anything that is not one of the known genres (ignoring case).
    pub fn parse(raw: &str) -> Option<Genre> {
        let lower = raw.to_lowercase();
        Genre::ALL.into_iter().find(|g| g.as_str() == lower)
    }

    pub fn valid_genres_message() -> String {
        let names = Genre::ALL
            .iter()
            .map(|g| format!("'{}'", g.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Invalid genre provided, valid genres are [{names}]")
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Genre {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Genre {
    type Err = InvalidGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::parse(s).ok_or_else(|| InvalidGenre(s.to_string()))
    }
}

// used by sqlx when decoding the genre column
impl TryFrom<String> for Genre {
    type Error = InvalidGenre;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
