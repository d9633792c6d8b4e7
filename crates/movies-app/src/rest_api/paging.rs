use garde::Validate;
use movies_dal::{ListingParams, MAX_LIMIT};

/// Offset based paging taken from the query string.
#[derive(Debug, Clone, Default, Validate, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi",into_params(parameter_in = Query))]
pub struct Paging {
    #[garde(range(min = 0))]
    offset: Option<i64>,
    #[garde(range(min = 0, max = MAX_LIMIT))]
    limit: Option<i64>,
}

impl Paging {
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self { offset, limit }
    }

    pub fn into_listing_params(self) -> ListingParams {
        ListingParams::new(self.offset.unwrap_or(0), self.limit.unwrap_or(MAX_LIMIT))
    }
}
