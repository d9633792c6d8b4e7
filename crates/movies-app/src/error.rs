use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use movies_types::Genre;
use serde_json::json;
use tracing::error;

pub type Error = anyhow::Error;
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", Genre::valid_genres_message())]
    InvalidGenre,

    #[error("{0} not found")]
    ResourceNotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Database error: {0}")]
    DatabaseError(movies_dal::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] Error),
}

impl From<movies_dal::Error> for ApiError {
    fn from(value: movies_dal::Error) -> Self {
        match value {
            movies_dal::Error::RecordNotFound(entity) => ApiError::ResourceNotFound(entity),
            movies_dal::Error::DatabaseError(movies_dal::SqlxError::RowNotFound) => {
                ApiError::ResourceNotFound("Record".to_string())
            }
            other => ApiError::DatabaseError(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidGenre => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::ResourceNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::InvalidQuery(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                error!("Request failed: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt as _;

    async fn response_parts(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let err: ApiError = movies_dal::Error::RecordNotFound("Movie".to_string()).into();
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "Movie not found"}));
    }

    #[tokio::test]
    async fn test_invalid_genre_response() {
        let (status, body) = response_parts(ApiError::InvalidGenre).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Invalid genre provided, valid genres are ['action', 'comedy', 'romance', 'scifi', 'horror']"
        );
    }

    #[tokio::test]
    async fn test_storage_failure_is_hidden() {
        let err: ApiError = movies_dal::Error::DatabaseError(movies_dal::SqlxError::PoolClosed).into();
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Internal server error"}));
    }
}
