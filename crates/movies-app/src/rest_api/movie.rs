use movies_dal::movie::{CreateMovie, MovieRepository};
use movies_types::Genre;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
#[allow(unused_imports)]
use axum::routing::{delete, get, post};

crate::repository_from_request!(MovieRepository);

const ENTITY_NAME: &str = "Movie";

/// Movie as received from clients, genre is not checked yet.
///
/// Unknown fields (like a client supplied `id`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewMovie {
    pub name: String,
    pub release_year: Option<i64>,
    pub description: Option<String>,
    pub genre: String,
}

impl TryFrom<NewMovie> for CreateMovie {
    type Error = ApiError;

    fn try_from(value: NewMovie) -> ApiResult<Self> {
        let genre = Genre::parse(&value.genre).ok_or(ApiError::InvalidGenre)?;
        Ok(CreateMovie {
            name: value.name,
            release_year: value.release_year,
            description: value.description,
            genre,
        })
    }
}

fn not_found() -> ApiError {
    ApiError::ResourceNotFound(ENTITY_NAME.to_string())
}

pub mod crud_api {
    use super::*;
    use crate::rest_api::Paging;
    use crate::validate::Garde;
    use axum::{
        extract::{Path, Query},
        response::IntoResponse,
        Json,
    };
    use http::StatusCode;
    use tracing::debug;

    #[cfg_attr(feature = "openapi",  utoipa::path(post, path = "", tag = "Movie", operation_id = "createMovie",
        request_body = NewMovie,
        responses((status = StatusCode::CREATED, description = "Created Movie", body = movies_dal::movie::Movie),
                  (status = StatusCode::BAD_REQUEST, description = "Invalid genre"))))]
    pub async fn create(
        repository: MovieRepository,
        Json(payload): Json<NewMovie>,
    ) -> ApiResult<impl IntoResponse> {
        let payload = CreateMovie::try_from(payload).inspect_err(|_| debug!("Rejected genre"))?;
        let record = repository.create(payload).await?;

        Ok((StatusCode::CREATED, Json(record)))
    }

    #[cfg_attr(feature = "openapi",  utoipa::path(get, path = "", tag = "Movie", operation_id = "listMovie",
        params(Paging), responses((status = StatusCode::OK, description = "List of movies, at most 100", body = Vec<movies_dal::movie::Movie>))))]
    pub async fn list(
        repository: MovieRepository,
        Garde(Query(paging)): Garde<Query<Paging>>,
    ) -> ApiResult<impl IntoResponse> {
        debug!("Paging: {:?}", paging);
        let records = repository.list(paging.into_listing_params()).await?;
        Ok((StatusCode::OK, Json(records)))
    }

    #[cfg_attr(feature = "openapi",  utoipa::path(get, path = "/{id}", tag = "Movie", operation_id = "getMovie",
        responses((status = StatusCode::OK, description = "Get one", body = movies_dal::movie::Movie),
                  (status = StatusCode::NOT_FOUND, description = "Movie not found"))))]
    pub async fn get(
        Path(id): Path<i64>,
        repository: MovieRepository,
    ) -> ApiResult<impl IntoResponse> {
        let record = repository.find(id).await?.ok_or_else(not_found)?;

        Ok((StatusCode::OK, Json(record)))
    }

    #[cfg_attr(feature = "openapi",  utoipa::path(delete, path = "/{id}", tag = "Movie", operation_id = "deleteMovie",
        responses((status = StatusCode::OK, description = "Deleted movie", body = movies_dal::movie::Movie),
                  (status = StatusCode::NOT_FOUND, description = "Movie not found"))))]
    pub async fn delete(
        Path(id): Path<i64>,
        repository: MovieRepository,
    ) -> ApiResult<impl IntoResponse> {
        let record = repository.find(id).await?.ok_or_else(not_found)?;
        repository.delete(&record).await?;

        Ok((StatusCode::OK, Json(record)))
    }

    #[cfg(feature = "openapi")]
    #[cfg_attr(feature = "openapi", derive(utoipa::OpenApi))]
    #[openapi(paths(list, get, delete, create))]
    struct ApiDocs;

    #[cfg(feature = "openapi")]
    pub(super) fn api_docs() -> utoipa::openapi::OpenApi {
        use utoipa::OpenApi as _;
        ApiDocs::openapi()
    }
}

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    crud_api::api_docs()
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", post(crud_api::create).get(crud_api::list))
        .route("/{id}", get(crud_api::get).delete(crud_api::delete))
}
