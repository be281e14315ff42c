use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::error::ApiError;
use crate::infrastructure::AppState;
use crate::models::{Book, BookInput, BookListResponse};
use crate::services::book_service::{self, PageRequest};

/// Raw list query; kept as strings so bad values fall back to defaults
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10, capped by the server)
    pub limit: Option<String>,
}

impl ListParams {
    /// First occurrence of each key wins; unknown keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" if params.page.is_none() => params.page = Some(value),
                "limit" if params.limit.is_none() => params.limit = Some(value),
                _ => {}
            }
        }
        params
    }
}

#[utoipa::path(
    get,
    path = "/api/books",
    params(ListParams),
    responses(
        (status = 200, description = "One page of books", body = BookListResponse),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorBody)
    ),
    tag = "books"
)]
pub async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<BookListResponse>, ApiError> {
    // Repeated keys or a mangled query string must not fail the listing
    let params = match query {
        Ok(Query(pairs)) => ListParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!("Ignoring unreadable list query: {}", rejection);
            ListParams::default()
        }
    };

    let request = PageRequest::from_query(
        params.page.as_deref(),
        params.limit.as_deref(),
        state.max_page_limit,
    );

    book_service::list_books(state.book_repo.as_ref(), request)
        .await
        .map(Json)
        .map_err(|e| ApiError::read(e, "Failed to fetch books"))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "Unknown id", body = crate::api::error::ErrorBody),
        (status = 500, description = "Store failure", body = crate::api::error::ErrorBody)
    ),
    tag = "books"
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    book_service::get_book(state.book_repo.as_ref(), &id)
        .await
        .map(Json)
        .map_err(|e| ApiError::read(e, "Failed to fetch book"))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Validation failed", body = crate::api::error::ErrorBody)
    ),
    tag = "books"
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let Json(input) = payload?;

    let book = book_service::create_book(state.book_repo.as_ref(), input)
        .await
        .map_err(|e| ApiError::write(e, "Failed to create book"))?;

    Ok((StatusCode::CREATED, Json(book)))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book replaced", body = Book),
        (status = 400, description = "Validation failed", body = crate::api::error::ErrorBody),
        (status = 404, description = "Unknown id", body = crate::api::error::ErrorBody)
    ),
    tag = "books"
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Json(input) = payload?;

    book_service::update_book(state.book_repo.as_ref(), &id, input)
        .await
        .map(Json)
        .map_err(|e| ApiError::write(e, "Failed to update book"))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Unknown id", body = crate::api::error::ErrorBody)
    ),
    tag = "books"
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    book_service::delete_book(state.book_repo.as_ref(), &id)
        .await
        .map_err(|e| ApiError::write(e, "Failed to delete book"))?;

    Ok(StatusCode::NO_CONTENT)
}
