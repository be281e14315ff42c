use crate::api;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
    ),
    components(
        schemas(
            models::Book,
            models::BookInput,
            models::ReadingStatus,
            models::Pagination,
            models::BookListResponse,
            api::error::ErrorBody,
        )
    ),
    tags(
        (name = "books", description = "Personal book collection")
    )
)]
pub struct ApiDoc;
