use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use serde::Deserialize;
use shelf_application::{
    BOOK_SORT_COLUMNS, CreateBookUseCase, DeleteBookUseCase, GetBookUseCase, ListBooksUseCase,
    UpdateBookUseCase,
};
use shelf_core::{AuthContext, BookChanges, BookId, BookSummary, NewBook, PageParams, PageRequest};

use crate::{ApiError, ApiResponse, ShelfState};

/// `GET /books`. Searchable by title or author.
#[tracing::instrument(name = "List books", skip_all)]
pub async fn list_books<S>(
    State(state): State<S>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<ApiResponse<Vec<BookSummary>>, ApiError>
where
    S: ShelfState,
{
    let Query(params) = query?;
    let request = PageRequest::parse(params, BOOK_SORT_COLUMNS)?;

    let page = ListBooksUseCase::new(state.books())
        .execute(&request)
        .await?;

    Ok(ApiResponse::paginated("Books retrieved successfully", page))
}

#[tracing::instrument(name = "Get book", skip_all)]
pub async fn get_book<S>(
    State(state): State<S>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<BookSummary>, ApiError>
where
    S: ShelfState,
{
    let id = book_id(id)?;
    let book = GetBookUseCase::new(state.books()).execute(id).await?;
    Ok(ApiResponse::success("Book retrieved successfully", book))
}

/// `POST /books`. The caller becomes the owner.
#[tracing::instrument(name = "Create book", skip_all)]
pub async fn create_book<S>(
    State(state): State<S>,
    Extension(caller): Extension<AuthContext>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<ApiResponse<BookSummary>, ApiError>
where
    S: ShelfState,
{
    let Json(request) = payload?;
    let book = NewBook::parse(
        caller.user_id,
        request.title.as_deref().unwrap_or_default(),
        request.author.as_deref().unwrap_or_default(),
        request.desc.as_deref(),
    )?;

    let book = CreateBookUseCase::new(state.books()).execute(book).await?;

    Ok(ApiResponse::success("Book created successfully", book))
}

/// `PUT /books/{id}`. Owner or admin; blank fields are left unchanged.
#[tracing::instrument(name = "Update book", skip_all)]
pub async fn update_book<S>(
    State(state): State<S>,
    Extension(caller): Extension<AuthContext>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<ApiResponse<BookSummary>, ApiError>
where
    S: ShelfState,
{
    let id = book_id(id)?;
    let Json(request) = payload?;
    let changes = BookChanges::parse(
        request.title.as_deref(),
        request.author.as_deref(),
        request.desc.as_deref(),
    )?;

    let book = UpdateBookUseCase::new(state.books())
        .execute(&caller, id, changes)
        .await?;

    Ok(ApiResponse::success("Book updated successfully", book))
}

/// `DELETE /books/{id}`. Owner or admin; the book is soft deleted.
#[tracing::instrument(name = "Delete book", skip_all)]
pub async fn delete_book<S>(
    State(state): State<S>,
    Extension(caller): Extension<AuthContext>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError>
where
    S: ShelfState,
{
    let id = book_id(id)?;
    DeleteBookUseCase::new(state.books())
        .execute(&caller, id)
        .await?;
    Ok(ApiResponse::message("Book deleted successfully"))
}

fn book_id(path: Result<Path<i64>, PathRejection>) -> Result<BookId, ApiError> {
    let Path(id) = path?;
    Ok(BookId::new(id)?)
}

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub desc: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub desc: Option<String>,
}
