//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, AppError, BookAction, ResponseStatus},
    models::book::{Book, BookFilter, BookPayload, BookQuery, BookSummary},
    AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct BookIdData {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// Response to a successful create
#[derive(Debug, Serialize, ToSchema)]
pub struct BookAddedResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: BookIdData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    pub status: ResponseStatus,
    pub data: BookListData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetailResponse {
    pub status: ResponseStatus,
    pub data: BookData,
}

/// Confirmation carrying only a message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl MessageResponse {
    fn success(message: &str) -> Json<Self> {
        Json(Self {
            status: ResponseStatus::Success,
            message: message.to_string(),
        })
    }
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = BookAddedResponse),
        (status = 400, description = "Missing name or readPage greater than pageCount", body = FailResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> Result<(StatusCode, Json<BookAddedResponse>), ApiError> {
    let book_id = state
        .services
        .books
        .create(payload)
        .await
        .map_err(|e| e.during(BookAction::Add))?;

    Ok((
        StatusCode::CREATED,
        Json(BookAddedResponse {
            status: ResponseStatus::Success,
            message: "Buku berhasil ditambahkan".to_string(),
            data: BookIdData { book_id },
        }),
    ))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring of the book name"),
        ("reading" = Option<String>, Query, description = "1 for books being read, 0 for the others"),
        ("finished" = Option<String>, Query, description = "1 for finished books, 0 for the others")
    ),
    responses(
        (status = 200, description = "Matching books as id/name/publisher summaries", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<BookListResponse> {
    let query: BookQuery = pairs.into_iter().collect();
    let books = state.services.books.list(&BookFilter::from(&query)).await;

    Json(BookListResponse {
        status: ResponseStatus::Success,
        data: BookListData { books },
    })
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found", body = FailResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<BookDetailResponse>, ApiError> {
    let book = state
        .services
        .books
        .get_by_id(&book_id)
        .await
        .map_err(|e| e.during(BookAction::Get))?;

    Ok(Json(BookDetailResponse {
        status: ResponseStatus::Success,
        data: BookData { book },
    }))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "Missing name or readPage greater than pageCount", body = FailResponse),
        (status = 404, description = "Book not found", body = FailResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .services
        .books
        .update(&book_id, payload)
        .await
        .map_err(|e| e.during(BookAction::Update))?;

    Ok(MessageResponse::success("Buku berhasil diperbarui"))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{bookId}",
    tag = "books",
    params(("bookId" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = FailResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .services
        .books
        .delete(&book_id)
        .await
        .map_err(|e| e.during(BookAction::Delete))?;

    Ok(MessageResponse::success("Buku berhasil dihapus"))
}
