//! Request handlers for the books module. Each one is a full
//! load, modify, save cycle against the injected store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shelf_http::{error::AppError, extract::JsonBody};
use shelf_store::{next_id, Book, BookId, BookStore, SharedStore};

use super::models::{CreateBook, DeleteResponse, UpdateBook};

const BOOK_NOT_FOUND: &str = "Book not found";
const BOOK_DELETED: &str = "Book deleted successfully";

/// `GET /books`
pub async fn list_books(State(store): State<SharedStore>) -> Json<Vec<Book>> {
    Json(store.load().await)
}

/// `GET /books/available`
pub async fn list_available_books(State(store): State<SharedStore>) -> Json<Vec<Book>> {
    let books = store
        .load()
        .await
        .into_iter()
        .filter(|book| book.available)
        .collect();

    Json(books)
}

/// `POST /books`
pub async fn create_book(
    State(store): State<SharedStore>,
    JsonBody(payload): JsonBody<CreateBook>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let new_book = payload.validate()?;

    let mut books = store.load().await;
    let book = new_book.into_book(next_id(&books)?);
    books.push(book.clone());
    store.save(&books).await?;

    tracing::info!(book_id = book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PUT /books/{id}`
pub async fn update_book(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody<UpdateBook>,
) -> Result<Json<Book>, AppError> {
    let id = parse_book_id(&raw_id)?;

    let mut books = store.load().await;
    let book = books
        .iter_mut()
        .find(|book| book.id == id)
        .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))?;

    payload.apply(book);
    let updated = book.clone();
    store.save(&books).await?;

    tracing::info!(book_id = id, "book updated");
    Ok(Json(updated))
}

/// `DELETE /books/{id}`
pub async fn delete_book(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_book_id(&raw_id)?;

    let books = store.load().await;
    let original_len = books.len();
    let remaining: Vec<Book> = books.into_iter().filter(|book| book.id != id).collect();

    if remaining.len() == original_len {
        return Err(AppError::not_found(BOOK_NOT_FOUND));
    }

    store.save(&remaining).await?;

    tracing::info!(book_id = id, "book deleted");
    Ok(Json(DeleteResponse {
        message: BOOK_DELETED.to_string(),
    }))
}

/// A path id that is not an unsigned integer can never match a stored book.
fn parse_book_id(raw: &str) -> Result<BookId, AppError> {
    raw.parse().map_err(|_| AppError::not_found(BOOK_NOT_FOUND))
}
