use axum::{
    routing::{get, put},
    Router,
};
use shelf_http::router::not_found;
use shelf_store::SharedStore;

use super::handlers;

/// HTTP routes for the books module, relative to its `/books` mount point.
///
/// A known path hit with an unsupported method answers like an unknown path.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_books)
                .post(handlers::create_book)
                .fallback(not_found),
        )
        .route(
            "/available",
            get(handlers::list_available_books).fallback(not_found),
        )
        .route(
            "/{id}",
            put(handlers::update_book)
                .delete(handlers::delete_book)
                .fallback(not_found),
        )
        .with_state(store)
}
