use axum::routing::{get, post};
use axum::Router;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all catalog and identity endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/books", get(handler::list_books))
        .route("/books/isbn/:isbn", get(handler::books_by_isbn))
        .route("/books/author/:author", get(handler::books_by_author))
        .route("/books/title/:fragment", get(handler::books_by_title))
        .route(
            "/books/review/:isbn",
            get(handler::reviews_for)
                .post(handler::upsert_review)
                .delete(handler::delete_review),
        )
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .with_state(state)
}
