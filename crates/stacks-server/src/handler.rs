use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use stacks_catalog::{Book, CatalogError, ReviewsFor};

use crate::error::ServerResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsBody {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub review: String,
}

/// Pull the raw token out of an `Authorization: Bearer <token>` header.
/// The core never sees transport headers; it gets this string or `None`.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// `GET /books` -- the whole catalog.
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.catalog.all())
}

/// `GET /books/isbn/:isbn` -- an empty match is a 404, per the reference
/// service; the query engine itself just reports an empty sequence.
pub async fn books_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ServerResult<Json<Vec<Book>>> {
    let result = state.queries.by_isbn(&isbn);
    if result.is_empty() {
        return Err(CatalogError::BookNotFound(isbn).into());
    }
    Ok(Json(result))
}

/// `GET /books/author/:author` -- may be empty, still 200.
pub async fn books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Json<Vec<Book>> {
    Json(state.queries.by_author(&author))
}

/// `GET /books/title/:fragment` -- may be empty, still 200.
pub async fn books_by_title(
    State(state): State<AppState>,
    Path(fragment): Path<String>,
) -> Json<Vec<Book>> {
    Json(state.queries.by_title(&fragment))
}

/// `GET /books/review/:isbn`
pub async fn reviews_for(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ServerResult<Json<ReviewsFor>> {
    Ok(Json(state.queries.reviews_for(&isbn)?))
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> ServerResult<Json<Value>> {
    state.registry.register(&body.username, &body.password)?;
    Ok(Json(json!({ "message": "User registered successfully" })))
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> ServerResult<Json<Value>> {
    let token = state.registry.login(&body.username, &body.password)?;
    Ok(Json(json!({ "message": "Login successful", "token": token })))
}

/// `POST /books/review/:isbn` -- authenticated review upsert.
pub async fn upsert_review(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    headers: HeaderMap,
    Json(body): Json<ReviewBody>,
) -> ServerResult<Json<Value>> {
    let username = state.registry.verify(bearer_token(&headers))?;
    let reviews = state.reviews.add_or_modify(&isbn, &username, &body.review)?;
    Ok(Json(json!({ "message": "Review added/modified", "reviews": reviews })))
}

/// `DELETE /books/review/:isbn` -- authenticated review removal.
pub async fn delete_review(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    headers: HeaderMap,
) -> ServerResult<Json<Value>> {
    let username = state.registry.verify(bearer_token(&headers))?;
    let reviews = state.reviews.delete(&isbn, &username)?;
    Ok(Json(json!({ "message": "Review deleted", "reviews": reviews })))
}
