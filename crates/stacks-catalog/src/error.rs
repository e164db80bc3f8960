use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("book not found: {0}")]
    BookNotFound(String),

    #[error("no review by {username} on book {isbn}")]
    ReviewNotFound { isbn: String, username: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
