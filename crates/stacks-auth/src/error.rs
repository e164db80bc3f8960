use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("user already exists: {0}")]
    DuplicateUser(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no token supplied")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    ExpiredToken,

    #[error("token encoding: {0}")]
    Encoding(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
