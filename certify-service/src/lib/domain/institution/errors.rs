use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstitutionIdError {
    #[error("Invalid institution id: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Error)]
pub enum SlugError {
    #[error("Slug must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
    #[error("Slug must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
    #[error("Slug may only contain lowercase letters, digits and hyphens")]
    InvalidCharacters,
}

#[derive(Debug, Error)]
pub enum InstitutionError {
    #[error("Institution with this slug already exists")]
    DuplicateSlug,
    #[error("Institution not found")]
    NotFound,
    #[error(transparent)]
    InvalidId(#[from] InstitutionIdError),
    #[error(transparent)]
    InvalidSlug(#[from] SlugError),
    #[error("{0}")]
    Validation(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}
