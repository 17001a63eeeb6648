/// Storage error types
///
/// Repository operations return `RepoResult<T>`. The in-memory repositories
/// never fail; the MongoDB repositories surface driver errors, including
/// BSON mapping failures raised by typed collections.

/// Repository result type alias
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The MongoDB driver reported an error
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}
