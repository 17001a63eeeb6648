/// HTTP plumbing shared by the three services
///
/// # Modules
///
/// - `error`: `ApiError` and its JSON rendering
/// - `extract`: Extractors that validate bodies and query strings
/// - `health`: Root info and health payloads
/// - `security`: Security response headers middleware
/// - `server`: CORS/trace layers and the graceful-shutdown server loop

pub mod error;
pub mod extract;
pub mod health;
pub mod security;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use extract::{ValidatedJson, ValidatedQuery};
