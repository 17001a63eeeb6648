/// Route handlers
///
/// - `health`: Service info and health check
/// - `tasks`: Task CRUD, completion and statistics

pub mod health;
pub mod tasks;
