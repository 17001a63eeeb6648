/// Route handlers
///
/// - `health`: Service info and health check
/// - `reminders`: Reminder CRUD and the on-demand due check
/// - `notifications`: Immediate delivery and history
/// - `stats`: Statistics overview

pub mod health;
pub mod notifications;
pub mod reminders;
pub mod stats;
