/// Route handlers
///
/// - `health`: Service info and upstream probes
/// - `dashboard`: Overview page data
/// - `tasks`: Task actions forwarded to the task service
/// - `notifications`: Notification history and reminders
/// - `analytics`: Task analytics

pub mod analytics;
pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod tasks;
