//! # Taskminder Notification Service
//!
//! Reminder CRUD, notification delivery and history, and the background
//! dispatcher that turns due reminders into notifications.
//!
//! ## Routes
//!
//! ```text
//! GET    /                                  service info
//! GET    /health                            health check (database ping)
//! POST   /api/v1/reminders                  schedule a reminder
//! GET    /api/v1/reminders                  list reminders (skip, limit, status, task_id)
//! GET    /api/v1/reminders/due/check        dispatch due reminders now
//! GET    /api/v1/reminders/:id              fetch a reminder
//! PUT    /api/v1/reminders/:id              update supplied fields
//! DELETE /api/v1/reminders/:id              delete a reminder
//! POST   /api/v1/notifications/send         deliver a notification immediately
//! GET    /api/v1/notifications/history      list notifications
//! GET    /api/v1/stats/overview             reminder and notification statistics
//! ```

pub mod app;
pub mod config;
pub mod dispatcher;
pub mod routes;
pub mod sender;

/// Service version reported by `/` and `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
