//! # Taskminder Dashboard
//!
//! Backend of the dashboard UI. It owns no storage: every view is assembled
//! from the task and notification services, and task actions are forwarded
//! to the task service.
//!
//! ## Routes
//!
//! ```text
//! GET    /                             service info
//! GET    /health                       upstream health probes
//! GET    /api/dashboard                stats, recent tasks, upcoming reminders
//! GET    /api/tasks                    task list (status, priority, search)
//! POST   /api/tasks                    create a task
//! GET    /api/tasks/:id                a single task
//! PUT    /api/tasks/:id                update a task
//! DELETE /api/tasks/:id                delete a task
//! PATCH  /api/tasks/:id/complete       complete a task
//! GET    /api/notifications            notification history and reminders
//! GET    /api/analytics                distributions, timeline and rates
//! ```

pub mod analytics;
pub mod app;
pub mod config;
pub mod routes;

/// Service version reported by `/` and `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
