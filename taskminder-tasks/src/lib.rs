//! # Taskminder Task Service
//!
//! CRUD API over the `tasks` collection.
//!
//! ## Routes
//!
//! ```text
//! GET    /                              service info
//! GET    /health                        health check (database ping)
//! POST   /api/v1/tasks                  create a task
//! GET    /api/v1/tasks                  list tasks (skip, limit, status, priority, category, search)
//! GET    /api/v1/tasks/stats/overview   task statistics
//! GET    /api/v1/tasks/:id              fetch a task
//! PUT    /api/v1/tasks/:id              update supplied fields
//! DELETE /api/v1/tasks/:id              delete a task
//! PATCH  /api/v1/tasks/:id/complete     mark a task completed
//! ```
//!
//! Creating or updating a task with `reminder_enabled` and a
//! `reminder_time` schedules a reminder on the notification service.

pub mod app;
pub mod config;
pub mod reminders;
pub mod routes;

/// Service version reported by `/` and `/health`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
