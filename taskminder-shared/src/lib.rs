//! # Taskminder Shared Library
//!
//! This crate contains shared types, storage and HTTP plumbing used across
//! the Taskminder task service, notification service and dashboard.
//!
//! ## Module Organization
//!
//! - `models`: Documents, request schemas, filters and statistics
//! - `repos`: Repository traits with MongoDB and in-memory implementations
//! - `db`: MongoDB client construction, health checks and indexes
//! - `http`: API error type, extractors, health/info handlers, middleware
//! - `client`: Typed HTTP clients for the task and notification services
//! - `config`: Environment parsing shared by the service configs
//! - `telemetry`: Tracing subscriber setup
//! - `error`: Storage error types

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod repos;
pub mod telemetry;

/// Current version of the Taskminder shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
