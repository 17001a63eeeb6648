/// Database layer for Taskminder
///
/// This module provides the MongoDB client and collection indexes. The
/// repositories built on top of it live in `crate::repos`.
///
/// # Modules
///
/// - `client`: Client construction with pool settings and ping health check
/// - `indexes`: Startup index creation per service database

pub mod client;
pub mod indexes;
