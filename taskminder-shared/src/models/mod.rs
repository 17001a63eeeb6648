/// Document models for Taskminder
///
/// This module contains the stored entities, the request schemas validated at
/// the HTTP boundary, the filters used by repositories, and statistics
/// payloads.
///
/// # Models
///
/// - `task`: Tasks, their status/priority enums and task statistics
/// - `reminder`: Scheduled reminders tied to a task
/// - `notification`: Delivered notifications and notification statistics
/// - `id`: The `DocumentId` shared by every document
/// - `page`: `skip`/`limit` pagination

pub mod id;
pub mod notification;
pub mod page;
pub mod reminder;
pub mod task;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// `{"message": "..."}` acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Truncates `at` to the millisecond precision of BSON datetimes
///
/// Every timestamp a document stores goes through this, whether generated
/// or supplied by a client, so a value read back from MongoDB equals the
/// value that was written.
pub fn to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}

/// Current time at millisecond precision
pub fn timestamp_now() -> DateTime<Utc> {
    to_millis(Utc::now())
}
