/// Collection indexes
///
/// Indexes are created at startup; `createIndexes` is a no-op for indexes
/// that already exist with the same keys, so every replica may run it.
///
/// | collection | keys |
/// |---|---|
/// | `tasks` | `created_at -1`, `status`, `due_date` |
/// | `reminders` | `status, reminder_time`, `task_id` |
/// | `notifications` | `created_at -1`, `task_id` |

use crate::repos::mongo::{NOTIFICATIONS_COLLECTION, REMINDERS_COLLECTION, TASKS_COLLECTION};
use bson::{doc, Document};
use mongodb::{Database, IndexModel};
use tracing::info;

fn models(keys: &[Document]) -> Vec<IndexModel> {
    keys.iter()
        .map(|k| IndexModel::builder().keys(k.clone()).build())
        .collect()
}

async fn create(
    db: &Database,
    collection: &str,
    keys: &[Document],
) -> Result<(), mongodb::error::Error> {
    db.collection::<Document>(collection)
        .create_indexes(models(keys), None)
        .await?;
    info!(collection, count = keys.len(), "Ensured indexes");
    Ok(())
}

/// Ensures the indexes of the task service database
pub async fn ensure_task_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    create(
        db,
        TASKS_COLLECTION,
        &[
            doc! { "created_at": -1 },
            doc! { "status": 1 },
            doc! { "due_date": 1 },
        ],
    )
    .await
}

/// Ensures the indexes of the notification service database
pub async fn ensure_notification_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    create(
        db,
        REMINDERS_COLLECTION,
        &[doc! { "status": 1, "reminder_time": 1 }, doc! { "task_id": 1 }],
    )
    .await?;
    create(
        db,
        NOTIFICATIONS_COLLECTION,
        &[doc! { "created_at": -1 }, doc! { "task_id": 1 }],
    )
    .await
}
