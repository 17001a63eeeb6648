/// Reminder scheduling on the notification service
///
/// Scheduling is best-effort: the task is already stored when the
/// notification service is called, so failures are logged and the task
/// request still succeeds.

use taskminder_shared::{
    client::notifications::NotificationServiceClient,
    models::{reminder::ReminderCreate, task::Task},
};
use tracing::{info, warn};

/// The reminder a task asks for, if reminders are enabled and timed
pub fn reminder_for(task: &Task) -> Option<ReminderCreate> {
    let reminder_time = task.scheduled_reminder()?;
    Some(ReminderCreate {
        task_id: task.id.to_string(),
        title: format!("Reminder: {}", task.title),
        message: format!("Task '{}' is due soon", task.title),
        reminder_time,
        task_due_date: task.due_date,
    })
}

/// Schedules the task's reminder; returns whether one was created
pub async fn schedule(client: &NotificationServiceClient, task: &Task) -> bool {
    let Some(reminder) = reminder_for(task) else {
        return false;
    };

    match client.create_reminder(&reminder).await {
        Ok(created) => {
            info!(task_id = %task.id, reminder_id = %created.id, "Reminder scheduled");
            true
        }
        Err(e) => {
            warn!(task_id = %task.id, error = %e, "Failed to schedule reminder");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use taskminder_shared::models::task::TaskCreate;

    #[test]
    fn test_reminder_requires_enabled_flag_and_time() {
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 8, 0, 0).unwrap();
        let at = now + Duration::days(1);

        let mut input = TaskCreate::titled("Renew passport");
        input.reminder_time = Some(at);
        assert!(reminder_for(&Task::new(input.clone(), now)).is_none());

        input.reminder_enabled = true;
        input.due_date = Some(at + Duration::days(2));
        let task = Task::new(input, now);
        let reminder = reminder_for(&task).unwrap();
        assert_eq!(reminder.task_id, task.id.to_string());
        assert_eq!(reminder.title, "Reminder: Renew passport");
        assert_eq!(reminder.message, "Task 'Renew passport' is due soon");
        assert_eq!(reminder.reminder_time, at);
        assert_eq!(reminder.task_due_date, task.due_date);
    }
}
