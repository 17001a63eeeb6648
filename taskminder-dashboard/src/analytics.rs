/// Task analytics
///
/// Pure aggregation over the task statistics and the full task list. Status
/// counts come from the statistics endpoint; priority counts and the daily
/// creation timeline are computed from the tasks themselves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use taskminder_shared::models::task::{Task, TaskPriority, TaskStats, TaskStatus};

/// Tasks created on one UTC day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Analytics view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_tasks: u64,

    /// Count per status, every status present
    pub status_distribution: BTreeMap<String, u64>,

    /// Count per priority, every priority present
    pub priority_distribution: BTreeMap<String, u64>,

    /// Ascending by date; days without tasks are omitted
    pub creation_timeline: Vec<DailyCount>,

    /// Percent of tasks completed, one decimal
    pub completion_rate: f64,

    /// Percent of tasks pending, one decimal
    pub pending_rate: f64,

    pub overdue_tasks: u64,
    pub upcoming_tasks: u64,
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}

pub fn compute(stats: &TaskStats, tasks: &[Task]) -> Analytics {
    let status_distribution = TaskStatus::ALL
        .iter()
        .map(|status| {
            let count = match status {
                TaskStatus::Pending => stats.pending_tasks,
                TaskStatus::InProgress => stats.in_progress_tasks,
                TaskStatus::Completed => stats.completed_tasks,
                TaskStatus::Cancelled => stats.cancelled_tasks,
            };
            (status.as_str().to_string(), count)
        })
        .collect();

    let mut priority_distribution: BTreeMap<String, u64> = TaskPriority::ALL
        .iter()
        .map(|p| (p.as_str().to_string(), 0))
        .collect();
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for task in tasks {
        *priority_distribution
            .entry(task.priority.as_str().to_string())
            .or_default() += 1;
        *per_day.entry(task.created_at.date_naive()).or_default() += 1;
    }

    Analytics {
        total_tasks: stats.total_tasks,
        status_distribution,
        priority_distribution,
        creation_timeline: per_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect(),
        completion_rate: percent(stats.completed_tasks, stats.total_tasks),
        pending_rate: percent(stats.pending_tasks, stats.total_tasks),
        overdue_tasks: stats.overdue_tasks,
        upcoming_tasks: stats.upcoming_tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use taskminder_shared::models::task::TaskCreate;

    fn task(priority: TaskPriority, y: i32, m: u32, d: u32) -> Task {
        let mut input = TaskCreate::titled("t");
        input.priority = priority;
        Task::new(input, Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_analytics() {
        let analytics = compute(&TaskStats::default(), &[]);
        assert_eq!(analytics.completion_rate, 0.0);
        assert_eq!(analytics.pending_rate, 0.0);
        assert!(analytics.creation_timeline.is_empty());
        assert_eq!(analytics.status_distribution.len(), 4);
        assert_eq!(analytics.priority_distribution["urgent"], 0);
    }

    #[test]
    fn test_distributions_timeline_and_rates() {
        let stats = TaskStats {
            total_tasks: 3,
            pending_tasks: 2,
            completed_tasks: 1,
            overdue_tasks: 1,
            ..Default::default()
        };
        let tasks = vec![
            task(TaskPriority::High, 2024, 3, 2),
            task(TaskPriority::High, 2024, 3, 1),
            task(TaskPriority::Low, 2024, 3, 2),
        ];

        let analytics = compute(&stats, &tasks);
        assert_eq!(analytics.status_distribution["pending"], 2);
        assert_eq!(analytics.status_distribution["in_progress"], 0);
        assert_eq!(analytics.priority_distribution["high"], 2);
        assert_eq!(analytics.priority_distribution["low"], 1);
        assert_eq!(analytics.priority_distribution["medium"], 0);
        assert_eq!(
            analytics.creation_timeline,
            vec![
                DailyCount {
                    date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    count: 1
                },
                DailyCount {
                    date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                    count: 2
                },
            ]
        );
        assert_eq!(analytics.completion_rate, 33.3);
        assert_eq!(analytics.pending_rate, 66.7);
        assert_eq!(analytics.overdue_tasks, 1);
    }
}
