/// Task service client

use super::{BaseClient, ClientResult};
use crate::http::health::HealthResponse;
use crate::models::{
    page::MAX_LIMIT,
    task::{Task, TaskCreate, TaskQuery, TaskStats, TaskUpdate},
    MessageResponse,
};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TaskServiceClient {
    base: BaseClient,
}

impl TaskServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            base: BaseClient::new(base_url, timeout)?,
        })
    }

    pub async fn list(&self, query: &TaskQuery) -> ClientResult<Vec<Task>> {
        self.base.get_with_query("tasks", query).await
    }

    /// Follows `skip` until a short page, returning every matching task
    pub async fn list_all(&self, query: &TaskQuery) -> ClientResult<Vec<Task>> {
        let mut query = TaskQuery {
            skip: 0,
            limit: MAX_LIMIT,
            ..query.clone()
        };
        let mut tasks = Vec::new();
        loop {
            let page = self.list(&query).await?;
            let done = (page.len() as u64) < query.limit;
            tasks.extend(page);
            if done {
                return Ok(tasks);
            }
            query.skip += query.limit;
        }
    }

    pub async fn get(&self, id: &str) -> ClientResult<Task> {
        self.base.get(&format!("tasks/{}", id)).await
    }

    pub async fn create(&self, task: &TaskCreate) -> ClientResult<Task> {
        self.base.post("tasks", task).await
    }

    pub async fn update(&self, id: &str, update: &TaskUpdate) -> ClientResult<Task> {
        self.base.put(&format!("tasks/{}", id), update).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<MessageResponse> {
        self.base.delete(&format!("tasks/{}", id)).await
    }

    pub async fn complete(&self, id: &str) -> ClientResult<Task> {
        self.base.patch(&format!("tasks/{}/complete", id)).await
    }

    pub async fn stats(&self) -> ClientResult<TaskStats> {
        self.base.get("tasks/stats/overview").await
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.base.health().await
    }
}
