/// Typed HTTP clients for the Taskminder services
///
/// The task service uses `NotificationServiceClient` to schedule reminders;
/// the dashboard uses both clients to aggregate its views. Non-2xx answers
/// surface as `ClientError::Status` carrying the upstream body so callers
/// can forward the upstream error.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use taskminder_shared::client::tasks::TaskServiceClient;
/// use taskminder_shared::models::task::TaskQuery;
///
/// # async fn example() -> Result<(), taskminder_shared::client::ClientError> {
/// let tasks = TaskServiceClient::new("http://localhost:8000/api/v1", Duration::from_secs(10))?;
/// let pending = tasks.list(&TaskQuery::default()).await?;
/// # Ok(())
/// # }
/// ```

pub mod notifications;
pub mod tasks;

use crate::http::health::HealthResponse;
use axum::http::StatusCode;
use reqwest::{Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Client error
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, timeout, or response decoding failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("upstream returned {status}")]
    Status { status: StatusCode, body: String },

    /// The configured base URL cannot be parsed
    #[error("invalid service url {0}")]
    InvalidUrl(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// JSON client bound to one service's API base URL
#[derive(Debug, Clone)]
pub struct BaseClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BaseClient {
    /// `base_url` is the API root, e.g. `http://task-service:8000/api/v1`
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url =
            Url::parse(trimmed).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.http.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &(impl Serialize + ?Sized),
    ) -> ClientResult<T> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + ?Sized),
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + ?Sized),
    ) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::PATCH, path)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Probes `GET /health` at the service origin
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let mut url = self.base_url.clone();
        url.set_path("/health");
        url.set_query(None);
        self.send(self.http.get(url)).await
    }
}
