//! This module provides a client to connect to the task backend

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::config;
use crate::dashboard::{BarChartData, DashboardSummary, LineChartData, TaskOverview};
use crate::draft::{TaskCreate, TaskPatch};
use crate::session::Session;
use crate::task::{Task, TaskId, UserId};
use crate::traits::TaskSource;

/// What the backend wraps every task-route reply in
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<T, Box<dyn Error>> {
        if self.success == false {
            let message = self.message.unwrap_or_else(|| "The server reported a failure".to_string());
            return Err(message.into());
        }
        match self.data {
            None => Err("The server reply carried no data".into()),
            Some(data) => Ok(data),
        }
    }
}

/// The reply to a login request. Unlike the task routes, the session fields
/// sit at the top level rather than under `data`.
#[derive(Debug, Deserialize)]
struct LoginReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<LoginUser>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    id: UserId,
}

/// A task source that fetches its data from the REST backend.
///
/// Every request carries the session's bearer token. Non-success HTTP statuses and
/// `success: false` envelopes both surface as errors.
pub struct Client {
    base_url: Url,
    session: Session,
}

impl Client {
    /// Create a client for an already-established session. This does not start a connection.
    pub fn new<S: AsRef<str>>(base_url: S, session: Session) -> Result<Self, Box<dyn Error>> {
        let base_url = parse_base_url(base_url.as_ref())?;
        Ok(Self { base_url, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Exchange credentials for a [`Session`] (`POST /auth/login`)
    pub async fn log_in<S, T, U>(base_url: S, email: T, password: U) -> Result<Session, Box<dyn Error>>
    where
        S: AsRef<str>,
        T: ToString,
        U: ToString,
    {
        let base_url = parse_base_url(base_url.as_ref())?;
        let response = reqwest::Client::new()
            .post(base_url.join("auth/login")?)
            .header(USER_AGENT, config::user_agent())
            .json(&json!({
                "email": email.to_string(),
                "password": password.to_string(),
            }))
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let reply: LoginReply = response.json().await?;
        if reply.success == false {
            let message = reply.message.unwrap_or_else(|| "Login failed".to_string());
            return Err(message.into());
        }
        let user = reply.user.ok_or("The login reply carried no user")?;
        let access_token = reply.access_token.ok_or("The login reply carried no access token")?;

        let mut session = Session::new(user.id, access_token);
        if let Some(refresh_token) = reply.refresh_token {
            session = session.with_refresh_token(refresh_token);
        }
        log::info!("Logged in as user {}", session.user_id());
        Ok(session)
    }

    /// End the session on the server (`POST /auth/logout`).
    /// Consumes the client; drop the [`Session`] along with it.
    pub async fn log_out(self) -> Result<(), Box<dyn Error>> {
        let response = self
            .prepare(reqwest::Client::new().post(self.base_url.join("auth/logout")?))
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }
        log::info!("Logged out user {}", self.session.user_id());
        Ok(())
    }

    /// Account-wide totals for the dashboard header
    pub async fn dashboard_summary(&self, user_id: UserId) -> Result<DashboardSummary, Box<dyn Error>> {
        self.get_json(self.base_url.join(&format!("task/dashboard/{}", user_id))?).await
    }

    /// Per-priority overdue/completed counts for the dashboard bar chart
    pub async fn bar_chart_data(&self, user_id: UserId) -> Result<BarChartData, Box<dyn Error>> {
        self.get_json(self.base_url.join(&format!("task/dashboard/barchart/{}", user_id))?).await
    }

    /// Tasks started per day over the last week, for the dashboard line chart
    pub async fn line_chart_data(&self, user_id: UserId) -> Result<LineChartData, Box<dyn Error>> {
        self.get_json(self.base_url.join(&format!("task/dashboard/linechart/{}", user_id))?).await
    }

    /// Recently completed and upcoming tasks for the dashboard overview tables
    pub async fn overview_tasks(&self, user_id: UserId) -> Result<TaskOverview, Box<dyn Error>> {
        self.get_json(self.base_url.join(&format!("task/dashboard/overview/{}", user_id))?).await
    }

    /// Attach the headers every authenticated request carries
    fn prepare(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(USER_AGENT, config::user_agent())
            .bearer_auth(self.session.access_token())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Box<dyn Error>> {
        let response = self.prepare(reqwest::Client::new().get(url)).send().await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let envelope: Envelope<T> = response.json().await?;
        envelope.into_data()
    }
}

#[async_trait]
impl TaskSource for Client {
    async fn tasks_for_user(&self, user_id: UserId, page: u32, per_page: u32) -> Result<Vec<Task>, Box<dyn Error>> {
        let mut url = self.base_url.join(&format!("task/user/{}", user_id))?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        self.get_json(url).await
    }

    async fn task_by_id(&self, task_id: TaskId) -> Result<Task, Box<dyn Error>> {
        self.get_json(self.base_url.join(&format!("task/{}", task_id))?).await
    }

    async fn create_task(&self, new_task: &TaskCreate) -> Result<Task, Box<dyn Error>> {
        let response = self
            .prepare(reqwest::Client::new().post(self.base_url.join("task")?))
            .json(new_task)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let envelope: Envelope<Task> = response.json().await?;
        envelope.into_data()
    }

    async fn update_task(&self, task_id: TaskId, patch: &TaskPatch) -> Result<Task, Box<dyn Error>> {
        let response = self
            .prepare(reqwest::Client::new().put(self.base_url.join(&format!("task/{}", task_id))?))
            .json(patch)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let envelope: Envelope<Task> = response.json().await?;
        envelope.into_data()
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), Box<dyn Error>> {
        let response = self
            .prepare(reqwest::Client::new().delete(self.base_url.join(&format!("task/{}", task_id))?))
            .send()
            .await?;

        // The backend answers 204 with no body worth parsing
        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }
        Ok(())
    }
}

/// Normalize the service root so that endpoint paths can be joined onto it
fn parse_base_url(url: &str) -> Result<Url, Box<dyn Error>> {
    let mut url = Url::parse(url)?;
    if url.path().ends_with('/') == false {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_joins_endpoint_paths() {
        let base = parse_base_url("http://localhost:5000/api").unwrap();
        assert_eq!(
            base.join("task/user/7").unwrap().as_str(),
            "http://localhost:5000/api/task/user/7"
        );

        // A trailing slash is not doubled
        let base = parse_base_url("http://localhost:5000/api/").unwrap();
        assert_eq!(base.join("task").unwrap().as_str(), "http://localhost:5000/api/task");
    }

    #[test]
    fn envelope_unwraps_data_or_reports_the_message() {
        let envelope: Envelope<Vec<i32>> = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": [1, 2, 3],
        })).unwrap();
        assert_eq!(envelope.into_data().unwrap(), vec![1, 2, 3]);

        let envelope: Envelope<Vec<i32>> = serde_json::from_value(serde_json::json!({
            "success": false,
            "message": "Task not found",
        })).unwrap();
        assert_eq!(envelope.into_data().unwrap_err().to_string(), "Task not found");
    }

    #[test]
    fn login_reply_carries_session_fields_at_top_level() {
        let reply: LoginReply = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "Login successful.",
            "user": { "id": 42, "name": "Alice", "email": "alice@example.com" },
            "access_token": "aaa.bbb.ccc",
            "refresh_token": "ddd.eee.fff",
        })).unwrap();
        assert!(reply.success);
        assert_eq!(reply.user.unwrap().id, 42);
        assert_eq!(reply.access_token.as_deref(), Some("aaa.bbb.ccc"));
    }
}
