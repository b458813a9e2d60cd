use super::Gateway;
use crate::domain::{
    CreateSubtaskDto, CreateTaskDto, LinkSubtaskDto, Priority, Status, Subtask, SubtaskSuggestion,
    SuggestionRequest, Task, UpdateSubtaskDto, UpdateTaskDto,
};
use crate::error::{ClientError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const TASKS: &str = "tasks";
const SUBTASKS: &str = "subtasks";

/// Blocking HTTP client for the task API
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    /// Create a client for the API rooted at `api_url` (e.g. "http://localhost:3001")
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let base = parse_base_url(api_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::RemoteUnavailable(format!("could not build HTTP client: {}", e)))?;

        Ok(Self { client, base })
    }

    /// Build `<base>/api/<segments...>`, percent-encoding each segment
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?;
            path.pop_if_empty();
            path.push("api");
            path.extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "API request");
        Ok(self.client.request(method, url))
    }

    /// Send a request and turn transport failures and non-2xx replies into errors
    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().map_err(|e| {
            warn!(error = %e, "API unreachable");
            ClientError::RemoteUnavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().clone();
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), %url, body = %body, "API error");
            return Err(ClientError::RemoteRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.send(self.request(Method::GET, segments)?)?;
        decode(response)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.request(method, segments)?.json(body))?;
        decode(response)
    }

    fn delete(&self, segments: &[&str]) -> Result<()> {
        self.send(self.request(Method::DELETE, segments)?)?;
        Ok(())
    }
}

/// Parse and check an API base URL
pub fn parse_base_url(api_url: &str) -> Result<Url> {
    let base = Url::parse(api_url)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", api_url, e)))?;

    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "{}: expected an http(s) URL",
            api_url
        )));
    }

    Ok(base)
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response
        .text()
        .map_err(|e| ClientError::RemoteUnavailable(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
}

impl Gateway for HttpGateway {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        self.get_json(&[TASKS])
    }

    fn get_task(&self, id: &str) -> Result<Task> {
        self.get_json(&[TASKS, id])
    }

    fn create_task(&self, task: &CreateTaskDto) -> Result<Task> {
        self.send_json(Method::POST, &[TASKS], task)
    }

    fn update_task(&self, id: &str, patch: &UpdateTaskDto) -> Result<Task> {
        self.send_json(Method::PATCH, &[TASKS, id], patch)
    }

    fn delete_task(&self, id: &str) -> Result<()> {
        self.delete(&[TASKS, id])
    }

    fn tasks_by_status(&self, status: Status) -> Result<Vec<Task>> {
        self.get_json(&[TASKS, "status", status.label()])
    }

    fn tasks_by_priority(&self, priority: Priority) -> Result<Vec<Task>> {
        self.get_json(&[TASKS, "priority", priority.label()])
    }

    fn link_subtask(&self, task_id: &str, subtask_id: &str) -> Result<()> {
        let body = LinkSubtaskDto {
            subtask_id: subtask_id.to_string(),
        };
        self.send(self.request(Method::POST, &[TASKS, task_id, "subtask"])?.json(&body))?;
        Ok(())
    }

    fn unlink_subtask(&self, task_id: &str) -> Result<()> {
        self.delete(&[TASKS, task_id, "subtask"])
    }

    fn list_subtasks(&self) -> Result<Vec<Subtask>> {
        self.get_json(&[SUBTASKS])
    }

    fn get_subtask(&self, id: &str) -> Result<Subtask> {
        self.get_json(&[SUBTASKS, id])
    }

    fn create_subtask(&self, subtask: &CreateSubtaskDto) -> Result<Subtask> {
        self.send_json(Method::POST, &[SUBTASKS], subtask)
    }

    fn update_subtask(&self, id: &str, patch: &UpdateSubtaskDto) -> Result<Subtask> {
        self.send_json(Method::PATCH, &[SUBTASKS, id], patch)
    }

    fn delete_subtask(&self, id: &str) -> Result<()> {
        self.delete(&[SUBTASKS, id])
    }

    fn subtasks_by_status(&self, status: Status) -> Result<Vec<Subtask>> {
        self.get_json(&[SUBTASKS, "status", status.label()])
    }

    fn suggest_subtasks(&self, request: &SuggestionRequest) -> Result<Vec<SubtaskSuggestion>> {
        self.send_json(Method::POST, &[SUBTASKS, "ai"], request)
    }
}
