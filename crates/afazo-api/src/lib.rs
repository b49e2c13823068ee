// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use afazo_app::{Task, TaskId, TaskStore};
use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url {base_url:?} must use http or https, got {}://",
                parsed.scheme()
            );
        }
        if parsed.query().is_some() {
            bail!("api.base_url {base_url:?} must not carry query parameters");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, id.get())
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let response = self
            .http
            .get(self.tasks_url())
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        let response = ensure_success(response)?;
        let tasks: Vec<Task> = response.json().context("decode task list")?;
        debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, text), fields(base_url = %self.base_url))]
    pub fn create_task(&self, text: &str) -> Result<()> {
        let response = self
            .http
            .post(self.tasks_url())
            .json(&NewTask {
                text,
                completed: false,
            })
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        ensure_success(response)?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub fn toggle_task(&self, id: TaskId) -> Result<()> {
        let response = self
            .http
            .put(self.task_url(id))
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        ensure_success(response)?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub fn delete_task(&self, id: TaskId) -> Result<()> {
        let response = self
            .http
            .delete(self.task_url(id))
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        ensure_success(response)?;
        Ok(())
    }

    pub fn ping(&self) -> Result<()> {
        self.list_tasks()
            .map(|_| ())
            .with_context(|| format!("task store at {} did not answer", self.base_url))
    }
}

impl TaskStore for Client {
    fn list(&self) -> Result<Vec<Task>> {
        self.list_tasks()
    }

    fn create(&self, text: &str) -> Result<()> {
        self.create_task(text)
    }

    fn toggle(&self, id: TaskId) -> Result<()> {
        self.toggle_task(id)
    }

    fn delete(&self, id: TaskId) -> Result<()> {
        self.delete_task(id)
    }
}

#[derive(Debug, Serialize)]
struct NewTask<'a> {
    text: &'a str,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(clean_error_response(status, &body))
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach task store at {} -- check that the server is running and [api].base_url is right ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(message) = parsed.error.or(parsed.message)
        && !message.is_empty()
    {
        return anyhow!("task store error ({}): {}", status.as_u16(), message);
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return anyhow!("task store error ({}): {}", status.as_u16(), trimmed);
    }

    anyhow!("task store returned {}", status.as_u16())
}
